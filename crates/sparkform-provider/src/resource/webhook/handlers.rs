//! Lifecycle handlers of the `sparkpost_webhook` resource.

use futures::FutureExt;
use futures::future::BoxFuture;

use super::RESOURCE_TYPE;
use super::model::{WebhookConfig, write_state};
use crate::{Diagnostics, Error, HandlerContext, ResourceData, Result, TRACING_TARGET_WEBHOOK};

/// Returns the tracked id, or a precondition error when there is none.
fn require_id(data: &ResourceData) -> Result<String> {
    match data.id() {
        Some(id) if !id.trim().is_empty() => Ok(id.to_string()),
        _ => Err(Error::precondition("id", "a non-empty webhook id is required")),
    }
}

/// Fetches the webhook and overwrites the state with it.
///
/// The state is touched only after the fetch succeeded.
pub(crate) async fn refresh(ctx: &HandlerContext, data: &mut ResourceData, id: &str) -> Result<()> {
    let webhook = ctx.run("read", ctx.webhooks().fetch_webhook(id)).await?;
    write_state(data, &webhook);

    tracing::debug!(
        target: TRACING_TARGET_WEBHOOK,
        resource = RESOURCE_TYPE,
        webhook_id = %webhook.id,
        "State refreshed from remote"
    );

    Ok(())
}

async fn read_webhook(ctx: &HandlerContext, data: &mut ResourceData) -> Result<(), Diagnostics> {
    let id = require_id(data)?;
    refresh(ctx, data, &id).await?;
    Ok(())
}

async fn create_webhook(ctx: &HandlerContext, data: &mut ResourceData) -> Result<(), Diagnostics> {
    let config = WebhookConfig::from_state(data)?;
    let id = ctx
        .run("create", ctx.webhooks().create_webhook(&config.to_input()))
        .await?;

    tracing::info!(
        target: TRACING_TARGET_WEBHOOK,
        resource = RESOURCE_TYPE,
        webhook_id = %id,
        name = %config.name,
        "Webhook created"
    );

    // The remote object exists from here on; keep it tracked even if the refresh fails.
    data.set_id(&id);
    refresh(ctx, data, &id).await?;
    Ok(())
}

async fn update_webhook(ctx: &HandlerContext, data: &mut ResourceData) -> Result<(), Diagnostics> {
    let id = require_id(data)?;
    let config = WebhookConfig::from_state(data)?;
    ctx.run("update", ctx.webhooks().update_webhook(&id, &config.to_input()))
        .await?;

    tracing::info!(
        target: TRACING_TARGET_WEBHOOK,
        resource = RESOURCE_TYPE,
        webhook_id = %id,
        "Webhook updated"
    );

    refresh(ctx, data, &id).await?;
    Ok(())
}

async fn delete_webhook(ctx: &HandlerContext, data: &mut ResourceData) -> Result<(), Diagnostics> {
    let id = require_id(data)?;
    ctx.run("delete", ctx.webhooks().delete_webhook(&id)).await?;

    tracing::info!(
        target: TRACING_TARGET_WEBHOOK,
        resource = RESOURCE_TYPE,
        webhook_id = %id,
        "Webhook deleted"
    );

    data.detach();
    Ok(())
}

async fn import_webhook(ctx: &HandlerContext, data: &mut ResourceData) -> Result<(), Diagnostics> {
    let id = require_id(data)?;

    tracing::debug!(
        target: TRACING_TARGET_WEBHOOK,
        resource = RESOURCE_TYPE,
        webhook_id = %id,
        "Importing webhook"
    );

    refresh(ctx, data, &id).await?;
    Ok(())
}

pub(crate) fn read<'a>(
    ctx: &'a HandlerContext,
    data: &'a mut ResourceData,
) -> BoxFuture<'a, Result<(), Diagnostics>> {
    read_webhook(ctx, data).boxed()
}

pub(crate) fn create<'a>(
    ctx: &'a HandlerContext,
    data: &'a mut ResourceData,
) -> BoxFuture<'a, Result<(), Diagnostics>> {
    create_webhook(ctx, data).boxed()
}

pub(crate) fn update<'a>(
    ctx: &'a HandlerContext,
    data: &'a mut ResourceData,
) -> BoxFuture<'a, Result<(), Diagnostics>> {
    update_webhook(ctx, data).boxed()
}

pub(crate) fn delete<'a>(
    ctx: &'a HandlerContext,
    data: &'a mut ResourceData,
) -> BoxFuture<'a, Result<(), Diagnostics>> {
    delete_webhook(ctx, data).boxed()
}

pub(crate) fn import<'a>(
    ctx: &'a HandlerContext,
    data: &'a mut ResourceData,
) -> BoxFuture<'a, Result<(), Diagnostics>> {
    import_webhook(ctx, data).boxed()
}
