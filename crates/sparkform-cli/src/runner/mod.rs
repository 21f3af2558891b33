//! Runs one subcommand against the provider.

mod signal;

use anyhow::Context;
use serde_json::Value;
use sparkform_client::SpConfig;
use sparkform_provider::resource::webhook::RESOURCE_TYPE;
use sparkform_provider::{Diagnostics, HandlerContext, Provider, Registry, ResourceData};
use tokio_util::sync::CancellationToken;

use crate::TRACING_TARGET_COMMAND;
use crate::config::{Command, WebhookCommand};

/// Runs `command` and returns the JSON document to print.
///
/// `schema` runs offline; every other command configures the provider
/// first, so a missing API key fails before any request is made.
pub async fn run(command: Command, config: SpConfig) -> anyhow::Result<Value> {
    let command = match command {
        Command::Schema => {
            return serde_json::to_value(Registry::sparkpost().schema())
                .context("failed to serialize schemas");
        }
        Command::Webhook(command) => command,
    };

    let provider =
        Provider::configure(config).context("failed to configure the SparkPost provider")?;

    let cancel_token = CancellationToken::new();
    signal::cancel_on_ctrl_c(cancel_token.clone());
    let ctx = provider.context(cancel_token.clone());

    let name = command.name();
    let result = execute(provider.registry(), &ctx, command).await;
    // Stops the Ctrl+C listener.
    cancel_token.cancel();

    let data = result.map_err(|diagnostics| {
        log_diagnostics(name, &diagnostics);
        anyhow::Error::new(diagnostics).context(format!("{name} failed"))
    })?;

    tracing::info!(
        target: TRACING_TARGET_COMMAND,
        command = name,
        webhook_id = ?data.id(),
        "Command completed"
    );

    serde_json::to_value(&data).context("failed to serialize state")
}

/// Dispatches a lifecycle command through the registry.
pub async fn execute(
    registry: &Registry,
    ctx: &HandlerContext,
    command: WebhookCommand,
) -> Result<ResourceData, Diagnostics> {
    match command {
        WebhookCommand::Read(args) => {
            let mut data = ResourceData::with_id(args.id);
            registry.resource(RESOURCE_TYPE)?.read(ctx, &mut data).await?;
            Ok(data)
        }
        WebhookCommand::Import(args) => {
            registry.resource(RESOURCE_TYPE)?.import(ctx, &args.id).await
        }
        WebhookCommand::Create(args) => {
            let mut data = ResourceData::new();
            args.apply(&mut data);
            registry.resource(RESOURCE_TYPE)?.create(ctx, &mut data).await?;
            Ok(data)
        }
        WebhookCommand::Update(args) => {
            let resource = registry.resource(RESOURCE_TYPE)?;
            let mut data = resource.import(ctx, &args.id).await?;
            args.fields.apply(&mut data);
            resource.update(ctx, &mut data).await?;
            Ok(data)
        }
        WebhookCommand::Delete(args) => {
            let mut data = ResourceData::with_id(args.id);
            registry.resource(RESOURCE_TYPE)?.delete(ctx, &mut data).await?;
            Ok(data)
        }
        WebhookCommand::Lookup(args) => {
            let mut data = ResourceData::with_id(args.id);
            registry.data_source(RESOURCE_TYPE)?.read(ctx, &mut data).await?;
            Ok(data)
        }
    }
}

fn log_diagnostics(command: &str, diagnostics: &Diagnostics) {
    for diagnostic in diagnostics {
        tracing::error!(
            target: TRACING_TARGET_COMMAND,
            command,
            severity = %diagnostic.severity,
            kind = %diagnostic.kind,
            attribute = ?diagnostic.attribute,
            detail = ?diagnostic.detail,
            "{}",
            diagnostic.summary
        );
    }
}
