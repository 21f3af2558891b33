//! The `sparkpost_webhook` data source: look up a webhook managed elsewhere.

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::registry::DataSourceType;
use crate::resource::webhook::{RESOURCE_TYPE, data_source_schema, refresh};
use crate::{
    Diagnostics, Error, HandlerContext, ID_ATTRIBUTE, ResourceData, TRACING_TARGET_WEBHOOK,
};

/// Type name of the webhook data source.
pub const DATA_SOURCE_TYPE: &str = RESOURCE_TYPE;

/// Returns the registry entry of the webhook data source.
pub fn data_source_type() -> DataSourceType {
    DataSourceType {
        name: DATA_SOURCE_TYPE,
        schema: data_source_schema(),
        read,
    }
}

async fn lookup_webhook(
    ctx: &HandlerContext,
    data: &mut ResourceData,
) -> Result<(), Diagnostics> {
    let id = match data.id().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            let error = Error::precondition(ID_ATTRIBUTE, "a non-empty webhook id is required");
            return Err(error.into());
        }
    };

    tracing::debug!(
        target: TRACING_TARGET_WEBHOOK,
        data_source = DATA_SOURCE_TYPE,
        webhook_id = %id,
        "Looking up webhook"
    );

    refresh(ctx, data, &id).await?;
    Ok(())
}

fn read<'a>(
    ctx: &'a HandlerContext,
    data: &'a mut ResourceData,
) -> BoxFuture<'a, Result<(), Diagnostics>> {
    lookup_webhook(ctx, data).boxed()
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sparkform_client::Webhook;
    use sparkform_client::mock::{MockCall, MockWebhookApi};

    use super::*;
    use crate::ErrorKind;

    const MOLZAIT_ID: &str = "e4093700-7733-11ed-9039-2f08fa6ecfde";

    fn lookup(id: &str) -> ResourceData {
        let mut data = ResourceData::new();
        data.set("id", id);
        data
    }

    #[tokio::test]
    async fn test_lookup_by_id() {
        let api = MockWebhookApi::new().with_webhook(Webhook {
            id: MOLZAIT_ID.to_string(),
            name: "Molzait DEV".to_string(),
            target: "https://example.com/hook".to_string(),
            events: vec!["delivery".to_string()],
            active: true,
            exception_subaccounts: vec![12],
            auth_type: "none".to_string(),
        });
        let ctx = HandlerContext::new(api.clone().into_service());
        let data_source = data_source_type();

        let mut data = lookup(MOLZAIT_ID);
        data_source.read(&ctx, &mut data).await.unwrap();

        assert_eq!(data.id(), Some(MOLZAIT_ID));
        assert_eq!(data.get_str("name"), Some("Molzait DEV"));
        assert_eq!(data.get("exception_subaccounts"), Some(&json!([12])));
        assert_eq!(api.calls(), [MockCall::Fetch(MOLZAIT_ID.to_string())]);
    }

    #[tokio::test]
    async fn test_looked_up_state_reloads() {
        let api = MockWebhookApi::new().with_webhook(Webhook {
            id: MOLZAIT_ID.to_string(),
            name: "Molzait DEV".to_string(),
            target: "https://example.com/hook".to_string(),
            events: vec!["delivery".to_string()],
            active: true,
            exception_subaccounts: Vec::new(),
            auth_type: "none".to_string(),
        });
        let ctx = HandlerContext::new(api.clone().into_service());
        let data_source = data_source_type();

        let mut data = lookup(MOLZAIT_ID);
        data_source.read(&ctx, &mut data).await.unwrap();

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["id"], json!(MOLZAIT_ID));
        let mut reloaded: ResourceData = serde_json::from_value(value).unwrap();
        assert_eq!(reloaded, data);

        data_source.read(&ctx, &mut reloaded).await.unwrap();
        assert_eq!(reloaded, data);
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_lookup_requires_id() {
        let api = MockWebhookApi::new();
        let ctx = HandlerContext::new(api.clone().into_service());

        let diagnostics = data_source_type()
            .read(&ctx, &mut ResourceData::new())
            .await
            .unwrap_err();
        assert_eq!(diagnostics.first_error_kind(), Some(ErrorKind::LocalPrecondition));

        let diagnostics = read(&ctx, &mut lookup(" ")).await.unwrap_err();
        assert_eq!(diagnostics.first_error_kind(), Some(ErrorKind::LocalPrecondition));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_of_missing_webhook() {
        let api = MockWebhookApi::new();
        let ctx = HandlerContext::new(api.into_service());

        let mut data = lookup("gone");
        let diagnostics = data_source_type().read(&ctx, &mut data).await.unwrap_err();

        let diagnostic = diagnostics.iter().next().unwrap();
        assert_eq!(diagnostic.kind, ErrorKind::RemoteNotFound);
        assert!(diagnostic.detail.as_deref().unwrap().contains("gone"));
        assert_eq!(data, lookup("gone"));
    }
}
