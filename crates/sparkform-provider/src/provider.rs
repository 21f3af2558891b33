//! Provider entry point: one client and one registry per process.

use sparkform_client::{SpClient, SpConfig, WebhookService};
use tokio_util::sync::CancellationToken;

use crate::{Error, HandlerContext, Registry, Result, TRACING_TARGET_PROVIDER};

/// Configured provider.
///
/// Built once at startup; hands out a [`HandlerContext`] per operation.
#[derive(Debug, Clone)]
pub struct Provider {
    webhooks: WebhookService,
    registry: Registry,
}

impl Provider {
    /// Builds the SparkPost client from `config` and resolves the registry.
    pub fn configure(config: SpConfig) -> Result<Self> {
        let client = SpClient::new(config).map_err(|e| {
            Error::configuration(format!("invalid provider configuration: {e}")).with_source(e)
        })?;

        tracing::info!(
            target: TRACING_TARGET_PROVIDER,
            base_url = %client.config().base_url,
            "Provider configured"
        );

        Ok(Self::with_service(client.into_service()))
    }

    /// Creates a provider around an existing webhook service.
    pub fn with_service(webhooks: WebhookService) -> Self {
        Self {
            webhooks,
            registry: Registry::sparkpost(),
        }
    }

    /// Returns the registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns a handler context bound to `cancel_token`.
    pub fn context(&self, cancel_token: CancellationToken) -> HandlerContext {
        HandlerContext::with_cancellation(self.webhooks.clone(), cancel_token)
    }
}
