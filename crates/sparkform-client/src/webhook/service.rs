//! Webhook service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use super::{Webhook, WebhookApi, WebhookInput};
use crate::{Result, TRACING_TARGET_SERVICE};

/// Webhook service wrapper with observability.
///
/// This wrapper adds structured logging to any [`WebhookApi`] implementation.
/// The inner client is wrapped in `Arc` for cheap cloning, so one instance
/// built at startup can be handed to every operation.
#[derive(Clone)]
pub struct WebhookService {
    inner: Arc<dyn WebhookApi>,
}

impl fmt::Debug for WebhookService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookService").finish_non_exhaustive()
    }
}

impl WebhookService {
    /// Create a new webhook service wrapper.
    pub fn new<A>(api: A) -> Self
    where
        A: WebhookApi + 'static,
    {
        Self {
            inner: Arc::new(api),
        }
    }

    /// Fetches a webhook by id.
    pub async fn fetch_webhook(&self, id: &str) -> Result<Webhook> {
        let started_at = Instant::now();
        let result = self.inner.fetch_webhook(id).await;
        log_outcome("fetch", Some(id), started_at, &result);
        result
    }

    /// Creates a webhook and returns its assigned id.
    pub async fn create_webhook(&self, input: &WebhookInput) -> Result<String> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET_SERVICE,
            name = %input.name,
            target_url = %input.target,
            events = input.events.len(),
            "Creating webhook"
        );

        let result = self.inner.create_webhook(input).await;
        let id = result.as_ref().ok().map(String::as_str);
        log_outcome("create", id, started_at, &result);
        result
    }

    /// Replaces the mutable fields of a webhook.
    pub async fn update_webhook(&self, id: &str, input: &WebhookInput) -> Result<()> {
        let started_at = Instant::now();
        let result = self.inner.update_webhook(id, input).await;
        log_outcome("update", Some(id), started_at, &result);
        result
    }

    /// Deletes a webhook.
    pub async fn delete_webhook(&self, id: &str) -> Result<()> {
        let started_at = Instant::now();
        let result = self.inner.delete_webhook(id).await;
        log_outcome("delete", Some(id), started_at, &result);
        result
    }
}

fn log_outcome<T>(
    operation: &'static str,
    id: Option<&str>,
    started_at: Instant,
    result: &Result<T>,
) {
    let elapsed = started_at.elapsed();

    match result {
        Ok(_) => {
            tracing::debug!(
                target: TRACING_TARGET_SERVICE,
                operation,
                webhook_id = ?id,
                elapsed_ms = elapsed.as_millis(),
                "Webhook operation completed"
            );
        }
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET_SERVICE,
                operation,
                webhook_id = ?id,
                kind = %error.kind(),
                error = %error,
                elapsed_ms = elapsed.as_millis(),
                "Webhook operation failed"
            );
        }
    }
}
