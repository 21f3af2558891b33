//! Per-invocation handler context.

use std::future::Future;

use sparkform_client::WebhookService;
use tokio_util::sync::CancellationToken;

use crate::{Error, Result, TRACING_TARGET_CONTEXT};

/// Everything a lifecycle handler needs besides the state it mutates.
///
/// Carries the webhook service built once at startup and the
/// cancellation token of the current operation.
#[derive(Debug, Clone)]
pub struct HandlerContext {
    webhooks: WebhookService,
    cancel_token: CancellationToken,
}

impl HandlerContext {
    /// Creates a context with a fresh, uncancelled token.
    pub fn new(webhooks: WebhookService) -> Self {
        Self::with_cancellation(webhooks, CancellationToken::new())
    }

    /// Creates a context bound to an existing cancellation token.
    pub fn with_cancellation(webhooks: WebhookService, cancel_token: CancellationToken) -> Self {
        Self {
            webhooks,
            cancel_token,
        }
    }

    /// Returns the webhook service.
    pub fn webhooks(&self) -> &WebhookService {
        &self.webhooks
    }

    /// Returns the cancellation token.
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    /// Returns `true` once the operation has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Runs a remote call, racing it against the cancellation token.
    ///
    /// A cancelled call is dropped, which aborts the in-flight request.
    pub async fn run<T, F>(&self, operation: &'static str, call: F) -> Result<T>
    where
        F: Future<Output = sparkform_client::Result<T>>,
    {
        if self.cancel_token.is_cancelled() {
            tracing::debug!(
                target: TRACING_TARGET_CONTEXT,
                operation,
                "Cancelled before the remote call started"
            );
            return Err(Error::cancelled(operation));
        }

        tokio::select! {
            biased;

            () = self.cancel_token.cancelled() => {
                tracing::info!(
                    target: TRACING_TARGET_CONTEXT,
                    operation,
                    "Cancellation requested, abandoning remote call"
                );
                Err(Error::cancelled(operation))
            }

            result = call => result.map_err(Error::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use sparkform_client::mock::{MockCall, MockWebhookApi};

    use super::*;
    use crate::ErrorKind;

    #[tokio::test]
    async fn test_run_passes_results_through() {
        let api = MockWebhookApi::new();
        let ctx = HandlerContext::new(api.clone().into_service());

        let err = ctx
            .run("read", ctx.webhooks().fetch_webhook("missing"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::RemoteNotFound);
        assert_eq!(api.calls(), [MockCall::Fetch("missing".to_string())]);
    }

    #[tokio::test]
    async fn test_cancelled_before_call() {
        let api = MockWebhookApi::new();
        let ctx = HandlerContext::new(api.clone().into_service());
        ctx.cancel_token().cancel();

        let err = ctx
            .run("read", ctx.webhooks().fetch_webhook("abc"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Cancelled);
        assert!(api.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_during_call() {
        let api = MockWebhookApi::new().stalled();
        let ctx = HandlerContext::new(api.into_service());

        let token = ctx.cancel_token().clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            token.cancel();
        });

        let err = ctx
            .run("delete", ctx.webhooks().delete_webhook("abc"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Cancelled);
    }
}
