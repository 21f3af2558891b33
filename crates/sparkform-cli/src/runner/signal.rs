//! Ctrl+C handling.

use tokio::signal::ctrl_c;
use tokio_util::sync::CancellationToken;

use crate::TRACING_TARGET_SHUTDOWN;

/// Cancels `cancel_token` when Ctrl+C is received.
///
/// The listener stops on its own once the token is cancelled elsewhere.
pub fn cancel_on_ctrl_c(cancel_token: CancellationToken) {
    tokio::spawn(async move {
        tokio::select! {
            biased;

            () = cancel_token.cancelled() => {}

            result = ctrl_c() => match result {
                Ok(()) => {
                    tracing::info!(
                        target: TRACING_TARGET_SHUTDOWN,
                        "Received Ctrl+C signal, cancelling operation"
                    );
                    cancel_token.cancel();
                }
                Err(e) => {
                    tracing::error!(
                        target: TRACING_TARGET_SHUTDOWN,
                        error = %e,
                        "Failed to install Ctrl+C handler"
                    );
                }
            },
        }
    });
}
