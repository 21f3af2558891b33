//! Webhook API surface.
//!
//! [`WebhookApi`] is the seam between the provider and SparkPost: the
//! reqwest-backed [`SpClient`] implements it for real traffic, and tests can
//! substitute an in-memory implementation.
//!
//! [`SpClient`]: crate::SpClient

mod service;
mod types;

pub use service::WebhookService;
pub use types::{Webhook, WebhookInput};

use crate::Result;

/// Remote operations on SparkPost webhooks.
#[async_trait::async_trait]
pub trait WebhookApi: Send + Sync {
    /// Fetches a webhook by id.
    async fn fetch_webhook(&self, id: &str) -> Result<Webhook>;

    /// Creates a webhook and returns the id assigned by SparkPost.
    async fn create_webhook(&self, input: &WebhookInput) -> Result<String>;

    /// Replaces the mutable fields of an existing webhook.
    async fn update_webhook(&self, id: &str, input: &WebhookInput) -> Result<()>;

    /// Deletes a webhook.
    async fn delete_webhook(&self, id: &str) -> Result<()>;
}
