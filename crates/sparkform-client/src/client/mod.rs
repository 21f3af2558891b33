//! SparkPost HTTP client module.
//!
//! This module provides the reqwest-backed implementation of
//! [`WebhookApi`](crate::WebhookApi) together with its configuration.

mod sp_client;
mod sp_config;

pub use sp_client::SpClient;
pub use sp_config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, SpConfig};
