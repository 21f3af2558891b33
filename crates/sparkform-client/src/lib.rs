#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Logging target for client construction and configuration.
pub const TRACING_TARGET_CLIENT: &str = "sparkform_client::client";

/// Logging target for HTTP requests and responses.
pub const TRACING_TARGET_HTTP: &str = "sparkform_client::http";

/// Logging target for the webhook service wrapper.
pub const TRACING_TARGET_SERVICE: &str = "sparkform_client::service";

mod error;

pub mod client;
pub mod webhook;

#[cfg(feature = "test-utils")]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;

pub use client::{SpClient, SpConfig};
pub use error::{Error, ErrorKind, Result};
pub use webhook::{Webhook, WebhookApi, WebhookInput, WebhookService};
