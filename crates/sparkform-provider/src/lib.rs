#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Logging target for provider configuration.
pub const TRACING_TARGET_PROVIDER: &str = "sparkform_provider::provider";

/// Logging target for registry resolution.
pub const TRACING_TARGET_REGISTRY: &str = "sparkform_provider::registry";

/// Logging target for cancellation of remote calls.
pub const TRACING_TARGET_CONTEXT: &str = "sparkform_provider::context";

/// Logging target for webhook lifecycle handlers.
pub const TRACING_TARGET_WEBHOOK: &str = "sparkform_provider::webhook";

mod context;
mod diagnostic;
mod error;
mod provider;
mod state;

pub mod data_source;
pub mod registry;
pub mod resource;
pub mod schema;

pub use context::HandlerContext;
pub use diagnostic::{Diagnostic, Diagnostics, Severity};
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use provider::Provider;
pub use registry::{DataSourceType, HandlerFn, Registry, ResourceType};
pub use state::{ID_ATTRIBUTE, ResourceData};
