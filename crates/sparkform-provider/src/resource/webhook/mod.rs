//! The `sparkpost_webhook` resource.
//!
//! Lifecycle: `absent -> create -> present -> update* -> present -> delete
//! -> absent`, with read as a self-transition that mirrors the remote
//! webhook into local state.

mod handlers;
mod model;
mod schema;

pub(crate) use handlers::refresh;
pub use model::{MAX_NAME_BYTES, WebhookConfig, write_state};
pub use schema::{data_source_schema, resource_schema};

use crate::registry::ResourceType;

/// Type name of the webhook resource.
pub const RESOURCE_TYPE: &str = "sparkpost_webhook";

/// Returns the registry entry of the webhook resource.
pub fn resource_type() -> ResourceType {
    ResourceType {
        name: RESOURCE_TYPE,
        schema: resource_schema(),
        read: handlers::read,
        create: handlers::create,
        update: handlers::update,
        delete: handlers::delete,
        import: handlers::import,
    }
}
