//! Webhook data types exchanged with the SparkPost API.

use serde::{Deserialize, Deserializer, Serialize};

/// A webhook as stored by SparkPost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    /// Unique alphanumeric ID assigned by SparkPost.
    pub id: String,

    /// Editable display name, not necessarily unique.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// URL that receives POSTed event batches.
    #[serde(default, deserialize_with = "null_as_default")]
    pub target: String,

    /// Event types delivered to the target, in configured order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<String>,

    /// Whether batches are currently being delivered.
    #[serde(default = "default_active", deserialize_with = "null_as_active")]
    pub active: bool,

    /// Subaccounts excluded from this webhook.
    #[serde(default, deserialize_with = "null_as_default")]
    pub exception_subaccounts: Vec<i64>,

    /// Authentication scheme used when calling the target.
    #[serde(default = "default_auth_type", deserialize_with = "null_as_auth_type")]
    pub auth_type: String,
}

fn default_active() -> bool {
    true
}

fn default_auth_type() -> String {
    "none".to_string()
}

/// Reads an explicit `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_active<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(default_active))
}

fn null_as_auth_type<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(default_auth_type))
}

/// The mutable fields of a webhook, sent on create and update.
///
/// Read-only attributes such as `auth_type` have no place here, so they can
/// never be written through this client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookInput {
    /// Display name.
    pub name: String,

    /// Target URL.
    pub target: String,

    /// Event types.
    pub events: Vec<String>,

    /// Delivery toggle; the API default applies when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl WebhookInput {
    /// Creates a new input with the required fields.
    pub fn new(
        name: impl Into<String>,
        target: impl Into<String>,
        events: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            events: events.into_iter().map(Into::into).collect(),
            active: None,
        }
    }

    /// Sets the delivery toggle.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
}
