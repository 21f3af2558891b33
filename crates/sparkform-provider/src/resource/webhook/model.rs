//! Typed boundary between resource state and the webhook API.

use std::borrow::Cow;

use serde::Deserialize;
use serde_json::Value;
use sparkform_client::{Webhook, WebhookInput};
use validator::{Validate, ValidationError};

use crate::schema::{check_max_bytes, validate_web_target};
use crate::{Diagnostics, ResourceData};

/// Maximum length of a webhook name in bytes.
pub const MAX_NAME_BYTES: usize = 1024;

/// Configurable webhook attributes, decoded from resource state.
///
/// Computed attributes present in the state (`auth_type`,
/// `exception_subaccounts`) are ignored here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct WebhookConfig {
    /// Display name.
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    /// Target URL.
    #[validate(custom(function = "validate_target"))]
    pub target: String,

    /// Event types.
    #[validate(
        length(min = 1, message = "at least one event is required"),
        custom(function = "validate_events")
    )]
    pub events: Vec<String>,

    /// Delivery toggle.
    #[serde(default)]
    pub active: Option<bool>,
}

impl WebhookConfig {
    /// Decodes and validates the configurable attributes of `data`.
    pub fn from_state(data: &ResourceData) -> Result<Self, Diagnostics> {
        let config: Self = data.decode()?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the create/update payload.
    pub fn to_input(&self) -> WebhookInput {
        let input = WebhookInput::new(&self.name, &self.target, &self.events);
        match self.active {
            Some(active) => input.with_active(active),
            None => input,
        }
    }
}

/// Overwrites `data` with the remote webhook.
///
/// Attributes outside the webhook's fields are left alone.
pub fn write_state(data: &mut ResourceData, webhook: &Webhook) {
    data.set_id(&webhook.id);
    data.set("name", webhook.name.as_str());
    data.set("target", webhook.target.as_str());
    data.set("events", webhook.events.clone());
    data.set("active", webhook.active);
    data.set(
        "exception_subaccounts",
        Value::from(webhook.exception_subaccounts.clone()),
    );
    data.set("auth_type", webhook.auth_type.as_str());
}

fn invalid(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(invalid("name_blank", "name must not be blank".to_string()));
    }
    check_max_bytes(name, MAX_NAME_BYTES)
        .map_err(|message| invalid("name_length", format!("name {message}")))
}

fn validate_target(target: &str) -> Result<(), ValidationError> {
    validate_web_target(target).map_err(|m| invalid("target_port", m))
}

fn validate_events(events: &[String]) -> Result<(), ValidationError> {
    if events.iter().any(|e| e.trim().is_empty()) {
        return Err(invalid("events_blank", "event types must not be blank".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;

    fn state(value: Value) -> ResourceData {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_from_state() {
        let data = state(json!({
            "name": "Molzait DEV",
            "target": "https://example.com/hook",
            "events": ["delivery"],
            "auth_type": "oauth2",
        }));

        let config = WebhookConfig::from_state(&data).unwrap();
        assert_eq!(config.active, None);

        let input = config.to_input();
        let expected = WebhookInput::new("Molzait DEV", "https://example.com/hook", ["delivery"]);
        assert_eq!(input, expected);
    }

    #[test]
    fn test_rejects_empty_events() {
        let data = state(json!({
            "name": "hook",
            "target": "https://example.com/hook",
            "events": [],
        }));

        let diagnostics = WebhookConfig::from_state(&data).unwrap_err();
        let diagnostic = diagnostics.iter().next().unwrap();
        assert_eq!(diagnostic.kind, ErrorKind::LocalPrecondition);
        assert_eq!(diagnostic.attribute.as_deref(), Some("events"));
        assert_eq!(diagnostic.detail.as_deref(), Some("at least one event is required"));
    }

    #[test]
    fn test_rejects_long_name_and_bad_port() {
        let data = state(json!({
            "name": "x".repeat(MAX_NAME_BYTES + 1),
            "target": "https://example.com:8443/hook",
            "events": ["delivery"],
        }));

        let diagnostics = WebhookConfig::from_state(&data).unwrap_err();
        let attributes: Vec<_> = diagnostics
            .iter()
            .filter_map(|d| d.attribute.as_deref())
            .collect();
        assert_eq!(attributes, ["name", "target"]);
    }

    #[test]
    fn test_name_length_is_counted_in_bytes() {
        let config = |name: String| {
            WebhookConfig::from_state(&state(json!({
                "name": name,
                "target": "https://example.com/hook",
                "events": ["delivery"],
            })))
        };

        let config_at_limit = config("x".repeat(MAX_NAME_BYTES)).unwrap();
        assert_eq!(config_at_limit.name.len(), MAX_NAME_BYTES);

        // Two bytes per character.
        assert!(config("é".repeat(MAX_NAME_BYTES / 2)).is_ok());

        let diagnostics = config(format!("{}x", "é".repeat(MAX_NAME_BYTES / 2))).unwrap_err();
        let diagnostic = diagnostics.iter().next().unwrap();
        assert_eq!(diagnostic.attribute.as_deref(), Some("name"));
    }

    #[test]
    fn test_missing_field_is_precondition() {
        let data = state(json!({ "name": "hook" }));
        let diagnostics = WebhookConfig::from_state(&data).unwrap_err();
        assert_eq!(diagnostics.first_error_kind(), Some(ErrorKind::LocalPrecondition));
    }

    #[test]
    fn test_write_state_overwrites_fields() {
        let mut data = state(json!({ "name": "old", "auth_type": "basic", "unrelated": 1 }));
        let webhook = Webhook {
            id: "abc".to_string(),
            name: "new".to_string(),
            target: "https://example.com/hook".to_string(),
            events: vec!["bounce".to_string(), "delivery".to_string()],
            active: false,
            exception_subaccounts: vec![101],
            auth_type: "none".to_string(),
        };

        write_state(&mut data, &webhook);

        assert_eq!(data.id(), Some("abc"));
        assert_eq!(data.get_str("name"), Some("new"));
        assert_eq!(data.get("events"), Some(&json!(["bounce", "delivery"])));
        assert_eq!(data.get("active"), Some(&json!(false)));
        assert_eq!(data.get("exception_subaccounts"), Some(&json!([101])));
        assert_eq!(data.get_str("auth_type"), Some("none"));
        assert_eq!(data.get("unrelated"), Some(&json!(1)));
    }
}
