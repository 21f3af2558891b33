//! Attribute descriptors.

use serde::Serialize;
use serde_json::Value;
use url::Url;

/// Value type of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    /// UTF-8 string.
    String,
    /// Boolean.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// Ordered list of elements of the inner type.
    List(Box<AttributeType>),
}

impl AttributeType {
    /// Shorthand for `List(String)`.
    pub fn list_of_strings() -> Self {
        Self::List(Box::new(Self::String))
    }

    /// Shorthand for `List(Int)`.
    pub fn list_of_ints() -> Self {
        Self::List(Box::new(Self::Int))
    }

    /// Returns `true` if the JSON value has this type.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::String, Value::String(_)) => true,
            (Self::Bool, Value::Bool(_)) => true,
            (Self::Int, Value::Number(n)) => n.is_i64(),
            (Self::List(element), Value::Array(items)) => items.iter().all(|v| element.matches(v)),
            _ => false,
        }
    }

    /// Human-readable type name used in diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Self::String => "string".to_string(),
            Self::Bool => "bool".to_string(),
            Self::Int => "int".to_string(),
            Self::List(element) => format!("list of {}", element.describe()),
        }
    }
}

/// Who supplies an attribute's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeMode {
    /// Must be set by the caller.
    Required,
    /// May be set by the caller.
    Optional,
    /// Set only by the provider from remote state.
    Computed,
    /// May be set by the caller; filled from remote state otherwise.
    OptionalComputed,
}

impl AttributeMode {
    /// Returns `true` if the caller may supply a value.
    pub const fn is_configurable(self) -> bool {
        !matches!(self, Self::Computed)
    }

    /// Returns `true` if the caller must supply a value.
    pub const fn is_required(self) -> bool {
        matches!(self, Self::Required)
    }
}

/// Validation constraint on an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// String length limit in bytes.
    MaxBytes(usize),
    /// Minimum number of list items.
    MinItems(usize),
    /// URL restricted to http on port 80 or https on port 443.
    WebPort,
}

impl Constraint {
    /// Checks a value of the declared type against this constraint.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        match (self, value) {
            (Self::MaxBytes(max), Value::String(s)) => check_max_bytes(s, *max),
            (Self::MinItems(min), Value::Array(items)) => check_min_items(items.len(), *min),
            (Self::WebPort, Value::String(s)) => validate_web_target(s),
            _ => Ok(()),
        }
    }
}

pub(crate) fn check_max_bytes(value: &str, max: usize) -> Result<(), String> {
    if value.len() > max {
        return Err(format!("must be at most {max} bytes, got {}", value.len()));
    }
    Ok(())
}

fn check_min_items(len: usize, min: usize) -> Result<(), String> {
    if len < min {
        return Err(format!("at least {min} item(s) required, got {len}"));
    }
    Ok(())
}

/// Checks that `target` is an absolute http(s) URL on the scheme's default port.
pub fn validate_web_target(target: &str) -> Result<(), String> {
    let url = Url::parse(target).map_err(|e| format!("'{target}' is not a valid URL: {e}"))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!(
            "'{target}' must use http or https, got '{}'",
            url.scheme()
        ));
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(format!("'{target}' has no host"));
    }

    // `Url` drops the port when it equals the scheme default.
    if let Some(port) = url.port() {
        return Err(format!(
            "only port 80 for http and 443 for https can be set, got port {port}"
        ));
    }

    Ok(())
}

/// Description of a single attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// Value type.
    #[serde(rename = "type")]
    pub kind: AttributeType,
    /// Who supplies the value.
    pub mode: AttributeMode,
    /// Documentation shown to users.
    #[serde(skip_serializing_if = "str::is_empty")]
    pub description: &'static str,
    /// Constraints checked before any remote call.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<Constraint>,
}

impl Attribute {
    fn new(kind: AttributeType, mode: AttributeMode) -> Self {
        Self {
            kind,
            mode,
            description: "",
            constraints: Vec::new(),
        }
    }

    /// Creates a required attribute.
    pub fn required(kind: AttributeType) -> Self {
        Self::new(kind, AttributeMode::Required)
    }

    /// Creates an optional attribute.
    pub fn optional(kind: AttributeType) -> Self {
        Self::new(kind, AttributeMode::Optional)
    }

    /// Creates a computed attribute.
    pub fn computed(kind: AttributeType) -> Self {
        Self::new(kind, AttributeMode::Computed)
    }

    /// Creates an optional attribute that is filled from remote state when unset.
    pub fn optional_computed(kind: AttributeType) -> Self {
        Self::new(kind, AttributeMode::OptionalComputed)
    }

    /// Sets the description.
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Adds a constraint.
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Checks type and constraints of a present value.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        if !self.kind.matches(value) {
            return Err(format!("expected {}, got {}", self.kind.describe(), json_type(value)));
        }
        self.constraints.iter().try_for_each(|c| c.check(value))
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() => "int",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_web_target_ports() {
        assert!(validate_web_target("https://example.com/hook").is_ok());
        assert!(validate_web_target("https://example.com:443/hook").is_ok());
        assert!(validate_web_target("http://example.com:80/hook").is_ok());

        let err = validate_web_target("https://example.com:8443/hook").unwrap_err();
        assert!(err.contains("8443"));
        assert!(validate_web_target("http://example.com:443/").is_err());
        assert!(validate_web_target("ftp://example.com/").is_err());
        assert!(validate_web_target("not a url").is_err());
    }

    #[test]
    fn test_type_matching() {
        assert!(AttributeType::list_of_strings().matches(&json!(["delivery", "bounce"])));
        assert!(!AttributeType::list_of_strings().matches(&json!(["delivery", 1])));
        assert!(AttributeType::list_of_ints().matches(&json!([101, 102])));
        assert!(!AttributeType::Int.matches(&json!(1.5)));
        assert!(!AttributeType::Bool.matches(&json!("true")));
    }

    #[test]
    fn test_attribute_check() {
        let name =
            Attribute::required(AttributeType::String).with_constraint(Constraint::MaxBytes(4));
        assert!(name.check(&json!("abcd")).is_ok());
        assert!(name.check(&json!("abcde")).unwrap_err().contains("at most 4 bytes"));
        assert_eq!(name.check(&json!(true)).unwrap_err(), "expected string, got bool");

        let events = Attribute::required(AttributeType::list_of_strings())
            .with_constraint(Constraint::MinItems(1));
        assert!(events.check(&json!([])).is_err());
    }

    #[test]
    fn test_serialize() {
        let attribute = Attribute::computed(AttributeType::list_of_ints());
        let value = serde_json::to_value(&attribute).unwrap();
        assert_eq!(value, json!({ "type": { "list": "int" }, "mode": "computed" }));
    }
}
