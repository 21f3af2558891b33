//! Framework-held resource state.

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Result;

/// Attribute name under which the id is serialized.
pub const ID_ATTRIBUTE: &str = "id";

/// Local mirror of a resource: an optional id plus an attribute map.
///
/// Handlers receive it mutably, decode it into a typed struct at the
/// boundary and write remote values back into it. A string `id` attribute
/// is held in the id slot, never in the map, so the serialized form has a
/// single `id` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl ResourceData {
    /// Creates empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates state holding only an id, as used by import.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            attributes: Map::new(),
        }
    }

    /// Creates state from an attribute map.
    pub fn from_attributes(attributes: Map<String, Value>) -> Self {
        let mut data = Self::default();
        data.replace_attributes(attributes);
        data
    }

    /// Returns the local id, if the resource is tracked.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Sets the local id.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Returns the value of an attribute.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Returns the value of an attribute, reading `id` from the id slot.
    pub fn value(&self, name: &str) -> Option<Cow<'_, Value>> {
        match (name, &self.id) {
            (ID_ATTRIBUTE, Some(id)) => Some(Cow::Owned(Value::String(id.clone()))),
            _ => self.get(name).map(Cow::Borrowed),
        }
    }

    /// Returns a string attribute.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Sets the value of an attribute.
    ///
    /// A string `id` sets the id and `null` clears it. Any other `id` value
    /// stays in the map so schema validation can reject it.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        if name != ID_ATTRIBUTE {
            self.attributes.insert(name, value);
            return;
        }

        self.attributes.remove(ID_ATTRIBUTE);
        self.id = None;
        match value {
            Value::String(id) => self.id = Some(id),
            Value::Null => {}
            other => {
                self.attributes.insert(name, other);
            }
        }
    }

    /// Removes an attribute and returns its previous value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.attributes.remove(name)
    }

    /// Returns all attributes.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Replaces all attributes at once; an `id` entry goes through [`Self::set`].
    pub fn replace_attributes(&mut self, mut attributes: Map<String, Value>) {
        let id = attributes.remove(ID_ATTRIBUTE);
        self.attributes = attributes;
        if let Some(id) = id {
            self.set(ID_ATTRIBUTE, id);
        }
    }

    /// Clears the id and every attribute, marking the resource absent.
    pub fn detach(&mut self) {
        self.id = None;
        self.attributes.clear();
    }

    /// Returns `true` if there is neither an id nor any attribute.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.attributes.is_empty()
    }

    /// Decodes the attributes into a typed struct.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(Value::Object(self.attributes.clone()))?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;

    #[derive(Debug, Deserialize)]
    struct Named {
        name: String,
    }

    #[test]
    fn test_decode() {
        let mut data = ResourceData::new();
        data.set("name", "Molzait DEV");
        let named: Named = data.decode().unwrap();
        assert_eq!(named.name, "Molzait DEV");

        data.set("name", 3);
        let err = data.decode::<Named>().unwrap_err();
        assert_eq!(err.kind, ErrorKind::LocalPrecondition);
    }

    #[test]
    fn test_detach() {
        let mut data = ResourceData::with_id("abc");
        data.set("active", true);
        assert!(!data.is_empty());

        data.detach();
        assert!(data.is_empty());
        assert_eq!(data.id(), None);
    }

    #[test]
    fn test_serialize_flattens_attributes() {
        let mut data = ResourceData::with_id("abc");
        data.set("events", json!(["delivery"]));

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value, json!({ "id": "abc", "events": ["delivery"] }));

        let parsed: ResourceData = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, data);
    }

    #[test]
    fn test_id_attribute_is_stored_once() {
        let mut data = ResourceData::new();
        data.set("id", "abc");
        data.set_id("abc");
        data.set("name", "Molzait DEV");

        assert_eq!(data.id(), Some("abc"));
        assert_eq!(data.get("id"), None);
        assert_eq!(data.value("id").as_deref(), Some(&json!("abc")));

        let text = serde_json::to_string(&data).unwrap();
        assert_eq!(text.matches("\"id\"").count(), 1);

        let parsed: ResourceData = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, data);
    }

    #[test]
    fn test_set_id_attribute() {
        let mut data = ResourceData::with_id("abc");
        data.set("id", Value::Null);
        assert!(data.is_empty());

        data.set("id", 42);
        assert_eq!(data.id(), None);
        assert_eq!(data.get("id"), Some(&json!(42)));

        data.set("id", "abc");
        assert_eq!(data.id(), Some("abc"));
        assert_eq!(data.get("id"), None);

        let data = ResourceData::from_attributes(
            json!({ "id": "def", "active": true }).as_object().cloned().unwrap(),
        );
        assert_eq!(data.id(), Some("def"));
        assert_eq!(data.attributes().len(), 1);
    }
}
