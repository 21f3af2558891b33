//! Static schema declarations for resources and data sources.

mod attribute;

use std::collections::BTreeMap;

pub use attribute::{Attribute, AttributeMode, AttributeType, Constraint, validate_web_target};
pub(crate) use attribute::check_max_bytes;
use serde::Serialize;
use serde_json::Value;

use crate::{Diagnostic, Diagnostics, ResourceData};

/// Attribute set of a resource type or data source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    /// Schema version, bumped on incompatible attribute changes.
    pub version: u32,
    /// Attributes by name.
    pub attributes: BTreeMap<&'static str, Attribute>,
}

impl Schema {
    /// Creates an empty schema with the given version.
    pub fn new(version: u32) -> Self {
        Self {
            version,
            attributes: BTreeMap::new(),
        }
    }

    /// Adds an attribute.
    pub fn with_attribute(mut self, name: &'static str, attribute: Attribute) -> Self {
        self.attributes.insert(name, attribute);
        self
    }

    /// Returns the attribute with the given name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Checks presence, type and constraints of every configurable attribute.
    ///
    /// Computed attributes are skipped since they carry values from
    /// earlier reads.
    pub fn validate(&self, data: &ResourceData) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();

        for (name, attribute) in &self.attributes {
            if !attribute.mode.is_configurable() {
                continue;
            }

            match data.value(name).as_deref() {
                None | Some(Value::Null) => {
                    if attribute.mode.is_required() {
                        diagnostics.push(Diagnostic::precondition(
                            *name,
                            format!("the \"{name}\" attribute is required"),
                        ));
                    }
                }
                Some(value) => {
                    if let Err(detail) = attribute.check(value) {
                        diagnostics.push(Diagnostic::precondition(*name, detail));
                    }
                }
            }
        }

        diagnostics
    }
}
