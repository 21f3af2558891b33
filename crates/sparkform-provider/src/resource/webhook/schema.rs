//! Attribute declarations shared by the webhook resource and data source.

use super::model::MAX_NAME_BYTES;
use crate::schema::{Attribute, AttributeType, Constraint, Schema};

const ID: &str = "Unique alphanumeric ID used to reference the webhook.";
const NAME: &str =
    "Editable display name. Does not have to be unique. Maximum length - 1024 bytes.";
const TARGET: &str = "URL of the target to which to POST event batches. \
    Only ports 80 for http and 443 for https can be set.";
const EVENTS: &str = "Event types delivered to the target, in order.";
const ACTIVE: &str = "Whether event batches are delivered. Defaults to true on creation.";
const EXCEPTION_SUBACCOUNTS: &str = "Subaccounts excluded from this webhook.";
const AUTH_TYPE: &str = "Authentication scheme used when calling the target.";

/// Schema of the `sparkpost_webhook` resource.
pub fn resource_schema() -> Schema {
    Schema::new(0)
        .with_attribute("id", Attribute::computed(AttributeType::String).with_description(ID))
        .with_attribute(
            "name",
            Attribute::required(AttributeType::String)
                .with_description(NAME)
                .with_constraint(Constraint::MaxBytes(MAX_NAME_BYTES)),
        )
        .with_attribute(
            "target",
            Attribute::required(AttributeType::String)
                .with_description(TARGET)
                .with_constraint(Constraint::WebPort),
        )
        .with_attribute(
            "events",
            Attribute::required(AttributeType::list_of_strings())
                .with_description(EVENTS)
                .with_constraint(Constraint::MinItems(1)),
        )
        .with_attribute(
            "active",
            Attribute::optional_computed(AttributeType::Bool).with_description(ACTIVE),
        )
        .with_attribute(
            "exception_subaccounts",
            Attribute::computed(AttributeType::list_of_ints())
                .with_description(EXCEPTION_SUBACCOUNTS),
        )
        .with_attribute(
            "auth_type",
            Attribute::computed(AttributeType::String).with_description(AUTH_TYPE),
        )
}

/// Schema of the `sparkpost_webhook` data source: `id` in, everything else out.
pub fn data_source_schema() -> Schema {
    Schema::new(0)
        .with_attribute("id", Attribute::required(AttributeType::String).with_description(ID))
        .with_attribute(
            "name",
            Attribute::computed(AttributeType::String).with_description(NAME),
        )
        .with_attribute(
            "target",
            Attribute::computed(AttributeType::String).with_description(TARGET),
        )
        .with_attribute(
            "events",
            Attribute::computed(AttributeType::list_of_strings()).with_description(EVENTS),
        )
        .with_attribute(
            "active",
            Attribute::computed(AttributeType::Bool).with_description(ACTIVE),
        )
        .with_attribute(
            "exception_subaccounts",
            Attribute::computed(AttributeType::list_of_ints())
                .with_description(EXCEPTION_SUBACCOUNTS),
        )
        .with_attribute(
            "auth_type",
            Attribute::computed(AttributeType::String).with_description(AUTH_TYPE),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AttributeMode;

    #[test]
    fn test_resource_modes() {
        let schema = resource_schema();

        for name in ["name", "target", "events"] {
            assert_eq!(schema.attribute(name).unwrap().mode, AttributeMode::Required, "{name}");
        }
        for name in ["id", "exception_subaccounts", "auth_type"] {
            assert_eq!(schema.attribute(name).unwrap().mode, AttributeMode::Computed, "{name}");
        }
    }

    #[test]
    fn test_data_source_only_takes_id() {
        let schema = data_source_schema();
        let configurable: Vec<_> = schema
            .attributes
            .iter()
            .filter(|(_, a)| a.mode.is_configurable())
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(configurable, ["id"]);
        assert_eq!(schema.attributes.len(), resource_schema().attributes.len());
    }
}
