//! Key property resolution
//!
//! Maps each resource type to the property id that uniquely identifies its
//! instances, and reads that key out of a resource as a path segment.

use super::types::{Resource, ResourceType};
use crate::error::{HrefError, Result};
use crate::href::path_segment;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Resolves the key property of a resource type.
pub trait Schema: Send + Sync + fmt::Debug {
    /// Property id identifying instances of `resource_type`.
    fn key_property_id(&self, resource_type: ResourceType) -> Result<&str>;

    /// Key value of `resource`, rendered as an href path segment.
    ///
    /// A missing or null key is a configuration error and is never rendered
    /// as a literal `null` segment.
    fn key_value(&self, resource: &Resource) -> Result<String> {
        let resource_type = resource.resource_type();
        let property = self.key_property_id(resource_type)?;

        match resource.property_value(property) {
            None | Some(Value::Null) => Err(HrefError::MissingKeyValue {
                resource_type,
                property: property.to_string(),
            }),
            Some(value) => path_segment(value).ok_or_else(|| HrefError::UnsupportedKeyValue {
                resource_type,
                property: property.to_string(),
            }),
        }
    }
}

/// Schema backed by a fixed type → key property table.
#[derive(Debug, Clone, Default)]
pub struct StaticSchema {
    keys: HashMap<ResourceType, String>,
}

impl StaticSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, resource_type: ResourceType, property_id: &str) -> Self {
        self.keys.insert(resource_type, property_id.to_string());
        self
    }
}

impl Schema for StaticSchema {
    fn key_property_id(&self, resource_type: ResourceType) -> Result<&str> {
        self.keys
            .get(&resource_type)
            .map(String::as_str)
            .ok_or(HrefError::MissingKeyProperty(resource_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> StaticSchema {
        StaticSchema::new()
            .with_key(ResourceType::Request, "Requests/id")
            .with_key(ResourceType::Host, "Hosts/host_name")
    }

    #[test]
    fn test_key_property_lookup() {
        let schema = schema();
        assert_eq!(
            schema.key_property_id(ResourceType::Request).unwrap(),
            "Requests/id"
        );
        assert_eq!(
            schema.key_property_id(ResourceType::Task),
            Err(HrefError::MissingKeyProperty(ResourceType::Task))
        );
    }

    #[test]
    fn test_numeric_key_value() {
        let resource = Resource::new(ResourceType::Request).with_property("Requests/id", 42);
        assert_eq!(schema().key_value(&resource).unwrap(), "42");
    }

    #[test]
    fn test_string_key_value_is_percent_encoded() {
        let resource =
            Resource::new(ResourceType::Host).with_property("Hosts/host_name", "rack 1/node");
        assert_eq!(schema().key_value(&resource).unwrap(), "rack%201%2Fnode");
    }

    #[test]
    fn test_null_key_value_is_configuration_error() {
        let resource =
            Resource::new(ResourceType::Request).with_property("Requests/id", Value::Null);
        assert_eq!(
            schema().key_value(&resource),
            Err(HrefError::MissingKeyValue {
                resource_type: ResourceType::Request,
                property: "Requests/id".to_string(),
            })
        );
    }

    #[test]
    fn test_absent_key_value_is_configuration_error() {
        let resource = Resource::new(ResourceType::Request);
        assert!(matches!(
            schema().key_value(&resource),
            Err(HrefError::MissingKeyValue { .. })
        ));
    }

    #[test]
    fn test_object_key_value_is_rejected() {
        let resource = Resource::new(ResourceType::Request)
            .with_property("Requests/id", serde_json::json!({ "nested": 1 }));
        assert!(matches!(
            schema().key_value(&resource),
            Err(HrefError::UnsupportedKeyValue { .. })
        ));
    }

    #[test]
    fn test_type_without_key_fails_before_reading_value() {
        let resource = Resource::new(ResourceType::Cluster);
        assert_eq!(
            schema().key_value(&resource),
            Err(HrefError::MissingKeyProperty(ResourceType::Cluster))
        );
    }
}
