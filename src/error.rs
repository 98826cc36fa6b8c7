//! Error types for href post-processing.

use crate::resource::ResourceType;
use thiserror::Error;

/// Errors raised while building or rewriting hrefs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HrefError {
    /// A marker segment (e.g. `clusters`) was the last segment of the href.
    #[error("Malformed href '{href}': no segment follows '{marker}'")]
    MalformedHref { href: String, marker: String },

    /// The schema declares no key property for the type.
    #[error("Schema misconfiguration: no key property declared for {0}")]
    MissingKeyProperty(ResourceType),

    /// The resource has no value (or a null value) for its key property.
    #[error("Schema misconfiguration: {resource_type} resource has no value for key property '{property}'")]
    MissingKeyValue {
        resource_type: ResourceType,
        property: String,
    },

    /// The key value cannot be rendered as a path segment.
    #[error("{resource_type} key property '{property}' is not a scalar value")]
    UnsupportedKeyValue {
        resource_type: ResourceType,
        property: String,
    },

    /// A node carries a type with no registered definition.
    #[error("No resource definition registered for {0}")]
    UnknownResourceType(ResourceType),

    /// A definition declares a sub-resource type that is not registered.
    #[error("{parent} declares sub-resource {child} which has no definition")]
    UndeclaredSubResource {
        parent: ResourceType,
        child: ResourceType,
    },

    /// A definition names a post-processor that does not exist.
    #[error("{resource_type} names unknown post-processor '{name}'")]
    UnknownPostProcessor {
        resource_type: ResourceType,
        name: String,
    },
}

pub type Result<T, E = HrefError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_href_message_names_marker() {
        let err = HrefError::MalformedHref {
            href: "http://h/api/v1/clusters".to_string(),
            marker: "clusters".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Malformed href"));
        assert!(msg.contains("'clusters'"));
    }

    #[test]
    fn test_missing_key_value_message() {
        let err = HrefError::MissingKeyValue {
            resource_type: ResourceType::Request,
            property: "Requests/id".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Schema misconfiguration: Request resource has no value for key property 'Requests/id'"
        );
    }
}
