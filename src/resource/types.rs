//! Resource types and property bags.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Resource types exposed by the management API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceType {
    Cluster,
    Request,
    Task,
    RequestSchedule,
    Service,
    Host,
}

impl ResourceType {
    pub const ALL: [ResourceType; 6] = [
        ResourceType::Cluster,
        ResourceType::Request,
        ResourceType::Task,
        ResourceType::RequestSchedule,
        ResourceType::Service,
        ResourceType::Host,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Cluster => "Cluster",
            ResourceType::Request => "Request",
            ResourceType::Task => "Task",
            ResourceType::RequestSchedule => "RequestSchedule",
            ResourceType::Service => "Service",
            ResourceType::Host => "Host",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A typed resource carrying its property bag.
///
/// Property ids follow the `Category/name` convention, e.g. `Requests/id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "type")]
    resource_type: ResourceType,
    #[serde(default)]
    properties: BTreeMap<String, Value>,
}

impl Resource {
    pub fn new(resource_type: ResourceType) -> Self {
        Self {
            resource_type,
            properties: BTreeMap::new(),
        }
    }

    /// Builder-style property setter
    pub fn with_property(mut self, property_id: &str, value: impl Into<Value>) -> Self {
        self.set_property(property_id, value);
        self
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    pub fn property_value(&self, property_id: &str) -> Option<&Value> {
        self.properties.get(property_id)
    }

    pub fn set_property(&mut self, property_id: &str, value: impl Into<Value>) {
        self.properties.insert(property_id.to_string(), value.into());
    }

    pub fn properties(&self) -> &BTreeMap<String, Value> {
        &self.properties
    }
}
