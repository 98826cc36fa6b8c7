//! Resource Registry - Load resource definitions from JSON
//!
//! Resource definitions are embedded JSON files describing each type's URL
//! names, key property, sub-resources and post-processors. They are parsed
//! into a [`Registry`] value once at start-up and handed to whoever needs
//! them; the registry is immutable afterwards.

use super::processor::{build_processor, PostProcessor};
use super::schema::{Schema, StaticSchema};
use super::types::ResourceType;
use crate::error::{HrefError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Embedded resource JSON files (compiled into the binary)
const RESOURCE_FILES: &[&str] = &[
    include_str!("../resources/clusters.json"),
    include_str!("../resources/requests.json"),
];

/// Resource definition from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceDef {
    pub plural_name: String,
    pub singular_name: String,
    pub key_property: String,
    #[serde(default)]
    pub sub_resources: Vec<ResourceType>,
    #[serde(default)]
    pub post_processors: Vec<String>,
}

/// Root structure of resources/*.json
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceConfig {
    #[serde(default)]
    pub resources: HashMap<ResourceType, ResourceDef>,
}

impl ResourceConfig {
    /// Definitions compiled into the binary
    pub fn embedded() -> Self {
        let mut final_config = ResourceConfig::default();

        for content in RESOURCE_FILES {
            let partial: ResourceConfig = serde_json::from_str(content)
                .unwrap_or_else(|e| panic!("Failed to parse embedded resource JSON: {}", e));
            final_config.resources.extend(partial.resources);
        }

        final_config
    }

    /// Key property table of all configured types
    pub fn schema(&self) -> StaticSchema {
        self.resources
            .iter()
            .fold(StaticSchema::new(), |schema, (ty, def)| {
                schema.with_key(*ty, &def.key_property)
            })
    }
}

/// A child type addressable as a nested collection of its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubResourceDefinition {
    resource_type: ResourceType,
}

impl SubResourceDefinition {
    pub fn new(resource_type: ResourceType) -> Self {
        Self { resource_type }
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }
}

/// Static metadata of one resource type
#[derive(Clone)]
pub struct ResourceDefinition {
    resource_type: ResourceType,
    plural_name: String,
    singular_name: String,
    sub_resources: Vec<SubResourceDefinition>,
    post_processors: Vec<Arc<dyn PostProcessor>>,
}

impl ResourceDefinition {
    pub fn new(resource_type: ResourceType, plural_name: &str, singular_name: &str) -> Self {
        Self {
            resource_type,
            plural_name: plural_name.to_string(),
            singular_name: singular_name.to_string(),
            sub_resources: Vec::new(),
            post_processors: Vec::new(),
        }
    }

    pub fn with_sub_resource(mut self, resource_type: ResourceType) -> Self {
        self.sub_resources
            .push(SubResourceDefinition::new(resource_type));
        self
    }

    pub fn with_post_processor(mut self, processor: Arc<dyn PostProcessor>) -> Self {
        self.post_processors.push(processor);
        self
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    pub fn plural_name(&self) -> &str {
        &self.plural_name
    }

    pub fn singular_name(&self) -> &str {
        &self.singular_name
    }

    pub fn sub_resource_definitions(&self) -> &[SubResourceDefinition] {
        &self.sub_resources
    }

    pub fn has_sub_resource(&self, resource_type: ResourceType) -> bool {
        self.sub_resources
            .iter()
            .any(|s| s.resource_type() == resource_type)
    }

    /// Post-processors in execution order
    pub fn post_processors(&self) -> &[Arc<dyn PostProcessor>] {
        &self.post_processors
    }
}

impl fmt::Debug for ResourceDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceDefinition")
            .field("resource_type", &self.resource_type)
            .field("plural_name", &self.plural_name)
            .field("singular_name", &self.singular_name)
            .field("sub_resources", &self.sub_resources)
            .field(
                "post_processors",
                &self
                    .post_processors
                    .iter()
                    .map(|p| p.name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// All resource definitions plus the schema they were built against
#[derive(Debug, Clone)]
pub struct Registry {
    schema: Arc<dyn Schema>,
    definitions: HashMap<ResourceType, ResourceDefinition>,
}

impl Registry {
    /// Empty registry; add definitions with [`Registry::register`]
    pub fn new(schema: Arc<dyn Schema>) -> Self {
        Self {
            schema,
            definitions: HashMap::new(),
        }
    }

    /// Registry of the embedded definitions
    pub fn standard() -> Result<Self> {
        let config = ResourceConfig::embedded();
        let schema: Arc<dyn Schema> = Arc::new(config.schema());
        Self::from_config(&config, schema)
    }

    /// Build and validate a registry from parsed definitions
    pub fn from_config(config: &ResourceConfig, schema: Arc<dyn Schema>) -> Result<Self> {
        let mut registry = Self::new(schema.clone());

        for (ty, def) in &config.resources {
            let mut definition =
                ResourceDefinition::new(*ty, &def.plural_name, &def.singular_name);
            for sub in &def.sub_resources {
                definition = definition.with_sub_resource(*sub);
            }
            for name in &def.post_processors {
                definition = definition.with_post_processor(build_processor(*ty, name, &schema)?);
            }
            registry.register(definition);
        }

        registry.validate()?;
        tracing::info!("Loaded {} resource definitions", registry.definitions.len());
        Ok(registry)
    }

    pub fn register(&mut self, definition: ResourceDefinition) {
        self.definitions
            .insert(definition.resource_type(), definition);
    }

    /// Every declared sub-resource is registered and every type has a key
    pub fn validate(&self) -> Result<()> {
        for definition in self.definitions.values() {
            self.schema.key_property_id(definition.resource_type())?;

            for sub in definition.sub_resource_definitions() {
                if !self.definitions.contains_key(&sub.resource_type()) {
                    return Err(HrefError::UndeclaredSubResource {
                        parent: definition.resource_type(),
                        child: sub.resource_type(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn schema(&self) -> &Arc<dyn Schema> {
        &self.schema
    }

    pub fn get(&self, resource_type: ResourceType) -> Option<&ResourceDefinition> {
        self.definitions.get(&resource_type)
    }

    pub fn definition(&self, resource_type: ResourceType) -> Result<&ResourceDefinition> {
        self.get(resource_type)
            .ok_or(HrefError::UnknownResourceType(resource_type))
    }

    /// Definitions ordered by type
    pub fn definitions(&self) -> Vec<&ResourceDefinition> {
        let mut defs: Vec<_> = self.definitions.values().collect();
        defs.sort_by_key(|d| d.resource_type());
        defs
    }
}
