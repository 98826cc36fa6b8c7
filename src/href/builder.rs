//! Generic href builder
//!
//! Produces the baseline href of every node from its parent's href. The
//! result is hierarchical but knows nothing of type-specific scoping; that
//! is left to the post-processors of each resource definition.

use super::segments::{join, strip_query};
use crate::api::ApiRequest;
use crate::error::Result;
use crate::resource::{Resource, ResourceDefinition, Schema};
use std::sync::Arc;

/// Where a node sits relative to its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The node is the root of the result tree
    Root,
    /// The parent is a collection node, which already names the plural
    InCollection,
    /// The parent is a resource node
    UnderResource,
}

#[derive(Debug, Clone)]
pub struct HrefBuilder {
    schema: Arc<dyn Schema>,
}

impl HrefBuilder {
    pub fn new(schema: Arc<dyn Schema>) -> Self {
        Self { schema }
    }

    /// Href of the request target, without query string
    pub fn root_href(&self, request: &ApiRequest) -> String {
        strip_query(request.uri()).trim_end_matches('/').to_string()
    }

    pub fn collection_href(&self, parent_href: &str, name: &str) -> String {
        join(parent_href, name)
    }

    /// Baseline href of a resource node
    pub fn resource_href(
        &self,
        placement: Placement,
        parent_href: &str,
        definition: &ResourceDefinition,
        resource: &Resource,
    ) -> Result<String> {
        match placement {
            Placement::Root => Ok(parent_href.to_string()),
            Placement::InCollection => {
                let key = self.schema.key_value(resource)?;
                Ok(join(parent_href, &key))
            }
            Placement::UnderResource => {
                let key = self.schema.key_value(resource)?;
                Ok(join(&join(parent_href, definition.plural_name()), &key))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HrefError;
    use crate::resource::{ResourceType, StaticSchema};

    fn builder() -> HrefBuilder {
        let schema = StaticSchema::new()
            .with_key(ResourceType::Task, "Tasks/id")
            .with_key(ResourceType::Host, "Hosts/host_name");
        HrefBuilder::new(Arc::new(schema))
    }

    fn task_definition() -> ResourceDefinition {
        ResourceDefinition::new(ResourceType::Task, "tasks", "task")
    }

    #[test]
    fn test_root_href_drops_query_and_trailing_slash() {
        let request = ApiRequest::new("http://h/api/v1/clusters/c1/requests/?fields=*");
        assert_eq!(
            builder().root_href(&request),
            "http://h/api/v1/clusters/c1/requests"
        );
    }

    #[test]
    fn test_resource_under_resource_adds_plural() {
        let task = Resource::new(ResourceType::Task).with_property("Tasks/id", 9);
        let href = builder()
            .resource_href(
                Placement::UnderResource,
                "http://h/api/v1/clusters/c1/requests/5",
                &task_definition(),
                &task,
            )
            .unwrap();
        assert_eq!(href, "http://h/api/v1/clusters/c1/requests/5/tasks/9");
    }

    #[test]
    fn test_resource_in_collection_appends_key_only() {
        let task = Resource::new(ResourceType::Task).with_property("Tasks/id", 9);
        let href = builder()
            .resource_href(
                Placement::InCollection,
                "http://h/api/v1/clusters/c1/requests/5/tasks",
                &task_definition(),
                &task,
            )
            .unwrap();
        assert_eq!(href, "http://h/api/v1/clusters/c1/requests/5/tasks/9");
    }

    #[test]
    fn test_root_resource_keeps_request_href() {
        let task = Resource::new(ResourceType::Task);
        let href = builder()
            .resource_href(Placement::Root, "http://h/x", &task_definition(), &task)
            .unwrap();
        assert_eq!(href, "http://h/x");
    }

    #[test]
    fn test_missing_key_fails() {
        let task = Resource::new(ResourceType::Task);
        let err = builder()
            .resource_href(Placement::InCollection, "http://h/x", &task_definition(), &task)
            .unwrap_err();
        assert!(matches!(err, HrefError::MissingKeyValue { .. }));
    }

    #[test]
    fn test_collection_href() {
        assert_eq!(
            builder().collection_href("http://h/api/v1/clusters/c1", "hosts"),
            "http://h/api/v1/clusters/c1/hosts"
        );
    }
}
