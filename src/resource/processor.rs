//! Post-processor capability
//!
//! Post-processors refine the generic href of a node, or derive further
//! link properties from it, using rules owned by one resource type.

use super::request::{RequestHrefProcessor, SourceScheduleHrefProcessor};
use super::schema::Schema;
use super::types::ResourceType;
use crate::api::ApiRequest;
use crate::error::{HrefError, Result};
use crate::tree::TreeNode;
use std::fmt;
use std::sync::Arc;

/// Mutates one node's href-related properties
pub trait PostProcessor: Send + Sync + fmt::Debug {
    /// Name used in definitions and logs
    fn name(&self) -> &'static str;

    /// Process `node`, whose current href is `href`.
    fn process(&self, request: &ApiRequest, node: &mut TreeNode, href: &str) -> Result<()>;
}

/// Instantiate a post-processor by the name used in resource definitions
pub fn build_processor(
    resource_type: ResourceType,
    name: &str,
    schema: &Arc<dyn Schema>,
) -> Result<Arc<dyn PostProcessor>> {
    match name {
        RequestHrefProcessor::NAME => Ok(Arc::new(RequestHrefProcessor::new(schema.clone()))),
        SourceScheduleHrefProcessor::NAME => Ok(Arc::new(SourceScheduleHrefProcessor)),
        _ => Err(HrefError::UnknownPostProcessor {
            resource_type,
            name: name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::StaticSchema;

    fn schema() -> Arc<dyn Schema> {
        Arc::new(StaticSchema::new().with_key(ResourceType::Request, "Requests/id"))
    }

    #[test]
    fn test_build_known_processors() {
        let schema = schema();
        let href = build_processor(ResourceType::Request, "request_href", &schema).unwrap();
        assert_eq!(href.name(), "request_href");

        let schedule =
            build_processor(ResourceType::Request, "request_source_schedule_href", &schema)
                .unwrap();
        assert_eq!(schedule.name(), "request_source_schedule_href");
    }

    #[test]
    fn test_build_unknown_processor() {
        let err = build_processor(ResourceType::Task, "task_href", &schema()).unwrap_err();
        assert_eq!(
            err,
            HrefError::UnknownPostProcessor {
                resource_type: ResourceType::Task,
                name: "task_href".to_string(),
            }
        );
    }
}
