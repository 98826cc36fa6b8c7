//! Result tree walker
//!
//! Visits every node of a result tree top-down, assigns its baseline href
//! and then runs the post-processors registered for the node's type. A
//! node's final href is the base for its children's hrefs.

use super::node::{TreeNode, HREF_PROPERTY};
use crate::api::ApiRequest;
use crate::error::Result;
use crate::href::{strip_query, HrefBuilder, Placement};
use crate::resource::{Registry, ResourceType};

/// Annotates result trees with hrefs using one registry
#[derive(Debug, Clone)]
pub struct HrefAnnotator<'r> {
    registry: &'r Registry,
    builder: HrefBuilder,
}

impl<'r> HrefAnnotator<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            builder: HrefBuilder::new(registry.schema().clone()),
        }
    }

    /// Annotate `root`, the result of `request`, in place.
    ///
    /// Stops at the first node that cannot be annotated.
    pub fn annotate(&self, request: &ApiRequest, root: &mut TreeNode) -> Result<()> {
        let href = self.builder.root_href(request);
        tracing::debug!("Annotating result tree of {}", request.uri());
        self.process_node(request, root, Placement::Root, None, &href)
    }

    fn process_node(
        &self,
        request: &ApiRequest,
        node: &mut TreeNode,
        placement: Placement,
        parent_type: Option<ResourceType>,
        parent_href: &str,
    ) -> Result<()> {
        let href = match node.object() {
            Some(resource) => {
                let resource_type = resource.resource_type();
                let definition = self.registry.definition(resource_type)?;

                if let Some(parent_type) = parent_type {
                    let declared = self
                        .registry
                        .get(parent_type)
                        .is_some_and(|p| p.has_sub_resource(resource_type));
                    if !declared {
                        tracing::debug!(
                            "{} is not a declared sub-resource of {}",
                            resource_type,
                            parent_type
                        );
                    }
                }

                // Processors see the href the node was reached through: an
                // upstream href, the enclosing collection, or its own baseline.
                let (baseline, processor_href) = match node.href() {
                    Some(upstream) => (upstream.to_string(), upstream.to_string()),
                    None => {
                        let baseline = self
                            .builder
                            .resource_href(placement, parent_href, definition, resource)?;
                        let processor_href = match placement {
                            Placement::InCollection => parent_href.to_string(),
                            Placement::Root | Placement::UnderResource => baseline.clone(),
                        };
                        (baseline, processor_href)
                    }
                };
                node.set_property(HREF_PROPERTY, baseline.clone());

                for processor in definition.post_processors() {
                    processor.process(request, node, &processor_href)?;
                }

                node.href().unwrap_or(&baseline).to_string()
            }
            None => {
                let href = match (placement, node.href(), node.name()) {
                    (_, Some(upstream), _) => upstream.to_string(),
                    (Placement::Root, None, _) | (_, None, None) => parent_href.to_string(),
                    (_, None, Some(name)) => self.builder.collection_href(parent_href, name),
                };
                node.set_property(HREF_PROPERTY, href.clone());
                href
            }
        };

        let (child_placement, child_parent_type) = child_context(node, parent_type);
        let child_base = strip_query(&href);

        for child in node.children_mut() {
            self.process_node(request, child, child_placement, child_parent_type, child_base)?;
        }
        Ok(())
    }
}

/// Placement of `node`'s children and the resource type enclosing them.
///
/// Collection nodes pass the enclosing resource type through, so that a
/// `Cluster -> requests -> Request` nesting is checked against the cluster.
fn child_context(
    node: &TreeNode,
    parent_type: Option<ResourceType>,
) -> (Placement, Option<ResourceType>) {
    match node.object() {
        Some(resource) => (Placement::UnderResource, Some(resource.resource_type())),
        None => (Placement::InCollection, parent_type),
    }
}
