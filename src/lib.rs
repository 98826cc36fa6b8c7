//! # hreflink
//!
//! Hypermedia link post-processing for cluster management API results.
//!
//! Result trees are assembled generically, so the href computed for a node
//! from its position in the tree is not always the canonical link of the
//! resource. Each resource type can register post-processors that rewrite
//! that href or derive further links from it.
//!
//! - [`resource`] - Resource types, schema, definitions and post-processors
//! - [`href`] - Href segment handling and the generic href builder
//! - [`tree`] - Result trees and the annotating walker
//! - [`config`] - Persistent CLI configuration
//!
//! # Example
//!
//! ```ignore
//! use hreflink::{ApiRequest, HrefAnnotator, Registry, Resource, ResourceType, TreeNode};
//!
//! let registry = Registry::standard()?;
//! let request = ApiRequest::new("http://localhost:8080/api/v1/clusters/c1/requests");
//! let mut root = TreeNode::root().with_child(TreeNode::resource(
//!     Resource::new(ResourceType::Request).with_property("Requests/id", 5),
//! ));
//!
//! HrefAnnotator::new(&registry).annotate(&request, &mut root)?;
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod href;
pub mod resource;
pub mod tree;

pub use api::ApiRequest;
pub use error::HrefError;
pub use resource::{Registry, Resource, ResourceType};
pub use tree::{HrefAnnotator, TreeNode};
