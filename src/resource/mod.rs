//! Resource abstraction layer
//!
//! Per-type metadata driving href generation. Definitions are loaded from
//! JSON files at compile time, so new resource types only need a JSON entry
//! unless they bring their own post-processing rules.
//!
//! # Architecture
//!
//! - [`types`] - Resource types and property bags
//! - [`schema`] - Key property resolution per type
//! - [`registry`] - Resource definitions loaded from embedded JSON
//! - [`processor`] - The post-processor capability and its factory
//! - [`request`] - Href rules owned by the Request type
//!
//! # Example
//!
//! ```ignore
//! use hreflink::resource::{Registry, ResourceType};
//!
//! let registry = Registry::standard()?;
//! let request = registry.definition(ResourceType::Request)?;
//! assert_eq!(request.plural_name(), "requests");
//! ```

pub mod processor;
pub mod registry;
pub mod request;
pub mod schema;
pub mod types;

pub use processor::PostProcessor;
pub use registry::*;
pub use request::{RequestHrefProcessor, SourceScheduleHrefProcessor};
pub use schema::{Schema, StaticSchema};
pub use types::{Resource, ResourceType};
