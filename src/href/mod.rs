//! Href construction and segment surgery
//!
//! - [`segments`] - Splits hrefs into segments and locates scoping markers
//! - [`builder`] - Computes the generic baseline href of each tree node

pub mod builder;
pub mod segments;

pub use builder::{HrefBuilder, Placement};
pub use segments::{join, path_segment, strip_query, HrefSegments};
