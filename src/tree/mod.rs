//! In-memory result trees and the walker that annotates them with hrefs.

pub mod node;
pub mod walker;

pub use node::{TreeNode, HREF_PROPERTY};
pub use walker::HrefAnnotator;
