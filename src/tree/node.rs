//! Result tree nodes

use crate::resource::Resource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Side property holding a node's hypermedia link
pub const HREF_PROPERTY: &str = "href";

/// One node of a result tree.
///
/// A node either wraps a resource or is a collection grouping its children
/// under a name such as `tasks`. The unnamed root of a listing is a
/// collection too. Side properties can be added or overwritten but never
/// removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resource: Option<Resource>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<TreeNode>,
}

impl TreeNode {
    /// Unnamed root collection
    pub fn root() -> Self {
        Self::default()
    }

    pub fn collection(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn resource(resource: Resource) -> Self {
        Self {
            resource: Some(resource),
            ..Self::default()
        }
    }

    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_child(&mut self, child: TreeNode) -> &mut TreeNode {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn object(&self) -> Option<&Resource> {
        self.resource.as_ref()
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [TreeNode] {
        &mut self.children
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn set_property(&mut self, key: &str, value: impl Into<String>) {
        self.properties.insert(key.to_string(), value.into());
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn href(&self) -> Option<&str> {
        self.property(HREF_PROPERTY)
    }

    /// Depth-first search for the first node satisfying `pred`
    pub fn find(&self, pred: &impl Fn(&TreeNode) -> bool) -> Option<&TreeNode> {
        if pred(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(pred))
    }
}
