//! In-memory tree satisfying [`TreeAccess`].
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Links are stored
//! per parent, so a node may be linked under several parents (or under its
//! own descendant) to model the cyclic trees some hosts report.
//!
//! Trees can also be loaded from a JSON dump:
//!
//! ```json
//! {
//!   "app_name": "Mail",
//!   "root": {
//!     "role": "AXWindow",
//!     "title": "Inbox",
//!     "children": [ { "role": "AXRow", "children": [] } ]
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::snapshot::{Point, Size};
use crate::types::ExtractionError;
use crate::walker::{Attribute, AttributeValue, TreeAccess};

/// Index of a node inside a [`MemoryTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct Node {
    attributes: HashMap<Attribute, AttributeValue>,
    children: Vec<NodeId>,
}

/// Arena-backed tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    nodes: Vec<Node>,
    app_name: Option<String>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the arena (reachable or not).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Application name recorded in a loaded dump.
    pub fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    /// Add a detached node with the given role.
    pub fn add_node(&mut self, role: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut node = Node::default();
        if !role.is_empty() {
            node.attributes
                .insert(Attribute::Role, AttributeValue::Text(role.to_string()));
        }
        self.nodes.push(node);
        id
    }

    /// Add a node and append it to `parent`'s children.
    pub fn add_child(&mut self, parent: NodeId, role: &str) -> NodeId {
        let id = self.add_node(role);
        self.link(parent, id);
        id
    }

    /// Append an existing node to `parent`'s children. Cycles are allowed.
    pub fn link(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children.push(child);
        }
    }

    pub fn set_attribute(&mut self, id: NodeId, attribute: Attribute, value: AttributeValue) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.attributes.insert(attribute, value);
        }
    }

    pub fn set_title(&mut self, id: NodeId, title: &str) {
        self.set_attribute(id, Attribute::Title, AttributeValue::Text(title.to_string()));
    }

    pub fn set_value(&mut self, id: NodeId, value: &str) {
        self.set_attribute(id, Attribute::Value, AttributeValue::Text(value.to_string()));
    }

    pub fn set_description(&mut self, id: NodeId, description: &str) {
        self.set_attribute(
            id,
            Attribute::Description,
            AttributeValue::Text(description.to_string()),
        );
    }

    /// Parse a JSON tree dump. Returns the tree and its root.
    pub fn from_json(json: &str) -> Result<(Self, NodeId), ExtractionError> {
        let dump: TreeDump = serde_json::from_str(json)
            .map_err(|e| ExtractionError::InvalidInput(format!("tree dump: {}", e)))?;

        let mut tree = MemoryTree {
            nodes: Vec::new(),
            app_name: dump.app_name.filter(|name| !name.trim().is_empty()),
        };
        let root = tree.insert(&dump.root);
        log::debug!("[AX-WALKER] Loaded tree dump with {} node(s)", tree.len());
        Ok((tree, root))
    }

    /// Read and parse a JSON tree dump from disk.
    pub fn load(path: &Path) -> Result<(Self, NodeId), ExtractionError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn insert(&mut self, node: &MemoryNode) -> NodeId {
        let id = self.add_node(node.role.as_deref().unwrap_or(""));

        let texts = [
            (Attribute::Subrole, &node.subrole),
            (Attribute::RoleDescription, &node.role_description),
            (Attribute::Title, &node.title),
            (Attribute::Value, &node.value),
            (Attribute::Description, &node.description),
            (Attribute::Help, &node.help),
            (Attribute::SelectedText, &node.selected_text),
        ];
        for (attribute, text) in texts {
            if let Some(text) = text {
                self.set_attribute(id, attribute, AttributeValue::Text(text.clone()));
            }
        }

        let flags = [
            (Attribute::Focused, node.focused),
            (Attribute::Enabled, node.enabled),
            (Attribute::Main, node.main),
            (Attribute::Minimized, node.minimized),
            (Attribute::Hidden, node.hidden),
        ];
        for (attribute, flag) in flags {
            if let Some(flag) = flag {
                self.set_attribute(id, attribute, AttributeValue::Flag(flag));
            }
        }

        if let Some(position) = node.position {
            self.set_attribute(id, Attribute::Position, AttributeValue::Point(position));
        }
        if let Some(size) = node.size {
            self.set_attribute(id, Attribute::Size, AttributeValue::Size(size));
        }

        for child in &node.children {
            let child_id = self.insert(child);
            self.link(id, child_id);
        }
        id
    }
}

impl TreeAccess for MemoryTree {
    type Handle = NodeId;

    fn children(&self, handle: &NodeId) -> Vec<NodeId> {
        self.nodes
            .get(handle.0)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    fn attribute(&self, handle: &NodeId, attribute: Attribute) -> Option<AttributeValue> {
        self.nodes
            .get(handle.0)
            .and_then(|node| node.attributes.get(&attribute))
            .cloned()
    }
}

/// Top level of a JSON tree dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeDump {
    #[serde(default)]
    pub app_name: Option<String>,
    pub root: MemoryNode,
}

/// One node of a JSON tree dump.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryNode {
    pub role: Option<String>,
    pub subrole: Option<String>,
    pub role_description: Option<String>,
    pub title: Option<String>,
    pub value: Option<String>,
    pub description: Option<String>,
    pub help: Option<String>,
    pub focused: Option<bool>,
    pub enabled: Option<bool>,
    pub main: Option<bool>,
    pub minimized: Option<bool>,
    pub hidden: Option<bool>,
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub selected_text: Option<String>,
    pub children: Vec<MemoryNode>,
}
