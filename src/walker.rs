//! Depth-bounded tree traversal.
//!
//! The walker turns a tree of opaque element handles into a `WindowContent`.
//! It talks to the tree only through the [`TreeAccess`] capability, so the
//! same code runs against the macOS Accessibility API and against the
//! in-memory trees used by tests and replayed captures.
//!
//! # Traversal rules
//!
//! - Pre-order, depth-first, children left to right as the binding returns them.
//! - The root is depth 0 and a node is visited only while `depth < max_depth`.
//!   Nodes at or past the bound are silently skipped, which also guarantees
//!   termination on trees that report cyclic parent/child links.
//! - A node contributes its non-empty value to `values`, its non-empty title
//!   and description (in that order) to `labels`, and its value to
//!   `editable_values` when the role is a free-text role.

use crate::roles::is_text_role;
use crate::snapshot::{non_empty, Point, Size, UIElementSnapshot, WindowContent};

/// Default traversal depth bound.
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Attributes the walker reads from every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Role,
    Subrole,
    RoleDescription,
    Title,
    Value,
    Description,
    Help,
    Focused,
    Enabled,
    Main,
    Minimized,
    Hidden,
    Position,
    Size,
    SelectedText,
}

impl Attribute {
    /// Every attribute, in snapshot field order.
    pub const ALL: [Attribute; 15] = [
        Attribute::Role,
        Attribute::Subrole,
        Attribute::RoleDescription,
        Attribute::Title,
        Attribute::Value,
        Attribute::Description,
        Attribute::Help,
        Attribute::Focused,
        Attribute::Enabled,
        Attribute::Main,
        Attribute::Minimized,
        Attribute::Hidden,
        Attribute::Position,
        Attribute::Size,
        Attribute::SelectedText,
    ];

    /// The Accessibility API attribute name.
    ///
    /// # Examples
    ///
    /// ```
    /// use ax_records::walker::Attribute;
    ///
    /// assert_eq!(Attribute::Role.ax_name(), "AXRole");
    /// assert_eq!(Attribute::SelectedText.ax_name(), "AXSelectedText");
    /// ```
    pub fn ax_name(&self) -> &'static str {
        match self {
            Attribute::Role => "AXRole",
            Attribute::Subrole => "AXSubrole",
            Attribute::RoleDescription => "AXRoleDescription",
            Attribute::Title => "AXTitle",
            Attribute::Value => "AXValue",
            Attribute::Description => "AXDescription",
            Attribute::Help => "AXHelp",
            Attribute::Focused => "AXFocused",
            Attribute::Enabled => "AXEnabled",
            Attribute::Main => "AXMain",
            Attribute::Minimized => "AXMinimized",
            Attribute::Hidden => "AXHidden",
            Attribute::Position => "AXPosition",
            Attribute::Size => "AXSize",
            Attribute::SelectedText => "AXSelectedText",
        }
    }
}

/// A typed attribute answer.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Text(String),
    Flag(bool),
    Point(Point),
    Size(Size),
}

impl AttributeValue {
    fn into_text(self) -> Option<String> {
        match self {
            AttributeValue::Text(text) => Some(text),
            _ => None,
        }
    }

    fn into_flag(self) -> Option<bool> {
        match self {
            AttributeValue::Flag(flag) => Some(flag),
            _ => None,
        }
    }

    fn into_point(self) -> Option<Point> {
        match self {
            AttributeValue::Point(point) => Some(point),
            _ => None,
        }
    }

    fn into_size(self) -> Option<Size> {
        match self {
            AttributeValue::Size(size) => Some(size),
            _ => None,
        }
    }
}

/// Read-only access to a tree of element handles.
///
/// Implementations must never panic for unsupported attributes: return
/// `None` and the snapshot field stays unset.
pub trait TreeAccess {
    type Handle;

    /// Children of `handle` in display order (possibly empty).
    fn children(&self, handle: &Self::Handle) -> Vec<Self::Handle>;

    /// One attribute of `handle`, or `None` when absent or unsupported.
    fn attribute(&self, handle: &Self::Handle, attribute: Attribute) -> Option<AttributeValue>;
}

/// Materialize one node.
///
/// Each attribute is queried independently; a missing or wrongly-typed answer
/// leaves that field unset. `child_count` is supplied by the caller, which
/// already holds the child list it is about to descend into.
pub fn snapshot_element<T: TreeAccess>(
    tree: &T,
    handle: &T::Handle,
    depth: usize,
    child_count: usize,
) -> UIElementSnapshot {
    let text = |attribute| tree.attribute(handle, attribute).and_then(AttributeValue::into_text);
    let flag = |attribute| tree.attribute(handle, attribute).and_then(AttributeValue::into_flag);

    UIElementSnapshot {
        role: text(Attribute::Role),
        subrole: text(Attribute::Subrole),
        role_description: text(Attribute::RoleDescription),
        title: text(Attribute::Title),
        value: text(Attribute::Value),
        description: text(Attribute::Description),
        help: text(Attribute::Help),
        focused: flag(Attribute::Focused),
        enabled: flag(Attribute::Enabled),
        main: flag(Attribute::Main),
        minimized: flag(Attribute::Minimized),
        hidden: flag(Attribute::Hidden),
        position: tree
            .attribute(handle, Attribute::Position)
            .and_then(AttributeValue::into_point),
        size: tree
            .attribute(handle, Attribute::Size)
            .and_then(AttributeValue::into_size),
        selected_text: text(Attribute::SelectedText),
        child_count,
        depth,
    }
}

/// Depth-bounded walker.
///
/// # Example
///
/// ```
/// use ax_records::memory::MemoryTree;
/// use ax_records::walker::TreeWalker;
///
/// let mut tree = MemoryTree::new();
/// let root = tree.add_node("AXWindow");
/// tree.set_title(root, "Inbox");
/// let row = tree.add_child(root, "AXStaticText");
/// tree.set_value(row, "Hello");
///
/// let content = TreeWalker::new(10).walk(&tree, &root);
/// assert_eq!(content.window_title, "Inbox");
/// assert_eq!(content.values, vec!["Hello".to_string()]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeWalker {
    max_depth: usize,
}

impl Default for TreeWalker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl TreeWalker {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Walk the tree under `root` into a fresh `WindowContent`.
    ///
    /// Never fails: a root whose attributes are all missing still yields one
    /// (empty) snapshot, and a zero bound yields an empty result.
    pub fn walk<T: TreeAccess>(&self, tree: &T, root: &T::Handle) -> WindowContent {
        let mut content = WindowContent::default();
        let mut truncated = 0usize;
        self.visit(tree, root, 0, &mut content, &mut truncated);

        if let Some(root_snapshot) = content.elements.first() {
            content.window_title = root_snapshot.text_title().unwrap_or_default().to_string();
        }
        if truncated > 0 {
            log::debug!(
                "[AX-WALKER] ✂️  Depth bound {} reached; skipped {} subtree(s)",
                self.max_depth,
                truncated
            );
        }
        log::debug!(
            "[AX-WALKER] Walked {} element(s): {} value(s), {} label(s)",
            content.elements.len(),
            content.values.len(),
            content.labels.len()
        );
        content
    }

    fn visit<T: TreeAccess>(
        &self,
        tree: &T,
        handle: &T::Handle,
        depth: usize,
        content: &mut WindowContent,
        truncated: &mut usize,
    ) {
        if depth >= self.max_depth {
            *truncated += 1;
            return;
        }

        let children = tree.children(handle);
        let snapshot = snapshot_element(tree, handle, depth, children.len());

        if let Some(value) = non_empty(snapshot.value.as_deref()) {
            content.values.push(value.to_string());
            if is_text_role(snapshot.role_str()) {
                content.editable_values.push(value.to_string());
            }
        }
        if let Some(title) = snapshot.text_title() {
            content.labels.push(title.to_string());
        }
        if let Some(description) = snapshot.text_description() {
            content.labels.push(description.to_string());
        }
        content.elements.push(snapshot);

        for child in &children {
            self.visit(tree, child, depth + 1, content, truncated);
        }
    }
}

/// Walk with the given bound. Shorthand for `TreeWalker::new(max_depth).walk`.
pub fn walk<T: TreeAccess>(tree: &T, root: &T::Handle, max_depth: usize) -> WindowContent {
    TreeWalker::new(max_depth).walk(tree, root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryTree, NodeId};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    fn sample_tree() -> (MemoryTree, NodeId) {
        // root -> [A -> [A1], B]
        let mut tree = MemoryTree::new();
        let root = tree.add_node("AXWindow");
        tree.set_title(root, "root");
        let a = tree.add_child(root, "AXGroup");
        tree.set_title(a, "A");
        let a1 = tree.add_child(a, "AXStaticText");
        tree.set_title(a1, "A1");
        let b = tree.add_child(root, "AXGroup");
        tree.set_title(b, "B");
        (tree, root)
    }

    fn titles(content: &WindowContent) -> Vec<&str> {
        content
            .elements
            .iter()
            .map(|e| e.title.as_deref().unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_preorder_left_to_right() {
        let (tree, root) = sample_tree();
        let content = walk(&tree, &root, DEFAULT_MAX_DEPTH);
        assert_eq!(titles(&content), vec!["root", "A", "A1", "B"]);
        assert_eq!(content.labels, vec!["root", "A", "A1", "B"]);
        assert_eq!(content.window_title, "root");
    }

    #[test]
    fn test_depths_recorded() {
        let (tree, root) = sample_tree();
        let content = walk(&tree, &root, DEFAULT_MAX_DEPTH);
        let depths: Vec<usize> = content.elements.iter().map(|e| e.depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 1]);
    }

    #[test]
    fn test_depth_bound_skips_deep_nodes_but_counts_children() {
        let (tree, root) = sample_tree();
        let content = walk(&tree, &root, 2);
        assert_eq!(titles(&content), vec!["root", "A", "B"]);
        // A's child lies past the bound but is still counted.
        assert_eq!(content.elements[1].child_count, 1);
    }

    #[test]
    fn test_zero_depth_visits_nothing() {
        let (tree, root) = sample_tree();
        let content = walk(&tree, &root, 0);
        assert!(content.is_empty());
        assert_eq!(content.window_title, "");
    }

    #[test]
    fn test_cycle_terminates() {
        let mut tree = MemoryTree::new();
        let root = tree.add_node("AXGroup");
        let child = tree.add_child(root, "AXGroup");
        tree.link(child, root);
        let content = walk(&tree, &root, 7);
        assert_eq!(content.elements.len(), 7);
    }

    #[test]
    fn test_aggregation_rules() {
        let mut tree = MemoryTree::new();
        let root = tree.add_node("AXWindow");
        let field = tree.add_child(root, "AXTextField");
        tree.set_value(field, "  typed  ");
        tree.set_description(field, "Search");
        let button = tree.add_child(root, "AXButton");
        tree.set_value(button, "Send");
        let blank = tree.add_child(root, "AXStaticText");
        tree.set_value(blank, "   ");

        let content = walk(&tree, &root, DEFAULT_MAX_DEPTH);
        assert_eq!(content.values, vec!["typed", "Send"]);
        assert_eq!(content.editable_values, vec!["typed"]);
        assert_eq!(content.labels, vec!["Search"]);
        assert_eq!(content.elements.len(), 4);
    }

    #[test]
    fn test_missing_attributes_leave_fields_unset() {
        let mut tree = MemoryTree::new();
        let root = tree.add_node("AXWindow");
        let content = walk(&tree, &root, DEFAULT_MAX_DEPTH);
        let snapshot = &content.elements[0];
        assert_eq!(snapshot.role.as_deref(), Some("AXWindow"));
        assert_eq!(snapshot.title, None);
        assert_eq!(snapshot.focused, None);
        assert_eq!(snapshot.position, None);
        assert_eq!(snapshot.child_count, 0);
    }

    #[test]
    fn test_ax_names_are_unique() {
        let mut names: Vec<&str> = Attribute::ALL.iter().map(|a| a.ax_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Attribute::ALL.len());
    }

    /// Counts `children` lookups per node.
    struct CountingTree {
        inner: MemoryTree,
        lookups: RefCell<HashMap<NodeId, usize>>,
    }

    impl TreeAccess for CountingTree {
        type Handle = NodeId;

        fn children(&self, handle: &NodeId) -> Vec<NodeId> {
            *self.lookups.borrow_mut().entry(*handle).or_default() += 1;
            self.inner.children(handle)
        }

        fn attribute(&self, handle: &NodeId, attribute: Attribute) -> Option<AttributeValue> {
            self.inner.attribute(handle, attribute)
        }
    }

    #[test]
    fn test_children_enumerated_once_per_node() {
        let (inner, root) = sample_tree();
        let tree = CountingTree {
            inner,
            lookups: RefCell::new(HashMap::new()),
        };
        let content = walk(&tree, &root, DEFAULT_MAX_DEPTH);
        assert_eq!(content.elements.len(), 4);
        let lookups = tree.lookups.borrow();
        assert_eq!(lookups.len(), 4);
        assert!(lookups.values().all(|&n| n == 1));
        assert_eq!(content.elements[0].child_count, 2);
        assert_eq!(content.elements[1].child_count, 1);
    }

    /// Build a chain `root -> n1 -> ... -> n(len-1)`.
    fn chain(len: usize) -> (MemoryTree, NodeId) {
        let mut tree = MemoryTree::new();
        let root = tree.add_node("AXGroup");
        let mut parent = root;
        for _ in 1..len {
            parent = tree.add_child(parent, "AXGroup");
        }
        (tree, root)
    }

    proptest! {
        #[test]
        fn prop_visits_every_node_within_bound(widths in proptest::collection::vec(0usize..4, 1..12)) {
            // Each entry adds that many leaf children under a fresh group.
            let mut tree = MemoryTree::new();
            let root = tree.add_node("AXWindow");
            let mut expected = 1;
            for width in &widths {
                let group = tree.add_child(root, "AXGroup");
                expected += 1;
                for _ in 0..*width {
                    tree.add_child(group, "AXStaticText");
                    expected += 1;
                }
            }
            let content = walk(&tree, &root, DEFAULT_MAX_DEPTH);
            prop_assert_eq!(content.elements.len(), expected);
        }

        #[test]
        fn prop_depth_bound_enforced(len in 1usize..80, bound in 0usize..60) {
            let (tree, root) = chain(len);
            let content = walk(&tree, &root, bound);
            prop_assert_eq!(content.elements.len(), len.min(bound));
            prop_assert!(content.elements.iter().all(|e| e.depth < bound));
        }
    }
}
