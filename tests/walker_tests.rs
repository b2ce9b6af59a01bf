//! Walker behavior over replayed tree dumps and hand-built trees.

use ax_records::memory::MemoryTree;
use ax_records::walker::{walk, Attribute, AttributeValue, TreeWalker, DEFAULT_MAX_DEPTH};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_calendar_dump_snapshot_fields() {
    let (tree, root) = MemoryTree::load(&fixture("calendar.json")).unwrap();
    let content = walk(&tree, &root, DEFAULT_MAX_DEPTH);

    let window = &content.elements[0];
    assert_eq!(window.role.as_deref(), Some("AXWindow"));
    assert_eq!(window.focused, Some(true));
    assert_eq!(window.position.map(|p| (p.x, p.y)), Some((0.0, 25.0)));
    assert_eq!(window.size.map(|s| s.width), Some(1280.0));
    assert_eq!(window.child_count, 2);
    assert_eq!(window.depth, 0);

    assert_eq!(content.window_title, "Calendar");
    assert_eq!(content.elements.len(), 15);
}

#[test]
fn test_aggregates_follow_traversal_order() {
    let (tree, root) = MemoryTree::load(&fixture("calendar.json")).unwrap();
    let content = walk(&tree, &root, DEFAULT_MAX_DEPTH);

    assert_eq!(
        content.values,
        vec![
            "Design Review",
            "10:00 AM - 11:00 AM",
            "Tomorrow",
            "Room 4B",
            "https://zoom.us/j/42",
            "Dentist",
            "3:30 PM",
        ]
    );
    // Every value here sits on a static text node.
    assert_eq!(content.editable_values, content.values);
    assert_eq!(content.labels, vec!["Calendar", "New Event"]);
}

#[test]
fn test_bound_skips_deep_nodes_without_error() {
    let (tree, root) = MemoryTree::load(&fixture("deep.json")).unwrap();

    let full = TreeWalker::default().walk(&tree, &root);
    assert_eq!(full.elements.len(), 5);

    let bounded = TreeWalker::new(2).walk(&tree, &root);
    assert_eq!(bounded.elements.len(), 2);
    assert_eq!(bounded.values, vec!["level 1"]);
    // Child count is reported even when the children are past the bound.
    assert_eq!(bounded.elements[1].child_count, 1);
}

#[test]
fn test_wrongly_typed_attributes_are_unset() {
    let mut tree = MemoryTree::new();
    let root = tree.add_node("AXWindow");
    tree.set_attribute(root, Attribute::Title, AttributeValue::Flag(true));
    tree.set_attribute(root, Attribute::Focused, AttributeValue::Text("yes".into()));

    let content = walk(&tree, &root, DEFAULT_MAX_DEPTH);
    assert_eq!(content.elements[0].title, None);
    assert_eq!(content.elements[0].focused, None);
    assert_eq!(content.window_title, "");
}

#[test]
fn test_cycle_terminates() {
    let mut tree = MemoryTree::new();
    let a = tree.add_node("AXGroup");
    let b = tree.add_child(a, "AXGroup");
    tree.link(b, a);

    let content = walk(&tree, &a, 6);
    assert_eq!(content.elements.len(), 6);
    let depths: Vec<usize> = content.elements.iter().map(|e| e.depth).collect();
    assert_eq!(depths, vec![0, 1, 2, 3, 4, 5]);
}

fn build_chain(tree: &mut MemoryTree, widths: &[usize]) -> ax_records::memory::NodeId {
    let root = tree.add_node("AXWindow");
    let mut frontier = vec![root];
    for (level, width) in widths.iter().enumerate() {
        let mut next = Vec::new();
        for parent in &frontier {
            for i in 0..*width {
                let child = tree.add_child(*parent, "AXStaticText");
                tree.set_value(child, &format!("{}-{}", level, i));
                next.push(child);
            }
        }
        frontier = next;
    }
    root
}

proptest! {
    #[test]
    fn prop_walk_is_repeatable(widths in proptest::collection::vec(0usize..3, 0..4), depth in 1usize..6) {
        let mut tree = MemoryTree::new();
        let root = build_chain(&mut tree, &widths);
        prop_assert_eq!(walk(&tree, &root, depth), walk(&tree, &root, depth));
    }

    #[test]
    fn prop_bound_holds(widths in proptest::collection::vec(1usize..3, 0..5), depth in 1usize..6) {
        let mut tree = MemoryTree::new();
        let root = build_chain(&mut tree, &widths);
        let content = walk(&tree, &root, depth);
        prop_assert!(content.elements.iter().all(|e| e.depth < depth));
        prop_assert_eq!(content.values.len(), content.elements.len() - 1);
    }
}
