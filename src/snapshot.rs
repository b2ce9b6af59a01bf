//! Attribute snapshot model.
//!
//! A `UIElementSnapshot` is an immutable, fully read-out copy of one tree
//! node. A `WindowContent` is everything one traversal collected: the
//! snapshots in pre-order plus three aggregated text sequences.

use serde::{Deserialize, Serialize};

/// Screen position of an element's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Element extent in points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// One materialized UI node.
///
/// Every attribute is optional: a binding that cannot answer a query leaves
/// the field unset rather than failing the node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UIElementSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subrole: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focused: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimized: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_text: Option<String>,
    /// Number of children the binding reported, visited or not.
    pub child_count: usize,
    /// Distance from the walked root (root = 0).
    pub depth: usize,
}

impl UIElementSnapshot {
    /// Role as `&str`, empty when unset.
    pub fn role_str(&self) -> &str {
        self.role.as_deref().unwrap_or("")
    }

    /// Trimmed value, `None` when unset or whitespace-only.
    pub fn text_value(&self) -> Option<&str> {
        non_empty(self.value.as_deref())
    }

    /// Trimmed title, `None` when unset or whitespace-only.
    pub fn text_title(&self) -> Option<&str> {
        non_empty(self.title.as_deref())
    }

    /// Trimmed description, `None` when unset or whitespace-only.
    pub fn text_description(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }

    /// The first non-empty of value, title and description.
    pub fn display_text(&self) -> Option<&str> {
        self.text_value()
            .or_else(|| self.text_title())
            .or_else(|| self.text_description())
    }
}

pub(crate) fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

/// Aggregate of one traversal.
///
/// Invariants: each entry in `values`, `labels` and `editable_values` comes
/// from exactly one snapshot in `elements`, and all four sequences are in
/// traversal order (a node before its subtree, siblings left to right).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowContent {
    pub app_name: String,
    pub window_title: String,
    pub elements: Vec<UIElementSnapshot>,
    pub values: Vec<String>,
    pub labels: Vec<String>,
    pub editable_values: Vec<String>,
}

impl WindowContent {
    /// Sets the application name.
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    /// True when the traversal produced no elements at all.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All values joined with newlines.
    pub fn text(&self) -> String {
        self.values.join("\n")
    }

    /// Snapshots whose role equals `role`, in traversal order.
    pub fn elements_with_role<'a>(
        &'a self,
        role: &'a str,
    ) -> impl Iterator<Item = &'a UIElementSnapshot> + 'a {
        self.elements.iter().filter(move |e| e.role_str() == role)
    }

    /// Render the elements as an indented outline.
    ///
    /// Each line is `{indent}{role} - {title}` followed by a value preview
    /// when the node has one; indentation is two spaces per depth level.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for element in &self.elements {
            let role = element.role.as_deref().unwrap_or("?");
            let title = element.text_title().unwrap_or("");
            out.push_str(&"  ".repeat(element.depth));
            out.push_str(role);
            out.push_str(" - ");
            out.push_str(title);
            if let Some(value) = element.text_value() {
                let preview: String = value.chars().take(50).collect();
                let ellipsis = if value.chars().count() > 50 { "..." } else { "" };
                out.push_str(&format!(
                    " [value: \"{}{}\"]",
                    preview.replace('\n', "\\n"),
                    ellipsis
                ));
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn element(role: &str, depth: usize) -> UIElementSnapshot {
        UIElementSnapshot {
            role: Some(role.to_string()),
            depth,
            ..Default::default()
        }
    }

    #[test]
    fn test_display_text_prefers_value() {
        let snapshot = UIElementSnapshot {
            value: Some("  body  ".into()),
            title: Some("Title".into()),
            ..Default::default()
        };
        assert_eq!(snapshot.display_text(), Some("body"));
    }

    #[test]
    fn test_display_text_skips_whitespace_values() {
        let snapshot = UIElementSnapshot {
            value: Some(" \n\t".into()),
            title: None,
            description: Some("Photo".into()),
            ..Default::default()
        };
        assert_eq!(snapshot.display_text(), Some("Photo"));
    }

    #[test]
    fn test_role_str_defaults_to_empty() {
        assert_eq!(UIElementSnapshot::default().role_str(), "");
    }

    #[test]
    fn test_elements_with_role() {
        let content = WindowContent {
            elements: vec![element("AXWindow", 0), element("AXRow", 1), element("AXRow", 1)],
            ..Default::default()
        };
        assert_eq!(content.elements_with_role("AXRow").count(), 2);
        assert_eq!(content.elements_with_role("AXCell").count(), 0);
    }

    #[test]
    fn test_outline_indents_by_depth() {
        let mut window = element("AXWindow", 0);
        window.title = Some("Inbox".into());
        let mut text = element("AXStaticText", 1);
        text.value = Some("Hello\nworld".into());
        let content = WindowContent {
            elements: vec![window, text],
            ..Default::default()
        };

        assert_eq!(
            content.outline(),
            "AXWindow - Inbox\n  AXStaticText -  [value: \"Hello\\nworld\"]\n"
        );
    }

    #[test]
    fn test_snapshot_skips_unset_fields_in_json() {
        let json = serde_json::to_string(&element("AXRow", 2)).unwrap();
        assert!(json.contains("\"role\":\"AXRow\""));
        assert!(!json.contains("\"title\""));
        assert!(!json.contains("\"position\""));
    }
}
