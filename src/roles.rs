//! Accessibility role tables used by the walker and the readers.
//!
//! Role strings follow the macOS `AX*` naming. Other bindings are expected to
//! map their native control types onto these names before handing values to
//! the core.

/// Roles whose value is free text typed or displayed by the application.
///
/// Values of nodes with these roles are collected into
/// `WindowContent::editable_values`.
pub const FREE_TEXT_ROLES: &[&str] = &["AXTextArea", "AXTextField", "AXStaticText"];

/// Roles that usually delimit one logical item in a list or table.
pub const ROW_ROLES: &[&str] = &["AXRow", "AXCell", "AXGroup"];

/// Accessibility roles for UI chrome.
///
/// Text on these elements is application furniture (menus, toolbars, buttons)
/// rather than content, so most readers ignore it.
pub const UI_CHROME_ROLES: &[&str] = &[
    "AXMenuBar",
    "AXMenuBarItem",
    "AXMenu",
    "AXMenuItem",
    "AXToolbar",
    "AXButton",
    "AXPopUpButton",
    "AXMenuButton",
    "AXCheckBox",
    "AXSlider",
    "AXSplitter",
    "AXScrollBar",
    "AXStatusBar",
];

/// Check if a role holds free text.
///
/// # Examples
///
/// ```
/// use ax_records::roles::is_text_role;
///
/// assert!(is_text_role("AXTextArea"));
/// assert!(is_text_role("AXStaticText"));
/// assert!(!is_text_role("AXButton"));
/// assert!(!is_text_role("AXGroup"));
/// ```
pub fn is_text_role(role: &str) -> bool {
    FREE_TEXT_ROLES.contains(&role)
}

/// Check if a role is UI chrome.
///
/// # Examples
///
/// ```
/// use ax_records::roles::is_chrome_role;
///
/// assert!(is_chrome_role("AXMenuItem"));
/// assert!(!is_chrome_role("AXStaticText"));
/// ```
pub fn is_chrome_role(role: &str) -> bool {
    UI_CHROME_ROLES.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_text_role_text_roles() {
        assert!(is_text_role("AXTextArea"));
        assert!(is_text_role("AXTextField"));
        assert!(is_text_role("AXStaticText"));
    }

    #[test]
    fn test_is_text_role_non_text_roles() {
        assert!(!is_text_role("AXButton"));
        assert!(!is_text_role("AXGroup"));
        assert!(!is_text_role("AXRow"));
        assert!(!is_text_role("AXWebArea"));
        assert!(!is_text_role(""));
    }

    #[test]
    fn test_is_text_role_case_sensitive() {
        assert!(!is_text_role("axtextarea"));
        assert!(!is_text_role("AXTEXTAREA"));
        assert!(is_text_role("AXTextArea"));
    }

    #[test]
    fn test_chrome_roles() {
        assert!(is_chrome_role("AXMenuBar"));
        assert!(is_chrome_role("AXToolbar"));
        assert!(is_chrome_role("AXButton"));
        assert!(!is_chrome_role("AXRow"));
        assert!(!is_chrome_role("AXUnknownRole"));
    }

    #[test]
    fn test_text_and_chrome_roles_are_disjoint() {
        for role in FREE_TEXT_ROLES {
            assert!(
                !UI_CHROME_ROLES.contains(role),
                "Role '{}' should not be both free text and chrome",
                role
            );
        }
    }

    #[test]
    fn test_row_roles_are_not_chrome() {
        for role in ROW_ROLES {
            assert!(!is_chrome_role(role), "Row role '{}' listed as chrome", role);
        }
    }
}
