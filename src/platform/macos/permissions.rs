//! Accessibility permission checks.
//!
//! Reading another application's tree requires the process to be trusted in
//! System Settings > Privacy & Security > Accessibility.

use std::process::Command;

use crate::types::ExtractionError;

const ACCESSIBILITY_PANE: &str =
    "x-apple.systempreferences:com.apple.preference.security?Privacy_Accessibility";

/// Check the trust flag without prompting.
pub fn is_trusted() -> bool {
    macos_accessibility_client::accessibility::application_is_trusted()
}

/// Check the trust flag, showing the system prompt when not yet trusted.
///
/// The prompt is asynchronous: this may return `false` even if the user then
/// grants access, and the process usually has to be restarted afterwards.
pub fn is_trusted_with_prompt() -> bool {
    macos_accessibility_client::accessibility::application_is_trusted_with_prompt()
}

/// Fail with `PermissionDenied` unless the process is trusted.
pub fn ensure_trusted() -> Result<(), ExtractionError> {
    if is_trusted() {
        Ok(())
    } else {
        log::warn!("[AX-EXTRACTOR] ⚠️  Accessibility permission not granted");
        Err(ExtractionError::PermissionDenied(
            permission_instructions().trim().to_string(),
        ))
    }
}

/// Open the Accessibility pane of System Settings.
pub fn open_accessibility_preferences() -> Result<(), ExtractionError> {
    Command::new("open").arg(ACCESSIBILITY_PANE).spawn()?;
    Ok(())
}

/// Human-readable steps for granting access.
pub fn permission_instructions() -> &'static str {
    r#"
Grant accessibility access to this program:

1. Open System Settings (System Preferences before Ventura)
2. Go to Privacy & Security > Accessibility
3. Enable the terminal or application running ax-records
4. If it is not listed, click '+' and add it
5. Restart it so the new permission takes effect
"#
}
