//! Core data types for the ax-records crate.
//!
//! This module defines the types shared by every layer of the crate:
//! - `ExtractionError`: Error types surfaced by the facade, CLI and config layer
//! - `Domain`: The record domains a reader exists for
//! - `AppSource`: Known applications and the bundle identifier lookup table

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while obtaining a tree to read.
///
/// The walker and the classifier never produce these: missing attributes,
/// unmatched values and malformed pattern matches all degrade to "less data".
/// Only the absence of a usable tree, bad input files and bad settings are
/// reported here.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Accessibility permission not granted
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Application not running or has no focused window
    #[error("Target not available: {0}")]
    TargetNotAvailable(String),

    /// No tree-access binding for this platform
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// A tree dump or argument could not be understood
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Settings failed to parse or validate
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Record domains with a reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Events,
    Mail,
    Messages,
    Notes,
    Photos,
    Diagnostics,
    BrowserTabs,
    Terminal,
}

impl Domain {
    /// Every domain, in a stable order.
    pub const ALL: [Domain; 8] = [
        Domain::Events,
        Domain::Mail,
        Domain::Messages,
        Domain::Notes,
        Domain::Photos,
        Domain::Diagnostics,
        Domain::BrowserTabs,
        Domain::Terminal,
    ];

    /// Returns the string identifier for this domain.
    ///
    /// # Examples
    ///
    /// ```
    /// use ax_records::Domain;
    ///
    /// assert_eq!(Domain::BrowserTabs.as_str(), "browser_tabs");
    /// assert_eq!(Domain::Events.as_str(), "events");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Events => "events",
            Domain::Mail => "mail",
            Domain::Messages => "messages",
            Domain::Notes => "notes",
            Domain::Photos => "photos",
            Domain::Diagnostics => "diagnostics",
            Domain::BrowserTabs => "browser_tabs",
            Domain::Terminal => "terminal",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "events" | "calendar" => Ok(Domain::Events),
            "mail" | "email" => Ok(Domain::Mail),
            "messages" | "chat" => Ok(Domain::Messages),
            "notes" => Ok(Domain::Notes),
            "photos" => Ok(Domain::Photos),
            "diagnostics" | "compiler" | "xcode" => Ok(Domain::Diagnostics),
            "browser_tabs" | "tabs" | "browser" => Ok(Domain::BrowserTabs),
            "terminal" => Ok(Domain::Terminal),
            other => Err(ExtractionError::InvalidInput(format!(
                "unknown domain '{}' (expected one of: {})",
                other,
                Domain::ALL.map(|d| d.as_str()).join(", ")
            ))),
        }
    }
}

/// Known application sources.
///
/// The bundle identifier table is read-only configuration: it decides which
/// reader a live window is handed to, nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppSource {
    Calendar,
    Outlook,
    Mail,
    Messages,
    Slack,
    Teams,
    Notes,
    Obsidian,
    Photos,
    Xcode,
    Safari,
    Chrome,
    Firefox,
    Edge,
    Brave,
    Arc,
    Terminal,
    ITerm,
    Warp,
    Unknown,
}

/// Bundle identifier → application table.
const BUNDLE_TABLE: &[(&str, AppSource)] = &[
    ("com.apple.iCal", AppSource::Calendar),
    ("com.microsoft.Outlook", AppSource::Outlook),
    ("com.apple.mail", AppSource::Mail),
    ("com.apple.MobileSMS", AppSource::Messages),
    ("com.apple.iChat", AppSource::Messages),
    ("com.tinyspeck.slackmacgap", AppSource::Slack),
    ("com.microsoft.teams", AppSource::Teams),
    ("com.microsoft.teams2", AppSource::Teams),
    ("com.apple.Notes", AppSource::Notes),
    ("md.obsidian", AppSource::Obsidian),
    ("com.apple.Photos", AppSource::Photos),
    ("com.apple.dt.Xcode", AppSource::Xcode),
    ("com.apple.Safari", AppSource::Safari),
    ("com.apple.SafariTechnologyPreview", AppSource::Safari),
    ("com.google.Chrome", AppSource::Chrome),
    ("com.google.Chrome.canary", AppSource::Chrome),
    ("org.mozilla.firefox", AppSource::Firefox),
    ("com.microsoft.edgemac", AppSource::Edge),
    ("com.brave.Browser", AppSource::Brave),
    ("company.thebrowser.Browser", AppSource::Arc),
    ("com.apple.Terminal", AppSource::Terminal),
    ("com.googlecode.iterm2", AppSource::ITerm),
    ("dev.warp.Warp-Stable", AppSource::Warp),
];

impl AppSource {
    /// Returns the string identifier for this application source.
    ///
    /// # Examples
    ///
    /// ```
    /// use ax_records::AppSource;
    ///
    /// assert_eq!(AppSource::Calendar.as_str(), "calendar");
    /// assert_eq!(AppSource::ITerm.as_str(), "iterm");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            AppSource::Calendar => "calendar",
            AppSource::Outlook => "outlook",
            AppSource::Mail => "mail",
            AppSource::Messages => "messages",
            AppSource::Slack => "slack",
            AppSource::Teams => "teams",
            AppSource::Notes => "notes",
            AppSource::Obsidian => "obsidian",
            AppSource::Photos => "photos",
            AppSource::Xcode => "xcode",
            AppSource::Safari => "safari",
            AppSource::Chrome => "chrome",
            AppSource::Firefox => "firefox",
            AppSource::Edge => "edge",
            AppSource::Brave => "brave",
            AppSource::Arc => "arc",
            AppSource::Terminal => "terminal",
            AppSource::ITerm => "iterm",
            AppSource::Warp => "warp",
            AppSource::Unknown => "unknown",
        }
    }

    /// Creates an AppSource from a macOS bundle identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use ax_records::AppSource;
    ///
    /// assert_eq!(AppSource::from_bundle_id("com.apple.iCal"), AppSource::Calendar);
    /// assert_eq!(AppSource::from_bundle_id("com.googlecode.iterm2"), AppSource::ITerm);
    /// assert_eq!(AppSource::from_bundle_id("com.unknown.app"), AppSource::Unknown);
    /// ```
    pub fn from_bundle_id(bundle_id: &str) -> Self {
        BUNDLE_TABLE
            .iter()
            .find(|(id, _)| *id == bundle_id)
            .map(|(_, source)| *source)
            .unwrap_or(AppSource::Unknown)
    }

    /// The reader domain for this application, if there is one.
    pub fn domain(&self) -> Option<Domain> {
        match self {
            AppSource::Calendar => Some(Domain::Events),
            AppSource::Outlook | AppSource::Mail => Some(Domain::Mail),
            AppSource::Messages | AppSource::Slack | AppSource::Teams => Some(Domain::Messages),
            AppSource::Notes | AppSource::Obsidian => Some(Domain::Notes),
            AppSource::Photos => Some(Domain::Photos),
            AppSource::Xcode => Some(Domain::Diagnostics),
            AppSource::Safari
            | AppSource::Chrome
            | AppSource::Firefox
            | AppSource::Edge
            | AppSource::Brave
            | AppSource::Arc => Some(Domain::BrowserTabs),
            AppSource::Terminal | AppSource::ITerm | AppSource::Warp => Some(Domain::Terminal),
            AppSource::Unknown => None,
        }
    }
}
