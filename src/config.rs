//! Settings for the walker and the classifier.
//!
//! Loaded from TOML; every field has a default so an empty file is valid.
//!
//! ```toml
//! [general]
//! log_level = "debug"
//!
//! [walker]
//! max_depth = 40
//!
//! [classifier]
//! short_max = 80
//! time_max = 20
//! long_min = 40
//!
//! [patterns]
//! extra_meeting_domains = ["meet.example.org"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::classifier::Tuning;
use crate::types::ExtractionError;
use crate::walker::DEFAULT_MAX_DEPTH;

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub walker: WalkerConfig,

    #[serde(default)]
    pub classifier: ClassifierSettings,

    #[serde(default)]
    pub patterns: PatternSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error), used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Traversal depth bound (root = depth 0)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSettings {
    /// Longest text treated as a title or subject
    #[serde(default = "default_short_max")]
    pub short_max: usize,

    /// Upper length bound for a timestamp
    #[serde(default = "default_time_max")]
    pub time_max: usize,

    /// Shortest text treated as a body
    #[serde(default = "default_long_min")]
    pub long_min: usize,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        let tuning = Tuning::default();
        Self {
            short_max: tuning.short_max,
            time_max: tuning.time_max,
            long_min: tuning.long_min,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternSettings {
    /// Hosts accepted as meeting links besides the built-in list
    #[serde(default)]
    pub extra_meeting_domains: Vec<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_short_max() -> usize {
    Tuning::default().short_max
}

fn default_time_max() -> usize {
    Tuning::default().time_max
}

fn default_long_min() -> usize {
    Tuning::default().long_min
}

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

impl Settings {
    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ExtractionError> {
        let settings: Settings =
            toml::from_str(contents).map_err(|e| ExtractionError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    ///
    /// Unlike a missing default config, an explicitly named file that cannot
    /// be read is an error.
    pub fn load_from_path(path: &Path) -> Result<Self, ExtractionError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Reject settings the walker or classifier cannot honor.
    pub fn validate(&self) -> Result<(), ExtractionError> {
        if self.walker.max_depth == 0 {
            return Err(ExtractionError::Config(
                "walker.max_depth must be at least 1".into(),
            ));
        }
        let c = &self.classifier;
        if c.short_max == 0 || c.time_max == 0 || c.long_min == 0 {
            return Err(ExtractionError::Config(
                "classifier thresholds must be positive".into(),
            ));
        }
        if c.time_max > c.short_max {
            return Err(ExtractionError::Config(format!(
                "classifier.time_max ({}) exceeds classifier.short_max ({})",
                c.time_max, c.short_max
            )));
        }
        if !LOG_LEVELS.contains(&self.general.log_level.to_lowercase().as_str()) {
            return Err(ExtractionError::Config(format!(
                "unknown general.log_level '{}'",
                self.general.log_level
            )));
        }
        Ok(())
    }

    /// Classifier tuning derived from these settings.
    pub fn tuning(&self) -> Tuning {
        Tuning {
            short_max: self.classifier.short_max,
            time_max: self.classifier.time_max,
            long_min: self.classifier.long_min,
            extra_meeting_domains: self.patterns.extra_meeting_domains.clone(),
        }
    }
}
