//! Cross-platform extraction facade.
//!
//! Resolves an application by bundle identifier, walks its focused window and
//! runs a domain reader over the result. On macOS this goes through the
//! Accessibility API binding; on every other platform the live entry points
//! return [`ExtractionError::UnsupportedPlatform`]. Tree dumps can always be
//! replayed with [`RecordExtractor::read_tree`].
//!
//! # Example
//!
//! ```no_run
//! use ax_records::{Domain, RecordExtractor};
//!
//! let extractor = RecordExtractor::default();
//! if RecordExtractor::is_enabled() {
//!     match extractor.parse_app("com.apple.iCal", None) {
//!         Ok(records) => println!("{} record(s)", records.len()),
//!         Err(e) => eprintln!("Extraction failed: {}", e),
//!     }
//! }
//! ```

use crate::classifier::Tuning;
use crate::config::Settings;
use crate::memory::MemoryTree;
use crate::readers::{self, DomainRecords, ParseContext};
use crate::snapshot::WindowContent;
use crate::types::{AppSource, Domain, ExtractionError};
use crate::walker::{TreeWalker, DEFAULT_MAX_DEPTH};

#[cfg(target_os = "macos")]
use crate::platform::macos;

/// Walks live or replayed trees and parses them into domain records.
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    walker: TreeWalker,
    tuning: Tuning,
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH, Tuning::default())
    }
}

impl RecordExtractor {
    pub fn new(max_depth: usize, tuning: Tuning) -> Self {
        Self {
            walker: TreeWalker::new(max_depth),
            tuning,
        }
    }

    /// An extractor using the depth bound and tuning from `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.walker.max_depth, settings.tuning())
    }

    pub fn max_depth(&self) -> usize {
        self.walker.max_depth()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Whether live extraction can work: on macOS, whether the process is
    /// trusted for accessibility. Always `false` elsewhere.
    pub fn is_enabled() -> bool {
        #[cfg(target_os = "macos")]
        {
            macos::is_trusted()
        }

        #[cfg(not(target_os = "macos"))]
        {
            false
        }
    }

    /// Show the system permission prompt. No-op off macOS.
    pub fn request_permissions() {
        #[cfg(target_os = "macos")]
        {
            macos::is_trusted_with_prompt();
        }
    }

    /// Walk the focused window of the application with `bundle_id`.
    pub fn read_app(&self, bundle_id: &str) -> Result<WindowContent, ExtractionError> {
        #[cfg(target_os = "macos")]
        {
            macos::ensure_trusted()?;
            let (app, window) = macos::focused_window(bundle_id)?;
            let app_name = macos::app_name(&app)
                .unwrap_or_else(|| AppSource::from_bundle_id(bundle_id).as_str().to_string());
            log::info!("[AX-EXTRACTOR] 🔄 Walking focused window of {}", app_name);
            let content = self.walker.walk(&macos::AxTree, &window).with_app_name(app_name);
            log::info!(
                "[AX-EXTRACTOR] ✅ {} element(s) from '{}'",
                content.elements.len(),
                content.window_title
            );
            Ok(content)
        }

        #[cfg(not(target_os = "macos"))]
        {
            log::debug!("[AX-EXTRACTOR] Live extraction requested for {}", bundle_id);
            Err(ExtractionError::UnsupportedPlatform(
                std::env::consts::OS.to_string(),
            ))
        }
    }

    /// Walk and parse an application's focused window.
    ///
    /// Without an explicit `domain`, the domain registered for the bundle
    /// identifier is used; unknown applications are `InvalidInput`.
    pub fn parse_app(
        &self,
        bundle_id: &str,
        domain: Option<Domain>,
    ) -> Result<DomainRecords, ExtractionError> {
        let domain = resolve_domain(bundle_id, domain)?;
        let content = self.read_app(bundle_id)?;
        Ok(self.parse(domain, &content))
    }

    /// Walk a tree dump loaded from JSON.
    pub fn read_tree(&self, json: &str) -> Result<WindowContent, ExtractionError> {
        let (tree, root) = MemoryTree::from_json(json)?;
        let content = self.walker.walk(&tree, &root);
        Ok(match tree.app_name() {
            Some(name) => content.with_app_name(name),
            None => content,
        })
    }

    /// Parse already-walked content with this extractor's tuning.
    pub fn parse(&self, domain: Domain, content: &WindowContent) -> DomainRecords {
        readers::parse_with(domain, content, &self.tuning, &ParseContext::today())
    }
}

/// The explicit domain, or the one registered for `bundle_id`.
pub fn resolve_domain(bundle_id: &str, domain: Option<Domain>) -> Result<Domain, ExtractionError> {
    if let Some(domain) = domain {
        return Ok(domain);
    }
    AppSource::from_bundle_id(bundle_id).domain().ok_or_else(|| {
        ExtractionError::InvalidInput(format!(
            "no reader registered for {}; pass a domain explicitly",
            bundle_id
        ))
    })
}
