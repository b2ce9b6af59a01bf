//! ax-records - Extract structured records from desktop applications by
//! walking their Accessibility trees.
//!
//! # Overview
//!
//! Instead of screenshots, the crate reads the UI tree an operating system
//! exposes to assistive technology and turns the free-form text in it into
//! typed records: calendar events, mail, chat messages, notes, photos,
//! compiler diagnostics, browser tabs and terminal sessions.
//!
//! The pipeline has three stages:
//!
//! 1. [`walker`] flattens a tree of opaque handles into a [`WindowContent`]
//!    (depth-bounded, pre-order), reading nodes through the [`TreeAccess`]
//!    capability.
//! 2. [`classifier`] groups the flat text sequence into [`ClassifiedRecord`]s
//!    with a per-domain [`ClassifierConfig`].
//! 3. [`readers`] project those records into domain types.
//!
//! [`patterns`] supplies the regex helpers every stage leans on.
//!
//! # Quick Start
//!
//! ```
//! use ax_records::memory::MemoryTree;
//! use ax_records::readers::{self, DomainRecords};
//! use ax_records::{walker, Domain};
//!
//! let mut tree = MemoryTree::new();
//! let window = tree.add_node("AXWindow");
//! let row = tree.add_child(window, "AXRow");
//! let sender = tree.add_child(row, "AXStaticText");
//! tree.set_value(sender, "alice@x.com");
//! let subject = tree.add_child(row, "AXStaticText");
//! tree.set_value(subject, "Team Meeting");
//!
//! let content = walker::walk(&tree, &window, walker::DEFAULT_MAX_DEPTH);
//! match readers::parse(Domain::Mail, &content) {
//!     DomainRecords::Mail(mail) => assert_eq!(mail[0].subject, "Team Meeting"),
//!     _ => unreachable!(),
//! }
//! ```
//!
//! # Platform Support
//!
//! Live extraction uses the macOS Accessibility API and is only compiled on
//! macOS. Everywhere else [`RecordExtractor`] returns
//! [`ExtractionError::UnsupportedPlatform`] for live targets, while JSON tree
//! dumps can still be replayed through [`memory::MemoryTree`].

pub mod classifier;
pub mod config;
pub mod extractor;
pub mod memory;
pub mod patterns;
pub mod readers;
pub mod roles;
pub mod snapshot;
pub mod types;
pub mod walker;

pub mod platform;

pub use classifier::{ClassifiedRecord, Classifier, ClassifierConfig, Tuning};
pub use config::Settings;
pub use extractor::RecordExtractor;
pub use readers::DomainRecords;
pub use snapshot::{UIElementSnapshot, WindowContent};
pub use types::{AppSource, Domain, ExtractionError};
pub use walker::{TreeAccess, TreeWalker};
