//! Domain readers.
//!
//! Each reader is a [`ClassifierConfig`] plus a projection from
//! [`ClassifiedRecord`] into a typed record. None of them walks a tree or
//! classifies text on its own; they only decide which roles delimit records,
//! which guesses to try in which order, and what a finished record must hold.

pub mod browser_tabs;
pub mod diagnostics;
pub mod events;
pub mod mail;
pub mod messages;
pub mod notes;
pub mod photos;
pub mod terminal;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::classifier::{ClassifiedRecord, Classifier, ClassifierConfig, Tuning};
use crate::snapshot::WindowContent;
use crate::types::Domain;

pub use browser_tabs::BrowserTab;
pub use diagnostics::{CompilerError, Severity};
pub use events::Event;
pub use mail::MailMessage;
pub use messages::ChatMessage;
pub use notes::Note;
pub use photos::{MediaKind, PhotoItem};
pub use terminal::TerminalSession;

/// Facts a projection may need besides the record itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseContext {
    /// Date that relative dates ("tomorrow", "Friday") resolve against.
    pub reference_date: NaiveDate,
}

impl ParseContext {
    pub fn at(reference_date: NaiveDate) -> Self {
        Self { reference_date }
    }

    /// Context anchored at the local date.
    pub fn today() -> Self {
        Self::at(Local::now().date_naive())
    }
}

/// Turns a closed record into a typed record, or rejects it.
pub type Projection<R> = fn(&ClassifiedRecord, &ParseContext) -> Option<R>;

/// A classifier configuration paired with its projection.
pub struct Reader<R> {
    classifier: Classifier,
    project: Projection<R>,
}

impl<R> Clone for Reader<R> {
    fn clone(&self) -> Self {
        Self {
            classifier: self.classifier.clone(),
            project: self.project,
        }
    }
}

impl<R> fmt::Debug for Reader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reader")
            .field("config", self.classifier.config())
            .finish_non_exhaustive()
    }
}

impl<R> Reader<R> {
    pub fn new(config: ClassifierConfig, project: Projection<R>) -> Self {
        Self {
            classifier: Classifier::new(config),
            project,
        }
    }

    /// Replace the classifier thresholds.
    pub fn with_tuning(self, tuning: Tuning) -> Self {
        let config = self.classifier.config().clone().with_tuning(tuning);
        Self {
            classifier: Classifier::new(config),
            project: self.project,
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        self.classifier.config()
    }

    /// The untyped records, before projection.
    pub fn records(&self, content: &WindowContent) -> Vec<ClassifiedRecord> {
        self.classifier.classify_window(content)
    }

    /// Parse with relative dates anchored at today.
    pub fn parse(&self, content: &WindowContent) -> Vec<R> {
        self.parse_at(content, &ParseContext::today())
    }

    pub fn parse_at(&self, content: &WindowContent, context: &ParseContext) -> Vec<R> {
        let records = self.records(content);
        let total = records.len();
        let parsed: Vec<R> = records
            .iter()
            .filter_map(|record| (self.project)(record, context))
            .collect();
        log::debug!(
            "[AX-READER] {}: {} of {} record(s) projected from '{}'",
            self.config().name,
            parsed.len(),
            total,
            content.window_title
        );
        parsed
    }
}

/// Parsed records of any domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "domain", content = "records", rename_all = "snake_case")]
pub enum DomainRecords {
    Events(Vec<Event>),
    Mail(Vec<MailMessage>),
    Messages(Vec<ChatMessage>),
    Notes(Vec<Note>),
    Photos(Vec<PhotoItem>),
    Diagnostics(Vec<CompilerError>),
    BrowserTabs(Vec<BrowserTab>),
    Terminal(Vec<TerminalSession>),
}

impl DomainRecords {
    pub fn domain(&self) -> Domain {
        match self {
            DomainRecords::Events(_) => Domain::Events,
            DomainRecords::Mail(_) => Domain::Mail,
            DomainRecords::Messages(_) => Domain::Messages,
            DomainRecords::Notes(_) => Domain::Notes,
            DomainRecords::Photos(_) => Domain::Photos,
            DomainRecords::Diagnostics(_) => Domain::Diagnostics,
            DomainRecords::BrowserTabs(_) => Domain::BrowserTabs,
            DomainRecords::Terminal(_) => Domain::Terminal,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DomainRecords::Events(r) => r.len(),
            DomainRecords::Mail(r) => r.len(),
            DomainRecords::Messages(r) => r.len(),
            DomainRecords::Notes(r) => r.len(),
            DomainRecords::Photos(r) => r.len(),
            DomainRecords::Diagnostics(r) => r.len(),
            DomainRecords::BrowserTabs(r) => r.len(),
            DomainRecords::Terminal(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse `content` with the reader for `domain`, default tuning, today's date.
pub fn parse(domain: Domain, content: &WindowContent) -> DomainRecords {
    parse_with(domain, content, &Tuning::default(), &ParseContext::today())
}

/// Parse `content` with the reader for `domain`.
pub fn parse_with(
    domain: Domain,
    content: &WindowContent,
    tuning: &Tuning,
    context: &ParseContext,
) -> DomainRecords {
    let tuning = tuning.clone();
    match domain {
        Domain::Events => {
            DomainRecords::Events(events::reader().with_tuning(tuning).parse_at(content, context))
        }
        Domain::Mail => {
            DomainRecords::Mail(mail::reader().with_tuning(tuning).parse_at(content, context))
        }
        Domain::Messages => DomainRecords::Messages(
            messages::reader().with_tuning(tuning).parse_at(content, context),
        ),
        Domain::Notes => {
            DomainRecords::Notes(notes::reader().with_tuning(tuning).parse_at(content, context))
        }
        Domain::Photos => {
            DomainRecords::Photos(photos::reader().with_tuning(tuning).parse_at(content, context))
        }
        Domain::Diagnostics => DomainRecords::Diagnostics(
            diagnostics::reader().with_tuning(tuning).parse_at(content, context),
        ),
        Domain::BrowserTabs => DomainRecords::BrowserTabs(
            browser_tabs::reader().with_tuning(tuning).parse_at(content, context),
        ),
        Domain::Terminal => DomainRecords::Terminal(
            terminal::reader().with_tuning(tuning).parse_at(content, context),
        ),
    }
}

/// Owned copy of a field, if non-empty.
pub(crate) fn field(record: &ClassifiedRecord, name: &str) -> Option<String> {
    record
        .get(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
