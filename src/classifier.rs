//! Heuristic field classifier.
//!
//! Groups a flat sequence of node texts into records. Every reader shares this
//! one algorithm and differs only in its [`ClassifierConfig`]:
//!
//! - a node whose role is a boundary role closes the open record (emitting it
//!   when its requirement holds) and opens a new, empty one. A boundary nested
//!   inside the open boundary's subtree (an `AXCell` in an `AXRow`) is read as
//!   content of the open record instead;
//! - every other text runs through the ordered field-guess chain and lands in
//!   the first field whose predicate matches and which is still unfilled (or
//!   appendable);
//! - texts no rule claims are dropped or appended to a catch-all field;
//! - the end of input flushes whatever is still open.
//!
//! The accumulation is an explicit state machine ([`RecordAccumulator`]) so
//! each transition can be driven and inspected on its own.
//!
//! The guesses are best-effort. There is no confidence score, and unusual
//! layouts will put text in the wrong field.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

use crate::patterns;
use crate::roles::UI_CHROME_ROLES;
use crate::snapshot::{UIElementSnapshot, WindowContent};

// ============================================================================
// Records
// ============================================================================

/// Ordered field name to value mapping produced by the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassifiedRecord {
    fields: Vec<(String, String)>,
}

impl ClassifiedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `field`, if set.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    /// True when `field` holds a non-empty value.
    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some_and(|value| !value.is_empty())
    }

    /// Set `field`, replacing any previous value but keeping its position.
    pub fn set(&mut self, field: &str, value: &str) {
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.fields.push((field.to_string(), value.to_string())),
        }
    }

    /// Append `value` to `field` on a new line.
    pub fn append(&mut self, field: &str, value: &str) {
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, existing)) if !existing.is_empty() => {
                existing.push('\n');
                existing.push_str(value);
            }
            Some((_, existing)) => *existing = value.to_string(),
            None => self.fields.push((field.to_string(), value.to_string())),
        }
    }

    /// True when `text` is already stored, either as a whole value or as one
    /// line of an appended value.
    pub fn contains_text(&self, text: &str) -> bool {
        self.fields
            .iter()
            .any(|(_, value)| value == text || value.lines().any(|line| line == text))
    }

    /// Fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for ClassifiedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Thresholds shared by the built-in predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuning {
    /// Longest text (in chars) still counted as "short" (titles, subjects).
    pub short_max: usize,
    /// A time-bearing text must be shorter than this to count as a timestamp.
    pub time_max: usize,
    /// Shortest text counted as "long" (bodies, notes).
    pub long_min: usize,
    /// Hosts accepted as meeting links in addition to the built-in list.
    pub extra_meeting_domains: Vec<String>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            short_max: 80,
            time_max: 20,
            long_min: 40,
            extra_meeting_domains: Vec::new(),
        }
    }
}

/// What a predicate sees for one text.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub text: &'a str,
    pub role: &'a str,
    pub tuning: &'a Tuning,
}

impl Candidate<'_> {
    pub fn chars(&self) -> usize {
        self.text.chars().count()
    }
}

pub type Predicate = fn(&Candidate<'_>) -> bool;

/// How a rule writes its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// First writer wins; the rule no longer matches once the field is set.
    Once,
    /// Every match is appended on a new line.
    Append,
}

/// One link of the field-guess chain.
#[derive(Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub predicate: Predicate,
    pub fill: Fill,
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("field", &self.field)
            .field("fill", &self.fill)
            .finish_non_exhaustive()
    }
}

impl FieldRule {
    pub fn once(field: &'static str, predicate: Predicate) -> Self {
        Self { field, predicate, fill: Fill::Once }
    }

    pub fn append(field: &'static str, predicate: Predicate) -> Self {
        Self { field, predicate, fill: Fill::Append }
    }
}

/// Fate of a text no rule claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leftovers {
    Drop,
    AppendTo(&'static str),
}

/// Condition a record must meet to be emitted.
#[derive(Clone, Copy)]
pub enum Requirement {
    /// At least one of these fields is non-empty.
    AnyOf(&'static [&'static str]),
    Custom(fn(&ClassifiedRecord) -> bool),
}

impl fmt::Debug for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::AnyOf(fields) => f.debug_tuple("AnyOf").field(fields).finish(),
            Requirement::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Requirement {
    pub fn is_met(&self, record: &ClassifiedRecord) -> bool {
        match self {
            Requirement::AnyOf(fields) => fields.iter().any(|field| record.has(field)),
            Requirement::Custom(check) => check(record),
        }
    }
}

/// Whether a boundary node's own text belongs to the record it opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryText {
    Ignore,
    Classify,
}

/// Snapshot attribute a node's text may come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Value,
    Title,
    Description,
}

impl TextSource {
    fn read<'a>(&self, snapshot: &'a UIElementSnapshot) -> Option<&'a str> {
        match self {
            TextSource::Value => snapshot.text_value(),
            TextSource::Title => snapshot.text_title(),
            TextSource::Description => snapshot.text_description(),
        }
    }
}

const DEFAULT_TEXT_SOURCES: &[TextSource] =
    &[TextSource::Value, TextSource::Title, TextSource::Description];

/// Containers whose titles name the window, not a record.
const CONTAINER_ROLES: &[&str] = &["AXApplication", "AXWindow", "AXSheet", "AXScrollArea"];

/// Per-domain classifier parameters.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub name: &'static str,
    pub boundary_roles: &'static [&'static str],
    pub boundary_text: BoundaryText,
    pub text_sources: &'static [TextSource],
    pub ignored_roles: Vec<&'static str>,
    /// Exact texts (case-insensitive) that never contribute.
    pub noise: Vec<&'static str>,
    pub rules: Vec<FieldRule>,
    pub leftovers: Leftovers,
    pub requirement: Requirement,
    pub dedupe: bool,
    pub tuning: Tuning,
}

impl ClassifierConfig {
    /// A config with no rules that ignores window containers and UI chrome.
    pub fn new(name: &'static str, boundary_roles: &'static [&'static str]) -> Self {
        let mut ignored_roles = CONTAINER_ROLES.to_vec();
        ignored_roles.extend_from_slice(UI_CHROME_ROLES);
        Self {
            name,
            boundary_roles,
            boundary_text: BoundaryText::Ignore,
            text_sources: DEFAULT_TEXT_SOURCES,
            ignored_roles,
            noise: Vec::new(),
            rules: Vec::new(),
            leftovers: Leftovers::Drop,
            requirement: Requirement::AnyOf(&[]),
            dedupe: false,
            tuning: Tuning::default(),
        }
    }

    pub fn rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn leftovers(mut self, leftovers: Leftovers) -> Self {
        self.leftovers = leftovers;
        self
    }

    pub fn require(mut self, requirement: Requirement) -> Self {
        self.requirement = requirement;
        self
    }

    pub fn boundary_text(mut self, boundary_text: BoundaryText) -> Self {
        self.boundary_text = boundary_text;
        self
    }

    pub fn text_sources(mut self, sources: &'static [TextSource]) -> Self {
        self.text_sources = sources;
        self
    }

    pub fn ignore_roles(mut self, roles: &[&'static str]) -> Self {
        self.ignored_roles.extend_from_slice(roles);
        self
    }

    /// Stop ignoring `role` (e.g. a domain whose rows are buttons).
    pub fn allow_role(mut self, role: &str) -> Self {
        self.ignored_roles.retain(|ignored| *ignored != role);
        self
    }

    pub fn noise(mut self, texts: &[&'static str]) -> Self {
        self.noise.extend_from_slice(texts);
        self
    }

    pub fn dedupe(mut self) -> Self {
        self.dedupe = true;
        self
    }

    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn is_boundary(&self, role: &str) -> bool {
        self.boundary_roles.contains(&role)
    }

    fn is_ignored(&self, role: &str) -> bool {
        self.ignored_roles.contains(&role)
    }

    fn is_noise(&self, text: &str) -> bool {
        self.noise.iter().any(|noise| noise.eq_ignore_ascii_case(text))
    }

    /// First non-empty text among the configured sources.
    pub fn text_of<'a>(&self, snapshot: &'a UIElementSnapshot) -> Option<&'a str> {
        self.text_sources.iter().find_map(|source| source.read(snapshot))
    }
}

// ============================================================================
// Built-in predicates
// ============================================================================

pub fn any_text(_: &Candidate<'_>) -> bool {
    true
}

/// Contains `@` and no whitespace.
pub fn is_address(c: &Candidate<'_>) -> bool {
    c.text.contains('@') && !c.text.chars().any(char::is_whitespace)
}

/// Contains a clock time and is shorter than `time_max`.
pub fn is_time(c: &Candidate<'_>) -> bool {
    c.chars() < c.tuning.time_max && patterns::has_time(c.text)
}

/// Contains two clock times (`9:00 AM - 10:30 AM`).
pub fn is_time_range(c: &Candidate<'_>) -> bool {
    c.chars() < c.tuning.short_max && patterns::extract_times(c.text).len() >= 2
}

/// A short text made up mostly of dates and times ("Friday drinks" is not).
pub fn is_date(c: &Candidate<'_>) -> bool {
    if c.chars() > c.tuning.short_max {
        return false;
    }
    let dates = patterns::extract_dates(c.text);
    if dates.is_empty() {
        return false;
    }
    let covered: usize = dates
        .iter()
        .chain(patterns::extract_times(c.text).iter())
        .map(|m| m.chars().count())
        .sum();
    covered * 2 >= c.chars()
}

/// A short text carrying a date or a time.
pub fn is_timestamp(c: &Candidate<'_>) -> bool {
    is_time(c) || (c.chars() < c.tuning.time_max * 2 && is_date(c))
}

pub fn is_url(c: &Candidate<'_>) -> bool {
    patterns::has_url(c.text)
}

pub fn is_meeting_url(c: &Candidate<'_>) -> bool {
    !patterns::extract_meeting_urls_with(c.text, &c.tuning.extra_meeting_domains).is_empty()
}

pub fn is_short(c: &Candidate<'_>) -> bool {
    c.chars() <= c.tuning.short_max
}

pub fn is_long(c: &Candidate<'_>) -> bool {
    c.chars() >= c.tuning.long_min
}

/// One to four capitalized words, no digits or `@`: looks like a person.
pub fn is_display_name(c: &Candidate<'_>) -> bool {
    let words: Vec<&str> = c.text.split_whitespace().collect();
    (1..=4).contains(&words.len())
        && c.chars() <= 40
        && !c.text.chars().any(|ch| ch.is_ascii_digit() || ch == '@' || ch == ':')
        && words
            .iter()
            .all(|word| word.chars().next().is_some_and(char::is_uppercase))
}

// ============================================================================
// State machine
// ============================================================================

/// Input to [`RecordAccumulator::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition<'a> {
    Boundary,
    Text { text: &'a str, role: &'a str },
    EndOfInput,
}

/// Accumulator state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    NoRecord,
    Accumulating(ClassifiedRecord),
}

/// Drives one pass of the classifier.
#[derive(Debug)]
pub struct RecordAccumulator<'c> {
    config: &'c ClassifierConfig,
    state: State,
}

impl<'c> RecordAccumulator<'c> {
    pub fn new(config: &'c ClassifierConfig) -> Self {
        Self {
            config,
            state: State::NoRecord,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Apply one transition. Returns the record it closed, if that record
    /// meets the requirement.
    pub fn step(&mut self, transition: Transition<'_>) -> Option<ClassifiedRecord> {
        match transition {
            Transition::Boundary => {
                let closed = self.flush();
                self.state = State::Accumulating(ClassifiedRecord::new());
                closed
            }
            Transition::Text { text, role } => {
                if let State::NoRecord = self.state {
                    self.state = State::Accumulating(ClassifiedRecord::new());
                }
                if let State::Accumulating(record) = &mut self.state {
                    fill(self.config, record, text, role);
                }
                None
            }
            Transition::EndOfInput => self.flush(),
        }
    }

    fn flush(&mut self) -> Option<ClassifiedRecord> {
        match std::mem::take(&mut self.state) {
            State::Accumulating(record)
                if !record.is_empty() && self.config.requirement.is_met(&record) =>
            {
                Some(record)
            }
            State::Accumulating(record) => {
                if !record.is_empty() {
                    log::trace!(
                        "[AX-CLASSIFIER] {}: dropping record without required fields: {:?}",
                        self.config.name,
                        record
                    );
                }
                None
            }
            State::NoRecord => None,
        }
    }
}

fn fill(config: &ClassifierConfig, record: &mut ClassifiedRecord, text: &str, role: &str) {
    let text = text.trim();
    if text.is_empty() || config.is_noise(text) {
        return;
    }
    if config.dedupe && record.contains_text(text) {
        return;
    }

    let candidate = Candidate {
        text,
        role,
        tuning: &config.tuning,
    };
    for rule in &config.rules {
        let open = rule.fill == Fill::Append || !record.has(rule.field);
        if open && (rule.predicate)(&candidate) {
            match rule.fill {
                Fill::Once => record.set(rule.field, text),
                Fill::Append => record.append(rule.field, text),
            }
            return;
        }
    }

    if let Leftovers::AppendTo(field) = config.leftovers {
        record.append(field, text);
    }
}

// ============================================================================
// Classifier
// ============================================================================

/// One classifier input: a node's role, its text, if any, and its tree depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    pub role: &'a str,
    pub text: Option<&'a str>,
    pub depth: usize,
}

impl<'a> Entry<'a> {
    pub fn new(role: &'a str, text: &'a str) -> Self {
        Self {
            role,
            text: Some(text),
            depth: 0,
        }
    }

    pub fn at_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }
}

/// Runs a [`ClassifierConfig`] over entries or a whole window.
#[derive(Debug, Clone)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify entries in order.
    pub fn classify<'a, I>(&self, entries: I) -> Vec<ClassifiedRecord>
    where
        I: IntoIterator<Item = Entry<'a>>,
    {
        let mut accumulator = RecordAccumulator::new(&self.config);
        let mut records = Vec::new();
        // Depth of the boundary whose subtree is being read. Boundaries
        // nested inside it (cells of a row) are content of the same record.
        let mut open_depth: Option<usize> = None;

        for entry in entries {
            if open_depth.is_some_and(|depth| entry.depth <= depth) {
                open_depth = None;
            }
            let boundary = self.config.is_boundary(entry.role) && open_depth.is_none();
            if boundary {
                open_depth = Some(entry.depth);
                records.extend(accumulator.step(Transition::Boundary));
                if self.config.boundary_text == BoundaryText::Ignore {
                    continue;
                }
            } else if self.config.is_ignored(entry.role) {
                continue;
            }
            if let Some(text) = entry.text {
                records.extend(accumulator.step(Transition::Text {
                    text,
                    role: entry.role,
                }));
            }
        }
        records.extend(accumulator.step(Transition::EndOfInput));

        log::debug!(
            "[AX-CLASSIFIER] {}: {} record(s)",
            self.config.name,
            records.len()
        );
        records
    }

    /// Classify every element of a walked window.
    pub fn classify_window(&self, content: &WindowContent) -> Vec<ClassifiedRecord> {
        self.classify(content.elements.iter().map(|element| Entry {
            role: element.role_str(),
            text: self.config.text_of(element),
            depth: element.depth,
        }))
    }
}
