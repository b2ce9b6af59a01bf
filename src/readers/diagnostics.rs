//! Compiler diagnostics from IDE issue navigators and build logs.
//!
//! Two layouts are common: a single line carrying everything
//! (`main.swift:42:10: error: cannot find 'foo' in scope`) and a row split
//! into a severity badge, the message and a location cell. Both end up as the
//! same [`CompilerError`].

use lazy_static::lazy_static;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{field, ParseContext, Reader};
use crate::classifier::{
    any_text, is_short, Candidate, ClassifiedRecord, ClassifierConfig, FieldRule, Requirement,
};
use crate::patterns::{extract_error_locations, extract_file_paths, ErrorLocation};
use crate::snapshot::WindowContent;

lazy_static! {
    static ref SEVERITY_PREFIX: Regex = Regex::new(
        r"(?i)\b(fatal error|error|warning|note)\s*:\s*(.*)$"
    ).unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl Severity {
    /// Parse a severity keyword; `fatal error` counts as an error.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_lowercase().as_str() {
            "error" | "fatal error" => Some(Severity::Error),
            "warning" => Some(Severity::Warning),
            "note" => Some(Severity::Note),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompilerError {
    pub severity: Severity,
    /// Message text without the location and severity prefix.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl CompilerError {
    /// `file:line:column: severity: message`, omitting what is unknown.
    pub fn format(&self) -> String {
        let mut location = String::new();
        if let Some(file) = &self.file {
            location.push_str(file);
            if let Some(line) = self.line {
                location.push_str(&format!(":{line}"));
                if let Some(column) = self.column {
                    location.push_str(&format!(":{column}"));
                }
            }
            location.push_str(": ");
        }
        format!("{location}{}: {}", self.severity, self.message)
    }
}

fn is_diagnostic_line(c: &Candidate<'_>) -> bool {
    SEVERITY_PREFIX.is_match(c.text)
}

fn is_severity_keyword(c: &Candidate<'_>) -> bool {
    Severity::from_keyword(c.text).is_some()
}

fn is_location(c: &Candidate<'_>) -> bool {
    is_short(c) && !extract_error_locations(c.text).is_empty()
}

/// The whole text is one file path.
fn is_file_name(c: &Candidate<'_>) -> bool {
    is_short(c) && extract_file_paths(c.text).first().is_some_and(|path| path == c.text)
}

fn prefix_severity(message: &str) -> Option<Severity> {
    let caps = SEVERITY_PREFIX.captures(message)?;
    Severity::from_keyword(caps.get(1)?.as_str())
}

fn has_message_and_severity(record: &ClassifiedRecord) -> bool {
    let Some(message) = record.get("message").filter(|m| !m.trim().is_empty()) else {
        return false;
    };
    record.get("severity").and_then(Severity::from_keyword).is_some()
        || prefix_severity(message).is_some()
}

pub fn config() -> ClassifierConfig {
    ClassifierConfig::new("diagnostics", &["AXRow"])
        .rule(FieldRule::once("message", is_diagnostic_line))
        .rule(FieldRule::once("severity", is_severity_keyword))
        .rule(FieldRule::once("location", is_location))
        .rule(FieldRule::once("file", is_file_name))
        .rule(FieldRule::once("message", any_text))
        .require(Requirement::Custom(has_message_and_severity))
        .dedupe()
}

fn project(record: &ClassifiedRecord, _: &ParseContext) -> Option<CompilerError> {
    let raw = field(record, "message")?;

    let (severity, message) = match SEVERITY_PREFIX.captures(&raw) {
        Some(caps) => (
            caps.get(1).and_then(|m| Severity::from_keyword(m.as_str())),
            caps.get(2).map(|m| m.as_str().trim().to_string()),
        ),
        None => (None, None),
    };
    let severity = record
        .get("severity")
        .and_then(Severity::from_keyword)
        .or(severity)?;
    let message = message.filter(|m| !m.is_empty()).unwrap_or_else(|| raw.clone());

    let location: Option<ErrorLocation> = extract_error_locations(&raw)
        .into_iter()
        .next()
        .or_else(|| {
            record
                .get("location")
                .and_then(|text| extract_error_locations(text).into_iter().next())
        });

    let (file, line, column) = match location {
        Some(location) => (Some(location.file), Some(location.line), location.column),
        None => (field(record, "file"), None, None),
    };

    Some(CompilerError {
        severity,
        message,
        file,
        line,
        column,
    })
}

pub fn reader() -> Reader<CompilerError> {
    Reader::new(config(), project)
}

pub fn parse(content: &WindowContent) -> Vec<CompilerError> {
    reader().parse(content)
}
