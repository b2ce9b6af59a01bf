//! Terminal sessions (Terminal, iTerm2, Warp).
//!
//! A terminal window exposes its whole scrollback as the value of one
//! `AXTextArea`. The window title usually names the host and directory. The
//! session summary is derived from the buffer text: the last prompt line gives
//! the last command, and error-looking lines are collected.

use lazy_static::lazy_static;
use regex_lite::Regex;
use serde::Serialize;

use super::{field, ParseContext, Reader};
use crate::classifier::{
    is_short, BoundaryText, Candidate, ClassifiedRecord, ClassifierConfig, FieldRule, Requirement,
};
use crate::patterns::{classify_content_type, ContentType};
use crate::snapshot::WindowContent;

/// Lines kept in [`TerminalSession::output_tail`].
pub const TAIL_LINES: usize = 10;

lazy_static! {
    // user@host ~/dir % command
    static ref PROMPT: Regex = Regex::new(r"^(.*?)[$%#❯]\s+(\S.*)$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerminalSession {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_command: Option<String>,
    pub error_lines: Vec<String>,
    pub line_count: usize,
    pub output_tail: Vec<String>,
}

fn is_buffer(c: &Candidate<'_>) -> bool {
    c.role == "AXTextArea"
}

pub fn config() -> ClassifierConfig {
    ClassifierConfig::new("terminal", &["AXWindow"])
        .boundary_text(BoundaryText::Classify)
        .rule(FieldRule::once("buffer", is_buffer))
        .rule(FieldRule::once("title", is_short))
        .require(Requirement::AnyOf(&["buffer"]))
}

/// A prompt line split into its prefix and command.
fn prompt(line: &str) -> Option<(&str, &str)> {
    let caps = PROMPT.captures(line)?;
    let prefix = caps.get(1)?.as_str().trim();
    let command = caps.get(2)?.as_str().trim();
    let plausible = prefix.is_empty()
        || (prefix.split_whitespace().count() <= 3
            && (prefix.contains('@') || prefix.contains('~') || prefix.contains('/')));
    plausible.then_some((prefix, command))
}

/// First directory-looking token: `~/x`, `/x`, or the part after `host:`.
fn directory_in(text: &str) -> Option<String> {
    const TRAILING: &[char] = &[':', ',', '$', '%', '#'];
    text.split_whitespace().find_map(|token| {
        let token = token.trim_end_matches(TRAILING);
        if token.starts_with('~') || token.starts_with('/') {
            return Some(token.to_string());
        }
        let (_, rest) = token.split_once(':')?;
        (rest.starts_with('~') || rest.starts_with('/')).then(|| rest.to_string())
    })
}

fn project(record: &ClassifiedRecord, _: &ParseContext) -> Option<TerminalSession> {
    let buffer = field(record, "buffer")?;
    let title = field(record, "title");

    let lines: Vec<&str> = buffer.lines().map(str::trim_end).collect();
    let last_prompt = lines.iter().rev().find_map(|line| prompt(line));

    let working_directory = title
        .as_deref()
        .and_then(directory_in)
        .or_else(|| last_prompt.and_then(|(prefix, _)| directory_in(prefix)));

    let error_lines = lines
        .iter()
        .filter(|line| !line.is_empty() && classify_content_type(line) == ContentType::Error)
        .map(|line| line.to_string())
        .collect();

    let non_empty: Vec<&str> = lines.iter().copied().filter(|line| !line.is_empty()).collect();
    let output_tail = non_empty[non_empty.len().saturating_sub(TAIL_LINES)..]
        .iter()
        .map(|line| line.to_string())
        .collect();

    Some(TerminalSession {
        title,
        working_directory,
        last_command: last_prompt.map(|(_, command)| command.to_string()),
        error_lines,
        line_count: lines.len(),
        output_tail,
    })
}

pub fn reader() -> Reader<TerminalSession> {
    Reader::new(config(), project)
}

pub fn parse(content: &WindowContent) -> Vec<TerminalSession> {
    reader().parse(content)
}
