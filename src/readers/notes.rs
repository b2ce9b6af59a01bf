//! Notes lists (Apple Notes, Bear, Obsidian sidebars).

use serde::Serialize;

use super::{field, ParseContext, Reader};
use crate::classifier::{
    any_text, is_short, is_timestamp, ClassifiedRecord, ClassifierConfig, FieldRule, Requirement,
};
use crate::snapshot::WindowContent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub title: String,
    /// Modification date or time as shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

pub fn config() -> ClassifierConfig {
    ClassifierConfig::new("notes", &["AXRow", "AXCell"])
        .rule(FieldRule::once("modified", is_timestamp))
        .rule(FieldRule::once("title", is_short))
        .rule(FieldRule::append("body", any_text))
        .require(Requirement::AnyOf(&["title"]))
        .noise(&["Pinned", "Locked", "Shared"])
        .dedupe()
}

fn project(record: &ClassifiedRecord, _: &ParseContext) -> Option<Note> {
    Some(Note {
        title: field(record, "title")?,
        modified: field(record, "modified"),
        body: field(record, "body"),
    })
}

pub fn reader() -> Reader<Note> {
    Reader::new(config(), project)
}

pub fn parse(content: &WindowContent) -> Vec<Note> {
    reader().parse(content)
}
