//! Chat messages (Messages, Slack, Teams).
//!
//! A message row carries an optional sender and timestamp followed by one or
//! more body lines. Consecutive messages from the same sender often omit the
//! name, so only the body is required.

use serde::Serialize;

use super::{field, ParseContext, Reader};
use crate::classifier::{
    any_text, is_display_name, is_timestamp, ClassifiedRecord, ClassifierConfig, FieldRule,
    Requirement,
};
use crate::patterns::extract_urls;
use crate::snapshot::WindowContent;

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub body: String,
    /// URLs found in the body, in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
}

impl ChatMessage {
    /// Format the message as `[Sender] [Time] Body`.
    pub fn format(&self) -> String {
        format!(
            "[{}] [{}] {}",
            self.sender.as_deref().unwrap_or("Unknown"),
            self.time.as_deref().unwrap_or(""),
            self.body
        )
    }
}

/// Action buttons and navigation labels that chat clients expose as text.
const CHAT_NOISE: &[&str] = &[
    "Reply", "React", "Forward", "Copy", "Delete", "Edit", "Pin", "Save", "More",
    "Delivered", "Read", "Edited", "Type a message", "Mark as unread", "Threads",
    "Huddles", "Drafts & sent", "Direct Messages", "Channels", "AM", "PM",
];

pub fn config() -> ClassifierConfig {
    ClassifierConfig::new("messages", &["AXRow", "AXCell"])
        .rule(FieldRule::once("time", is_timestamp))
        .rule(FieldRule::once("sender", is_display_name))
        .rule(FieldRule::append("body", any_text))
        .require(Requirement::AnyOf(&["body"]))
        .noise(CHAT_NOISE)
        .dedupe()
}

fn project(record: &ClassifiedRecord, _: &ParseContext) -> Option<ChatMessage> {
    let body = field(record, "body")?;
    Some(ChatMessage {
        sender: field(record, "sender"),
        time: field(record, "time"),
        links: extract_urls(&body),
        body,
    })
}

pub fn reader() -> Reader<ChatMessage> {
    Reader::new(config(), project)
}

pub fn parse(content: &WindowContent) -> Vec<ChatMessage> {
    reader().parse(content)
}
