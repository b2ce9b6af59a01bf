//! Mail message lists.
//!
//! One row per message: sender (address or display name), a timestamp, the
//! subject and a preview snippet.

use serde::Serialize;

use super::{field, ParseContext, Reader};
use crate::classifier::{
    is_address, is_display_name, is_long, is_short, is_timestamp, ClassifiedRecord,
    ClassifierConfig, FieldRule, Leftovers, Requirement,
};
use crate::snapshot::WindowContent;

/// A message summary as shown in a mailbox list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

const MAIL_NOISE: &[&str] = &[
    "Unread", "Read", "Flagged", "Attachment", "VIP", "Replied", "Forwarded", "Draft",
];

pub fn config() -> ClassifierConfig {
    ClassifierConfig::new("mail", &["AXRow"])
        .rule(FieldRule::once("sender", is_address))
        .rule(FieldRule::once("time", is_timestamp))
        .rule(FieldRule::once("sender", is_display_name))
        .rule(FieldRule::once("subject", is_short))
        .rule(FieldRule::once("preview", is_long))
        .leftovers(Leftovers::AppendTo("preview"))
        .require(Requirement::AnyOf(&["subject"]))
        .noise(MAIL_NOISE)
        .dedupe()
}

fn project(record: &ClassifiedRecord, _: &ParseContext) -> Option<MailMessage> {
    Some(MailMessage {
        sender: field(record, "sender"),
        time: field(record, "time"),
        subject: field(record, "subject")?,
        preview: field(record, "preview"),
    })
}

pub fn reader() -> Reader<MailMessage> {
    Reader::new(config(), project)
}

pub fn parse(content: &WindowContent) -> Vec<MailMessage> {
    reader().parse(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::test_support::window;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_row_grouping() {
        let content = window(&[
            ("AXRow", "Row-boundary", 0),
            ("AXStaticText", "alice@x.com", 1),
            ("AXStaticText", "2:00 PM", 1),
            ("AXStaticText", "Team Meeting", 1),
            ("AXRow", "Row-boundary", 0),
            ("AXStaticText", "bob@x.com", 1),
            ("AXStaticText", "Standup", 1),
        ]);

        assert_eq!(
            parse(&content),
            vec![
                MailMessage {
                    sender: Some("alice@x.com".into()),
                    time: Some("2:00 PM".into()),
                    subject: "Team Meeting".into(),
                    preview: None,
                },
                MailMessage {
                    sender: Some("bob@x.com".into()),
                    time: None,
                    subject: "Standup".into(),
                    preview: None,
                },
            ]
        );
    }

    #[test]
    fn test_display_name_sender_and_preview() {
        let content = window(&[
            ("AXRow", "", 0),
            ("AXStaticText", "Unread", 1),
            ("AXStaticText", "Carol Jones", 1),
            ("AXStaticText", "Yesterday", 1),
            ("AXStaticText", "Invoice 2291", 1),
            ("AXStaticText", "Hi team, the invoice for February is attached for review.", 1),
        ]);

        let messages = parse(&content);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender.as_deref(), Some("Carol Jones"));
        assert_eq!(messages[0].time.as_deref(), Some("Yesterday"));
        assert_eq!(messages[0].subject, "Invoice 2291");
        assert_eq!(
            messages[0].preview.as_deref(),
            Some("Hi team, the invoice for February is attached for review.")
        );
    }

    #[test]
    fn test_row_without_subject_is_dropped() {
        let content = window(&[("AXRow", "", 0), ("AXStaticText", "dave@x.com", 1)]);
        assert!(parse(&content).is_empty());
    }
}
