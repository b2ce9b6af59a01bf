//! Calendar events.
//!
//! Calendar list and day views expose one row (or cell, or group) per event
//! holding the title, a time or time range, sometimes a date, a location and
//! a meeting link. The first short text is the title and the second is the
//! location; everything unclaimed becomes the notes.

use chrono::NaiveDate;
use serde::Serialize;

use super::{field, ParseContext, Reader};
use crate::classifier::{
    is_date, is_meeting_url, is_short, is_time, is_time_range, is_url, Candidate,
    ClassifiedRecord, ClassifierConfig, FieldRule, Leftovers, Requirement,
};
use crate::patterns::{extract_dates, extract_meeting_urls, extract_times, extract_urls, resolve_date};
use crate::roles::ROW_ROLES;
use crate::snapshot::WindowContent;

/// A calendar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Date text as shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// `date` resolved against the parse reference date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn is_location(c: &Candidate<'_>) -> bool {
    is_short(c) && !c.text.contains("://")
}

pub fn config() -> ClassifierConfig {
    ClassifierConfig::new("events", ROW_ROLES)
        .rule(FieldRule::once("meeting_url", is_meeting_url))
        .rule(FieldRule::append("notes", is_url))
        .rule(FieldRule::once("time", is_time_range))
        .rule(FieldRule::once("time", is_time))
        .rule(FieldRule::once("date", is_date))
        .rule(FieldRule::once("title", is_short))
        .rule(FieldRule::once("location", is_location))
        .leftovers(Leftovers::AppendTo("notes"))
        .require(Requirement::AnyOf(&["title"]))
        .noise(&["New Event", "Add Event", "All-day"])
        .dedupe()
}

fn project(record: &ClassifiedRecord, context: &ParseContext) -> Option<Event> {
    let title = field(record, "title")?;
    let time_text = field(record, "time");

    let times = time_text.as_deref().map(extract_times).unwrap_or_default();
    let date = field(record, "date").or_else(|| {
        time_text
            .as_deref()
            .and_then(|text| extract_dates(text).into_iter().next())
    });
    let day = date
        .as_deref()
        .and_then(|text| resolve_date(text, context.reference_date));

    let notes = field(record, "notes");
    let meeting_url = record
        .get("meeting_url")
        .and_then(|text| extract_urls(text).into_iter().next())
        .or_else(|| {
            notes
                .as_deref()
                .and_then(|text| extract_meeting_urls(text).into_iter().next())
        });

    Some(Event {
        title,
        start_time: times.first().cloned(),
        end_time: times.get(1).cloned(),
        date,
        day,
        location: field(record, "location"),
        meeting_url,
        notes,
    })
}

pub fn reader() -> Reader<Event> {
    Reader::new(config(), project)
}

/// Parse events, resolving relative dates against today.
pub fn parse(content: &WindowContent) -> Vec<Event> {
    reader().parse(content)
}
