//! Browser tab strips.
//!
//! Each tab is an `AXRadioButton` (Safari, Chrome) or `AXTab` whose own title
//! is the page title, so the boundary node's text is classified into the
//! record it opens. Some browsers expose the URL in the tab's description.

use serde::Serialize;

use super::{field, ParseContext, Reader};
use crate::classifier::{
    any_text, is_url, BoundaryText, ClassifiedRecord, ClassifierConfig, FieldRule, Requirement,
    TextSource,
};
use crate::patterns::extract_urls;
use crate::snapshot::WindowContent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowserTab {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

fn has_title_or_url(record: &ClassifiedRecord) -> bool {
    record.has("title") || record.has("url")
}

pub fn config() -> ClassifierConfig {
    const SOURCES: &[TextSource] = &[TextSource::Title, TextSource::Value, TextSource::Description];
    ClassifierConfig::new("browser_tabs", &["AXRadioButton", "AXTab"])
        .boundary_text(BoundaryText::Classify)
        .text_sources(SOURCES)
        .rule(FieldRule::once("url", is_url))
        .rule(FieldRule::once("title", any_text))
        .require(Requirement::Custom(has_title_or_url))
        .noise(&["New Tab", "Close Tab", "Close", "Mute Tab"])
}

fn project(record: &ClassifiedRecord, _: &ParseContext) -> Option<BrowserTab> {
    let url = record
        .get("url")
        .and_then(|text| extract_urls(text).into_iter().next());
    // An untitled tab is labeled with its address.
    let title = field(record, "title").or_else(|| url.clone())?;
    Some(BrowserTab { title, url })
}

pub fn reader() -> Reader<BrowserTab> {
    Reader::new(config(), project)
}

pub fn parse(content: &WindowContent) -> Vec<BrowserTab> {
    reader().parse(content)
}
