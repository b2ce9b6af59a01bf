//! Photo library grids.
//!
//! Photos exposes one `AXCell` per item. The cell's description is usually a
//! caption like `Photo, March 3, 2024, 2:15 PM` (kind, optional place, date
//! and time); browsers and file views show a filename instead. Descriptions
//! are read before titles and values.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use super::{field, ParseContext, Reader};
use crate::classifier::{
    is_date, is_short, is_time, Candidate, ClassifiedRecord, ClassifierConfig, FieldRule,
    Requirement, TextSource,
};
use crate::patterns::{extract_dates, extract_times, resolve_date};
use crate::snapshot::WindowContent;

lazy_static! {
    static ref MEDIA_FILENAME: Regex = Regex::new(
        r"(?i)^[\w .()-]+\.(jpe?g|png|heic|heif|gif|tiff?|raw|dng|cr2|nef|arw|webp|mov|mp4|m4v|avi)$"
    ).unwrap();
}

const VIDEO_EXTENSIONS: &[&str] = &["mov", "mp4", "m4v", "avi"];

/// Media type as labeled by the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Photo,
    Video,
    LivePhoto,
    Screenshot,
    Portrait,
    Panorama,
    Burst,
    SlowMotion,
    TimeLapse,
}

impl MediaKind {
    /// Parse a library label such as `Live Photo` or `Slo-mo`.
    pub fn from_label(label: &str) -> Option<Self> {
        let kind = match label.trim().to_lowercase().as_str() {
            "photo" | "image" => MediaKind::Photo,
            "video" => MediaKind::Video,
            "live photo" => MediaKind::LivePhoto,
            "screenshot" => MediaKind::Screenshot,
            "portrait" => MediaKind::Portrait,
            "panorama" => MediaKind::Panorama,
            "burst" => MediaKind::Burst,
            "slo-mo" | "slow motion" => MediaKind::SlowMotion,
            "time-lapse" | "timelapse" => MediaKind::TimeLapse,
            _ => return None,
        };
        Some(kind)
    }

    fn from_filename(filename: &str) -> Self {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        if VIDEO_EXTENSIONS.contains(&extension.as_str()) {
            MediaKind::Video
        } else {
            MediaKind::Photo
        }
    }
}

/// One photo or video in a library view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<MediaKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

fn is_media_filename(c: &Candidate<'_>) -> bool {
    MEDIA_FILENAME.is_match(c.text)
}

fn is_kind_label(c: &Candidate<'_>) -> bool {
    MediaKind::from_label(c.text).is_some()
}

/// `Kind, rest...` where the first segment is a media label.
fn is_caption(c: &Candidate<'_>) -> bool {
    c.text
        .split_once(',')
        .is_some_and(|(kind, _)| MediaKind::from_label(kind).is_some())
}

fn has_title_or_filename(record: &ClassifiedRecord) -> bool {
    record.has("title") || record.has("filename")
}

pub fn config() -> ClassifierConfig {
    const SOURCES: &[TextSource] = &[TextSource::Description, TextSource::Title, TextSource::Value];
    ClassifierConfig::new("photos", &["AXCell"])
        .text_sources(SOURCES)
        .rule(FieldRule::once("filename", is_media_filename))
        .rule(FieldRule::once("title", is_caption))
        .rule(FieldRule::once("kind", is_kind_label))
        .rule(FieldRule::once("time", is_time))
        .rule(FieldRule::once("date", is_date))
        .rule(FieldRule::once("title", is_short))
        .rule(FieldRule::once("location", is_short))
        .require(Requirement::Custom(has_title_or_filename))
        .noise(&["Favorite", "Shared", "Edited"])
        .dedupe()
}

/// Facts read from a caption: kind, date, time and whatever is left as place.
#[derive(Debug, Default, PartialEq)]
struct Caption {
    kind: Option<MediaKind>,
    date: Option<String>,
    time: Option<String>,
    location: Option<String>,
}

fn read_caption(caption: &str) -> Caption {
    let Some((label, rest)) = caption.split_once(',') else {
        return Caption::default();
    };
    let Some(kind) = MediaKind::from_label(label) else {
        return Caption::default();
    };

    let date = extract_dates(rest).into_iter().next();
    let time = extract_times(rest).into_iter().next();

    let mut remainder = rest.to_string();
    for matched in date.iter().chain(time.iter()) {
        remainder = remainder.replacen(matched.as_str(), "", 1);
    }
    let place: Vec<&str> = remainder
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty() && !part.chars().all(|c| c.is_ascii_digit()))
        .collect();

    Caption {
        kind: Some(kind),
        date,
        time,
        location: (!place.is_empty()).then(|| place.join(", ")),
    }
}

fn project(record: &ClassifiedRecord, context: &ParseContext) -> Option<PhotoItem> {
    let title = field(record, "title");
    let filename = field(record, "filename");
    if title.is_none() && filename.is_none() {
        return None;
    }

    let caption = title.as_deref().map(read_caption).unwrap_or_default();
    let kind = caption
        .kind
        .or_else(|| record.get("kind").and_then(MediaKind::from_label))
        .or_else(|| filename.as_deref().map(MediaKind::from_filename));
    let date = caption.date.or_else(|| field(record, "date"));
    let day = date
        .as_deref()
        .and_then(|text| resolve_date(text, context.reference_date));

    Some(PhotoItem {
        kind,
        day,
        date,
        time: caption.time.or_else(|| field(record, "time")),
        location: caption.location.or_else(|| field(record, "location")),
        title,
        filename,
    })
}

pub fn reader() -> Reader<PhotoItem> {
    Reader::new(config(), project)
}

pub fn parse(content: &WindowContent) -> Vec<PhotoItem> {
    reader().parse(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::test_support::window;
    use crate::snapshot::UIElementSnapshot;
    use pretty_assertions::assert_eq;

    fn reference() -> ParseContext {
        ParseContext::at(NaiveDate::from_ymd_opt(2025, 3, 12).unwrap())
    }

    #[test]
    fn test_caption_from_description() {
        let content = WindowContent {
            elements: vec![UIElementSnapshot {
                role: Some("AXCell".into()),
                title: Some("ignored".into()),
                description: Some("Photo, March 3, 2024, 2:15 PM".into()),
                ..Default::default()
            }],
            ..Default::default()
        };
        // Boundary text is ignored, so the caption has to come from a child.
        assert!(reader().parse_at(&content, &reference()).is_empty());

        let mut content = content;
        let mut image = content.elements[0].clone();
        image.role = Some("AXImage".into());
        image.depth = 1;
        content.elements.push(image);

        let photos = reader().parse_at(&content, &reference());
        assert_eq!(
            photos,
            vec![PhotoItem {
                title: Some("Photo, March 3, 2024, 2:15 PM".into()),
                filename: None,
                kind: Some(MediaKind::Photo),
                date: Some("March 3, 2024".into()),
                day: NaiveDate::from_ymd_opt(2024, 3, 3),
                time: Some("2:15 PM".into()),
                location: None,
            }]
        );
    }

    #[test]
    fn test_filename_cells() {
        let content = window(&[
            ("AXCell", "", 0),
            ("AXStaticText", "IMG_0042.HEIC", 1),
            ("AXStaticText", "Golden Gate Bridge", 1),
            ("AXStaticText", "San Francisco", 1),
            ("AXStaticText", "Yesterday", 1),
            ("AXCell", "", 0),
            ("AXStaticText", "clip.MOV", 1),
            ("AXCell", "", 0),
            ("AXStaticText", "Favorite", 1),
        ]);

        let photos = reader().parse_at(&content, &reference());
        assert_eq!(photos.len(), 2);
        assert_eq!(
            photos[0],
            PhotoItem {
                title: Some("Golden Gate Bridge".into()),
                filename: Some("IMG_0042.HEIC".into()),
                kind: Some(MediaKind::Photo),
                date: Some("Yesterday".into()),
                day: NaiveDate::from_ymd_opt(2025, 3, 11),
                time: None,
                location: Some("San Francisco".into()),
            }
        );
        assert_eq!(photos[1].filename.as_deref(), Some("clip.MOV"));
        assert_eq!(photos[1].kind, Some(MediaKind::Video));
    }

    #[test]
    fn test_read_caption_with_place() {
        assert_eq!(
            read_caption("Video, Lisbon, June 2, 2024"),
            Caption {
                kind: Some(MediaKind::Video),
                date: Some("June 2, 2024".into()),
                time: None,
                location: Some("Lisbon".into()),
            }
        );
        assert_eq!(read_caption("Lisbon, June 2"), Caption::default());
    }

    #[test]
    fn test_media_kind_labels() {
        assert_eq!(MediaKind::from_label("Live Photo"), Some(MediaKind::LivePhoto));
        assert_eq!(MediaKind::from_label("slo-mo"), Some(MediaKind::SlowMotion));
        assert_eq!(MediaKind::from_label("Album"), None);
    }
}
