//! Pattern extraction.
//!
//! Stateless, regex-driven helpers that pull URLs, meeting links, e-mail
//! addresses, times, dates, file paths and compiler error locations out of
//! arbitrary text. Every function returns matches in first-to-last order and
//! simply finds nothing on malformed input. A match whose numeric part does
//! not fit (`file.rs:99999999999`) is dropped rather than reported.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use lazy_static::lazy_static;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hosts recognized as online-meeting links (case-insensitive substring).
pub const MEETING_DOMAINS: &[&str] = &[
    "zoom.us",
    "meet.google.com",
    "teams.microsoft.com",
    "teams.live.com",
    "webex.com",
    "gotomeeting.com",
    "whereby.com",
    "chime.aws",
    "bluejeans.com",
    "around.co",
];

/// Extensions that make a bare word a source file name.
const SOURCE_EXTENSIONS: &str = "rs|swift|py|js|jsx|ts|tsx|go|java|kt|kts|c|h|cc|cpp|cxx|hpp|m|mm|rb|php|cs|scala|sh|zsh|toml|json|yaml|yml|html|css|scss|md|sql|vue|svelte|lua|ex|exs|dart|zig";

/// Class body for every Unicode space. regex-lite's `\s` is ASCII-only, and
/// macOS formats times with U+202F and links text with U+00A0.
const SPACE: &str =
    r"\s\x{85}\x{a0}\x{1680}\x{2000}-\x{200a}\x{2028}\x{2029}\x{202f}\x{205f}\x{3000}";

/// Compile `pattern` with `{ws}` expanded to [`SPACE`].
fn spaced(pattern: &str) -> Regex {
    Regex::new(&pattern.replace("{ws}", SPACE)).unwrap()
}

lazy_static! {
    static ref URL: Regex = spaced(r#"https?://[^{ws}"']+"#);

    static ref EMAIL: Regex = Regex::new(
        r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}"
    ).unwrap();

    // 9:30, 09:30 pm, 2:00PM, 7 am
    static ref TIME: Regex = spaced(
        r"(?i)\b\d{1,2}:\d{2}(?:[{ws}]*[ap]m)?\b|\b\d{1,2}[{ws}]*[ap]m\b"
    );

    static ref TIME_PARTS: Regex = spaced(
        r"(?i)^(\d{1,2})(?::(\d{2}))?[{ws}]*([ap]m)?$"
    );

    // Month-name dates come first so "Jan 5, 2025" wins over a bare weekday or number.
    static ref DATE: Regex = spaced(
        r"(?i)\b(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?[{ws}]+\d{1,2}(?:st|nd|rd|th)?(?:,?[{ws}]+\d{4})?\b|\b\d{1,2}/\d{1,2}/\d{2,4}\b|\b\d{4}-\d{2}-\d{2}\b|\b(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b|\b(?:today|tomorrow|yesterday)\b"
    );

    static ref MONTH_DAY: Regex = spaced(
        r"(?i)^([a-z]+)\.?[{ws}]+(\d{1,2})(?:st|nd|rd|th)?(?:,?[{ws}]+(\d{4}))?$"
    );

    static ref NUMERIC_DATE: Regex = Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2,4})$").unwrap();

    static ref UNIX_PATH: Regex = Regex::new(
        r"/(?:[\w.-]+/)*[\w.-]+\.[A-Za-z0-9]+"
    ).unwrap();

    static ref WINDOWS_PATH: Regex = Regex::new(
        r"\b[A-Za-z]:\\(?:[\w.-]+\\)*[\w.-]+"
    ).unwrap();

    static ref SOURCE_FILE: Regex = Regex::new(&format!(
        r"\b[\w-]+(?:\.[\w-]+)*\.(?:{})\b",
        SOURCE_EXTENSIONS
    )).unwrap();

    // path/to/file.swift:42:10, C:\src\main.c:10:5
    static ref COLON_LOCATION: Regex = spaced(
        r#"((?:\b[A-Za-z]:[\\/])?[^{ws}:()"'<>\[\]]+\.[A-Za-z0-9]+):(\d+)(?::(\d+))?"#
    );

    // Program.cs(10,5), C:\proj\Program.cs(10,5)
    static ref PAREN_LOCATION: Regex = spaced(
        r#"((?:\b[A-Za-z]:[\\/])?[^{ws}:()"'<>\[\]]+\.[A-Za-z0-9]+)\((\d+)(?:,[{ws}]*(\d+))?\)"#
    );
}

/// What an [`ExtractedPattern`] matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Url,
    MeetingUrl,
    Email,
    Time,
    Date,
    FilePath,
    ErrorLocation,
}

/// A compiler-style source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLocation {
    pub file: String,
    pub line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

/// One match from [`extract_all`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedPattern {
    pub kind: PatternKind,
    pub text: String,
    /// Byte offset of the match in the input.
    pub offset: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<ErrorLocation>,
}

/// Coarse content category of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Error,
    Warning,
    Url,
    Email,
    Code,
    Text,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Error => "error",
            ContentType::Warning => "warning",
            ContentType::Url => "url",
            ContentType::Email => "email",
            ContentType::Code => "code",
            ContentType::Text => "text",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn collect(regex: &Regex, text: &str) -> Vec<String> {
    regex.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Extract `http://` and `https://` URLs.
///
/// # Examples
///
/// ```
/// use ax_records::patterns::extract_urls;
///
/// let urls = extract_urls("Visit https://example.com and http://test.org/path for more info");
/// assert_eq!(urls, vec!["https://example.com", "http://test.org/path"]);
/// ```
pub fn extract_urls(text: &str) -> Vec<String> {
    collect(&URL, text)
}

/// URLs pointing at a known meeting platform.
pub fn extract_meeting_urls(text: &str) -> Vec<String> {
    extract_meeting_urls_with(text, &[])
}

/// Like [`extract_meeting_urls`], also accepting `extra_domains`.
pub fn extract_meeting_urls_with(text: &str, extra_domains: &[String]) -> Vec<String> {
    extract_urls(text)
        .into_iter()
        .filter(|url| is_meeting_url_with(url, extra_domains))
        .collect()
}

/// True when `url` contains a meeting host (case-insensitive).
pub fn is_meeting_url_with(url: &str, extra_domains: &[String]) -> bool {
    let lower = url.to_lowercase();
    MEETING_DOMAINS.iter().any(|domain| lower.contains(domain))
        || extra_domains
            .iter()
            .filter(|domain| !domain.trim().is_empty())
            .any(|domain| lower.contains(&domain.trim().to_lowercase()))
}

/// Extract e-mail addresses.
pub fn extract_emails(text: &str) -> Vec<String> {
    collect(&EMAIL, text)
}

/// Extract clock times (`9:30`, `2:00 PM`, `7am`).
pub fn extract_times(text: &str) -> Vec<String> {
    collect(&TIME, text)
}

/// Extract dates: `MM/DD/YYYY`, ISO, `Mon DD, YYYY`, weekday names and
/// today/tomorrow/yesterday. Case-insensitive.
pub fn extract_dates(text: &str) -> Vec<String> {
    collect(&DATE, text)
}

pub fn has_url(text: &str) -> bool {
    URL.is_match(text)
}

pub fn has_email(text: &str) -> bool {
    EMAIL.is_match(text)
}

pub fn has_time(text: &str) -> bool {
    TIME.is_match(text)
}

pub fn has_date(text: &str) -> bool {
    DATE.is_match(text)
}

pub fn has_file_path(text: &str) -> bool {
    !find_file_paths(text).is_empty()
}

/// A path may only start at the beginning of the text, after whitespace or
/// after an opening delimiter. This keeps URL path segments out.
fn starts_cleanly(text: &str, start: usize) -> bool {
    match text[..start].chars().next_back() {
        None => true,
        Some(c) => c.is_whitespace() || "\"'(<[=`,".contains(c),
    }
}

fn find_file_paths(text: &str) -> Vec<(usize, &str)> {
    let mut found: Vec<(usize, &str)> = [&*UNIX_PATH, &*WINDOWS_PATH, &*SOURCE_FILE]
        .into_iter()
        .flat_map(|regex| regex.find_iter(text))
        .filter(|m| starts_cleanly(text, m.start()))
        .map(|m| (m.start(), m.as_str()))
        .collect();
    // Earliest first; at equal starts the longer match wins.
    found.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.len().cmp(&a.1.len())));

    let mut merged = Vec::with_capacity(found.len());
    let mut covered_until = 0;
    for (start, path) in found {
        if start < covered_until {
            continue;
        }
        covered_until = start + path.len();
        merged.push((start, path));
    }
    merged
}

/// Extract Unix absolute paths with an extension, Windows drive paths and
/// bare source file names. Paths embedded in URLs are not reported.
///
/// # Examples
///
/// ```
/// use ax_records::patterns::extract_file_paths;
///
/// let paths = extract_file_paths("see /src/main.rs and lib.rs, not https://x.dev/app.js");
/// assert_eq!(paths, vec!["/src/main.rs", "lib.rs"]);
/// ```
pub fn extract_file_paths(text: &str) -> Vec<String> {
    find_file_paths(text)
        .into_iter()
        .map(|(_, path)| path.to_string())
        .collect()
}

fn find_error_locations(text: &str) -> Vec<(usize, &str, ErrorLocation)> {
    let mut found = Vec::new();
    for regex in [&*COLON_LOCATION, &*PAREN_LOCATION] {
        for caps in regex.captures_iter(text) {
            let (Some(whole), Some(file), Some(line)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            if !starts_cleanly(text, whole.start()) {
                continue;
            }
            let Ok(line) = line.as_str().parse::<u32>() else {
                continue;
            };
            let column = match caps.get(3) {
                Some(column) => match column.as_str().parse::<u32>() {
                    Ok(column) => Some(column),
                    Err(_) => continue,
                },
                None => None,
            };
            found.push((
                whole.start(),
                whole.as_str(),
                ErrorLocation {
                    file: file.as_str().to_string(),
                    line,
                    column,
                },
            ));
        }
    }
    found.sort_by_key(|(start, _, _)| *start);
    found
}

/// Extract `file:line[:col]` and `file(line[,col])` locations.
///
/// # Examples
///
/// ```
/// use ax_records::patterns::extract_error_locations;
///
/// let found = extract_error_locations("/path/to/file.swift:42:10: error: unexpected token");
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].file, "/path/to/file.swift");
/// assert_eq!(found[0].line, 42);
/// assert_eq!(found[0].column, Some(10));
/// ```
pub fn extract_error_locations(text: &str) -> Vec<ErrorLocation> {
    find_error_locations(text)
        .into_iter()
        .map(|(_, _, location)| location)
        .collect()
}

/// Classify a string, checking in priority order: error keywords, warning,
/// URL, e-mail, file path, then plain text.
///
/// # Examples
///
/// ```
/// use ax_records::patterns::{classify_content_type, ContentType};
///
/// assert_eq!(classify_content_type("Error: Something failed"), ContentType::Error);
/// assert_eq!(classify_content_type("Warning: Check this"), ContentType::Warning);
/// assert_eq!(classify_content_type("Hello world"), ContentType::Text);
/// ```
pub fn classify_content_type(text: &str) -> ContentType {
    let lower = text.to_lowercase();
    if ["error", "exception", "failed"].iter().any(|k| lower.contains(k)) {
        ContentType::Error
    } else if lower.contains("warning") {
        ContentType::Warning
    } else if has_url(text) {
        ContentType::Url
    } else if has_email(text) {
        ContentType::Email
    } else if has_file_path(text) {
        ContentType::Code
    } else {
        ContentType::Text
    }
}

/// Every pattern in `text`, ordered by offset.
///
/// URLs on a meeting host are reported once, as [`PatternKind::MeetingUrl`].
pub fn extract_all(text: &str) -> Vec<ExtractedPattern> {
    let mut all = Vec::new();
    let mut plain = |kind: PatternKind, regex: &Regex| {
        for m in regex.find_iter(text) {
            let kind = if kind == PatternKind::Url && is_meeting_url_with(m.as_str(), &[]) {
                PatternKind::MeetingUrl
            } else {
                kind
            };
            all.push(ExtractedPattern {
                kind,
                text: m.as_str().to_string(),
                offset: m.start(),
                location: None,
            });
        }
    };
    plain(PatternKind::Url, &URL);
    plain(PatternKind::Email, &EMAIL);
    plain(PatternKind::Time, &TIME);
    plain(PatternKind::Date, &DATE);

    for (offset, path) in find_file_paths(text) {
        all.push(ExtractedPattern {
            kind: PatternKind::FilePath,
            text: path.to_string(),
            offset,
            location: None,
        });
    }
    for (offset, matched, location) in find_error_locations(text) {
        all.push(ExtractedPattern {
            kind: PatternKind::ErrorLocation,
            text: matched.to_string(),
            offset,
            location: Some(location),
        });
    }

    all.sort_by_key(|p| p.offset);
    all
}

/// Parse the first clock time in `text`.
///
/// # Examples
///
/// ```
/// use ax_records::patterns::parse_time;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_time("Starts 2:30 PM"), NaiveTime::from_hms_opt(14, 30, 0));
/// assert_eq!(parse_time("12am"), NaiveTime::from_hms_opt(0, 0, 0));
/// assert_eq!(parse_time("no time here"), None);
/// ```
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    let matched = TIME.find(text)?;
    let caps = TIME_PARTS.captures(matched.as_str().trim())?;
    let mut hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    if let Some(meridiem) = caps.get(3) {
        if !(1..=12).contains(&hour) {
            return None;
        }
        let pm = meridiem.as_str().eq_ignore_ascii_case("pm");
        hour = match (pm, hour) {
            (false, 12) => 0,
            (true, 12) => 12,
            (true, h) => h + 12,
            (false, h) => h,
        };
    }
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn resolve_match(matched: &str, reference: NaiveDate) -> Option<NaiveDate> {
    let lower = matched.to_lowercase();
    match lower.as_str() {
        "today" => return Some(reference),
        "tomorrow" => return reference.checked_add_signed(Duration::days(1)),
        "yesterday" => return reference.checked_sub_signed(Duration::days(1)),
        _ => {}
    }

    if let Ok(weekday) = lower.parse::<Weekday>() {
        let ahead = (7 + weekday.num_days_from_monday() - reference.weekday().num_days_from_monday()) % 7;
        return reference.checked_add_signed(Duration::days(i64::from(ahead)));
    }

    if let Ok(date) = NaiveDate::parse_from_str(matched, "%Y-%m-%d") {
        return Some(date);
    }

    if let Some(caps) = NUMERIC_DATE.captures(matched) {
        let month: u32 = caps.get(1)?.as_str().parse().ok()?;
        let day: u32 = caps.get(2)?.as_str().parse().ok()?;
        let year_text = caps.get(3)?.as_str();
        let mut year: i32 = year_text.parse().ok()?;
        if year_text.len() == 2 {
            year += 2000;
        }
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    let caps = MONTH_DAY.captures(matched)?;
    let month = month_number(caps.get(1)?.as_str())?;
    let day: u32 = caps.get(2)?.as_str().parse().ok()?;
    let year = match caps.get(3) {
        Some(year) => year.as_str().parse().ok()?,
        None => reference.year(),
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Resolve the first date in `text` against `reference`.
///
/// Relative words count from `reference`, weekday names resolve to the next
/// such day on or after it, and month-name dates without a year take the
/// reference year.
///
/// # Examples
///
/// ```
/// use ax_records::patterns::resolve_date;
/// use chrono::NaiveDate;
///
/// let reference = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap(); // a Wednesday
/// assert_eq!(resolve_date("tomorrow", reference), NaiveDate::from_ymd_opt(2025, 3, 13));
/// assert_eq!(resolve_date("Friday", reference), NaiveDate::from_ymd_opt(2025, 3, 14));
/// assert_eq!(resolve_date("Jan 5, 2026", reference), NaiveDate::from_ymd_opt(2026, 1, 5));
/// ```
pub fn resolve_date(text: &str, reference: NaiveDate) -> Option<NaiveDate> {
    DATE.find_iter(text)
        .find_map(|m| resolve_match(m.as_str(), reference))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_extract_urls_scenario() {
        assert_eq!(
            extract_urls("Visit https://example.com and http://test.org/path for more info"),
            vec!["https://example.com", "http://test.org/path"]
        );
    }

    #[test]
    fn test_extract_urls_stops_at_quotes() {
        assert_eq!(
            extract_urls(r#"href="https://a.io/x" and 'http://b.io'"#),
            vec!["https://a.io/x", "http://b.io"]
        );
        assert!(extract_urls("ftp://nope.org").is_empty());
    }

    #[test]
    fn test_extract_meeting_urls_scenario() {
        let text = "Join https://zoom.us/j/123456789 or https://meet.google.com/abc-defg-hij \
                    agenda at https://example.com";
        assert_eq!(
            extract_meeting_urls(text),
            vec!["https://zoom.us/j/123456789", "https://meet.google.com/abc-defg-hij"]
        );
    }

    #[test]
    fn test_meeting_urls_case_insensitive_and_extra_domains() {
        assert_eq!(
            extract_meeting_urls("https://ACME.Zoom.US/j/1"),
            vec!["https://ACME.Zoom.US/j/1"]
        );
        let extra = vec!["Meet.Example.org".to_string()];
        assert_eq!(
            extract_meeting_urls_with("https://meet.example.org/room https://example.org", &extra),
            vec!["https://meet.example.org/room"]
        );
    }

    #[test]
    fn test_extract_emails() {
        assert_eq!(
            extract_emails("Contact alice@x.com or Bob.Smith+tag@mail.example.co.uk today"),
            vec!["alice@x.com", "Bob.Smith+tag@mail.example.co.uk"]
        );
        assert!(extract_emails("user@localhost").is_empty());
    }

    #[test]
    fn test_extract_times() {
        assert_eq!(
            extract_times("From 9:30 to 11:00AM, lunch 1 pm, call 2:00 PM"),
            vec!["9:30", "11:00AM", "1 pm", "2:00 PM"]
        );
    }

    #[test]
    fn test_extract_dates_all_forms() {
        let text = "12/25/2024, 2025-01-05, Jan 5, 2025, Monday, TOMORROW";
        assert_eq!(
            extract_dates(text),
            vec!["12/25/2024", "2025-01-05", "Jan 5, 2025", "Monday", "TOMORROW"]
        );
    }

    #[test]
    fn test_extract_file_paths_kinds() {
        let text = r"open /usr/local/src/app.py then C:\Users\me\notes.txt and (main.swift)";
        assert_eq!(
            extract_file_paths(text),
            vec!["/usr/local/src/app.py", r"C:\Users\me\notes.txt", "main.swift"]
        );
    }

    #[test]
    fn test_extract_file_paths_ignores_url_segments() {
        assert!(extract_file_paths("https://github.com/org/repo/blob/main/lib.rs").is_empty());
    }

    #[test]
    fn test_extract_error_locations_scenario() {
        let found = extract_error_locations("/path/to/file.swift:42:10: error: unexpected token");
        assert_eq!(
            found,
            vec![ErrorLocation {
                file: "/path/to/file.swift".into(),
                line: 42,
                column: Some(10),
            }]
        );
    }

    #[test]
    fn test_extract_error_locations_paren_and_no_column() {
        let found = extract_error_locations("Program.cs(10,5): error CS1002 and main.rs:7 again");
        assert_eq!(
            found,
            vec![
                ErrorLocation { file: "Program.cs".into(), line: 10, column: Some(5) },
                ErrorLocation { file: "main.rs".into(), line: 7, column: None },
            ]
        );
    }

    #[test]
    fn test_error_location_overflow_is_dropped() {
        assert!(extract_error_locations("big.rs:99999999999:1").is_empty());
        assert!(extract_error_locations("big.rs:1:99999999999").is_empty());
    }

    #[test]
    fn test_error_locations_with_drive_letter() {
        assert_eq!(
            extract_error_locations(r"C:\proj\Program.cs(10,5): error CS1002: ; expected"),
            vec![ErrorLocation {
                file: r"C:\proj\Program.cs".into(),
                line: 10,
                column: Some(5),
            }]
        );
        assert_eq!(
            extract_error_locations(r"C:\src\main.c:10:5: error: x"),
            vec![ErrorLocation {
                file: r"C:\src\main.c".into(),
                line: 10,
                column: Some(5),
            }]
        );
        // A letter glued to a word is not a drive.
        assert!(extract_error_locations("error:main.rs:3").is_empty());
    }

    #[test]
    fn test_unicode_spaces_end_urls() {
        assert_eq!(
            extract_urls("See https://example.com\u{a0}for details"),
            vec!["https://example.com"]
        );
        assert_eq!(
            extract_urls("https://a.io/x\u{3000}https://b.io\u{202f}y"),
            vec!["https://a.io/x", "https://b.io"]
        );
    }

    #[test]
    fn test_narrow_space_before_meridiem() {
        assert_eq!(extract_times("2:00\u{202f}PM"), vec!["2:00\u{202f}PM"]);
        assert_eq!(extract_times("7\u{a0}am"), vec!["7\u{a0}am"]);
        assert_eq!(parse_time("Today at 2:00\u{202f}PM"), NaiveTime::from_hms_opt(14, 0, 0));
        assert_eq!(parse_time("11:15\u{a0}pm"), NaiveTime::from_hms_opt(23, 15, 0));
    }

    #[test]
    fn test_month_name_dates_with_no_break_space() {
        let reference = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        assert_eq!(extract_dates("Mar\u{a0}20, 2025"), vec!["Mar\u{a0}20, 2025"]);
        assert_eq!(
            resolve_date("due Mar\u{a0}20,\u{202f}2026", reference),
            NaiveDate::from_ymd_opt(2026, 3, 20)
        );
    }

    #[test]
    fn test_error_location_ignores_url_ports() {
        assert!(extract_error_locations("see https://example.com:8080/x").is_empty());
    }

    #[test]
    fn test_classify_content_type_scenarios() {
        assert_eq!(classify_content_type("Error: Something failed"), ContentType::Error);
        assert_eq!(classify_content_type("Warning: Check this"), ContentType::Warning);
        assert_eq!(classify_content_type("Visit https://example.com"), ContentType::Url);
        assert_eq!(classify_content_type("Contact test@email.com"), ContentType::Email);
        assert_eq!(classify_content_type("edit main.rs please"), ContentType::Code);
        assert_eq!(classify_content_type("Hello world"), ContentType::Text);
    }

    #[test]
    fn test_classify_priority_error_beats_url() {
        assert_eq!(
            classify_content_type("Build failed, see https://ci.example.com"),
            ContentType::Error
        );
    }

    #[test]
    fn test_extract_all_orders_by_offset() {
        let found = extract_all("mail bob@x.io at 3pm: https://zoom.us/j/9");
        let kinds: Vec<PatternKind> = found.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![PatternKind::Email, PatternKind::Time, PatternKind::MeetingUrl]
        );
        assert_eq!(found[0].offset, 5);
    }

    #[test]
    fn test_extract_all_error_location_carries_parse() {
        let found = extract_all("main.rs:3:4");
        let location = found
            .iter()
            .find(|p| p.kind == PatternKind::ErrorLocation)
            .and_then(|p| p.location.clone());
        assert_eq!(
            location,
            Some(ErrorLocation { file: "main.rs".into(), line: 3, column: Some(4) })
        );
    }

    #[test]
    fn test_parse_time_forms() {
        assert_eq!(parse_time("9:05"), NaiveTime::from_hms_opt(9, 5, 0));
        assert_eq!(parse_time("12:15 pm"), NaiveTime::from_hms_opt(12, 15, 0));
        assert_eq!(parse_time("7 PM"), NaiveTime::from_hms_opt(19, 0, 0));
        assert_eq!(parse_time("25:00"), None);
        assert_eq!(parse_time("13:00 pm"), None);
    }

    #[test]
    fn test_resolve_date_forms() {
        let reference = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        assert_eq!(resolve_date("today", reference), Some(reference));
        assert_eq!(
            resolve_date("Yesterday", reference),
            NaiveDate::from_ymd_opt(2025, 3, 11)
        );
        assert_eq!(resolve_date("wednesday", reference), Some(reference));
        assert_eq!(
            resolve_date("Tuesday", reference),
            NaiveDate::from_ymd_opt(2025, 3, 18)
        );
        assert_eq!(
            resolve_date("due 2024-02-29", reference),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(
            resolve_date("12/25/24", reference),
            NaiveDate::from_ymd_opt(2024, 12, 25)
        );
        assert_eq!(
            resolve_date("March 3rd", reference),
            NaiveDate::from_ymd_opt(2025, 3, 3)
        );
    }

    #[test]
    fn test_resolve_date_skips_impossible_dates() {
        let reference = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        assert_eq!(resolve_date("13/45/2025", reference), None);
        assert_eq!(
            resolve_date("2025-02-30 or Friday", reference),
            NaiveDate::from_ymd_opt(2025, 3, 14)
        );
    }

    proptest! {
        #[test]
        fn prop_extraction_is_idempotent(text in ".{0,200}") {
            prop_assert_eq!(extract_urls(&text), extract_urls(&text));
            prop_assert_eq!(extract_emails(&text), extract_emails(&text));
            prop_assert_eq!(extract_times(&text), extract_times(&text));
            prop_assert_eq!(extract_dates(&text), extract_dates(&text));
            prop_assert_eq!(extract_file_paths(&text), extract_file_paths(&text));
            prop_assert_eq!(extract_error_locations(&text), extract_error_locations(&text));
        }

        #[test]
        fn prop_extract_all_offsets_point_at_text(text in "[ -~]{0,120}") {
            for pattern in extract_all(&text) {
                prop_assert_eq!(&text[pattern.offset..pattern.offset + pattern.text.len()], pattern.text.as_str());
            }
        }

        #[test]
        fn prop_urls_never_contain_whitespace_or_quotes(text in "[ -~\t\n\u{a0}\u{202f}\u{2009}\u{3000}]{0,200}") {
            for url in extract_urls(&text) {
                prop_assert!(!url.chars().any(|c| c.is_whitespace() || c == '"' || c == '\''));
            }
        }
    }
}
