//! Entry Structurer — splits one free-text résumé entry into title, date and description blocks.
//!
//! Input is whatever the extraction service put in a multi-line field:
//!
//! ```text
//! Bachelor of Science [2019 - 2023]
//! CGPA: 3.8
//! Relevant coursework in X
//! ```
//!
//! Line 0 is the title line. The first `[...]` token on it is the date, unless
//! it holds the `DNS` ("date not specified") placeholder. The remaining lines are
//! grouped into blocks by an ordered table of point rules; education entries
//! additionally split grade/score lines into standalone blocks.
//!
//! The heuristics are approximate. They never fail and never touch content
//! beyond line and bracket boundaries, so inline markup passes through as-is.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Placeholder the extraction service writes when a date could not be found.
const DATE_PLACEHOLDER: &str = "DNS";

/// Title keywords (lowercase) that mark an entry as education.
const EDUCATION_TITLE_KEYWORDS: &[&str] = &["degree", "education", "university", "college", "school"];

/// Degree names that mark an education entry on their own, e.g. `Bachelor of Science`.
const DEGREE_NAMES: &[&str] = &[
    "bachelor",
    "masters?",
    "ph\\.?d",
    "doctorate",
    "diploma",
    "b\\.?sc",
    "m\\.?sc",
    "b\\.?tech",
    "m\\.?tech",
    "mba",
];

/// Verbs and headings (lowercase) that open a new description point.
const POINT_KEYWORDS: &[&str] = &[
    "achieved",
    "developed",
    "created",
    "managed",
    "led",
    "implemented",
    "designed",
    "responsible",
    "skills",
    "specialized",
    "worked",
    "built",
];

const BULLET_MARKERS: [char; 3] = ['-', '•', '*'];

static DATE_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]").expect("date token pattern is valid"));

static DEGREE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b", DEGREE_NAMES.join("|")))
        .expect("degree name pattern is valid")
});

static EDUCATION_POINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"CGPA|GPA|Grade|Result|Score|\d\.\d").expect("education point pattern is valid")
});

static ENUMERATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]").expect("enumerator pattern is valid"));

// Capital first letter, then a ':' or '-' before any sentence-ending punctuation.
static CAPITALIZED_COLON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{Lu}[^.!?]*[:\-]").expect("heading pattern is valid"));

static KEYWORD_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^(?:{})\b", POINT_KEYWORDS.join("|")))
        .expect("keyword pattern is valid")
});

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Display-ready decomposition of one multi-line résumé entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredEntry {
    pub title: String,
    pub date: Option<String>,
    pub blocks: Vec<String>,
}

#[cfg(test)]
impl StructuredEntry {
    /// Serializes the entry back into the multi-line form it was parsed from.
    ///
    /// The date is re-attached as a bracket token. If the title already carries
    /// a `[` the token is put in front so it stays the first bracket group.
    /// Block boundaries are not guaranteed to survive a second pass.
    fn to_content(&self) -> String {
        let mut content = match &self.date {
            Some(date) if self.title.contains('[') => format!("[{date}] {}", self.title),
            Some(date) => format!("{} [{date}]", self.title),
            None => self.title.clone(),
        };
        for block in &self.blocks {
            content.push('\n');
            content.push_str(block);
        }
        content
    }
}

/// Heuristics that decide a description line opens a new point.
/// Evaluated in `ORDERED` order; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointRule {
    /// `- `, `• `, `* `
    BulletMarker,
    /// `1.` or `1)`
    Enumerator,
    /// `Tech stack: ...`, `Backend - ...`
    CapitalizedColon,
    /// `Developed ...`, `Led ...`
    KeywordStart,
}

impl PointRule {
    pub const ORDERED: [PointRule; 4] = [
        PointRule::BulletMarker,
        PointRule::Enumerator,
        PointRule::CapitalizedColon,
        PointRule::KeywordStart,
    ];

    pub fn matches(self, line: &str) -> bool {
        match self {
            PointRule::BulletMarker => line.starts_with(BULLET_MARKERS),
            PointRule::Enumerator => ENUMERATOR_RE.is_match(line),
            PointRule::CapitalizedColon => CAPITALIZED_COLON_RE.is_match(line),
            PointRule::KeywordStart => KEYWORD_START_RE.is_match(line),
        }
    }
}

/// First point rule matching `line`, if any.
pub fn matching_point_rule(line: &str) -> Option<PointRule> {
    PointRule::ORDERED.into_iter().find(|rule| rule.matches(line))
}

/// What the grouping loop does with one description line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineAction {
    /// Flush the open group and emit the line as its own block.
    Standalone,
    /// Flush the open group and open a new one with the line.
    StartPoint,
    /// Append the line to the open group.
    Continue,
}

// ────────────────────────────────────────────────────────────────────────────
// Structuring
// ────────────────────────────────────────────────────────────────────────────

/// Structures one résumé entry. Blank input yields `None`.
///
/// Leading blank lines are skipped, so the title line is the first line with content.
pub fn structure_entry(content: &str) -> Option<StructuredEntry> {
    let mut lines = content.lines().skip_while(|l| l.trim().is_empty());
    let title_line = lines.next()?;

    let (title, date) = split_title(title_line);
    let is_education = is_education_title(title_line);
    let blocks = group_description_lines(lines, is_education);

    Some(StructuredEntry {
        title,
        date,
        blocks,
    })
}

/// Removes the first bracket token from the title line and returns it as the date.
fn split_title(line: &str) -> (String, Option<String>) {
    let line = line.trim();
    let Some(caps) = DATE_TOKEN_RE.captures(line) else {
        return (line.to_string(), None);
    };
    let (Some(token), Some(inner)) = (caps.get(0), caps.get(1)) else {
        return (line.to_string(), None);
    };

    let title = join_around(&line[..token.start()], &line[token.end()..]);
    if title.is_empty() {
        // The bracket is all there is; keep it as the title.
        return (line.to_string(), None);
    }

    let inner = inner.as_str().trim();
    let date = if inner.is_empty() || inner.contains(DATE_PLACEHOLDER) {
        None
    } else {
        Some(inner.to_string())
    };
    (title, date)
}

/// Joins the text on either side of a removed token with a single space.
fn join_around(before: &str, after: &str) -> String {
    let before = before.trim_end();
    let after = after.trim_start();
    match (before.is_empty(), after.is_empty()) {
        (true, _) => after.trim_end().to_string(),
        (_, true) => before.trim_start().to_string(),
        _ => format!("{} {}", before.trim_start(), after.trim_end()),
    }
}

fn is_education_title(line: &str) -> bool {
    let lower = line.to_lowercase();
    EDUCATION_TITLE_KEYWORDS.iter().any(|kw| lower.contains(kw)) || DEGREE_NAME_RE.is_match(line)
}

fn is_education_point(line: &str) -> bool {
    EDUCATION_POINT_RE.is_match(line)
}

/// Education points take precedence over the point rules.
fn classify_line(line: &str, is_education: bool, group_is_empty: bool) -> LineAction {
    if is_education && is_education_point(line) {
        LineAction::Standalone
    } else if group_is_empty || matching_point_rule(line).is_some() {
        LineAction::StartPoint
    } else {
        LineAction::Continue
    }
}

fn group_description_lines<'a>(
    lines: impl Iterator<Item = &'a str>,
    is_education: bool,
) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();

    for line in lines.map(str::trim).filter(|l| !l.is_empty()) {
        match classify_line(line, is_education, current.is_empty()) {
            LineAction::Standalone => {
                flush(&mut blocks, &mut current);
                blocks.push(line.to_string());
            }
            LineAction::StartPoint => {
                flush(&mut blocks, &mut current);
                current.push_str(line);
            }
            LineAction::Continue => {
                current.push(' ');
                current.push_str(line);
            }
        }
    }
    flush(&mut blocks, &mut current);

    blocks
}

fn flush(blocks: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        blocks.push(std::mem::take(current));
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
