//! Internal markers threaded through the text between stages.
//!
//! Markers are delimited by private-use code points. Input cleanup removes
//! those code points from the raw answer, so a marker can only originate
//! from the pipeline itself.

use regex::Regex;
use std::sync::LazyLock;

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';
const SHIELD_OPEN: char = '\u{E002}';
const SHIELD_CLOSE: char = '\u{E003}';

/// Marker standing in for a horizontal rule line.
pub(crate) const RULE_MARKER: &str = "\u{E000}HR_LINE\u{E001}";

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x{E000}(?:TABLE_(\d+)|HR_LINE)\x{E001}").expect("MARKER: hardcoded regex is valid")
});

static LINK_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\]\(([^)]+)\)").expect("LINK_TARGET: hardcoded regex is valid")
});

static SHIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x{E002}(\d+)\x{E003}").expect("SHIELD: hardcoded regex is valid")
});

/// Marker for the table with the given ordinal.
pub(crate) fn table_marker(ordinal: usize) -> String {
    format!("{}TABLE_{}{}", OPEN, ordinal, CLOSE)
}

/// Token standing in for a shielded span.
pub(crate) fn shield_token(index: usize) -> String {
    format!("{}{}{}", SHIELD_OPEN, index, SHIELD_CLOSE)
}

/// Replace every `](target)` link target with a shield token.
///
/// Returns the shielded text and the targets, indexed by token.
pub(crate) fn shield_link_targets(text: &str) -> (String, Vec<String>) {
    let mut targets = Vec::new();
    let shielded = LINK_TARGET
        .replace_all(text, |caps: &regex::Captures| {
            let token = shield_token(targets.len());
            targets.push(caps[1].to_string());
            format!("]({})", token)
        })
        .into_owned();
    (shielded, targets)
}

/// Replace shield tokens with the spans they stand for.
pub(crate) fn unshield(text: &str, spans: &[String]) -> String {
    SHIELD
        .replace_all(text, |caps: &regex::Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|i| spans.get(i))
                .cloned()
                .unwrap_or_default()
        })
        .into_owned()
}

/// Remove every reserved code point from input text.
pub(crate) fn strip_reserved(text: &str) -> String {
    text.chars()
        .filter(|&c| !matches!(c, OPEN | CLOSE | SHIELD_OPEN | SHIELD_CLOSE))
        .collect()
}

/// A piece of marked text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    /// Ordinary text between markers
    Text(&'a str),
    /// Table marker with its ordinal
    Table(usize),
    /// Horizontal rule marker
    Rule,
}

/// Split marked text into text and marker segments, in order.
pub(crate) fn split(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in MARKER.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            segments.push(Segment::Text(&text[last..whole.start()]));
        }

        match caps.get(1) {
            Some(ordinal) => {
                if let Ok(n) = ordinal.as_str().parse() {
                    segments.push(Segment::Table(n));
                }
            }
            None => segments.push(Segment::Rule),
        }
        last = whole.end();
    }

    if last < text.len() {
        segments.push(Segment::Text(&text[last..]));
    }

    segments
}

/// Apply `f` to every text segment, leaving markers untouched.
pub(crate) fn map_text<F>(text: &str, mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut output = String::with_capacity(text.len());
    let mut last = 0;

    for whole in MARKER.find_iter(text) {
        output.push_str(&f(&text[last..whole.start()]));
        output.push_str(whole.as_str());
        last = whole.end();
    }
    output.push_str(&f(&text[last..]));

    output
}
