//! Text cleanup applied before and after conversion.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

use super::markers;

static EXTRA_BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n\s*\n\s*\n").expect("EXTRA_BLANK_LINES: hardcoded regex is valid")
});

/// Normalize raw answer text before extraction.
///
/// Line endings become `\n`, text is NFC-normalized and reserved marker
/// code points are removed.
pub(crate) fn normalize_input(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let normalized: String = unified.nfc().collect();
    markers::strip_reserved(&normalized)
}

/// Collapse three or more consecutive line breaks (with only whitespace
/// between them) into a single blank line and trim the result.
pub(crate) fn collapse_blank_lines(text: &str) -> String {
    let mut result = text.to_string();
    // A single pass leaves overlapping runs behind.
    while EXTRA_BLANK_LINES.is_match(&result) {
        result = EXTRA_BLANK_LINES.replace_all(&result, "\n\n").into_owned();
    }
    result.trim().to_string()
}
