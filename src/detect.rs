//! Content feature detection.
//!
//! A quick look at a raw answer before processing, used for diagnostics
//! (`chatfmt info`) and by hosts that want to skip the pipeline for plain
//! text answers.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::pipeline::{has_keyword, is_image_url};

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"</?[a-zA-Z][a-zA-Z0-9]*(?:\s[^<>]*)?/?>").expect("HTML_TAG: hardcoded regex is valid")
});

static MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^!])\[[^\]]+\]\([^)]+\)").expect("MARKDOWN_LINK: hardcoded regex is valid")
});

static BULLET_POINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\s*\*\*").expect("BULLET_POINT: hardcoded regex is valid"));

static TABLE_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[TABLE:[^\]]+\]").expect("TABLE_PLACEHOLDER: hardcoded regex is valid")
});

static MARKDOWN_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[[^\]]*\]\([^)]+\)").expect("MARKDOWN_IMAGE: hardcoded regex is valid")
});

/// Markup features found in a raw answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFeatures {
    /// Raw HTML tags are present
    pub has_html_tags: bool,
    /// Markdown links (`[text](url)`) are present
    pub has_markdown_links: bool,
    /// Run-on `* **Label**` bullets are present
    pub has_bullet_points: bool,
    /// Table placeholders are present
    pub has_table_placeholders: bool,
    /// Markdown images or bare image URLs are present
    pub has_images: bool,
    /// Decoratable `Label:` keywords are present
    pub has_keywords: bool,
}

impl ContentFeatures {
    /// Detect the features of a raw answer.
    ///
    /// # Example
    /// ```
    /// use chatfmt::detect::ContentFeatures;
    ///
    /// let features = ContentFeatures::detect("Phone: 555\n[TABLE:Prices]");
    /// assert!(features.has_keywords);
    /// assert!(features.has_table_placeholders);
    /// assert!(!features.has_images);
    /// ```
    pub fn detect(raw: &str) -> Self {
        Self {
            has_html_tags: HTML_TAG.is_match(raw),
            has_markdown_links: MARKDOWN_LINK.is_match(raw),
            has_bullet_points: BULLET_POINT.is_match(raw),
            has_table_placeholders: TABLE_PLACEHOLDER.is_match(raw),
            has_images: MARKDOWN_IMAGE.is_match(raw) || raw.split_whitespace().any(is_bare_image_url),
            has_keywords: has_keyword(raw),
        }
    }

    /// Check if the answer is plain text with nothing to convert.
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// Names of the detected features.
    pub fn names(&self) -> Vec<&'static str> {
        [
            (self.has_html_tags, "html"),
            (self.has_markdown_links, "links"),
            (self.has_bullet_points, "bullets"),
            (self.has_table_placeholders, "tables"),
            (self.has_images, "images"),
            (self.has_keywords, "keywords"),
        ]
        .into_iter()
        .filter_map(|(present, name)| present.then_some(name))
        .collect()
    }
}

fn is_bare_image_url(word: &str) -> bool {
    let lower = word.to_ascii_lowercase();
    (lower.starts_with("http://") || lower.starts_with("https://")) && is_image_url(word)
}
