//! File links delivered next to an answer.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static TRAILING_PARENTHETICAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\([^)]*\)\s*$").expect("TRAILING_PARENTHETICAL: hardcoded regex is valid")
});

static PIPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\|\s*").expect("PIPE: hardcoded regex is valid"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE: hardcoded regex is valid"));

/// A document link returned by the chat backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLink {
    /// Raw title, often a page title with site suffixes
    pub title: String,

    /// Link target
    pub url: String,
}

impl FileLink {
    /// Create a new file link.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// Get the cleaned display title.
    pub fn display_title(&self, cleaner: &LinkCleaner) -> String {
        cleaner.clean(&self.title)
    }
}

/// Derives short display titles from raw page titles.
#[derive(Debug, Clone)]
pub struct LinkCleaner {
    site_name: Option<String>,
    site_suffix: Option<Regex>,
    dashed_site_suffix: Option<Regex>,
    max_len: usize,
}

impl LinkCleaner {
    /// Create a cleaner with no site name and the default length limit.
    pub fn new() -> Self {
        Self {
            site_name: None,
            site_suffix: None,
            dashed_site_suffix: None,
            max_len: 60,
        }
    }

    /// Set the site name stripped from title suffixes.
    pub fn with_site_name(mut self, site: impl Into<String>) -> Self {
        let site = site.into();
        let pattern = WHITESPACE.replace_all(regex::escape(site.trim()).as_str(), r"\s*").into_owned();
        self.site_suffix = Regex::new(&format!(r"(?i)\|\s*{}.*$", pattern)).ok();
        self.dashed_site_suffix = Regex::new(&format!(r"(?i)\s*-\s*{}.*$", pattern)).ok();
        self.site_name = Some(site);
        self
    }

    /// Set the length above which titles are shortened.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Clean a raw title for display.
    pub fn clean(&self, title: &str) -> String {
        let mut cleaned = TRAILING_PARENTHETICAL.replace(title, "").into_owned();

        if let Some(ref suffix) = self.site_suffix {
            cleaned = suffix.replace(&cleaned, "").into_owned();
        }

        cleaned = PIPE.replace_all(&cleaned, " - ").into_owned();
        cleaned = WHITESPACE.replace_all(&cleaned, " ").trim().to_string();

        if cleaned.chars().count() > self.max_len || self.has_repeated_site(&cleaned) {
            cleaned = self.shorten(&cleaned);
        }

        cleaned
    }

    fn has_repeated_site(&self, text: &str) -> bool {
        self.site_name
            .as_ref()
            .is_some_and(|site| text.contains(&site.repeat(2)))
    }

    fn shorten(&self, text: &str) -> String {
        if let Some(ref suffix) = self.dashed_site_suffix {
            let stripped = suffix.replace(text, "").trim().to_string();
            if !stripped.is_empty() && stripped.chars().count() <= self.max_len {
                return stripped;
            }
        }

        let first = text.split(['-', '|']).next().unwrap_or(text).trim();
        if first.is_empty() {
            text.to_string()
        } else {
            first.to_string()
        }
    }
}

impl Default for LinkCleaner {
    fn default() -> Self {
        Self::new()
    }
}
