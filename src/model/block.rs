//! Block-level output types.

use super::{ExtractedImage, TableBlock};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("TAG: hardcoded regex is valid"));

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(?:p|h[1-6]|li|ul|ol|blockquote|pre)>")
        .expect("LINE_BREAK: hardcoded regex is valid")
});

/// One unit of renderable content, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Sanitized HTML prose
    Prose {
        /// The sanitized fragment
        html: String,
    },

    /// A resolved table placeholder
    Table(TableBlock),

    /// A horizontal rule
    Rule,
}

impl ContentBlock {
    /// Create a prose block from an already sanitized fragment.
    pub fn prose(html: impl Into<String>) -> Self {
        ContentBlock::Prose { html: html.into() }
    }

    /// Check if this is a prose block.
    pub fn is_prose(&self) -> bool {
        matches!(self, ContentBlock::Prose { .. })
    }

    /// Check if this is a table block.
    pub fn is_table(&self) -> bool {
        matches!(self, ContentBlock::Table(_))
    }

    /// Check if this is a horizontal rule.
    pub fn is_rule(&self) -> bool {
        matches!(self, ContentBlock::Rule)
    }

    /// Get the sanitized HTML of a prose block.
    pub fn html(&self) -> Option<&str> {
        match self {
            ContentBlock::Prose { html } => Some(html),
            _ => None,
        }
    }

    /// Get the table of a table block.
    pub fn table(&self) -> Option<&TableBlock> {
        match self {
            ContentBlock::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            ContentBlock::Prose { html } => html_to_text(html),
            ContentBlock::Table(block) => block.table.plain_text(),
            ContentBlock::Rule => String::new(),
        }
    }
}

/// A markdown link converted to an anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineLink {
    /// Link text as written in the answer
    pub text: String,

    /// Link target as written in the answer
    pub url: String,
}

impl InlineLink {
    /// Create a new inline link.
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

/// The result of running one answer through the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedContent {
    /// Renderable blocks in reading order
    pub blocks: Vec<ContentBlock>,

    /// Images pulled out of the text, unique by URL
    pub extracted_images: Vec<ExtractedImage>,

    /// Links converted to anchors, in order of appearance
    #[serde(default)]
    pub links: Vec<InlineLink>,

    /// Titles of table placeholders that matched no dataset entry
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unresolved_tables: Vec<String>,
}

impl ProcessedContent {
    /// Create a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.extracted_images.is_empty()
    }

    /// Get the number of prose blocks.
    pub fn prose_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_prose()).count()
    }

    /// Get the number of table blocks.
    pub fn table_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_table()).count()
    }

    /// Get the number of rule blocks.
    pub fn rule_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_rule()).count()
    }

    /// Get plain text projection of all blocks.
    ///
    /// Intended for progressive word-by-word reveal in a UI.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(ContentBlock::plain_text)
            .filter(|text| !text.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Strip tags from a sanitized fragment and decode its entities.
pub(crate) fn html_to_text(html: &str) -> String {
    let with_breaks = LINE_BREAK.replace_all(html, "\n");
    let stripped = TAG.replace_all(&with_breaks, "");
    let decoded = html_escape::decode_html_entities(&stripped);

    decoded
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
