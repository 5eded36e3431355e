//! Rendering result with statistics.

use crate::model::ProcessedContent;
use serde::{Deserialize, Serialize};

/// Result of rendering content, including statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered output (HTML or text)
    pub content: String,

    /// Content statistics
    pub stats: ContentStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: ContentStats) -> Self {
        Self { content, stats }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics about a processed answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStats {
    /// Number of prose blocks
    pub prose_count: u32,

    /// Number of table blocks
    pub table_count: u32,

    /// Number of horizontal rules
    pub rule_count: u32,

    /// Number of extracted images
    pub image_count: u32,

    /// Number of inline links
    pub link_count: u32,

    /// Number of placeholders that matched no table
    pub unresolved_table_count: u32,

    /// Approximate word count of the plain-text projection
    pub word_count: u32,

    /// Non-whitespace character count of the plain-text projection
    pub char_count: u32,
}

impl ContentStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics from processed content.
    pub fn from_content(content: &ProcessedContent) -> Self {
        let mut stats = Self {
            prose_count: content.prose_count() as u32,
            table_count: content.table_count() as u32,
            rule_count: content.rule_count() as u32,
            image_count: content.extracted_images.len() as u32,
            link_count: content.links.len() as u32,
            unresolved_table_count: content.unresolved_tables.len() as u32,
            ..Self::default()
        };
        stats.count_text(&content.plain_text());
        stats
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Total number of blocks.
    pub fn block_count(&self) -> u32 {
        self.prose_count + self.table_count + self.rule_count
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ContentStats) {
        self.prose_count += other.prose_count;
        self.table_count += other.table_count;
        self.rule_count += other.rule_count;
        self.image_count += other.image_count;
        self.link_count += other.link_count;
        self.unresolved_table_count += other.unresolved_table_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
