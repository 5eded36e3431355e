//! Table placeholder resolution.
//!
//! The backend writes `[TABLE:<title>]`, optionally framed by dash runs,
//! wherever a structured table belongs. Each placeholder is resolved
//! against the caller's dataset by exact title and replaced by an ordinal
//! marker that the block composer later swaps for the table block.

use regex::Regex;
use std::sync::LazyLock;

use super::markers;
use crate::model::{TableBlock, TableData};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(-*)\[TABLE:([^\]]+)\](-*)").expect("PLACEHOLDER: hardcoded regex is valid")
});

/// Result of resolving placeholders in one text.
#[derive(Debug, Clone, Default)]
pub(crate) struct ResolvedTables {
    /// Text with placeholders replaced by markers (or removed)
    pub text: String,
    /// Table blocks in encounter order; index equals marker ordinal
    pub blocks: Vec<TableBlock>,
    /// Titles that matched no dataset entry
    pub unresolved: Vec<String>,
}

/// Replace table placeholders in `text` with ordinal markers.
///
/// Lookup is by exact title; the first dataset entry with a matching title
/// wins. Unresolved placeholders are removed without a trace in the text.
pub(crate) fn resolve_tables(text: &str, tables: &[TableData]) -> ResolvedTables {
    let mut blocks = Vec::new();
    let mut unresolved = Vec::new();

    let marked = PLACEHOLDER.replace_all(text, |caps: &regex::Captures| {
        let title = &caps[2];

        match tables.iter().find(|table| table.title == title) {
            Some(table) => {
                let ordinal = blocks.len();
                blocks.push(
                    TableBlock::new(table.clone()).with_rules(!caps[1].is_empty(), !caps[3].is_empty()),
                );
                markers::table_marker(ordinal)
            }
            None => {
                log::warn!("Dropping table placeholder with no matching dataset: {:?}", title);
                unresolved.push(title.to_string());
                String::new()
            }
        }
    });

    if !blocks.is_empty() {
        log::debug!("Resolved {} table placeholders", blocks.len());
    }

    ResolvedTables {
        text: marked.into_owned(),
        blocks,
        unresolved,
    }
}
