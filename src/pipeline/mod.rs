//! Answer processing pipeline.
//!
//! Stages run in a fixed order, each consuming the text produced by the
//! previous one:
//!
//! 1. input cleanup (line endings, NFC, reserved code points)
//! 2. image extraction
//! 3. table placeholder resolution
//! 4. keyword decoration
//! 5. markup conversion
//! 6. block composition and sanitizing

mod cleanup;
mod compose;
mod images;
mod keywords;
mod markers;
mod markup;
mod options;
mod sanitize;
mod tables;

pub use options::{ProcessOptions, Theme, DEFAULT_MAX_INPUT_BYTES};
pub use sanitize::{sanitize, sanitize_with, ALLOWED_ATTRIBUTES, ALLOWED_TAGS, ALLOWED_URL_SCHEMES};

pub(crate) use images::is_image_url;
pub(crate) use keywords::has_keyword;

use crate::error::{Error, Result};
use crate::model::{ProcessedContent, TableData};

/// Runs the processing stages over one answer at a time.
///
/// A pipeline holds only its options, so one instance can be shared across
/// threads and reused for any number of answers.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: ProcessOptions,
}

impl Pipeline {
    /// Create a new pipeline with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline with the given options.
    pub fn with_options(options: ProcessOptions) -> Self {
        Self { options }
    }

    /// Get the options.
    pub fn options(&self) -> &ProcessOptions {
        &self.options
    }

    /// Process one raw answer against an optional table dataset.
    ///
    /// Malformed markdown, unknown table titles and unsafe markup never
    /// fail the call; the only error is an answer over the size limit.
    pub fn run(&self, raw: &str, tables: &[TableData]) -> Result<ProcessedContent> {
        let limit = self.options.max_input_bytes;
        if limit > 0 && raw.len() > limit {
            log::warn!("Rejecting answer of {} bytes (limit {})", raw.len(), limit);
            return Err(Error::InputTooLarge {
                len: raw.len(),
                limit,
            });
        }

        if raw.trim().is_empty() {
            return Ok(ProcessedContent::new());
        }

        let text = cleanup::normalize_input(raw);
        let (text, extracted_images) = images::extract_images(&text, &self.options.default_alt_text);

        let resolved = tables::resolve_tables(&text, tables);
        let text = if self.options.decorate_keywords {
            keywords::decorate_keywords(&resolved.text)
        } else {
            resolved.text
        };

        let converted = markup::convert_markup(&text, &self.options);
        let blocks = compose::compose_blocks(&converted.html, &resolved.blocks);

        log::debug!(
            "Processed answer: {} blocks, {} images, {} links",
            blocks.len(),
            extracted_images.len(),
            converted.links.len()
        );

        Ok(ProcessedContent {
            blocks,
            extracted_images,
            links: converted.links,
            unresolved_tables: resolved.unresolved,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentBlock;

    #[test]
    fn test_pipeline_stage_order() {
        let tables = vec![TableData::new("T").with_headers(["A"]).with_row(["1"])];
        let raw = "![Logo](https://x.com/logo.png)\n**Intro**\n---[TABLE:T]---\nPhone: 555\n\n---\n\nBye";
        let content = Pipeline::new().run(raw, &tables).unwrap();

        assert_eq!(content.extracted_images.len(), 1);
        assert_eq!(content.blocks.len(), 5);
        assert_eq!(content.blocks[0], ContentBlock::prose("<p><strong>Intro</strong></p>"));
        assert!(content.blocks[1].table().is_some_and(|t| t.rule_before && t.rule_after));
        assert!(content.blocks[2].html().is_some_and(|h| h.contains("animate-iconBounce")));
        assert!(content.blocks[3].is_rule());
        assert_eq!(content.blocks[4], ContentBlock::prose("<p>Bye</p>"));
    }

    #[test]
    fn test_keywords_can_be_disabled() {
        let pipeline = Pipeline::with_options(ProcessOptions::default().with_keywords(false));
        let content = pipeline.run("Phone: 555", &[]).unwrap();
        assert_eq!(content.blocks, vec![ContentBlock::prose("<p>Phone: 555</p>")]);
    }

    #[test]
    fn test_input_limit() {
        let pipeline = Pipeline::with_options(ProcessOptions::default().with_max_input_bytes(4));
        assert!(matches!(
            pipeline.run("too long", &[]),
            Err(Error::InputTooLarge { len: 8, limit: 4 })
        ));

        let unlimited = Pipeline::with_options(ProcessOptions::default().with_max_input_bytes(0));
        assert!(unlimited.run(&"a".repeat(2 * DEFAULT_MAX_INPUT_BYTES), &[]).is_ok());
    }

    #[test]
    fn test_whitespace_input() {
        let content = Pipeline::new().run(" \n\t ", &[]).unwrap();
        assert!(content.is_empty());
        assert!(content.extracted_images.is_empty());
    }

    #[test]
    fn test_forged_markers_are_inert() {
        let tables = vec![TableData::new("T")];
        let content = Pipeline::new().run("\u{E000}TABLE_0\u{E001}", &tables).unwrap();
        assert_eq!(content.table_count(), 0);
        assert_eq!(content.blocks, vec![ContentBlock::prose("<p>TABLE_0</p>")]);
    }
}
