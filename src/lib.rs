//! # chatfmt
//!
//! Turns free-form chatbot answers into safe, structured, renderable blocks.
//!
//! Answers mix lightweight markdown, raw HTML fragments, image references,
//! table placeholders (`[TABLE:<title>]`) and contact labels. This library
//! runs them through a fixed pipeline and returns prose, table and rule
//! blocks in reading order, plus the images found along the way.
//!
//! ## Quick Start
//!
//! ```
//! use chatfmt::{process, render, TableData};
//!
//! fn main() -> chatfmt::Result<()> {
//!     let tables = vec![TableData::new("Prices")
//!         .with_headers(["Item", "Cost"])
//!         .with_row(["Tea", "$2"])];
//!
//!     let content = process("**Menu**\n\n---[TABLE:Prices]---", false, &tables)?;
//!     assert_eq!(content.blocks.len(), 2);
//!
//!     let html = render::to_html(&content, &render::RenderOptions::default())?;
//!     println!("{}", html);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Ordered blocks**: prose, tables and rules come out in reading order
//! - **Sanitized output**: every prose block passes an allow-list sanitizer
//! - **Image extraction**: markdown images and bare image URLs, de-duplicated
//! - **Light and dark themes**: all generated classes come from one `Theme`
//! - **Parallel batches**: uses Rayon for many answers at once

pub mod detect;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use detect::ContentFeatures;
pub use error::{Error, Result};
pub use model::{
    tables_from_json, ContentBlock, ExtractedImage, FileLink, InlineLink, LinkCleaner,
    ProcessedContent, TableBlock, TableData,
};
pub use pipeline::{sanitize, sanitize_with, Pipeline, ProcessOptions, Theme};
pub use render::{ContentStats, DocumentMeta, JsonFormat, RenderOptions, TableStyle};

use serde::{Deserialize, Serialize};

/// Process one raw answer.
///
/// # Arguments
///
/// * `raw` - The answer text as received from the backend
/// * `dark_mode` - Use dark-theme classes for generated markup
/// * `tables` - Table dataset that placeholders are resolved against
///
/// # Example
///
/// ```
/// use chatfmt::process;
///
/// let content = process("**Bold** and *italic*", false, &[]).unwrap();
/// assert_eq!(content.blocks[0].html(), Some("<p><strong>Bold</strong> and <em>italic</em></p>"));
/// ```
pub fn process(raw: &str, dark_mode: bool, tables: &[TableData]) -> Result<ProcessedContent> {
    let options = ProcessOptions::new().with_dark_mode(dark_mode);
    process_with_options(raw, tables, &options)
}

/// Process one raw answer with custom options.
///
/// # Example
///
/// ```
/// use chatfmt::{process_with_options, ProcessOptions};
///
/// let options = ProcessOptions::dark().with_keywords(false);
/// let content = process_with_options("Phone: 555", &[], &options).unwrap();
/// assert!(!content.blocks[0].html().unwrap().contains("animate-icon"));
/// ```
pub fn process_with_options(
    raw: &str,
    tables: &[TableData],
    options: &ProcessOptions,
) -> Result<ProcessedContent> {
    Pipeline::with_options(options.clone()).run(raw, tables)
}

/// One answer together with the tables its placeholders refer to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerInput {
    /// Raw answer text
    pub answer: String,

    /// Table dataset for this answer
    #[serde(default)]
    pub tables: Vec<TableData>,
}

impl AnswerInput {
    /// Create an input without tables.
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            tables: Vec::new(),
        }
    }

    /// Attach a table dataset.
    pub fn with_tables(mut self, tables: Vec<TableData>) -> Self {
        self.tables = tables;
        self
    }
}

/// Process many answers, in parallel when enabled.
///
/// Results are returned in input order; one failing answer does not
/// affect the others.
pub fn process_batch(inputs: &[AnswerInput], options: &ProcessOptions) -> Vec<Result<ProcessedContent>> {
    let pipeline = Pipeline::with_options(options.clone());
    let run = |input: &AnswerInput| pipeline.run(&input.answer, &input.tables);

    #[cfg(feature = "parallel")]
    if options.parallel {
        use rayon::prelude::*;
        return inputs.par_iter().map(run).collect();
    }

    inputs.iter().map(run).collect()
}

/// Builder for processing and rendering answers.
///
/// # Example
///
/// ```
/// use chatfmt::{ChatFormatter, TableData};
///
/// let html = ChatFormatter::new()
///     .dark_mode(true)
///     .with_tables(vec![TableData::new("Hours").with_row(["Mon", "9-5"])])
///     .format("Open hours:\n[TABLE:Hours]")?
///     .to_html()?;
/// assert!(html.contains("Hours"));
/// # Ok::<(), chatfmt::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChatFormatter {
    process_options: ProcessOptions,
    render_options: RenderOptions,
    tables: Vec<TableData>,
}

impl ChatFormatter {
    /// Create a new formatter builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the dark or light theme for processing and rendering.
    pub fn dark_mode(mut self, dark_mode: bool) -> Self {
        self.process_options = self.process_options.with_dark_mode(dark_mode);
        self.render_options = self.render_options.with_dark_mode(dark_mode);
        self
    }

    /// Set the table dataset.
    pub fn with_tables(mut self, tables: Vec<TableData>) -> Self {
        self.tables = tables;
        self
    }

    /// Enable or disable keyword icons.
    pub fn with_keywords(mut self, decorate: bool) -> Self {
        self.process_options = self.process_options.with_keywords(decorate);
        self
    }

    /// Enable or disable list detection.
    pub fn with_lists(mut self, detect: bool) -> Self {
        self.process_options = self.process_options.with_lists(detect);
        self
    }

    /// Set the input size limit in bytes (0 = unlimited).
    pub fn with_max_input_bytes(mut self, limit: usize) -> Self {
        self.process_options = self.process_options.with_max_input_bytes(limit);
        self
    }

    /// Enable or disable the image gallery in rendered output.
    pub fn with_images(mut self, include: bool) -> Self {
        self.render_options = self.render_options.with_images(include);
        self
    }

    /// Set the table style for rendered output.
    pub fn with_table_style(mut self, style: TableStyle) -> Self {
        self.render_options = self.render_options.with_table_style(style);
        self
    }

    /// Process an answer and return a result wrapper.
    pub fn format(&self, raw: &str) -> Result<FormattedAnswer> {
        let content = process_with_options(raw, &self.tables, &self.process_options)?;
        Ok(FormattedAnswer {
            content,
            render_options: self.render_options.clone(),
        })
    }
}

/// Result of formatting an answer.
#[derive(Debug, Clone)]
pub struct FormattedAnswer {
    /// The processed content
    pub content: ProcessedContent,
    /// Render options to use
    render_options: RenderOptions,
}

impl FormattedAnswer {
    /// Render to an HTML fragment.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.content, &self.render_options)
    }

    /// Render to a standalone HTML page.
    pub fn to_html_document(&self, meta: &DocumentMeta) -> Result<String> {
        render::to_html_document(&self.content, &self.render_options, meta)
    }

    /// Render to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.content, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.content, format)
    }

    /// Collect statistics.
    pub fn stats(&self) -> ContentStats {
        ContentStats::from_content(&self.content)
    }

    /// Get the processed content.
    pub fn content(&self) -> &ProcessedContent {
        &self.content
    }
}
