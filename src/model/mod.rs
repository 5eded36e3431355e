//! Content model types for processed answers.
//!
//! This module defines what the pipeline consumes (table datasets, file
//! links) and what it produces (blocks, extracted images, links). The
//! model is presentation-agnostic; renderers in [`crate::render`] and
//! external UIs consume it.

mod block;
mod image;
mod link;
mod table;

pub use block::{ContentBlock, InlineLink, ProcessedContent};
pub(crate) use block::html_to_text;
pub use image::{ExtractedImage, DEFAULT_ALT_TEXT};
pub use link::{FileLink, LinkCleaner};
pub use table::{tables_from_json, TableBlock, TableData};
