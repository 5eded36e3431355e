//! Rendering module for turning processed answers into output formats.

mod html;
mod json;
mod options;
mod result;
pub mod streaming;
mod text;
pub mod visitor;

pub use html::{
    to_html, to_html_document, to_html_with_stats, to_html_with_visitor, DocumentMeta, HtmlRenderer,
};
pub use json::{to_json, JsonFormat};
pub use options::{RenderOptions, TableStyle};
pub use result::{ContentStats, RenderResult};
pub use streaming::{collect_content, RenderEvent, StreamingRenderer};
pub use text::to_text;
pub use visitor::{
    BlockVisitor, CompositeVisitor, CountingVisitor, DefaultVisitor, SimpleTableVisitor,
    SkipImagesVisitor, SkipRulesVisitor, SkipTablesVisitor, VisitorAction,
};
