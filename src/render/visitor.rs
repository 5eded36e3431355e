//! Visitor pattern for customizing block rendering.
//!
//! A visitor is consulted before each block is rendered and can keep the
//! default output, replace it, or drop the block entirely.
//!
//! # Example
//!
//! ```
//! use chatfmt::model::TableBlock;
//! use chatfmt::render::visitor::{BlockVisitor, VisitorAction};
//!
//! struct TableLinkVisitor;
//!
//! impl BlockVisitor for TableLinkVisitor {
//!     fn visit_table(&mut self, table: &TableBlock) -> VisitorAction {
//!         VisitorAction::Replace(format!("<p>See table: {}</p>", table.table.title))
//!     }
//! }
//! ```

use html_escape::encode_text;

use crate::model::{ExtractedImage, TableBlock};

/// Action returned by visitor methods to control rendering behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VisitorAction {
    /// Continue with default rendering.
    #[default]
    Continue,

    /// Replace the block with custom output.
    Replace(String),

    /// Skip this block entirely (produce no output).
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the block should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action provides replacement content.
    pub fn is_replace(&self) -> bool {
        matches!(self, VisitorAction::Replace(_))
    }

    /// Get replacement content if available.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            VisitorAction::Replace(s) => Some(s),
            _ => None,
        }
    }
}

/// Trait for visiting blocks during rendering.
///
/// All methods return `VisitorAction::Continue` by default.
pub trait BlockVisitor: Send + Sync {
    /// Called before rendering a prose block with its sanitized HTML.
    fn visit_prose(&mut self, html: &str) -> VisitorAction {
        let _ = html;
        VisitorAction::Continue
    }

    /// Called before rendering a table block.
    fn visit_table(&mut self, table: &TableBlock) -> VisitorAction {
        let _ = table;
        VisitorAction::Continue
    }

    /// Called before rendering a horizontal rule.
    fn visit_rule(&mut self) -> VisitorAction {
        VisitorAction::Continue
    }

    /// Called for each extracted image when the gallery is rendered.
    /// Only `Skip` has an effect here.
    fn visit_image(&mut self, image: &ExtractedImage) -> VisitorAction {
        let _ = image;
        VisitorAction::Continue
    }

    /// Called once before the first block.
    fn on_start(&mut self, block_count: usize) {
        let _ = block_count;
    }

    /// Called once after the last block.
    fn on_end(&mut self) {}
}

/// Default visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl BlockVisitor for DefaultVisitor {}

/// Visitor that skips all table blocks.
#[derive(Debug, Clone, Default)]
pub struct SkipTablesVisitor;

impl BlockVisitor for SkipTablesVisitor {
    fn visit_table(&mut self, _table: &TableBlock) -> VisitorAction {
        VisitorAction::Skip
    }
}

/// Visitor that skips all horizontal rules.
#[derive(Debug, Clone, Default)]
pub struct SkipRulesVisitor;

impl BlockVisitor for SkipRulesVisitor {
    fn visit_rule(&mut self) -> VisitorAction {
        VisitorAction::Skip
    }
}

/// Visitor that drops every image from the gallery.
#[derive(Debug, Clone, Default)]
pub struct SkipImagesVisitor;

impl BlockVisitor for SkipImagesVisitor {
    fn visit_image(&mut self, _image: &ExtractedImage) -> VisitorAction {
        VisitorAction::Skip
    }
}

/// Visitor that renders tables as a simple pipe-separated list.
#[derive(Debug, Clone, Default)]
pub struct SimpleTableVisitor;

impl BlockVisitor for SimpleTableVisitor {
    fn visit_table(&mut self, table: &TableBlock) -> VisitorAction {
        let data = &table.table;
        let mut output = format!("<p><strong>{}</strong></p>\n<pre>", encode_text(&data.title));
        if !data.headers.is_empty() {
            output.push_str(&encode_text(&data.headers.join(" | ")));
            output.push('\n');
        }
        for row in &data.rows {
            output.push_str(&encode_text(&row.join(" | ")));
            output.push('\n');
        }
        output.push_str("</pre>");
        VisitorAction::Replace(output)
    }
}

/// Visitor that counts the blocks it sees without changing anything.
#[derive(Debug, Clone, Default)]
pub struct CountingVisitor {
    /// Prose blocks visited
    pub prose: usize,
    /// Table blocks visited
    pub tables: usize,
    /// Rules visited
    pub rules: usize,
}

impl BlockVisitor for CountingVisitor {
    fn visit_prose(&mut self, _html: &str) -> VisitorAction {
        self.prose += 1;
        VisitorAction::Continue
    }

    fn visit_table(&mut self, _table: &TableBlock) -> VisitorAction {
        self.tables += 1;
        VisitorAction::Continue
    }

    fn visit_rule(&mut self) -> VisitorAction {
        self.rules += 1;
        VisitorAction::Continue
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn BlockVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: BlockVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    fn first_action<F>(&mut self, mut visit: F) -> VisitorAction
    where
        F: FnMut(&mut Box<dyn BlockVisitor>) -> VisitorAction,
    {
        for visitor in &mut self.visitors {
            let action = visit(visitor);
            if action != VisitorAction::Continue {
                return action;
            }
        }
        VisitorAction::Continue
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockVisitor for CompositeVisitor {
    fn visit_prose(&mut self, html: &str) -> VisitorAction {
        self.first_action(|visitor| visitor.visit_prose(html))
    }

    fn visit_table(&mut self, table: &TableBlock) -> VisitorAction {
        self.first_action(|visitor| visitor.visit_table(table))
    }

    fn visit_rule(&mut self) -> VisitorAction {
        self.first_action(|visitor| visitor.visit_rule())
    }

    fn visit_image(&mut self, image: &ExtractedImage) -> VisitorAction {
        self.first_action(|visitor| visitor.visit_image(image))
    }

    fn on_start(&mut self, block_count: usize) {
        for visitor in &mut self.visitors {
            visitor.on_start(block_count);
        }
    }

    fn on_end(&mut self) {
        for visitor in &mut self.visitors {
            visitor.on_end();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableData;

    fn table() -> TableBlock {
        TableBlock::new(
            TableData::new("Prices")
                .with_headers(["Item", "Cost"])
                .with_row(["Tea", "<3"]),
        )
    }

    #[test]
    fn test_visitor_action_default() {
        assert_eq!(VisitorAction::default(), VisitorAction::Continue);
    }

    #[test]
    fn test_visitor_action_should_skip() {
        assert!(!VisitorAction::Continue.should_skip());
        assert!(!VisitorAction::Replace("test".into()).should_skip());
        assert!(VisitorAction::Skip.should_skip());
    }

    #[test]
    fn test_visitor_action_replacement() {
        assert!(VisitorAction::Continue.replacement().is_none());
        assert!(VisitorAction::Skip.replacement().is_none());
        assert_eq!(VisitorAction::Replace("hello".into()).replacement(), Some("hello"));
    }

    #[test]
    fn test_default_visitor() {
        let mut visitor = DefaultVisitor::new();
        assert_eq!(visitor.visit_prose("<p>x</p>"), VisitorAction::Continue);
        assert_eq!(visitor.visit_rule(), VisitorAction::Continue);
    }

    #[test]
    fn test_simple_table_visitor() {
        let action = SimpleTableVisitor.visit_table(&table());
        assert!(action.is_replace());
        assert_eq!(
            action.replacement(),
            Some("<p><strong>Prices</strong></p>\n<pre>Item | Cost\nTea | &lt;3\n</pre>")
        );
    }

    #[test]
    fn test_composite_visitor() {
        let mut composite = CompositeVisitor::new()
            .with_visitor(SkipRulesVisitor)
            .with_visitor(SimpleTableVisitor)
            .with_visitor(SkipTablesVisitor);

        assert!(composite.visit_rule().should_skip());
        // SimpleTableVisitor answers before SkipTablesVisitor is asked
        assert!(composite.visit_table(&table()).is_replace());
        assert_eq!(composite.visit_prose("<p>x</p>"), VisitorAction::Continue);
    }

    #[test]
    fn test_counting_visitor() {
        let mut visitor = CountingVisitor::default();
        visitor.visit_prose("<p>a</p>");
        visitor.visit_table(&table());
        visitor.visit_rule();
        visitor.visit_rule();
        assert_eq!((visitor.prose, visitor.tables, visitor.rules), (1, 1, 2));
    }
}
