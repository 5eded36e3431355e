//! Integration tests for the visitor pattern.

use chatfmt::model::{ExtractedImage, TableBlock};
use chatfmt::render::visitor::{
    BlockVisitor, CompositeVisitor, CountingVisitor, SimpleTableVisitor, SkipImagesVisitor,
    SkipRulesVisitor, SkipTablesVisitor, VisitorAction,
};
use chatfmt::render::{to_html, to_html_with_visitor, RenderOptions};
use chatfmt::{process, ProcessedContent, TableData};

fn answer() -> ProcessedContent {
    let tables = vec![TableData::new("Staff").with_headers(["Name"]).with_row(["Ann"])];
    process(
        "Hello\n[TABLE:Staff]\n---\nBye ![a](https://x.com/a.png) https://x.com/b.png",
        false,
        &tables,
    )
    .unwrap()
}

/// Visitor that records the order in which blocks are seen.
#[derive(Default)]
struct RecordingVisitor {
    seen: Vec<&'static str>,
    started_with: Option<usize>,
    ended: bool,
}

impl BlockVisitor for RecordingVisitor {
    fn visit_prose(&mut self, _html: &str) -> VisitorAction {
        self.seen.push("prose");
        VisitorAction::Continue
    }

    fn visit_table(&mut self, _table: &TableBlock) -> VisitorAction {
        self.seen.push("table");
        VisitorAction::Continue
    }

    fn visit_rule(&mut self) -> VisitorAction {
        self.seen.push("rule");
        VisitorAction::Continue
    }

    fn on_start(&mut self, block_count: usize) {
        self.started_with = Some(block_count);
    }

    fn on_end(&mut self) {
        self.ended = true;
    }
}

/// Visitor that keeps only images from one host.
struct HostFilter(&'static str);

impl BlockVisitor for HostFilter {
    fn visit_image(&mut self, image: &ExtractedImage) -> VisitorAction {
        if image.url.contains(self.0) {
            VisitorAction::Continue
        } else {
            VisitorAction::Skip
        }
    }
}

#[test]
fn test_visitor_sees_blocks_in_order() {
    let content = answer();
    let mut visitor = RecordingVisitor::default();
    to_html_with_visitor(&content, &RenderOptions::default(), &mut visitor).unwrap();

    assert_eq!(visitor.seen, vec!["prose", "table", "rule", "prose"]);
    assert_eq!(visitor.started_with, Some(4));
    assert!(visitor.ended);
}

#[test]
fn test_continue_matches_plain_render() {
    let content = answer();
    let mut visitor = RecordingVisitor::default();
    let visited = to_html_with_visitor(&content, &RenderOptions::default(), &mut visitor).unwrap();
    assert_eq!(visited, to_html(&content, &RenderOptions::default()).unwrap());
}

#[test]
fn test_skip_tables_and_rules() {
    let content = answer();
    let mut visitor = CompositeVisitor::new()
        .with_visitor(SkipTablesVisitor)
        .with_visitor(SkipRulesVisitor);
    let html = to_html_with_visitor(&content, &RenderOptions::default(), &mut visitor).unwrap();

    assert!(!html.contains("<table"));
    assert!(!html.contains("<hr"));
    assert!(html.contains("Hello"));
    assert!(html.contains("Bye"));
}

#[test]
fn test_simple_table_visitor() {
    let content = answer();
    let html = to_html_with_visitor(&content, &RenderOptions::default(), &mut SimpleTableVisitor).unwrap();

    assert!(html.contains("<p><strong>Staff</strong></p>\n<pre>Name\nAnn\n</pre>"));
    assert!(!html.contains("<table"));
}

#[test]
fn test_skip_images_visitor() {
    let content = answer();
    let html = to_html_with_visitor(&content, &RenderOptions::default(), &mut SkipImagesVisitor).unwrap();
    assert!(!html.contains("<img"));
}

#[test]
fn test_image_filter_visitor() {
    let content = answer();
    assert_eq!(content.extracted_images.len(), 2);

    let mut visitor = HostFilter("a.png");
    let html = to_html_with_visitor(&content, &RenderOptions::default(), &mut visitor).unwrap();

    assert!(html.contains("src=\"https://x.com/a.png\""));
    assert!(!html.contains("b.png"));
}

#[test]
fn test_counting_visitor() {
    let content = answer();
    let mut visitor = CountingVisitor::default();
    to_html_with_visitor(&content, &RenderOptions::default(), &mut visitor).unwrap();

    assert_eq!(visitor.prose, 2);
    assert_eq!(visitor.tables, 1);
    assert_eq!(visitor.rules, 1);
}

#[test]
fn test_replace_prose() {
    struct Upper;

    impl BlockVisitor for Upper {
        fn visit_prose(&mut self, html: &str) -> VisitorAction {
            VisitorAction::Replace(html.to_uppercase())
        }
    }

    let content = process("quiet", false, &[]).unwrap();
    let html = to_html_with_visitor(&content, &RenderOptions::default(), &mut Upper).unwrap();
    assert!(html.contains("<P>QUIET</P>"));
}
