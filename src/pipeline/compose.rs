//! Block composition.
//!
//! Converted HTML is cut at table and rule markers. Markers become table
//! and rule blocks; the text between them is laid out into paragraphs,
//! sanitized and emitted as prose, all in reading order.

use regex::Regex;
use std::sync::LazyLock;

use super::cleanup::collapse_blank_lines;
use super::markers::{self, Segment, RULE_MARKER};
use super::sanitize::sanitize;
use crate::model::{html_to_text, ContentBlock, TableBlock};

static RULE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*-{3,}[ \t]*$").expect("RULE_LINE: hardcoded regex is valid")
});

static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n[ \t]*\n").expect("PARAGRAPH_BREAK: hardcoded regex is valid")
});

static BLOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^</?(?:h[1-6]|ul|ol|li|blockquote|pre|p)(?:[\s>/]|$)")
        .expect("BLOCK_TAG: hardcoded regex is valid")
});

static BARE_PARAGRAPH_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^</?p\s*>$").expect("BARE_PARAGRAPH_TAG: hardcoded regex is valid")
});

static EMPTY_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<p>\s*</p>").expect("EMPTY_PARAGRAPH: hardcoded regex is valid")
});

/// Replace every line made only of three or more dashes with the rule marker.
pub(crate) fn normalize_rules(text: &str) -> String {
    RULE_LINE.replace_all(text, RULE_MARKER).into_owned()
}

/// Compose the ordered block list from converted HTML and resolved tables.
pub(crate) fn compose_blocks(html: &str, tables: &[TableBlock]) -> Vec<ContentBlock> {
    let text = normalize_rules(&collapse_blank_lines(html));
    let mut blocks = Vec::new();

    for segment in markers::split(&text) {
        match segment {
            Segment::Table(ordinal) => match tables.get(ordinal) {
                Some(table) => blocks.push(ContentBlock::Table(table.clone())),
                None => log::debug!("No table block for marker {}", ordinal),
            },
            Segment::Rule => blocks.push(ContentBlock::Rule),
            Segment::Text(part) => {
                if let Some(html) = compose_prose(part) {
                    blocks.push(ContentBlock::prose(html));
                }
            }
        }
    }

    blocks
}

/// Lay out and sanitize one prose segment. Returns `None` when nothing
/// visible is left.
fn compose_prose(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let clean = sanitize(&layout_paragraphs(trimmed));
    let clean = EMPTY_PARAGRAPH.replace_all(&clean, "").into_owned();
    if html_to_text(&clean).is_empty() {
        log::debug!("Prose segment empty after sanitizing");
        return None;
    }
    Some(clean)
}

/// Blank lines separate paragraphs; single newlines become `<br>`.
/// Lines that already open or close a block element are kept as they are,
/// except lone `<p>` and `</p>` tags, which the wrapping already supplies.
pub(crate) fn layout_paragraphs(text: &str) -> String {
    let mut output = String::with_capacity(text.len() + 16);

    for paragraph in PARAGRAPH_BREAK.split(text) {
        let mut inline: Vec<&str> = Vec::new();

        for line in paragraph.lines().map(str::trim).filter(|line| !line.is_empty()) {
            if BARE_PARAGRAPH_TAG.is_match(line) {
                continue;
            }
            if BLOCK_TAG.is_match(line) {
                flush_inline(&mut output, &mut inline);
                output.push_str(line);
            } else {
                inline.push(line);
            }
        }
        flush_inline(&mut output, &mut inline);
    }

    output
}

fn flush_inline(output: &mut String, lines: &mut Vec<&str>) {
    if lines.is_empty() {
        return;
    }
    output.push_str("<p>");
    output.push_str(&lines.join("<br>"));
    output.push_str("</p>");
    lines.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableData;

    fn table(title: &str) -> TableBlock {
        TableBlock::new(TableData::new(title).with_headers(["A"]))
    }

    #[test]
    fn test_layout_paragraphs() {
        assert_eq!(layout_paragraphs("one\ntwo\n\nthree"), "<p>one<br>two</p><p>three</p>");
        assert_eq!(
            layout_paragraphs("<h2 class=\"x\">Title</h2>\nBody text"),
            "<h2 class=\"x\">Title</h2><p>Body text</p>"
        );
        assert_eq!(layout_paragraphs("<ul><li>a</li></ul>"), "<ul><li>a</li></ul>");
        assert_eq!(
            layout_paragraphs("<strong>Hi</strong> there"),
            "<p><strong>Hi</strong> there</p>"
        );
    }

    #[test]
    fn test_layout_skips_lone_paragraph_tags() {
        assert_eq!(layout_paragraphs("<p>\nHello\n</p>"), "<p>Hello</p>");
        assert_eq!(layout_paragraphs("<P >\nHi"), "<p>Hi</p>");
    }

    #[test]
    fn test_split_paragraph_html_has_no_empty_paragraphs() {
        let blocks = compose_blocks("<p>\nHello\n</p>", &[]);
        assert_eq!(blocks, vec![ContentBlock::prose("<p>Hello</p>")]);

        let blocks = compose_blocks("<p>Hello\nworld</p>", &[]);
        let html = blocks[0].html().unwrap();
        assert!(!html.contains("<p></p>"));
        assert!(html.contains("Hello") && html.contains("world"));
    }

    #[test]
    fn test_normalize_rules() {
        assert_eq!(normalize_rules("a\n---\nb\n -----  \nc -- d"), format!("a\n{0}\nb\n{0}\nc -- d", RULE_MARKER));
    }

    #[test]
    fn test_compose_order() {
        let html = format!("A\n{}\nB\n---\nC", markers::table_marker(0));
        let blocks = compose_blocks(&html, &[table("T")]);

        assert_eq!(blocks.len(), 5);
        assert_eq!(blocks[0], ContentBlock::prose("<p>A</p>"));
        assert!(blocks[1].is_table());
        assert_eq!(blocks[2], ContentBlock::prose("<p>B</p>"));
        assert!(blocks[3].is_rule());
        assert_eq!(blocks[4], ContentBlock::prose("<p>C</p>"));
    }

    #[test]
    fn test_missing_table_skipped() {
        let html = markers::table_marker(4);
        assert!(compose_blocks(&html, &[]).is_empty());
    }

    #[test]
    fn test_whitespace_between_markers_emits_nothing() {
        let html = format!("{}\n\n{}", markers::table_marker(0), markers::table_marker(1));
        let blocks = compose_blocks(&html, &[table("A"), table("B")]);
        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(ContentBlock::is_table));
    }

    #[test]
    fn test_prose_is_sanitized() {
        let blocks = compose_blocks("Hi <script>alert(1)</script>there", &[]);
        assert_eq!(blocks, vec![ContentBlock::prose("<p>Hi there</p>")]);
    }

    #[test]
    fn test_script_only_segment_dropped() {
        assert!(compose_blocks("<script>alert(1)</script>", &[]).is_empty());
    }
}
