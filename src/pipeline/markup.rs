//! Lightweight markdown to HTML conversion.
//!
//! The rules are ordered substitutions. Bold runs before italic so that
//! `**` pairs are consumed first, and links run last so that their URLs
//! never see the emphasis rules (URLs are shielded until then).
//!
//! Before the inline rules, answers that mix raw HTML with markdown get a
//! repair pass: entities are decoded, doubled tags collapsed, run-on
//! `* **Label**` bullets split onto their own lines and bullet lines turned
//! into lists.

use regex::Regex;
use std::sync::LazyLock;

use super::markers;
use super::options::{ProcessOptions, Theme};
use crate::model::{html_to_text, InlineLink};

// ============================================================================
// Patterns
// ============================================================================

static DOUBLED_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(/?)(li|p)>\s*<(/?)(li|p)>").expect("DOUBLED_TAG: hardcoded regex is valid")
});

static INLINE_BULLET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\S)[ \t]+\*[ \t]+\*\*").expect("INLINE_BULLET: hardcoded regex is valid")
});

static BULLET_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*(?:[*\-]|\x{2022})[ \t]+(.*)$").expect("BULLET_LINE: hardcoded regex is valid")
});

static NUMBERED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*\d+\.[ \t]+(.*)$").expect("NUMBERED_LINE: hardcoded regex is valid")
});

static BOLD_STARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(.*?)\*\*").expect("BOLD_STARS: hardcoded regex is valid")
});

static BOLD_UNDERSCORES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"__(.*?)__").expect("BOLD_UNDERSCORES: hardcoded regex is valid")
});

static ITALIC_STAR: LazyLock<fancy_regex::Regex> = LazyLock::new(|| {
    fancy_regex::Regex::new(r"(?<!\w)\*([^*\n]*)\*(?!\w)").expect("ITALIC_STAR: hardcoded regex is valid")
});

static ITALIC_UNDERSCORE: LazyLock<fancy_regex::Regex> = LazyLock::new(|| {
    fancy_regex::Regex::new(r"(?<!\w)_([^_\n]*)_(?!\w)")
        .expect("ITALIC_UNDERSCORE: hardcoded regex is valid")
});

static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`(.*?)`").expect("INLINE_CODE: hardcoded regex is valid"));

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(#{1,3}) (.*)$").expect("HEADING: hardcoded regex is valid")
});

static SHIELDED_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\(\x{E002}(\d+)\x{E003}\)").expect("SHIELDED_LINK: hardcoded regex is valid")
});

// ============================================================================
// Conversion
// ============================================================================

/// Output of the markup converter.
#[derive(Debug, Clone, Default)]
pub(crate) struct ConvertedMarkup {
    pub html: String,
    pub links: Vec<InlineLink>,
}

/// Convert the markdown in `text` to HTML, leaving markers untouched.
pub(crate) fn convert_markup(text: &str, options: &ProcessOptions) -> ConvertedMarkup {
    let mut links = Vec::new();
    let html = markers::map_text(text, |segment| convert_segment(segment, options, &mut links));

    if !links.is_empty() {
        log::debug!("Converted {} inline links", links.len());
    }

    ConvertedMarkup { html, links }
}

fn convert_segment(segment: &str, options: &ProcessOptions, links: &mut Vec<InlineLink>) -> String {
    if segment.is_empty() {
        return String::new();
    }

    let mut text = segment.to_string();

    if options.repair_html {
        text = repair_html(&text);
    }
    text = split_inline_bullets(&text);
    if options.detect_lists {
        text = convert_lists(&text);
    }

    let (shielded, targets) = markers::shield_link_targets(&text);
    text = shielded;

    text = convert_bold(&text);
    text = convert_italic(&text);
    text = convert_code(&text, options.theme);
    text = convert_headings(&text, options.theme);
    text = convert_links(&text, &targets, options.theme, links);

    markers::unshield(&text, &targets)
}

/// Decode HTML entities and collapse doubled list-item and paragraph tags.
pub(crate) fn repair_html(text: &str) -> String {
    let decoded = html_escape::decode_html_entities(text).into_owned();

    DOUBLED_TAG
        .replace_all(&decoded, |caps: &regex::Captures| {
            let same_tag = caps[2].eq_ignore_ascii_case(&caps[4]);
            if same_tag && caps[1] == caps[3] {
                format!("<{}{}>", &caps[1], &caps[2])
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

/// Put run-on `* **Label**` bullets on lines of their own.
pub(crate) fn split_inline_bullets(text: &str) -> String {
    INLINE_BULLET.replace_all(text, "${1}\n* **").into_owned()
}

/// Turn runs of bullet or numbered lines into `<ul>`/`<ol>` lists.
pub(crate) fn convert_lists(text: &str) -> String {
    let mut output: Vec<String> = Vec::new();
    let mut items: Vec<String> = Vec::new();
    let mut ordered = false;

    for line in text.split('\n') {
        let item = match (BULLET_LINE.captures(line), NUMBERED_LINE.captures(line)) {
            (Some(caps), _) => Some((false, caps[1].trim().to_string())),
            (None, Some(caps)) => Some((true, caps[1].trim().to_string())),
            (None, None) => None,
        };

        match item {
            Some((is_ordered, content)) => {
                if !items.is_empty() && is_ordered != ordered {
                    output.push(render_list(&items, ordered));
                    items.clear();
                }
                ordered = is_ordered;
                items.push(content);
            }
            None => {
                if !items.is_empty() {
                    output.push(render_list(&items, ordered));
                    items.clear();
                }
                output.push(line.to_string());
            }
        }
    }

    if !items.is_empty() {
        output.push(render_list(&items, ordered));
    }

    output.join("\n")
}

fn render_list(items: &[String], ordered: bool) -> String {
    let tag = if ordered { "ol" } else { "ul" };
    let body: String = items.iter().map(|item| format!("<li>{}</li>", item)).collect();
    format!("<{tag}>{body}</{tag}>")
}

fn convert_bold(text: &str) -> String {
    let text = BOLD_STARS.replace_all(text, "<strong>$1</strong>");
    BOLD_UNDERSCORES.replace_all(&text, "<strong>$1</strong>").into_owned()
}

fn convert_italic(text: &str) -> String {
    let text = replace_emphasis(&ITALIC_STAR, text);
    replace_emphasis(&ITALIC_UNDERSCORE, &text)
}

/// Apply one italic rule. A rule that hits the backtracking limit leaves
/// the text as it is.
fn replace_emphasis(pattern: &fancy_regex::Regex, text: &str) -> String {
    match pattern.try_replacen(text, 0, "<em>$1</em>") {
        Ok(replaced) => replaced.into_owned(),
        Err(e) => {
            log::warn!("Italic rule skipped on {} bytes: {}", text.len(), e);
            text.to_string()
        }
    }
}

fn convert_code(text: &str, theme: Theme) -> String {
    let replacement = format!(r#"<code class="{}">$1</code>"#, theme.code_class());
    INLINE_CODE.replace_all(text, replacement.as_str()).into_owned()
}

fn convert_headings(text: &str, theme: Theme) -> String {
    HEADING
        .replace_all(text, |caps: &regex::Captures| {
            let level = caps[1].len();
            format!(
                r#"<h{level} class="{}">{}</h{level}>"#,
                theme.heading_class(level as u8),
                &caps[2]
            )
        })
        .into_owned()
}

fn convert_links(text: &str, targets: &[String], theme: Theme, links: &mut Vec<InlineLink>) -> String {
    SHIELDED_LINK
        .replace_all(text, |caps: &regex::Captures| {
            let Some(url) = caps[2].parse::<usize>().ok().and_then(|i| targets.get(i)) else {
                return caps[0].to_string();
            };
            let url = url.trim();
            let label = &caps[1];

            if is_safe_target(url) && !super::images::is_image_url(url) {
                links.push(InlineLink::new(html_to_text(label), url));
            }

            format!(
                r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="{}">{}</a>"#,
                html_escape::encode_double_quoted_attribute(url),
                theme.link_class(),
                label
            )
        })
        .into_owned()
}

fn is_safe_target(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    !["javascript:", "vbscript:", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}
