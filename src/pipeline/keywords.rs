//! Contact keyword decoration.
//!
//! Labels such as `Phone:` or `Email:` get a small animated icon in front
//! of them. A label only counts when a colon follows it, so ordinary prose
//! ("our website is modern") is left alone.

use regex::Regex;
use std::sync::LazyLock;

/// A keyword group with its icon and animation class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct KeywordGroup {
    pub icon: &'static str,
    pub animation: &'static str,
}

/// Keyword groups in match order; capture group `i + 1` belongs to `GROUPS[i]`.
pub(crate) const GROUPS: [KeywordGroup; 4] = [
    KeywordGroup {
        icon: "\u{1F4DE}",
        animation: "animate-iconBounce",
    },
    KeywordGroup {
        icon: "\u{2709}\u{FE0F}",
        animation: "animate-iconPulse",
    },
    KeywordGroup {
        icon: "\u{1F4CD}",
        animation: "animate-iconBounce",
    },
    KeywordGroup {
        icon: "\u{1F310}",
        animation: "animate-iconPulse",
    },
];

// All groups live in one alternation so a single left-to-right pass decorates
// each label at most once.
static KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:",
        r"(telephone|phone|tel|call|mobile|cell)",
        r"|(e-mail|email|mail)",
        r"|(address|location|street|avenue|road|place)",
        r"|(website|web|site|url|www)",
        r")(\s*:)",
    ))
    .expect("KEYWORD: hardcoded regex is valid")
});

/// Check whether `text` contains at least one decoratable label.
pub(crate) fn has_keyword(text: &str) -> bool {
    KEYWORD.is_match(text)
}

/// Insert an icon span before every `label:` occurrence.
pub(crate) fn decorate_keywords(text: &str) -> String {
    let mut count = 0usize;

    let decorated = KEYWORD.replace_all(text, |caps: &regex::Captures| {
        let colon = caps.get(5).map_or("", |m| m.as_str());
        if caps.get(0).is_some_and(|whole| is_uri_scheme(text, whole.start(), whole.end())) {
            return caps[0].to_string();
        }

        for (i, group) in GROUPS.iter().enumerate() {
            if let Some(label) = caps.get(i + 1) {
                count += 1;
                return format!(
                    r#"<span class="{} inline-block mr-1">{}</span>{}{}"#,
                    group.animation,
                    group.icon,
                    label.as_str(),
                    colon
                );
            }
        }
        caps[0].to_string()
    });

    if count > 0 {
        log::debug!("Decorated {} keyword labels", count);
    }

    decorated.into_owned()
}

/// A label directly inside a link target or attribute (`(tel:123`,
/// `"mailto:x`) is a URI scheme, not a label.
fn is_uri_scheme(text: &str, start: usize, end: usize) -> bool {
    let quoted = matches!(text[..start].chars().last(), Some('(' | '"' | '\'' | '='));
    let attached = text[end..].chars().next().is_some_and(|c| !c.is_whitespace());
    quoted && attached
}
