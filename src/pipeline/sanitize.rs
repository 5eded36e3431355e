//! HTML sanitization for prose blocks.
//!
//! Every prose fragment passes through an allow-list sanitizer before it is
//! emitted. Disallowed tags are unwrapped (their text kept), `script` and
//! `style` are removed with their content, event handlers and unknown
//! attributes are dropped, and hrefs with a scheme outside the allow-list
//! lose their `href` while the anchor text stays.

use ammonia::Builder;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Tags allowed in prose.
pub const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "strong", "b", "em", "i", "u", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "a",
    "blockquote", "code", "pre", "span",
];

/// Attributes allowed in prose. `rel` is always rewritten to
/// `noopener noreferrer` on anchors.
pub const ALLOWED_ATTRIBUTES: &[&str] = &["href", "target", "rel", "class"];

/// URL schemes allowed in `href`.
pub const ALLOWED_URL_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

const LINK_REL: &str = "noopener noreferrer";

static PROSE_SANITIZER: LazyLock<Builder<'static>> =
    LazyLock::new(|| build_sanitizer(ALLOWED_TAGS, ALLOWED_ATTRIBUTES));

fn build_sanitizer<'a>(tags: &[&'a str], attributes: &[&'a str]) -> Builder<'a> {
    let mut builder = Builder::default();

    let forced_rel = attributes.contains(&"rel");
    let generic: HashSet<&'a str> = attributes
        .iter()
        .copied()
        .filter(|attr| !forced_rel || *attr != "rel")
        .collect();
    // Tags removed with their content cannot also be allowed.
    let removed: HashSet<&'a str> = ["script", "style"]
        .into_iter()
        .filter(|tag| !tags.contains(tag))
        .collect();

    builder
        .tags(tags.iter().copied().collect())
        .clean_content_tags(removed)
        .generic_attributes(generic)
        .tag_attributes(HashMap::new())
        .url_schemes(ALLOWED_URL_SCHEMES.iter().copied().collect())
        .link_rel(forced_rel.then_some(LINK_REL));

    builder
}

/// Sanitize a prose fragment with the fixed prose allow-list.
pub fn sanitize(fragment: &str) -> String {
    PROSE_SANITIZER.clean(fragment).to_string()
}

/// Sanitize a fragment with a caller-supplied allow-list.
///
/// Allowing `rel` means every anchor gets `rel="noopener noreferrer"`;
/// other `rel` values are never passed through.
pub fn sanitize_with(fragment: &str, tags: &[&str], attributes: &[&str]) -> String {
    build_sanitizer(tags, attributes).clean(fragment).to_string()
}
