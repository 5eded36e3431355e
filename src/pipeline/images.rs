//! Image extraction.
//!
//! Images are displayed out of line by the host UI, so every image
//! reference is removed from the text and collected separately.

use regex::Regex;
use std::sync::LazyLock;

use super::markers;
use crate::model::ExtractedImage;

static MARKDOWN_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("MARKDOWN_IMAGE: hardcoded regex is valid")
});

static BARE_IMAGE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)https?://[^\s]+\.(?:jpg|jpeg|png|gif|webp|svg)(?:\?[^\s]*)?")
        .expect("BARE_IMAGE_URL: hardcoded regex is valid")
});

static IMAGE_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(?:jpg|jpeg|png|gif|webp|svg)(?:[?#]|$)")
        .expect("IMAGE_TARGET: hardcoded regex is valid")
});

/// Check whether a link target points at an image file.
pub(crate) fn is_image_url(url: &str) -> bool {
    IMAGE_TARGET.is_match(url.trim())
}

/// Pull image references out of `text`.
///
/// Returns the text with every matched span removed, and the images in
/// order of first appearance: markdown images first, then bare URLs.
/// Targets of `[label](url)` links are not bare and stay in place.
pub(crate) fn extract_images(text: &str, default_alt: &str) -> (String, Vec<ExtractedImage>) {
    let mut images: Vec<ExtractedImage> = Vec::new();

    for caps in MARKDOWN_IMAGE.captures_iter(text) {
        let url = caps[2].trim();
        if url.is_empty() {
            continue;
        }
        let alt = caps[1].trim();
        let alt = if alt.is_empty() { default_alt } else { alt };
        push_unique(&mut images, ExtractedImage::new(url, alt));
    }

    let without_markdown = MARKDOWN_IMAGE.replace_all(text, "");
    let (mut stripped, targets) = markers::shield_link_targets(&without_markdown);

    for found in BARE_IMAGE_URL.find_iter(&stripped) {
        push_unique(&mut images, ExtractedImage::new(found.as_str(), default_alt));
    }

    // Longest first, so a URL that prefixes another cannot leave a tail behind.
    let mut urls: Vec<&str> = images.iter().map(|img| img.url.as_str()).collect();
    urls.sort_by_key(|url| std::cmp::Reverse(url.len()));
    for url in urls {
        stripped = stripped.replace(url, "");
    }

    if !images.is_empty() {
        log::debug!("Extracted {} images", images.len());
    }

    (markers::unshield(&stripped, &targets), images)
}

fn push_unique(images: &mut Vec<ExtractedImage>, image: ExtractedImage) {
    if !images.iter().any(|existing| existing.url == image.url) {
        images.push(image);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(images: &[ExtractedImage]) -> Vec<&str> {
        images.iter().map(|img| img.url.as_str()).collect()
    }

    #[test]
    fn test_markdown_image() {
        let (text, images) = extract_images("See ![Office](https://x.com/office.png) here", "Image");
        assert_eq!(text, "See  here");
        assert_eq!(images, vec![ExtractedImage::new("https://x.com/office.png", "Office")]);
    }

    #[test]
    fn test_markdown_image_without_alt() {
        let (_, images) = extract_images("![](https://x.com/a.jpg)", "Image");
        assert_eq!(images[0].alt_text, "Image");
    }

    #[test]
    fn test_bare_image_urls() {
        let (text, images) = extract_images(
            "Photo: https://x.com/a.JPG and https://x.com/b.webp?w=300 done",
            "Image",
        );
        assert_eq!(urls(&images), vec!["https://x.com/a.JPG", "https://x.com/b.webp?w=300"]);
        assert!(images.iter().all(|img| img.alt_text == "Image"));
        assert_eq!(text, "Photo:  and  done");
    }

    #[test]
    fn test_non_image_urls_untouched() {
        let (text, images) = extract_images("Visit https://x.com/page.html", "Image");
        assert!(images.is_empty());
        assert_eq!(text, "Visit https://x.com/page.html");
    }

    #[test]
    fn test_deduplication() {
        let input = "![A](https://x.com/a.png) again https://x.com/a.png and ![B](https://x.com/a.png)";
        let (text, images) = extract_images(input, "Image");
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].alt_text, "A");
        assert!(!text.contains("https://x.com/a.png"));
    }

    #[test]
    fn test_markdown_url_removed_everywhere() {
        let input = "![A](/img/logo.svg)\nLogo lives at /img/logo.svg";
        let (text, images) = extract_images(input, "Image");
        assert_eq!(urls(&images), vec!["/img/logo.svg"]);
        assert_eq!(text, "\nLogo lives at ");
    }

    #[test]
    fn test_markdown_image_order_first() {
        let input = "https://x.com/bare.png then ![M](https://x.com/md.png)";
        let (_, images) = extract_images(input, "Image");
        assert_eq!(urls(&images), vec!["https://x.com/md.png", "https://x.com/bare.png"]);
    }

    #[test]
    fn test_linked_image_url_kept_as_link() {
        let input = "[Download logo](https://x.com/logo.png) or https://x.com/logo.png";
        let (text, images) = extract_images(input, "Image");
        assert_eq!(urls(&images), vec!["https://x.com/logo.png"]);
        assert_eq!(text, "[Download logo](https://x.com/logo.png) or ");
    }

    #[test]
    fn test_is_image_url() {
        assert!(is_image_url("https://x.com/a.png"));
        assert!(is_image_url("https://x.com/a.PNG?w=1"));
        assert!(!is_image_url("https://x.com/a.png.html"));
        assert!(!is_image_url("https://x.com/docs"));
    }
}
