//! Plain text rendering for processed answers.

use crate::error::Result;
use crate::model::ProcessedContent;

use super::RenderOptions;

/// Convert processed content to plain text.
///
/// Blocks are separated by blank lines and rules become a dashed line.
/// With images enabled, image references are listed at the end.
pub fn to_text(content: &ProcessedContent, options: &RenderOptions) -> Result<String> {
    let mut parts: Vec<String> = Vec::with_capacity(content.blocks.len() + 1);

    for block in &content.blocks {
        let text = if block.is_rule() {
            "----------".to_string()
        } else {
            block.plain_text()
        };
        if !text.trim().is_empty() {
            parts.push(text);
        }
    }

    if options.include_images && !content.extracted_images.is_empty() {
        let images: Vec<String> = content
            .extracted_images
            .iter()
            .map(|image| format!("[{}] {}", image.alt_text, image.url))
            .collect();
        parts.push(images.join("\n"));
    }

    Ok(parts.join("\n\n").trim().to_string())
}
