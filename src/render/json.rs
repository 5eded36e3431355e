//! JSON rendering for processed answers.

use crate::error::{Error, Result};
use crate::model::ProcessedContent;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert processed content to JSON.
pub fn to_json(content: &ProcessedContent, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(content),
        JsonFormat::Compact => serde_json::to_string(content),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentBlock, ExtractedImage};

    fn sample() -> ProcessedContent {
        ProcessedContent {
            blocks: vec![ContentBlock::prose("<p>Hello</p>"), ContentBlock::Rule],
            extracted_images: vec![ExtractedImage::new("https://x.com/a.png", "Logo")],
            ..Default::default()
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"type\": \"prose\""));
        assert!(json.contains("\"type\": \"rule\""));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines
        assert!(!json.contains("unresolved_tables"));
    }

    #[test]
    fn test_json_round_trip() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        let parsed: ProcessedContent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());
    }
}
