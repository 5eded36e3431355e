//! Extracted image types.

use serde::{Deserialize, Serialize};

/// Alt text used when an image reference carries none.
pub const DEFAULT_ALT_TEXT: &str = "Image";

/// An image reference pulled out of an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedImage {
    /// Image URL, unique within one `ProcessedContent`
    pub url: String,

    /// Alternative text
    pub alt_text: String,
}

impl ExtractedImage {
    /// Create a new extracted image.
    pub fn new(url: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt_text: alt_text.into(),
        }
    }

    /// Create an image with the default alt text.
    pub fn untitled(url: impl Into<String>) -> Self {
        Self::new(url, DEFAULT_ALT_TEXT)
    }

    /// Check if the alt text is the default filler.
    pub fn has_default_alt(&self) -> bool {
        self.alt_text == DEFAULT_ALT_TEXT
    }

    /// Display title for galleries.
    ///
    /// Uses the alt text when one was given, otherwise the file stem of the
    /// URL (`.../team-photo.png?w=2` gives `team-photo`).
    pub fn title(&self) -> String {
        if !self.has_default_alt() && !self.alt_text.trim().is_empty() {
            return self.alt_text.clone();
        }

        self.file_stem()
            .map(str::to_string)
            .unwrap_or_else(|| self.alt_text.clone())
    }

    fn file_stem(&self) -> Option<&str> {
        let path = self.url.split(['?', '#']).next()?;
        let file = path.rsplit('/').next()?;
        let stem = file.split('.').next()?;
        if stem.is_empty() {
            None
        } else {
            Some(stem)
        }
    }
}
