//! Processing options and theme configuration.

use crate::model::DEFAULT_ALT_TEXT;

/// Default upper bound on answer size (1 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 1024 * 1024;

/// Options for processing an answer.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Light or dark styling for generated markup
    pub theme: Theme,

    /// Decorate `Phone:`-style labels with icons
    pub decorate_keywords: bool,

    /// Decode entities and collapse doubled tags before conversion
    pub repair_html: bool,

    /// Turn bullet and numbered lines into HTML lists
    pub detect_lists: bool,

    /// Alt text for images that carry none
    pub default_alt_text: String,

    /// Reject answers larger than this many bytes (0 = unlimited)
    pub max_input_bytes: usize,

    /// Whether batch processing may use multiple threads
    pub parallel: bool,
}

impl ProcessOptions {
    /// Create new process options with defaults (light theme).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create options for the dark theme.
    pub fn dark() -> Self {
        Self::default().with_theme(Theme::Dark)
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the theme from a dark-mode flag.
    pub fn with_dark_mode(mut self, dark_mode: bool) -> Self {
        self.theme = Theme::from_dark_mode(dark_mode);
        self
    }

    /// Enable or disable keyword icons.
    pub fn with_keywords(mut self, decorate: bool) -> Self {
        self.decorate_keywords = decorate;
        self
    }

    /// Enable or disable entity and tag repair.
    pub fn with_html_repair(mut self, repair: bool) -> Self {
        self.repair_html = repair;
        self
    }

    /// Enable or disable list detection.
    pub fn with_lists(mut self, detect: bool) -> Self {
        self.detect_lists = detect;
        self
    }

    /// Set the default alt text for images.
    pub fn with_default_alt(mut self, alt: impl Into<String>) -> Self {
        self.default_alt_text = alt.into();
        self
    }

    /// Set the input size limit in bytes (0 = unlimited).
    pub fn with_max_input_bytes(mut self, limit: usize) -> Self {
        self.max_input_bytes = limit;
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            decorate_keywords: true,
            repair_html: true,
            detect_lists: true,
            default_alt_text: DEFAULT_ALT_TEXT.to_string(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            parallel: true,
        }
    }
}

/// Light or dark styling.
///
/// Every class string the pipeline and renderers emit comes from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Dark text on light background
    #[default]
    Light,
    /// Light text on dark background
    Dark,
}

impl Theme {
    /// Pick a theme from a dark-mode flag.
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Check if this is the dark theme.
    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    fn pick(self, light: &'static str, dark: &'static str) -> &'static str {
        match self {
            Theme::Light => light,
            Theme::Dark => dark,
        }
    }

    /// Class for inline code spans.
    pub fn code_class(self) -> &'static str {
        self.pick(
            "px-1 py-0.5 rounded text-sm font-mono bg-gray-100 text-gray-800",
            "px-1 py-0.5 rounded text-sm font-mono bg-gray-800 text-gray-200",
        )
    }

    /// Class for headings of level 1-3 (deeper levels use level 3).
    pub fn heading_class(self, level: u8) -> String {
        let size = match level {
            1 => "text-2xl font-bold mb-4",
            2 => "text-xl font-bold mb-3",
            _ => "text-lg font-bold mb-2",
        };
        format!("{} {}", size, self.strong_text())
    }

    /// Class for anchors.
    pub fn link_class(self) -> &'static str {
        self.pick(
            "text-blue-600 hover:text-blue-800 underline font-medium transition-colors duration-200",
            "text-blue-400 hover:text-blue-300 underline font-medium transition-colors duration-200",
        )
    }

    /// Text color for headings and emphasized text.
    pub fn strong_text(self) -> &'static str {
        self.pick("text-gray-900", "text-white")
    }

    /// Text color for body prose.
    pub fn body_text(self) -> &'static str {
        self.pick("text-gray-700", "text-gray-100")
    }

    /// Border color for rules and tables.
    pub fn border(self) -> &'static str {
        self.pick("border-gray-300", "border-gray-600")
    }

    /// Background of the table header row.
    pub fn header_background(self) -> &'static str {
        self.pick("bg-gray-50", "bg-gray-800")
    }

    /// Text color of table header cells.
    pub fn header_text(self) -> &'static str {
        self.pick("text-gray-900", "text-gray-200")
    }

    /// Background of a table body row (zebra striped).
    pub fn row_background(self, row_index: usize) -> &'static str {
        if row_index % 2 == 0 {
            self.pick("bg-white", "bg-gray-900")
        } else {
            self.pick("bg-gray-50", "bg-gray-800")
        }
    }

    /// Hover background of table body rows.
    pub fn row_hover(self) -> &'static str {
        self.pick("hover:bg-gray-100", "hover:bg-gray-700")
    }

    /// Extra class for prose containers.
    pub fn prose_variant(self) -> &'static str {
        self.pick("", "prose-invert")
    }
}
