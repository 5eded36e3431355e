//! Rendering options and configuration.

use crate::pipeline::Theme;

/// Options for rendering processed content.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Light or dark styling
    pub theme: Theme,

    /// How to render table blocks
    pub table_style: TableStyle,

    /// Append the extracted images as a gallery
    pub include_images: bool,

    /// Wrap each prose block in a styled container
    pub wrap_prose: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
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

    /// Set the table style.
    pub fn with_table_style(mut self, style: TableStyle) -> Self {
        self.table_style = style;
        self
    }

    /// Enable or disable the image gallery.
    pub fn with_images(mut self, include: bool) -> Self {
        self.include_images = include;
        self
    }

    /// Enable or disable prose containers.
    pub fn with_prose_wrapper(mut self, wrap: bool) -> Self {
        self.wrap_prose = wrap;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            table_style: TableStyle::Themed,
            include_images: true,
            wrap_prose: true,
        }
    }
}

/// How table blocks are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableStyle {
    /// Styled HTML table with title, header row and zebra rows
    #[default]
    Themed,
    /// Preformatted plain text, one row per line
    Plain,
}

impl TableStyle {
    /// Parse a table style name (`themed` or `plain`).
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "themed" | "html" => Ok(TableStyle::Themed),
            "plain" | "text" => Ok(TableStyle::Plain),
            other => Err(format!("Unknown table style: {}", other)),
        }
    }
}
