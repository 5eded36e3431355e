//! HTML rendering for processed answers.

use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::error::Result;
use crate::model::{ContentBlock, ExtractedImage, ProcessedContent, TableBlock};
use crate::pipeline::Theme;

use super::visitor::{BlockVisitor, VisitorAction};
use super::{ContentStats, RenderOptions, RenderResult, TableStyle};

/// Render processed content to an HTML fragment.
pub fn to_html(content: &ProcessedContent, options: &RenderOptions) -> Result<String> {
    HtmlRenderer::new(options.clone()).render(content)
}

/// Render processed content to an HTML fragment with statistics.
pub fn to_html_with_stats(content: &ProcessedContent, options: &RenderOptions) -> Result<RenderResult> {
    let html = to_html(content, options)?;
    Ok(RenderResult::new(html, ContentStats::from_content(content)))
}

/// Render processed content, letting a visitor skip or replace blocks.
pub fn to_html_with_visitor(
    content: &ProcessedContent,
    options: &RenderOptions,
    visitor: &mut dyn BlockVisitor,
) -> Result<String> {
    HtmlRenderer::new(options.clone()).render_with_visitor(content, visitor)
}

/// Render processed content as a standalone HTML page.
pub fn to_html_document(
    content: &ProcessedContent,
    options: &RenderOptions,
    meta: &DocumentMeta,
) -> Result<String> {
    let body = to_html(content, options)?;
    let theme = options.theme;
    let title = meta.title.as_deref().unwrap_or("Chat answer");

    let mut output = String::with_capacity(body.len() + 512);
    output.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    output.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    if let Some(generated) = meta.generated {
        output.push_str(&format!(
            "<meta name=\"generated\" content=\"{}\">\n",
            generated.to_rfc3339()
        ));
    }
    output.push_str(&format!("<title>{}</title>\n</head>\n", encode_text(title)));
    output.push_str(&format!(
        "<body class=\"{} {}\">\n<main class=\"max-w-3xl mx-auto p-6\">\n",
        page_background(theme),
        theme.body_text()
    ));
    output.push_str(&format!(
        "<h1 class=\"{}\">{}</h1>\n",
        theme.heading_class(1),
        encode_text(title)
    ));
    output.push_str(&body);
    output.push('\n');
    if let Some(generated) = meta.generated {
        output.push_str(&format!(
            "<footer class=\"mt-8 text-sm {}\">Generated {}</footer>\n",
            theme.body_text(),
            generated.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    output.push_str("</main>\n</body>\n</html>\n");

    Ok(output)
}

fn page_background(theme: Theme) -> &'static str {
    if theme.is_dark() {
        "bg-gray-900"
    } else {
        "bg-white"
    }
}

/// Metadata for standalone HTML pages.
#[derive(Debug, Clone, Default)]
pub struct DocumentMeta {
    /// Page title
    pub title: Option<String>,

    /// Generation timestamp shown in the footer
    pub generated: Option<DateTime<Utc>>,
}

impl DocumentMeta {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create metadata stamped with the current time.
    pub fn now() -> Self {
        Self {
            title: None,
            generated: Some(Utc::now()),
        }
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the generation timestamp.
    pub fn with_generated(mut self, generated: DateTime<Utc>) -> Self {
        self.generated = Some(generated);
        self
    }
}

/// HTML renderer.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Get the render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render all blocks (and the image gallery, if enabled).
    pub fn render(&self, content: &ProcessedContent) -> Result<String> {
        let parts: Vec<String> = content.blocks.iter().map(|block| self.render_block(block)).collect();
        Ok(self.assemble(parts, &content.extracted_images))
    }

    /// Render all blocks, consulting `visitor` before each one.
    pub fn render_with_visitor(
        &self,
        content: &ProcessedContent,
        visitor: &mut dyn BlockVisitor,
    ) -> Result<String> {
        visitor.on_start(content.blocks.len());

        let mut parts = Vec::with_capacity(content.blocks.len());
        for block in &content.blocks {
            let action = match block {
                ContentBlock::Prose { html } => visitor.visit_prose(html),
                ContentBlock::Table(table) => visitor.visit_table(table),
                ContentBlock::Rule => visitor.visit_rule(),
            };
            match action {
                VisitorAction::Continue => parts.push(self.render_block(block)),
                VisitorAction::Replace(replacement) => parts.push(replacement),
                VisitorAction::Skip => {}
            }
        }

        let images: Vec<ExtractedImage> = content
            .extracted_images
            .iter()
            .filter(|image| !visitor.visit_image(image).should_skip())
            .cloned()
            .collect();

        visitor.on_end();
        Ok(self.assemble(parts, &images))
    }

    fn assemble(&self, mut parts: Vec<String>, images: &[ExtractedImage]) -> String {
        if self.options.include_images && !images.is_empty() {
            parts.push(self.render_images(images));
        }
        parts.retain(|part| !part.is_empty());

        if parts.is_empty() {
            return String::new();
        }
        format!("<div class=\"space-y-4\">\n{}\n</div>", parts.join("\n"))
    }

    /// Render a single block.
    pub fn render_block(&self, block: &ContentBlock) -> String {
        match block {
            ContentBlock::Prose { html } => self.render_prose(html),
            ContentBlock::Table(table) => self.render_table(table),
            ContentBlock::Rule => self.render_rule("my-4"),
        }
    }

    fn render_prose(&self, html: &str) -> String {
        if !self.options.wrap_prose {
            return html.to_string();
        }
        let theme = self.options.theme;
        let variant = theme.prose_variant();
        let variant = if variant.is_empty() {
            String::new()
        } else {
            format!(" {}", variant)
        };
        format!(
            "<div class=\"prose max-w-none{} {} leading-relaxed break-words\">{}</div>",
            variant,
            theme.body_text(),
            html
        )
    }

    fn render_rule(&self, spacing: &str) -> String {
        format!("<hr class=\"border-t {} {}\">", self.options.theme.border(), spacing)
    }

    /// Render a table block, framed by its rules.
    pub fn render_table(&self, block: &TableBlock) -> String {
        let mut output = String::from("<div class=\"my-6\">\n");

        if block.rule_before {
            output.push_str(&self.render_rule("mb-4"));
            output.push('\n');
        }

        match self.options.table_style {
            TableStyle::Themed => self.render_table_themed(&mut output, block),
            TableStyle::Plain => {
                output.push_str("<pre>");
                output.push_str(&encode_text(&block.table.plain_text()));
                output.push_str("</pre>\n");
            }
        }

        if block.rule_after {
            output.push_str(&self.render_rule("mt-4"));
            output.push('\n');
        }

        output.push_str("</div>");
        output
    }

    fn render_table_themed(&self, output: &mut String, block: &TableBlock) {
        let theme = self.options.theme;
        let table = &block.table;

        output.push_str(&format!(
            "<h3 class=\"text-lg font-bold text-center mb-4 {}\">{}</h3>\n",
            theme.strong_text(),
            encode_text(&table.title)
        ));
        output.push_str("<div class=\"overflow-x-auto\">\n");
        output.push_str(&format!("<table class=\"w-full border {}\">\n", theme.border()));

        if !table.headers.is_empty() {
            output.push_str(&format!("<thead>\n<tr class=\"{}\">", theme.header_background()));
            for header in &table.headers {
                output.push_str(&format!(
                    "<th class=\"font-bold text-left border-r last:border-r-0 px-4 py-3 {} {}\">{}</th>",
                    theme.header_text(),
                    theme.border(),
                    encode_text(header)
                ));
            }
            output.push_str("</tr>\n</thead>\n");
        }

        output.push_str("<tbody>\n");
        for (index, row) in table.rows.iter().enumerate() {
            output.push_str(&format!(
                "<tr class=\"{} {} transition-colors\">",
                theme.row_background(index),
                theme.row_hover()
            ));
            for cell in row {
                output.push_str(&format!(
                    "<td class=\"border-r last:border-r-0 px-4 py-3 {} {}\">{}</td>",
                    theme.body_text(),
                    theme.border(),
                    encode_text(cell)
                ));
            }
            output.push_str("</tr>\n");
        }
        output.push_str("</tbody>\n</table>\n</div>\n");
    }

    /// Render the image gallery.
    pub fn render_images(&self, images: &[ExtractedImage]) -> String {
        let mut output = String::from("<div class=\"image-gallery flex gap-4 overflow-x-auto\">\n");
        for image in images {
            output.push_str(&format!(
                "<figure class=\"shrink-0\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\" class=\"rounded-lg max-h-64\"></figure>\n",
                encode_double_quoted_attribute(&image.url),
                encode_double_quoted_attribute(&image.alt_text)
            ));
        }
        output.push_str("</div>");
        output
    }
}
