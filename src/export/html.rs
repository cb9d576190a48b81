//! HTML Exporter - a standalone page shell around the combined Markdown.
//!
//! The page does not render Markdown itself. It carries the document in a
//! `<script type="text/markdown">` data island and the navigation entries in
//! a JSON island, for client-side scripts (supplied with
//! [`HtmlConfig::with_script`]) to render.
//!
//! Every value is escaped for the context it lands in:
//!
//! | Value               | Context               | Escaper                   |
//! |---------------------|-----------------------|---------------------------|
//! | title, language     | element text / attr   | `escape_html`             |
//! | markdown, nav JSON  | script data block     | `escape_for_script_tag`   |
//! | title               | JS string literal     | `escape_js_string`        |
//! | font size, width    | CSS value             | `sanitize_css_size`       |

use std::io::{self, Write};

use crate::project::Book;
use crate::sanitize::{escape_for_script_tag, escape_html, escape_js_string, sanitize_css_size};

use super::Exporter;

pub const DEFAULT_FONT_SIZE: &str = "16px";
pub const DEFAULT_CONTENT_WIDTH: &str = "800px";

/// Configuration for HTML export.
#[derive(Debug, Clone)]
pub struct HtmlConfig {
    /// Base font size as a CSS length.
    pub font_size: String,
    /// Maximum content width as a CSS length.
    pub content_width: String,
    /// Overrides the book title.
    pub title: Option<String>,
    /// Script sources inlined after the data islands, in order.
    pub scripts: Vec<String>,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE.to_string(),
            content_width: DEFAULT_CONTENT_WIDTH.to_string(),
            title: None,
            scripts: Vec::new(),
        }
    }
}

impl HtmlConfig {
    pub fn with_font_size(mut self, size: impl Into<String>) -> Self {
        self.font_size = size.into();
        self
    }

    pub fn with_content_width(mut self, width: impl Into<String>) -> Self {
        self.content_width = width.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Inline a script, e.g. one loaded with [`crate::vendor::VendorDir`].
    pub fn with_script(mut self, source: impl Into<String>) -> Self {
        self.scripts.push(source.into());
        self
    }
}

/// Exporter for standalone HTML pages.
#[derive(Debug, Clone, Default)]
pub struct HtmlExporter {
    config: HtmlConfig,
}

impl HtmlExporter {
    /// Create a new HtmlExporter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an HtmlExporter with the specified configuration.
    pub fn with_config(config: HtmlConfig) -> Self {
        Self { config }
    }
}

impl Exporter for HtmlExporter {
    fn extension(&self) -> &'static str {
        ".html"
    }

    fn export<W: Write>(&self, book: &Book, writer: &mut W) -> io::Result<()> {
        let config = book.config();
        let title = self.config.title.as_deref().unwrap_or(&config.title);
        let font_size = sanitize_css_size(&self.config.font_size, DEFAULT_FONT_SIZE);
        let content_width = sanitize_css_size(&self.config.content_width, DEFAULT_CONTENT_WIDTH);
        let nav = serde_json::to_string(book.navigation())?;

        writeln!(writer, "<!DOCTYPE html>")?;
        writeln!(writer, "<html lang=\"{}\">", escape_html(&config.language))?;
        writeln!(writer, "<head>")?;
        writeln!(writer, "<meta charset=\"utf-8\">")?;
        writeln!(
            writer,
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">"
        )?;
        if !config.authors.is_empty() {
            writeln!(
                writer,
                "<meta name=\"author\" content=\"{}\">",
                escape_html(&config.authors.join(", "))
            )?;
        }
        if let Some(description) = &config.description {
            writeln!(
                writer,
                "<meta name=\"description\" content=\"{}\">",
                escape_html(description)
            )?;
        }
        writeln!(writer, "<title>{}</title>", escape_html(title))?;
        writeln!(writer, "<style>")?;
        writeln!(
            writer,
            ":root {{ --base-font-size: {font_size}; --content-width: {content_width}; }}"
        )?;
        writeln!(writer, "body {{ font-size: var(--base-font-size); }}")?;
        writeln!(
            writer,
            "main {{ max-width: var(--content-width); margin: 0 auto; }}"
        )?;
        writeln!(writer, "</style>")?;
        writeln!(writer, "</head>")?;
        writeln!(writer, "<body>")?;
        writeln!(writer, "<main id=\"content\"></main>")?;

        writeln!(writer, "<script id=\"md-source\" type=\"text/markdown\">")?;
        writeln!(writer, "{}", escape_for_script_tag(book.markdown()))?;
        writeln!(writer, "</script>")?;
        writeln!(
            writer,
            "<script id=\"md-nav\" type=\"application/json\">{}</script>",
            escape_for_script_tag(&nav)
        )?;
        writeln!(
            writer,
            "<script>window.BOOK_TITLE = \"{}\";</script>",
            escape_js_string(title)
        )?;

        for script in &self.config.scripts {
            writeln!(writer, "<script>")?;
            writeln!(writer, "{}", escape_for_script_tag(script))?;
            writeln!(writer, "</script>")?;
        }

        writeln!(writer, "</body>")?;
        writeln!(writer, "</html>")?;
        Ok(())
    }
}
