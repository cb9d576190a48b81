//! Markdown Exporter - writes the combined document.

use std::io::{self, Write};

use crate::markdown::tighten_lists;
use crate::project::Book;

use super::Exporter;

/// Configuration for Markdown export.
#[derive(Debug, Clone, Default)]
pub struct MarkdownConfig {
    /// Normalize `-` bullet lists for converters that need blank lines
    /// around lists and none between items.
    pub tight_lists: bool,
}

/// Exporter for Markdown output.
#[derive(Debug, Clone, Default)]
pub struct MarkdownExporter {
    config: MarkdownConfig,
}

impl MarkdownExporter {
    /// Create a new MarkdownExporter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a MarkdownExporter with the specified configuration.
    pub fn with_config(config: MarkdownConfig) -> Self {
        Self { config }
    }
}

impl Exporter for MarkdownExporter {
    fn extension(&self) -> &'static str {
        ".md"
    }

    fn export<W: Write>(&self, book: &Book, writer: &mut W) -> io::Result<()> {
        if self.config.tight_lists {
            writer.write_all(tighten_lists(book.markdown()).as_bytes())
        } else {
            writer.write_all(book.markdown().as_bytes())
        }
    }
}
