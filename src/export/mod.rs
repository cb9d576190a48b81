//! Export module for writing assembled books.
//!
//! Provides the `Exporter` trait and format-specific implementations.
//!
//! # Architecture
//!
//! The `Exporter` trait uses a builder pattern:
//! - `new()` creates an exporter with default configuration
//! - `with_config()` allows customization
//! - `export()` writes to any `Write` destination
//!
//! Exporters are the boundary where untrusted text leaves the crate, so this
//! is where [`crate::sanitize`] is applied.
//!
//! # Example
//!
//! ```no_run
//! use quire::Book;
//! use quire::export::{Exporter, HtmlExporter};
//! use std::fs::File;
//!
//! let book = Book::open("my-book")?;
//! let mut file = File::create("my-book.html")?;
//! HtmlExporter::new().export(&book, &mut file)?;
//! # Ok::<(), quire::Error>(())
//! ```

use std::io::{self, Write};

use crate::project::Book;

mod html;
mod markdown;

pub use html::{DEFAULT_CONTENT_WIDTH, DEFAULT_FONT_SIZE, HtmlConfig, HtmlExporter};
pub use markdown::{MarkdownConfig, MarkdownExporter};

/// Trait for exporting books to specific formats.
pub trait Exporter {
    /// File extension (with leading dot) for this format.
    fn extension(&self) -> &'static str;

    /// Export the book to the provided writer.
    fn export<W: Write>(&self, book: &Book, writer: &mut W) -> io::Result<()>;
}
