//! # quire
//!
//! Assemble an mdBook-style project (a `book.toml` plus Markdown chapters
//! listed in `src/SUMMARY.md`) into one linear document, without ever reading
//! outside the project and without letting book text break out of the HTML,
//! JavaScript or CSS it is embedded in.
//!
//! ## Features
//!
//! - `SUMMARY.md` parsing with nesting levels, drafts, part titles,
//!   separators and hierarchical numbering
//! - Path resolution confined to a base directory (traversal, absolute
//!   paths, encoded `..`, symlink escapes)
//! - Chapter assembly with heading remapping and navigation metadata
//! - Context-aware escapers for HTML, JS strings, `<script>` blocks and CSS
//!   values, plus a filename sanitizer
//!
//! ## Quick Start
//!
//! ```no_run
//! use quire::Book;
//! use quire::export::{Exporter, MarkdownExporter};
//!
//! let book = Book::open("path/to/book")?;
//! for warning in book.warnings() {
//!     eprintln!("warning: {warning}");
//! }
//! MarkdownExporter::new().export(&book, &mut std::io::stdout())?;
//! # Ok::<(), quire::Error>(())
//! ```
//!
//! ## Working with the pieces
//!
//! Each stage is usable on its own:
//!
//! ```
//! use quire::summary::parse_summary;
//! use quire::sanitize::{escape_for_script_tag, sanitize_filename};
//!
//! let chapters = parse_summary("- [One](one.md)\n  - [Two](two.md)\n");
//! assert_eq!(chapters[1].number.as_deref(), Some("1.1"));
//!
//! assert_eq!(escape_for_script_tag("</script>"), "<\\/script>");
//! assert_eq!(sanitize_filename("../notes.md"), "notes.html");
//! ```

pub mod assemble;
pub mod cache;
pub mod config;
pub mod error;
pub mod export;
pub mod guard;
pub mod markdown;
pub mod project;
pub mod sanitize;
pub mod summary;
pub(crate) mod util;
pub mod vendor;

pub use assemble::{AssembledDocument, NavEntry};
pub use config::BookConfig;
pub use error::{Error, Result, Violation};
pub use project::{Book, Warning};
pub use summary::{Chapter, ChapterKind, parse_summary};
