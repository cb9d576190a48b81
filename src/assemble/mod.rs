//! Chapter assembly into a single Markdown document.
//!
//! Walks a parsed outline in order, reads each chapter through a
//! [`ChapterSource`], remaps headings so chapters nest under part titles, and
//! concatenates everything into one document with navigation metadata.
//!
//! ## Output shape
//!
//! ```text
//! # Part Title                  part title
//! ## 1. Chapter                 root chapter (level 0)
//! ### 1.1. Section              nested chapter (level 1), capped at ######
//! ---                           separator
//! ## Later (Draft)              draft placeholder
//! ```
//!
//! ## Design Notes
//!
//! - A chapter that cannot be read does not stop assembly. Its body becomes an
//!   HTML comment naming the path and the error, and an [`ChapterIssue`] is
//!   recorded so callers can report it. Path rejections use a distinct
//!   comment so they are never mistaken for ordinary I/O failures.
//! - The chapter's own `#` title line is dropped because the assembler emits
//!   a numbered heading in its place.

mod heading;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::guard::{MAX_MARKDOWN_SIZE, PathGuard};
use crate::markdown::Slugger;
use crate::sanitize::sanitize_for_html_comment;
use crate::summary::{Chapter, ChapterKind};

pub use heading::{MAX_HEADING_LEVEL, heading_level, heading_marker, strip_leading_h1};

const DRAFT_NOTICE: &str = "*This chapter is under construction.*";

/// Supplies chapter bodies by summary path.
pub trait ChapterSource {
    /// Read the chapter at `path`, relative to the sources directory.
    fn read_chapter(&self, path: &str) -> Result<String>;
}

impl ChapterSource for PathGuard {
    fn read_chapter(&self, path: &str) -> Result<String> {
        self.read_to_string(path, MAX_MARKDOWN_SIZE)
    }
}

impl<S: ChapterSource + ?Sized> ChapterSource for &S {
    fn read_chapter(&self, path: &str) -> Result<String> {
        (**self).read_chapter(path)
    }
}

/// Navigation metadata for one assembled chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    /// Heading text as emitted, including the section number.
    pub title: String,
    pub number: Option<String>,
    pub level: usize,
    /// Index of the chapter in the outline it was assembled from.
    pub source_index: usize,
    /// Unique GitHub-style slug of `title`.
    pub anchor: String,
}

/// A chapter whose body could not be included.
#[derive(Debug)]
pub struct ChapterIssue {
    pub source_index: usize,
    pub path: String,
    pub error: Error,
}

/// The combined document.
#[derive(Debug, Default)]
pub struct AssembledDocument {
    pub markdown: String,
    pub navigation: Vec<NavEntry>,
    pub issues: Vec<ChapterIssue>,
}

/// Assemble `chapters` into one document, reading bodies from `source`.
///
/// # Examples
///
/// ```no_run
/// use quire::assemble::assemble;
/// use quire::guard::PathGuard;
/// use quire::summary::parse_summary;
///
/// let chapters = parse_summary("- [Intro](intro.md)\n");
/// let doc = assemble(&chapters, &PathGuard::new("book/src"));
/// println!("{}", doc.markdown);
/// ```
pub fn assemble<S: ChapterSource + ?Sized>(chapters: &[Chapter], source: &S) -> AssembledDocument {
    let mut doc = AssembledDocument::default();
    let mut slugger = Slugger::new();

    for (index, chapter) in chapters.iter().enumerate() {
        match (chapter.kind, chapter.path.as_deref()) {
            (ChapterKind::Separator, _) => doc.markdown.push_str("\n---\n\n"),
            (ChapterKind::PartTitle, _) => {
                doc.markdown.push_str(&format!("\n# {}\n\n", chapter.title));
            }
            (ChapterKind::Chapter, Some(path)) => {
                let title = chapter.display_title();
                doc.markdown.push_str(&format!(
                    "\n{} {title}\n\n",
                    heading_marker(chapter.level)
                ));

                match source.read_chapter(path) {
                    Ok(content) => {
                        debug!(path, bytes = content.len(), "assembled chapter");
                        doc.markdown.push_str(&strip_leading_h1(&content));
                    }
                    Err(error) => {
                        warn!(path, %error, "chapter not included");
                        doc.markdown.push_str(&error_comment(path, &error));
                        doc.issues.push(ChapterIssue {
                            source_index: index,
                            path: path.to_string(),
                            error,
                        });
                    }
                }
                doc.markdown.push_str("\n\n");

                doc.navigation.push(NavEntry {
                    anchor: slugger.slug(&title),
                    title,
                    number: chapter.number.clone(),
                    level: chapter.level,
                    source_index: index,
                });
            }
            (ChapterKind::Draft, _) | (ChapterKind::Chapter, None) => {
                doc.markdown.push_str(&format!(
                    "\n{} {} (Draft)\n\n{DRAFT_NOTICE}\n\n",
                    heading_marker(chapter.level),
                    chapter.title
                ));
            }
        }
    }

    doc
}

/// Inline placeholder for a chapter that could not be read.
fn error_comment(path: &str, error: &Error) -> String {
    let path = sanitize_for_html_comment(path);
    if error.is_security_violation() {
        format!("<!-- Security Error: Attempted path traversal to {path} -->")
    } else {
        let reason = sanitize_for_html_comment(&error.to_string());
        format!("<!-- Error reading {path}: {reason} -->")
    }
}
