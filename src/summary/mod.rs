//! `SUMMARY.md` outline parsing.
//!
//! Turns the outline of an mdBook-style project into a flat, ordered list of
//! [`Chapter`]s annotated with nesting level and dotted section number.
//! Parsing is pure: no file is opened here.
//!
//! ## Grammar
//!
//! ```text
//! # Part Title                 part title (skipped when it reads "Summary")
//! ---                          separator (three or more hyphens)
//! - [Title](path/to/file.md)   chapter; `*` also works as the marker
//!   - [Child](child.md)        two columns (or half a tab) per level
//! - [Not yet written]()        draft, no path
//! ```
//!
//! ## Design Notes
//!
//! - The list is flat; hierarchy is carried by `level`. Consumers that want a
//!   tree can fold it, but assembly is a linear walk anyway.
//! - Numbering starts at the first root-level chapter with a path. Prefix
//!   chapters before it stay unnumbered, as do drafts and part titles.
//! - Lines that match nothing are skipped. They are logged at trace level.

mod numbering;
mod scanner;

use serde::Serialize;
use tracing::trace;

pub use numbering::{MAX_COUNTER_DEPTH, Numbering};
pub use scanner::{Line, classify};

/// What a summary entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChapterKind {
    /// A chapter backed by a source file.
    Chapter,
    /// A chapter listed without a path.
    Draft,
    /// A horizontal rule between groups of chapters.
    Separator,
    /// A `#` heading grouping the chapters that follow.
    PartTitle,
}

/// One entry of the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    pub title: String,
    /// Source path relative to the sources directory. `None` for drafts,
    /// separators and part titles.
    pub path: Option<String>,
    /// Nesting depth. Root entries are level 0.
    pub level: usize,
    pub kind: ChapterKind,
    /// Dotted section number, e.g. `"2.1"`.
    pub number: Option<String>,
}

impl Chapter {
    /// A chapter backed by `path`.
    pub fn new(title: impl Into<String>, path: impl Into<String>, level: usize) -> Self {
        Self {
            title: title.into(),
            path: Some(path.into()),
            level,
            kind: ChapterKind::Chapter,
            number: None,
        }
    }

    pub fn draft(title: impl Into<String>, level: usize) -> Self {
        Self {
            title: title.into(),
            path: None,
            level,
            kind: ChapterKind::Draft,
            number: None,
        }
    }

    pub fn separator() -> Self {
        Self {
            title: String::new(),
            path: None,
            level: 0,
            kind: ChapterKind::Separator,
            number: None,
        }
    }

    pub fn part_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: None,
            level: 0,
            kind: ChapterKind::PartTitle,
            number: None,
        }
    }

    /// Set the section number.
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn is_draft(&self) -> bool {
        self.kind == ChapterKind::Draft
    }

    pub fn is_separator(&self) -> bool {
        self.kind == ChapterKind::Separator
    }

    pub fn is_part_title(&self) -> bool {
        self.kind == ChapterKind::PartTitle
    }

    /// Title with the section number prefixed, e.g. `"1.2. Setup"`.
    pub fn display_title(&self) -> String {
        match &self.number {
            Some(number) => format!("{number}. {}", self.title),
            None => self.title.clone(),
        }
    }
}

/// Parse `SUMMARY.md` text into an ordered chapter list.
///
/// # Examples
///
/// ```
/// use quire::summary::parse_summary;
///
/// let chapters = parse_summary("# Summary\n\n- [Intro](intro.md)\n  - [Setup](setup.md)\n");
/// assert_eq!(chapters.len(), 2);
/// assert_eq!(chapters[1].number.as_deref(), Some("1.1"));
/// ```
pub fn parse_summary(text: &str) -> Vec<Chapter> {
    let mut chapters = Vec::new();
    let mut numbering = Numbering::new();
    let mut numbered = false;

    for (index, line) in text.lines().enumerate() {
        match classify(line) {
            Line::Blank => {}
            Line::Unrecognized => trace!(line = index + 1, "skipping unrecognized summary line"),
            Line::Separator => chapters.push(Chapter::separator()),
            Line::PartTitle(title) => {
                if title.to_lowercase() != "summary" {
                    chapters.push(Chapter::part_title(title));
                }
            }
            Line::Link { level, title, path } if path.is_empty() => {
                chapters.push(Chapter::draft(title, level));
            }
            Line::Link { level, title, path } => {
                if !numbered && level == 0 {
                    numbered = true;
                }
                let mut chapter = Chapter::new(title, path, level);
                if numbered {
                    chapter.number = Some(numbering.next(level));
                }
                chapters.push(chapter);
            }
        }
    }

    chapters
}
