//! Project loading: from a directory on disk to an assembled [`Book`].
//!
//! ## Layout
//!
//! ```text
//! <root>/book.toml        optional; defaults are used when absent or invalid
//! <root>/src/SUMMARY.md   required outline
//! <root>/src/**/*.md      chapters, paths relative to src/
//! ```
//!
//! ## Design Notes
//!
//! - The root is validated before anything is read. A rejected root fails
//!   the whole load with no partial output.
//! - Every read goes through a [`PathGuard`]: `book.toml` and `src` against
//!   the root, chapters against the resolved `src` directory.
//! - Recoverable problems (missing or broken config, unreadable chapters) are
//!   collected as [`Warning`]s instead of failing the load.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::assemble::{AssembledDocument, NavEntry, assemble};
use crate::config::BookConfig;
use crate::error::{Error, Result};
use crate::guard::{MAX_MARKDOWN_SIZE, PathGuard, validate_project_root};
use crate::markdown::detect_title;
use crate::summary::{Chapter, parse_summary};

pub const CONFIG_FILE: &str = "book.toml";
pub const SOURCE_DIR: &str = "src";
pub const SUMMARY_FILE: &str = "SUMMARY.md";

/// A recoverable problem found while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// No `book.toml`; defaults were used.
    ConfigMissing,
    /// `book.toml` could not be read or parsed; defaults were used.
    ConfigInvalid(String),
    /// A chapter body was replaced by a placeholder comment.
    ChapterUnreadable {
        path: String,
        reason: String,
        security: bool,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::ConfigMissing => write!(f, "{CONFIG_FILE} not found, using defaults"),
            Warning::ConfigInvalid(reason) => {
                write!(f, "{CONFIG_FILE} ignored, using defaults: {reason}")
            }
            Warning::ChapterUnreadable { path, reason, .. } => {
                write!(f, "chapter {path} not included: {reason}")
            }
        }
    }
}

/// An assembled book.
#[derive(Debug)]
pub struct Book {
    root: PathBuf,
    config: BookConfig,
    chapters: Vec<Chapter>,
    document: AssembledDocument,
    warnings: Vec<Warning>,
}

impl Book {
    /// Load and assemble the project at `root`.
    ///
    /// # Errors
    ///
    /// Fails if the root is rejected, `src` escapes the root, or
    /// `src/SUMMARY.md` is missing or unreadable.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = validate_project_root(root)?;
        let guard = PathGuard::new(&root);
        let mut warnings = Vec::new();

        let config = match BookConfig::load(&root) {
            Ok(config) => config,
            Err(Error::NotFound(_)) => {
                info!("no {CONFIG_FILE}, using defaults");
                warnings.push(Warning::ConfigMissing);
                BookConfig::default()
            }
            Err(e) => {
                warn!(error = %e, "ignoring {CONFIG_FILE}");
                warnings.push(Warning::ConfigInvalid(e.to_string()));
                BookConfig::default()
            }
        };

        let summary_candidate = format!("{SOURCE_DIR}/{SUMMARY_FILE}");
        let summary = match guard.read_to_string(&summary_candidate, MAX_MARKDOWN_SIZE) {
            Err(Error::NotFound(_)) => {
                return Err(Error::SummaryNotFound(root.join(&summary_candidate)));
            }
            other => other?,
        };
        let chapters = parse_summary(&summary);

        let src = guard.resolve(SOURCE_DIR)?.into_path_buf();
        let document = assemble(&chapters, &PathGuard::new(src));

        warnings.extend(document.issues.iter().map(|issue| Warning::ChapterUnreadable {
            path: issue.path.clone(),
            reason: issue.error.to_string(),
            security: issue.error.is_security_violation(),
        }));

        info!(
            root = %root.display(),
            chapters = chapters.len(),
            warnings = warnings.len(),
            "assembled book"
        );

        Ok(Self {
            root,
            config,
            chapters,
            document,
            warnings,
        })
    }

    /// Load a single Markdown file as a one-document book.
    ///
    /// The file is named directly by the caller, so its directory is not held
    /// to the project-root deny-list; only the read goes through a
    /// [`PathGuard`] on the canonical parent. The title comes from the first
    /// `#` heading, or the file stem when there is none.
    pub fn from_markdown_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::NotFound(path.to_path_buf()))?;
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let root = parent.canonicalize().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::NotFound(parent.to_path_buf()),
            _ => Error::Io(e),
        })?;
        let markdown = PathGuard::new(&root).read_to_string(&name, MAX_MARKDOWN_SIZE)?;

        let title = detect_title(&markdown).unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| BookConfig::default().title)
        });

        Ok(Self {
            root,
            config: BookConfig::default().with_title(title),
            chapters: Vec::new(),
            document: AssembledDocument {
                markdown,
                ..AssembledDocument::default()
            },
            warnings: Vec::new(),
        })
    }

    /// Canonical project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    /// Mutable access to the config, e.g. to override the title.
    pub fn config_mut(&mut self) -> &mut BookConfig {
        &mut self.config
    }

    pub fn title(&self) -> &str {
        &self.config.title
    }

    /// The parsed outline.
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn document(&self) -> &AssembledDocument {
        &self.document
    }

    /// The combined Markdown.
    pub fn markdown(&self) -> &str {
        &self.document.markdown
    }

    pub fn navigation(&self) -> &[NavEntry] {
        &self.document.navigation
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}
