//! `book.toml` configuration.
//!
//! Only the `[book]` table is read. Unknown tables and keys (`[output.html]`,
//! `[preprocessor.*]`, ...) are ignored so real mdBook projects load as-is.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::guard::{MAX_MARKDOWN_SIZE, PathGuard};

/// Book metadata from the `[book]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct BookToml {
    #[serde(default)]
    book: BookConfig,
}

fn default_title() -> String {
    "Book".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            authors: Vec::new(),
            language: default_language(),
            description: None,
        }
    }
}

impl BookConfig {
    /// Parse the contents of a `book.toml` file.
    ///
    /// # Examples
    ///
    /// ```
    /// use quire::BookConfig;
    ///
    /// let config = BookConfig::from_toml_str("[book]\ntitle = \"Guide\"\n")?;
    /// assert_eq!(config.title, "Guide");
    /// assert_eq!(config.language, "en");
    /// # Ok::<(), quire::Error>(())
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let parsed: BookToml = toml::from_str(s)?;
        Ok(parsed.book)
    }

    /// Read `book.toml` from a project root through the path guard.
    pub fn load(root: &Path) -> Result<Self> {
        let content = PathGuard::new(root).read_to_string("book.toml", MAX_MARKDOWN_SIZE)?;
        Self::from_toml_str(&content)
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Add an author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.authors.push(author.into());
        self
    }

    /// Set the language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}
