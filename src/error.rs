//! Error types for quire operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading, assembling or exporting a book.
#[derive(Error, Debug)]
pub enum Error {
    /// A path failed validation. The original candidate is kept so callers can
    /// report exactly what was refused.
    #[error("Security violation: {violation} ({candidate:?})")]
    SecurityViolation {
        candidate: String,
        violation: Violation,
    },

    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("SUMMARY.md not found in src/ directory: {}", .0.display())]
    SummaryNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid book.toml: {0}")]
    Config(#[from] toml::de::Error),

    #[error("File too large: {} ({size} bytes, limit {limit})", .path.display())]
    TooLarge {
        path: PathBuf,
        size: u64,
        limit: u64,
    },

    #[error("Invalid asset {name}: {reason}")]
    InvalidAsset { name: String, reason: String },
}

/// The reason a path was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("path is empty")]
    EmptyPath,

    #[error("path contains control characters")]
    ControlCharacter,

    #[error("path traversal patterns (..) are not allowed")]
    Traversal,

    #[error("percent-encoded path traversal is not allowed")]
    EncodedTraversal,

    #[error("path resolves outside of its base directory")]
    OutsideBase,

    #[error("access to system directory '{0}' is not allowed")]
    SensitiveDirectory(&'static str),

    #[error("invalid vendor file name")]
    InvalidVendorName,
}

impl Error {
    pub(crate) fn security(candidate: impl Into<String>, violation: Violation) -> Self {
        Error::SecurityViolation {
            candidate: candidate.into(),
            violation,
        }
    }

    /// Whether this error is a path rejection rather than an ordinary failure.
    pub fn is_security_violation(&self) -> bool {
        matches!(self, Error::SecurityViolation { .. })
    }

    /// The refusal reason, if this is a security violation.
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Error::SecurityViolation { violation, .. } => Some(violation),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
