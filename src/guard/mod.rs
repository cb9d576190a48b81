//! Path resolution confined to a trusted base directory.
//!
//! Every file the assembler touches is named by untrusted text: chapter paths
//! from `SUMMARY.md`, vendor asset names, the project root itself. This module
//! turns such text into a [`ResolvedPath`] that is guaranteed to be the base
//! or a descendant of it, or refuses with [`Error::SecurityViolation`].
//!
//! ## Design Notes
//!
//! - Candidates are checked lexically first (empty, control characters,
//!   percent-encoded `..`). `.` and `..` segments are then collapsed with both
//!   `/` and `\` as separators; a `..` that climbs above the start of the
//!   candidate is refused, so `chapters/../intro.md` is fine and
//!   `chapters/../../x` is not. The collapsed path is joined onto the base and
//!   checked again after symlink resolution, since a symlink inside the base
//!   may point anywhere.
//! - Both the base and the target are canonicalized on every call. Nothing is
//!   cached, so swapping a directory for a symlink between calls is observed.
//! - Reads stat the canonical path before opening it and refuse anything but
//!   a regular file, so a FIFO or device node never blocks the open. The
//!   window between that stat and the open is the only remaining race.

mod root;

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use tracing::debug;

use crate::error::{Error, Result, Violation};
use crate::util::{decode_text, has_control_chars, read_bounded};

pub use root::{SENSITIVE_DIRS, validate_project_root};

/// Upper bound for Markdown sources (chapters, `SUMMARY.md`, `book.toml`).
pub const MAX_MARKDOWN_SIZE: u64 = 10 * 1024 * 1024;

/// Rounds of percent-decoding applied when looking for hidden `..` segments.
const DECODE_ROUNDS: usize = 3;

/// An absolute, symlink-free path known to lie inside its base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    path: PathBuf,
    candidate: String,
}

impl ResolvedPath {
    /// The canonical filesystem path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The untrusted text this path was resolved from.
    pub fn candidate(&self) -> &str {
        &self.candidate
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }

    /// Read the file as text, refusing anything larger than `limit` bytes.
    pub fn read_to_string(&self, limit: u64) -> Result<String> {
        let meta = fs::metadata(&self.path).map_err(|e| io_error(&self.path, e))?;
        if !meta.is_file() {
            return Err(self.not_regular());
        }

        let file = File::open(&self.path).map_err(|e| io_error(&self.path, e))?;
        let meta = file.metadata()?;
        if !meta.is_file() {
            return Err(self.not_regular());
        }
        if meta.len() > limit {
            return Err(Error::TooLarge {
                path: self.path.clone(),
                size: meta.len(),
                limit,
            });
        }

        let bytes = read_bounded(file, &self.path, limit)?;
        Ok(decode_text(&bytes).into_owned())
    }

    fn not_regular(&self) -> Error {
        Error::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a regular file", self.path.display()),
        ))
    }
}

/// Resolves candidates against one base directory.
#[derive(Debug, Clone)]
pub struct PathGuard {
    base: PathBuf,
}

impl PathGuard {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// See [`resolve`].
    pub fn resolve(&self, candidate: &str) -> Result<ResolvedPath> {
        resolve(&self.base, candidate)
    }

    /// Resolve `candidate` and read it as text.
    pub fn read_to_string(&self, candidate: &str, limit: u64) -> Result<String> {
        self.resolve(candidate)?.read_to_string(limit)
    }
}

/// Resolve `candidate` relative to `base`.
///
/// Returns the canonical path when it is `base` itself or a descendant of it.
/// A missing target is [`Error::NotFound`]; anything that would leave the base
/// is [`Error::SecurityViolation`].
pub fn resolve(base: &Path, candidate: &str) -> Result<ResolvedPath> {
    check_candidate(candidate)?;

    let segments = collapse_segments(candidate)
        .ok_or_else(|| Error::security(candidate, Violation::Traversal))?;

    // Joining an absolute candidate would replace the base entirely.
    if candidate.starts_with(['/', '\\']) || Path::new(candidate).is_absolute() {
        return Err(Error::security(candidate, Violation::OutsideBase));
    }

    let base_real = canonicalize(base)?;
    let mut joined = base_real.clone();
    joined.extend(segments);

    let real = canonicalize(&joined)?;
    if !real.starts_with(&base_real) {
        debug!(
            candidate,
            target = %real.display(),
            "rejected path escaping base via symlink"
        );
        return Err(Error::security(candidate, Violation::OutsideBase));
    }

    debug!(candidate, path = %real.display(), "resolved path");
    Ok(ResolvedPath {
        path: real,
        candidate: candidate.to_string(),
    })
}

/// Check that `name` is a plain vendor file name.
///
/// Accepted names start with an ASCII letter or digit followed by letters,
/// digits, `.`, `_` or `-`.
pub fn validate_vendor_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::security(name, Violation::InvalidVendorName))
    }
}

/// Resolve a vendor file by bare name inside `dir`.
pub fn resolve_vendor(dir: &Path, name: &str) -> Result<ResolvedPath> {
    validate_vendor_name(name)?;
    resolve(dir, name)
}

// ============================================================================
// Lexical Checks
// ============================================================================

fn check_candidate(candidate: &str) -> Result<()> {
    if candidate.is_empty() {
        return Err(Error::security(candidate, Violation::EmptyPath));
    }
    if has_control_chars(candidate) {
        return Err(Error::security(candidate, Violation::ControlCharacter));
    }
    if has_encoded_traversal(candidate) {
        return Err(Error::security(candidate, Violation::EncodedTraversal));
    }
    Ok(())
}

/// Collapse `.` and `..` segments, splitting on both `/` and `\`.
///
/// Returns `None` when a `..` would climb above the start of `path`.
fn collapse_segments(path: &str) -> Option<Vec<&str>> {
    let mut segments = Vec::new();
    for segment in path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            name => segments.push(name),
        }
    }
    Some(segments)
}

/// Whether any `/` or `\` separated segment is exactly `..`.
fn has_traversal_segment(path: &str) -> bool {
    path.split(['/', '\\']).any(|segment| segment == "..")
}

fn has_encoded_traversal(path: &str) -> bool {
    let mut current = path.to_string();
    for _ in 0..DECODE_ROUNDS {
        let decoded = percent_decode_str(&current).decode_utf8_lossy().into_owned();
        if decoded == current {
            return false;
        }
        if has_traversal_segment(&decoded) {
            return true;
        }
        current = decoded;
    }
    false
}

fn canonicalize(path: &Path) -> Result<PathBuf> {
    path.canonicalize().map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, e: io::Error) -> Error {
    if e.kind() == io::ErrorKind::NotFound {
        Error::NotFound(path.to_path_buf())
    } else {
        Error::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("chapters")).unwrap();
        fs::write(dir.path().join("chapters/one.md"), "# One\n").unwrap();
        fs::write(dir.path().join("intro.md"), "Hello").unwrap();
        dir
    }

    fn violation(result: Result<ResolvedPath>) -> Violation {
        match result {
            Err(Error::SecurityViolation { violation, .. }) => violation,
            other => panic!("expected security violation, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_simple_file() {
        let dir = setup();
        let resolved = resolve(dir.path(), "intro.md").unwrap();
        let base = dir.path().canonicalize().unwrap();
        assert_eq!(resolved.path(), base.join("intro.md"));
        assert_eq!(resolved.candidate(), "intro.md");
    }

    #[test]
    fn test_resolve_nested_file() {
        let dir = setup();
        let resolved = resolve(dir.path(), "chapters/one.md").unwrap();
        assert!(resolved.path().ends_with("chapters/one.md"));
    }

    #[test]
    fn test_resolve_dot_segments_inside_base() {
        let dir = setup();
        let resolved = resolve(dir.path(), "./chapters/./one.md").unwrap();
        assert!(resolved.path().ends_with("chapters/one.md"));
    }

    #[test]
    fn test_resolve_parent_segments_inside_base() {
        let dir = setup();
        let base = dir.path().canonicalize().unwrap();
        let resolved = resolve(dir.path(), "chapters/../intro.md").unwrap();
        assert_eq!(resolved.path(), base.join("intro.md"));
        assert_eq!(resolved.candidate(), "chapters/../intro.md");

        let resolved = resolve(dir.path(), "chapters\\..\\chapters\\one.md").unwrap();
        assert_eq!(resolved.path(), base.join("chapters/one.md"));
    }

    #[test]
    fn test_parent_segments_collapse_lexically() {
        // `missing/..` never touches the filesystem.
        let dir = setup();
        assert!(resolve(dir.path(), "missing/../intro.md").is_ok());
    }

    #[test]
    fn test_collapse_segments() {
        assert_eq!(collapse_segments("a/./b/../c"), Some(vec!["a", "c"]));
        assert_eq!(collapse_segments("a\\b\\..\\c"), Some(vec!["a", "c"]));
        assert_eq!(collapse_segments("a/.."), Some(vec![]));
        assert_eq!(collapse_segments("a/../.."), None);
        assert_eq!(collapse_segments("../a"), None);
        assert_eq!(collapse_segments("/../a"), None);
    }

    #[test]
    fn test_resolve_base_itself() {
        let dir = setup();
        let resolved = resolve(dir.path(), ".").unwrap();
        assert_eq!(resolved.path(), dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_reject_empty() {
        let dir = setup();
        assert_eq!(violation(resolve(dir.path(), "")), Violation::EmptyPath);
    }

    #[test]
    fn test_reject_control_characters() {
        let dir = setup();
        assert_eq!(
            violation(resolve(dir.path(), "intro.md\0.txt")),
            Violation::ControlCharacter
        );
        assert_eq!(
            violation(resolve(dir.path(), "intro\n.md")),
            Violation::ControlCharacter
        );
    }

    #[test]
    fn test_reject_traversal() {
        let dir = setup();
        for candidate in [
            "../etc/passwd",
            "../../../../etc/passwd",
            "chapters/../../secret.md",
            "..",
            "..\\..\\windows\\system32",
            "chapters\\..\\..\\x",
            "chapters/../../x",
            "chapters/one.md/../../..",
        ] {
            assert_eq!(
                violation(resolve(dir.path(), candidate)),
                Violation::Traversal,
                "{candidate}"
            );
        }
    }

    #[test]
    fn test_reject_encoded_traversal() {
        let dir = setup();
        assert_eq!(
            violation(resolve(dir.path(), "%2e%2e/%2e%2e/etc/passwd")),
            Violation::EncodedTraversal
        );
        assert_eq!(
            violation(resolve(dir.path(), "%252e%252e/secret")),
            Violation::EncodedTraversal
        );
    }

    #[test]
    fn test_reject_absolute_override() {
        let dir = setup();
        assert_eq!(
            violation(resolve(dir.path(), "/etc/passwd")),
            Violation::OutsideBase
        );
        assert_eq!(
            violation(resolve(dir.path(), "/nonexistent/file.md")),
            Violation::OutsideBase
        );
        assert_eq!(
            violation(resolve(dir.path(), "/../../../etc/passwd")),
            Violation::Traversal
        );
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = setup();
        let err = resolve(dir.path(), "missing.md").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(!err.is_security_violation());
    }

    #[test]
    fn test_missing_base_is_not_found() {
        let dir = setup();
        let err = resolve(&dir.path().join("nope"), "intro.md").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_names_with_dots_are_not_traversal() {
        let dir = setup();
        fs::write(dir.path().join("a..b.md"), "x").unwrap();
        fs::write(dir.path().join("...md"), "x").unwrap();
        assert!(resolve(dir.path(), "a..b.md").is_ok());
        assert!(resolve(dir.path(), "...md").is_ok());
    }

    #[test]
    fn test_read_to_string() {
        let dir = setup();
        let guard = PathGuard::new(dir.path());
        assert_eq!(
            guard.read_to_string("intro.md", MAX_MARKDOWN_SIZE).unwrap(),
            "Hello"
        );
    }

    #[test]
    fn test_read_to_string_strips_bom() {
        let dir = setup();
        fs::write(dir.path().join("bom.md"), b"\xEF\xBB\xBF# Hello\n").unwrap();
        let guard = PathGuard::new(dir.path());
        let content = guard.read_to_string("bom.md", MAX_MARKDOWN_SIZE).unwrap();
        assert_eq!(content, "# Hello\n");
    }

    #[test]
    fn test_read_to_string_size_limit() {
        let dir = setup();
        let guard = PathGuard::new(dir.path());
        let err = guard.read_to_string("intro.md", 3).unwrap_err();
        assert!(matches!(err, Error::TooLarge { size: 5, limit: 3, .. }));
    }

    #[test]
    fn test_read_directory_fails() {
        let dir = setup();
        let guard = PathGuard::new(dir.path());
        let err = guard
            .read_to_string("chapters", MAX_MARKDOWN_SIZE)
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_fifo_fails_without_blocking() {
        let dir = setup();
        let fifo = dir.path().join("pipe.md");
        let status = std::process::Command::new("mkfifo")
            .arg(&fifo)
            .status()
            .unwrap();
        assert!(status.success());

        let guard = PathGuard::new(dir.path());
        let err = guard.read_to_string("pipe.md", MAX_MARKDOWN_SIZE).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("not a regular file"));
    }

    #[test]
    fn test_read_traversal_mentions_security() {
        let dir = setup();
        let guard = PathGuard::new(dir.path());
        let err = guard
            .read_to_string("../../../etc/passwd", MAX_MARKDOWN_SIZE)
            .unwrap_err();
        assert!(err.to_string().contains("Security violation"));
    }

    #[test]
    fn test_vendor_names() {
        for name in ["marked.min.js", "highlight-11.js", "a", "purify_3.js", "v1..2.js"] {
            assert!(validate_vendor_name(name).is_ok(), "{name}");
        }
        for name in [
            "",
            ".hidden.js",
            "-flag.js",
            "../marked.js",
            "dir/marked.js",
            "mark ed.js",
            "marked.js\0",
            "märked.js",
        ] {
            assert!(validate_vendor_name(name).is_err(), "{name:?}");
        }
    }

    #[test]
    fn test_resolve_vendor() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("marked.min.js"), "x").unwrap();
        assert!(resolve_vendor(dir.path(), "marked.min.js").is_ok());
        let err = resolve_vendor(dir.path(), "../marked.min.js").unwrap_err();
        assert_eq!(err.violation(), Some(&Violation::InvalidVendorName));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escape_rejected() {
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("secret.txt"), "secret").unwrap();

        let dir = setup();
        std::os::unix::fs::symlink(outside.path().join("secret.txt"), dir.path().join("link.md"))
            .unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("linkdir")).unwrap();

        assert_eq!(violation(resolve(dir.path(), "link.md")), Violation::OutsideBase);
        assert_eq!(
            violation(resolve(dir.path(), "linkdir/secret.txt")),
            Violation::OutsideBase
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_inside_base_accepted() {
        let dir = setup();
        std::os::unix::fs::symlink(dir.path().join("intro.md"), dir.path().join("alias.md"))
            .unwrap();
        let resolved = resolve(dir.path(), "alias.md").unwrap();
        assert_eq!(
            resolved.path(),
            dir.path().join("intro.md").canonicalize().unwrap()
        );
    }
}
