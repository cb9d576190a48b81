//! Validation of user-supplied project roots.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result, Violation};
use crate::util::has_control_chars;

/// System directories a project root may never live under.
pub const SENSITIVE_DIRS: &[&str] = &[
    "/etc",
    "/var",
    "/root",
    "/home/root",
    "/sys",
    "/proc",
    "/dev",
    "/boot",
    "/private/etc",
];

/// Validate a project root and return its canonical path.
///
/// `.` and `..` components are collapsed lexically; a `..` that climbs above
/// the start of the path is refused. The deny-list is checked against the absolute path as given and again
/// after symlink resolution, so a symlink pointing into `/etc` is refused
/// with `/etc` named in the error.
pub fn validate_project_root(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let raw = path.to_string_lossy();

    if raw.is_empty() {
        return Err(Error::security(raw, Violation::EmptyPath));
    }
    if has_control_chars(&raw) {
        return Err(Error::security(raw, Violation::ControlCharacter));
    }
    let normalized =
        collapse_components(path).ok_or_else(|| Error::security(&*raw, Violation::Traversal))?;

    let absolute = if normalized.is_absolute() {
        normalized
    } else {
        std::env::current_dir()?.join(normalized)
    };
    check_sensitive(&absolute, &raw)?;

    let real = absolute.canonicalize().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound(absolute.clone())
        } else {
            Error::Io(e)
        }
    })?;
    check_sensitive(&real, &raw)?;

    debug!(root = %real.display(), "validated project root");
    Ok(real)
}

fn collapse_components(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    let mut depth = 0usize;
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component),
            Component::CurDir => {}
            Component::ParentDir => {
                depth = depth.checked_sub(1)?;
                out.pop();
            }
            Component::Normal(name) => {
                depth += 1;
                out.push(name);
            }
        }
    }
    Some(out)
}

fn check_sensitive(path: &Path, raw: &str) -> Result<()> {
    match SENSITIVE_DIRS.iter().copied().find(|dir| path.starts_with(dir)) {
        Some(dir) => Err(Error::security(raw, Violation::SensitiveDirectory(dir))),
        None => Ok(()),
    }
}
