//! Vendored script assets (`marked.min.js` and friends).
//!
//! Scripts are looked up by bare file name inside one vendor directory, read
//! with a size ceiling, sanity-checked, and memoized in a caller-owned
//! [`Cache`]. The cache key covers the canonical path, size and modification
//! time, so an updated file is picked up without manual invalidation.

use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use tracing::debug;

use crate::cache::{Cache, CacheKey};
use crate::error::{Error, Result};
use crate::guard::resolve_vendor;

/// Upper bound for a single vendor script.
pub const MAX_VENDOR_ASSET_SIZE: u64 = 5 * 1024 * 1024;

/// Shortest content accepted as a real script. Anything smaller is a
/// placeholder or a failed download.
pub const MIN_SCRIPT_CHARS: usize = 100;

/// A directory of vendored scripts.
#[derive(Debug, Clone)]
pub struct VendorDir {
    dir: PathBuf,
}

impl VendorDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Load the script `name`, reusing `cache` when the file is unchanged.
    pub fn load_script<'c>(&self, name: &str, cache: &'c mut Cache<String>) -> Result<&'c str> {
        let resolved = resolve_vendor(&self.dir, name)?;
        let meta = std::fs::metadata(resolved.path())?;
        let modified = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map_or(0, |d| d.as_nanos());

        let size = meta.len().to_le_bytes();
        let modified = modified.to_le_bytes();
        let key = CacheKey::from_parts([
            resolved.path().as_os_str().as_encoded_bytes(),
            &size[..],
            &modified[..],
        ]);

        let content = cache.get_or_try_insert_with(key, || {
            debug!(name, path = %resolved.path().display(), "loading vendor script");
            let content = resolved.read_to_string(MAX_VENDOR_ASSET_SIZE)?;
            validate_script(name, &content)?;
            Ok::<_, Error>(content)
        })?;
        Ok(content.as_str())
    }
}

/// Reject empty or implausibly short script content.
pub fn validate_script(name: &str, content: &str) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidAsset {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if content.trim().is_empty() {
        return Err(invalid("file is empty"));
    }
    if content.chars().count() < MIN_SCRIPT_CHARS {
        return Err(invalid("file is too small to be a valid script"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn script() -> String {
        format!("/* marked */ {}", "function f(){return 1;}".repeat(10))
    }

    #[test]
    fn test_validate_script() {
        assert!(validate_script("a.js", &script()).is_ok());
        assert!(validate_script("a.js", "").is_err());
        assert!(validate_script("a.js", "   \n").is_err());
        assert!(validate_script("a.js", "var x = 1;").is_err());
    }

    #[test]
    fn test_load_and_cache() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("marked.min.js"), script()).unwrap();

        let vendor = VendorDir::new(dir.path());
        let mut cache = Cache::new();
        let first = vendor.load_script("marked.min.js", &mut cache).unwrap().to_string();
        assert_eq!(first, script());
        assert_eq!(cache.len(), 1);

        vendor.load_script("marked.min.js", &mut cache).unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_changed_file_reloaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lib.js");
        fs::write(&path, script()).unwrap();

        let vendor = VendorDir::new(dir.path());
        let mut cache = Cache::new();
        vendor.load_script("lib.js", &mut cache).unwrap();

        let updated = format!("{}// v2 with more content", script());
        fs::write(&path, &updated).unwrap();
        assert_eq!(vendor.load_script("lib.js", &mut cache).unwrap(), updated);
    }

    #[test]
    fn test_invalid_name_rejected() {
        let dir = TempDir::new().unwrap();
        let vendor = VendorDir::new(dir.path());
        let mut cache = Cache::new();
        let err = vendor.load_script("../secret.js", &mut cache).unwrap_err();
        assert!(err.is_security_violation());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_short_file_rejected_and_not_cached() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("stub.js"), "// todo").unwrap();
        let vendor = VendorDir::new(dir.path());
        let mut cache = Cache::new();
        assert!(matches!(
            vendor.load_script("stub.js", &mut cache),
            Err(Error::InvalidAsset { .. })
        ));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let vendor = VendorDir::new(dir.path());
        let mut cache = Cache::new();
        assert!(matches!(
            vendor.load_script("absent.js", &mut cache),
            Err(Error::NotFound(_))
        ));
    }
}
