//! Shared text and I/O helpers.

use std::borrow::Cow;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

// ============================================================================
// Text Decoding
// ============================================================================

/// Decode source bytes to a string.
///
/// Book sources are UTF-8. A leading BOM is removed and malformed sequences
/// become U+FFFD rather than failing the whole chapter.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(decode_text(b"\xEF\xBB\xBF# Title"), "# Title");
/// ```
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, malformed) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
    if malformed {
        tracing::debug!("source contained malformed UTF-8; replaced invalid sequences");
    }
    result
}

// ============================================================================
// Bounded Reads
// ============================================================================

/// Read at most `limit` bytes from `reader`, failing if there is more.
///
/// `path` is only used for the error payload.
pub fn read_bounded<R: Read>(reader: R, path: &Path, limit: u64) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.take(limit.saturating_add(1)).read_to_end(&mut buf)?;

    let size = buf.len() as u64;
    if size > limit {
        return Err(Error::TooLarge {
            path: path.to_path_buf(),
            size,
            limit,
        });
    }
    Ok(buf)
}

/// Whether `s` contains NUL or any other control character.
pub fn has_control_chars(s: &str) -> bool {
    s.chars().any(char::is_control)
}
