//! Escaping for raw text inside `<script>` data blocks.
//!
//! A `<script type="text/markdown">` island is never parsed as JavaScript,
//! but the HTML tokenizer still ends it at the first `</script` followed by
//! whitespace, `/` or `>`. Rewriting `</` to `<\/` in front of every
//! case-insensitive `script` closes that hole for all variants at once.
//! Consumers reading the island undo it by replacing `<\/` with `</`.

use memchr::memchr_iter;

const SCRIPT: &[u8] = b"script";

/// Escape text for embedding between `<script ...>` and `</script>`.
///
/// Only `</script` sequences are touched; input without one is returned
/// unchanged. Runs in linear time.
///
/// # Examples
///
/// ```
/// use quire::sanitize::escape_for_script_tag;
///
/// assert_eq!(escape_for_script_tag("a</SCRIPT >b"), "a<\\/SCRIPT >b");
/// assert_eq!(escape_for_script_tag("no tags"), "no tags");
/// ```
pub fn escape_for_script_tag(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut result = String::with_capacity(s.len());
    let mut last = 0;

    for pos in memchr_iter(b'<', bytes) {
        if is_script_close(bytes, pos) {
            result.push_str(&s[last..=pos]);
            result.push('\\');
            last = pos + 1;
        }
    }
    result.push_str(&s[last..]);
    result
}

/// Whether a case-insensitive `</script` starts at byte `pos`.
pub(crate) fn is_script_close(bytes: &[u8], pos: usize) -> bool {
    let start = pos + 2;
    bytes.get(pos + 1) == Some(&b'/')
        && bytes
            .get(start..start + SCRIPT.len())
            .is_some_and(|name| name.eq_ignore_ascii_case(SCRIPT))
}
