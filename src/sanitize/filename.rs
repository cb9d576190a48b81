//! Output filename sanitization.

/// Longest filename, in UTF-8 bytes, most filesystems accept.
pub const MAX_FILENAME_BYTES: usize = 255;

/// Name used when nothing usable is left after sanitization.
const FALLBACK_STEM: &str = "document";

/// Source extensions replaced by the output extension.
const SOURCE_EXTENSIONS: &[&str] = &[".html", ".htm", ".md", ".markdown", ".docx", ".doc"];

/// Sanitize `name` into a safe `.html` filename.
///
/// # Examples
///
/// ```
/// use quire::sanitize::sanitize_filename;
///
/// assert_eq!(sanitize_filename("My Book.md"), "My_Book.html");
/// assert_eq!(sanitize_filename("../../../etc/passwd"), "etcpasswd.html");
/// assert_eq!(sanitize_filename("???"), "document.html");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    sanitize_filename_for_format(name, ".html")
}

/// Sanitize `name` into a safe filename ending in `extension`.
///
/// `extension` is trusted and should include its leading dot. Letters,
/// digits, `_`, `.`, `-` and whitespace are kept; whitespace runs become `_`;
/// `.`, `_` and `-` are trimmed from both ends; the target extension or one
/// known source extension is replaced; the result never exceeds
/// [`MAX_FILENAME_BYTES`]. Sanitizing an already sanitized name returns it
/// unchanged.
pub fn sanitize_filename_for_format(name: &str, extension: &str) -> String {
    let mut cleaned = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            in_whitespace = true;
        } else if c.is_alphanumeric() || matches!(c, '_' | '.' | '-') {
            if in_whitespace {
                cleaned.push('_');
                in_whitespace = false;
            }
            cleaned.push(c);
        }
    }
    if in_whitespace {
        cleaned.push('_');
    }

    let trimmed = cleaned.trim_matches(['.', '_', '-']);
    if trimmed.is_empty() {
        return format!("{FALLBACK_STEM}{extension}");
    }

    let stem = strip_extension(trimmed, extension);
    let budget = MAX_FILENAME_BYTES.saturating_sub(extension.len());
    let stem = truncate_at_char_boundary(stem, budget);

    format!("{stem}{extension}")
}

/// Remove `target`, or else the first matching source extension.
fn strip_extension<'a>(name: &'a str, target: &str) -> &'a str {
    std::iter::once(target)
        .chain(SOURCE_EXTENSIONS.iter().copied())
        .find_map(|ext| strip_suffix_ignore_ascii_case(name, ext))
        .unwrap_or(name)
}

fn strip_suffix_ignore_ascii_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    if split == 0 || !name.is_char_boundary(split) {
        return None;
    }
    name[split..]
        .eq_ignore_ascii_case(suffix)
        .then(|| &name[..split])
}

fn truncate_at_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
