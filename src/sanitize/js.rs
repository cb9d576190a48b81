//! Escaping for JavaScript string literals.

use super::script::is_script_close;

/// Escape text for a single- or double-quoted JavaScript string literal that
/// itself sits inside an inline `<script>` element.
///
/// Besides quotes, backslashes and line terminators (including U+2028 and
/// U+2029), this escapes backticks and `${` so the result is also inert if
/// pasted into a template literal, every case-insensitive `</script` as
/// `<\/script`, and remaining C0 control characters as `\u00XX`.
///
/// # Examples
///
/// ```
/// use quire::sanitize::escape_js_string;
///
/// assert_eq!(escape_js_string("it's \"here\"\n"), "it\\'s \\\"here\\\"\\n");
/// assert_eq!(escape_js_string("</script>"), "<\\/script>");
/// ```
pub fn escape_js_string(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut result = String::with_capacity(s.len() + s.len() / 8);

    for (i, c) in s.char_indices() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\'' => result.push_str("\\'"),
            '"' => result.push_str("\\\""),
            '`' => result.push_str("\\`"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\u{2028}' => result.push_str("\\u2028"),
            '\u{2029}' => result.push_str("\\u2029"),
            '$' if bytes.get(i + 1) == Some(&b'{') => result.push_str("\\$"),
            '<' if is_script_close(bytes, i) => result.push_str("<\\"),
            c if c.is_ascii_control() => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result
}
