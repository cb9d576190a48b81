//! HTML body and comment escaping.

/// Escape text for HTML element content and quoted attribute values.
///
/// # Examples
///
/// ```
/// use quire::sanitize::escape_html;
///
/// assert_eq!(escape_html("<b>\"Tom\" & 'Jerry'</b>"),
///     "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;/b&gt;");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Make text safe to place inside `<!-- ... -->`.
///
/// Every `--` becomes `&#45;&#45;`, so the text can neither close the comment
/// nor contain the double hyphen HTML forbids in comments.
pub fn sanitize_for_html_comment(s: &str) -> String {
    s.replace("--", "&#45;&#45;")
}
