//! Top-level heading detection.

/// Text of an ATX level-1 heading (`# Title`), or `None`.
///
/// Up to three leading spaces are allowed, the `#` must be followed by a
/// space, a tab or the end of the line, and a closing `#` sequence is removed.
pub fn h1_text(line: &str) -> Option<&str> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return None;
    }

    let rest = line[indent..].strip_prefix('#')?;
    if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
        return None;
    }

    let text = rest.trim();
    let text = match text.trim_end_matches('#') {
        stripped if stripped.is_empty() || stripped.ends_with([' ', '\t']) => stripped.trim_end(),
        _ => text,
    };
    Some(text)
}

/// Whether `line` is an ATX level-1 heading.
pub fn is_h1(line: &str) -> bool {
    h1_text(line).is_some()
}

/// Title taken from the first level-1 heading outside fenced code blocks.
///
/// # Examples
///
/// ```
/// use quire::markdown::detect_title;
///
/// assert_eq!(detect_title("intro\n\n# My Book\n").as_deref(), Some("My Book"));
/// assert_eq!(detect_title("## Only a subheading\n"), None);
/// ```
pub fn detect_title(markdown: &str) -> Option<String> {
    let mut fence: Option<&str> = None;

    for line in markdown.lines() {
        let trimmed = line.trim_start();
        match fence {
            Some(marker) => {
                if trimmed.starts_with(marker) {
                    fence = None;
                }
            }
            None if trimmed.starts_with("```") => fence = Some("```"),
            None if trimmed.starts_with("~~~") => fence = Some("~~~"),
            None => {
                if let Some(text) = h1_text(line)
                    && !text.is_empty()
                {
                    return Some(text.to_string());
                }
            }
        }
    }
    None
}
