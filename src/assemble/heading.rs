//! Heading level remapping for assembled chapters.

use std::borrow::Cow;

use crate::markdown::is_h1;

/// Deepest heading Markdown supports.
pub const MAX_HEADING_LEVEL: usize = 6;

/// Heading level for a chapter at nesting `level`.
///
/// Root chapters become `##` so that part titles keep `#` to themselves.
pub fn heading_level(level: usize) -> usize {
    level.saturating_add(2).min(MAX_HEADING_LEVEL)
}

/// The `#` run for a chapter at nesting `level`.
pub fn heading_marker(level: usize) -> String {
    "#".repeat(heading_level(level))
}

/// Remove the chapter's own title heading.
///
/// If the first non-blank line is a level-1 heading, that line is dropped;
/// otherwise the content is returned untouched. Later level-1 headings are
/// always kept.
pub fn strip_leading_h1(content: &str) -> Cow<'_, str> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        if line.trim().is_empty() {
            offset += line.len();
            continue;
        }
        if is_h1(line.trim_end_matches(['\r', '\n'])) {
            let mut stripped = String::with_capacity(content.len() - line.len());
            stripped.push_str(&content[..offset]);
            stripped.push_str(&content[offset + line.len()..]);
            return Cow::Owned(stripped);
        }
        break;
    }
    Cow::Borrowed(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_levels() {
        assert_eq!(heading_marker(0), "##");
        assert_eq!(heading_marker(1), "###");
        assert_eq!(heading_marker(4), "######");
        assert_eq!(heading_marker(10), "######");
        assert_eq!(heading_marker(usize::MAX), "######");
    }

    #[test]
    fn test_strip_first_h1() {
        assert_eq!(strip_leading_h1("# Title\n\nBody"), "\nBody");
    }

    #[test]
    fn test_strip_after_blank_lines() {
        let out = strip_leading_h1("\n\n\n# Title to Remove\n\nActual content");
        assert!(!out.contains("Title to Remove"));
        assert!(out.contains("Actual content"));
    }

    #[test]
    fn test_keep_when_not_first() {
        let content = "Intro\n\n# Not the title\n";
        assert_eq!(strip_leading_h1(content), content);
    }

    #[test]
    fn test_keep_second_h1() {
        let out = strip_leading_h1("# First\n\n# Second\n");
        assert!(!out.contains("First"));
        assert!(out.contains("# Second"));
    }

    #[test]
    fn test_keep_subheading() {
        let content = "## Section\n\nBody";
        assert_eq!(strip_leading_h1(content), content);
    }

    #[test]
    fn test_crlf() {
        assert_eq!(strip_leading_h1("# Title\r\nBody"), "Body");
    }

    #[test]
    fn test_title_only() {
        assert_eq!(strip_leading_h1("# Title"), "");
        assert_eq!(strip_leading_h1(""), "");
    }
}
