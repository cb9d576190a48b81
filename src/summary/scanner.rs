//! Line classification for `SUMMARY.md`.
//!
//! A hand-written scanner instead of a regular expression so that chapter
//! paths may contain balanced parentheses, e.g. `[A](notes(v2).md)`.

/// Columns a tab contributes to indentation.
const TAB_WIDTH: usize = 4;

/// Columns per nesting level.
const COLUMNS_PER_LEVEL: usize = 2;

/// One classified line of a summary outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    /// Three or more hyphens and nothing else.
    Separator,
    /// A `#` heading; holds the text with every leading `#` removed.
    PartTitle(&'a str),
    /// A `- [Title](path)` or `* [Title](path)` list item.
    Link {
        level: usize,
        title: &'a str,
        path: &'a str,
    },
    Unrecognized,
}

/// Classify a single line.
pub fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Line::Blank;
    }
    if trimmed.len() >= 3 && trimmed.bytes().all(|b| b == b'-') {
        return Line::Separator;
    }
    if trimmed.starts_with('#') {
        return Line::PartTitle(trimmed.trim_start_matches('#').trim());
    }
    scan_link(line).unwrap_or(Line::Unrecognized)
}

fn scan_link(line: &str) -> Option<Line<'_>> {
    let (columns, rest) = split_indent(line);

    let rest = rest.strip_prefix(['-', '*'])?;
    let after_marker = rest.trim_start_matches([' ', '\t']);
    if after_marker.len() == rest.len() {
        return None;
    }

    let rest = after_marker.strip_prefix('[')?;
    let close = rest.find(']')?;
    let title = &rest[..close];
    if title.is_empty() {
        return None;
    }

    let rest = rest[close + 1..].strip_prefix('(')?;
    let end = balanced_close(rest)?;
    let path = &rest[..end];
    if !rest[end + 1..].trim().is_empty() {
        return None;
    }

    Some(Line::Link {
        level: columns / COLUMNS_PER_LEVEL,
        title: title.trim(),
        path: path.trim(),
    })
}

/// Measure leading indentation in columns and return the remainder.
fn split_indent(line: &str) -> (usize, &str) {
    let mut columns = 0;
    for (i, c) in line.char_indices() {
        match c {
            ' ' => columns += 1,
            '\t' => columns += TAB_WIDTH,
            _ => return (columns, &line[i..]),
        }
    }
    (columns, "")
}

/// Byte offset of the `)` closing an already-opened parenthesis.
fn balanced_close(s: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (i, b) in s.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link<'a>(level: usize, title: &'a str, path: &'a str) -> Line<'a> {
        Line::Link { level, title, path }
    }

    #[test]
    fn test_blank() {
        assert_eq!(classify(""), Line::Blank);
        assert_eq!(classify("   \t"), Line::Blank);
    }

    #[test]
    fn test_separator() {
        assert_eq!(classify("---"), Line::Separator);
        assert_eq!(classify("  -----  "), Line::Separator);
        assert_eq!(classify("--"), Line::Unrecognized);
        assert_eq!(classify("--- x"), Line::Unrecognized);
    }

    #[test]
    fn test_part_title() {
        assert_eq!(classify("# Summary"), Line::PartTitle("Summary"));
        assert_eq!(classify("## Part One  "), Line::PartTitle("Part One"));
        assert_eq!(classify("#"), Line::PartTitle(""));
    }

    #[test]
    fn test_simple_link() {
        assert_eq!(classify("- [Intro](intro.md)"), link(0, "Intro", "intro.md"));
        assert_eq!(classify("* [Intro](intro.md)  "), link(0, "Intro", "intro.md"));
    }

    #[test]
    fn test_indentation_levels() {
        assert_eq!(classify("  - [A](a.md)"), link(1, "A", "a.md"));
        assert_eq!(classify("    - [A](a.md)"), link(2, "A", "a.md"));
        assert_eq!(classify("   - [A](a.md)"), link(1, "A", "a.md"));
        assert_eq!(classify("\t- [A](a.md)"), link(2, "A", "a.md"));
        assert_eq!(classify("  \t- [A](a.md)"), link(3, "A", "a.md"));
    }

    #[test]
    fn test_draft_link() {
        assert_eq!(classify("- [Later]()"), link(0, "Later", ""));
        assert_eq!(classify("- [Later](  )"), link(0, "Later", ""));
    }

    #[test]
    fn test_balanced_parentheses_in_path() {
        assert_eq!(
            classify("- [Test](path(with(nested))parens.md)"),
            link(0, "Test", "path(with(nested))parens.md")
        );
        assert_eq!(classify("- [Test](notes(v2).md)"), link(0, "Test", "notes(v2).md"));
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert_eq!(classify("- [Test](path(open.md)"), Line::Unrecognized);
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(classify("Just some prose"), Line::Unrecognized);
        assert_eq!(classify("-[NoSpace](a.md)"), Line::Unrecognized);
        assert_eq!(classify("- [](empty-title.md)"), Line::Unrecognized);
        assert_eq!(classify("- [A](a.md) trailing"), Line::Unrecognized);
        assert_eq!(classify("- [A] (a.md)"), Line::Unrecognized);
        assert_eq!(classify("+ [A](a.md)"), Line::Unrecognized);
        assert_eq!(classify("- plain item"), Line::Unrecognized);
    }

    #[test]
    fn test_title_whitespace_trimmed() {
        assert_eq!(classify("- [  Spaced  ](a.md)"), link(0, "Spaced", "a.md"));
    }

    #[test]
    fn test_unicode_title() {
        assert_eq!(classify("- [Über ☃](ü.md)"), link(0, "Über ☃", "ü.md"));
    }
}
