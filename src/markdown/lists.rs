//! Bullet list normalization.
//!
//! Many Markdown converters only recognise a list when it is separated from
//! the preceding paragraph by a blank line, and split a list in two when its
//! items are separated by blank lines. [`tighten_lists`] rewrites `-` bullet
//! lists so both cases render as one tight list.

/// Whether `line` is a `-` bullet item (any indentation).
pub fn is_bullet_line(line: &str) -> bool {
    let rest = line.trim_start();
    match rest.strip_prefix('-') {
        Some(after) => after.starts_with(char::is_whitespace),
        None => false,
    }
}

/// Insert a blank line before each list that directly follows a paragraph
/// line, and remove blank lines between consecutive bullet items.
///
/// Line endings are preserved, including `\r\n`.
///
/// # Examples
///
/// ```
/// use quire::markdown::tighten_lists;
///
/// assert_eq!(
///     tighten_lists("Some text\n- Item 1\n\n- Item 2"),
///     "Some text\n\n- Item 1\n- Item 2"
/// );
/// ```
pub fn tighten_lists(content: &str) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut out: Vec<&str> = Vec::with_capacity(lines.len() + 4);

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        if is_bullet_line(line) {
            if let Some(prev) = out.last()
                && !prev.trim().is_empty()
                && !is_bullet_line(prev)
            {
                out.push(if line.ends_with('\r') { "\r" } else { "" });
            }
            out.push(line);

            // Drop blank lines that only separate this item from the next.
            let mut next = i + 1;
            while next < lines.len() && lines[next].trim().is_empty() {
                next += 1;
            }
            if next > i + 1 && next < lines.len() && is_bullet_line(lines[next]) {
                i = next;
                continue;
            }
        } else {
            out.push(line);
        }
        i += 1;
    }

    out.join("\n")
}
