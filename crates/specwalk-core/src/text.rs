/// Flatten `text` onto a single line: a trailing newline is dropped, other newlines become
/// spaces and tabs are removed.
pub fn comment(text: &str) -> String {
    let text = text.strip_suffix('\n').unwrap_or(text);
    text.replace('\n', " ").replace('\t', "")
}

/// Reflow `text` into `//` comment lines no longer than `line_length` including `indent`.
///
/// A line that would end mid-word is broken with a hyphen. Widths are counted in
/// characters.
pub fn wrapped_comment(line_length: usize, indent: &str, text: &str) -> String {
    let text = text.strip_suffix('\n').unwrap_or(text).replace('\n', " ");
    let width = line_length
        .saturating_sub(indent.chars().count() + 3)
        .max(2);

    let mut rest: Vec<char> = text.chars().collect();
    let mut lines = Vec::new();
    while rest.len() > width {
        if !rest[width - 1].is_whitespace() && !rest[width].is_whitespace() {
            rest.insert(width - 1, '-');
        }
        let line: String = rest.drain(..width).collect();
        lines.push(format!("{indent}// {line}"));
    }
    if !rest.is_empty() {
        let line: String = rest.into_iter().collect();
        lines.push(format!("{indent}// {line}"));
    }
    lines.join("\n")
}
