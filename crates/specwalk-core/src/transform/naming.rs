/// Initialisms rendered fully upper-case in exported names.
const INITIALISMS: &[(&str, &str)] = &[("Url", "URL"), ("Id", "ID")];

/// Build an exported (PascalCase) identifier from an arbitrary name.
///
/// Words are split on `_`, `-` and whitespace; each word gets an upper-case first character
/// and keeps the rest as written, so `HTTPVerb` stays `HTTPVerb`. `Id` and `Url` become `ID`
/// and `URL` unless a lower-case letter follows them.
pub fn exported_name(name: &str) -> String {
    let joined: String = name
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect();
    upper_initialisms(&joined)
}

fn upper_initialisms(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut rest = name;
    'outer: while !rest.is_empty() {
        for (from, to) in INITIALISMS {
            if let Some(after) = rest.strip_prefix(from) {
                if !after.starts_with(|c: char| c.is_lowercase()) {
                    out.push_str(to);
                    rest = after;
                    continue 'outer;
                }
            }
        }
        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            out.push(ch);
        }
        rest = chars.as_str();
    }
    out
}

/// Upper-case the first character of `word`, leaving the rest untouched.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Capitalize every whitespace-separated word, keeping the separators.
pub fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Convert `{name}` placeholders of a path template to the `:name` router form.
/// Empty or unterminated braces are left alone.
pub fn router_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut rest = path;
    while let Some(open) = rest.find('{') {
        let (before, after) = rest.split_at(open);
        out.push_str(before);
        match after[1..].find('}') {
            Some(close) if close > 0 => {
                out.push(':');
                out.push_str(&after[1..=close]);
                rest = &after[close + 2..];
            }
            _ => {
                out.push('{');
                rest = &after[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
