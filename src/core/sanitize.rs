// src/core/sanitize.rs

/// Collapse runs of whitespace into a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Split a rendered text block into its lines, each trimmed.
/// Interior blank lines are kept (as ""); leading/trailing blank lines are not.
pub fn text_lines(block: &str) -> Vec<String> {
    block
        .trim()
        .lines()
        .map(|l| l.trim().to_string())
        .collect()
}

/// First whitespace-delimited token, or "" when there is none.
pub fn first_token(s: &str) -> String {
    s.split_whitespace().next().map(String::from).unwrap_or_default()
}

/// Trim whitespace, then any surrounding `'` / `"` characters.
pub fn strip_quotes(s: &str) -> &str {
    s.trim().trim_matches(|c| c == '\'' || c == '"')
}

/// Flat-output cells must not break the line or the column layout.
pub fn flatten_cell(s: &str) -> String {
    if s.contains(['\t', '\n', '\r']) {
        normalize_ws(s)
    } else {
        s.to_string()
    }
}
