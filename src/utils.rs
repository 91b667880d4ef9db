//! Shared utility functions used across modules.

/// Truncate a string to `max_len` characters, appending "..." if truncated.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Replace every run of ASCII whitespace (space, `\t`, `\n`, `\x0B`, `\x0C`,
/// `\r`) with a single space. Other Unicode spaces such as NBSP are kept.
///
/// Leading and trailing runs are kept (as one space each) so the phrase
/// reaches the server with the same shape the user typed.
pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if c.is_ascii_whitespace() || c == '\x0B' {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}
