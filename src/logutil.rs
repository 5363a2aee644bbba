//! Logging helpers for player-supplied strings (usernames, shell commands).
//! Keeps every log record on a single line by escaping control characters.

/// Escape a string for single-line logging:
/// - `\n` => `\\n`
/// - `\r` => `\\r`
/// - `\t` => `\\t`
/// - backslash => `\\\\`
///   Long strings are cut at `MAX_PREVIEW` characters with an ellipsis so a
///   pasted blob cannot flood the log.
pub fn escape_log(s: &str) -> String {
    const MAX_PREVIEW: usize = 200;
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    for ch in s.chars().take(MAX_PREVIEW) {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    if s.chars().nth(MAX_PREVIEW).is_some() {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_log;

    #[test]
    fn escapes_newlines() {
        let s = "chef\nbadline\r\tend";
        assert_eq!(escape_log(s), "chef\\nbadline\\r\\tend");
    }

    #[test]
    fn short_input_is_untouched() {
        assert_eq!(escape_log("Guest_42"), "Guest_42");
    }

    #[test]
    fn truncates_long_input() {
        let s = "x".repeat(500);
        let esc = escape_log(&s);
        assert!(esc.ends_with('…'));
        assert_eq!(esc.chars().count(), 201);
    }
}
