//! Input sanitization for the terminal UI
//!
//! Pasted text can carry tabs, carriage returns, and stray control
//! characters that corrupt a raw-mode terminal. Everything typed or pasted
//! into the input buffer passes through here first.

/// Sanitize text destined for the input buffer.
///
/// Tabs become four spaces, carriage returns are dropped (the input is
/// single-line; Enter is the only way to submit), and remaining control
/// characters are filtered out.
pub fn sanitize_text_input(text: &str) -> String {
    let mut sanitized = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\t' => sanitized.push_str("    "),
            '\r' | '\n' => sanitized.push(' '),
            _ if c.is_control() => {}
            _ => sanitized.push(c),
        }
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(sanitize_text_input("hello world"), "hello world");
    }

    #[test]
    fn tabs_become_spaces() {
        assert_eq!(sanitize_text_input("a\tb"), "a    b");
    }

    #[test]
    fn line_breaks_collapse_to_spaces() {
        assert_eq!(sanitize_text_input("line1\r\nline2"), "line1  line2");
        assert_eq!(sanitize_text_input("line1\nline2"), "line1 line2");
    }

    #[test]
    fn control_characters_are_filtered() {
        assert_eq!(sanitize_text_input("he\x07llo\x1b[0m"), "hello[0m");
        assert_eq!(sanitize_text_input("\x00\x01\x02"), "");
    }
}
