//! String utilities for the domain layer.

/// Keep at most `max_chars` characters of `s` (UTF-8 safe, no suffix).
pub fn take_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Excerpt of `s` limited to `max_chars` characters, with `...` appended
/// when anything was cut.
pub fn excerpt(s: &str, max_chars: usize) -> String {
    let kept = take_chars(s, max_chars);
    if kept.len() == s.len() {
        s.to_string()
    } else {
        format!("{}...", kept)
    }
}

/// Number of characters in `s` once surrounding whitespace is removed.
pub fn trimmed_char_count(s: &str) -> usize {
    s.trim().chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_chars_ascii() {
        assert_eq!(take_chars("hello", 10), "hello");
        assert_eq!(take_chars("hello world", 5), "hello");
        assert_eq!(take_chars("hello", 0), "");
    }

    #[test]
    fn test_take_chars_multibyte() {
        assert_eq!(take_chars("नमस्ते भारत", 3), "नमस");
        assert_eq!(take_chars("日本語テスト", 2), "日本");
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("short", 800), "short");
        assert_eq!(excerpt("abcdef", 3), "abc...");
        assert_eq!(excerpt("日本語テスト", 3), "日本語...");
    }

    #[test]
    fn test_trimmed_char_count() {
        assert_eq!(trimmed_char_count("  abc \n"), 3);
        assert_eq!(trimmed_char_count("ààà"), 3);
        assert_eq!(trimmed_char_count("   "), 0);
    }
}
