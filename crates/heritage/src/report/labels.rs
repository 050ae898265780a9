//! Axis label cleanup: whitespace normalization, truncation and wrapping.

use once_cell::sync::Lazy;
use regex::Regex;

/// Shown in place of a label that is null or blank.
pub const PLACEHOLDER: &str = "—";

/// Truncation marker appended to shortened labels.
const ELLIPSIS: char = '…';

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse whitespace runs to single spaces and trim the ends.
pub fn normalize(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Normalize and cut to at most `max` characters, ending in `…` when cut.
///
/// A null or blank input becomes [`PLACEHOLDER`].
pub fn shorten(text: Option<&str>, max: usize) -> String {
    let text = match text.map(normalize) {
        Some(t) if !t.is_empty() => t,
        _ => return PLACEHOLDER.to_string(),
    };
    if text.chars().count() <= max {
        return text;
    }
    if max == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(max - 1).collect();
    cut.truncate(cut.trim_end().len());
    cut.push(ELLIPSIS);
    cut
}

/// Greedy word wrap to lines of at most `width` characters.
///
/// Words longer than `width` are split across lines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0usize;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();

        if line_len > 0 && line_len + 1 + chars.len() <= width {
            line.push(' ');
            line.extend(chars.iter());
            line_len += 1 + chars.len();
            continue;
        }
        if line_len > 0 {
            lines.push(std::mem::take(&mut line));
        }
        while chars.len() > width {
            let rest = chars.split_off(width);
            lines.push(chars.into_iter().collect());
            chars = rest;
        }
        line_len = chars.len();
        line = chars.into_iter().collect();
    }

    if line_len > 0 {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  Государственный \n\t музей  "), "Государственный музей");
    }

    #[test]
    fn test_shorten() {
        assert_eq!(shorten(Some("short"), 10), "short");
        assert_eq!(shorten(Some("abcdefghij"), 10), "abcdefghij");
        assert_eq!(shorten(Some("abcdefghijk"), 10), "abcdefghi…");
        assert_eq!(shorten(Some("abcd efghijk"), 6), "abcd…");
        assert_eq!(shorten(Some("Музей истории"), 6), "Музей…");
        assert_eq!(shorten(None, 10), PLACEHOLDER);
        assert_eq!(shorten(Some("  "), 10), PLACEHOLDER);
    }

    #[test]
    fn test_shorten_counts_chars() {
        let label = shorten(Some("я".repeat(100).as_str()), 70);
        assert_eq!(label.chars().count(), 70);
        assert!(label.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(
            wrap("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
        assert_eq!(wrap("abcdefghijkl xy", 5), vec!["abcde", "fghij", "kl xy"]);
        assert!(wrap("", 5).is_empty());
    }

    #[test]
    fn test_wrap_long_word_after_short_line() {
        assert_eq!(
            wrap("ab abcdefghijkl cd", 5),
            vec!["ab", "abcde", "fghij", "kl cd"]
        );
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "Государственный исторический музей Южного Урала";
        for line in wrap(text, 12) {
            assert!(line.chars().count() <= 12, "{line}");
        }
    }
}
