//! Shared utility functions

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate `s` to at most `max_cols` terminal columns.
///
/// Wide characters (CJK, emoji) count as two columns. When anything is cut,
/// the last column is spent on an ellipsis so the cut is visible.
pub fn truncate_to_width(s: &str, max_cols: usize) -> String {
    if s.width() <= max_cols {
        return s.to_string();
    }
    if max_cols == 0 {
        return String::new();
    }

    let budget = max_cols - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Pad or truncate `s` so it occupies exactly `cols` columns, centered
pub fn center_to_width(s: &str, cols: usize) -> String {
    let text = truncate_to_width(s, cols);
    let gap = cols.saturating_sub(text.width());
    let left = gap / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(gap - left))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_shorter_than_max() {
        assert_eq!(truncate_to_width("Heat", 10), "Heat");
    }

    #[test]
    fn test_truncate_ascii_adds_ellipsis() {
        assert_eq!(truncate_to_width("The Matrix Reloaded", 10), "The Matri…");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each character is two columns wide
        let s = "千と千尋の神隠し";
        let cut = truncate_to_width(s, 7);
        assert_eq!(cut, "千と千…");
        assert!(cut.width() <= 7);
    }

    #[test]
    fn test_truncate_to_zero() {
        assert_eq!(truncate_to_width("hello", 0), "");
    }

    #[test]
    fn test_center_pads_both_sides() {
        assert_eq!(center_to_width("ab", 6), "  ab  ");
        assert_eq!(center_to_width("abc", 6), " abc  ");
    }
}
