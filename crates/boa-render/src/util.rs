//! Text helpers shared by the template filters and the tab writer.

use unicode_width::UnicodeWidthStr;

/// Returns the display width of a string in terminal columns.
///
/// ```rust
/// use boa_render::display_width;
///
/// assert_eq!(display_width("abc"), 3);
/// assert_eq!(display_width("↳ Options:"), 10);
/// ```
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Pads `s` on the right with spaces up to `width` display columns.
///
/// Strings already at or beyond `width` are returned unchanged.
///
/// ```rust
/// use boa_render::rpad;
///
/// assert_eq!(rpad("help", 6), "help  ");
/// assert_eq!(rpad("completion", 4), "completion");
/// ```
pub fn rpad(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(s));
    let mut out = String::with_capacity(s.len() + pad);
    out.push_str(s);
    out.extend(std::iter::repeat(' ').take(pad));
    out
}

/// Trims trailing whitespace, including newlines.
pub fn trim_right_space(s: &str) -> &str {
    s.trim_end()
}

/// Joins a list of strings with `", "`.
///
/// ```rust
/// use boa_render::slice_to_csv;
///
/// assert_eq!(slice_to_csv(&["option1", "opt1"]), "option1, opt1");
/// ```
pub fn slice_to_csv<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpad_wide_chars() {
        // CJK characters take two columns each
        assert_eq!(rpad("日本", 6), "日本  ");
    }

    #[test]
    fn test_rpad_zero_width() {
        assert_eq!(rpad("", 3), "   ");
    }

    #[test]
    fn test_trim_right_space() {
        assert_eq!(trim_right_space("  -h, --help   help\n\n"), "  -h, --help   help");
        assert_eq!(trim_right_space("none"), "none");
    }

    #[test]
    fn test_slice_to_csv_single_and_empty() {
        assert_eq!(slice_to_csv(&["only"]), "only");
        assert_eq!(slice_to_csv::<&str>(&[]), "");
    }
}
