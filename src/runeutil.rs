//! Text helpers for single-line terminal inputs.
//!
//! Terminal cells are not characters: wide glyphs take two columns and a
//! user-perceived character may span several code points. Everything that
//! measures or edits typed text goes through this module so the components
//! agree on both.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Unicode ellipsis used when a label is cut short.
pub const ELLIPSIS: &str = "…";

/// Cleans text destined for a single-line input: tabs and line breaks become
/// spaces, other control characters are removed.
///
/// ```rust
/// use alumni_portal::runeutil::sanitize;
///
/// assert_eq!(sanitize("Tamil\tNadu\r\n"), "Tamil Nadu  ");
/// assert_eq!(sanitize("Go\u{7}a"), "Goa");
/// ```
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .filter_map(|c| match c {
            '\t' | '\n' | '\r' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Removes the last grapheme cluster from `text` and returns it.
pub fn pop_grapheme(text: &mut String) -> Option<String> {
    let start = text.grapheme_indices(true).next_back()?.0;
    Some(text.split_off(start))
}

/// Width of `text` in terminal columns.
pub fn width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Cuts `text` to at most `max` columns, ending with an ellipsis when
/// anything was removed.
pub fn truncate(text: &str, max: usize) -> String {
    if width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let budget = max - width(ELLIPSIS);
    let mut out = String::new();
    let mut used = 0;
    for g in text.graphemes(true) {
        let w = width(g);
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out.push_str(ELLIPSIS);
    out
}

/// The longest suffix of `text` that fits in `max` columns. Used to keep the
/// end of the value (where typing happens) visible.
pub fn tail(text: &str, max: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();
    for (i, g) in text.grapheme_indices(true).rev() {
        let w = width(g);
        if used + w > max {
            break;
        }
        used += w;
        start = i;
    }
    &text[start..]
}

/// Pads `text` with spaces on the right up to `min` columns.
pub fn pad(text: &str, min: usize) -> String {
    let w = width(text);
    if w >= min {
        return text.to_string();
    }
    format!("{}{}", text, " ".repeat(min - w))
}
