//! Visual-width primitives: measure, truncate, pad, repeat and trim.
//!
//! All functions in this module handle embedded escape sequences: they are
//! preserved in output but never count toward display width. Wide East-Asian
//! characters count as two columns, combining marks and control characters
//! as zero.

use unicode_width::UnicodeWidthChar;

use crate::sgr::{self, RESET};
use crate::walk::{walk, Event};

/// Text alignment within a fixed width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Align {
    /// Left-align text (pad on the right).
    #[default]
    Left,
    /// Right-align text (pad on the left).
    Right,
    /// Center text (pad on both sides).
    Center,
}

/// Returns the number of columns `c` occupies.
///
/// Non-spacing marks and non-graphic characters are zero columns wide, wide
/// and full-width characters two, everything else one.
pub fn rune_width(c: char) -> usize {
    if c.is_control() {
        return 0;
    }
    c.width().unwrap_or(0)
}

/// Returns the display width of a string, ignoring escape sequences.
///
/// # Example
///
/// ```rust
/// use quill_text::width;
///
/// assert_eq!(width("hello"), 5);
/// assert_eq!(width("\x1b[31mred\x1b[0m"), 3);
/// assert_eq!(width("日本"), 4);
/// ```
pub fn width(s: &str) -> usize {
    walk(s).map(|(_, e)| e.width()).sum()
}

/// Removes every escape sequence from `s`.
pub fn strip_escapes(s: &str) -> String {
    walk(s)
        .filter_map(|(_, e)| match e {
            Event::Rune { rune, .. } => Some(rune),
            Event::Escape(_) => None,
        })
        .collect()
}

/// Truncates a string to at most `limit` columns.
///
/// Escapes met before the cut are kept. When the string had to be cut and
/// carried SGR styling, a reset is appended so the truncated text never
/// bleeds its style into what follows.
///
/// # Example
///
/// ```rust
/// use quill_text::truncate;
///
/// assert_eq!(truncate("Hello World", 5), "Hello");
/// assert_eq!(
///     truncate("This \x1b[34mis\x1b[0m a long sentence in color", 9),
///     "This \x1b[34mis\x1b[0m a\x1b[0m",
/// );
/// ```
pub fn truncate(s: &str, limit: usize) -> String {
    if width(s) <= limit {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len().min(limit * 4 + 16));
    let mut used = 0;
    let mut styled = false;

    for (_, event) in walk(s) {
        match event {
            Event::Escape(seq) => {
                styled |= sgr::is_sgr(seq);
                out.push_str(seq);
            }
            Event::Rune { rune, width } => {
                if used + width > limit {
                    break;
                }
                out.push(rune);
                used += width;
            }
        }
    }

    if styled {
        out.push_str(RESET);
    }
    out
}

fn spaces(n: usize) -> String {
    " ".repeat(n)
}

/// Pads a string on the right (left-aligns) to reach `n` columns.
///
/// Trailing whitespace is trimmed first; a string already wider than `n` is
/// returned trimmed but otherwise unchanged.
///
/// ```rust
/// use quill_text::pad_right;
///
/// assert_eq!(pad_right("42", 5), "42   ");
/// assert_eq!(pad_right("hello  ", 3), "hello");
/// ```
pub fn pad_right(s: &str, n: usize) -> String {
    let mut out = trim_trailing_space(s);
    let w = width(&out);
    if w < n {
        out.push_str(&spaces(n - w));
    }
    out
}

/// Pads a string on the left (right-aligns) to reach `n` columns.
///
/// ```rust
/// use quill_text::pad_left;
///
/// assert_eq!(pad_left("  42", 5), "   42");
/// ```
pub fn pad_left(s: &str, n: usize) -> String {
    let trimmed = trim_leading_space(s);
    let w = width(&trimmed);
    if w >= n {
        return trimmed;
    }
    let mut out = spaces(n - w);
    out.push_str(&trimmed);
    out
}

/// Centers a string within `n` columns; an odd leftover goes to the right.
///
/// ```rust
/// use quill_text::pad_center;
///
/// assert_eq!(pad_center("hi", 6), "  hi  ");
/// assert_eq!(pad_center(" hi ", 5), " hi  ");
/// ```
pub fn pad_center(s: &str, n: usize) -> String {
    let trimmed = trim_space(s);
    let w = width(&trimmed);
    if w >= n {
        return trimmed;
    }
    let left = (n - w) / 2;
    let mut out = spaces(left);
    out.push_str(&trimmed);
    out.push_str(&spaces(n - w - left));
    out
}

/// Pads `s` to `n` columns according to `align`.
pub fn pad(s: &str, n: usize, align: Align) -> String {
    match align {
        Align::Left => pad_right(s, n),
        Align::Right => pad_left(s, n),
        Align::Center => pad_center(s, n),
    }
}

/// Repeats `s` until the result is `n` columns wide, cutting the last copy.
///
/// ```rust
/// use quill_text::repeat;
///
/// assert_eq!(repeat("-=", 5), "-=-=-");
/// assert_eq!(repeat("", 5), "");
/// ```
pub fn repeat(s: &str, n: usize) -> String {
    let w = width(s);
    if w == 0 || n == 0 {
        return String::new();
    }
    let mut out = String::with_capacity(s.len() * (n / w + 1));
    let mut used = 0;
    while used + w <= n {
        out.push_str(s);
        used += w;
    }
    if used < n {
        out.push_str(&truncate(s, n - used));
    }
    out
}

/// Removes leading runes matching `pred`, keeping the escapes found among
/// them.
///
/// Escapes inside the removed region are collapsed into a single sequence
/// placed right before the first kept rune. A string with nothing to trim is
/// returned unchanged.
pub fn trim_leading_matches(s: &str, pred: impl Fn(char) -> bool) -> String {
    let mut escapes: Vec<&str> = Vec::new();
    let mut trimmed = false;
    for (i, event) in walk(s) {
        match event {
            Event::Escape(seq) => escapes.push(seq),
            Event::Rune { rune, .. } if pred(rune) => trimmed = true,
            Event::Rune { .. } => {
                if !trimmed {
                    return s.to_string();
                }
                if escapes.is_empty() {
                    return s[i..].to_string();
                }
                let mut out = sgr::squash(escapes);
                out.push_str(&s[i..]);
                return out;
            }
        }
    }
    if trimmed {
        sgr::squash(escapes)
    } else {
        s.to_string()
    }
}

/// Removes trailing runes matching `pred`, keeping the escapes found among
/// them.
///
/// Escapes inside the removed region are deferred until after the last kept
/// rune and emitted as one sequence carrying only their net effect.
pub fn trim_trailing_matches(s: &str, pred: impl Fn(char) -> bool) -> String {
    let mut end = 0;
    for (i, event) in walk(s) {
        if let Event::Rune { rune, .. } = event {
            if !pred(rune) {
                end = i + rune.len_utf8();
            }
        }
    }
    let tail = &s[end..];
    if !walk(tail).any(|(_, e)| matches!(e, Event::Rune { .. })) {
        return s.to_string();
    }
    let escapes: Vec<&str> = walk(tail)
        .filter_map(|(_, e)| match e {
            Event::Escape(seq) => Some(seq),
            Event::Rune { .. } => None,
        })
        .collect();
    let mut out = s[..end].to_string();
    if !escapes.is_empty() {
        out.push_str(&sgr::squash(escapes));
    }
    out
}

/// Removes leading whitespace, preserving escapes.
///
/// ```rust
/// use quill_text::trim_leading_space;
///
/// assert_eq!(trim_leading_space("  \x1b[1m  bold"), "\x1b[1mbold");
/// ```
pub fn trim_leading_space(s: &str) -> String {
    trim_leading_matches(s, char::is_whitespace)
}

/// Removes trailing whitespace, preserving escapes.
///
/// ```rust
/// use quill_text::trim_trailing_space;
///
/// assert_eq!(trim_trailing_space("\x1b[31mred \x1b[0m  "), "\x1b[31mred\x1b[0m");
/// ```
pub fn trim_trailing_space(s: &str) -> String {
    trim_trailing_matches(s, char::is_whitespace)
}

/// Removes leading and trailing whitespace, preserving escapes.
pub fn trim_space(s: &str) -> String {
    trim_trailing_space(&trim_leading_space(s))
}

/// Removes trailing runs of `r`, preserving escapes.
///
/// ```rust
/// use quill_text::trim_suffix;
///
/// assert_eq!(trim_suffix("done...", '.'), "done");
/// ```
pub fn trim_suffix(s: &str, r: char) -> String {
    trim_trailing_matches(s, |c| c == r)
}

/// Whitespace other than a line feed.
pub(crate) fn is_blank(c: char) -> bool {
    c != '\n' && c.is_whitespace()
}
