//! Width-bounded line cutting.
//!
//! A [`Cutter`] splits a buffer into the longest prefix that fits a maximum
//! display width and the remainder. It prefers to cut after whitespace or
//! after one of its word-boundary runes; a word longer than the whole width is
//! either chunked (strict mode, the default) or left to overflow (lazy mode).
//!
//! ```rust
//! use quill_text::Cutter;
//!
//! let cutter = Cutter::new(10);
//! let lines: Vec<&str> = cutter
//!     .cuts("This \x1b[34mis a long sentence\x1b[0m")
//!     .collect();
//! assert_eq!(lines, vec!["This \x1b[34mis a ", "long ", "sentence\x1b[0m"]);
//! ```

use crate::walk::{walk, Event};
use crate::width::{is_blank, trim_leading_matches};

/// Runes after which a line may be cut, in addition to whitespace.
pub const DEFAULT_WORD_BOUNDARIES: &[char] = &[')', ']', '-', '|'];

/// Splits text into lines no wider than a maximum width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cutter {
    max_width: usize,
    lazy: bool,
    boundaries: Vec<char>,
}

impl Default for Cutter {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Cutter {
    /// Creates a strict cutter. A `max_width` of 0 only cuts at newlines.
    pub fn new(max_width: usize) -> Self {
        Cutter {
            max_width,
            lazy: false,
            boundaries: DEFAULT_WORD_BOUNDARIES.to_vec(),
        }
    }

    /// In lazy mode a word wider than the limit overflows instead of being
    /// chunked.
    pub fn lazy(mut self, lazy: bool) -> Self {
        self.lazy = lazy;
        self
    }

    /// Replaces the word-boundary runes. Whitespace always remains a
    /// boundary.
    pub fn word_boundaries<I: IntoIterator<Item = char>>(mut self, boundaries: I) -> Self {
        self.boundaries = boundaries.into_iter().collect();
        self
    }

    pub fn max_width(&self) -> usize {
        self.max_width
    }

    pub fn is_lazy(&self) -> bool {
        self.lazy
    }

    fn is_boundary(&self, c: char) -> bool {
        self.boundaries.contains(&c)
    }

    /// Splits `buf` into `(line, tail)`.
    ///
    /// Returns `None` when no cut is possible yet: the buffer holds no newline
    /// and fits (or, in lazy mode, overflows inside a single word). A line cut
    /// at a newline keeps the newline and any escapes directly following it.
    pub fn split<'a>(&self, buf: &'a str) -> Option<(&'a str, &'a str)> {
        let mut used = 0;
        let mut word_end: Option<usize> = None;
        let mut events = walk(buf).peekable();

        while let Some((i, event)) = events.next() {
            let Event::Rune { rune, width } = event else {
                continue;
            };

            if rune == '\n' {
                let mut end = i + 1;
                while let Some(&(j, Event::Escape(seq))) = events.peek() {
                    end = j + seq.len();
                    events.next();
                }
                return Some(buf.split_at(end));
            }
            if self.max_width == 0 {
                continue;
            }

            let after = i + rune.len_utf8();
            let over = used + width > self.max_width;

            if rune.is_whitespace() {
                if over {
                    // A lone rune wider than the limit still has to go somewhere.
                    let cut = if used == 0 { after } else { i };
                    return Some(buf.split_at(cut));
                }
                used += width;
                word_end = Some(after);
                continue;
            }

            if over {
                if let Some(cut) = word_end {
                    return Some(buf.split_at(cut));
                }
                if !self.lazy {
                    let cut = if used == 0 { after } else { i };
                    return Some(buf.split_at(cut));
                }
            }

            used += width;
            if self.is_boundary(rune) {
                word_end = Some(after);
            }
        }
        None
    }

    /// Iterates over every line `split` produces, followed by the final
    /// remainder. Concatenating the items gives back `buf`.
    pub fn cuts<'c, 'a>(&'c self, buf: &'a str) -> Cuts<'c, 'a> {
        Cuts { cutter: self, rest: buf }
    }

    /// Wraps `s` into display lines.
    ///
    /// Newlines are removed from the returned lines, and leading blanks are
    /// dropped from lines continuing after a width cut. Escapes are kept in
    /// place; use [`crate::sgr::interrupt_formatting_at_eol`] to make each
    /// line self-contained.
    ///
    /// ```rust
    /// use quill_text::Cutter;
    ///
    /// assert_eq!(
    ///     Cutter::new(5).wrap("hello world\nbye"),
    ///     vec!["hello", "world", "bye"],
    /// );
    /// ```
    pub fn wrap(&self, s: &str) -> Vec<String> {
        let mut lines = Vec::new();
        let mut rest = s.to_string();
        loop {
            let (line, tail, at_newline) = match self.split(&rest) {
                Some((line, tail)) => (line, tail, line.contains('\n')),
                None => break,
            };
            let display = if at_newline {
                line.replacen('\n', "", 1)
            } else {
                line.to_string()
            };
            lines.push(display);
            rest = if at_newline {
                tail.to_string()
            } else {
                trim_continuation(tail).0
            };
        }
        if !rest.is_empty() {
            lines.push(rest);
        }
        lines
    }
}

/// Drops the blanks a width cut leaves at the head of `tail`, and the newline
/// right after them, since the cut already ended that line.
///
/// The flag tells whether a rune other than a blank was reached, i.e. whether
/// anything was left to strip after the returned text.
pub(crate) fn trim_continuation(tail: &str) -> (String, bool) {
    let trimmed = trim_leading_matches(tail, is_blank);
    let first = walk(&trimmed).find_map(|(i, event)| match event {
        Event::Rune { rune, .. } => Some((i, rune)),
        Event::Escape(_) => None,
    });
    match first {
        Some((i, '\n')) => (format!("{}{}", &trimmed[..i], &trimmed[i + 1..]), true),
        Some(_) => (trimmed, true),
        None => (trimmed, false),
    }
}

/// Iterator returned by [`Cutter::cuts`].
#[derive(Debug)]
pub struct Cuts<'c, 'a> {
    cutter: &'c Cutter,
    rest: &'a str,
}

impl<'a> Iterator for Cuts<'_, 'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        match self.cutter.split(self.rest) {
            Some((line, tail)) => {
                self.rest = tail;
                Some(line)
            }
            None => Some(std::mem::take(&mut self.rest)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::width::width;

    fn all(cutter: &Cutter, s: &str) -> Vec<String> {
        cutter.cuts(s).map(String::from).collect()
    }

    // --- split ---

    #[test]
    fn split_fits_is_none() {
        assert_eq!(Cutter::new(10).split("short"), None);
        assert_eq!(Cutter::new(5).split("exact"), None);
    }

    #[test]
    fn split_at_newline() {
        assert_eq!(Cutter::new(80).split("a\nb"), Some(("a\n", "b")));
    }

    #[test]
    fn split_newline_absorbs_escapes() {
        assert_eq!(
            Cutter::new(80).split("red\n\x1b[0m\x1b[1mnext"),
            Some(("red\n\x1b[0m\x1b[1m", "next"))
        );
    }

    #[test]
    fn split_zero_width_only_newlines() {
        let cutter = Cutter::new(0);
        assert_eq!(cutter.split("a very long line without any newline"), None);
        assert_eq!(cutter.split("one\ntwo"), Some(("one\n", "two")));
    }

    #[test]
    fn split_whitespace_over_limit_starts_tail() {
        assert_eq!(Cutter::new(5).split("hello world"), Some(("hello", " world")));
    }

    #[test]
    fn split_at_last_word_boundary() {
        assert_eq!(Cutter::new(8).split("ab cd efgh"), Some(("ab cd ", "efgh")));
    }

    #[test]
    fn split_after_punctuation_boundary() {
        assert_eq!(Cutter::new(6).split("well-known"), Some(("well-", "known")));
        assert_eq!(Cutter::new(4).split("(a|b)cd"), Some(("(a|", "b)cd")));
    }

    #[test]
    fn split_strict_chunks_long_word() {
        assert_eq!(Cutter::new(4).split("abcdefgh"), Some(("abcd", "efgh")));
    }

    #[test]
    fn split_lazy_lets_long_word_overflow() {
        let cutter = Cutter::new(4).lazy(true);
        assert_eq!(cutter.split("abcdefgh"), None);
        assert_eq!(cutter.split("abcdefgh ij"), Some(("abcdefgh", " ij")));
    }

    #[test]
    fn split_wide_rune_wider_than_limit() {
        assert_eq!(Cutter::new(1).split("日本"), Some(("日", "本")));
    }

    #[test]
    fn split_custom_boundaries() {
        let cutter = Cutter::new(5).word_boundaries(['/']);
        assert_eq!(cutter.split("a/b/cdef"), Some(("a/b/", "cdef")));
        assert_eq!(cutter.split("ab-cdefg"), Some(("ab-cd", "efg")));
    }

    // --- cuts / wrap ---

    #[test]
    fn cuts_wrap_with_colour() {
        assert_eq!(
            all(&Cutter::new(10), "This \x1b[34mis a long sentence\x1b[0m"),
            vec!["This \x1b[34mis a ", "long ", "sentence\x1b[0m"]
        );
    }

    #[test]
    fn cuts_concatenate_to_input() {
        let s = "lorem ipsum dolor\nsit amet, consectetur adipiscing elit";
        let joined: String = Cutter::new(7).cuts(s).collect();
        assert_eq!(joined, s);
    }

    #[test]
    fn cuts_empty_input() {
        assert!(all(&Cutter::new(3), "").is_empty());
    }

    #[test]
    fn cuts_strict_width_bound() {
        let cutter = Cutter::new(6);
        for line in cutter.cuts("the quick brown fox jumps over the lazy dog") {
            assert!(width(line) <= 6, "{line:?}");
        }
    }

    #[test]
    fn wrap_strips_continuation_blanks() {
        assert_eq!(Cutter::new(5).wrap("hello   world"), vec!["hello", "world"]);
    }

    #[test]
    fn wrap_keeps_blank_lines() {
        assert_eq!(Cutter::new(5).wrap("a\n\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn wrap_blank_before_newline_adds_no_line() {
        assert_eq!(Cutter::new(5).wrap("hello \nworld"), vec!["hello", "world"]);
        assert_eq!(Cutter::new(5).wrap("hello  \n\nworld"), vec!["hello", "", "world"]);
    }

    #[test]
    fn trim_continuation_keeps_escapes() {
        assert_eq!(
            trim_continuation(" \x1b[1m\nnext"),
            ("\x1b[1mnext".to_string(), true)
        );
        assert_eq!(trim_continuation("  "), (String::new(), false));
        assert_eq!(trim_continuation(" word"), ("word".to_string(), true));
    }

    #[test]
    fn wrap_keeps_escape_after_newline() {
        assert_eq!(
            Cutter::new(10).wrap("\x1b[1mab\n\x1b[0mcd"),
            vec!["\x1b[1mab\x1b[0m", "cd"]
        );
    }
}
