//! Escape-aware traversal of styled text.
//!
//! [`walk`] splits a string into visual events: displayable runes carrying
//! their column width, and complete escape sequences, which occupy no
//! columns. Every higher-level operation in this crate (width measurement,
//! truncation, cutting, trimming) is built on this iterator.
//!
//! An escape starts at `ESC` (or the 8-bit CSI `U+009B`) and runs up to and
//! including the first ASCII letter or `~`. An escape left unterminated at
//! the end of the input is yielded as-is.
//!
//! ```rust
//! use quill_text::walk::{walk, Event};
//!
//! let events: Vec<_> = walk("a\x1b[1m界").map(|(_, e)| e).collect();
//! assert_eq!(
//!     events,
//!     vec![
//!         Event::Rune { rune: 'a', width: 1 },
//!         Event::Escape("\x1b[1m"),
//!         Event::Rune { rune: '界', width: 2 },
//!     ]
//! );
//! ```
//!
//! Stopping early is a plain `break` (or `take_while`) on the iterator.

use crate::sgr::CSI_8BIT;
use crate::width::rune_width;

/// A single visual event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event<'a> {
    /// A code point and the number of columns it occupies.
    Rune { rune: char, width: usize },
    /// A complete (or unterminated, at end of input) escape sequence.
    Escape(&'a str),
}

impl Event<'_> {
    /// Number of bytes this event spans in the input.
    pub fn advance(&self) -> usize {
        match self {
            Event::Rune { rune, .. } => rune.len_utf8(),
            Event::Escape(seq) => seq.len(),
        }
    }

    /// Display width: zero for escapes.
    pub fn width(&self) -> usize {
        match self {
            Event::Rune { width, .. } => *width,
            Event::Escape(_) => 0,
        }
    }
}

/// Iterator over the visual events of a string, with their byte offsets.
#[derive(Clone, Debug)]
pub struct Walker<'a> {
    text: &'a str,
    pos: usize,
}

/// Walks `text`, yielding `(byte_offset, event)` pairs.
pub fn walk(text: &str) -> Walker<'_> {
    Walker { text, pos: 0 }
}

impl<'a> Walker<'a> {
    /// Byte offset of the next event.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// The part of the input not yet walked.
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }
}

fn is_introducer(c: char) -> bool {
    c == '\x1b' || c == CSI_8BIT
}

fn is_final(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '~'
}

impl<'a> Iterator for Walker<'a> {
    type Item = (usize, Event<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let rest = &self.text[start..];
        let mut chars = rest.char_indices();
        let (_, c) = chars.next()?;

        if is_introducer(c) {
            let end = chars
                .find(|&(_, ch)| is_final(ch))
                .map(|(i, ch)| i + ch.len_utf8())
                .unwrap_or(rest.len());
            self.pos += end;
            return Some((start, Event::Escape(&rest[..end])));
        }

        self.pos += c.len_utf8();
        Some((
            start,
            Event::Rune {
                rune: c,
                width: rune_width(c),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(s: &str) -> Vec<Event<'_>> {
        walk(s).map(|(_, e)| e).collect()
    }

    #[test]
    fn walk_plain_text() {
        let evs = events("ab");
        assert_eq!(
            evs,
            vec![
                Event::Rune { rune: 'a', width: 1 },
                Event::Rune { rune: 'b', width: 1 }
            ]
        );
    }

    #[test]
    fn walk_reports_offsets() {
        let offsets: Vec<usize> = walk("é\x1b[0mx").map(|(i, _)| i).collect();
        assert_eq!(offsets, vec![0, 2, 6]);
    }

    #[test]
    fn walk_escape_events() {
        assert_eq!(
            events("\x1b[31mBonjour\x1b[m")
                .iter()
                .filter(|e| matches!(e, Event::Escape(_)))
                .count(),
            2
        );
    }

    #[test]
    fn walk_strips_to_bonjour() {
        let text: String = events("\x1b[31mBonjour\x1b[m")
            .into_iter()
            .filter_map(|e| match e {
                Event::Rune { rune, .. } => Some(rune),
                Event::Escape(_) => None,
            })
            .collect();
        assert_eq!(text, "Bonjour");
    }

    #[test]
    fn walk_tilde_terminates() {
        assert_eq!(events("\x1b[3~x")[0], Event::Escape("\x1b[3~"));
    }

    #[test]
    fn walk_unterminated_escape_is_emitted() {
        assert_eq!(events("ok\x1b[12;3"), vec![
            Event::Rune { rune: 'o', width: 1 },
            Event::Rune { rune: 'k', width: 1 },
            Event::Escape("\x1b[12;3"),
        ]);
    }

    #[test]
    fn walk_8bit_csi() {
        assert_eq!(events("\u{9b}1mx")[0], Event::Escape("\u{9b}1m"));
    }

    #[test]
    fn walk_widths() {
        assert_eq!(events("日")[0].width(), 2);
        assert_eq!(events("e\u{301}")[1].width(), 0);
        assert_eq!(events("\t")[0].width(), 0);
    }

    #[test]
    fn walk_advance_matches_bytes() {
        let s = "a\x1b[1m日";
        let total: usize = walk(s).map(|(_, e)| e.advance()).sum();
        assert_eq!(total, s.len());
    }

    #[test]
    fn walker_rest_and_offset() {
        let mut w = walk("ab");
        w.next();
        assert_eq!(w.offset(), 1);
        assert_eq!(w.rest(), "b");
    }
}
