//! Presentation hooks for pretty-printed diffs.
//!
//! A [`Highlighter`] transforms the text of each side and the symbol shown in
//! the operation column. Highlighters compose: [`crate::pretty_print`] feeds
//! the output of one into the next, so `WithSoftTabs` followed by
//! `WithColor` expands tabs and then colours the result.
//!
//! ```rust
//! use quill_diff::highlight::{Highlighter, WithNonPrintable, WithSoftTabs};
//!
//! assert_eq!(WithSoftTabs::new(4).inserted("a\tb"), "a   b");
//! assert_eq!(WithNonPrintable.deleted("a\tb\r\n"), "a␉b␍\n");
//! ```

use console::Style;
use quill_text::walk::{walk, Event};

use crate::delta::Op;

/// Labels of the operation column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Symbols {
    pub same: &'static str,
    pub different: &'static str,
    pub deleted: &'static str,
    pub inserted: &'static str,
    pub unknown: &'static str,
}

impl Default for Symbols {
    fn default() -> Self {
        Self {
            same: "=",
            different: "<>",
            deleted: "-",
            inserted: "+",
            unknown: "?",
        }
    }
}

impl Symbols {
    pub fn get(&self, op: Op) -> &'static str {
        match op {
            Op::Same => self.same,
            Op::Different => self.different,
            Op::Deleted => self.deleted,
            Op::Inserted => self.inserted,
            Op::Unknown => self.unknown,
        }
    }
}

/// Transforms the text of a pretty-printed diff.
///
/// Every method defaults to the identity, so an implementation only
/// overrides what it changes.
pub trait Highlighter {
    /// Text present on both sides.
    fn same(&self, text: &str) -> String {
        text.to_string()
    }

    /// Text only on the left.
    fn deleted(&self, text: &str) -> String {
        text.to_string()
    }

    /// Text only on the right.
    fn inserted(&self, text: &str) -> String {
        text.to_string()
    }

    /// Text of kind `op` starting at display column `column` of its line.
    ///
    /// Dispatches to `same`, `deleted` or `inserted`. Override it when the
    /// result depends on where the text sits.
    fn text_at(&self, op: Op, text: &str, _column: usize) -> String {
        match op {
            Op::Deleted => self.deleted(text),
            Op::Inserted => self.inserted(text),
            _ => self.same(text),
        }
    }

    /// The operation column entry for `op`, currently rendered as `symbol`.
    fn op(&self, _op: Op, symbol: &str) -> String {
        symbol.to_string()
    }

    /// Symbol set to use. The first highlighter returning one wins.
    fn symbols(&self) -> Option<Symbols> {
        None
    }
}

/// Leaves text untouched and supplies the default symbols.
#[derive(Clone, Copy, Debug, Default)]
pub struct Plain;

impl Highlighter for Plain {
    fn symbols(&self) -> Option<Symbols> {
        Some(Symbols::default())
    }
}

/// Colours deletions, insertions and the operation column.
///
/// Each line is styled on its own so a colour never spans a newline, which
/// keeps the columns independent once laid out in a table.
#[derive(Clone, Debug)]
pub struct WithColor {
    pub same: Style,
    pub deleted: Style,
    pub inserted: Style,
    pub different: Style,
}

impl Default for WithColor {
    fn default() -> Self {
        Self {
            same: Style::new(),
            deleted: Style::new().red().force_styling(true),
            inserted: Style::new().green().force_styling(true),
            different: Style::new().yellow().force_styling(true),
        }
    }
}

impl WithColor {
    pub fn new() -> Self {
        Self::default()
    }

    fn style_for(&self, op: Op) -> Option<&Style> {
        match op {
            Op::Deleted => Some(&self.deleted),
            Op::Inserted => Some(&self.inserted),
            Op::Different => Some(&self.different),
            Op::Same | Op::Unknown => None,
        }
    }
}

/// Applies `style` to each line of `text`, newlines left outside.
fn style_lines(style: &Style, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let (body, eol) = match line.strip_suffix('\n') {
            Some(body) => (body, "\n"),
            None => (line, ""),
        };
        if !body.is_empty() {
            out.push_str(&style.apply_to(body).to_string());
        }
        out.push_str(eol);
    }
    out
}

impl Highlighter for WithColor {
    fn same(&self, text: &str) -> String {
        style_lines(&self.same, text)
    }

    fn deleted(&self, text: &str) -> String {
        style_lines(&self.deleted, text)
    }

    fn inserted(&self, text: &str) -> String {
        style_lines(&self.inserted, text)
    }

    fn op(&self, op: Op, symbol: &str) -> String {
        match self.style_for(op) {
            Some(style) => style_lines(style, symbol),
            None => symbol.to_string(),
        }
    }
}

/// Expands tabs to spaces up to the next tab stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithSoftTabs {
    pub width: usize,
}

impl Default for WithSoftTabs {
    fn default() -> Self {
        Self { width: 4 }
    }
}

impl WithSoftTabs {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// Expands `text` as if it started at column `col`. Columns restart after
    /// every newline; escapes take no room.
    fn expand(&self, text: &str, mut col: usize) -> String {
        if self.width == 0 || !text.contains('\t') {
            return text.to_string();
        }
        let mut out = String::with_capacity(text.len());
        for (_, event) in walk(text) {
            match event {
                Event::Escape(seq) => out.push_str(seq),
                Event::Rune { rune: '\t', .. } => {
                    let n = self.width - col % self.width;
                    out.extend(std::iter::repeat(' ').take(n));
                    col += n;
                }
                Event::Rune { rune: '\n', .. } => {
                    out.push('\n');
                    col = 0;
                }
                Event::Rune { rune, width } => {
                    out.push(rune);
                    col += width;
                }
            }
        }
        out
    }
}

impl Highlighter for WithSoftTabs {
    fn same(&self, text: &str) -> String {
        self.expand(text, 0)
    }

    fn deleted(&self, text: &str) -> String {
        self.expand(text, 0)
    }

    fn inserted(&self, text: &str) -> String {
        self.expand(text, 0)
    }

    fn text_at(&self, _op: Op, text: &str, column: usize) -> String {
        self.expand(text, column)
    }
}

/// Shows control characters as their Unicode control pictures (`␉`, `␍`,
/// `␡`, ...). Newlines are kept; escape sequences pass through.
#[derive(Clone, Copy, Debug, Default)]
pub struct WithNonPrintable;

fn control_picture(c: char) -> Option<char> {
    match c {
        '\n' => None,
        '\u{0}'..='\u{1f}' => char::from_u32(0x2400 + c as u32),
        '\u{7f}' => Some('\u{2421}'),
        _ => None,
    }
}

impl WithNonPrintable {
    fn reveal(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for (_, event) in walk(text) {
            match event {
                Event::Escape(seq) => out.push_str(seq),
                Event::Rune { rune, .. } => out.push(control_picture(rune).unwrap_or(rune)),
            }
        }
        out
    }
}

impl Highlighter for WithNonPrintable {
    fn same(&self, text: &str) -> String {
        self.reveal(text)
    }

    fn deleted(&self, text: &str) -> String {
        self.reveal(text)
    }

    fn inserted(&self, text: &str) -> String {
        self.reveal(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_text::strip_escapes;

    // --- symbols ---

    #[test]
    fn default_symbols() {
        let s = Symbols::default();
        assert_eq!(s.get(Op::Same), "=");
        assert_eq!(s.get(Op::Different), "<>");
        assert_eq!(s.get(Op::Deleted), "-");
        assert_eq!(s.get(Op::Inserted), "+");
        assert_eq!(s.get(Op::Unknown), "?");
    }

    #[test]
    fn plain_is_identity() {
        assert_eq!(Plain.same("a\tb"), "a\tb");
        assert_eq!(Plain.op(Op::Inserted, "+"), "+");
        assert_eq!(Plain.symbols(), Some(Symbols::default()));
        assert_eq!(WithSoftTabs::default().symbols(), None);
    }

    // --- color ---

    #[test]
    fn color_styles_each_line() {
        let c = WithColor::new();
        let red = Style::new().red().force_styling(true);
        let out = c.deleted("ab\ncd\n");
        assert_eq!(
            out,
            format!("{}\n{}\n", red.apply_to("ab"), red.apply_to("cd"))
        );
        assert_eq!(strip_escapes(&out), "ab\ncd\n");
    }

    #[test]
    fn color_leaves_blank_lines_bare() {
        assert_eq!(WithColor::new().inserted("\n\n"), "\n\n");
    }

    #[test]
    fn color_same_is_unstyled_by_default() {
        assert_eq!(WithColor::new().same("x"), "x");
        assert_eq!(WithColor::new().op(Op::Same, "="), "=");
        assert_ne!(WithColor::new().op(Op::Inserted, "+"), "+");
    }

    // --- soft tabs ---

    #[test]
    fn tabs_expand_to_stops() {
        let t = WithSoftTabs::new(4);
        assert_eq!(t.same("\tx"), "    x");
        assert_eq!(t.same("ab\tx"), "ab  x");
        assert_eq!(t.same("abcd\tx"), "abcd    x");
        assert_eq!(t.same("a\n\tb"), "a\n    b");
    }

    #[test]
    fn tabs_expand_from_given_column() {
        let t = WithSoftTabs::new(4);
        assert_eq!(t.text_at(Op::Same, "\tx", 2), "  x");
        assert_eq!(t.text_at(Op::Inserted, "\tx\n\ty", 3), " x\n    y");
        assert_eq!(Plain.text_at(Op::Deleted, "\t", 2), "\t");
    }

    #[test]
    fn tabs_ignore_escapes_and_count_wide_runes() {
        let t = WithSoftTabs::new(4);
        assert_eq!(t.deleted("\x1b[1ma\x1b[0m\tb"), "\x1b[1ma\x1b[0m   b");
        assert_eq!(t.deleted("界\tb"), "界  b");
    }

    #[test]
    fn zero_width_keeps_tabs() {
        assert_eq!(WithSoftTabs::new(0).inserted("\t"), "\t");
    }

    // --- non printable ---

    #[test]
    fn control_runes_become_pictures() {
        let n = WithNonPrintable;
        assert_eq!(n.same("\0\x07\x7f"), "␀␇␡");
        assert_eq!(n.same("line\n"), "line\n");
    }

    #[test]
    fn escapes_survive_non_printable() {
        let styled = WithColor::new().inserted("a\tb");
        let out = WithNonPrintable.inserted(&styled);
        assert_eq!(strip_escapes(&out), "a␉b");
        assert!(out.contains('\x1b'));
    }
}
