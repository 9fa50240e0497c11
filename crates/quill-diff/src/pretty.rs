//! Three-column rendering of diffs.
//!
//! [`pretty_print`] lays a diff out as a left column, an operation column
//! and a right column holding the same number of lines. Deltas are gathered
//! into blocks that end where both sides end a line; each block is then
//! padded with empty lines so the three columns advance together, and its
//! operation symbol is repeated on every line.
//!
//! ```rust
//! use quill_diff::{diff_lcs, pretty_print, Plain, Tokenizer};
//!
//! let diff = diff_lcs("a\nb\n", "a\nc\nd\n", Tokenizer::Lines);
//! let columns = pretty_print(&diff, &[&Plain]);
//! assert_eq!(columns.left, "a\nb\n\n\n");
//! assert_eq!(columns.op, "=\n-\n+\n+\n");
//! assert_eq!(columns.right, "a\n\nc\nd\n");
//! ```

use quill_text::table::{Grid, Table};
use quill_text::{width, Align};

use crate::delta::{Delta, Diff, Op};
use crate::highlight::{Highlighter, Symbols};

/// The three aligned columns of a pretty-printed diff. Every line, the last
/// one included, ends with a newline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Columns {
    pub left: String,
    pub op: String,
    pub right: String,
}

impl Columns {
    /// Number of lines in each column.
    pub fn height(&self) -> usize {
        self.op.matches('\n').count()
    }

    /// `(left, op, right)` for every line, newlines removed.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.left
            .split_terminator('\n')
            .zip(self.op.split_terminator('\n'))
            .zip(self.right.split_terminator('\n'))
            .map(|((l, o), r)| (l, o, r))
    }
}

/// Lines of a block of text: one per newline, plus an unterminated tail.
fn line_count(raw: &str) -> usize {
    let n = raw.matches('\n').count();
    if raw.is_empty() || raw.ends_with('\n') {
        n
    } else {
        n + 1
    }
}

fn at_line_start(raw: &str) -> bool {
    raw.is_empty() || raw.ends_with('\n')
}

/// Deltas gathered until both sides reach a line end.
struct Block {
    op: Op,
    raw_left: String,
    raw_right: String,
    left: String,
    right: String,
}

impl Default for Block {
    fn default() -> Self {
        Self {
            op: Op::Unknown,
            raw_left: String::new(),
            raw_right: String::new(),
            left: String::new(),
            right: String::new(),
        }
    }
}

fn highlight(highlighters: &[&dyn Highlighter], op: Op, text: &str, column: usize) -> String {
    highlighters
        .iter()
        .fold(text.to_string(), |acc, h| h.text_at(op, &acc, column))
}

/// Display column where text appended to `shown` starts.
fn column(shown: &str) -> usize {
    match shown.rfind('\n') {
        Some(p) => width(&shown[p + 1..]),
        None => width(shown),
    }
}

impl Block {
    fn is_empty(&self) -> bool {
        self.raw_left.is_empty() && self.raw_right.is_empty()
    }

    fn is_complete(&self) -> bool {
        !self.is_empty() && at_line_start(&self.raw_left) && at_line_start(&self.raw_right)
    }

    fn push(&mut self, delta: &Delta, highlighters: &[&dyn Highlighter]) {
        match delta {
            Delta::Same(t) => {
                self.raw_left.push_str(t);
                self.raw_right.push_str(t);
                let (col_left, col_right) = (column(&self.left), column(&self.right));
                let shown = highlight(highlighters, Op::Same, t, col_left);
                let shown_right = if col_left == col_right {
                    shown.clone()
                } else {
                    highlight(highlighters, Op::Same, t, col_right)
                };
                self.left.push_str(&shown);
                self.right.push_str(&shown_right);
            }
            Delta::Deleted(t) => {
                self.raw_left.push_str(t);
                let shown = highlight(highlighters, Op::Deleted, t, column(&self.left));
                self.left.push_str(&shown);
            }
            Delta::Inserted(t) => {
                self.raw_right.push_str(t);
                let shown = highlight(highlighters, Op::Inserted, t, column(&self.right));
                self.right.push_str(&shown);
            }
            Delta::Nested(_) => return,
        }
        self.op = self.op.combine(delta.op());
    }

    /// Appends the block to `out`, padding the shorter side.
    fn flush(&mut self, out: &mut Columns, symbols: &Symbols, highlighters: &[&dyn Highlighter]) {
        if self.is_empty() {
            return;
        }
        let block = std::mem::take(self);
        let (mut left, mut right) = (block.left, block.right);
        if !at_line_start(&block.raw_left) {
            left.push('\n');
        }
        if !at_line_start(&block.raw_right) {
            right.push('\n');
        }
        let lines_left = line_count(&block.raw_left);
        let lines_right = line_count(&block.raw_right);
        let height = lines_left.max(lines_right);
        left.extend(std::iter::repeat('\n').take(height - lines_left));
        right.extend(std::iter::repeat('\n').take(height - lines_right));

        let symbol = highlighters
            .iter()
            .fold(symbols.get(block.op).to_string(), |acc, h| h.op(block.op, &acc));
        out.left.push_str(&left);
        out.right.push_str(&right);
        for _ in 0..height {
            out.op.push_str(&symbol);
            out.op.push('\n');
        }
    }
}

/// Lays out `diff` as three aligned columns.
///
/// Highlighters are applied in order; the first one supplying
/// [`Symbols`] sets the operation labels, falling back to the defaults.
pub fn pretty_print(diff: &Diff, highlighters: &[&dyn Highlighter]) -> Columns {
    let symbols = highlighters
        .iter()
        .find_map(|h| h.symbols())
        .unwrap_or_default();

    let mut out = Columns::default();
    let mut block = Block::default();
    for leaf in diff.leaves() {
        block.push(leaf, highlighters);
        if block.is_complete() {
            block.flush(&mut out, &symbols, highlighters);
        }
    }
    block.flush(&mut out, &symbols, highlighters);
    out
}

/// Renders `diff` side by side: left, operation, right.
///
/// The columns go through the table compositor with a soft grid, so long
/// lines wrap within their column and styling stays inside its cell. A
/// `max_width` of zero leaves the lines unwrapped.
///
/// ```rust
/// use quill_diff::{diff_lcs, side_by_side, Plain, Tokenizer};
///
/// let diff = diff_lcs("one\ntwo\n", "one\n2\n", Tokenizer::Lines);
/// let out = side_by_side(&diff, 40, &[&Plain]);
/// assert_eq!(out, "one  =  one\ntwo  -  \n     +  2\n");
/// ```
pub fn side_by_side(diff: &Diff, max_width: usize, highlighters: &[&dyn Highlighter]) -> String {
    let columns = pretty_print(diff, highlighters);
    Table::new()
        .max_width(max_width)
        .grid(Grid::soft())
        .align(1, Align::Center)
        .rows(columns.rows().map(|(l, o, r)| [l, o, r]))
        .render()
}
