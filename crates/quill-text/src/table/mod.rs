//! Table compositor.
//!
//! A [`Table`] holds an optional header, body rows and an optional footer.
//! Rendering sizes the columns to fit a maximum width (see
//! [`resolve_widths`]), wraps every cell with the [`Cutter`], closes cell
//! styling at each line end so it never bleeds into a neighbouring column,
//! and joins the cells line by line with the [`Grid`] separators.
//!
//! ```rust
//! use quill_text::table::{Grid, Table};
//!
//! let table = Table::new()
//!     .max_width(30)
//!     .grid(Grid::ascii())
//!     .header(["Name", "Qty"])
//!     .row(["apples", "3"])
//!     .row(["kiwis", "12"])
//!     .footer(["Total", "15"]);
//!
//! assert_eq!(table.render(), "\
//! Name   | Qty
//! ====== | ===
//! apples | 3
//! ------ | ---
//! kiwis  | 12
//! ====== | ===
//!  Total |  15
//! ");
//! ```
//!
//! The last column is only padded when it is not left-aligned, so lines carry
//! no trailing fill.

mod grid;
mod resolve;

pub use grid::Grid;
pub use resolve::resolve_widths;

use std::fmt;
use std::io::{self, Write};

use crate::cut::Cutter;
use crate::sgr::interrupt_formatting_at_eol;
use crate::terminal;
use crate::width::{pad, repeat, width, Align};

/// A table of wrapped, aligned cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    header: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
    footer: Option<Vec<String>>,
    max_width: usize,
    widths: Vec<usize>,
    grid: Grid,
    align: Vec<Align>,
    footer_align: Align,
}

fn collect_cells<I, S>(cells: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    cells.into_iter().map(Into::into).collect()
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    /// Creates an empty table as wide as the terminal.
    pub fn new() -> Self {
        Table {
            header: None,
            rows: Vec::new(),
            footer: None,
            max_width: terminal::width(),
            widths: Vec::new(),
            grid: Grid::default(),
            align: Vec::new(),
            footer_align: Align::Right,
        }
    }

    pub fn header<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header = Some(collect_cells(cells));
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(cells);
        self
    }

    pub fn rows<R, I, S>(mut self, rows: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for row in rows {
            self.push_row(row);
        }
        self
    }

    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(collect_cells(cells));
    }

    pub fn footer<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.footer = Some(collect_cells(cells));
        self
    }

    /// Sets the maximum line width; 0 lets columns keep their natural width.
    pub fn max_width(mut self, max_width: usize) -> Self {
        self.max_width = max_width;
        self
    }

    /// Pins the width of the leading columns. Columns past the list are
    /// sized automatically in the space that remains.
    pub fn widths<I: IntoIterator<Item = usize>>(mut self, widths: I) -> Self {
        self.widths = widths.into_iter().collect();
        self
    }

    pub fn grid(mut self, grid: Grid) -> Self {
        self.grid = grid;
        self
    }

    /// Sets the alignment of one column in the header and body rows.
    pub fn align(mut self, column: usize, align: Align) -> Self {
        if self.align.len() <= column {
            self.align.resize(column + 1, Align::Left);
        }
        self.align[column] = align;
        self
    }

    /// Sets the alignment of every footer cell. Defaults to right.
    pub fn footer_align(mut self, align: Align) -> Self {
        self.footer_align = align;
        self
    }

    fn all_rows(&self) -> impl Iterator<Item = &Vec<String>> {
        self.header
            .iter()
            .chain(self.rows.iter())
            .chain(self.footer.iter())
    }

    /// Number of columns: the length of the longest row.
    pub fn column_count(&self) -> usize {
        self.all_rows().map(Vec::len).max().unwrap_or(0)
    }

    fn natural_widths(&self, count: usize) -> Vec<usize> {
        let mut natural = vec![0; count];
        for row in self.all_rows() {
            for (i, cell) in row.iter().enumerate() {
                let w = cell.split('\n').map(width).max().unwrap_or(0);
                natural[i] = natural[i].max(w);
            }
        }
        natural
    }

    /// The width each column is rendered at.
    pub fn column_widths(&self) -> Vec<usize> {
        let count = self.column_count();
        let natural = self.natural_widths(count);
        let sep = width(&self.grid.column_sep);
        if self.widths.is_empty() {
            return resolve_widths(&natural, self.max_width, sep);
        }

        let pinned: Vec<usize> = self.widths.iter().take(count).map(|&w| w.max(1)).collect();
        let free = &natural[pinned.len()..];
        let auto = if free.is_empty() || self.max_width == 0 {
            resolve_widths(free, 0, sep)
        } else {
            let used = pinned.iter().sum::<usize>() + pinned.len() * sep;
            match self.max_width.saturating_sub(used) {
                0 => vec![1; free.len()],
                budget => resolve_widths(free, budget, sep),
            }
        };
        pinned.into_iter().chain(auto).collect()
    }

    fn column_align(&self, column: usize) -> Align {
        self.align.get(column).copied().unwrap_or_default()
    }

    /// Renders the table; every line ends with a newline.
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        if widths.is_empty() {
            return String::new();
        }
        let mut out = String::new();

        if let Some(header) = &self.header {
            self.render_row(&mut out, header, &widths, |i| self.column_align(i));
            if !self.rows.is_empty() || self.footer.is_some() {
                self.render_ruler(&mut out, self.grid.effective_header_ruler(), &widths);
            }
        }
        for (n, row) in self.rows.iter().enumerate() {
            if n > 0 {
                self.render_ruler(&mut out, &self.grid.body_ruler, &widths);
            }
            self.render_row(&mut out, row, &widths, |i| self.column_align(i));
        }
        if let Some(footer) = &self.footer {
            if self.header.is_some() || !self.rows.is_empty() {
                self.render_ruler(&mut out, &self.grid.footer_ruler, &widths);
            }
            self.render_row(&mut out, footer, &widths, |_| self.footer_align);
        }
        out
    }

    /// Writes the rendered table to `out`.
    pub fn draw<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(self.render().as_bytes())
    }

    fn render_ruler(&self, out: &mut String, pattern: &str, widths: &[usize]) {
        if pattern.is_empty() {
            return;
        }
        let parts: Vec<String> = widths.iter().map(|&w| repeat(pattern, w)).collect();
        out.push_str(&parts.join(&self.grid.column_sep));
        out.push('\n');
    }

    fn render_row(
        &self,
        out: &mut String,
        cells: &[String],
        widths: &[usize],
        align: impl Fn(usize) -> Align,
    ) {
        let columns: Vec<Vec<String>> = widths
            .iter()
            .enumerate()
            .map(|(i, &w)| cell_lines(cells.get(i).map(String::as_str).unwrap_or(""), w))
            .collect();
        let height = columns.iter().map(Vec::len).max().unwrap_or(1);
        tracing::trace!(columns = widths.len(), lines = height, "composed table row");

        let last = widths.len() - 1;
        for line in 0..height {
            let parts: Vec<String> = columns
                .iter()
                .enumerate()
                .map(|(i, lines)| {
                    let text = lines.get(line).map(String::as_str).unwrap_or("");
                    match align(i) {
                        Align::Left if i == last => text.to_string(),
                        a => pad(text, widths[i], a),
                    }
                })
                .collect();
            out.push_str(&parts.join(&self.grid.column_sep));
            out.push('\n');
        }
    }
}

/// Wraps a cell at `width` and makes every line carry its own styling.
fn cell_lines(cell: &str, width: usize) -> Vec<String> {
    let wrapped = Cutter::new(width).wrap(cell).join("\n");
    interrupt_formatting_at_eol(&wrapped)
        .split('\n')
        .map(String::from)
        .collect()
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
