//! Prelude for convenient imports.
//!
//! Re-exports the types most programs need, so a single glob import covers
//! wrapping, tables and diffs:
//!
//! ```rust
//! use quill::prelude::*;
//!
//! let table = Table::new().max_width(20).row(["a", "b"]);
//! assert_eq!(table.render(), "a | b\n");
//!
//! let d = diff("x\n", "y\n");
//! assert_eq!(d.op(), Op::Different);
//! ```

// Text layout
pub use quill_text::{
    pad, strip_escapes, truncate, width, Align, Cutter, Grid, Renditions, Table, TextWriter,
};

// Diffs
pub use quill_diff::{
    diff, pretty_print, side_by_side, Algorithm, Delta, Diff, Differ, Highlighter, Op, Plain,
    Tokenizer, WithColor,
};
