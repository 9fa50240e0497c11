//! # Quill Diff - Adaptive Text Diffs
//!
//! `quill-diff` compares two texts and renders the result for the terminal.
//!
//! ## Core Concepts
//!
//! - [`Tokenizer`]: splits text into lines, words or runes
//! - [`lcs()`] and [`patience()`]: align two token slices
//! - [`Diff`] and [`Delta`]: the result tree; a [`Delta::Nested`] holds a
//!   finer diff of a changed region
//! - [`Differ`]: adaptive refinement, re-diffing changed lines word by word
//!   and changed words rune by rune
//! - [`pretty_print`] and [`side_by_side`]: three-column rendering, shaped by
//!   [`Highlighter`]s
//!
//! ## Quick Start
//!
//! ```rust
//! use quill_diff::{diff, side_by_side, Op, Plain};
//!
//! let d = diff("name = \"quill\"\n", "name = \"quill-diff\"\n");
//! assert_eq!(d.op(), Op::Inserted);
//! assert_eq!(d.right(), "name = \"quill-diff\"\n");
//!
//! let shown = side_by_side(&d, 60, &[&Plain]);
//! assert!(shown.contains('+'));
//! ```
//!
//! ## Features
//!
//! - `similarity` (default): Jaro-Winkler matching, so near-identical lines
//!   are refined together rather than shown as a deletion and an unrelated
//!   insertion.
//! - `serde` (default): `Serialize`/`Deserialize` for the result tree.
//!
//! ## Logging
//!
//! Refinement emits `tracing` debug events with the zone counts of each
//! level; no subscriber is installed.

pub mod delta;
pub mod highlight;
pub mod lcs;
pub mod patience;
pub mod pretty;
pub mod refine;
pub mod similarity;
pub mod tokenize;

pub use delta::{Delta, Diff, Op};
pub use highlight::{Highlighter, Plain, Symbols, WithColor, WithNonPrintable, WithSoftTabs};
pub use lcs::{lcs, lcs_similar};
pub use patience::patience;
pub use pretty::{pretty_print, side_by_side, Columns};
pub use refine::{adaptive, diff, diff_lcs, diff_patience, Algorithm, Differ};
pub use tokenize::Tokenizer;
