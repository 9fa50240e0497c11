//! # Quill - Terminal Text Composition
//!
//! Quill lays out styled text for fixed-width surfaces. It measures text in
//! terminal columns, keeps SGR styling intact across wrapping and
//! truncation, composes auto-sized tables and renders text diffs side by
//! side.
//!
//! This crate bundles:
//!
//! - [`text`] (`quill-text`): widths, the SGR tracker, the cutter, the
//!   streaming [`TextWriter`] and the [`Table`] compositor
//! - [`diff`] (`quill-diff`): tokenisers, LCS and Patience, adaptive
//!   refinement and the diff pretty-printer
//! - [`dirs`]: per-platform configuration directories
//!
//! ## Quick Start
//!
//! ```rust
//! use quill::prelude::*;
//!
//! let out = Table::new()
//!     .max_width(24)
//!     .header(["Key", "Value"])
//!     .row(["width", "\x1b[1m80\x1b[0m"])
//!     .render();
//! assert!(out.lines().all(|l| width(l) <= 24));
//!
//! let d = diff("colour\n", "color\n");
//! assert_eq!(d.right(), "color\n");
//! ```
//!
//! ## Logging
//!
//! The crates emit `tracing` events and never install a subscriber; hook one
//! up in the binary to see them.

pub mod dirs;
pub mod prelude;

pub use quill_diff as diff;
pub use quill_text as text;

pub use quill_text::{Cutter, Grid, Renditions, Table, TextError, TextWriter};

pub use quill_diff::{Algorithm, Delta, Diff, Differ, Op, Tokenizer};
