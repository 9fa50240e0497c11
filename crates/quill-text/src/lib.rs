//! # Quill Text - Visual-Width Aware Text Engine
//!
//! `quill-text` lays out styled, multilingual text for fixed-width surfaces
//! such as terminals and logs. Every operation measures text in terminal
//! columns: SGR escape sequences count as zero columns and are carried
//! through intact, East-Asian wide characters count as two, combining marks
//! as zero.
//!
//! ## Core Concepts
//!
//! - [`sgr::Renditions`]: the cumulative SGR state, combining codes and
//!   dropping the ones they supersede
//! - [`walk()`]: splits text into runes (with their width) and escapes
//! - [`width()`], [`truncate`], [`pad_left`], [`pad_right`], [`pad_center`],
//!   [`repeat`] and the `trim_*` family
//! - [`Cutter`]: splits a buffer at the best line break for a given width
//! - [`TextWriter`]: a wrapping, indenting, prefixing `io::Write` adapter
//! - [`Table`]: auto-sized tables whose cells are wrapped and kept styled
//!
//! ## Quick Start
//!
//! ```rust
//! use quill_text::{truncate, width, Cutter};
//!
//! let text = "This \x1b[34mis a long sentence\x1b[0m";
//! assert_eq!(width(text), 23);
//! assert_eq!(truncate(text, 7), "This \x1b[34mis\x1b[0m");
//!
//! let lines: Vec<&str> = Cutter::new(10).cuts(text).collect();
//! assert_eq!(lines.len(), 3);
//! ```
//!
//! ## Streaming
//!
//! ```rust
//! use std::io::Write;
//! use quill_text::TextWriter;
//!
//! let mut w = TextWriter::with_width(Vec::new(), 20);
//! w.set_prefix(["// "]);
//! writeln!(w, "comments wrap with their prefix on every line").unwrap();
//! w.flush().unwrap();
//!
//! let out = String::from_utf8(w.into_inner()).unwrap();
//! assert!(out.lines().all(|l| l.starts_with("// ")));
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events (terminal size fallbacks, resolved table
//! widths) and never installs a subscriber.

pub mod cut;
mod error;
pub mod sgr;
pub mod table;
pub mod terminal;
pub mod walk;
pub mod width;
pub mod writer;

pub use error::{Result, TextError};

pub use cut::{Cutter, DEFAULT_WORD_BOUNDARIES};
pub use sgr::{interrupt_formatting_at_eol, Renditions};
pub use table::{Grid, Table};
pub use walk::{walk, Event};
pub use width::{
    pad, pad_center, pad_left, pad_right, repeat, rune_width, strip_escapes, trim_leading_matches,
    trim_leading_space, trim_space, trim_suffix, trim_trailing_matches, trim_trailing_space,
    truncate, width, Align,
};
pub use writer::TextWriter;
