//! Terminal size detection.
//!
//! The size is queried from the controlling terminal (`TIOCGWINSZ` on POSIX,
//! the console screen buffer on Windows) through the `terminal_size` crate.
//! When the output is not a terminal, [`width`] falls back to
//! [`DEFAULT_WIDTH`] columns.
//!
//! Use [`set_size_detector`] to override detection, for example in tests:
//!
//! ```rust
//! use quill_text::terminal::{set_size_detector, width, reset_size_detector};
//!
//! set_size_detector(|| Some((120, 40)));
//! assert_eq!(width(), 120);
//!
//! set_size_detector(|| None);
//! assert_eq!(width(), 80);
//! reset_size_detector();
//! ```

use once_cell::sync::Lazy;
use std::sync::Mutex;

/// Width used when the terminal cannot be queried.
pub const DEFAULT_WIDTH: usize = 80;

type SizeDetector = fn() -> Option<(usize, usize)>;

static SIZE_DETECTOR: Lazy<Mutex<SizeDetector>> = Lazy::new(|| Mutex::new(query_terminal));

fn query_terminal() -> Option<(usize, usize)> {
    terminal_size::terminal_size().map(|(w, h)| (w.0 as usize, h.0 as usize))
}

/// Overrides the function used to query the terminal size.
pub fn set_size_detector(detector: SizeDetector) {
    let mut guard = SIZE_DETECTOR.lock().unwrap_or_else(|e| e.into_inner());
    *guard = detector;
}

/// Restores the default terminal query.
pub fn reset_size_detector() {
    set_size_detector(query_terminal);
}

/// Returns `(columns, rows)` of the terminal, if known.
pub fn size() -> Option<(usize, usize)> {
    let detector = *SIZE_DETECTOR.lock().unwrap_or_else(|e| e.into_inner());
    detector()
}

/// Returns the terminal width in columns, or [`DEFAULT_WIDTH`].
pub fn width() -> usize {
    match size() {
        Some((cols, _)) if cols > 0 => cols,
        _ => {
            tracing::debug!(
                fallback = DEFAULT_WIDTH,
                "terminal size unavailable, using fallback width"
            );
            DEFAULT_WIDTH
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_width_from_detector() {
        set_size_detector(|| Some((132, 50)));
        assert_eq!(width(), 132);
        assert_eq!(size(), Some((132, 50)));
        reset_size_detector();
    }

    #[test]
    #[serial]
    fn test_width_falls_back_when_unknown() {
        set_size_detector(|| None);
        assert_eq!(width(), DEFAULT_WIDTH);
        reset_size_detector();
    }

    #[test]
    #[serial]
    fn test_zero_columns_fall_back() {
        set_size_detector(|| Some((0, 0)));
        assert_eq!(width(), DEFAULT_WIDTH);
        reset_size_detector();
    }
}
