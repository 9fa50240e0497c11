//! Streaming, wrapping text writer.
//!
//! [`TextWriter`] sits in front of any [`std::io::Write`] sink. Bytes written
//! to it are buffered until a complete line is available (a newline, or
//! enough text to fill the maximum width), then the line is indented,
//! prefixed, aligned, padded and written out.
//!
//! Styling survives line breaks: when an SGR state is active at the end of a
//! line it is reset before the newline, and re-entered after the next line's
//! indent and prefix, so margins and padding are never styled.
//!
//! ```rust
//! use std::io::Write;
//! use quill_text::TextWriter;
//!
//! let mut w = TextWriter::with_width(Vec::new(), 12);
//! w.indent().set_prefix(["> "]);
//! write!(w, "a few words that need wrapping").unwrap();
//! w.flush().unwrap();
//!
//! let out = String::from_utf8(w.into_inner()).unwrap();
//! assert_eq!(out, "  > a few\n  > words\n  > that\n  > need\n  > wrapping");
//! ```
//!
//! Dropping the writer discards a pending partial line; call `flush` first.

use std::io::{self, Write};

use crate::cut::{trim_continuation, Cutter};
use crate::sgr::Renditions;
use crate::terminal;
use crate::walk::{walk, Event};
use crate::width::{trim_trailing_space, width, Align};

/// Default indent pattern, repeated once per indent level.
pub const DEFAULT_INDENT: &str = "  ";

/// A write-through adapter that wraps, indents, prefixes and aligns text.
#[derive(Debug)]
pub struct TextWriter<W: Write> {
    out: W,
    max_width: usize,
    indent_pattern: String,
    indent_level: usize,
    block_indent: bool,
    prefixes: Vec<String>,
    prefix_cursor: usize,
    reset_prefix_after_line: bool,
    align: Align,
    pad: bool,
    lazy: bool,
    pending: Vec<u8>,
    strip_leading: bool,
    renditions: Renditions,
}

impl<W: Write> TextWriter<W> {
    /// Creates a writer wrapping at the terminal width.
    pub fn new(out: W) -> Self {
        Self::with_width(out, terminal::width())
    }

    /// Creates a writer that never wraps; only newlines end lines.
    pub fn unbounded(out: W) -> Self {
        Self::with_width(out, 0)
    }

    /// Creates a writer wrapping at `max_width` columns (0 disables wrapping).
    pub fn with_width(out: W, max_width: usize) -> Self {
        TextWriter {
            out,
            max_width,
            indent_pattern: DEFAULT_INDENT.to_string(),
            indent_level: 0,
            block_indent: false,
            prefixes: Vec::new(),
            prefix_cursor: 0,
            reset_prefix_after_line: false,
            align: Align::Left,
            pad: false,
            lazy: false,
            pending: Vec::new(),
            strip_leading: false,
            renditions: Renditions::new(),
        }
    }

    pub fn set_max_width(&mut self, max_width: usize) -> &mut Self {
        self.max_width = max_width;
        self
    }

    pub fn max_width(&self) -> usize {
        self.max_width
    }

    /// Lets words longer than the line overflow instead of chunking them.
    pub fn lazy_wrap(&mut self) -> &mut Self {
        self.lazy = true;
        self
    }

    /// Sets the pattern emitted once per indent level.
    pub fn indent_with(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.indent_pattern = pattern.into();
        self
    }

    pub fn indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    pub fn unindent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Mirrors the indent as a right margin.
    pub fn block_indent(&mut self) -> &mut Self {
        self.block_indent = true;
        self
    }

    pub fn unblock_indent(&mut self) -> &mut Self {
        self.block_indent = false;
        self
    }

    /// Sets the prefixes written at the start of successive lines.
    ///
    /// The first line gets the first prefix, the second line the second, and
    /// so on; once the list is exhausted the last prefix repeats until
    /// [`reset_prefix`](Self::reset_prefix).
    pub fn set_prefix<I, S>(&mut self, prefixes: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes = prefixes.into_iter().map(Into::into).collect();
        self.prefix_cursor = 0;
        self.reset_prefix_after_line = false;
        self
    }

    /// Removes the prefixes. If a line is in progress, it keeps its prefix
    /// and the reset applies from the next line on.
    pub fn reset_prefix(&mut self) -> &mut Self {
        if self.pending.is_empty() {
            self.prefixes.clear();
            self.prefix_cursor = 0;
        } else {
            self.reset_prefix_after_line = true;
        }
        self
    }

    pub fn align_left(&mut self) -> &mut Self {
        self.align = Align::Left;
        self
    }

    pub fn align_right(&mut self) -> &mut Self {
        self.align = Align::Right;
        self
    }

    pub fn align_center(&mut self) -> &mut Self {
        self.align = Align::Center;
        self
    }

    /// Pads every line with trailing spaces up to the maximum width.
    pub fn pad_left(&mut self) -> &mut Self {
        self.pad = true;
        self
    }

    pub fn set_pad(&mut self, pad: bool) -> &mut Self {
        self.pad = pad;
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Returns the sink. Any pending partial line is discarded.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Bytes buffered for the line in progress.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    fn indent_string(&self) -> String {
        self.indent_pattern.repeat(self.indent_level)
    }

    fn current_prefix(&self) -> &str {
        match self.prefixes.len() {
            0 => "",
            n => &self.prefixes[self.prefix_cursor.min(n - 1)],
        }
    }

    /// Width available to the text of the next line.
    fn line_width(&self) -> usize {
        if self.max_width == 0 {
            return 0;
        }
        let indent = width(&self.indent_string());
        let margin = if self.block_indent { indent } else { 0 };
        self.max_width
            .saturating_sub(indent + margin + width(self.current_prefix()))
            .max(1)
    }

    /// Length of the longest valid UTF-8 prefix of the pending buffer.
    fn valid_len(&self) -> usize {
        match std::str::from_utf8(&self.pending) {
            Ok(s) => s.len(),
            Err(e) => e.valid_up_to(),
        }
    }

    /// Replaces invalid byte sequences with U+FFFD, leaving an incomplete
    /// sequence at the end alone.
    fn repair_utf8(&mut self) {
        while let Err(e) = std::str::from_utf8(&self.pending) {
            let Some(len) = e.error_len() else {
                return;
            };
            let at = e.valid_up_to();
            self.pending
                .splice(at..at + len, char::REPLACEMENT_CHARACTER.to_string().bytes());
        }
    }

    fn strip_leading_blanks(&mut self) {
        let valid = self.valid_len();
        let Ok(text) = std::str::from_utf8(&self.pending[..valid]) else {
            return;
        };
        let (trimmed, reached_text) = trim_continuation(text);
        let mut rebuilt = trimmed.into_bytes();
        rebuilt.extend_from_slice(&self.pending[valid..]);
        self.pending = rebuilt;
        if reached_text {
            self.strip_leading = false;
        }
    }

    /// Writes out every complete line in the pending buffer.
    fn drain(&mut self) -> io::Result<()> {
        loop {
            if self.strip_leading {
                self.strip_leading_blanks();
            }
            let valid = self.valid_len();
            let Ok(text) = std::str::from_utf8(&self.pending[..valid]) else {
                return Ok(());
            };
            let cutter = Cutter::new(self.line_width()).lazy(self.lazy);
            let Some((line, _)) = cutter.split(text) else {
                return Ok(());
            };
            let line = line.to_string();
            let at_newline = line.contains('\n');

            self.emit(&line, true)?;
            self.pending.drain(..line.len());
            self.strip_leading = !at_newline;
            self.line_done();
        }
    }

    /// Writes whatever is pending as a final line without a newline.
    fn finish_line(&mut self) -> io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let text = String::from_utf8_lossy(&self.pending).into_owned();
        let has_text = walk(&text).any(|(_, e)| matches!(e, Event::Rune { .. }));
        if has_text {
            self.emit(&text, false)?;
            self.line_done();
        } else {
            // Only escapes left: pass them through so styling gets closed.
            self.out.write_all(text.as_bytes())?;
            self.renditions.combine_all(&text);
        }
        self.pending.clear();
        self.strip_leading = false;
        Ok(())
    }

    fn line_done(&mut self) {
        self.prefix_cursor = self.prefix_cursor.saturating_add(1);
        if self.reset_prefix_after_line {
            self.prefixes.clear();
            self.prefix_cursor = 0;
            self.reset_prefix_after_line = false;
        }
    }

    /// Formats one line and hands it to the sink. State is only updated once
    /// the sink accepted the bytes.
    fn emit(&mut self, line: &str, terminated: bool) -> io::Result<()> {
        let body = match line.find('\n') {
            Some(p) => format!("{}{}", &line[..p], &line[p + 1..]),
            None => line.to_string(),
        };
        let body = trim_trailing_space(&body);
        let body_width = width(&body);

        let indent = self.indent_string();
        let prefix = self.current_prefix();
        let free = if self.max_width == 0 {
            0
        } else {
            self.line_width().saturating_sub(body_width)
        };
        let lead = match self.align {
            Align::Left => 0,
            Align::Right => free,
            Align::Center => free / 2,
        };

        let mut state = self.renditions.clone();
        let mut out = String::with_capacity(indent.len() + prefix.len() + body.len() + lead + 16);
        out.push_str(&indent);
        out.push_str(prefix);
        out.push_str(&" ".repeat(lead));
        out.push_str(&state.esc());
        out.push_str(&body);
        state.combine_all(&body);
        if terminated {
            out.push_str(state.off());
        }
        if self.pad && self.max_width > 0 {
            let used = width(&indent) + width(prefix) + lead + body_width;
            out.push_str(&" ".repeat(self.max_width.saturating_sub(used)));
        }
        if terminated {
            out.push('\n');
        }

        self.out.write_all(out.as_bytes())?;
        self.renditions = state;
        Ok(())
    }
}

impl<W: Write> Write for TextWriter<W> {
    /// Buffers `buf` and writes out every line it completes.
    ///
    /// `buf` is always taken in full. When the sink fails, the lines stay
    /// buffered and the error is reported by the next `flush`.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        self.repair_utf8();
        if let Err(err) = self.drain() {
            tracing::debug!(
                %err,
                pending = self.pending.len(),
                "sink failed, keeping lines buffered"
            );
        }
        Ok(buf.len())
    }

    /// Writes every pending line, including a final line without newline,
    /// then flushes the sink.
    fn flush(&mut self) -> io::Result<()> {
        self.drain()?;
        self.finish_line()?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(max_width: usize, setup: impl FnOnce(&mut TextWriter<Vec<u8>>), input: &str) -> String {
        let mut w = TextWriter::with_width(Vec::new(), max_width);
        setup(&mut w);
        w.write_all(input.as_bytes()).unwrap();
        w.flush().unwrap();
        String::from_utf8(w.into_inner()).unwrap()
    }

    /// A sink failing on its first write.
    struct Flaky {
        fail: bool,
        data: Vec<u8>,
    }

    impl Write for Flaky {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.fail {
                self.fail = false;
                return Err(io::Error::other("sink unavailable"));
            }
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    // --- wrapping ---

    #[test]
    fn wraps_at_word_boundaries() {
        assert_eq!(
            render(10, |_| {}, "This is a long sentence"),
            "This is a\nlong\nsentence"
        );
    }

    #[test]
    fn blank_overflow_before_newline_adds_no_line() {
        assert_eq!(render(5, |_| {}, "hello \nworld"), "hello\nworld");
    }

    #[test]
    fn blank_overflow_split_across_writes() {
        let mut w = TextWriter::with_width(Vec::new(), 5);
        for chunk in ["hello ", " ", "\nworld\n"] {
            w.write_all(chunk.as_bytes()).unwrap();
        }
        w.flush().unwrap();
        assert_eq!(String::from_utf8(w.into_inner()).unwrap(), "hello\nworld\n");
    }

    #[test]
    fn unbounded_only_breaks_on_newlines() {
        let mut w = TextWriter::unbounded(Vec::new());
        w.write_all(b"a rather long line that is never wrapped\nnext").unwrap();
        w.flush().unwrap();
        assert_eq!(
            String::from_utf8(w.into_inner()).unwrap(),
            "a rather long line that is never wrapped\nnext"
        );
    }

    #[test]
    fn chunked_writes_produce_same_output() {
        let mut w = TextWriter::with_width(Vec::new(), 10);
        for chunk in ["This is", " a lo", "ng sen", "tence"] {
            w.write_all(chunk.as_bytes()).unwrap();
        }
        w.flush().unwrap();
        assert_eq!(
            String::from_utf8(w.into_inner()).unwrap(),
            "This is a\nlong\nsentence"
        );
    }

    #[test]
    fn strict_wrap_chunks_long_words() {
        assert_eq!(render(4, |_| {}, "abcdefghij"), "abcd\nefgh\nij");
    }

    #[test]
    fn lazy_wrap_lets_long_words_overflow() {
        assert_eq!(
            render(4, |w| {
                w.lazy_wrap();
            }, "abcdefghij kl"),
            "abcdefghij\nkl"
        );
    }

    #[test]
    fn continuation_lines_lose_leading_blanks() {
        assert_eq!(render(5, |_| {}, "hello     world"), "hello\nworld");
    }

    #[test]
    fn newlines_keep_leading_blanks() {
        assert_eq!(render(0, |_| {}, "a\n  b"), "a\n  b");
    }

    #[test]
    fn utf8_split_across_writes() {
        let bytes = "日本".as_bytes();
        let mut w = TextWriter::unbounded(Vec::new());
        w.write_all(&bytes[..2]).unwrap();
        w.write_all(&bytes[2..]).unwrap();
        w.flush().unwrap();
        assert_eq!(String::from_utf8(w.into_inner()).unwrap(), "日本");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut w = TextWriter::unbounded(Vec::new());
        w.write_all(b"a\xffb\n").unwrap();
        w.flush().unwrap();
        assert_eq!(String::from_utf8(w.into_inner()).unwrap(), "a\u{fffd}b\n");
    }

    // --- indent / prefix ---

    #[test]
    fn indent_reduces_width() {
        assert_eq!(
            render(10, |w| {
                w.indent();
            }, "aaa bbb ccc\n"),
            "  aaa bbb\n  ccc\n"
        );
    }

    #[test]
    fn unindent_saturates() {
        assert_eq!(
            render(0, |w| {
                w.indent_with("\t").indent().unindent().unindent();
            }, "x\n"),
            "x\n"
        );
    }

    #[test]
    fn block_indent_adds_right_margin() {
        assert_eq!(
            render(10, |w| {
                w.indent().block_indent();
            }, "aaa bbb ccc"),
            "  aaa\n  bbb\n  ccc"
        );
    }

    #[test]
    fn prefixes_cycle_and_stick_on_last() {
        assert_eq!(
            render(0, |w| {
                w.set_prefix(["> ", ". "]);
            }, "a\nb\nc\n"),
            "> a\n. b\n. c\n"
        );
    }

    #[test]
    fn prefix_width_reduces_line_width() {
        assert_eq!(
            render(6, |w| {
                w.set_prefix(["# "]);
            }, "ab cd ef"),
            "# ab\n# cd\n# ef"
        );
    }

    #[test]
    fn reset_prefix_is_deferred_while_line_pending() {
        let mut w = TextWriter::unbounded(Vec::new());
        w.set_prefix(["# "]);
        w.write_all(b"abc").unwrap();
        w.reset_prefix();
        w.write_all(b"\nnext\n").unwrap();
        w.flush().unwrap();
        assert_eq!(String::from_utf8(w.into_inner()).unwrap(), "# abc\nnext\n");
    }

    #[test]
    fn reset_prefix_applies_immediately_when_idle() {
        let mut w = TextWriter::unbounded(Vec::new());
        w.set_prefix(["# "]);
        w.reset_prefix();
        w.write_all(b"abc\n").unwrap();
        w.flush().unwrap();
        assert_eq!(String::from_utf8(w.into_inner()).unwrap(), "abc\n");
    }

    // --- alignment / padding ---

    #[test]
    fn align_right_and_center() {
        assert_eq!(
            render(10, |w| {
                w.align_right();
            }, "abc\n"),
            "       abc\n"
        );
        assert_eq!(
            render(10, |w| {
                w.align_center();
            }, "abc\n"),
            "   abc\n"
        );
    }

    #[test]
    fn align_margin_stays_unstyled() {
        assert_eq!(
            render(10, |w| {
                w.align_right();
            }, "\x1b[41mab\ncd\x1b[0m\n"),
            "        \x1b[41mab\x1b[0m\n        \x1b[41mcd\x1b[0m\n"
        );
    }

    #[test]
    fn align_ignores_trailing_spaces() {
        assert_eq!(
            render(6, |w| {
                w.align_right();
            }, "ab   \n"),
            "    ab\n"
        );
    }

    #[test]
    fn pad_fills_to_max_width() {
        assert_eq!(
            render(6, |w| {
                w.pad_left();
            }, "ab\ncd\n"),
            "ab    \ncd    \n"
        );
    }

    #[test]
    fn pad_counts_block_margin() {
        assert_eq!(
            render(8, |w| {
                w.indent().block_indent().pad_left();
            }, "ab\n"),
            "  ab    \n"
        );
    }

    // --- styling ---

    #[test]
    fn styling_is_interrupted_at_line_breaks() {
        assert_eq!(
            render(5, |_| {}, "\x1b[31mhello world\x1b[0m\n"),
            "\x1b[31mhello\x1b[0m\n\x1b[31mworld\x1b[0m\n"
        );
    }

    #[test]
    fn styling_reentered_after_prefix() {
        assert_eq!(
            render(0, |w| {
                w.set_prefix(["| "]);
            }, "\x1b[1ma\nb\x1b[0m\n"),
            "| \x1b[1ma\x1b[0m\n| \x1b[1mb\x1b[0m\n"
        );
    }

    #[test]
    fn escape_after_newline_stays_on_its_line() {
        assert_eq!(render(0, |_| {}, "\x1b[1ma\n\x1b[0m"), "\x1b[1ma\x1b[0m\n");
    }

    #[test]
    fn escape_only_pending_flushes_verbatim() {
        let mut w = TextWriter::unbounded(Vec::new());
        w.write_all(b"\x1b[0m").unwrap();
        w.flush().unwrap();
        assert_eq!(String::from_utf8(w.into_inner()).unwrap(), "\x1b[0m");
    }

    // --- errors ---

    #[test]
    fn io_error_keeps_pending_line() {
        let mut w = TextWriter::unbounded(Flaky {
            fail: true,
            data: Vec::new(),
        });
        assert_eq!(w.write(b"abc\n").unwrap(), 4);
        assert_eq!(w.pending(), b"abc\n");
        w.flush().unwrap();
        assert_eq!(w.get_ref().data, b"abc\n");
    }

    #[test]
    fn io_error_then_write_all_does_not_duplicate() {
        let mut w = TextWriter::unbounded(Flaky {
            fail: true,
            data: Vec::new(),
        });
        w.write_all(b"abc\ndef\n").unwrap();
        w.flush().unwrap();
        assert_eq!(w.get_ref().data, b"abc\ndef\n");
    }

    #[test]
    fn flush_reports_persistent_sink_error() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut w = TextWriter::unbounded(Broken);
        w.write_all(b"abc\n").unwrap();
        assert!(w.flush().is_err());
        assert_eq!(w.pending(), b"abc\n");
    }
}
