//! Property-based tests for the text engine using proptest.

use std::io::Write;

use proptest::prelude::*;
use quill_text::sgr::Renditions;
use quill_text::{
    pad_center, pad_left, pad_right, strip_escapes, truncate, width, Cutter, Grid, Table,
    TextWriter,
};

// ============================================================================
// Strategies
// ============================================================================

/// Text mixing plain words, wide and combining characters and SGR escapes.
fn styled_text() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        4 => "[a-z]{1,6}",
        2 => Just(" ".to_string()),
        1 => Just("\n".to_string()),
        1 => Just("日本".to_string()),
        1 => Just("e\u{301}".to_string()),
        1 => Just("\x1b[31m".to_string()),
        1 => Just("\x1b[1;4m".to_string()),
        1 => Just("\x1b[38;5;196m".to_string()),
        1 => Just("\x1b[0m".to_string()),
        1 => Just("\x1b[2K".to_string()),
    ];
    prop::collection::vec(piece, 0..24).prop_map(|pieces| pieces.concat())
}

fn sgr_escape() -> impl Strategy<Value = String> {
    let code = prop_oneof![
        Just("0"),
        Just("1"),
        Just("2"),
        Just("4"),
        Just("7"),
        Just("21"),
        Just("22"),
        Just("24"),
        Just("31"),
        Just("32"),
        Just("39"),
        Just("42"),
        Just("38;5;10"),
        Just("48;2;1;2;3"),
    ];
    prop::collection::vec(code, 0..4).prop_map(|codes| format!("\x1b[{}m", codes.join(";")))
}

fn words() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,12}", 1..6).prop_map(|w| w.join(" "))
}

fn non_blank(s: &str) -> String {
    strip_escapes(s).chars().filter(|c| !c.is_whitespace()).collect()
}

// ============================================================================
// Width primitives
// ============================================================================

proptest! {
    #[test]
    fn width_ignores_escapes(s in styled_text()) {
        prop_assert_eq!(width(&s), width(&strip_escapes(&s)));
    }

    #[test]
    fn width_is_additive(a in styled_text(), b in styled_text()) {
        prop_assert_eq!(width(&format!("{a}{b}")), width(&a) + width(&b));
    }

    #[test]
    fn truncate_never_exceeds_limit(s in styled_text(), n in 0usize..30) {
        prop_assert!(width(&truncate(&s, n)) <= n);
    }

    #[test]
    fn pad_reaches_exact_width(s in "[a-z 日]{0,10}", extra in 0usize..10) {
        let n = width(&s) + extra;
        prop_assert_eq!(width(&pad_left(&s, n)), n);
        prop_assert_eq!(width(&pad_right(&s, n)), n);
        prop_assert_eq!(width(&pad_center(&s, n)), n);
    }
}

// ============================================================================
// SGR state
// ============================================================================

proptest! {
    #[test]
    fn combine_is_idempotent(
        start in prop::collection::vec(sgr_escape(), 0..4),
        esc in sgr_escape(),
    ) {
        let mut once = Renditions::from_escapes(&start.concat());
        once.combine(&esc);
        let mut twice = once.clone();
        twice.combine(&esc);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn renditions_never_hold_resets_or_offs(escapes in prop::collection::vec(sgr_escape(), 0..6)) {
        let r = Renditions::from_escapes(&escapes.concat());
        for code in r.codes() {
            prop_assert!(!matches!(code.as_str(), "0" | "21" | "22" | "24"));
        }
    }
}

// ============================================================================
// Cutter
// ============================================================================

proptest! {
    #[test]
    fn cuts_partition_input(s in styled_text(), n in 0usize..20, lazy in any::<bool>()) {
        let cutter = Cutter::new(n).lazy(lazy);
        let joined: String = cutter.cuts(&s).collect();
        prop_assert_eq!(joined, s);
    }

    #[test]
    fn strict_cuts_fit_width(s in styled_text(), n in 2usize..20) {
        let cutter = Cutter::new(n);
        for line in cutter.cuts(&s) {
            let visible = line.trim_end_matches('\n');
            prop_assert!(width(visible) <= n, "{:?} wider than {}", line, n);
        }
    }

    #[test]
    fn wrap_keeps_every_word(s in styled_text(), n in 1usize..20) {
        let lines = Cutter::new(n).wrap(&s);
        prop_assert_eq!(non_blank(&lines.concat()), non_blank(&s));
    }
}

// ============================================================================
// Writer
// ============================================================================

proptest! {
    #[test]
    fn writer_flush_emits_every_rune_once(
        chunks in prop::collection::vec(styled_text(), 0..5),
        max_width in 0usize..30,
        indent in 0usize..3,
    ) {
        let mut w = TextWriter::with_width(Vec::new(), max_width);
        for _ in 0..indent {
            w.indent();
        }
        for chunk in &chunks {
            w.write_all(chunk.as_bytes()).unwrap();
        }
        w.flush().unwrap();
        let out = String::from_utf8(w.into_inner()).unwrap();
        prop_assert_eq!(non_blank(&out), non_blank(&chunks.concat()));
    }
}

// ============================================================================
// Table
// ============================================================================

proptest! {
    #[test]
    fn table_lines_fit_max_width(
        rows in prop::collection::vec(prop::collection::vec(words(), 1..4), 1..4),
        extra in 0usize..60,
    ) {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(1);
        let max_width = columns * 4 + extra;
        let table = Table::new().max_width(max_width).grid(Grid::ascii()).rows(rows);
        for line in table.render().lines() {
            prop_assert!(width(line) <= max_width, "{:?} wider than {}", line, max_width);
        }
    }
}
