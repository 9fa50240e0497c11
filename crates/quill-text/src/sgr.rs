//! SGR (Select Graphic Rendition) state tracking.
//!
//! Styled terminal text carries its formatting in-band as CSI escape
//! sequences ending in `m`. This module parses those sequences into
//! individual [`Code`]s and folds them into a [`Renditions`] value: the
//! cumulative set of codes active at a given point of a string.
//!
//! A `Renditions` value follows a few rules:
//!
//! - it never contains a reset, nor a style-off code (an off code only removes
//!   the codes it cancels);
//! - it holds at most one foreground and one background colour;
//! - adding a code drops every code the new one supersedes.
//!
//! ```rust
//! use quill_text::sgr::Renditions;
//!
//! let mut r = Renditions::new();
//! r.combine("\x1b[31m");
//! r.combine("\x1b[32m");
//! assert_eq!(r.esc(), "\x1b[32m");
//! assert_eq!(r.off(), "\x1b[0m");
//! ```

use std::fmt;

use crate::error::{Result, TextError};
use crate::walk::{walk, Event};

/// Control Sequence Introducer, the 7-bit form.
pub const CSI: &str = "\x1b[";

/// The 8-bit Control Sequence Introducer. Recognised on input, never emitted.
pub const CSI_8BIT: char = '\u{9b}';

/// Full attribute reset.
pub const RESET: &str = "\x1b[0m";

/// Named SGR codes.
pub mod codes {
    pub const RESET: &str = "0";
    pub const BOLD: &str = "1";
    pub const FAINT: &str = "2";
    pub const ITALIC: &str = "3";
    pub const UNDERLINE: &str = "4";
    pub const SLOW_BLINK: &str = "5";
    pub const RAPID_BLINK: &str = "6";
    pub const INVERSE: &str = "7";
    pub const CONCEAL: &str = "8";
    pub const CROSSED_OUT: &str = "9";
    pub const BOLD_OFF: &str = "21";
    /// Neither bold nor faint.
    pub const NORMAL: &str = "22";
    pub const ITALIC_OFF: &str = "23";
    pub const UNDERLINE_OFF: &str = "24";
    pub const BLINK_OFF: &str = "25";
    pub const INVERSE_OFF: &str = "27";
    pub const REVEAL: &str = "28";
    pub const NOT_CROSSED_OUT: &str = "29";

    pub const BLACK: &str = "30";
    pub const RED: &str = "31";
    pub const GREEN: &str = "32";
    pub const YELLOW: &str = "33";
    pub const BLUE: &str = "34";
    pub const MAGENTA: &str = "35";
    pub const CYAN: &str = "36";
    pub const WHITE: &str = "37";
    pub const DEFAULT_FG: &str = "39";

    pub const BG_BLACK: &str = "40";
    pub const BG_RED: &str = "41";
    pub const BG_GREEN: &str = "42";
    pub const BG_YELLOW: &str = "43";
    pub const BG_BLUE: &str = "44";
    pub const BG_MAGENTA: &str = "45";
    pub const BG_CYAN: &str = "46";
    pub const BG_WHITE: &str = "47";
    pub const DEFAULT_BG: &str = "49";

    pub const FRAMED: &str = "51";
    pub const ENCIRCLED: &str = "52";
    pub const OVERLINED: &str = "53";
    pub const NOT_FRAMED: &str = "54";
    pub const NOT_OVERLINED: &str = "55";

    pub const BRIGHT_BLACK: &str = "90";
    pub const BRIGHT_RED: &str = "91";
    pub const BRIGHT_GREEN: &str = "92";
    pub const BRIGHT_YELLOW: &str = "93";
    pub const BRIGHT_BLUE: &str = "94";
    pub const BRIGHT_MAGENTA: &str = "95";
    pub const BRIGHT_CYAN: &str = "96";
    pub const BRIGHT_WHITE: &str = "97";

    pub const BG_BRIGHT_BLACK: &str = "100";
    pub const BG_BRIGHT_RED: &str = "101";
    pub const BG_BRIGHT_GREEN: &str = "102";
    pub const BG_BRIGHT_YELLOW: &str = "103";
    pub const BG_BRIGHT_BLUE: &str = "104";
    pub const BG_BRIGHT_MAGENTA: &str = "105";
    pub const BG_BRIGHT_CYAN: &str = "106";
    pub const BG_BRIGHT_WHITE: &str = "107";
}

/// A style attribute that can be switched on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attr {
    Bold,
    Faint,
    Italic,
    Underline,
    SlowBlink,
    RapidBlink,
    Inverse,
    Conceal,
    CrossedOut,
    Framed,
    Encircled,
    Overlined,
}

/// A style-off code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Off {
    Bold,
    /// Turns off both bold and faint.
    Normal,
    Italic,
    Underline,
    Blink,
    Inverse,
    Reveal,
    CrossedOut,
    /// Turns off both framed and encircled.
    Framed,
    Overlined,
}

impl Off {
    /// Whether this off code cancels `attr`.
    pub fn cancels(self, attr: Attr) -> bool {
        matches!(
            (self, attr),
            (Off::Bold, Attr::Bold)
                | (Off::Normal, Attr::Bold | Attr::Faint)
                | (Off::Italic, Attr::Italic)
                | (Off::Underline, Attr::Underline)
                | (Off::Blink, Attr::SlowBlink | Attr::RapidBlink)
                | (Off::Inverse, Attr::Inverse)
                | (Off::Reveal, Attr::Conceal)
                | (Off::CrossedOut, Attr::CrossedOut)
                | (Off::Framed, Attr::Framed | Attr::Encircled)
                | (Off::Overlined, Attr::Overlined)
        )
    }
}

/// Classification of a [`Code`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CodeKind {
    Reset,
    Foreground,
    Background,
    On(Attr),
    Off(Off),
    /// Anything else (double underline, fonts, ...). Kept as-is.
    Other,
}

/// A single SGR code, such as `"1"`, `"31"` or the composite `"38;5;208"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Code(String);

impl Code {
    /// Creates a code, validating its structure.
    ///
    /// Accepts a single numeric field, or an extended colour of the form
    /// `38;5;N`, `48;5;N`, `38;2;R;G;B` or `48;2;R;G;B`. The empty string is
    /// a reset.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::MalformedCode`] for anything else.
    ///
    /// ```rust
    /// use quill_text::sgr::Code;
    ///
    /// assert!(Code::new("38;2;255;0;0").is_ok());
    /// assert!(Code::new("38;5").is_err());
    /// assert!(Code::new("bold").is_err());
    /// ```
    pub fn new(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        if code.is_empty() {
            return Ok(Code(code));
        }
        let fields: Vec<&str> = code.split(';').collect();
        let numeric = fields
            .iter()
            .all(|f| !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()));
        let well_formed = numeric
            && match fields.as_slice() {
                [_] => true,
                ["38" | "48", "5", _] => true,
                ["38" | "48", "2", _, _, _] => true,
                _ => false,
            };
        if well_formed {
            Ok(Code(code))
        } else {
            Err(TextError::MalformedCode(code))
        }
    }

    /// Wraps a code extracted from a parsed sequence without validation.
    pub(crate) fn raw(code: &str) -> Self {
        Code(code.to_string())
    }

    pub(crate) fn reset() -> Self {
        Code(codes::RESET.to_string())
    }

    /// The code text, without the CSI introducer or final `m`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classifies this code.
    pub fn kind(&self) -> CodeKind {
        let mut fields = self.0.split(';');
        let first = fields.next().unwrap_or("");
        if first.is_empty() {
            return CodeKind::Reset;
        }
        let Ok(n) = first.parse::<u16>() else {
            return CodeKind::Other;
        };
        if fields.next().is_some() {
            return match n {
                38 => CodeKind::Foreground,
                48 => CodeKind::Background,
                _ => CodeKind::Other,
            };
        }
        match n {
            0 => CodeKind::Reset,
            1 => CodeKind::On(Attr::Bold),
            2 => CodeKind::On(Attr::Faint),
            3 => CodeKind::On(Attr::Italic),
            4 => CodeKind::On(Attr::Underline),
            5 => CodeKind::On(Attr::SlowBlink),
            6 => CodeKind::On(Attr::RapidBlink),
            7 => CodeKind::On(Attr::Inverse),
            8 => CodeKind::On(Attr::Conceal),
            9 => CodeKind::On(Attr::CrossedOut),
            21 => CodeKind::Off(Off::Bold),
            22 => CodeKind::Off(Off::Normal),
            23 => CodeKind::Off(Off::Italic),
            24 => CodeKind::Off(Off::Underline),
            25 => CodeKind::Off(Off::Blink),
            27 => CodeKind::Off(Off::Inverse),
            28 => CodeKind::Off(Off::Reveal),
            29 => CodeKind::Off(Off::CrossedOut),
            30..=37 | 39 | 90..=97 => CodeKind::Foreground,
            40..=47 | 49 | 100..=107 => CodeKind::Background,
            51 => CodeKind::On(Attr::Framed),
            52 => CodeKind::On(Attr::Encircled),
            53 => CodeKind::On(Attr::Overlined),
            54 => CodeKind::Off(Off::Framed),
            55 => CodeKind::Off(Off::Overlined),
            _ => CodeKind::Other,
        }
    }

    /// Whether adding `self` removes a previously active `other`.
    pub fn supersedes(&self, other: &Code) -> bool {
        if self == other {
            return true;
        }
        match (self.kind(), other.kind()) {
            (CodeKind::Reset, _) => true,
            (CodeKind::Foreground, CodeKind::Foreground) => true,
            (CodeKind::Background, CodeKind::Background) => true,
            (CodeKind::Off(off), CodeKind::On(attr)) => off.cancels(attr),
            _ => false,
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns the parameter body of an SGR sequence, or `None` if `seq` is not
/// an SGR sequence.
fn sgr_body(seq: &str) -> Option<&str> {
    let rest = seq
        .strip_prefix(CSI)
        .or_else(|| seq.strip_prefix(CSI_8BIT))?;
    let body = rest.strip_suffix('m')?;
    body.bytes()
        .all(|b| b.is_ascii_digit() || b == b';')
        .then_some(body)
}

/// Whether `seq` is an SGR escape sequence.
pub fn is_sgr(seq: &str) -> bool {
    sgr_body(seq).is_some()
}

/// Splits an SGR escape sequence into its codes.
///
/// Non-SGR sequences yield no codes. An empty body (`ESC[m`) and every empty
/// field are resets. Extended colours (`38;5;N`, `38;2;R;G;B` and their `48`
/// counterparts) are kept together as one composite code.
///
/// ```rust
/// use quill_text::sgr::parse_sgr;
///
/// let codes: Vec<String> = parse_sgr("\x1b[1;38;5;208m")
///     .iter()
///     .map(|c| c.to_string())
///     .collect();
/// assert_eq!(codes, vec!["1", "38;5;208"]);
/// ```
pub fn parse_sgr(seq: &str) -> Vec<Code> {
    let Some(body) = sgr_body(seq) else {
        return Vec::new();
    };
    if body.is_empty() {
        return vec![Code::reset()];
    }

    let fields: Vec<&str> = body.split(';').collect();
    let mut codes = Vec::with_capacity(fields.len());
    let mut i = 0;
    while i < fields.len() {
        let field = fields[i];
        if field.is_empty() {
            codes.push(Code::reset());
            i += 1;
            continue;
        }
        if field == "38" || field == "48" {
            let arity = match fields.get(i + 1) {
                Some(&"5") => 3,
                Some(&"2") => 5,
                _ => 1,
            };
            if arity > 1 && i + arity <= fields.len() {
                codes.push(Code::raw(&fields[i..i + arity].join(";")));
                i += arity;
                continue;
            }
        }
        codes.push(Code::raw(field));
        i += 1;
    }
    codes
}

/// Builds an SGR sequence from codes, validating each.
///
/// # Errors
///
/// Returns [`TextError::MalformedCode`] if any code is malformed.
///
/// ```rust
/// use quill_text::sgr::{codes, sequence};
///
/// assert_eq!(sequence(&[codes::BOLD, codes::RED]).unwrap(), "\x1b[1;31m");
/// assert!(sequence(&["1;"]).is_err());
/// ```
pub fn sequence(codes: &[&str]) -> Result<String> {
    let validated = codes
        .iter()
        .map(|c| Code::new(*c))
        .collect::<Result<Vec<_>>>()?;
    Ok(join_codes(validated.iter()))
}

fn join_codes<'a>(codes: impl Iterator<Item = &'a Code>) -> String {
    let body: Vec<&str> = codes.map(Code::as_str).collect();
    if body.is_empty() {
        return String::new();
    }
    format!("{}{}m", CSI, body.join(";"))
}

/// The cumulative set of active SGR codes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Renditions {
    codes: Vec<Code>,
}

impl Renditions {
    /// Creates an empty renditions value (no styling active).
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the state after every escape in `s` has been applied.
    pub fn from_escapes(s: &str) -> Self {
        let mut r = Self::new();
        r.combine_all(s);
        r
    }

    /// Applies either a full escape sequence or a single, already tokenised
    /// code.
    pub fn combine(&mut self, s: &str) {
        if s.starts_with('\x1b') || s.starts_with(CSI_8BIT) {
            for code in parse_sgr(s) {
                self.combine_code(code);
            }
        } else {
            self.combine_code(Code::raw(s));
        }
    }

    /// Applies every escape sequence found in `s`, ignoring the text.
    pub fn combine_all(&mut self, s: &str) {
        for (_, event) in walk(s) {
            if let Event::Escape(seq) = event {
                self.combine(seq);
            }
        }
    }

    /// Applies one code.
    ///
    /// A reset empties the state. Any other code removes what it supersedes
    /// and, unless it is a style-off code, is appended.
    pub fn combine_code(&mut self, code: Code) {
        let kind = code.kind();
        if kind == CodeKind::Reset {
            self.codes.clear();
            return;
        }
        self.codes.retain(|c| !code.supersedes(c));
        if !matches!(kind, CodeKind::Off(_)) {
            self.codes.push(code);
        }
    }

    /// Active codes, in order.
    pub fn codes(&self) -> &[Code] {
        &self.codes
    }

    /// Whether `code` is currently active.
    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c.as_str() == code)
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// The sequence that re-enters this state, or `""` when nothing is active.
    pub fn esc(&self) -> String {
        join_codes(self.codes.iter())
    }

    /// A reset when anything is active, `""` otherwise.
    pub fn off(&self) -> &'static str {
        if self.codes.is_empty() {
            ""
        } else {
            RESET
        }
    }

    /// The shortest single sequence moving the terminal from `before` to
    /// `after`.
    ///
    /// ```rust
    /// use quill_text::sgr::Renditions;
    ///
    /// let red = Renditions::from_escapes("\x1b[31m");
    /// let red_bold = Renditions::from_escapes("\x1b[31;1m");
    /// assert_eq!(Renditions::transition(&red, &red_bold), "\x1b[1m");
    /// assert_eq!(Renditions::transition(&red_bold, &red), "\x1b[0;31m");
    /// assert_eq!(Renditions::transition(&red, &Renditions::new()), "\x1b[0m");
    /// ```
    pub fn transition(before: &Renditions, after: &Renditions) -> String {
        if before == after {
            return String::new();
        }
        if after.is_empty() {
            return RESET.to_string();
        }
        if before.codes.iter().all(|c| after.codes.contains(c)) {
            return join_codes(after.codes.iter().filter(|c| !before.codes.contains(c)));
        }
        let mut codes = vec![Code::reset()];
        codes.extend(after.codes.iter().cloned());
        join_codes(codes.iter())
    }
}

impl fmt::Display for Renditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.esc())
    }
}

/// Collapses a run of escape sequences into one equivalent sequence.
///
/// The result has the same effect as emitting every sequence in order,
/// whatever the state before it: codes superseded later in the run are
/// dropped, while resets and style-off codes are kept since they still act on
/// the prior state. Non-SGR sequences are kept verbatim, ahead of the SGR
/// part.
pub(crate) fn squash<'a>(seqs: impl IntoIterator<Item = &'a str>) -> String {
    let mut verbatim = String::new();
    let mut merged: Vec<Code> = Vec::new();
    for seq in seqs {
        if !is_sgr(seq) {
            verbatim.push_str(seq);
            continue;
        }
        for code in parse_sgr(seq) {
            if code.kind() == CodeKind::Reset {
                merged.clear();
            } else {
                merged.retain(|c| !code.supersedes(c));
            }
            merged.push(code);
        }
    }
    verbatim.push_str(&join_codes(merged.iter()));
    verbatim
}

/// Closes styling at every line end and re-opens it on the next line.
///
/// Whenever a `\n` is reached with styling active, a reset is emitted before
/// it and the active state is re-entered before the next line's content.
/// Styling still active at the end of the input is closed as well, so the
/// result can be placed next to other text without bleeding into it.
///
/// ```rust
/// use quill_text::sgr::interrupt_formatting_at_eol;
///
/// assert_eq!(
///     interrupt_formatting_at_eol("\x1b[31mred\nstill red"),
///     "\x1b[31mred\x1b[0m\n\x1b[31mstill red\x1b[0m",
/// );
/// ```
pub fn interrupt_formatting_at_eol(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut state = Renditions::new();
    let mut reenter = false;

    for (_, event) in walk(s) {
        match event {
            Event::Rune { rune: '\n', .. } => {
                if !reenter && !state.is_empty() {
                    out.push_str(RESET);
                }
                out.push('\n');
                reenter = !state.is_empty();
            }
            event => {
                if reenter {
                    out.push_str(&state.esc());
                    reenter = false;
                }
                match event {
                    Event::Escape(seq) => {
                        out.push_str(seq);
                        state.combine(seq);
                    }
                    Event::Rune { rune, .. } => out.push(rune),
                }
            }
        }
    }

    if !reenter && !state.is_empty() {
        out.push_str(RESET);
    }
    out
}
