//! Splitting text into diff tokens.
//!
//! The tokenisers go from coarse to fine: lines, words, runes. Adaptive
//! refinement runs them in that order, re-diffing each changed region with
//! the next, finer tokeniser.

/// How text is split into tokens before diffing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Tokenizer {
    /// One token per line, newline included. Concatenating the tokens gives
    /// back the input.
    #[default]
    Lines,
    /// Like `Lines`, but a newline is added to a last line lacking one, so
    /// every token ends the same way. The right side of a diff then no longer
    /// reconstructs the input byte for byte.
    LinesWithEol,
    /// Maximal runs of letters, with every other rune as its own token.
    Words,
    /// One token per code point.
    Runes,
}

impl Tokenizer {
    /// Splits `text` into tokens.
    ///
    /// ```rust
    /// use quill_diff::Tokenizer;
    ///
    /// assert_eq!(Tokenizer::Lines.split("a\nb"), vec!["a\n", "b"]);
    /// assert_eq!(Tokenizer::LinesWithEol.split("a\nb"), vec!["a\n", "b\n"]);
    /// assert_eq!(Tokenizer::Words.split("it's 42"), vec!["it", "'", "s", " ", "4", "2"]);
    /// assert_eq!(Tokenizer::Runes.split("añ"), vec!["a", "ñ"]);
    /// ```
    pub fn split(&self, text: &str) -> Vec<String> {
        match self {
            Tokenizer::Lines => lines(text),
            Tokenizer::LinesWithEol => {
                let mut tokens = lines(text);
                if let Some(last) = tokens.last_mut() {
                    if !last.ends_with('\n') {
                        last.push('\n');
                    }
                }
                tokens
            }
            Tokenizer::Words => words(text),
            Tokenizer::Runes => text.chars().map(String::from).collect(),
        }
    }
}

fn lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(String::from).collect()
}

fn words(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in text.char_indices() {
        if c.is_alphabetic() {
            start.get_or_insert(i);
            continue;
        }
        if let Some(s) = start.take() {
            tokens.push(text[s..i].to_string());
        }
        tokens.push(c.to_string());
    }
    if let Some(s) = start {
        tokens.push(text[s..].to_string());
    }
    tokens
}
