//! Adaptive refinement.
//!
//! A [`Differ`] runs a list of tokenisers from coarse to fine. The text is
//! diffed with the first; every changed region mixing deletions and
//! insertions is then diffed again with the next tokeniser and replaced by a
//! nested delta holding the finer result.
//!
//! ```rust
//! use quill_diff::{Delta, Differ, Op, Tokenizer};
//!
//! let diff = Differ::new()
//!     .tokenizers([Tokenizer::Lines, Tokenizer::Words])
//!     .diff("let x = 1;\n", "let y = 1;\n");
//!
//! assert_eq!(diff.op(), Op::Different);
//! let Delta::Nested(words) = &diff.deltas()[0] else { panic!("expected a nested delta") };
//! assert!(words.deltas().contains(&Delta::deleted("x")));
//! assert!(words.deltas().contains(&Delta::inserted("y")));
//! ```

use crate::delta::{Delta, Diff};
use crate::lcs::{lcs, lcs_similar};
use crate::patience::patience;
use crate::similarity;
use crate::tokenize::Tokenizer;

/// The token alignment algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Algorithm {
    #[default]
    Lcs,
    Patience,
}

impl Algorithm {
    fn run<S: AsRef<str>>(self, left: &[S], right: &[S]) -> Diff {
        match self {
            Algorithm::Lcs => lcs(left, right),
            Algorithm::Patience => patience(left, right),
        }
    }
}

/// Multi-level diff configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Differ {
    tokenizers: Vec<Tokenizer>,
    algorithm: Algorithm,
    similar: bool,
}

impl Default for Differ {
    fn default() -> Self {
        Self {
            tokenizers: vec![Tokenizer::Lines, Tokenizer::Words, Tokenizer::Runes],
            algorithm: Algorithm::Lcs,
            similar: similarity::is_enabled(),
        }
    }
}

impl Differ {
    /// Lines, then words, then runes, with LCS.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tokenisers, coarsest first. With none, each side is a
    /// single token.
    pub fn tokenizers(mut self, tokenizers: impl IntoIterator<Item = Tokenizer>) -> Self {
        self.tokenizers = tokenizers.into_iter().collect();
        self
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Aligns similar tokens on every level but the last, so near-identical
    /// lines are refined together instead of shown as a deletion followed by
    /// an unrelated insertion. Only applies to [`Algorithm::Lcs`]; has no
    /// effect without the `similarity` feature.
    pub fn similar(mut self, similar: bool) -> Self {
        self.similar = similar;
        self
    }

    /// Diffs `left` against `right`.
    pub fn diff(&self, left: &str, right: &str) -> Diff {
        self.refine(left, right, &self.tokenizers)
    }

    fn refine(&self, left: &str, right: &str, tokenizers: &[Tokenizer]) -> Diff {
        let Some((tokenizer, finer)) = tokenizers.split_first() else {
            return whole(left, right);
        };

        let l = tokenizer.split(left);
        let r = tokenizer.split(right);
        let diff = if self.similar && !finer.is_empty() && self.algorithm == Algorithm::Lcs {
            lcs_similar(&l, &r)
        } else {
            self.algorithm.run(&l, &r)
        };
        if finer.is_empty() {
            return diff;
        }

        let zones = diff.different_zones();
        tracing::debug!(
            tokenizer = ?tokenizer,
            tokens_left = l.len(),
            tokens_right = r.len(),
            zones = zones.len(),
            "refining diff"
        );
        if zones.is_empty() {
            return diff;
        }

        let mut deltas = diff.into_deltas().into_iter().enumerate().peekable();
        let mut out = Diff::new();
        for zone in zones {
            while let Some((_, delta)) = deltas.next_if(|(i, _)| *i < zone.start) {
                out.append(delta);
            }
            let region: Diff = std::iter::from_fn(|| deltas.next_if(|(i, _)| *i < zone.end))
                .map(|(_, delta)| delta)
                .collect();
            out.append(Delta::Nested(self.refine(
                &region.left(),
                &region.right(),
                finer,
            )));
        }
        out.extend(deltas.map(|(_, delta)| delta).collect());
        out
    }
}

/// Diff of two texts taken as single tokens.
fn whole(left: &str, right: &str) -> Diff {
    let mut diff = Diff::new();
    if left == right {
        if !left.is_empty() {
            diff.append(Delta::same(left));
        }
        return diff;
    }
    if !left.is_empty() {
        diff.append(Delta::deleted(left));
    }
    if !right.is_empty() {
        diff.append(Delta::inserted(right));
    }
    diff
}

/// Adaptive diff with lines, words and runes.
pub fn diff(left: &str, right: &str) -> Diff {
    Differ::new().diff(left, right)
}

/// Single-level LCS diff with one tokeniser.
///
/// ```rust
/// use quill_diff::{diff_lcs, Delta, Tokenizer};
///
/// let diff = diff_lcs("a\nb\n", "a\nc\n", Tokenizer::Lines);
/// assert_eq!(
///     diff.deltas(),
///     &[Delta::same("a\n"), Delta::deleted("b\n"), Delta::inserted("c\n")]
/// );
/// ```
pub fn diff_lcs(left: &str, right: &str, tokenizer: Tokenizer) -> Diff {
    lcs(&tokenizer.split(left), &tokenizer.split(right))
}

/// Single-level patience diff with one tokeniser.
pub fn diff_patience(left: &str, right: &str, tokenizer: Tokenizer) -> Diff {
    patience(&tokenizer.split(left), &tokenizer.split(right))
}

/// Adaptive diff with the given tokenisers and algorithm.
pub fn adaptive(left: &str, right: &str, tokenizers: &[Tokenizer], algorithm: Algorithm) -> Diff {
    Differ::new()
        .tokenizers(tokenizers.iter().copied())
        .algorithm(algorithm)
        .diff(left, right)
}
