//! Token similarity for aligning near-identical tokens.
//!
//! With the `similarity` feature (on by default) tokens are scored with the
//! Jaro-Winkler metric. Without it the score falls back to exact equality, so
//! similar-token alignment degrades to plain LCS.

/// Minimum score for two different tokens to be aligned as similar.
pub const THRESHOLD: f64 = 0.75;

/// Scores how alike `a` and `b` are, from 0.0 (nothing in common) to 1.0
/// (identical).
#[cfg(feature = "similarity")]
pub fn score(a: &str, b: &str) -> f64 {
    strsim::jaro_winkler(a, b)
}

/// Scores how alike `a` and `b` are: 1.0 when equal, 0.0 otherwise.
#[cfg(not(feature = "similarity"))]
pub fn score(a: &str, b: &str) -> f64 {
    if a == b {
        1.0
    } else {
        0.0
    }
}

/// Whether fuzzy scoring is compiled in.
pub fn is_enabled() -> bool {
    cfg!(feature = "similarity")
}

/// Marks the pairs `(i, j)` considered similar.
///
/// For each left token, the right tokens reaching its best score are similar
/// to it, provided that score is at least [`THRESHOLD`]. Equal tokens are
/// always similar.
pub fn similar_pairs<L, R>(left: &[L], right: &[R]) -> Vec<Vec<bool>>
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    left.iter()
        .map(|l| {
            let scores: Vec<f64> = right.iter().map(|r| score(l.as_ref(), r.as_ref())).collect();
            let best = scores.iter().copied().fold(0.0, f64::max);
            right
                .iter()
                .zip(&scores)
                .map(|(r, &s)| l.as_ref() == r.as_ref() || (best >= THRESHOLD && s == best))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_tokens_score_one() {
        assert_eq!(score("same", "same"), 1.0);
    }

    #[test]
    fn equal_tokens_are_always_similar() {
        let pairs = similar_pairs(&["a", "b"], &["b", "a"]);
        assert_eq!(pairs, vec![vec![false, true], vec![true, false]]);
    }

    #[cfg(feature = "similarity")]
    #[test]
    fn near_identical_lines_are_similar() {
        let left = ["\t\"path\"\n"];
        let right = ["\t\"os\"\n", "\t\"path/filepath\"\n", "}\n"];
        assert_eq!(similar_pairs(&left, &right), vec![vec![false, true, false]]);
    }

    #[cfg(feature = "similarity")]
    #[test]
    fn unrelated_tokens_are_not_similar() {
        assert_eq!(similar_pairs(&["alpha"], &["zzz"]), vec![vec![false]]);
    }

    #[cfg(not(feature = "similarity"))]
    #[test]
    fn without_feature_only_equal_tokens_match() {
        assert!(!is_enabled());
        assert_eq!(score("path", "paths"), 0.0);
    }
}
