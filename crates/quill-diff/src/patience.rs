//! Patience diffs.
//!
//! Tokens occurring exactly once on each side are anchors. The anchors are
//! aligned first, and only the stretches between consecutive aligned anchors
//! go through LCS. Unique lines are usually the meaningful ones (function
//! signatures rather than braces), so the result tends to read better than a
//! plain LCS on source code.

use std::collections::HashMap;

use crate::delta::{Delta, Diff};
use crate::lcs::{align, diff_with, push_lcs, Step};

/// Diffs two token slices with the patience algorithm.
///
/// Falls back to plain LCS when the sides share no unique token.
///
/// ```rust
/// use quill_diff::{patience, Op};
///
/// let left = ["fn a\n", "}\n", "fn b\n", "}\n"];
/// let right = ["fn b\n", "}\n", "fn a\n", "}\n"];
/// let diff = patience(&left, &right);
/// assert_eq!(diff.left(), left.concat());
/// assert_eq!(diff.right(), right.concat());
/// assert_eq!(diff.op(), Op::Different);
/// ```
pub fn patience<S: AsRef<str>>(left: &[S], right: &[S]) -> Diff {
    diff_with(left, right, push_patience::<S>)
}

fn push_patience<S: AsRef<str>>(l: &[S], r: &[S], diff: &mut Diff) {
    let anchors = anchors(l, r);
    if anchors.is_empty() {
        push_lcs(l, r, diff);
        return;
    }

    let (mut li, mut ri) = (0, 0);
    for (i, j) in anchors {
        push_lcs(&l[li..i], &r[ri..j], diff);
        diff.append(Delta::same(l[i].as_ref()));
        li = i + 1;
        ri = j + 1;
    }
    push_lcs(&l[li..], &r[ri..], diff);
}

/// Positions of the aligned anchors, increasing on both sides.
fn anchors<S: AsRef<str>>(l: &[S], r: &[S]) -> Vec<(usize, usize)> {
    let left = unique(l);
    let right = unique(r);
    let left: Vec<(usize, &str)> = left
        .into_iter()
        .filter(|(_, t)| right.iter().any(|(_, u)| u == t))
        .collect();
    let right: Vec<(usize, &str)> = right
        .into_iter()
        .filter(|(_, t)| left.iter().any(|(_, u)| u == t))
        .collect();

    align(left.len(), right.len(), |i, j| left[i].1 == right[j].1)
        .into_iter()
        .filter_map(|step| match step {
            Step::Match(i, j) => Some((left[i].0, right[j].0)),
            _ => None,
        })
        .collect()
}

/// Tokens occurring exactly once, with their position, in order.
fn unique<S: AsRef<str>>(tokens: &[S]) -> Vec<(usize, &str)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for t in tokens {
        *counts.entry(t.as_ref()).or_default() += 1;
    }
    tokens
        .iter()
        .enumerate()
        .map(|(i, t)| (i, t.as_ref()))
        .filter(|(_, t)| counts.get(t) == Some(&1))
        .collect()
}
