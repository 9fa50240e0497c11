//! Longest-common-subsequence diffs.
//!
//! Common leading and trailing tokens are split off first so the quadratic
//! table only covers the changed middle. The table is walked back from the
//! end, preferring an insertion, then a deletion, then a match; in forward
//! order deletions therefore come before the insertions they pair with.

use crate::delta::{Delta, Diff};
use crate::similarity::similar_pairs;

/// One step of an alignment between two token slices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    Match(usize, usize),
    Insert(usize),
    Delete(usize),
}

/// Length table: `table[i][j]` is the LCS length of `left[..i]` and
/// `right[..j]`.
fn table(n: usize, m: usize, matches: impl Fn(usize, usize) -> bool) -> Vec<Vec<usize>> {
    let mut t = vec![vec![0usize; m + 1]; n + 1];
    for i in 1..=n {
        for j in 1..=m {
            t[i][j] = if matches(i - 1, j - 1) {
                t[i - 1][j - 1] + 1
            } else {
                t[i - 1][j].max(t[i][j - 1])
            };
        }
    }
    t
}

/// Walks the table back into forward-ordered steps.
fn backtrack(t: &[Vec<usize>], n: usize, m: usize) -> Vec<Step> {
    let mut steps = Vec::with_capacity(n + m);
    let (mut i, mut j) = (n, m);
    while i > 0 && j > 0 {
        if t[i][j] == t[i][j - 1] {
            j -= 1;
            steps.push(Step::Insert(j));
        } else if t[i][j] == t[i - 1][j] {
            i -= 1;
            steps.push(Step::Delete(i));
        } else {
            i -= 1;
            j -= 1;
            steps.push(Step::Match(i, j));
        }
    }
    while j > 0 {
        j -= 1;
        steps.push(Step::Insert(j));
    }
    while i > 0 {
        i -= 1;
        steps.push(Step::Delete(i));
    }
    steps.reverse();
    steps
}

/// Aligns two slices, `matches(i, j)` deciding whether tokens pair up.
pub(crate) fn align(n: usize, m: usize, matches: impl Fn(usize, usize) -> bool) -> Vec<Step> {
    backtrack(&table(n, m, matches), n, m)
}

/// Number of leading and trailing tokens equal on both sides, not
/// overlapping.
fn common_affixes<S: AsRef<str>>(left: &[S], right: &[S]) -> (usize, usize) {
    let head = left
        .iter()
        .zip(right)
        .take_while(|(l, r)| l.as_ref() == r.as_ref())
        .count();
    let room = left.len().min(right.len()) - head;
    let tail = left
        .iter()
        .rev()
        .zip(right.iter().rev())
        .take(room)
        .take_while(|(l, r)| l.as_ref() == r.as_ref())
        .count();
    (head, tail)
}

/// Emits the common prefix and suffix as Same around whatever `middle`
/// appends for the differing range.
pub(crate) fn diff_with<S: AsRef<str>>(
    left: &[S],
    right: &[S],
    middle: impl FnOnce(&[S], &[S], &mut Diff),
) -> Diff {
    let (head, tail) = common_affixes(left, right);
    let mut diff = Diff::new();
    for t in &left[..head] {
        diff.append(Delta::same(t.as_ref()));
    }
    middle(
        &left[head..left.len() - tail],
        &right[head..right.len() - tail],
        &mut diff,
    );
    for t in &left[left.len() - tail..] {
        diff.append(Delta::same(t.as_ref()));
    }
    diff
}

/// Diffs two token slices by longest common subsequence.
///
/// ```rust
/// use quill_diff::{lcs, Delta};
///
/// let diff = lcs(&["a", "b", "c"], &["a", "x", "c"]);
/// assert_eq!(
///     diff.deltas(),
///     &[
///         Delta::same("a"),
///         Delta::deleted("b"),
///         Delta::inserted("x"),
///         Delta::same("c"),
///     ]
/// );
/// ```
pub fn lcs<S: AsRef<str>>(left: &[S], right: &[S]) -> Diff {
    diff_with(left, right, push_lcs::<S>)
}

/// Appends the plain LCS alignment of `l` and `r`, without affix stripping.
pub(crate) fn push_lcs<S: AsRef<str>>(l: &[S], r: &[S], diff: &mut Diff) {
    let steps = align(l.len(), r.len(), |i, j| l[i].as_ref() == r[j].as_ref());
    for step in steps {
        diff.append(match step {
            Step::Match(i, _) => Delta::same(l[i].as_ref()),
            Step::Insert(j) => Delta::inserted(r[j].as_ref()),
            Step::Delete(i) => Delta::deleted(l[i].as_ref()),
        });
    }
}

/// Diffs two token slices, aligning similar tokens as well as equal ones.
///
/// A pair of similar but different tokens is emitted as a nested diff of a
/// deletion and an insertion, ready to be refined with a finer tokeniser.
/// See [`crate::similarity`] for what counts as similar.
pub fn lcs_similar<S: AsRef<str>>(left: &[S], right: &[S]) -> Diff {
    diff_with(left, right, |l, r, diff| {
        let similar = similar_pairs(l, r);
        let steps = align(l.len(), r.len(), |i, j| similar[i][j]);
        for step in steps {
            diff.append(match step {
                Step::Match(i, j) if l[i].as_ref() == r[j].as_ref() => Delta::same(l[i].as_ref()),
                Step::Match(i, j) => Delta::Nested(
                    vec![Delta::deleted(l[i].as_ref()), Delta::inserted(r[j].as_ref())].into(),
                ),
                Step::Insert(j) => Delta::inserted(r[j].as_ref()),
                Step::Delete(i) => Delta::deleted(l[i].as_ref()),
            });
        }
    })
}
