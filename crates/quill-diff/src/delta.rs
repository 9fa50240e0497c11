//! The diff result tree.
//!
//! A [`Diff`] is an ordered list of [`Delta`]s. Leaves carry text that is the
//! same on both sides, only on the right (inserted) or only on the left
//! (deleted); a [`Delta::Nested`] holds a finer-grained diff of a changed
//! region.
//!
//! ```rust
//! use quill_diff::{Delta, Diff, Op};
//!
//! let mut diff = Diff::new();
//! diff.append(Delta::same("fn "));
//! diff.append(Delta::deleted("main"));
//! diff.append(Delta::inserted("start"));
//!
//! assert_eq!(diff.op(), Op::Different);
//! assert_eq!(diff.left(), "fn main");
//! assert_eq!(diff.right(), "fn start");
//! ```

use std::ops::Range;

/// The kind of change a delta or diff represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Op {
    Same,
    Inserted,
    Deleted,
    /// A mix of insertions and deletions.
    Different,
    /// No information yet; the identity of [`Op::combine`].
    Unknown,
}

impl Op {
    /// Folds two operation types into their cumulative type.
    ///
    /// Same stays Same; mixed with one kind of change it becomes that
    /// change; two different kinds of change become Different.
    pub fn combine(self, other: Op) -> Op {
        match (self, other) {
            (Op::Unknown, op) | (op, Op::Unknown) => op,
            (a, b) if a == b => a,
            (Op::Same, op) | (op, Op::Same) => op,
            _ => Op::Different,
        }
    }
}

/// One element of a diff.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Delta {
    /// Text present on both sides.
    Same(String),
    /// Text present only on the right.
    Inserted(String),
    /// Text present only on the left.
    Deleted(String),
    /// A refined diff of a changed region.
    Nested(Diff),
}

impl Delta {
    pub fn same(text: impl Into<String>) -> Self {
        Delta::Same(text.into())
    }

    pub fn inserted(text: impl Into<String>) -> Self {
        Delta::Inserted(text.into())
    }

    pub fn deleted(text: impl Into<String>) -> Self {
        Delta::Deleted(text.into())
    }

    pub fn op(&self) -> Op {
        match self {
            Delta::Same(_) => Op::Same,
            Delta::Inserted(_) => Op::Inserted,
            Delta::Deleted(_) => Op::Deleted,
            Delta::Nested(diff) => diff.op(),
        }
    }

    /// The text this delta contributes to the left side, if any.
    pub fn left(&self) -> Option<String> {
        match self {
            Delta::Same(t) | Delta::Deleted(t) => Some(t.clone()),
            Delta::Inserted(_) => None,
            Delta::Nested(diff) => Some(diff.left()),
        }
    }

    /// The text this delta contributes to the right side, if any.
    pub fn right(&self) -> Option<String> {
        match self {
            Delta::Same(t) | Delta::Inserted(t) => Some(t.clone()),
            Delta::Deleted(_) => None,
            Delta::Nested(diff) => Some(diff.right()),
        }
    }

    fn push_left(&self, out: &mut String) {
        match self {
            Delta::Same(t) | Delta::Deleted(t) => out.push_str(t),
            Delta::Inserted(_) => {}
            Delta::Nested(diff) => diff.deltas.iter().for_each(|d| d.push_left(out)),
        }
    }

    fn push_right(&self, out: &mut String) {
        match self {
            Delta::Same(t) | Delta::Inserted(t) => out.push_str(t),
            Delta::Deleted(_) => {}
            Delta::Nested(diff) => diff.deltas.iter().for_each(|d| d.push_right(out)),
        }
    }
}

/// An ordered sequence of deltas.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Diff {
    deltas: Vec<Delta>,
}

impl Diff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a delta at the end.
    pub fn append(&mut self, delta: Delta) {
        self.deltas.push(delta);
    }

    /// Adds a delta at the front.
    pub fn insert(&mut self, delta: Delta) {
        self.deltas.insert(0, delta);
    }

    /// Appends every delta of `other`.
    pub fn extend(&mut self, other: Diff) {
        self.deltas.extend(other.deltas);
    }

    pub fn deltas(&self) -> &[Delta] {
        &self.deltas
    }

    pub fn into_deltas(self) -> Vec<Delta> {
        self.deltas
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Delta> {
        self.deltas.iter()
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// The cumulative type of every delta. An empty diff is Same.
    pub fn op(&self) -> Op {
        match self.deltas.iter().fold(Op::Unknown, |acc, d| acc.combine(d.op())) {
            Op::Unknown => Op::Same,
            op => op,
        }
    }

    /// Reconstructs the left side.
    pub fn left(&self) -> String {
        let mut out = String::new();
        self.deltas.iter().for_each(|d| d.push_left(&mut out));
        out
    }

    /// Reconstructs the right side.
    pub fn right(&self) -> String {
        let mut out = String::new();
        self.deltas.iter().for_each(|d| d.push_right(&mut out));
        out
    }

    /// Every non-nested delta, depth first.
    pub fn leaves(&self) -> Vec<&Delta> {
        let mut out = Vec::new();
        collect_leaves(self, &mut out);
        out
    }

    /// Index ranges of the runs of changed deltas that mix insertions and
    /// deletions.
    ///
    /// A run is a maximal sequence of deltas that are not Same; runs made of
    /// insertions only, or deletions only, are not returned.
    ///
    /// ```rust
    /// use quill_diff::{Delta, Diff};
    ///
    /// let diff: Diff = vec![
    ///     Delta::same("a"),
    ///     Delta::deleted("b"),
    ///     Delta::inserted("c"),
    ///     Delta::same("d"),
    ///     Delta::inserted("e"),
    /// ]
    /// .into();
    /// assert_eq!(diff.different_zones(), vec![1..3]);
    /// ```
    pub fn different_zones(&self) -> Vec<Range<usize>> {
        let mut zones = Vec::new();
        let mut start: Option<usize> = None;
        let mut op = Op::Unknown;

        for (i, delta) in self.deltas.iter().enumerate() {
            let delta_op = delta.op();
            if delta_op == Op::Same {
                if let Some(s) = start.take() {
                    if op == Op::Different {
                        zones.push(s..i);
                    }
                }
                op = Op::Unknown;
                continue;
            }
            start.get_or_insert(i);
            op = op.combine(delta_op);
        }
        if let Some(s) = start {
            if op == Op::Different {
                zones.push(s..self.deltas.len());
            }
        }
        zones
    }
}

fn collect_leaves<'a>(diff: &'a Diff, out: &mut Vec<&'a Delta>) {
    for delta in &diff.deltas {
        match delta {
            Delta::Nested(inner) => collect_leaves(inner, out),
            leaf => out.push(leaf),
        }
    }
}

impl From<Vec<Delta>> for Diff {
    fn from(deltas: Vec<Delta>) -> Self {
        Diff { deltas }
    }
}

impl FromIterator<Delta> for Diff {
    fn from_iter<I: IntoIterator<Item = Delta>>(iter: I) -> Self {
        Diff {
            deltas: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Diff {
    type Item = &'a Delta;
    type IntoIter = std::slice::Iter<'a, Delta>;

    fn into_iter(self) -> Self::IntoIter {
        self.deltas.iter()
    }
}

impl IntoIterator for Diff {
    type Item = Delta;
    type IntoIter = std::vec::IntoIter<Delta>;

    fn into_iter(self) -> Self::IntoIter {
        self.deltas.into_iter()
    }
}
