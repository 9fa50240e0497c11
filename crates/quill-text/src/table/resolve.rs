//! Column width resolution under a total width budget.
//!
//! Columns narrower than their fair share keep their natural width; the
//! space they leave is shared among the wider ones, which are all clamped to
//! a common limit.

/// Resolves display widths for columns with the given natural widths.
///
/// `max_width` is the total line budget including `sep_width` columns of
/// separator between each pair of columns; 0 means unlimited. Every returned
/// width is at least 1.
///
/// # Example
///
/// ```rust
/// use quill_text::table::resolve_widths;
///
/// // 80 columns minus two 3-column separators leaves 74.
/// assert_eq!(resolve_widths(&[12, 41, 68], 80, 3), vec![12, 31, 31]);
/// assert_eq!(resolve_widths(&[5, 5], 80, 3), vec![5, 5]);
/// ```
pub fn resolve_widths(natural: &[usize], max_width: usize, sep_width: usize) -> Vec<usize> {
    let count = natural.len();
    if count == 0 {
        return Vec::new();
    }
    let natural: Vec<usize> = natural.iter().map(|&w| w.max(1)).collect();
    let budget = max_width.saturating_sub((count - 1) * sep_width);
    let limit = if max_width == 0 || natural.iter().sum::<usize>() <= budget {
        usize::MAX
    } else {
        fair_limit(&natural, budget)
    };

    let widths: Vec<usize> = natural.iter().map(|&w| w.min(limit).max(1)).collect();
    tracing::debug!(?natural, ?widths, max_width, "resolved column widths");
    widths
}

/// Finds the common limit for the columns that do not fit their share.
fn fair_limit(natural: &[usize], mut budget: usize) -> usize {
    let mut open: Vec<usize> = natural.to_vec();
    loop {
        let share = budget / open.len();
        let (under, over): (Vec<usize>, Vec<usize>) = open.iter().partition(|&&w| w <= share);
        if under.is_empty() || over.is_empty() {
            return share;
        }
        budget -= under.iter().sum::<usize>();
        open = over;
    }
}
