//! Impurity and split evaluation
//!
//! All scores are computed from label counts. The order of the counts is the order in which the
//! squared class probabilities are summed, so callers which compare gains against each other pass
//! counts in one fixed class order.
//!
//! Candidate splits of one node are ranked with [`SplitScore`], which compares exact integer
//! ratios. Floating point gains of equally good splits may differ in the last bit, the ranking
//! must not.
use std::cmp::Ordering;

use ndarray::{ArrayBase, Data, Ix2};
use quorum::Float;

/// Partition of a set of rows by a threshold test
///
/// Rows whose value is greater than or equal to the threshold end up in `true_rows`, all others in
/// `false_rows`. Both keep the order in which the rows were given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub true_rows: Vec<usize>,
    pub false_rows: Vec<usize>,
}

/// Gini impurity of a set of labels, given as `(label, count)` pairs
///
/// Defined as one minus the sum over all labels of the squared probability of encountering that
/// label. A pure set has an impurity of zero, `k` balanced classes an impurity of `1 - 1/k`.
pub fn gini_impurity<L>(label_counts: &[(L, usize)]) -> f64 {
    gini_of_counts(label_counts.iter().map(|(_, count)| *count))
}

/// Information gain of splitting a parent set into two branches
///
/// `parent_impurity - w * gini(true) - (1 - w) * gini(false)` where `w` is the share of rows in
/// the true branch.
pub fn information_gain<L>(
    true_counts: &[(L, usize)],
    false_counts: &[(L, usize)],
    parent_impurity: f64,
) -> f64 {
    gain_of_counts(
        true_counts.iter().map(|(_, count)| *count),
        false_counts.iter().map(|(_, count)| *count),
        parent_impurity,
    )
}

/// Split the rows at `threshold` on column `feature`
///
/// Returns `None` if one of the two sides would be empty. Such a split carries no information and
/// is never scored.
pub fn split<F: Float, D: Data<Elem = F>>(
    records: &ArrayBase<D, Ix2>,
    rows: &[usize],
    feature: usize,
    threshold: F,
) -> Option<Split> {
    let (true_rows, false_rows): (Vec<usize>, Vec<usize>) = rows
        .iter()
        .partition(|&&row| records[(row, feature)] >= threshold);

    if true_rows.is_empty() || false_rows.is_empty() {
        None
    } else {
        Some(Split {
            true_rows,
            false_rows,
        })
    }
}

fn gini_of_counts<I: IntoIterator<Item = usize> + Clone>(counts: I) -> f64 {
    let total = counts.clone().into_iter().sum::<usize>();
    if total == 0 {
        return 0.0;
    }

    let purity = counts
        .into_iter()
        .map(|x| x as f64 / total as f64)
        .map(|x| x * x)
        .sum::<f64>();

    1.0 - purity
}

fn gain_of_counts<I, J>(true_counts: I, false_counts: J, parent_impurity: f64) -> f64
where
    I: IntoIterator<Item = usize> + Clone,
    J: IntoIterator<Item = usize> + Clone,
{
    let n_true = true_counts.clone().into_iter().sum::<usize>();
    let n_false = false_counts.clone().into_iter().sum::<usize>();
    let weight = n_true as f64 / (n_true + n_false) as f64;

    parent_impurity
        - weight * gini_of_counts(true_counts)
        - (1.0 - weight) * gini_of_counts(false_counts)
}

/// Weighted purity of a set of rows, stored as an exact fraction
///
/// For a split this is `sum(t^2) / n_t + sum(f^2) / n_f` over the label counts `t` and `f` of
/// both branches, for an unsplit set `sum(c^2) / n`. The information gain of a split is
/// `(split - parent) / n`, so ranking splits by score ranks them by gain, and a split decreases
/// the impurity if and only if its score is greater than the score of its parent.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SplitScore {
    numerator: u128,
    denominator: u128,
}

impl SplitScore {
    /// Score of an unsplit set of label counts
    pub(crate) fn of_parent<I: IntoIterator<Item = usize>>(counts: I) -> Self {
        let (total, squares) = sum_and_squares(counts);

        SplitScore {
            numerator: squares,
            denominator: total.max(1),
        }
    }

    /// Score of a split into two non-empty branches
    pub(crate) fn of_split<I, J>(true_counts: I, false_counts: J) -> Self
    where
        I: IntoIterator<Item = usize>,
        J: IntoIterator<Item = usize>,
    {
        let (n_true, true_squares) = sum_and_squares(true_counts);
        let (n_false, false_squares) = sum_and_squares(false_counts);

        SplitScore {
            numerator: true_squares * n_false + false_squares * n_true,
            denominator: (n_true * n_false).max(1),
        }
    }

    pub(crate) fn value(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

fn sum_and_squares<I: IntoIterator<Item = usize>>(counts: I) -> (u128, u128) {
    counts.into_iter().fold((0, 0), |(total, squares), count| {
        let count = count as u128;
        (total + count, squares + count * count)
    })
}

impl Ord for SplitScore {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.numerator * other.denominator).cmp(&(other.numerator * self.denominator))
    }
}

impl PartialOrd for SplitScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SplitScore {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SplitScore {}
