//! Common metrics for performance evaluation of classifier
//!
//! Scoring is essential for classification tasks. This module implements accuracy and the
//! confusion matrix, from which precision, recall and f1-score are derived.
use std::collections::HashMap;
use std::fmt;

use ndarray::prelude::*;
use ndarray::Data;

use crate::dataset::{count_in_order, AsTargets, DatasetBase, Label, Records};
use crate::error::{Error, Result};

/// Fraction of predictions which agree with the ground truth
///
/// Returns a value in `[0, 1]`.
///
/// # Errors
///
/// Returns `Error::MismatchedShapes` if both columns differ in length and `Error::EmptyDataset`
/// if they are empty.
pub fn accuracy_score<L, C, D>(
    prediction: &ArrayBase<C, Ix1>,
    ground_truth: &ArrayBase<D, Ix1>,
) -> Result<f64>
where
    L: PartialEq,
    C: Data<Elem = L>,
    D: Data<Elem = L>,
{
    if prediction.len() != ground_truth.len() {
        return Err(Error::MismatchedShapes(ground_truth.len(), prediction.len()));
    }
    if prediction.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let correct = prediction
        .iter()
        .zip(ground_truth.iter())
        .filter(|(a, b)| a == b)
        .count();

    Ok(correct as f64 / prediction.len() as f64)
}

/// Confusion matrix for multi-label evaluation
///
/// A confusion matrix shows predictions in a matrix, where rows correspond to predicted and
/// columns to ground truth. The diagonal entries are correct predictions. Classes are ordered by
/// first appearance in the ground truth, followed by labels which were only ever predicted.
pub struct ConfusionMatrix<A> {
    matrix: Array2<usize>,
    members: Array1<A>,
}

impl<A> ConfusionMatrix<A> {
    fn ratio_on_axis(&self, axis: Axis) -> Array1<f32> {
        let sum = self.matrix.sum_axis(axis);

        self.matrix
            .diag()
            .iter()
            .zip(sum.iter())
            .map(|(a, b)| if *b == 0 { 0.0 } else { *a as f32 / *b as f32 })
            .collect()
    }

    /// Calculate precision for every class
    ///
    /// Classes which were never predicted have a precision of zero.
    pub fn precision(&self) -> Array1<f32> {
        self.ratio_on_axis(Axis(1))
    }

    /// Calculate recall for every class
    ///
    /// Classes which never occur in the ground truth have a recall of zero.
    pub fn recall(&self) -> Array1<f32> {
        self.ratio_on_axis(Axis(0))
    }

    /// Return mean accuracy
    pub fn accuracy(&self) -> f32 {
        self.matrix.diag().sum() as f32 / self.matrix.sum() as f32
    }

    /// Return the F-beta score for every class
    pub fn f_score(&self, beta: f32) -> Array1<f32> {
        let sb = beta * beta;
        let precision = self.precision();
        let recall = self.recall();

        precision
            .iter()
            .zip(recall.iter())
            .map(|(p, r)| {
                let denom = sb * p + r;
                if denom == 0.0 {
                    0.0
                } else {
                    (1.0 + sb) * (p * r) / denom
                }
            })
            .collect()
    }

    /// Return the beta=1 score for every class
    pub fn f1_score(&self) -> Array1<f32> {
        self.f_score(1.0)
    }

    /// Classes in the order of the matrix rows and columns
    pub fn members(&self) -> ArrayView1<A> {
        self.members.view()
    }

    /// Raw counts, rows are predicted and columns ground truth
    pub fn matrix(&self) -> ArrayView2<usize> {
        self.matrix.view()
    }
}

/// Print a confusion matrix
impl<A: fmt::Display> fmt::Debug for ConfusionMatrix<A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let len = self.matrix.len_of(Axis(0));
        writeln!(f)?;
        write!(f, "{: <10}", "classes")?;
        for i in 0..len {
            write!(f, " | {: <10}", self.members[i])?;
        }
        writeln!(f)?;

        for i in 0..len {
            write!(f, "{: <10}", self.members[i])?;

            for j in 0..len {
                write!(f, " | {: <10}", self.matrix[(i, j)])?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Classification functions
///
/// Contains only routine for Confusion Matrix, as all other current metrics can be derived from
/// the entries in the matrix.
pub trait ToConfusionMatrix<A, T> {
    fn confusion_matrix(&self, ground_truth: T) -> Result<ConfusionMatrix<A>>;
}

impl<L: Label, C, D> ToConfusionMatrix<L, &ArrayBase<D, Ix1>> for ArrayBase<C, Ix1>
where
    C: Data<Elem = L>,
    D: Data<Elem = L>,
{
    fn confusion_matrix(&self, ground_truth: &ArrayBase<D, Ix1>) -> Result<ConfusionMatrix<L>> {
        if self.len() != ground_truth.len() {
            return Err(Error::MismatchedShapes(ground_truth.len(), self.len()));
        }

        let classes = count_in_order(ground_truth.iter().chain(self.iter()))
            .into_iter()
            .map(|(label, _)| label)
            .collect::<Vec<_>>();

        let index = classes
            .iter()
            .enumerate()
            .map(|(i, label)| (label, i))
            .collect::<HashMap<_, _>>();

        let mut matrix = Array2::zeros((classes.len(), classes.len()));
        for (pred, truth) in self.iter().zip(ground_truth.iter()) {
            matrix[(index[pred], index[truth])] += 1;
        }

        Ok(ConfusionMatrix {
            matrix,
            members: Array1::from(classes),
        })
    }
}

impl<L: Label, C, R, T> ToConfusionMatrix<L, &DatasetBase<R, T>> for ArrayBase<C, Ix1>
where
    C: Data<Elem = L>,
    R: Records,
    T: AsTargets<Elem = L>,
{
    fn confusion_matrix(&self, ground_truth: &DatasetBase<R, T>) -> Result<ConfusionMatrix<L>> {
        self.confusion_matrix(&ground_truth.targets.as_targets())
    }
}
