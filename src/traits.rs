//! Provide traits for different classes of algorithms
//!

use crate::dataset::{DatasetBase, Records};
use std::convert::From;

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and creates a concept of some kind about it. For example
/// in a decision tree the fitted object is the grown tree, while for naive Bayes it is the set of
/// per-class summaries.
pub trait Fit<R: Records, T, E: std::error::Error + From<crate::error::Error>> {
    type Object;

    fn fit(&self, dataset: &DatasetBase<R, T>) -> Result<Self::Object, E>;
}

/// Predict with model into a mutable reference of targets.
pub trait PredictInplace<R: Records, T> {
    /// Predict something in place
    fn predict_inplace<'a>(&'a self, x: &'a R, y: &mut T);

    /// Create targets that `predict_inplace` works with.
    fn default_target(&self, x: &R) -> T;
}

/// Predict with model
///
/// This trait assumes the `PredictInplace` implementation and provides additional input/output
/// combinations.
///
/// # Provided implementation
///
/// * &Array2 -> Array1
/// * Array2 -> Array1
/// * &Dataset -> Array1
pub trait Predict<R: Records, T> {
    fn predict(&self, x: R) -> T;
}
