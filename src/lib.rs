//! `quorum` is the shared foundation of a small family of classifiers written from
//! first principles: a decision tree, a feature-partitioned random forest and a
//! Gaussian naive Bayes model.
//!
//! This crate holds the pieces every algorithm crate depends on:
//!
//! * the [`DatasetBase`] container pairing a feature matrix with a label column,
//! * the [`Fit`](traits::Fit) / [`Predict`](traits::Predict) traits,
//! * the [`ParamGuard`] contract used to validate hyperparameters once,
//! * classification metrics and the k-fold [`evaluation`] harness.
//!
//! The algorithms themselves live in `quorum-trees` and `quorum-bayes`, the table
//! loader in `quorum-datasets`.
//!
//! ```rust
//! use quorum::prelude::*;
//! use ndarray::array;
//!
//! let dataset = Dataset::new(array![[1.0], [2.0], [3.0]], array![0usize, 1, 1])
//!     .with_feature_names(vec!["x"]);
//!
//! assert_eq!(dataset.nsamples(), 3);
//! assert_eq!(dataset.feature_names(), vec!["x".to_string()]);
//! ```

pub mod benchmarks;
pub mod dataset;
pub mod error;
pub mod evaluation;
mod metrics_classification;
mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Dataset, DatasetBase, DatasetView, Float, Label};
pub use error::Error;
pub use param_guard::ParamGuard;

/// Common metrics functions for classification
pub mod metrics {
    pub use crate::metrics_classification::{accuracy_score, ConfusionMatrix, ToConfusionMatrix};
}
