//! Quorum prelude.
//!
//! This module contains the most used types, type aliases, traits and
//! functions that you can import easily as a group.
//!

#[doc(no_inline)]
pub use crate::error::{Error, Result};

#[doc(no_inline)]
pub use crate::traits::*;

#[doc(no_inline)]
pub use crate::dataset::{
    AsTargets, Dataset, DatasetBase, DatasetView, Float, Label, Labels, Records,
};

#[doc(no_inline)]
pub use crate::metrics_classification::{accuracy_score, ConfusionMatrix, ToConfusionMatrix};

#[doc(no_inline)]
pub use crate::evaluation::{accuracy_metric, cross_validation_split, evaluate_algorithm};

#[doc(no_inline)]
pub use crate::param_guard::ParamGuard;
