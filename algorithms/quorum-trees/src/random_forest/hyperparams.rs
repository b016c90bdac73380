use quorum::{
    error::{Error, Result},
    Float, Label, ParamGuard,
};
use std::marker::PhantomData;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use super::algorithm::split_features;
use crate::RandomForest;

/// The set of hyperparameters that can be specified for fitting a
/// [random forest](struct.RandomForest.html).
///
/// The columns of the training table are cut into `n_feature_splits` contiguous blocks and every
/// tree may only split on the features of its own block. With `n_feature_splits == 0` no blocks
/// are formed and all `n_trees` trees see every feature.
///
/// If `n_feature_splits` is not zero, one tree is grown per block, so the effective number of
/// trees and blocks both become the smaller of the two configured values.
///
/// ### Example
///
/// ```rust
/// use quorum_trees::RandomForest;
/// use quorum::prelude::*;
///
/// let params = RandomForest::<f64, usize>::params()
///     .n_trees(8)
///     .n_feature_splits(3)
///     .check()
///     .unwrap();
///
/// assert_eq!(params.n_trees(), 3);
/// assert_eq!(params.n_feature_splits(), 3);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RandomForestValidParams<F, L> {
    n_trees: usize,
    n_feature_splits: usize,

    phantom: PhantomData<(F, L)>,
}

impl<F: Float, L> RandomForestValidParams<F, L> {
    /// Number of trees in the ensemble
    pub fn n_trees(&self) -> usize {
        if self.n_feature_splits != 0 {
            self.n_trees.min(self.n_feature_splits)
        } else {
            self.n_trees
        }
    }

    /// Number of feature blocks, zero if every tree uses every feature
    pub fn n_feature_splits(&self) -> usize {
        if self.n_feature_splits != 0 {
            self.n_trees.min(self.n_feature_splits)
        } else {
            0
        }
    }

    /// Partition `feature_names` into the blocks of the ensemble
    ///
    /// See [`split_features`](crate::split_features).
    pub fn split_features(&self, feature_names: &[String]) -> Result<Vec<Vec<String>>> {
        split_features(feature_names, self.n_feature_splits())
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RandomForestParams<F, L>(RandomForestValidParams<F, L>);

impl<F: Float, L: Label> RandomForestParams<F, L> {
    pub fn new() -> Self {
        Self(RandomForestValidParams {
            n_trees: 5,
            n_feature_splits: 5,
            phantom: PhantomData,
        })
    }

    /// Sets the number of trees
    pub fn n_trees(mut self, n_trees: usize) -> Self {
        self.0.n_trees = n_trees;
        self
    }

    /// Sets the number of feature blocks, zero disables the partitioning
    pub fn n_feature_splits(mut self, n_feature_splits: usize) -> Self {
        self.0.n_feature_splits = n_feature_splits;
        self
    }
}

impl<F: Float, L: Label> Default for RandomForestParams<F, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, L: Label> RandomForest<F, L> {
    /// Defaults are provided if the optional parameters are not specified:
    /// * `n_trees = 5`
    /// * `n_feature_splits = 5`
    // Violates the convention that new should return a value of type `Self`
    #[allow(clippy::new_ret_no_self)]
    pub fn params() -> RandomForestParams<F, L> {
        RandomForestParams::new()
    }
}

impl<F: Float, L> ParamGuard for RandomForestParams<F, L> {
    type Checked = RandomForestValidParams<F, L>;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.n_trees == 0 {
            Err(Error::Parameters(
                "the number of trees should be positive".to_string(),
            ))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
