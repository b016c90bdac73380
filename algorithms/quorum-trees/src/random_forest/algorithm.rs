//! Feature-partitioned random forest
//!
//! An ensemble of decision trees which all see every training row. Diversity comes from giving
//! each tree a disjoint block of the feature columns instead of bootstrapping rows.
use std::fmt;

use ndarray::{Array1, ArrayBase, Data, Ix1, Ix2};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::{debug, info, instrument};

use super::RandomForestValidParams;
use crate::DecisionTree;
use quorum::{
    dataset::{count_in_order, AsTargets, Records},
    error::{Error, Result},
    metrics::accuracy_score,
    traits::*,
    DatasetBase, Float, Label,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Partition `feature_names` into `n_feature_splits` contiguous blocks
///
/// Every block holds `len / n_feature_splits` features, the remainder is added to the last
/// block. With `n_feature_splits == 0` no blocks are returned. The partition only depends on the
/// order of the names and every feature lands in exactly one block.
///
/// # Errors
///
/// Returns `Error::FeaturePartition` if there are fewer features than blocks.
///
/// ```rust
/// use quorum_trees::split_features;
///
/// let names = ["a", "b", "c", "d", "e"].iter().map(|x| x.to_string()).collect::<Vec<_>>();
/// let blocks = split_features(&names, 2).unwrap();
///
/// assert_eq!(blocks, vec![vec!["a", "b"], vec!["c", "d", "e"]]);
/// ```
pub fn split_features(
    feature_names: &[String],
    n_feature_splits: usize,
) -> Result<Vec<Vec<String>>> {
    if n_feature_splits == 0 {
        return Ok(Vec::new());
    }

    let per_block = feature_names.len() / n_feature_splits;
    if per_block == 0 {
        return Err(Error::FeaturePartition {
            features: feature_names.len(),
            splits: n_feature_splits,
        });
    }

    let mut blocks = feature_names
        .chunks(per_block)
        .map(|chunk| chunk.to_vec())
        .collect::<Vec<_>>();

    // fold the remainder into the last full block
    while blocks.len() > n_feature_splits {
        if let Some(rest) = blocks.pop() {
            if let Some(last) = blocks.last_mut() {
                last.extend(rest);
            }
        }
    }

    if blocks.len() != n_feature_splits {
        return Err(Error::FeaturePartition {
            features: feature_names.len(),
            splits: n_feature_splits,
        });
    }

    Ok(blocks)
}

/// A fitted random forest
///
/// ### Structure
///
/// The forest owns one [`DecisionTree`] per feature block, in block order. Without blocks it
/// owns `n_trees` unrestricted trees.
///
/// ### Algorithm
///
/// Every tree is grown on the full training set, restricted to the features of its block. Trees
/// are grown in parallel with `rayon`, each tree on its own is built sequentially, so a fitted
/// forest does not depend on the number of threads.
///
/// ### Predictions
///
/// Every row is classified by majority vote. Votes are counted in tree order and on a tie the
/// label which received its first vote earliest wins.
///
/// ### Example
///
/// ```rust
/// use quorum_trees::RandomForest;
/// use quorum::prelude::*;
/// use ndarray::array;
///
/// let dataset = Dataset::new(
///     array![[1., 0.], [1., 5.], [2., 1.], [2., 6.], [3., 2.], [3., 7.]],
///     array![0usize, 0, 1, 1, 1, 1],
/// )
/// .with_feature_names(vec!["alcohol", "pH"]);
///
/// let forest = RandomForest::params()
///     .n_trees(2)
///     .n_feature_splits(2)
///     .fit(&dataset)
///     .unwrap();
///
/// assert_eq!(forest.feature_blocks(), &[vec!["alcohol".to_string()], vec!["pH".to_string()]]);
/// assert_eq!(forest.trees().len(), 2);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForest<F: Float, L: Label> {
    trees: Vec<DecisionTree<F, L>>,
    feature_blocks: Vec<Vec<String>>,
    num_features: usize,
}

impl<F: Float, L: Label + Default, D: Data<Elem = F>> PredictInplace<ArrayBase<D, Ix2>, Array1<L>>
    for RandomForest<F, L>
{
    /// Classify each row of `x` by majority vote of the trees
    fn predict_inplace(&self, x: &ArrayBase<D, Ix2>, y: &mut Array1<L>) {
        assert_eq!(
            x.nrows(),
            y.len(),
            "The number of data points must match the number of output targets."
        );

        let votes = self
            .trees
            .iter()
            .map(|tree| tree.predict(x))
            .collect::<Vec<Array1<L>>>();

        for (i, target) in y.iter_mut().enumerate() {
            if let Some(label) = majority_vote(votes.iter().map(|v| &v[i])) {
                *target = label;
            }
        }
    }

    fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array1<L> {
        Array1::default(x.nrows())
    }
}

impl<F: Float, L: Label, D, T> Fit<ArrayBase<D, Ix2>, T, Error> for RandomForestValidParams<F, L>
where
    D: Data<Elem = F>,
    T: AsTargets<Elem = L>,
{
    type Object = RandomForest<F, L>;

    /// Grow one tree per feature block on the full dataset
    #[instrument(skip_all, fields(n_trees = self.n_trees(), n_samples = dataset.nsamples()))]
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        dataset.ensure_aligned()?;

        let feature_names = dataset.feature_names();
        let feature_blocks = self.split_features(&feature_names)?;

        info!(
            n_trees = self.n_trees(),
            n_feature_splits = self.n_feature_splits(),
            n_features = feature_names.len(),
            "training random forest"
        );

        let plans: Vec<Option<Vec<String>>> = if feature_blocks.is_empty() {
            vec![None; self.n_trees()]
        } else {
            feature_blocks.iter().cloned().map(Some).collect()
        };

        let view = DatasetBase::new(dataset.records().view(), dataset.targets.as_targets())
            .with_feature_names(feature_names.clone());

        let trees = plans
            .into_par_iter()
            .map(|block| {
                let params = match block {
                    Some(features) => DecisionTree::<F, L>::params().features(features),
                    None => DecisionTree::<F, L>::params(),
                };
                params.fit(&view)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(n_trees_trained = trees.len(), "tree training complete");

        Ok(RandomForest {
            trees,
            feature_blocks,
            num_features: feature_names.len(),
        })
    }
}

impl<F: Float, L: Label> RandomForest<F, L> {
    /// Return the trees of the ensemble, in block order
    pub fn trees(&self) -> &[DecisionTree<F, L>] {
        &self.trees
    }

    /// Return the feature names each tree was restricted to
    ///
    /// Empty if the forest was fitted without partitioning the features.
    pub fn feature_blocks(&self) -> &[Vec<String>] {
        &self.feature_blocks
    }

    /// Return the number of columns seen during fitting
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Fraction of positions where `predictions` agrees with `truth`
    ///
    /// Fails with `Error::MismatchedShapes` if both have a different length.
    pub fn score<S, P>(
        &self,
        truth: &ArrayBase<S, Ix1>,
        predictions: &ArrayBase<P, Ix1>,
    ) -> Result<f64>
    where
        S: Data<Elem = L>,
        P: Data<Elem = L>,
    {
        accuracy_score(predictions, truth)
    }
}

impl<F: Float, L: Label + Default> RandomForest<F, L> {
    /// Predict every row of `x`
    ///
    /// Fails with `Error::MismatchedShapes` if `x` has a different number of columns than the
    /// training table.
    pub fn try_predict<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array1<L>> {
        if x.ncols() != self.num_features {
            return Err(Error::MismatchedShapes(self.num_features, x.ncols()));
        }

        Ok(self.predict(x))
    }

    /// Predict `records` and score the predictions against `truth`
    pub fn score_records<D, S>(
        &self,
        records: &ArrayBase<D, Ix2>,
        truth: &ArrayBase<S, Ix1>,
    ) -> Result<f64>
    where
        D: Data<Elem = F>,
        S: Data<Elem = L>,
    {
        let predictions = self.try_predict(records)?;
        self.score(truth, &predictions)
    }
}

impl<F: Float, L: Label> fmt::Display for RandomForest<F, L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, tree) in self.trees.iter().enumerate() {
            write!(f, "Decision Tree {}\n{}", i + 1, tree)?;
        }

        Ok(())
    }
}

/// Most frequent label, ties go to the label voted for first
fn majority_vote<'a, L: Label + 'a, I: IntoIterator<Item = &'a L>>(votes: I) -> Option<L> {
    let mut best: Option<(L, usize)> = None;

    for (label, count) in count_in_order(votes) {
        match &best {
            Some((_, most)) if count <= *most => {}
            _ => best = Some((label, count)),
        }
    }

    best.map(|(label, _)| label)
}
