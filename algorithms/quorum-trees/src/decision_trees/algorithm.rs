//! Gini decision trees
//!
use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::fmt;

use ndarray::{Array1, ArrayBase, ArrayView1, Axis, Data, Ix1, Ix2};
use tracing::{debug, info, instrument};

use super::impurity::{gini_impurity, information_gain, split, SplitScore};
use super::DecisionTreeValidParams;
use super::NodeIter;
use quorum::{
    dataset::{count_in_order, AsTargets, Records},
    error::Error,
    error::Result,
    metrics::accuracy_score,
    traits::*,
    Dataset, DatasetBase, Float, Label,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Threshold test of a decision node
///
/// A row is routed to the true branch if its value in column `feature_idx` is greater than or
/// equal to `threshold`.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPoint<F> {
    feature_idx: usize,
    feature_name: String,
    threshold: F,
}

impl<F: Float> SplitPoint<F> {
    /// Column index of the tested feature
    pub fn feature_idx(&self) -> usize {
        self.feature_idx
    }

    /// Name of the tested feature
    pub fn feature_name(&self) -> &str {
        &self.feature_name
    }

    /// Smallest value routed to the true branch
    pub fn threshold(&self) -> F {
        self.threshold
    }

    /// Whether `row` takes the true branch
    pub fn matches(&self, row: &ArrayBase<impl Data<Elem = F>, Ix1>) -> bool {
        row[self.feature_idx] >= self.threshold
    }
}

/// A node in the decision tree
///
/// Nodes live in the node list of their [`DecisionTree`], decision nodes refer to their branches
/// by position in that list. Leaves keep a copy of the training rows which reached them.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode<F, L> {
    Leaf {
        rows: Dataset<F, L>,
        prediction: L,
    },
    Decision {
        split: SplitPoint<F>,
        true_branch: usize,
        false_branch: usize,
    },
}

impl<F: Float, L: Label> TreeNode<F, L> {
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Return the predicted label of a leaf, `None` for decision nodes
    pub fn prediction(&self) -> Option<&L> {
        match self {
            TreeNode::Leaf { prediction, .. } => Some(prediction),
            TreeNode::Decision { .. } => None,
        }
    }

    /// Return the training rows which ended up in a leaf, `None` for decision nodes
    pub fn rows(&self) -> Option<&Dataset<F, L>> {
        match self {
            TreeNode::Leaf { rows, .. } => Some(rows),
            TreeNode::Decision { .. } => None,
        }
    }

    /// Return the split of a decision node, `None` for leaves
    pub fn split(&self) -> Option<&SplitPoint<F>> {
        match self {
            TreeNode::Leaf { .. } => None,
            TreeNode::Decision { split, .. } => Some(split),
        }
    }

    /// Return the node indices of the children, true branch first
    pub fn children(&self) -> Vec<usize> {
        match self {
            TreeNode::Leaf { .. } => vec![],
            TreeNode::Decision {
                true_branch,
                false_branch,
                ..
            } => vec![*true_branch, *false_branch],
        }
    }
}

impl<F: Float, L: Label> fmt::Display for TreeNode<F, L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TreeNode::Leaf { rows, prediction } => writeln!(
                f,
                "Leaf Node: {} rows, predict {:?}",
                rows.nsamples(),
                prediction
            ),
            TreeNode::Decision { split, .. } => writeln!(
                f,
                "Decision Node: Split at feature `{}` with value {}",
                split.feature_name, split.threshold
            ),
        }
    }
}

/// Best split found so far while scanning candidates
struct Candidate<F> {
    feature_idx: usize,
    threshold: F,
    score: SplitScore,
}

/// Group of rows sharing one value of the scanned feature
struct ValueGroup<F> {
    value: F,
    first_seen: usize,
    counts: Vec<usize>,
    score: Option<SplitScore>,
}

/// Shared state of a single tree induction
struct Induction<'a, L, D: Data> {
    records: &'a ArrayBase<D, Ix2>,
    targets: ArrayView1<'a, L>,
    candidates: Vec<usize>,
    feature_names: Vec<String>,
}

impl<'a, F: Float, L: Label, D: Data<Elem = F>> Induction<'a, L, D> {
    /// Grow the tree for `rows` and return its nodes, root first
    ///
    /// Row sets waiting for a node are queued breadth first. A node is pushed when its row set
    /// leaves the queue, so the children of a split get the two positions after everything still
    /// queued.
    fn grow(&self, rows: Vec<usize>) -> Result<Vec<TreeNode<F, L>>> {
        let mut nodes = Vec::new();
        let mut pending = VecDeque::from(vec![rows]);

        while let Some(rows) = pending.pop_front() {
            let classes = count_in_order(rows.iter().map(|&row| &self.targets[row]));

            let node = match self.partition(&rows, &classes) {
                Some((split, true_rows, false_rows)) => {
                    let true_branch = nodes.len() + pending.len() + 1;
                    pending.push_back(true_rows);
                    pending.push_back(false_rows);

                    TreeNode::Decision {
                        split,
                        true_branch,
                        false_branch: true_branch + 1,
                    }
                }
                None => self.leaf(&rows, &classes)?,
            };

            nodes.push(node);
        }

        Ok(nodes)
    }

    /// Find the split of `rows` and partition them, `None` if no split decreases the impurity
    fn partition(
        &self,
        rows: &[usize],
        classes: &[(L, usize)],
    ) -> Option<(SplitPoint<F>, Vec<usize>, Vec<usize>)> {
        let parent = SplitScore::of_parent(classes.iter().map(|(_, count)| *count));
        let best = self.best_split(rows, classes, parent)?;
        if best.score <= parent {
            return None;
        }

        let partition = split(self.records, rows, best.feature_idx, best.threshold)?;
        let split = SplitPoint {
            feature_idx: best.feature_idx,
            feature_name: self.feature_names[best.feature_idx].clone(),
            threshold: best.threshold,
        };

        debug!(
            feature = split.feature_name.as_str(),
            threshold = %split.threshold,
            gain = information_gain(
                &count_in_order(partition.true_rows.iter().map(|&row| &self.targets[row])),
                &count_in_order(partition.false_rows.iter().map(|&row| &self.targets[row])),
                gini_impurity(classes),
            ),
            n_rows = rows.len(),
            "split node"
        );

        Some((split, partition.true_rows, partition.false_rows))
    }

    fn leaf(&self, rows: &[usize], classes: &[(L, usize)]) -> Result<TreeNode<F, L>> {
        let prediction = find_modal_class(classes)
            .ok_or(Error::EmptyDataset)?
            .clone();
        let leaf_rows = Dataset::new(
            self.records.select(Axis(0), rows),
            self.targets.select(Axis(0), rows),
        )
        .with_feature_names(self.feature_names.clone());

        Ok(TreeNode::Leaf {
            rows: leaf_rows,
            prediction,
        })
    }

    /// Scan every candidate feature and every distinct value for the split with the highest gain
    ///
    /// Features are visited in column order, values in order of first appearance among `rows`. A
    /// candidate replaces the current best if its gain is at least as high, so the last of several
    /// equally good candidates wins. Splits which leave a side empty are skipped. Returns `None` if
    /// no candidate reaches a gain of zero, i.e. a score of `parent`.
    fn best_split(
        &self,
        rows: &[usize],
        classes: &[(L, usize)],
        parent: SplitScore,
    ) -> Option<Candidate<F>> {
        let class_idx = classes
            .iter()
            .enumerate()
            .map(|(i, (label, _))| (label, i))
            .collect::<HashMap<_, _>>();
        let row_class = rows
            .iter()
            .map(|&row| class_idx[&self.targets[row]])
            .collect::<Vec<_>>();
        let totals = classes.iter().map(|(_, count)| *count).collect::<Vec<_>>();

        let mut best: Option<Candidate<F>> = None;
        let mut best_score = parent;

        for &feature_idx in &self.candidates {
            let groups = self.value_groups(rows, &row_class, &totals, feature_idx);

            for group in groups {
                if let Some(score) = group.score {
                    if score >= best_score {
                        best_score = score;
                        best = Some(Candidate {
                            feature_idx,
                            threshold: group.value,
                            score,
                        });
                    }
                }
            }
        }

        best
    }

    /// Score every distinct value of a feature as threshold
    ///
    /// Rows are sorted by value once and the label counts of the true side are accumulated from the
    /// largest value downwards. The smallest value would send every row to the true side and gets
    /// no score. Groups are returned in order of first appearance.
    fn value_groups(
        &self,
        rows: &[usize],
        row_class: &[usize],
        totals: &[usize],
        feature_idx: usize,
    ) -> Vec<ValueGroup<F>> {
        let column = self.records.column(feature_idx);
        let mut order = (0..rows.len()).collect::<Vec<_>>();
        order.sort_by(|&a, &b| {
            column[rows[a]]
                .partial_cmp(&column[rows[b]])
                .unwrap_or(Ordering::Equal)
        });

        let mut groups: Vec<ValueGroup<F>> = Vec::new();
        for pos in order {
            let value = column[rows[pos]];
            match groups.last_mut() {
                Some(group) if group.value == value => {
                    group.first_seen = group.first_seen.min(pos);
                    group.counts[row_class[pos]] += 1;
                }
                _ => {
                    let mut counts = vec![0; totals.len()];
                    counts[row_class[pos]] += 1;
                    groups.push(ValueGroup {
                        value,
                        first_seen: pos,
                        counts,
                        score: None,
                    });
                }
            }
        }

        let mut true_counts = vec![0; totals.len()];
        for (i, group) in groups.iter_mut().enumerate().rev() {
            true_counts
                .iter_mut()
                .zip(group.counts.iter())
                .for_each(|(acc, count)| *acc += count);

            if i > 0 {
                let false_counts = totals.iter().zip(true_counts.iter()).map(|(t, c)| t - c);
                group.score = Some(SplitScore::of_split(true_counts.iter().copied(), false_counts));
            }
        }

        groups.sort_by_key(|group| group.first_seen);
        groups
    }
}

/// A fitted decision tree
///
/// ### Structure
///
/// A decision tree is a binary tree of [`TreeNode`]s, stored as a flat list with the root first.
/// Every decision node tests a single feature against a threshold, rows with a value greater than
/// or equal to the threshold follow the true branch. Leaves predict the most frequent label of the
/// training rows which reached them.
///
/// ### Algorithm
///
/// Starting from all training rows, the split with the highest Gini information gain is chosen
/// among every candidate feature and every distinct value of that feature. Nodes are split until
/// no split reduces the impurity. Trees are neither pruned nor limited in depth.
///
/// ### Predictions
///
/// Features are looked up by column index, so the prediction table must have the same layout as
/// the training table. [`try_predict`](DecisionTree::try_predict) checks the column count.
///
/// ### Example
///
/// ```rust
/// use quorum_trees::DecisionTree;
/// use quorum::prelude::*;
/// use ndarray::array;
///
/// let dataset = Dataset::new(
///     array![[1.], [1.], [2.], [2.], [3.], [3.]],
///     array![0usize, 0, 1, 1, 1, 1],
/// );
///
/// let tree = DecisionTree::params().fit(&dataset).unwrap();
///
/// assert_eq!(tree.num_leaves(), 2);
/// assert_eq!(tree.score_records(&dataset.records, &dataset.targets).unwrap(), 1.0);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree<F: Float, L: Label> {
    nodes: Vec<TreeNode<F, L>>,
    num_features: usize,
    feature_names: Vec<String>,
}

impl<F: Float, L: Label + Default, D: Data<Elem = F>> PredictInplace<ArrayBase<D, Ix2>, Array1<L>>
    for DecisionTree<F, L>
{
    /// Make predictions for each row of a matrix of features `x`.
    fn predict_inplace(&self, x: &ArrayBase<D, Ix2>, y: &mut Array1<L>) {
        assert_eq!(
            x.nrows(),
            y.len(),
            "The number of data points must match the number of output targets."
        );

        for (row, target) in x.rows().into_iter().zip(y.iter_mut()) {
            *target = make_prediction(&row, &self.nodes).clone();
        }
    }

    fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array1<L> {
        Array1::default(x.nrows())
    }
}

impl<F: Float, L: Label, D, T> Fit<ArrayBase<D, Ix2>, T, Error> for DecisionTreeValidParams<F, L>
where
    D: Data<Elem = F>,
    T: AsTargets<Elem = L>,
{
    type Object = DecisionTree<F, L>;

    /// Fit a decision tree using `hyperparamters` on the dataset consisting of
    /// a matrix of features `x` and an array of labels `y`.
    #[instrument(skip_all, fields(n_samples = dataset.nsamples(), n_features = dataset.nfeatures()))]
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        dataset.ensure_aligned()?;
        if dataset.nsamples() == 0 {
            return Err(Error::EmptyDataset);
        }

        let candidates = match self.features() {
            None => (0..dataset.nfeatures()).collect(),
            Some(features) => resolve_features(features, dataset)?,
        };

        let feature_names = dataset.feature_names();
        let induction = Induction {
            records: dataset.records(),
            targets: dataset.targets.as_targets(),
            candidates,
            feature_names: feature_names.clone(),
        };
        let nodes = induction.grow((0..dataset.nsamples()).collect())?;

        let tree = DecisionTree {
            nodes,
            num_features: dataset.nfeatures(),
            feature_names,
        };

        info!(
            n_leaves = tree.num_leaves(),
            depth = tree.max_depth(),
            "fitted decision tree"
        );

        Ok(tree)
    }
}

/// Map feature names to column indices, in column order
fn resolve_features<R: Records, T>(
    features: &[String],
    dataset: &DatasetBase<R, T>,
) -> Result<Vec<usize>> {
    let mut indices = features
        .iter()
        .map(|name| {
            dataset
                .feature_index(name)
                .ok_or_else(|| Error::MissingFeature(name.clone()))
        })
        .collect::<Result<Vec<_>>>()?;

    indices.sort_unstable();
    indices.dedup();

    Ok(indices)
}

impl<F: Float, L: Label> DecisionTree<F, L> {
    /// Create a node iterator in depth-first pre-order, true branches first
    pub fn iter_nodes(&self) -> NodeIter<F, L> {
        NodeIter::new(&self.nodes)
    }

    /// Return the sorted indices of all features used by a split
    pub fn features(&self) -> Vec<usize> {
        let mut fitted_features = self
            .iter_nodes()
            .filter_map(|node| node.split())
            .map(|split| split.feature_idx)
            .collect::<Vec<_>>();

        fitted_features.sort_unstable();
        fitted_features.dedup();
        fitted_features
    }

    /// Return root node of the tree
    pub fn root_node(&self) -> &TreeNode<F, L> {
        &self.nodes[0]
    }

    /// Return the node at position `idx`, the root is at position zero
    pub fn node(&self, idx: usize) -> Option<&TreeNode<F, L>> {
        self.nodes.get(idx)
    }

    /// Return the children of `node`, true branch first
    pub fn children(&self, node: &TreeNode<F, L>) -> Vec<&TreeNode<F, L>> {
        node.children()
            .into_iter()
            .filter_map(|idx| self.nodes.get(idx))
            .collect()
    }

    /// Return the depth of the deepest leaf, a single leaf has depth zero
    pub fn max_depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(0, 0)];

        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.nodes.get(idx) {
                stack.extend(node.children().into_iter().map(|child| (child, depth + 1)));
            }
        }

        max_depth
    }

    /// Return the number of leaves in this tree
    pub fn num_leaves(&self) -> usize {
        self.iter_nodes().filter(|node| node.is_leaf()).count()
    }

    /// Return the number of columns seen during fitting
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Return the feature names of the training set
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
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

impl<F: Float, L: Label + Default> DecisionTree<F, L> {
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

impl<F: Float, L: Label> fmt::Display for DecisionTree<F, L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.iter_nodes().try_for_each(|node| write!(f, "{}", node))
    }
}

/// Classify a sample &x by walking down from the root of `nodes`.
fn make_prediction<'a, F: Float, L: Label>(
    x: &ArrayBase<impl Data<Elem = F>, Ix1>,
    nodes: &'a [TreeNode<F, L>],
) -> &'a L {
    let mut idx = 0;
    loop {
        match &nodes[idx] {
            TreeNode::Leaf { prediction, .. } => return prediction,
            TreeNode::Decision {
                split,
                true_branch,
                false_branch,
            } => {
                idx = if split.matches(x) {
                    *true_branch
                } else {
                    *false_branch
                };
            }
        }
    }
}

/// Finds the most frequent class of a list of `(label, count)` pairs. If two
/// classes have the same count then the first class in the list is returned.
fn find_modal_class<L: Label>(class_counts: &[(L, usize)]) -> Option<&L> {
    let mut best: Option<(&L, usize)> = None;

    for (label, count) in class_counts {
        match best {
            Some((_, most)) if *count <= most => {}
            _ => best = Some((label, *count)),
        }
    }

    best.map(|(label, _)| label)
}


#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;
    use ndarray::{array, s, Array, Array1, Array2};
    use quorum::{metrics::ToConfusionMatrix, ParamGuard};
    use rand::rngs::SmallRng;

    use ndarray_rand::{rand::SeedableRng, rand_distr::Uniform, RandomExt};

    #[test]
    fn prediction_for_rows_example() {
        let labels = Array::from(vec![0, 0, 0, 0, 0, 0, 1, 1]);
        let counts = count_in_order(labels.iter());

        assert_eq!(find_modal_class(&counts), Some(&0));
    }

    #[test]
    fn modal_class_ties_go_to_first_label() {
        let labels = array![5usize, 3, 3, 5, 7];
        let counts = count_in_order(labels.iter());

        assert_eq!(find_modal_class(&counts), Some(&5));
        assert_eq!(find_modal_class::<usize>(&[]), None);
    }

    #[test]
    /// Six rows on a single feature are separated by the test `x >= 2`
    fn six_rows_single_split() -> Result<()> {
        let dataset = Dataset::new(
            array![[1.], [1.], [2.], [2.], [3.], [3.]],
            array![0usize, 0, 1, 1, 1, 1],
        )
        .with_feature_names(vec!["x"]);

        let model = DecisionTree::params().fit(&dataset)?;
        let root = model.root_node();

        let split = root.split().unwrap();
        assert_eq!(split.feature_idx(), 0);
        assert_eq!(split.feature_name(), "x");
        assert_abs_diff_eq!(split.threshold(), 2.0);

        let children = model.children(root);
        assert_eq!(children[0].prediction(), Some(&1));
        assert_eq!(children[0].rows().unwrap().nsamples(), 4);
        assert_eq!(children[1].prediction(), Some(&0));
        assert_eq!(children[1].rows().unwrap().nsamples(), 2);

        assert_eq!(model.max_depth(), 1);
        assert_eq!(model.num_leaves(), 2);
        assert_eq!(model.predict(&array![[0.5], [2.0], [10.0]]), array![0, 1, 1]);

        Ok(())
    }

    #[test]
    /// Of two equally good splits on different features, the later feature is used
    fn later_feature_wins_ties() -> Result<()> {
        let dataset = Dataset::new(
            array![[1., 1.], [1., 1.], [2., 2.], [2., 2.]],
            array![0usize, 0, 1, 1],
        );

        let model = DecisionTree::params().fit(&dataset)?;
        assert_eq!(model.features(), vec![1]);

        Ok(())
    }

    #[test]
    /// Of two equally good thresholds, the value seen last is used
    fn later_value_wins_ties() -> Result<()> {
        let ascending = Dataset::new(array![[1.], [2.], [3.], [4.]], array![0usize, 1, 1, 0]);
        let model = DecisionTree::params().fit(&ascending)?;
        assert_abs_diff_eq!(model.root_node().split().unwrap().threshold(), 4.0);

        let descending = Dataset::new(array![[4.], [3.], [2.], [1.]], array![0usize, 1, 1, 0]);
        let model = DecisionTree::params().fit(&descending)?;
        assert_abs_diff_eq!(model.root_node().split().unwrap().threshold(), 2.0);

        // {0, 2} | {2} and {2} | {0, 2} are equally good, their float gains are not bitwise equal
        let mirrored = Dataset::new(array![[1.], [2.], [0.]], array![0usize, 2, 2]);
        let model = DecisionTree::params().fit(&mirrored)?;
        assert_abs_diff_eq!(model.root_node().split().unwrap().threshold(), 2.0);
        assert_eq!(model.predict(&array![[1.], [2.], [0.]]), array![0, 2, 2]);

        Ok(())
    }

    #[test]
    /// Alternating labels on a single feature are peeled off one row per level
    fn deep_chain_of_splits() -> Result<()> {
        let n = 3000;
        let records = (0..n).map(|x| x as f64).collect::<Array1<_>>();
        let targets = (0..n).map(|x| x % 2).collect::<Array1<usize>>();
        let dataset = Dataset::new(records.insert_axis(Axis(1)), targets.clone());

        let model = DecisionTree::params().fit(&dataset)?;

        assert_eq!(model.max_depth(), n - 1);
        assert_eq!(model.num_leaves(), n);
        assert_eq!(model.iter_nodes().count(), 2 * n - 1);
        assert_eq!(model.predict(&dataset), targets);
        assert_eq!(model.to_string().lines().count(), 2 * n - 1);

        let cloned = model.clone();
        assert_eq!(cloned, model);

        Ok(())
    }

    #[test]
    fn nodes_are_stored_root_first() -> Result<()> {
        let dataset = Dataset::new(array![[1.], [2.], [3.], [4.]], array![0usize, 0, 1, 2]);
        let model = DecisionTree::params().fit(&dataset)?;

        assert_eq!(model.node(0), Some(model.root_node()));
        for node in model.iter_nodes() {
            for child in node.children() {
                assert!(model.node(child).is_some());
            }
        }
        assert_eq!(model.children(model.root_node()).len(), 2);
        assert!(model.node(model.iter_nodes().count()).is_none());

        Ok(())
    }

    #[test]
    fn pure_dataset_is_a_leaf() -> Result<()> {
        let dataset = Dataset::new(array![[1., 5.], [2., 6.], [3., 7.]], array![4usize, 4, 4]);
        let model = DecisionTree::params().fit(&dataset)?;

        assert!(model.root_node().is_leaf());
        assert_eq!(model.max_depth(), 0);
        assert_eq!(model.features(), Vec::<usize>::new());

        Ok(())
    }

    #[test]
    /// Identical records with different labels cannot be separated
    fn inseparable_rows_end_in_majority_leaf() -> Result<()> {
        let dataset = Dataset::new(
            array![[1.], [1.], [1.], [2.]],
            array![3usize, 1, 1, 2],
        );
        let model = DecisionTree::params().fit(&dataset)?;

        let children = model.children(model.root_node());
        assert_eq!(children[1].prediction(), Some(&1));
        assert_eq!(children[1].rows().unwrap().nsamples(), 3);

        Ok(())
    }

    #[test]
    fn restricted_features() -> Result<()> {
        let dataset = Dataset::new(
            array![[1., 1.], [1., 1.], [2., 2.], [2., 2.]],
            array![0usize, 0, 1, 1],
        )
        .with_feature_names(vec!["a", "b"]);

        let model = DecisionTree::params().features(vec!["a"]).fit(&dataset)?;
        assert_eq!(model.features(), vec![0]);
        assert_eq!(model.root_node().split().unwrap().feature_name(), "a");

        let result = DecisionTree::<f64, usize>::params()
            .features(vec!["c"])
            .fit(&dataset);
        assert!(matches!(result, Err(Error::MissingFeature(name)) if name == "c"));

        Ok(())
    }

    #[test]
    fn invalid_training_sets() {
        let misaligned = Dataset::new(array![[1.], [2.]], array![0usize, 1, 1]);
        assert!(matches!(
            DecisionTree::params().fit(&misaligned),
            Err(Error::MismatchedShapes(2, 3))
        ));

        let empty = Dataset::new(Array2::<f64>::zeros((0, 2)), Array1::<usize>::zeros(0));
        assert!(matches!(
            DecisionTree::params().fit(&empty),
            Err(Error::EmptyDataset)
        ));
    }

    #[test]
    fn prediction_needs_training_layout() -> Result<()> {
        let dataset = Dataset::new(array![[1., 0.], [2., 0.]], array![0usize, 1]);
        let model = DecisionTree::params().fit(&dataset)?;

        assert!(matches!(
            model.try_predict(&array![[1.], [2.]]),
            Err(Error::MismatchedShapes(2, 1))
        ));
        assert_eq!(model.try_predict(&array![[2., 9.], [0., 9.]])?, array![1, 0]);

        Ok(())
    }

    #[test]
    fn score_checks_lengths() -> Result<()> {
        let dataset = Dataset::new(array![[1.], [2.], [3.], [4.]], array![0usize, 0, 1, 1]);
        let model = DecisionTree::params().fit(&dataset)?;

        assert_abs_diff_eq!(model.score(&array![0, 0, 1, 1], &array![0, 1, 1, 1])?, 0.75);
        assert!(matches!(
            model.score(&array![0, 0, 1], &array![0, 1]),
            Err(Error::MismatchedShapes(3, 2))
        ));
        assert_abs_diff_eq!(model.score_records(&dataset.records, &dataset.targets)?, 1.0);

        Ok(())
    }

    #[test]
    fn render_tree() -> Result<()> {
        let dataset = Dataset::new(
            array![[1.], [1.], [2.], [2.], [3.], [3.]],
            array![0usize, 0, 1, 1, 1, 1],
        )
        .with_feature_names(vec!["alcohol"]);
        let model = DecisionTree::params().fit(&dataset)?;

        assert_eq!(
            model.to_string(),
            "Decision Node: Split at feature `alcohol` with value 2\n\
             Leaf Node: 4 rows, predict 1\n\
             Leaf Node: 2 rows, predict 0\n"
        );

        Ok(())
    }

    #[test]
    /// Small perfectly separable dataset test
    ///
    /// This dataset of three elements is perfectly using the second feature.
    fn perfectly_separable_small() -> Result<()> {
        let data = array![[1., 2., 3.], [1., 2., 4.], [1., 3., 3.5]];
        let targets = array![0, 0, 1];

        let dataset = Dataset::new(data.clone(), targets);
        let model = DecisionTree::params().fit(&dataset)?;

        assert_eq!(model.predict(&data), array![0, 0, 1]);

        Ok(())
    }

    #[test]
    /// Single feature test
    ///
    /// Generate a dataset where a single feature perfectly correlates
    /// with the target while the remaining features are random uniform
    /// noise and do not add any information.
    fn single_feature_random_noise_binary() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(42);

        // generate data with 9 white noise and a single correlated feature
        let mut data = Array::random_using((50, 10), Uniform::new(-4., 4.), &mut rng);
        data.slice_mut(s![.., 8]).assign(
            &(0..50)
                .map(|x| if x < 25 { 0.0 } else { 1.0 })
                .collect::<Array1<_>>(),
        );

        let targets = (0..50).map(|x| x < 25).collect::<Array1<_>>();
        let dataset = Dataset::new(data, targets);

        let model = DecisionTree::params().fit(&dataset)?;

        // we should only use feature index 8 here
        assert_eq!(&model.features(), &[8]);

        // check for perfect accuracy
        let cm = model
            .predict(dataset.records())
            .confusion_matrix(&dataset)?;
        assert_abs_diff_eq!(cm.accuracy(), 1.0, epsilon = 1e-15);

        Ok(())
    }

    #[test]
    /// Small toy dataset from scikit-sklearn
    fn toy_dataset() -> Result<()> {
        let data = array![
            [0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 1.0, -14.0, 0.0, -4.0, 0.0, 0.0, 0.0, 0.0,],
            [0.0, 0.0, 5.0, 3.0, 0.0, -4.0, 0.0, 0.0, 1.0, -5.0, 0.2, 0.0, 4.0, 1.0,],
            [-1.0, -1.0, 0.0, 0.0, -4.5, 0.0, 0.0, 2.1, 1.0, 0.0, 0.0, -4.5, 0.0, 1.0,],
            [-1.0, -1.0, 0.0, -1.2, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.2, 0.0, 0.0, 1.0,],
            [-1.0, -1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0,],
            [-1.0, -2.0, 0.0, 4.0, -3.0, 10.0, 4.0, 0.0, -3.2, 0.0, 4.0, 3.0, -4.0, 1.0,],
            [2.11, 0.0, -6.0, -0.5, 0.0, 11.0, 0.0, 0.0, -3.2, 6.0, 0.5, 0.0, -3.0, 1.0,],
            [2.11, 0.0, -6.0, -0.5, 0.0, 11.0, 0.0, 0.0, -3.2, 6.0, 0.0, 0.0, -2.0, 1.0,],
            [2.11, 8.0, -6.0, -0.5, 0.0, 11.0, 0.0, 0.0, -3.2, 6.0, 0.0, 0.0, -2.0, 1.0,],
            [2.11, 8.0, -6.0, -0.5, 0.0, 11.0, 0.0, 0.0, -3.2, 6.0, 0.5, 0.0, -1.0, 0.0,],
            [2.0, 8.0, 5.0, 1.0, 0.5, -4.0, 10.0, 0.0, 1.0, -5.0, 3.0, 0.0, 2.0, 0.0,],
            [2.0, 0.0, 1.0, 1.0, 1.0, -1.0, 1.0, 0.0, 0.0, -2.0, 3.0, 0.0, 1.0, 0.0,],
            [2.0, 0.0, 1.0, 2.0, 3.0, -1.0, 10.0, 2.0, 0.0, -1.0, 1.0, 2.0, 2.0, 0.0,],
            [1.0, 1.0, 0.0, 2.0, 2.0, -1.0, 1.0, 2.0, 0.0, -5.0, 1.0, 2.0, 3.0, 0.0,],
            [3.0, 1.0, 0.0, 3.0, 0.0, -4.0, 10.0, 0.0, 1.0, -5.0, 3.0, 0.0, 3.0, 1.0,],
            [2.11, 8.0, -6.0, -0.5, 0.0, 1.0, 0.0, 0.0, -3.2, 6.0, 0.5, 0.0, -3.0, 1.0,],
            [2.11, 8.0, -6.0, -0.5, 0.0, 1.0, 0.0, 0.0, -3.2, 6.0, 1.5, 1.0, -1.0, -1.0,],
            [2.11, 8.0, -6.0, -0.5, 0.0, 10.0, 0.0, 0.0, -3.2, 6.0, 0.5, 0.0, -1.0, -1.0,],
            [2.0, 0.0, 5.0, 1.0, 0.5, -2.0, 10.0, 0.0, 1.0, -5.0, 3.0, 1.0, 0.0, -1.0,],
            [2.0, 0.0, 1.0, 1.0, 1.0, -2.0, 1.0, 0.0, 0.0, -2.0, 0.0, 0.0, 0.0, 1.0,],
            [2.0, 1.0, 1.0, 1.0, 2.0, -1.0, 10.0, 2.0, 0.0, -1.0, 0.0, 2.0, 1.0, 1.0,],
            [1.0, 1.0, 0.0, 0.0, 1.0, -3.0, 1.0, 2.0, 0.0, -5.0, 1.0, 2.0, 1.0, 1.0,],
            [3.0, 1.0, 0.0, 1.0, 0.0, -4.0, 1.0, 0.0, 1.0, -2.0, 0.0, 0.0, 1.0, 0.0,]
        ];

        let targets = array![1, 1, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0];

        let dataset = Dataset::new(data, targets);
        let model = DecisionTree::params().fit(&dataset)?;
        let prediction = model.predict(&dataset);

        let cm = prediction.confusion_matrix(&dataset)?;
        assert!(cm.accuracy() > 0.95);

        Ok(())
    }

    #[test]
    /// Multilabel classification
    fn multilabel_four_uniform() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut data = Array2::random_using((40, 2), Uniform::new(-1., 1.), &mut rng);

        data.outer_iter_mut().enumerate().for_each(|(i, mut p)| {
            if i < 10 {
                p += &array![-2., -2.]
            } else if i < 20 {
                p += &array![-2., 2.];
            } else if i < 30 {
                p += &array![2., -2.];
            } else {
                p += &array![2., 2.];
            }
        });

        let targets = (0..40)
            .map(|x| match x {
                x if x < 10 => 0,
                x if x < 20 => 1,
                x if x < 30 => 2,
                _ => 3,
            })
            .collect::<Array1<usize>>();

        let dataset = Dataset::new(data.clone(), targets);

        let model = DecisionTree::params().fit(&dataset)?;
        let prediction = model.predict(&data);

        let cm = prediction.confusion_matrix(&dataset)?;
        assert_abs_diff_eq!(
            cm.precision(),
            Array::ones(4),
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(cm.recall(), Array::ones(4), epsilon = 1e-5);
        assert_eq!(model.num_leaves(), 4);

        Ok(())
    }

    #[test]
    fn params_check_before_fit() {
        let params = DecisionTree::<f64, usize>::params().features(Vec::<&str>::new());
        assert!(params.check_ref().is_err());

        let dataset = Dataset::new(array![[1.], [2.]], array![0usize, 1]);
        assert!(matches!(params.fit(&dataset), Err(Error::Parameters(_))));
    }
}
