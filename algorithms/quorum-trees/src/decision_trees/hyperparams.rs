use quorum::{
    error::{Error, Result},
    Float, Label, ParamGuard,
};
use std::marker::PhantomData;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::DecisionTree;

/// The set of hyperparameters that can be specified for fitting a
/// [decision tree](struct.DecisionTree.html).
///
/// The tree is always grown until every leaf is pure or no split improves the Gini impurity, so
/// the only knob is the set of features the split search may look at.
///
/// ### Example
///
/// ```rust
/// use quorum_trees::DecisionTree;
/// use quorum::prelude::*;
/// use ndarray::array;
///
/// let dataset = Dataset::new(
///     array![[1., 7.], [1., 3.], [2., 5.], [2., 1.], [3., 8.], [3., 2.]],
///     array![0usize, 0, 1, 1, 1, 1],
/// )
/// .with_feature_names(vec!["alcohol", "sulphates"]);
///
/// // Only split on the first column
/// let tree = DecisionTree::params()
///     .features(vec!["alcohol"])
///     .fit(&dataset)
///     .unwrap();
///
/// assert_eq!(tree.features(), vec![0]);
/// assert_eq!(tree.predict(&dataset), dataset.targets);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionTreeValidParams<F, L> {
    features: Option<Vec<String>>,

    phantom: PhantomData<(F, L)>,
}

impl<F: Float, L> DecisionTreeValidParams<F, L> {
    /// Names of the features the split search is restricted to, `None` for all columns
    pub fn features(&self) -> Option<&[String]> {
        self.features.as_deref()
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionTreeParams<F, L>(DecisionTreeValidParams<F, L>);

impl<F: Float, L: Label> DecisionTreeParams<F, L> {
    pub fn new() -> Self {
        Self(DecisionTreeValidParams {
            features: None,
            phantom: PhantomData,
        })
    }

    /// Restrict the split search to the named features
    ///
    /// Rows keep every column; the names are resolved against the feature names of the training
    /// set when fitting.
    pub fn features<I: Into<String>>(mut self, features: Vec<I>) -> Self {
        self.0.features = Some(features.into_iter().map(|x| x.into()).collect());
        self
    }

    /// Lift a restriction set by [`features`](Self::features)
    pub fn all_features(mut self) -> Self {
        self.0.features = None;
        self
    }
}

impl<F: Float, L: Label> Default for DecisionTreeParams<F, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, L: Label> DecisionTree<F, L> {
    /// Defaults are provided if the optional parameters are not specified:
    /// * `features = None`
    // Violates the convention that new should return a value of type `Self`
    #[allow(clippy::new_ret_no_self)]
    pub fn params() -> DecisionTreeParams<F, L> {
        DecisionTreeParams::new()
    }
}

impl<F: Float, L> ParamGuard for DecisionTreeParams<F, L> {
    type Checked = DecisionTreeValidParams<F, L>;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        match &self.0.features {
            Some(features) if features.is_empty() => Err(Error::Parameters(
                "the feature restriction should name at least one feature".to_string(),
            )),
            _ => Ok(&self.0),
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
