use ndarray::{Array1, ArrayBase, ArrayView1, Axis, Data, Ix1, Ix2};
use quorum::dataset::{count_in_order, AsTargets, DatasetBase, Records};
use quorum::traits::{Fit, PredictInplace};
use quorum::{Error, Float, Label, ParamGuard};
use tracing::{debug, info, instrument};

use crate::error::{NaiveBayesError, Result};
use crate::hyperparams::{GaussianNbValidParams, ZeroVariance};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Gaussian density of `x` for a normal distribution with `mean` and `stdev`
///
/// `exp(-(x - mean)² / (2 stdev²)) / (sqrt(2π) stdev)`
///
/// A standard deviation of zero describes a point mass: the density is one if `x` equals the mean
/// and zero otherwise.
///
/// ```rust
/// use quorum_bayes::calculate_probability;
///
/// let p: f64 = calculate_probability(1.0, 1.0, 1.0);
/// assert!((p - 0.3989422804014327).abs() < 1e-12);
///
/// assert_eq!(calculate_probability(2.0, 2.0, 0.0), 1.0);
/// assert_eq!(calculate_probability(2.5, 2.0, 0.0), 0.0);
/// ```
pub fn calculate_probability<F: Float>(x: F, mean: F, stdev: F) -> F {
    if stdev == F::zero() {
        return if x == mean { F::one() } else { F::zero() };
    }

    let two = F::cast(2.0);
    let exponent = (-(x - mean).powi(2) / (two * stdev.powi(2))).exp();

    exponent / ((two * F::cast(std::f64::consts::PI)).sqrt() * stdev)
}

/// Summarize `dataset` by class with the default parameters
///
/// Shorthand for `GaussianNb::params().fit(dataset)`.
pub fn summarize_by_class<F, L, D, T>(
    dataset: &DatasetBase<ArrayBase<D, Ix2>, T>,
) -> Result<GaussianNb<F, L>>
where
    F: Float,
    L: Label,
    D: Data<Elem = F>,
    T: AsTargets<Elem = L>,
{
    GaussianNb::<F, L>::params().check()?.fit(dataset)
}

/// Fit a model on `train` and predict every row of `test`
///
/// This is the shape of algorithm expected by
/// [`evaluate_algorithm`](quorum::evaluation::evaluate_algorithm).
pub fn naive_bayes<F, L, D, T, E>(
    train: &DatasetBase<ArrayBase<D, Ix2>, T>,
    test: &ArrayBase<E, Ix2>,
) -> Result<Array1<L>>
where
    F: Float,
    L: Label + Default,
    D: Data<Elem = F>,
    T: AsTargets<Elem = L>,
    E: Data<Elem = F>,
{
    summarize_by_class(train)?.try_predict(test)
}

/// Mean, standard deviation and number of values of one feature within one class
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureSummary<F> {
    pub mean: F,
    /// Sample standard deviation with divisor `n - 1`, zero for a single value
    pub stdev: F,
    pub count: usize,
}

impl<F: Float> FeatureSummary<F> {
    fn from_column<D: Data<Elem = F>>(column: &ArrayBase<D, Ix1>) -> Self {
        let count = column.len();
        let mean = column.sum() / F::cast(count);

        let stdev = if count > 1 {
            let squares = column.iter().map(|x| (*x - mean).powi(2)).sum::<F>();
            (squares / F::cast(count - 1)).sqrt()
        } else {
            F::zero()
        };

        FeatureSummary { mean, stdev, count }
    }

    /// Density of `x` under this summary
    pub fn density(&self, x: F) -> F {
        calculate_probability(x, self.mean, self.stdev)
    }
}

/// Summaries of every feature for the rows of a single class
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct ClassSummary<F, L> {
    label: L,
    count: usize,
    features: Vec<FeatureSummary<F>>,
}

impl<F: Float, L: Label> ClassSummary<F, L> {
    pub fn label(&self) -> &L {
        &self.label
    }

    /// Number of training rows of this class
    pub fn count(&self) -> usize {
        self.count
    }

    /// One summary per feature, in column order
    pub fn features(&self) -> &[FeatureSummary<F>] {
        &self.features
    }
}

impl<F, L, D, T> Fit<ArrayBase<D, Ix2>, T, NaiveBayesError> for GaussianNbValidParams<F, L>
where
    F: Float,
    L: Label,
    D: Data<Elem = F>,
    T: AsTargets<Elem = L>,
{
    type Object = GaussianNb<F, L>;

    #[instrument(skip_all, fields(n_samples = dataset.nsamples(), n_features = dataset.nfeatures()))]
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        dataset.ensure_aligned()?;
        if dataset.nsamples() == 0 {
            return Err(Error::EmptyDataset.into());
        }

        let x = dataset.records();
        let y = dataset.targets.as_targets();
        let feature_names = dataset.feature_names();

        let classes = count_in_order(y.iter())
            .into_iter()
            .map(|(label, count)| {
                // We filter for records that correspond to the current class
                let rows = y
                    .iter()
                    .enumerate()
                    .filter(|(_, target)| **target == label)
                    .map(|(i, _)| i)
                    .collect::<Vec<_>>();
                let xclass = x.select(Axis(0), &rows);

                let features = xclass
                    .columns()
                    .into_iter()
                    .map(|column| FeatureSummary::from_column(&column))
                    .collect::<Vec<_>>();

                if self.zero_variance() == ZeroVariance::Reject {
                    if let Some(idx) = features.iter().position(|f| f.stdev == F::zero()) {
                        return Err(NaiveBayesError::ZeroVariance {
                            feature: feature_names[idx].clone(),
                            class: format!("{:?}", label),
                        });
                    }
                }

                debug!(class = ?label, count, "summarized class");

                Ok(ClassSummary {
                    label,
                    count,
                    features,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!(n_classes = classes.len(), "fitted gaussian naive bayes");

        Ok(GaussianNb {
            classes,
            feature_names,
        })
    }
}

/// Fitted Gaussian naive Bayes classifier
///
/// See [`GaussianNbParams`](crate::GaussianNbParams) for the hyper-parameters.
///
/// # Model assumptions
///
/// The family of naive Bayes classifiers assume independence between variables. They do not model
/// moments between variables and lack therefore in modelling capability. The advantage is a linear
/// fitting time with maximum-likelihood training in a closed form.
///
/// # Model usage example
///
/// ```rust
/// use quorum::prelude::*;
/// use quorum_bayes::{GaussianNb, Result};
/// use ndarray::array;
///
/// let x = array![
///     [-2., -1.],
///     [-1., -1.],
///     [-1., -2.],
///     [1., 1.],
///     [1., 2.],
///     [2., 1.]
/// ];
/// let y = array![1usize, 1, 1, 2, 2, 2];
/// let ds = DatasetView::new(x.view(), y.view());
///
/// let model = GaussianNb::params().fit(&ds)?;
/// let pred = model.predict(&x);
///
/// assert_eq!(pred, y);
/// # Result::Ok(())
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianNb<F, L> {
    classes: Vec<ClassSummary<F, L>>,
    feature_names: Vec<String>,
}

impl<F: Float, L: Label> GaussianNb<F, L> {
    /// Class summaries in order of first appearance in the training set
    pub fn classes(&self) -> &[ClassSummary<F, L>] {
        &self.classes
    }

    /// Return the number of features of the training set
    pub fn num_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Return the feature names of the training set
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Unnormalized score of every class for a single row
    ///
    /// The score of a class is its share of the training rows times the product of the densities
    /// of all values in `row`. Classes are returned in the order of [`classes`](Self::classes).
    pub fn calculate_class_probabilities<D: Data<Elem = F>>(
        &self,
        row: &ArrayBase<D, Ix1>,
    ) -> Result<Vec<(L, F)>> {
        self.check_row(row.len())?;

        Ok(self
            .classes
            .iter()
            .zip(self.scores(row.view()))
            .map(|(class, score)| (class.label.clone(), score))
            .collect())
    }

    /// Predict the class with the highest score, the first class wins ties
    pub fn predict_row<D: Data<Elem = F>>(&self, row: &ArrayBase<D, Ix1>) -> Result<L> {
        self.check_row(row.len())?;

        self.best_class(row.view())
            .cloned()
            .ok_or_else(|| Error::EmptyDataset.into())
    }

    fn check_row(&self, n_values: usize) -> Result<()> {
        if n_values != self.num_features() {
            return Err(NaiveBayesError::FeatureCount {
                expected: self.num_features(),
                actual: n_values,
            });
        }

        Ok(())
    }

    fn scores(&self, row: ArrayView1<F>) -> Vec<F> {
        let total = F::cast(self.classes.iter().map(|x| x.count).sum::<usize>());

        self.classes
            .iter()
            .map(|class| {
                let prior = F::cast(class.count) / total;
                let likelihood = class
                    .features
                    .iter()
                    .zip(row.iter())
                    .fold(F::one(), |acc, (summary, x)| acc * summary.density(*x));

                prior * likelihood
            })
            .collect()
    }

    fn best_class(&self, row: ArrayView1<F>) -> Option<&L> {
        let mut best: Option<(&L, F)> = None;

        for (class, score) in self.classes.iter().zip(self.scores(row)) {
            let better = match best {
                None => true,
                Some((_, best_score)) => score > best_score,
            };
            if better {
                best = Some((&class.label, score));
            }
        }

        best.map(|(label, _)| label)
    }
}

impl<F: Float, L: Label + Default> GaussianNb<F, L> {
    /// Predict every row of `x`
    ///
    /// Fails with `NaiveBayesError::FeatureCount` if `x` has a different number of columns than
    /// the training table.
    pub fn try_predict<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array1<L>> {
        self.check_row(x.ncols())?;

        let mut y = self.default_target(x);
        self.predict_inplace(x, &mut y);

        Ok(y)
    }
}

impl<F: Float, L: Label + Default, D> PredictInplace<ArrayBase<D, Ix2>, Array1<L>>
    for GaussianNb<F, L>
where
    D: Data<Elem = F>,
{
    fn predict_inplace(&self, x: &ArrayBase<D, Ix2>, y: &mut Array1<L>) {
        assert_eq!(
            x.nrows(),
            y.len(),
            "The number of data points must match the number of output targets."
        );
        assert_eq!(
            x.ncols(),
            self.num_features(),
            "The number of features must match the training set."
        );

        for (row, target) in x.rows().into_iter().zip(y.iter_mut()) {
            if let Some(label) = self.best_class(row) {
                *target = label.clone();
            }
        }
    }

    fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array1<L> {
        Array1::default(x.nrows())
    }
}
