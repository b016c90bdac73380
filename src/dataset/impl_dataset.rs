use super::{AsTargets, Dataset, DatasetBase, DatasetView, Records};
use crate::error::{Error, Result};
use crate::traits::{Predict, PredictInplace};
use ndarray::{Array1, ArrayBase, Axis, Data, Ix1, Ix2};
use rand::{seq::index::sample, Rng};

/// Share of the rows held out by `train_test_split` when no positive size is given
const DEFAULT_TEST_RATIO: f64 = 0.3;

/// Implementation without constraints on records and targets
///
/// This implementation block provides methods for the creation and mutation of datasets. This
/// includes swapping the targets, return the records etc.
impl<R: Records, S> DatasetBase<R, S> {
    /// Create a new dataset from records and targets
    ///
    /// # Example
    ///
    /// ```ignore
    /// let dataset = Dataset::new(records, targets);
    /// ```
    pub fn new(records: R, targets: S) -> DatasetBase<R, S> {
        DatasetBase {
            records,
            targets,
            feature_names: Vec::new(),
        }
    }

    /// Returns reference to targets
    pub fn targets(&self) -> &S {
        &self.targets
    }

    /// Returns reference to records
    pub fn records(&self) -> &R {
        &self.records
    }

    /// Returns feature names
    ///
    /// A feature name gives a human-readable string describing the purpose of a single feature.
    /// Trees print it next to their splits and feature restrictions refer to it. Datasets
    /// without explicit names report
    /// `feature-0`, `feature-1`, and so on.
    pub fn feature_names(&self) -> Vec<String> {
        if !self.feature_names.is_empty() {
            self.feature_names.clone()
        } else {
            (0..self.records.nfeatures())
                .map(|idx| format!("feature-{}", idx))
                .collect()
        }
    }

    /// Updates the feature names of a dataset
    pub fn with_feature_names<I: Into<String>>(mut self, names: Vec<I>) -> DatasetBase<R, S> {
        let feature_names = names.into_iter().map(|x| x.into()).collect();

        self.feature_names = feature_names;

        self
    }

    /// Return the column index of a named feature
    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.feature_names().iter().position(|x| x == name)
    }
}

impl<L, R: Records, T: AsTargets<Elem = L>> DatasetBase<R, T> {
    /// Verify that records, targets and feature names describe the same table
    ///
    /// Every label must belong to exactly one record and every column needs a name, otherwise
    /// `Error::MismatchedShapes` is returned with the expected and the actual length.
    pub fn ensure_aligned(&self) -> Result<()> {
        let ntargets = self.targets.as_targets().len();
        if ntargets != self.records.nsamples() {
            return Err(Error::MismatchedShapes(self.records.nsamples(), ntargets));
        }

        if !self.feature_names.is_empty() && self.feature_names.len() != self.records.nfeatures()
        {
            return Err(Error::MismatchedShapes(
                self.records.nfeatures(),
                self.feature_names.len(),
            ));
        }

        Ok(())
    }
}

impl<F: Clone, L: Clone, D, T> DatasetBase<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>>
where
    D: Data<Elem = F>,
    T: Data<Elem = L>,
{
    /// Creates a view of a dataset
    pub fn view(&self) -> DatasetView<'_, F, L> {
        DatasetBase {
            records: self.records.view(),
            targets: self.targets.view(),
            feature_names: self.feature_names.clone(),
        }
    }

    /// Copy the rows at `indices` into a new dataset, in the given order
    pub fn select(&self, indices: &[usize]) -> Dataset<F, L> {
        DatasetBase {
            records: self.records.select(Axis(0), indices),
            targets: self.targets.select(Axis(0), indices),
            feature_names: self.feature_names.clone(),
        }
    }

    /// Hold out a random test set
    ///
    /// `test_size` is interpreted like this:
    ///
    /// * `test_size <= 0`: 30% of the rows
    /// * `0 < test_size < 1`: that fraction of the rows
    /// * `test_size >= 1`: an absolute number of rows
    ///
    /// Every size is rounded down. Test rows are sampled without replacement and returned in
    /// sampling order; the training rows keep their original order. Returns `(train, test)`.
    pub fn train_test_split<G: Rng>(
        &self,
        test_size: f64,
        rng: &mut G,
    ) -> Result<(Dataset<F, L>, Dataset<F, L>)> {
        let nsamples = self.nsamples();
        let ntest = if test_size <= 0.0 {
            (nsamples as f64 * DEFAULT_TEST_RATIO).floor() as usize
        } else if test_size < 1.0 {
            (nsamples as f64 * test_size).floor() as usize
        } else {
            test_size.floor() as usize
        };

        if ntest > nsamples {
            return Err(Error::Parameters(format!(
                "test size {} exceeds the number of samples {}",
                ntest, nsamples
            )));
        }

        let test_indices = sample(rng, nsamples, ntest).into_vec();
        let mut held_out = vec![false; nsamples];
        for &idx in &test_indices {
            held_out[idx] = true;
        }
        let train_indices = (0..nsamples).filter(|&i| !held_out[i]).collect::<Vec<_>>();

        Ok((self.select(&train_indices), self.select(&test_indices)))
    }
}

impl<F, L, D: Data<Elem = F>> From<(ArrayBase<D, Ix2>, Array1<L>)>
    for DatasetBase<ArrayBase<D, Ix2>, Array1<L>>
{
    fn from(rec_tar: (ArrayBase<D, Ix2>, Array1<L>)) -> Self {
        DatasetBase::new(rec_tar.0, rec_tar.1)
    }
}

impl<'a, F, D, T, O> Predict<&'a ArrayBase<D, Ix2>, T> for O
where
    D: Data<Elem = F>,
    O: PredictInplace<ArrayBase<D, Ix2>, T>,
{
    fn predict(&self, records: &'a ArrayBase<D, Ix2>) -> T {
        let mut targets = self.default_target(records);
        self.predict_inplace(records, &mut targets);
        targets
    }
}

impl<F, D, T, O> Predict<ArrayBase<D, Ix2>, T> for O
where
    D: Data<Elem = F>,
    O: PredictInplace<ArrayBase<D, Ix2>, T>,
{
    fn predict(&self, records: ArrayBase<D, Ix2>) -> T {
        let mut targets = self.default_target(&records);
        self.predict_inplace(&records, &mut targets);
        targets
    }
}

impl<'a, F, R, T, S, O> Predict<&'a DatasetBase<R, T>, S> for O
where
    R: Records<Elem = F>,
    O: PredictInplace<R, S>,
{
    fn predict(&self, ds: &'a DatasetBase<R, T>) -> S {
        let mut targets = self.default_target(&ds.records);
        self.predict_inplace(&ds.records, &mut targets);
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};
    use rand::{rngs::SmallRng, SeedableRng};

    fn linspace_dataset(n: usize) -> Dataset<f64, usize> {
        let records = Array2::from_shape_fn((n, 2), |(i, j)| (i * 2 + j) as f64);
        let targets = (0..n).collect::<Array1<usize>>();
        Dataset::new(records, targets)
    }

    #[test]
    fn default_feature_names() {
        let dataset = linspace_dataset(3);
        assert_eq!(dataset.feature_names(), vec!["feature-0", "feature-1"]);
        assert_eq!(dataset.feature_index("feature-1"), Some(1));

        let dataset = dataset.with_feature_names(vec!["alcohol", "pH"]);
        assert_eq!(dataset.feature_names(), vec!["alcohol", "pH"]);
        assert_eq!(dataset.feature_index("pH"), Some(1));
        assert_eq!(dataset.feature_index("feature-1"), None);
    }

    #[test]
    fn alignment_is_checked() {
        let dataset = Dataset::new(array![[1., 2.], [3., 4.]], array![0usize, 1, 2]);
        assert!(matches!(
            dataset.ensure_aligned(),
            Err(Error::MismatchedShapes(2, 3))
        ));

        let dataset =
            Dataset::new(array![[1., 2.], [3., 4.]], array![0usize, 1]).with_feature_names(vec!["a"]);
        assert!(matches!(
            dataset.ensure_aligned(),
            Err(Error::MismatchedShapes(2, 1))
        ));

        assert!(linspace_dataset(4).ensure_aligned().is_ok());
    }

    #[test]
    fn train_test_split_sizes() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(42);
        let dataset = linspace_dataset(20);

        // non-positive sizes fall back to 30%
        let (train, test) = dataset.train_test_split(0.0, &mut rng)?;
        assert_eq!((train.nsamples(), test.nsamples()), (14, 6));
        let (train, test) = dataset.train_test_split(-3.0, &mut rng)?;
        assert_eq!((train.nsamples(), test.nsamples()), (14, 6));

        // fractions are rounded down
        let (train, test) = dataset.train_test_split(0.25, &mut rng)?;
        assert_eq!((train.nsamples(), test.nsamples()), (15, 5));

        // absolute counts
        let (train, test) = dataset.train_test_split(7.9, &mut rng)?;
        assert_eq!((train.nsamples(), test.nsamples()), (13, 7));

        assert!(dataset.train_test_split(21.0, &mut rng).is_err());

        Ok(())
    }

    #[test]
    fn train_test_split_is_disjoint() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(7);
        let dataset = linspace_dataset(30);
        let (train, test) = dataset.train_test_split(0.5, &mut rng)?;

        let mut seen = train
            .targets()
            .iter()
            .chain(test.targets().iter())
            .cloned()
            .collect::<Vec<_>>();
        seen.sort_unstable();
        assert_eq!(seen, (0..30).collect::<Vec<_>>());

        // training rows keep their relative order
        let train_targets = train.targets().to_vec();
        let mut sorted = train_targets.clone();
        sorted.sort_unstable();
        assert_eq!(train_targets, sorted);

        // records travel with their labels
        for (record, target) in test.sample_iter() {
            assert_eq!(record[0] as usize, target * 2);
        }

        Ok(())
    }
}
