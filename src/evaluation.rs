//! K-fold evaluation
//!
//! Estimates how well a training procedure generalizes by splitting a dataset into random folds,
//! training on all folds but one and scoring the predictions on the held-out fold.
use ndarray::{ArrayBase, ArrayView2, Data, Ix1, Ix2};
use rand::{seq::index::sample, Rng};
use tracing::{debug, instrument};

use crate::dataset::{Dataset, DatasetBase, Records};
use crate::error::{Error, Result};

fn fold_indices<G: Rng>(nsamples: usize, n_folds: usize, rng: &mut G) -> Result<Vec<Vec<usize>>> {
    if n_folds == 0 {
        return Err(Error::Parameters("number of folds must be positive".into()));
    }
    if n_folds > nsamples {
        return Err(Error::Parameters(format!(
            "cannot build {} folds from {} samples",
            n_folds, nsamples
        )));
    }

    let fold_size = nsamples / n_folds;
    let drawn = sample(rng, nsamples, fold_size * n_folds).into_vec();

    Ok(drawn.chunks(fold_size).map(|x| x.to_vec()).collect())
}

/// Split a dataset into `n_folds` random folds
///
/// Every fold holds `nsamples / n_folds` rows, drawn without replacement. Rows left over by the
/// integer division are not part of any fold.
///
/// # Errors
///
/// Returns `Error::Parameters` if `n_folds` is zero or larger than the number of samples.
pub fn cross_validation_split<F, L, D, T, G>(
    dataset: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>>,
    n_folds: usize,
    rng: &mut G,
) -> Result<Vec<Dataset<F, L>>>
where
    F: Clone,
    L: Clone,
    D: Data<Elem = F>,
    T: Data<Elem = L>,
    G: Rng,
{
    let folds = fold_indices(dataset.nsamples(), n_folds, rng)?;

    Ok(folds.iter().map(|fold| dataset.select(fold)).collect())
}

/// Classification accuracy in percent
///
/// # Errors
///
/// Returns `Error::MismatchedShapes` if both columns differ in length and `Error::EmptyDataset`
/// if they contain no labels.
pub fn accuracy_metric<L, D, E>(
    actual: &ArrayBase<D, Ix1>,
    predicted: &ArrayBase<E, Ix1>,
) -> Result<f64>
where
    L: PartialEq,
    D: Data<Elem = L>,
    E: Data<Elem = L>,
{
    if actual.len() != predicted.len() {
        return Err(Error::MismatchedShapes(actual.len(), predicted.len()));
    }
    if actual.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let correct = actual
        .iter()
        .zip(predicted.iter())
        .filter(|(a, b)| a == b)
        .count();

    Ok(correct as f64 / actual.len() as f64 * 100.0)
}

/// Evaluate a training procedure with k-fold cross validation
///
/// The dataset is split with [`cross_validation_split`]. For every fold the `algorithm` receives
/// the union of the remaining folds as training set and the records of the held-out fold. Its
/// predictions are scored with [`accuracy_metric`] against the labels of the held-out fold.
///
/// Returns one accuracy percentage per fold, in fold order.
///
/// # Example
///
/// ```
/// use ndarray::{array, Array1};
/// use quorum::evaluation::evaluate_algorithm;
/// use quorum::Dataset;
/// use rand::{rngs::SmallRng, SeedableRng};
///
/// let dataset = Dataset::new(
///     array![[1.], [2.], [3.], [4.], [5.], [6.]],
///     array![0usize, 0, 0, 1, 1, 1],
/// );
/// let mut rng = SmallRng::seed_from_u64(42);
///
/// // a baseline which always predicts the first training label
/// let scores = evaluate_algorithm(&dataset, 3, &mut rng, |train, test| {
///     Ok::<_, quorum::Error>(Array1::from_elem(test.nrows(), train.targets()[0]))
/// })
/// .unwrap();
///
/// assert_eq!(scores.len(), 3);
/// assert!(scores.iter().all(|x| (0.0..=100.0).contains(x)));
/// ```
#[instrument(skip_all, fields(n_folds = n_folds, n_samples = dataset.nsamples()))]
pub fn evaluate_algorithm<F, L, D, T, G, A, P, E>(
    dataset: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>>,
    n_folds: usize,
    rng: &mut G,
    mut algorithm: A,
) -> std::result::Result<Vec<f64>, E>
where
    F: Clone,
    L: Clone + PartialEq,
    D: Data<Elem = F>,
    T: Data<Elem = L>,
    G: Rng,
    A: FnMut(&Dataset<F, L>, ArrayView2<F>) -> std::result::Result<ArrayBase<P, Ix1>, E>,
    P: Data<Elem = L>,
    E: From<Error>,
{
    let folds = fold_indices(dataset.nsamples(), n_folds, rng)?;
    let mut scores = Vec::with_capacity(folds.len());

    for (i, fold) in folds.iter().enumerate() {
        let train_indices = folds
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .flat_map(|(_, other)| other.iter().cloned())
            .collect::<Vec<_>>();

        let train = dataset.select(&train_indices);
        let test = dataset.select(fold);

        let predicted = algorithm(&train, test.records.view())?;
        let score = accuracy_metric(&test.targets, &predicted)?;

        debug!(fold = i, score, "evaluated fold");
        scores.push(score);
    }

    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1, Array2};
    use rand::{rngs::SmallRng, SeedableRng};

    fn counting_dataset(n: usize) -> Dataset<f64, usize> {
        let records = Array2::from_shape_fn((n, 1), |(i, _)| i as f64);
        Dataset::new(records, (0..n).collect::<Array1<_>>())
    }

    #[test]
    fn folds_are_disjoint_and_truncated() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(42);
        let folds = cross_validation_split(&counting_dataset(11), 3, &mut rng)?;

        assert_eq!(folds.len(), 3);
        assert!(folds.iter().all(|x| x.nsamples() == 3));

        let mut seen = folds
            .iter()
            .flat_map(|x| x.targets().to_vec())
            .collect::<Vec<_>>();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 9);

        Ok(())
    }

    #[test]
    fn invalid_fold_counts() {
        let mut rng = SmallRng::seed_from_u64(42);
        let dataset = counting_dataset(4);

        assert!(matches!(
            cross_validation_split(&dataset, 0, &mut rng),
            Err(Error::Parameters(_))
        ));
        assert!(matches!(
            cross_validation_split(&dataset, 5, &mut rng),
            Err(Error::Parameters(_))
        ));
        assert!(cross_validation_split(&dataset, 4, &mut rng).is_ok());
    }

    #[test]
    fn accuracy_in_percent() -> Result<()> {
        let actual = array![0, 1, 1, 0];
        assert_abs_diff_eq!(accuracy_metric(&actual, &array![0, 1, 0, 0])?, 75.0);
        assert_abs_diff_eq!(accuracy_metric(&actual, &actual)?, 100.0);
        assert_abs_diff_eq!(accuracy_metric(&actual, &array![1, 0, 0, 1])?, 0.0);

        assert!(matches!(
            accuracy_metric(&actual, &array![0, 1]),
            Err(Error::MismatchedShapes(4, 2))
        ));
        let empty: Array1<usize> = Array1::from(vec![]);
        assert!(matches!(
            accuracy_metric(&empty, &empty),
            Err(Error::EmptyDataset)
        ));

        Ok(())
    }

    #[test]
    fn training_set_excludes_held_out_fold() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(3);
        let dataset = counting_dataset(12);

        // predicting the record value itself is always correct
        let scores = evaluate_algorithm(&dataset, 4, &mut rng, |train, test| {
            assert_eq!(train.nsamples(), 9);
            assert_eq!(test.nrows(), 3);
            for row in test.rows() {
                assert!(train.records().iter().all(|x| *x != row[0]));
            }

            Ok::<_, Error>(test.column(0).mapv(|x| x as usize))
        })?;

        assert_eq!(scores, vec![100.0; 4]);

        Ok(())
    }

    #[test]
    fn algorithm_errors_are_forwarded() {
        let mut rng = SmallRng::seed_from_u64(3);
        let result = evaluate_algorithm(&counting_dataset(6), 2, &mut rng, |_, _| {
            Err::<Array1<usize>, _>(Error::Parameters("no model".to_string()))
        });

        assert!(matches!(result, Err(Error::Parameters(msg)) if msg == "no model"));
    }
}
