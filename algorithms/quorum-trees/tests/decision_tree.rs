use approx::assert_abs_diff_eq;
use ndarray::{array, Array2};
use quorum::prelude::*;
use quorum_datasets::generate::labeled_blobs;
use quorum_trees::DecisionTree;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn blobs_decision_tree_high_accuracy() {
    let mut rng = SmallRng::seed_from_u64(42);
    let centroids = array![[-10., -10.], [10., 10.], [-10., 10.], [10., -10.]];
    let dataset = labeled_blobs(50, &centroids, &mut rng);

    let (train, valid) = dataset.train_test_split(0.25, &mut rng).unwrap();
    let model = DecisionTree::params().fit(&train).unwrap();

    // every training row is memorized
    assert_abs_diff_eq!(
        model.score_records(&train.records, &train.targets).unwrap(),
        1.0
    );

    let accuracy = model
        .score_records(&valid.records, &valid.targets)
        .unwrap();
    assert!(accuracy >= 0.9, "accuracy {:.2} below 90%", accuracy);
}

#[test]
fn leaves_partition_the_training_rows() {
    let mut rng = SmallRng::seed_from_u64(7);
    let centroids = array![[0., 0., 0.], [3., 3., 3.]];
    let dataset = labeled_blobs(40, &centroids, &mut rng);

    let model = DecisionTree::params().fit(&dataset).unwrap();

    let n_rows = model
        .iter_nodes()
        .filter_map(|node| node.rows())
        .map(|rows| rows.nsamples())
        .sum::<usize>();
    assert_eq!(n_rows, 80);
    assert_eq!(
        model.iter_nodes().filter(|node| node.is_leaf()).count(),
        model.num_leaves()
    );
}

#[test]
fn wrong_number_of_columns() {
    let dataset = Dataset::new(array![[1., 0.], [2., 1.]], array![0usize, 1]);
    let model = DecisionTree::params().fit(&dataset).unwrap();

    let narrow: Array2<f64> = Array2::zeros((3, 1));
    assert!(matches!(
        model.try_predict(&narrow),
        Err(Error::MismatchedShapes(2, 1))
    ));
}
