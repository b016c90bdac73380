use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array2;
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use quorum::benchmarks::config;
use quorum::prelude::*;
use quorum_datasets::generate::labeled_blobs;
use quorum_trees::{DecisionTree, RandomForest};
use rand::rngs::SmallRng;

fn decision_tree_bench(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);

    // Controls how many samples for each class are generated
    let training_set_sizes = &[100, 1000, 10000];

    let n_classes = 4;
    let n_features = 8;

    let hyperparams = DecisionTree::<f64, usize>::params();

    let mut group = c.benchmark_group("decision_tree");
    config::set_default_benchmark_configs(&mut group);

    for n in training_set_sizes.iter() {
        let centroids =
            Array2::random_using((n_classes, n_features), Uniform::new(-30., 30.), &mut rng);
        let dataset = labeled_blobs(*n, &centroids, &mut rng);

        group.bench_with_input(BenchmarkId::from_parameter(n), &dataset, |b, d| {
            b.iter(|| hyperparams.fit(d))
        });
    }

    group.finish();
}

fn random_forest_bench(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);
    let feature_splits = &[0, 2, 4, 8];

    let centroids = Array2::random_using((4, 8), Uniform::new(-30., 30.), &mut rng);
    let dataset = labeled_blobs(1000, &centroids, &mut rng);

    let mut group = c.benchmark_group("random_forest");
    config::set_default_benchmark_configs(&mut group);

    for n_feature_splits in feature_splits.iter() {
        let hyperparams = RandomForest::<f64, usize>::params()
            .n_trees(8)
            .n_feature_splits(*n_feature_splits);

        group.bench_with_input(
            BenchmarkId::from_parameter(n_feature_splits),
            &dataset,
            |b, d| b.iter(|| hyperparams.fit(d)),
        );
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = config::get_default_benchmark_configs();
    targets = decision_tree_bench, random_forest_bench
}
criterion_main!(benches);
