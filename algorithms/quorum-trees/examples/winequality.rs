use std::error::Error;

use quorum::dataset::Records;
use quorum::metrics::ToConfusionMatrix;
use quorum::traits::Fit;
use quorum_trees::{DecisionTree, RandomForest};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Path of the semicolon separated red wine table
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("QUORUM_WINEQUALITY").ok())
        .unwrap_or_else(|| "winequality-red.csv".to_string());

    let dataset = quorum_datasets::winequality_red(&path)?;
    let (train, valid) = dataset.train_test_split(0.3, &mut SmallRng::seed_from_u64(1))?;

    println!(
        "Training on {} rows, validating on {} rows",
        train.nsamples(),
        valid.nsamples()
    );

    // Single tree on every feature
    let tree = DecisionTree::params().fit(&train)?;
    let tree_score = tree.score_records(&valid.records, &valid.targets)?;
    println!(
        "Decision tree: depth {}, {} leaves, accuracy {:.3}",
        tree.max_depth(),
        tree.num_leaves(),
        tree_score
    );

    // One tree per block of features
    let forest = RandomForest::params()
        .n_trees(5)
        .n_feature_splits(5)
        .fit(&train)?;
    for (i, block) in forest.feature_blocks().iter().enumerate() {
        println!("Tree {} splits on {:?}", i, block);
    }

    let pred = forest.try_predict(&valid.records)?;
    let cm = pred.confusion_matrix(&valid)?;

    println!("{:?}", cm);
    println!("Random forest: accuracy {:.3}", cm.accuracy());

    Ok(())
}
