use quorum_bayes::{evaluate_algorithm, naive_bayes};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("QUORUM_WINEQUALITY").ok())
        .unwrap_or_else(|| "winequality-red.csv".to_string());

    let dataset = quorum_datasets::winequality_red(&path)?;

    // 5-fold cross validation, rows which do not fill a fold are left out
    let n_folds = 5;
    let mut rng = SmallRng::seed_from_u64(42);
    let scores = evaluate_algorithm(&dataset, n_folds, &mut rng, |train, test| {
        naive_bayes(train, &test)
    })?;

    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    println!("Scores: {:?}", scores);
    println!("Naive Bayes accuracy: {:.3}%", mean);

    Ok(())
}
