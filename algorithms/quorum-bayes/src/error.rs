use thiserror::Error;

/// Simplified `Result` using [`NaiveBayesError`](crate::NaiveBayesError) as error type
pub type Result<T> = std::result::Result<T, NaiveBayesError>;

/// Error variants from model estimation and scoring
#[derive(Error, Debug, Clone)]
pub enum NaiveBayesError {
    /// A feature is constant within a class and the model was asked to reject such data
    #[error("feature `{feature}` has zero variance in class {class}")]
    ZeroVariance { feature: String, class: String },
    /// A row does not have one value per feature of the training set
    #[error("expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },
    #[error(transparent)]
    BaseCrate(#[from] quorum::Error),
}
