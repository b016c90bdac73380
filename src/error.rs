//! Error types in quorum
//!

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("mismatched shapes: expected {0} entries, got {1}")]
    MismatchedShapes(usize, usize),
    #[error("required feature `{0}` is not a column of the dataset")]
    MissingFeature(String),
    #[error("error splitting {features} features into {splits} blocks")]
    FeaturePartition { features: usize, splits: usize },
    #[error("dataset has zero samples")]
    EmptyDataset,
}
