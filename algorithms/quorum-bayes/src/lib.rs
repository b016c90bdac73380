//! Gaussian naive Bayes
//!
//! A [`GaussianNb`] model summarizes every class of the training set by the mean and standard
//! deviation of each feature. A row is scored per class by the class prior times the product of
//! the Gaussian densities of its values, and assigned to the class with the highest score.
//!
//! The scores are unnormalized: they are proportional to the posterior probabilities but do not
//! sum to one.

mod error;
mod gaussian_nb;
mod hyperparams;

pub use error::{NaiveBayesError, Result};
pub use gaussian_nb::{
    calculate_probability, naive_bayes, summarize_by_class, ClassSummary, FeatureSummary,
    GaussianNb,
};
pub use hyperparams::{GaussianNbParams, GaussianNbValidParams, ZeroVariance};
pub use quorum::evaluation::evaluate_algorithm;
