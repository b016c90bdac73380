use crate::{GaussianNb, NaiveBayesError};
use quorum::{Float, Label, ParamGuard};
use std::marker::PhantomData;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Treatment of features which are constant within a class
///
/// The Gaussian density is undefined for a standard deviation of zero. This happens for every
/// feature of a class with a single row and for columns that never change inside a class.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZeroVariance {
    /// The class puts all probability mass on its mean: the density is one at the mean and zero
    /// everywhere else
    PointMass,
    /// Fitting fails with [`NaiveBayesError::ZeroVariance`]
    Reject,
}

impl Default for ZeroVariance {
    fn default() -> Self {
        ZeroVariance::PointMass
    }
}

/// A verified hyper-parameter set ready for the estimation of a Gaussian naive Bayes model
///
/// See [`GaussianNbParams`] for more information.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaussianNbValidParams<F, L> {
    zero_variance: ZeroVariance,

    phantom: PhantomData<(F, L)>,
}

impl<F: Float, L> GaussianNbValidParams<F, L> {
    /// Get the treatment of constant features
    pub fn zero_variance(&self) -> ZeroVariance {
        self.zero_variance
    }
}

/// A hyper-parameter set during construction
///
/// | Name | Default | Purpose |
/// | :--- | :--- | :--- |
/// | [zero_variance](Self::zero_variance) | `PointMass` | Treatment of features which are constant within a class |
///
/// # Example
///
/// ```rust
/// use quorum::prelude::*;
/// use quorum_bayes::{GaussianNb, NaiveBayesError, ZeroVariance};
/// use ndarray::array;
///
/// let ds = Dataset::new(array![[1.0], [1.0], [5.0]], array![0usize, 0, 1]);
///
/// // the second class consists of a single row
/// let result = GaussianNb::params()
///     .zero_variance(ZeroVariance::Reject)
///     .fit(&ds);
/// assert!(matches!(result, Err(NaiveBayesError::ZeroVariance { .. })));
///
/// let model = GaussianNb::params().fit(&ds)?;
/// assert_eq!(model.predict_row(&array![5.0])?, 1);
/// # Ok::<(), NaiveBayesError>(())
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaussianNbParams<F, L>(GaussianNbValidParams<F, L>);

impl<F: Float, L> GaussianNbParams<F, L> {
    /// Create a new parameter set with default values
    pub fn new() -> Self {
        Self(GaussianNbValidParams {
            zero_variance: ZeroVariance::default(),
            phantom: PhantomData,
        })
    }

    /// Set the treatment of features which are constant within a class
    pub fn zero_variance(mut self, zero_variance: ZeroVariance) -> Self {
        self.0.zero_variance = zero_variance;
        self
    }
}

impl<F: Float, L> Default for GaussianNbParams<F, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, L: Label> GaussianNb<F, L> {
    /// Defaults are provided if the optional parameters are not specified:
    /// * `zero_variance = ZeroVariance::PointMass`
    // Violates the convention that new should return a value of type `Self`
    #[allow(clippy::new_ret_no_self)]
    pub fn params() -> GaussianNbParams<F, L> {
        GaussianNbParams::new()
    }
}

impl<F: Float, L> ParamGuard for GaussianNbParams<F, L> {
    type Checked = GaussianNbValidParams<F, L>;
    type Error = NaiveBayesError;

    // Every combination of values is valid
    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}
