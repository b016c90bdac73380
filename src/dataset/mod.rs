//! Datasets
//!
//! This module implements the dataset struct and various helper traits to extend its
//! functionality.
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ScalarOperand};

use num_traits::{FromPrimitive, NumAssignOps, NumCast};

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::iter::Sum;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

mod impl_dataset;
mod impl_records;
mod impl_targets;
mod iter;

pub use iter::DatasetIter;

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implement them for 32bit and 64bit floating points. They are used in the records of a dataset.
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Sum
    + NumAssignOps
    + ScalarOperand
    + approx::AbsDiffEq
    + 'static
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

/// Discrete labels
///
/// Labels are countable, comparable and hashable. The label column of a classification dataset is
/// a small set of ordinal integers, so signed and unsigned integers are supported next to booleans
/// and strings.
pub trait Label: PartialEq + Eq + Hash + Clone + fmt::Debug + Send + Sync {}

impl Label for bool {}
impl Label for u8 {}
impl Label for usize {}
impl Label for i32 {}
impl Label for i64 {}
impl Label for String {}

/// DatasetBase
///
/// This is the fundamental structure of a dataset. It contains a number of records about the data
/// together with targets and feature names. The dataset base is only generic over the records and
/// targets and introduces a trait bound on the records. `feature_names`, on the other hand, are
/// always owned and copied when views are created.
///
/// # Fields
///
/// * `records`: a two-dimensional matrix with dimensionality (nsamples, nfeatures)
/// * `targets`: a one-dimensional label column with dimensionality (nsamples)
/// * `feature_names`: optional descriptive feature names with dimensionality (nfeatures)
///
/// Records and targets are always kept as two separate, paired containers; the label is never
/// merged back into the feature matrix.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetBase<R, T>
where
    R: Records,
{
    pub records: R,
    pub targets: T,

    feature_names: Vec<String>,
}

/// Dataset
///
/// The most commonly used type of dataset. It contains a number of records stored as an `Array2`
/// and a single label for each record, stored as an `Array1`.
pub type Dataset<F, L> = DatasetBase<Array2<F>, Array1<L>>;

/// DatasetView
///
/// A read only view of a Dataset
pub type DatasetView<'a, F, L> = DatasetBase<ArrayView2<'a, F>, ArrayView1<'a, L>>;

/// Record trait
pub trait Records: Sized {
    type Elem;

    fn nsamples(&self) -> usize;
    fn nfeatures(&self) -> usize;
}

/// Return a view on a single target variable
pub trait AsTargets {
    type Elem;

    fn as_targets(&self) -> ArrayView1<Self::Elem>;
}

/// Get the labels in the targets
///
/// Labels are always reported in order of their first appearance. Several algorithms break ties
/// in favour of the label seen first, so the order is part of the contract.
pub trait Labels {
    type Elem: Label;

    /// Return every label with its number of occurrences, in order of first appearance
    fn label_count(&self) -> Vec<(Self::Elem, usize)>;
}

/// Count labels while preserving the order in which they first appear
pub fn count_in_order<'a, L: Label + 'a, I: IntoIterator<Item = &'a L>>(
    labels: I,
) -> Vec<(L, usize)> {
    let mut index = HashMap::<L, usize>::new();
    let mut counts: Vec<(L, usize)> = Vec::new();

    for label in labels {
        match index.get(label) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(label.clone(), counts.len());
                counts.push((label.clone(), 1));
            }
        }
    }

    counts
}
