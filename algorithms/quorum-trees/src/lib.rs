//!
//! # Tree based classifiers
//! `quorum-trees` provides pure Rust implementations of a Gini decision tree and of a random
//! forest which partitions the feature space between its trees.
//!
//! # The big picture
//!
//! `quorum-trees` is a crate in the `quorum` workspace. It builds on the dataset, trait and
//! metric definitions of the `quorum` crate and is fitted and evaluated the same way as the naive
//! Bayes classifier of `quorum-bayes`.
//!
//! Decision Trees (DTs) are a non-parametric supervised learning method used for classification.
//! The goal is to create a model that predicts the value of a target variable by learning simple
//! decision rules inferred from the data features.
//!
//! # Current state
//!
//! `quorum-trees` currently provides
//!
//! * an [implementation](DecisionTree) of single-tree fitting, grown until no split decreases
//!   the Gini impurity,
//! * a [random forest](RandomForest) which grows one tree per block of feature columns and
//!   predicts by majority vote,
//! * the [impurity] helpers both are built on.
//!

mod decision_trees;
mod random_forest;

pub use decision_trees::*;
pub use random_forest::*;

pub use quorum::error::Result;
