mod algorithm;
mod hyperparams;
pub mod impurity;
mod iter;

pub use algorithm::*;
pub use hyperparams::*;
pub use iter::*;
