use super::DatasetBase;
use ndarray::{ArrayBase, ArrayView1, Axis, Data, Ix1, Ix2};

/// Iterate over the samples of a dataset as (record, label) pairs
pub struct DatasetIter<'a, F, L> {
    records: ndarray::iter::AxisIter<'a, F, Ix1>,
    targets: ndarray::iter::Iter<'a, L, Ix1>,
}

impl<'a, F, L> Iterator for DatasetIter<'a, F, L> {
    type Item = (ArrayView1<'a, F>, &'a L);

    fn next(&mut self) -> Option<Self::Item> {
        match (self.records.next(), self.targets.next()) {
            (Some(record), Some(target)) => Some((record, target)),
            _ => None,
        }
    }
}

impl<F, L, D, T> DatasetBase<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>>
where
    D: Data<Elem = F>,
    T: Data<Elem = L>,
{
    /// Iterate over the samples of the dataset
    ///
    /// Stops at the shorter of records and targets; `ensure_aligned` reports a mismatch.
    pub fn sample_iter(&self) -> DatasetIter<'_, F, L> {
        DatasetIter {
            records: self.records.axis_iter(Axis(0)),
            targets: self.targets.iter(),
        }
    }
}
