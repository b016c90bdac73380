use super::{count_in_order, AsTargets, DatasetBase, Label, Labels, Records};
use ndarray::{ArrayBase, ArrayView1, Data, Ix1};

/// A NdArray can act as targets
impl<L, S: Data<Elem = L>> AsTargets for ArrayBase<S, Ix1> {
    type Elem = L;

    fn as_targets(&self) -> ArrayView1<Self::Elem> {
        self.view()
    }
}

/// A NdArray with discrete labels can act as labels
impl<L: Label, S: Data<Elem = L>> Labels for ArrayBase<S, Ix1> {
    type Elem = L;

    fn label_count(&self) -> Vec<(L, usize)> {
        count_in_order(self.iter())
    }
}

impl<T: AsTargets> AsTargets for &T {
    type Elem = T::Elem;

    fn as_targets(&self) -> ArrayView1<Self::Elem> {
        (*self).as_targets()
    }
}

impl<R: Records, T: AsTargets> AsTargets for DatasetBase<R, T> {
    type Elem = T::Elem;

    fn as_targets(&self) -> ArrayView1<Self::Elem> {
        self.targets.as_targets()
    }
}

impl<R: Records, L: Label, T: AsTargets<Elem = L>> Labels for DatasetBase<R, T> {
    type Elem = L;

    fn label_count(&self) -> Vec<(L, usize)> {
        count_in_order(self.targets.as_targets().iter())
    }
}
