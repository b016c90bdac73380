//! Utility functions for randomly generating datasets

use ndarray::{s, Array, Array1, Array2, ArrayBase, Data, Ix1, Ix2};
use ndarray_rand::{
    rand::Rng,
    rand_distr::{Distribution, StandardNormal},
    RandomExt,
};
use quorum::Dataset;

/// Given an input matrix `blob_centroids`, with shape `(n_blobs, n_features)`,
/// generate `blob_size` data points (a "blob") around each of the blob centroids.
///
/// Each point is sampled from a standard normal distribution centered in its blob centroid.
/// The points of blob `i` occupy rows `i * blob_size..(i + 1) * blob_size`.
pub fn blobs(
    blob_size: usize,
    blob_centroids: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    rng: &mut impl Rng,
) -> Array2<f64> {
    let (n_centroids, n_features) = blob_centroids.dim();
    let mut blobs: Array2<f64> = Array2::zeros((n_centroids * blob_size, n_features));

    for (blob_index, blob_centroid) in blob_centroids.rows().into_iter().enumerate() {
        let blob = make_blob(blob_size, &blob_centroid, StandardNormal, rng);

        let indexes = s![blob_index * blob_size..(blob_index + 1) * blob_size, ..];
        blobs.slice_mut(indexes).assign(&blob);
    }
    blobs
}

/// Same as [`blobs`], labelling every point with the index of its centroid
///
/// `labeled_blobs` can be used to quickly assemble a classification problem whose difficulty is
/// controlled by the distance between the centroids.
pub fn labeled_blobs(
    blob_size: usize,
    blob_centroids: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    rng: &mut impl Rng,
) -> Dataset<f64, usize> {
    let records = blobs(blob_size, blob_centroids, rng);
    let targets = (0..blob_centroids.nrows())
        .flat_map(|label| std::iter::repeat(label).take(blob_size))
        .collect::<Array1<_>>();

    Dataset::new(records, targets)
}

fn make_blob(
    blob_size: usize,
    blob_centroid: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    distribution: impl Distribution<f64>,
    rng: &mut impl Rng,
) -> Array2<f64> {
    let shape = (blob_size, blob_centroid.len());
    let origin_blob: Array2<f64> = Array::random_using(shape, distribution, rng);
    origin_blob + blob_centroid
}
