//! Clustering evaluation metrics.
//!
//! Inertia (within-cluster sum of squares) and silhouette analysis.

mod silhouette;

pub use silhouette::{
    silhouette, silhouette_samples, silhouette_score, ClusterSilhouette, SilhouetteAnalysis,
};

use crate::primitives::{squared_euclidean, Matrix};

/// Computes the inertia (within-cluster sum of squares).
///
/// Inertia = Σ ||x - centroid||²
///
/// # Examples
///
/// ```
/// use pangan::metrics::inertia;
/// use pangan::primitives::Matrix;
///
/// let data = Matrix::from_vec(4, 2, vec![
///     0.0, 0.0,
///     1.0, 0.0,
///     0.0, 1.0,
///     1.0, 1.0,
/// ]).expect("Matrix dimensions and data length are valid");
/// let centroids = Matrix::from_vec(1, 2, vec![0.5, 0.5]).expect("Matrix dimensions and data length are valid");
/// let labels = vec![0, 0, 0, 0];
/// let score = inertia(&data, &centroids, &labels);
/// assert!((score - 2.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn inertia(data: &Matrix<f64>, centroids: &Matrix<f64>, labels: &[usize]) -> f64 {
    labels
        .iter()
        .enumerate()
        .map(|(i, &label)| squared_euclidean(data.row(i), centroids.row(label)))
        .sum()
}
