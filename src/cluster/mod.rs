//! Clustering algorithms.
//!
//! K-Means (Lloyd's algorithm, seeded k-means++ initialization) and the
//! [`ClusterAssignment`] type every downstream report consumes.
//!
//! Different seeds can converge to different local optima: K-Means
//! minimizes a non-convex objective. A fixed seed always reproduces the
//! same partition.

mod kmeans;

pub use kmeans::{ClusterFit, KMeans, DEFAULT_MAX_ITER, DEFAULT_N_INIT, DEFAULT_TOL};

use crate::error::Result;
use crate::primitives::Matrix;
use crate::traits::UnsupervisedEstimator;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Mapping from row index to cluster label in `[0, n_clusters)`.
///
/// # Examples
///
/// ```
/// use pangan::cluster::ClusterAssignment;
///
/// let labels = ClusterAssignment::new(vec![1, 0, 1], 2);
/// assert_eq!(labels.counts(), vec![1, 2]);
/// assert_eq!(labels.members(1), vec![0, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterAssignment {
    labels: Vec<usize>,
    n_clusters: usize,
}

impl ClusterAssignment {
    /// Wraps raw labels.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if a label is `>= n_clusters`.
    #[must_use]
    pub fn new(labels: Vec<usize>, n_clusters: usize) -> Self {
        debug_assert!(labels.iter().all(|&l| l < n_clusters));
        Self { labels, n_clusters }
    }

    /// Labels as a slice, one per row.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.labels
    }

    /// Number of labelled rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when no rows are labelled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Requested number of clusters `K`.
    #[must_use]
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Label of one row.
    #[must_use]
    pub fn label(&self, row: usize) -> usize {
        self.labels[row]
    }

    /// Number of rows in each cluster, indexed by label.
    #[must_use]
    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.n_clusters];
        for &l in &self.labels {
            counts[l] += 1;
        }
        counts
    }

    /// Row indices belonging to `cluster`, in row order.
    #[must_use]
    pub fn members(&self, cluster: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|&(_, &l)| l == cluster)
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of distinct labels actually used.
    #[must_use]
    pub fn n_distinct(&self) -> usize {
        self.labels.iter().collect::<BTreeSet<_>>().len()
    }

    /// Consumes the assignment, returning the raw labels.
    #[must_use]
    pub fn into_vec(self) -> Vec<usize> {
        self.labels
    }
}

/// Partitions the rows of `matrix` into `k` clusters with a fixed seed.
///
/// Shorthand for `KMeans::new(k).with_random_state(seed).fit(matrix)`,
/// returning the labels and the `k × d` centroid matrix.
///
/// # Errors
///
/// - `InvalidParameter` if `k < 2` or `k > matrix.n_rows()`
/// - `EmptyInput` if the matrix has zero rows or columns
///
/// # Examples
///
/// ```
/// use pangan::cluster::cluster;
/// use pangan::primitives::Matrix;
///
/// let x = Matrix::from_rows(&[[1.0, 1.0], [1.0, 2.0], [10.0, 10.0], [10.0, 11.0]]).unwrap();
/// let (labels, centroids) = cluster(&x, 2, 0).unwrap();
/// assert_eq!(labels.label(0), labels.label(1));
/// assert_ne!(labels.label(0), labels.label(2));
/// assert_eq!(centroids.shape(), (2, 2));
/// ```
pub fn cluster(matrix: &Matrix<f64>, k: usize, seed: u64) -> Result<(ClusterAssignment, Matrix<f64>)> {
    let fit = KMeans::new(k).with_random_state(seed).fit(matrix)?;
    Ok(fit.into_parts())
}

#[cfg(test)]
#[path = "tests_kmeans_contract.rs"]
mod tests_kmeans_contract;
