//! K-Means clustering algorithm.
//!
//! Uses Lloyd's algorithm with seeded k-means++ initialization.

use super::ClusterAssignment;
use crate::error::{PanganError, Result};
use crate::metrics::inertia;
use crate::primitives::{check_distance_range, squared_euclidean, Matrix};
use crate::traits::UnsupervisedEstimator;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Default iteration cap for one Lloyd run.
pub const DEFAULT_MAX_ITER: usize = 300;
/// Default centroid-shift tolerance.
pub const DEFAULT_TOL: f64 = 1e-4;
/// Default number of seeded restarts.
pub const DEFAULT_N_INIT: usize = 10;

/// K-Means clustering algorithm.
///
/// # Algorithm
///
/// 1. Initialize centroids using k-means++ (seeded, distinct rows)
/// 2. Assign each sample to nearest centroid
/// 3. Repair empty clusters with the sample farthest from its centroid
/// 4. Update centroids as mean of assigned samples
/// 5. Repeat until assignments stop changing, centroids stop moving,
///    or `max_iter` is reached
///
/// The whole procedure runs `n_init` times from one seeded RNG stream and
/// the partition with the lowest inertia is kept.
///
/// # Examples
///
/// ```
/// use pangan::prelude::*;
///
/// let data = Matrix::from_vec(6, 2, vec![
///     1.0, 2.0,
///     1.5, 1.8,
///     5.0, 8.0,
///     8.0, 8.0,
///     1.0, 0.6,
///     9.0, 11.0,
/// ]).expect("Valid matrix dimensions and data length");
///
/// let fit = KMeans::new(2)
///     .with_random_state(0)
///     .fit(&data)
///     .expect("Fit succeeds with valid data");
///
/// assert_eq!(fit.labels().len(), 6);
/// assert_eq!(fit.centroids().shape(), (2, 2));
/// ```
///
/// # Performance
///
/// - Time complexity: O(n_init · nkdi) where n=samples, k=clusters, d=features, i=iterations
/// - Space complexity: O(nk)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeans {
    /// Number of clusters.
    n_clusters: usize,
    /// Maximum iterations per restart.
    max_iter: usize,
    /// Convergence tolerance on centroid shift.
    tol: f64,
    /// Number of seeded restarts.
    n_init: usize,
    /// Random seed for initialization.
    random_state: u64,
}

impl Default for KMeans {
    fn default() -> Self {
        Self::new(3)
    }
}

impl KMeans {
    /// Creates a new K-Means with the specified number of clusters.
    #[must_use]
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            max_iter: DEFAULT_MAX_ITER,
            tol: DEFAULT_TOL,
            n_init: DEFAULT_N_INIT,
            random_state: 0,
        }
    }

    /// Sets the maximum number of iterations.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Sets the number of seeded restarts.
    #[must_use]
    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init;
        self
    }

    /// Sets the random seed for reproducibility.
    #[must_use]
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = seed;
        self
    }

    /// Returns the number of clusters.
    #[must_use]
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Returns the random seed.
    #[must_use]
    pub fn random_state(&self) -> u64 {
        self.random_state
    }

    fn validate(&self, x: &Matrix<f64>) -> Result<()> {
        let (n_samples, n_features) = x.shape();

        if n_samples == 0 {
            return Err(PanganError::empty_input("feature matrix has zero rows"));
        }
        if n_features == 0 {
            return Err(PanganError::empty_input("feature matrix has zero columns"));
        }
        if self.n_clusters < 2 {
            return Err(PanganError::invalid_parameter(
                "n_clusters",
                self.n_clusters,
                ">= 2",
            ));
        }
        if self.n_clusters > n_samples {
            return Err(PanganError::invalid_parameter(
                "n_clusters",
                self.n_clusters,
                format!("<= number of rows ({n_samples})"),
            ));
        }
        if self.max_iter == 0 {
            return Err(PanganError::invalid_parameter("max_iter", 0, ">= 1"));
        }
        if self.n_init == 0 {
            return Err(PanganError::invalid_parameter("n_init", 0, ">= 1"));
        }
        if self.tol.is_nan() || self.tol < 0.0 {
            return Err(PanganError::invalid_parameter("tol", self.tol, ">= 0"));
        }
        if let Some((row, col)) = x.first_non_finite() {
            return Err(PanganError::NonFinite { row, col });
        }
        check_distance_range(x)?;
        Ok(())
    }

    /// Picks `n_clusters` distinct rows as initial centroids using k-means++.
    fn kmeans_plusplus_init(&self, x: &Matrix<f64>, rng: &mut StdRng) -> Matrix<f64> {
        let (n_samples, n_features) = x.shape();
        let mut chosen = Vec::with_capacity(self.n_clusters);
        chosen.push(rng.gen_range(0..n_samples));

        let mut min_distances: Vec<f64> = (0..n_samples)
            .map(|i| squared_euclidean(x.row(i), x.row(chosen[0])))
            .collect();

        while chosen.len() < self.n_clusters {
            for &c in &chosen {
                min_distances[c] = 0.0;
            }

            // D² sampling; all-zero or overflowing weights fall back to a
            // uniform pick among rows not chosen yet.
            let total: f64 = min_distances.iter().sum();
            let weighted = if total.is_finite() {
                WeightedIndex::new(&min_distances).ok()
            } else {
                None
            };
            let next = match weighted {
                Some(dist) => dist.sample(rng),
                None => {
                    let unchosen: Vec<usize> =
                        (0..n_samples).filter(|i| !chosen.contains(i)).collect();
                    *unchosen.choose(rng).unwrap_or(&0)
                }
            };
            chosen.push(next);

            for (i, d) in min_distances.iter_mut().enumerate() {
                let dist = squared_euclidean(x.row(i), x.row(next));
                if dist < *d {
                    *d = dist;
                }
            }
        }

        let mut centroids = Matrix::zeros(self.n_clusters, n_features);
        for (k, &idx) in chosen.iter().enumerate() {
            centroids.row_mut(k).copy_from_slice(x.row(idx));
        }
        centroids
    }

    /// Assigns each sample to the nearest centroid (ties go to the lower index).
    fn assign_labels(x: &Matrix<f64>, centroids: &Matrix<f64>) -> Vec<usize> {
        x.rows().map(|point| nearest_centroid(point, centroids)).collect()
    }

    /// Moves samples into empty clusters until every cluster has a member.
    ///
    /// The donor is the sample farthest from its centroid among clusters
    /// holding more than one sample. With `n_clusters <= n_samples` a donor
    /// always exists.
    fn repair_empty_clusters(&self, x: &Matrix<f64>, centroids: &Matrix<f64>, labels: &mut [usize]) {
        let mut counts = vec![0usize; self.n_clusters];
        for &label in labels.iter() {
            counts[label] += 1;
        }

        for empty in 0..self.n_clusters {
            if counts[empty] > 0 {
                continue;
            }

            let mut donor = None;
            let mut max_dist = -1.0;
            for (i, &label) in labels.iter().enumerate() {
                if counts[label] < 2 {
                    continue;
                }
                let dist = squared_euclidean(x.row(i), centroids.row(label));
                if dist > max_dist {
                    max_dist = dist;
                    donor = Some(i);
                }
            }

            if let Some(i) = donor {
                tracing::trace!(cluster = empty, sample = i, "re-seeding empty cluster");
                counts[labels[i]] -= 1;
                labels[i] = empty;
                counts[empty] = 1;
            }
        }
    }

    /// Updates centroids as the mean of assigned samples.
    fn update_centroids(&self, x: &Matrix<f64>, labels: &[usize]) -> Matrix<f64> {
        let n_features = x.n_cols();
        let mut centroids = Matrix::zeros(self.n_clusters, n_features);
        let mut counts = vec![0usize; self.n_clusters];

        for (i, &label) in labels.iter().enumerate() {
            counts[label] += 1;
            for (c, v) in centroids.row_mut(label).iter_mut().zip(x.row(i)) {
                *c += v;
            }
        }

        for (k, &count) in counts.iter().enumerate() {
            if count > 0 {
                for c in centroids.row_mut(k) {
                    *c /= count as f64;
                }
            }
        }

        centroids
    }

    /// Largest squared centroid displacement between two iterations.
    fn max_shift(old: &Matrix<f64>, new: &Matrix<f64>) -> f64 {
        old.rows()
            .zip(new.rows())
            .map(|(a, b)| squared_euclidean(a, b))
            .fold(0.0, f64::max)
    }

    /// One Lloyd run from a fresh k-means++ seeding.
    fn lloyd(&self, x: &Matrix<f64>, rng: &mut StdRng) -> ClusterFit {
        let mut centroids = self.kmeans_plusplus_init(x, rng);
        let mut labels = Self::assign_labels(x, &centroids);
        self.repair_empty_clusters(x, &centroids, &mut labels);

        let mut n_iter = 0;
        for iter in 0..self.max_iter {
            n_iter = iter + 1;
            let new_centroids = self.update_centroids(x, &labels);
            let shift = Self::max_shift(&centroids, &new_centroids);

            let mut new_labels = Self::assign_labels(x, &new_centroids);
            self.repair_empty_clusters(x, &new_centroids, &mut new_labels);
            centroids = new_centroids;

            if new_labels == labels {
                break;
            }
            labels = new_labels;
            if shift <= self.tol * self.tol {
                break;
            }
        }

        // Final centroids are exactly the means of the final partition.
        let centroids = self.update_centroids(x, &labels);
        let inertia = inertia(x, &centroids, &labels);

        ClusterFit {
            labels: ClusterAssignment::new(labels, self.n_clusters),
            centroids,
            inertia,
            n_iter,
        }
    }
}

impl UnsupervisedEstimator for KMeans {
    type Fit = ClusterFit;

    /// Fits the K-Means model to data.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Data is empty (`EmptyInput`)
    /// - `n_clusters` is outside `[2, n_samples]` (`InvalidParameter`)
    /// - Data contains NaN or infinite values (`NonFinite`)
    fn fit(&self, x: &Matrix<f64>) -> Result<ClusterFit> {
        self.validate(x)?;

        let mut rng = StdRng::seed_from_u64(self.random_state);
        let mut best: Option<ClusterFit> = None;

        for run in 0..self.n_init {
            let candidate = self.lloyd(x, &mut rng);
            tracing::debug!(
                run,
                inertia = candidate.inertia,
                n_iter = candidate.n_iter,
                "k-means restart finished"
            );
            let better = best
                .as_ref()
                .map_or(true, |b| candidate.inertia < b.inertia);
            if better {
                best = Some(candidate);
            }
        }

        best.ok_or_else(|| PanganError::invalid_parameter("n_init", self.n_init, ">= 1"))
    }
}

/// Index of the centroid nearest to `point`.
fn nearest_centroid(point: &[f64], centroids: &Matrix<f64>) -> usize {
    let mut min_dist = f64::INFINITY;
    let mut min_cluster = 0;

    for (k, centroid) in centroids.rows().enumerate() {
        let dist = squared_euclidean(point, centroid);
        if dist < min_dist {
            min_dist = dist;
            min_cluster = k;
        }
    }

    min_cluster
}

/// Result of one K-Means run.
///
/// Immutable once produced; a new run produces a new value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterFit {
    labels: ClusterAssignment,
    centroids: Matrix<f64>,
    inertia: f64,
    n_iter: usize,
}

impl ClusterFit {
    /// Cluster label of every row.
    #[must_use]
    pub fn labels(&self) -> &ClusterAssignment {
        &self.labels
    }

    /// Cluster centroids, one row per cluster.
    #[must_use]
    pub fn centroids(&self) -> &Matrix<f64> {
        &self.centroids
    }

    /// Within-cluster sum of squared distances.
    #[must_use]
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Lloyd iterations used by the winning restart.
    #[must_use]
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    /// Predicts cluster labels for new data.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` has a different number of features.
    pub fn predict(&self, x: &Matrix<f64>) -> Result<Vec<usize>> {
        if x.n_cols() != self.centroids.n_cols() {
            return Err(PanganError::dimension_mismatch(
                "features",
                self.centroids.n_cols(),
                x.n_cols(),
            ));
        }
        Ok(KMeans::assign_labels(x, &self.centroids))
    }

    /// Splits the fit into its labels and centroids.
    #[must_use]
    pub fn into_parts(self) -> (ClusterAssignment, Matrix<f64>) {
        (self.labels, self.centroids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> Matrix<f64> {
        // Two well-separated clusters
        Matrix::from_vec(
            6,
            2,
            vec![1.0, 2.0, 1.5, 1.8, 1.0, 0.6, 8.0, 8.0, 9.0, 11.0, 8.5, 9.0],
        )
        .unwrap()
    }

    #[test]
    fn test_new() {
        let kmeans = KMeans::new(3);
        assert_eq!(kmeans.n_clusters(), 3);
        assert_eq!(kmeans.random_state(), 0);
        assert_eq!(kmeans.max_iter, DEFAULT_MAX_ITER);
        assert_eq!(kmeans.n_init, DEFAULT_N_INIT);
    }

    #[test]
    fn test_builders() {
        let kmeans = KMeans::new(4)
            .with_max_iter(10)
            .with_tol(1e-6)
            .with_n_init(3)
            .with_random_state(7);
        assert_eq!(kmeans.max_iter, 10);
        assert!((kmeans.tol - 1e-6).abs() < 1e-18);
        assert_eq!(kmeans.n_init, 3);
        assert_eq!(kmeans.random_state(), 7);
    }

    #[test]
    fn test_fit_basic() {
        let fit = KMeans::new(2).fit(&sample_data()).unwrap();
        assert_eq!(fit.centroids().shape(), (2, 2));
        assert!(fit.inertia() >= 0.0);
        assert!(fit.n_iter() >= 1);
    }

    #[test]
    fn test_labels_consistency() {
        let fit = KMeans::new(2).fit(&sample_data()).unwrap();
        let labels = fit.labels().as_slice();

        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[1], labels[2]);
        assert_eq!(labels[3], labels[4]);
        assert_eq!(labels[4], labels[5]);
        assert_ne!(labels[0], labels[3]);
    }

    #[test]
    fn test_predict_new_points() {
        let fit = KMeans::new(2).fit(&sample_data()).unwrap();
        let labels = fit.labels().as_slice();
        let new_points = Matrix::from_vec(2, 2, vec![1.2, 1.2, 9.0, 9.0]).unwrap();

        let predicted = fit.predict(&new_points).unwrap();
        assert_eq!(predicted, vec![labels[0], labels[3]]);
    }

    #[test]
    fn test_predict_dimension_mismatch() {
        let fit = KMeans::new(2).fit(&sample_data()).unwrap();
        let wrong = Matrix::from_vec(1, 3, vec![1.0, 2.0, 3.0]).unwrap();
        assert!(matches!(
            fit.predict(&wrong),
            Err(PanganError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_columns() {
        let x = Matrix::from_vec(3, 0, vec![]).unwrap();
        assert!(matches!(
            KMeans::new(2).fit(&x),
            Err(PanganError::EmptyInput { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_max_iter_and_n_init() {
        let x = sample_data();
        assert!(KMeans::new(2).with_max_iter(0).fit(&x).unwrap_err().is_parameter_error());
        assert!(KMeans::new(2).with_n_init(0).fit(&x).unwrap_err().is_parameter_error());
    }

    #[test]
    fn test_rejects_overflowing_distances() {
        let x = Matrix::from_vec(3, 1, vec![1e300, -1e300, 0.0]).unwrap();
        let err = KMeans::new(2).fit(&x).unwrap_err();
        assert!(err.is_parameter_error());
        assert!(err.to_string().contains("too far apart"));
    }

    #[test]
    fn test_large_but_representable_values() {
        let x = Matrix::from_vec(4, 1, vec![1e150, 1.1e150, -1e150, -1.1e150]).unwrap();
        let fit = KMeans::new(2).with_random_state(3).fit(&x).unwrap();
        let labels = fit.labels().as_slice();
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);
        assert!(fit.inertia().is_finite());
    }

    #[test]
    fn test_rejects_non_finite() {
        let x = Matrix::from_vec(3, 1, vec![1.0, f64::INFINITY, 2.0]).unwrap();
        assert!(matches!(
            KMeans::new(2).fit(&x),
            Err(PanganError::NonFinite { row: 1, col: 0 })
        ));
    }

    #[test]
    fn test_plusplus_init_picks_distinct_rows() {
        let x = Matrix::from_vec(4, 1, vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        let kmeans = KMeans::new(4);
        let mut rng = StdRng::seed_from_u64(11);
        let centroids = kmeans.kmeans_plusplus_init(&x, &mut rng);

        let mut values = centroids.column(0);
        values.sort_by(f64::total_cmp);
        assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_repair_fills_every_cluster() {
        let x = Matrix::from_vec(3, 1, vec![0.0, 1.0, 5.0]).unwrap();
        let centroids = Matrix::from_vec(3, 1, vec![0.0, 0.0, 0.0]).unwrap();
        let kmeans = KMeans::new(3);
        let mut labels = KMeans::assign_labels(&x, &centroids);
        assert_eq!(labels, vec![0, 0, 0]);

        kmeans.repair_empty_clusters(&x, &centroids, &mut labels);
        let mut sorted = labels.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2]);
        // The farthest sample is moved first.
        assert_eq!(labels[2], 1);
    }

    #[test]
    fn test_nearest_centroid_tie_goes_to_lower_index() {
        let centroids = Matrix::from_vec(2, 1, vec![0.0, 2.0]).unwrap();
        assert_eq!(nearest_centroid(&[1.0], &centroids), 0);
    }

    #[test]
    fn test_into_parts() {
        let fit = KMeans::new(2).fit(&sample_data()).unwrap();
        let expected_labels = fit.labels().clone();
        let (labels, centroids) = fit.into_parts();
        assert_eq!(labels, expected_labels);
        assert_eq!(centroids.n_rows(), 2);
    }
}
