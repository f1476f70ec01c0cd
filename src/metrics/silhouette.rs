//! Silhouette analysis for clustering quality.

use crate::error::{PanganError, Result};
use crate::primitives::{check_distance_range, euclidean, Matrix};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Silhouette values of one cluster, sorted ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSilhouette {
    /// Cluster label.
    pub cluster: usize,
    /// Member silhouette values, ascending.
    pub values: Vec<f64>,
    /// Mean silhouette of the members.
    pub mean: f64,
}

/// Per-row and aggregate silhouette coefficients for one partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SilhouetteAnalysis {
    per_row: Vec<f64>,
    mean: f64,
    per_cluster: Vec<ClusterSilhouette>,
}

impl SilhouetteAnalysis {
    /// Silhouette coefficient of every row, in row order.
    #[must_use]
    pub fn per_row(&self) -> &[f64] {
        &self.per_row
    }

    /// Arithmetic mean of [`Self::per_row`].
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sorted values per cluster, in label order.
    #[must_use]
    pub fn per_cluster(&self) -> &[ClusterSilhouette] {
        &self.per_cluster
    }
}

/// Computes the silhouette coefficient for a single point.
fn silhouette_coefficient(a_i: f64, b_i: f64) -> f64 {
    let max_ab = a_i.max(b_i);
    if max_ab == 0.0 {
        0.0
    } else {
        (b_i - a_i) / max_ab
    }
}

/// Condensed `n × n` Euclidean distance table.
struct Distances {
    n: usize,
    values: Vec<f64>,
}

impl Distances {
    fn new(data: &Matrix<f64>) -> Self {
        let n = data.n_rows();
        let mut values = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = euclidean(data.row(i), data.row(j));
                values[i * n + j] = d;
                values[j * n + i] = d;
            }
        }
        Self { n, values }
    }

    fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    fn mean_to(&self, i: usize, members: &[usize]) -> f64 {
        let total: f64 = members.iter().map(|&j| self.get(i, j)).sum();
        total / members.len() as f64
    }
}

/// Full silhouette analysis of a partition.
///
/// For each row `i`:
/// - a(i) = mean distance to the other rows of its cluster (0 for a singleton)
/// - b(i) = smallest mean distance to the rows of any other cluster
/// - s(i) = (b(i) - a(i)) / max(a(i), b(i)), or 0 when both are 0
///
/// # Errors
///
/// - `EmptyInput` if `data` has no rows
/// - `DimensionMismatch` if `labels.len() != data.n_rows()`
/// - `NonFinite` for NaN or infinite values, `InvalidParameter` when values
///   are so far apart that distances overflow
/// - `DegenerateClustering` if fewer than 2 distinct labels are present
///
/// # Examples
///
/// ```
/// use pangan::metrics::silhouette;
/// use pangan::primitives::Matrix;
///
/// let data = Matrix::from_vec(4, 2, vec![
///     0.0, 0.0,
///     0.1, 0.1,
///     5.0, 5.0,
///     5.1, 5.1,
/// ]).expect("Matrix dimensions and data length are valid");
/// let analysis = silhouette(&data, &[0, 0, 1, 1]).expect("two clusters");
/// assert!(analysis.mean() > 0.9);
/// assert_eq!(analysis.per_row().len(), 4);
/// ```
pub fn silhouette(data: &Matrix<f64>, labels: &[usize]) -> Result<SilhouetteAnalysis> {
    let n_samples = data.n_rows();

    if n_samples == 0 {
        return Err(PanganError::empty_input("silhouette needs at least one row"));
    }
    if labels.len() != n_samples {
        return Err(PanganError::dimension_mismatch(
            "labels",
            n_samples,
            labels.len(),
        ));
    }

    if let Some((row, col)) = data.first_non_finite() {
        return Err(PanganError::NonFinite { row, col });
    }
    check_distance_range(data)?;

    let mut clusters: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, &label) in labels.iter().enumerate() {
        clusters.entry(label).or_default().push(i);
    }
    if clusters.len() < 2 {
        return Err(PanganError::DegenerateClustering {
            n_labels: clusters.len(),
        });
    }

    let distances = Distances::new(data);

    let per_row: Vec<f64> = (0..n_samples)
        .map(|i| {
            let own = labels[i];
            let members = &clusters[&own];
            let a_i = if members.len() > 1 {
                let total: f64 = members.iter().map(|&j| distances.get(i, j)).sum();
                total / (members.len() - 1) as f64
            } else {
                0.0
            };
            let b_i = clusters
                .iter()
                .filter(|(label, _)| **label != own)
                .map(|(_, others)| distances.mean_to(i, others))
                .fold(f64::INFINITY, f64::min);
            silhouette_coefficient(a_i, b_i)
        })
        .collect();

    let mean = per_row.iter().sum::<f64>() / n_samples as f64;

    let per_cluster = clusters
        .iter()
        .map(|(&cluster, members)| {
            let mut values: Vec<f64> = members.iter().map(|&i| per_row[i]).collect();
            values.sort_by(f64::total_cmp);
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            ClusterSilhouette {
                cluster,
                values,
                mean,
            }
        })
        .collect();

    tracing::debug!(n_samples, n_clusters = clusters.len(), mean, "silhouette computed");

    Ok(SilhouetteAnalysis {
        per_row,
        mean,
        per_cluster,
    })
}

/// Silhouette coefficient of every row.
///
/// # Errors
///
/// Same as [`silhouette`].
pub fn silhouette_samples(data: &Matrix<f64>, labels: &[usize]) -> Result<Vec<f64>> {
    silhouette(data, labels).map(|a| a.per_row)
}

/// Mean silhouette coefficient over all rows.
///
/// # Errors
///
/// Same as [`silhouette`].
pub fn silhouette_score(data: &Matrix<f64>, labels: &[usize]) -> Result<f64> {
    silhouette(data, labels).map(|a| a.mean)
}

#[cfg(test)]
#[path = "silhouette_tests.rs"]
mod tests;
