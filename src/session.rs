//! One clustering experiment, from uploaded table to report.
//!
//! Every parameter the user can pick lives in a [`ClusterRequest`]; the
//! [`run_experiment`] pipeline is a pure function of the table, the request
//! and the allowed cluster range. Two runs never share mutable state.
//!
//! ```
//! use pangan::data::CsvLoader;
//! use pangan::session::{run_experiment, ClusterLimits, ClusterRequest};
//!
//! let csv = ",Bogor,Depok,Surabaya,Malang\nBeras,1,1,10,10\nGula Pasir,1,2,10,11\n";
//! let frame = CsvLoader::from_reader(csv.as_bytes()).expect("valid CSV");
//!
//! let request = ClusterRequest::new(2);
//! let report = run_experiment(&frame, &request, &ClusterLimits::default()).expect("valid run");
//! assert_eq!(report.label_of("Bogor"), report.label_of("Depok"));
//! assert!(report.mean_silhouette().expect("requested by default") > 0.9);
//! ```

use crate::cluster::{KMeans, DEFAULT_MAX_ITER, DEFAULT_N_INIT};
use crate::data::DataFrame;
use crate::error::{PanganError, Result};
use crate::metrics::silhouette;
use crate::preprocessing::MinMaxScaler;
use crate::report::ClusterReport;
use crate::traits::{Transformer, UnsupervisedEstimator};
use serde::{Deserialize, Serialize};

/// Default number of clusters.
pub const DEFAULT_N_CLUSTERS: usize = 3;

/// Parameters of one clustering run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterRequest {
    /// Number of clusters `K`.
    pub n_clusters: usize,
    /// Seed for centroid initialization.
    pub random_state: u64,
    /// Compute silhouette analysis.
    pub show_silhouette: bool,
    /// Treat columns as entities (flip the table before clustering).
    pub transpose: bool,
    /// Min-Max scale features before clustering.
    pub normalize: bool,
    /// Lloyd iteration cap per restart.
    pub max_iter: usize,
    /// Number of seeded restarts.
    pub n_init: usize,
}

impl Default for ClusterRequest {
    fn default() -> Self {
        Self {
            n_clusters: DEFAULT_N_CLUSTERS,
            random_state: 0,
            show_silhouette: true,
            transpose: true,
            normalize: false,
            max_iter: DEFAULT_MAX_ITER,
            n_init: DEFAULT_N_INIT,
        }
    }
}

impl ClusterRequest {
    /// Request for `n_clusters` with every other field at its default.
    #[must_use]
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            ..Self::default()
        }
    }

    /// Sets the seed for centroid initialization.
    #[must_use]
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = seed;
        self
    }

    /// Enables or disables silhouette analysis.
    #[must_use]
    pub fn with_silhouette(mut self, show: bool) -> Self {
        self.show_silhouette = show;
        self
    }

    /// Clusters the columns of the table (`true`) or its rows as given.
    #[must_use]
    pub fn with_transpose(mut self, transpose: bool) -> Self {
        self.transpose = transpose;
        self
    }

    /// Min-Max scales every feature into `[0, 1]` before clustering.
    #[must_use]
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Sets the Lloyd iteration cap per restart.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the number of seeded restarts.
    #[must_use]
    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init;
        self
    }
}

/// Allowed range for `K`. The upper bound is further capped by the number
/// of entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterLimits {
    /// Smallest selectable `K`.
    pub min_clusters: usize,
    /// Largest selectable `K`.
    pub max_clusters: usize,
}

impl Default for ClusterLimits {
    fn default() -> Self {
        Self {
            min_clusters: 2,
            max_clusters: 10,
        }
    }
}

impl ClusterLimits {
    /// Creates limits, rejecting ranges that admit no `K ≥ 2`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `min < 2` or `max < min`.
    pub fn new(min_clusters: usize, max_clusters: usize) -> Result<Self> {
        if min_clusters < 2 {
            return Err(PanganError::invalid_parameter(
                "min_clusters",
                min_clusters,
                ">= 2",
            ));
        }
        if max_clusters < min_clusters {
            return Err(PanganError::invalid_parameter(
                "max_clusters",
                max_clusters,
                format!(">= min_clusters ({min_clusters})"),
            ));
        }
        Ok(Self {
            min_clusters,
            max_clusters,
        })
    }

    /// Largest `K` allowed for `n_rows` entities.
    #[must_use]
    pub fn upper_bound(&self, n_rows: usize) -> usize {
        self.max_clusters.min(n_rows)
    }

    /// Checks `k` against the limits and the entity count.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the effective range.
    pub fn check(&self, k: usize, n_rows: usize) -> Result<()> {
        let upper = self.upper_bound(n_rows);
        if k < self.min_clusters || k > upper {
            return Err(PanganError::invalid_parameter(
                "n_clusters",
                k,
                format!(
                    "{} <= k <= min({}, {n_rows} rows) = {upper}",
                    self.min_clusters, self.max_clusters
                ),
            ));
        }
        Ok(())
    }
}

/// Runs one experiment: orient the table, validate `K`, optionally scale,
/// cluster, evaluate, and assemble the report.
///
/// # Errors
///
/// - `EmptyInput` if the oriented table has no rows
/// - `InvalidParameter` if `K` falls outside the limits, before any
///   computation
/// - `DegenerateClustering` if silhouette was requested and fewer than two
///   clusters are populated
/// - any clustering or scaling error
pub fn run_experiment(
    frame: &DataFrame,
    request: &ClusterRequest,
    limits: &ClusterLimits,
) -> Result<ClusterReport> {
    let oriented = if request.transpose {
        frame.transpose()?
    } else {
        frame.clone()
    };

    let (n_rows, n_features) = oriented.shape();
    if n_rows == 0 || n_features == 0 {
        return Err(PanganError::empty_input("no entities to cluster"));
    }
    limits.check(request.n_clusters, n_rows)?;

    let mut matrix = oriented.to_matrix()?;
    if request.normalize {
        matrix = MinMaxScaler::new().fit_transform(&matrix)?;
    }

    let fit = KMeans::new(request.n_clusters)
        .with_random_state(request.random_state)
        .with_max_iter(request.max_iter)
        .with_n_init(request.n_init)
        .fit(&matrix)?;

    let analysis = if request.show_silhouette {
        let n_labels = fit.labels().n_distinct();
        if n_labels < 2 {
            return Err(PanganError::DegenerateClustering { n_labels });
        }
        Some(silhouette(&matrix, fit.labels().as_slice())?)
    } else {
        None
    };

    let features: Vec<String> = oriented
        .column_names()
        .iter()
        .map(|n| (*n).to_string())
        .collect();
    let report = ClusterReport::new(
        oriented.index(),
        &features,
        &fit,
        analysis,
        request.random_state,
    )?
    .with_normalized(request.normalize);

    tracing::info!(
        entities = n_rows,
        features = n_features,
        k = request.n_clusters,
        seed = request.random_state,
        inertia = report.inertia(),
        mean_silhouette = ?report.mean_silhouette(),
        "experiment complete"
    );

    Ok(report)
}
