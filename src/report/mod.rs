//! Clustering results in presentation-ready form.
//!
//! A [`ClusterReport`] pairs each K-Means label with the entity (city) it
//! belongs to, groups entities by cluster, and carries the silhouette
//! analysis the chart is drawn from. It is plain data: renderers read it,
//! nothing writes back.

mod svg;

pub use svg::{cluster_color, silhouette_svg, SVG_HEIGHT, SVG_WIDTH};

use crate::cluster::ClusterFit;
use crate::error::{PanganError, Result};
use crate::metrics::SilhouetteAnalysis;
use serde::Serialize;

/// One entity and the cluster it was assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityLabel {
    /// Entity name, taken from the row index.
    pub entity: String,
    /// Cluster label in `[0, K)`.
    pub cluster: usize,
}

/// Members of one cluster, in row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterGroup {
    /// Cluster label.
    pub cluster: usize,
    /// Member entity names.
    pub members: Vec<String>,
}

impl ClusterGroup {
    /// Member names joined with `", "`.
    #[must_use]
    pub fn joined(&self) -> String {
        self.members.join(", ")
    }
}

/// Result of one clustering experiment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterReport {
    n_clusters: usize,
    random_state: u64,
    normalized: bool,
    entities: Vec<EntityLabel>,
    groups: Vec<ClusterGroup>,
    features: Vec<String>,
    centroids: Vec<Vec<f64>>,
    inertia: f64,
    n_iter: usize,
    silhouette: Option<SilhouetteAnalysis>,
}

impl ClusterReport {
    /// Assembles a report from a fit and the labels of its rows and columns.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `entities` or `features` disagree with
    /// the fitted shape.
    pub fn new(
        entities: &[String],
        features: &[String],
        fit: &ClusterFit,
        silhouette: Option<SilhouetteAnalysis>,
        random_state: u64,
    ) -> Result<Self> {
        let labels = fit.labels();
        if entities.len() != labels.len() {
            return Err(PanganError::dimension_mismatch(
                "entity names",
                labels.len(),
                entities.len(),
            ));
        }
        let centroids = fit.centroids();
        if features.len() != centroids.n_cols() {
            return Err(PanganError::dimension_mismatch(
                "feature names",
                centroids.n_cols(),
                features.len(),
            ));
        }

        let entity_labels = entities
            .iter()
            .zip(labels.as_slice())
            .map(|(entity, &cluster)| EntityLabel {
                entity: entity.clone(),
                cluster,
            })
            .collect();

        let groups = (0..labels.n_clusters())
            .map(|cluster| ClusterGroup {
                cluster,
                members: labels
                    .members(cluster)
                    .into_iter()
                    .map(|i| entities[i].clone())
                    .collect(),
            })
            .collect();

        Ok(Self {
            n_clusters: labels.n_clusters(),
            random_state,
            normalized: false,
            entities: entity_labels,
            groups,
            features: features.to_vec(),
            centroids: centroids.rows().map(<[f64]>::to_vec).collect(),
            inertia: fit.inertia(),
            n_iter: fit.n_iter(),
            silhouette,
        })
    }

    /// Marks the report as computed on Min-Max scaled features.
    #[must_use]
    pub fn with_normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }

    /// Number of clusters `K`.
    #[must_use]
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Seed the run used.
    #[must_use]
    pub fn random_state(&self) -> u64 {
        self.random_state
    }

    /// Whether features were Min-Max scaled before clustering.
    #[must_use]
    pub fn normalized(&self) -> bool {
        self.normalized
    }

    /// Label of every entity, in row order.
    #[must_use]
    pub fn entities(&self) -> &[EntityLabel] {
        &self.entities
    }

    /// One group per cluster, `0..K`.
    #[must_use]
    pub fn groups(&self) -> &[ClusterGroup] {
        &self.groups
    }

    /// Feature (column) names.
    #[must_use]
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Centroid of each cluster, one row per label.
    #[must_use]
    pub fn centroids(&self) -> &[Vec<f64>] {
        &self.centroids
    }

    /// Within-cluster sum of squared distances.
    #[must_use]
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Lloyd iterations of the winning restart.
    #[must_use]
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    /// Silhouette analysis, if it was requested.
    #[must_use]
    pub fn silhouette(&self) -> Option<&SilhouetteAnalysis> {
        self.silhouette.as_ref()
    }

    /// Mean silhouette coefficient, if it was requested.
    #[must_use]
    pub fn mean_silhouette(&self) -> Option<f64> {
        self.silhouette.as_ref().map(SilhouetteAnalysis::mean)
    }

    /// Cluster of a named entity.
    #[must_use]
    pub fn label_of(&self, entity: &str) -> Option<usize> {
        self.entities
            .iter()
            .find(|e| e.entity == entity)
            .map(|e| e.cluster)
    }

    /// The silhouette chart as an SVG document, if silhouette was requested.
    #[must_use]
    pub fn silhouette_svg(&self) -> Option<String> {
        self.silhouette
            .as_ref()
            .map(|analysis| silhouette_svg(analysis, self.n_clusters))
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
