//! Dashboard configuration.
//!
//! Built-in defaults hold every piece of static data the dashboard shows.
//! A JSON file may override any subset of fields, and a few environment
//! variables override the file.
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `PANGAN_CONFIG` | JSON config file, when no explicit path is given | (none) |
//! | `PANGAN_IMAGE_DIR` | Directory holding trend chart PNGs | `img` |
//! | `PANGAN_DATA_DIR` | Directory holding the template datasets | `data` |
//! | `PANGAN_MAX_CLUSTERS` | Largest selectable `K` | `10` |

use crate::error::{PanganError, Result};
use crate::reference::{default_templates, ReferenceMap, Template, COMMODITIES};
use crate::session::ClusterLimits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a config file.
pub const ENV_CONFIG: &str = "PANGAN_CONFIG";
/// Environment variable for the trend image directory.
pub const ENV_IMAGE_DIR: &str = "PANGAN_IMAGE_DIR";
/// Environment variable for the template directory.
pub const ENV_DATA_DIR: &str = "PANGAN_DATA_DIR";
/// Environment variable for the largest selectable `K`.
pub const ENV_MAX_CLUSTERS: &str = "PANGAN_MAX_CLUSTERS";

/// Trend chart settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Directory the chart images live in.
    pub image_dir: PathBuf,
    /// Number of reference clusters with their own charts.
    pub n_clusters: usize,
    /// Commodities with charts, in menu order.
    pub commodities: Vec<String>,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from("img"),
            n_clusters: 3,
            commodities: COMMODITIES.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

/// Complete dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory the template datasets live in.
    pub data_dir: PathBuf,
    /// Selectable range for `K`.
    pub limits: ClusterLimits,
    /// Reference city map.
    pub map: ReferenceMap,
    /// Trend charts.
    pub trend: TrendConfig,
    /// Downloadable datasets.
    pub templates: Vec<Template>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            limits: ClusterLimits::default(),
            map: ReferenceMap::default(),
            trend: TrendConfig::default(),
            templates: default_templates(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| PanganError::Config {
        message: format!("invalid {key}: {e}"),
    })
}

impl DashboardConfig {
    /// Reads a JSON config file. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the file cannot be read or parsed, or if the
    /// result fails [`DashboardConfig::validate`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| PanganError::Config {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|e| PanganError::Config {
            message: format!("invalid {}: {e}", path.display()),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Resolves the effective configuration: the explicit file, else the
    /// file named by `PANGAN_CONFIG`, else the defaults; then environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns `Config` for unreadable files or malformed overrides.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        Self::resolve_with(explicit, |key| std::env::var(key).ok())
    }

    /// [`DashboardConfig::resolve`] with a custom variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`DashboardConfig::resolve`].
    pub fn resolve_with<F>(explicit: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_env = lookup(ENV_CONFIG).map(PathBuf::from);
        let mut config = match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config file");
                Self::load(&path)?
            }
            None => Self::default(),
        };
        config.apply_overrides(lookup)?;
        Ok(config)
    }

    /// Applies `PANGAN_IMAGE_DIR`, `PANGAN_DATA_DIR` and
    /// `PANGAN_MAX_CLUSTERS` from `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `Config` for an unparsable value or an invalid result.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_IMAGE_DIR) {
            self.trend.image_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(value) = lookup(ENV_MAX_CLUSTERS) {
            self.limits.max_clusters = parse_env(ENV_MAX_CLUSTERS, &value)?;
        }
        self.validate()
    }

    /// Checks internal consistency.
    ///
    /// # Errors
    ///
    /// Returns `Config` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        ClusterLimits::new(self.limits.min_clusters, self.limits.max_clusters).map_err(|e| {
            PanganError::Config {
                message: e.to_string(),
            }
        })?;
        if self.trend.n_clusters == 0 {
            return Err(PanganError::Config {
                message: "trend.n_clusters must be at least 1".to_string(),
            });
        }
        if self.trend.commodities.is_empty() {
            return Err(PanganError::Config {
                message: "trend.commodities must not be empty".to_string(),
            });
        }
        if let Some(city) = self
            .map
            .cities
            .iter()
            .find(|c| !c.latitude.is_finite() || !c.longitude.is_finite() || c.cluster == 0)
        {
            return Err(PanganError::Config {
                message: format!("map city '{}' has invalid coordinates or cluster", city.name),
            });
        }
        Ok(())
    }
}
