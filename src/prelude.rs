//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use pangan::prelude::*;
//! ```

pub use crate::cluster::{ClusterAssignment, ClusterFit, KMeans};
pub use crate::data::{load_table, CsvLoader, DataFrame, ExcelLoader};
pub use crate::metrics::{inertia, silhouette, silhouette_score, SilhouetteAnalysis};
pub use crate::preprocessing::MinMaxScaler;
pub use crate::primitives::Matrix;
pub use crate::report::ClusterReport;
pub use crate::session::{run_experiment, ClusterLimits, ClusterRequest};
pub use crate::traits::{Transformer, UnsupervisedEstimator};
