//! Pangan: K-Means clustering of food-commodity prices across cities.
//!
//! Pangan loads a price table (commodities × cities), clusters the cities
//! with seeded K-Means, scores the partition with silhouette analysis and
//! renders the result. It also carries the dashboard's static reference
//! material: a city map with published clusters, trend chart lookup and
//! the example datasets.
//!
//! # Quick Start
//!
//! ```
//! use pangan::prelude::*;
//!
//! // Two groups of cities by (rice, sugar) price.
//! let x = Matrix::from_rows(&[
//!     [1.0, 1.0],
//!     [1.0, 2.0],
//!     [10.0, 10.0],
//!     [10.0, 11.0],
//! ]).unwrap();
//!
//! let fit = KMeans::new(2).with_random_state(0).fit(&x).unwrap();
//! let labels = fit.labels();
//! assert_eq!(labels.label(0), labels.label(1));
//! assert_ne!(labels.label(0), labels.label(2));
//!
//! let score = silhouette_score(&x, labels.as_slice()).unwrap();
//! assert!(score > 0.9);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Row-major `Matrix<f64>`
//! - [`data`]: `DataFrame` with row labels, CSV loading and writing
//! - [`preprocessing`]: Min-Max scaling
//! - [`cluster`]: K-Means (k-means++ seeding, Lloyd iterations)
//! - [`metrics`]: Inertia and silhouette analysis
//! - [`session`]: Request state and the end-to-end experiment pipeline
//! - [`report`]: Membership tables and the silhouette chart
//! - [`reference`]: Reference city map, trend charts, example datasets
//! - [`config`]: Dashboard configuration (JSON file + environment)

pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod prelude;
pub mod preprocessing;
pub mod primitives;
pub mod reference;
pub mod report;
pub mod session;
pub mod traits;

pub use error::{PanganError, Result};
pub use primitives::Matrix;
pub use traits::{Transformer, UnsupervisedEstimator};
