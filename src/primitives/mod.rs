//! Core compute primitives.
//!
//! [`Matrix`] is the feature-matrix representation every clustering and
//! evaluation routine consumes.

mod matrix;

pub use matrix::{euclidean, squared_euclidean, Matrix};
pub(crate) use matrix::check_distance_range;
