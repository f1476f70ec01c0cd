//! Preprocessing transformers for feature normalization.
//!
//! Price columns span very different magnitudes (rice per kilo against beef
//! per kilo), so the bundled normalized template was produced by Min-Max
//! scaling every commodity into `[0, 1]`.
//!
//! # Example
//!
//! ```
//! use pangan::prelude::*;
//! use pangan::preprocessing::MinMaxScaler;
//!
//! let data = Matrix::from_vec(4, 2, vec![
//!     11_000.0, 110_000.0,
//!     12_000.0, 120_000.0,
//!     13_000.0, 130_000.0,
//!     14_000.0, 140_000.0,
//! ]).expect("valid matrix dimensions");
//!
//! let mut scaler = MinMaxScaler::new();
//! let scaled = scaler.fit_transform(&data).expect("fit_transform should succeed");
//! assert_eq!(scaled.get(0, 1), 0.0);
//! assert_eq!(scaled.get(3, 0), 1.0);
//! ```

use crate::data::DataFrame;
use crate::error::{PanganError, Result};
use crate::primitives::Matrix;
use crate::traits::Transformer;
use serde::{Deserialize, Serialize};

/// Scales each feature to a given range, `[0, 1]` by default.
///
/// x' = (x - min) / (max - min) * (`feature_max` - `feature_min`) + `feature_min`
///
/// A constant feature maps to `feature_min`.
///
/// # Example
///
/// ```
/// use pangan::prelude::*;
/// use pangan::preprocessing::MinMaxScaler;
///
/// let data = Matrix::from_vec(3, 2, vec![
///     0.0, 0.0,
///     5.0, 10.0,
///     10.0, 20.0,
/// ]).expect("valid matrix dimensions");
///
/// let mut scaler = MinMaxScaler::new();
/// let scaled = scaler.fit_transform(&data).expect("fit_transform should succeed");
///
/// assert!((scaled.get(1, 0) - 0.5).abs() < 1e-12);
/// assert!((scaled.get(2, 1) - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    /// Minimum value of each feature (computed during fit).
    data_min: Option<Vec<f64>>,
    /// Maximum value of each feature (computed during fit).
    data_max: Option<Vec<f64>>,
    /// Target minimum for scaling (default 0.0).
    feature_min: f64,
    /// Target maximum for scaling (default 1.0).
    feature_max: f64,
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl MinMaxScaler {
    /// Creates a new `MinMaxScaler` with default range [0, 1].
    #[must_use]
    pub fn new() -> Self {
        Self {
            data_min: None,
            data_max: None,
            feature_min: 0.0,
            feature_max: 1.0,
        }
    }

    /// Sets the target range for scaling. Checked by `fit`.
    ///
    /// ```
    /// use pangan::preprocessing::MinMaxScaler;
    ///
    /// let scaler = MinMaxScaler::new().with_range(-1.0, 1.0);
    /// assert_eq!(scaler.feature_range(), (-1.0, 1.0));
    /// ```
    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.feature_min = min;
        self.feature_max = max;
        self
    }

    /// Target range as (min, max).
    #[must_use]
    pub fn feature_range(&self) -> (f64, f64) {
        (self.feature_min, self.feature_max)
    }

    /// Per-feature minimum seen during `fit`.
    #[must_use]
    pub fn data_min(&self) -> Option<&[f64]> {
        self.data_min.as_deref()
    }

    /// Per-feature maximum seen during `fit`.
    #[must_use]
    pub fn data_max(&self) -> Option<&[f64]> {
        self.data_max.as_deref()
    }

    /// Returns true if the scaler has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.data_min.is_some()
    }

    fn fitted_bounds(&self, x: &Matrix<f64>) -> Result<(&[f64], &[f64])> {
        let (Some(data_min), Some(data_max)) = (self.data_min.as_deref(), self.data_max.as_deref())
        else {
            return Err(PanganError::invalid_parameter(
                "scaler",
                "unfitted",
                "call fit() before transform",
            ));
        };
        if x.n_cols() != data_min.len() {
            return Err(PanganError::dimension_mismatch(
                "feature count",
                data_min.len(),
                x.n_cols(),
            ));
        }
        Ok((data_min, data_max))
    }

    /// Transforms data back to original scale.
    ///
    /// # Errors
    ///
    /// Returns an error if the scaler is not fitted or dimensions mismatch.
    pub fn inverse_transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let (data_min, data_max) = self.fitted_bounds(x)?;
        let feature_range = self.feature_max - self.feature_min;

        let mut result = x.clone();
        for i in 0..x.n_rows() {
            for (j, value) in result.row_mut(i).iter_mut().enumerate() {
                let data_range = data_max[j] - data_min[j];
                *value = if data_range.abs() > 1e-10 {
                    (*value - self.feature_min) / feature_range * data_range + data_min[j]
                } else {
                    data_min[j]
                };
            }
        }
        Ok(result)
    }
}

impl Transformer for MinMaxScaler {
    /// Computes the min and max of each feature.
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()> {
        let (n_samples, n_features) = x.shape();

        if n_samples == 0 || n_features == 0 {
            return Err(PanganError::empty_input("cannot fit a scaler on an empty matrix"));
        }
        if self.feature_min.is_nan() || self.feature_max.is_nan() || self.feature_min >= self.feature_max {
            return Err(PanganError::invalid_parameter(
                "feature_range",
                format!("({}, {})", self.feature_min, self.feature_max),
                "min < max",
            ));
        }
        if let Some((row, col)) = x.first_non_finite() {
            return Err(PanganError::NonFinite { row, col });
        }

        let mut data_min = vec![f64::INFINITY; n_features];
        let mut data_max = vec![f64::NEG_INFINITY; n_features];

        for row in x.rows() {
            for (j, &val) in row.iter().enumerate() {
                data_min[j] = data_min[j].min(val);
                data_max[j] = data_max[j].max(val);
            }
        }

        self.data_min = Some(data_min);
        self.data_max = Some(data_max);

        Ok(())
    }

    /// Scales the data to the target range.
    fn transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let (data_min, data_max) = self.fitted_bounds(x)?;
        let feature_range = self.feature_max - self.feature_min;

        let mut result = x.clone();
        for i in 0..x.n_rows() {
            for (j, value) in result.row_mut(i).iter_mut().enumerate() {
                let data_range = data_max[j] - data_min[j];
                *value = if data_range.abs() > 1e-10 {
                    (*value - data_min[j]) / data_range * feature_range + self.feature_min
                } else {
                    self.feature_min
                };
            }
        }
        Ok(result)
    }
}

/// Min-Max normalizes a table the way the bundled normalized template was
/// built.
///
/// With `transpose` set, columns are the entities and rows the features, so
/// the frame is flipped, scaled per feature and flipped back. The returned
/// frame keeps the input's orientation and labels.
///
/// # Errors
///
/// Propagates transpose and scaler errors.
pub fn normalize_frame(frame: &DataFrame, transpose: bool) -> Result<DataFrame> {
    let oriented = if transpose {
        frame.transpose()?
    } else {
        frame.clone()
    };

    let scaled = MinMaxScaler::new().fit_transform(&oriented.to_matrix()?)?;
    let names = oriented
        .column_names()
        .iter()
        .map(|n| (*n).to_string())
        .collect();
    let mut result = DataFrame::from_matrix(oriented.index().to_vec(), names, &scaled)?;

    if transpose {
        result = result.transpose()?;
    }
    if !frame.has_labelled_index() {
        result = DataFrame::with_default_index(
            result
                .iter_columns()
                .map(|(n, v)| (n.to_string(), v.to_vec()))
                .collect(),
        )?;
    }

    tracing::debug!(rows = result.n_rows(), cols = result.n_cols(), transpose, "frame normalized");
    Ok(result)
}

#[cfg(test)]
#[path = "tests_normalization_contract.rs"]
mod tests;
