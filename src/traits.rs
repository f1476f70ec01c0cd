//! Core traits for clustering estimators and data transformers.

use crate::error::Result;
use crate::primitives::Matrix;

/// Trait for unsupervised learning models.
///
/// `fit` never mutates the estimator: each call returns a fresh, owned
/// result, so two runs never share state.
///
/// # Examples
///
/// ```
/// use pangan::prelude::*;
///
/// // Create data with 2 clear clusters
/// let data = Matrix::from_vec(6, 2, vec![
///     0.0, 0.0, 0.1, 0.1, 0.2, 0.0,  // Cluster 1
///     10.0, 10.0, 10.1, 10.1, 10.0, 10.2,  // Cluster 2
/// ]).unwrap();
///
/// let kmeans = KMeans::new(2).with_random_state(42);
/// let fit = kmeans.fit(&data).unwrap();
/// assert_eq!(fit.labels().len(), 6);
/// ```
pub trait UnsupervisedEstimator {
    /// The fitted result of one run.
    type Fit;

    /// Fits the model to data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails (empty data, invalid parameters, etc.).
    fn fit(&self, x: &Matrix<f64>) -> Result<Self::Fit>;
}

/// Trait for data transformers (scalers).
pub trait Transformer {
    /// Fits the transformer to data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()>;

    /// Transforms data using fitted parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if transformer is not fitted.
    fn transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>>;

    /// Fits and transforms in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    fn fit_transform(&mut self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        self.fit(x)?;
        self.transform(x)
    }
}
