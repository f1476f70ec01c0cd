//! Matrix type for 2D numeric data.

use crate::error::{PanganError, Result};
use serde::{Deserialize, Serialize};

/// A 2D matrix of floating-point values (row-major storage).
///
/// Rows are the entities being clustered, columns the measured features.
///
/// # Examples
///
/// ```
/// use pangan::primitives::Matrix;
///
/// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("data length matches rows * cols");
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Copy> Matrix<T> {
    /// Creates a new matrix from a vector of data.
    ///
    /// # Errors
    ///
    /// Returns an error if data length doesn't match rows * cols.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(PanganError::dimension_mismatch(
                "rows * cols",
                rows * cols,
                data.len(),
            ));
        }
        Ok(Self { data, rows, cols })
    }

    /// Builds a matrix from a list of equally sized rows.
    ///
    /// # Errors
    ///
    /// Returns an error if rows have different lengths.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(PanganError::dimension_mismatch("row length", cols, row.len()));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Returns true when the matrix holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Gets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    /// Sets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    /// Returns a row as a slice.
    ///
    /// # Panics
    ///
    /// Panics if the row index is out of bounds.
    #[must_use]
    pub fn row(&self, row_idx: usize) -> &[T] {
        let start = row_idx * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Iterates over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        (0..self.rows).map(move |i| self.row(i))
    }

    /// Returns a column as an owned vector.
    #[must_use]
    pub fn column(&self, col_idx: usize) -> Vec<T> {
        (0..self.rows)
            .map(|row| self.data[row * self.cols + col_idx])
            .collect()
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Transposes the matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..self.cols {
            for i in 0..self.rows {
                data.push(self.data[i * self.cols + j]);
            }
        }
        Self {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }
}

impl Matrix<f64> {
    /// Creates a matrix of zeros.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Returns the first `(row, col)` holding NaN or an infinity.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<(usize, usize)> {
        self.data
            .iter()
            .position(|v| !v.is_finite())
            .map(|idx| (idx / self.cols, idx % self.cols))
    }

    /// Sum over columns of the squared value range.
    ///
    /// Bounds the squared distance between any two rows and between a row
    /// and any mean of rows. Infinite when a range overflows.
    #[must_use]
    pub fn squared_spread(&self) -> f64 {
        (0..self.cols)
            .map(|j| {
                let (lo, hi) = (0..self.rows)
                    .map(|i| self.data[i * self.cols + j])
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                        (lo.min(v), hi.max(v))
                    });
                let range = if self.rows == 0 { 0.0 } else { hi - lo };
                range * range
            })
            .sum()
    }

    /// Mutable access to one row.
    pub(crate) fn row_mut(&mut self, row_idx: usize) -> &mut [f64] {
        let start = row_idx * self.cols;
        &mut self.data[start..start + self.cols]
    }
}

/// Rejects data whose squared distances could overflow `f64`.
///
/// Every squared distance k-means and silhouette compute, summed over all
/// rows, stays below `n_rows * squared_spread`.
pub(crate) fn check_distance_range(x: &Matrix<f64>) -> Result<()> {
    let bound = x.squared_spread() * x.n_rows() as f64;
    if bound.is_finite() {
        Ok(())
    } else {
        Err(PanganError::invalid_parameter(
            "data",
            "values too far apart",
            "pairwise squared distances representable as f64 (rescale the data)",
        ))
    }
}

/// Squared Euclidean distance between two equally sized slices.
#[must_use]
pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Euclidean distance between two equally sized slices.
#[must_use]
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    squared_euclidean(a, b).sqrt()
}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;
