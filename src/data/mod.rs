//! `DataFrame` module for labelled price tables.
//!
//! A minimal table with a row index and named numeric columns, enough to
//! hold one uploaded spreadsheet, flip its orientation and hand a
//! [`Matrix`] to the clustering engine.

mod excel;
mod loader;

pub use excel::ExcelLoader;
pub use loader::CsvLoader;

use crate::error::{PanganError, Result};
use crate::primitives::Matrix;
use serde::Serialize;
use std::path::Path;

/// Workbook extensions read by [`ExcelLoader`]; anything else is CSV.
pub const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Loads a price table, choosing the reader from the file extension.
///
/// # Errors
///
/// Whatever [`ExcelLoader::load`] or [`CsvLoader::load`] returns.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
    let path = path.as_ref();
    let is_workbook = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| WORKBOOK_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
    if is_workbook {
        ExcelLoader::load(path)
    } else {
        CsvLoader::load(path)
    }
}

/// A minimal `DataFrame` with a row index and named columns.
///
/// # Examples
///
/// ```
/// use pangan::data::DataFrame;
///
/// let columns = vec![
///     ("Bogor".to_string(), vec![11_500.0, 27_000.0]),
///     ("Depok".to_string(), vec![11_800.0, 26_500.0]),
/// ];
/// let index = vec!["Beras".to_string(), "Telur Ayam".to_string()];
/// let df = DataFrame::new(index, columns).expect("valid columns");
/// assert_eq!(df.shape(), (2, 2));
///
/// // Cities become rows.
/// let cities = df.transpose().expect("unique row labels");
/// assert_eq!(cities.index(), &["Bogor".to_string(), "Depok".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame {
    index: Vec<String>,
    columns: Vec<(String, Vec<f64>)>,
    n_rows: usize,
    labelled_index: bool,
}

impl DataFrame {
    /// Creates a new `DataFrame` from row labels and named columns.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no columns, columns have different
    /// lengths, the index length differs from the row count, or column
    /// names are empty or duplicated.
    pub fn new(index: Vec<String>, columns: Vec<(String, Vec<f64>)>) -> Result<Self> {
        let mut df = Self::with_default_index(columns)?;
        if index.len() != df.n_rows {
            return Err(PanganError::dimension_mismatch(
                "index length",
                df.n_rows,
                index.len(),
            ));
        }
        df.index = index;
        df.labelled_index = true;
        Ok(df)
    }

    /// Creates a `DataFrame` whose rows are labelled `row_0`, `row_1`, ...
    ///
    /// # Errors
    ///
    /// Same column checks as [`DataFrame::new`].
    pub fn with_default_index(columns: Vec<(String, Vec<f64>)>) -> Result<Self> {
        if columns.is_empty() {
            return Err(PanganError::empty_input("DataFrame must have at least one column"));
        }

        let n_rows = columns[0].1.len();

        for (name, col) in &columns {
            if col.len() != n_rows {
                return Err(PanganError::dimension_mismatch(
                    &format!("length of column '{name}'"),
                    n_rows,
                    col.len(),
                ));
            }
            if name.is_empty() {
                return Err(PanganError::Parse {
                    line: 1,
                    message: "column names cannot be empty".to_string(),
                });
            }
        }

        let mut names: Vec<&str> = columns.iter().map(|(n, _)| n.as_str()).collect();
        names.sort_unstable();
        if let Some(dup) = names.windows(2).find(|w| w[0] == w[1]) {
            return Err(PanganError::Parse {
                line: 1,
                message: format!("duplicate column name '{}'", dup[0]),
            });
        }

        Ok(Self {
            index: (0..n_rows).map(|i| format!("row_{i}")).collect(),
            columns,
            n_rows,
            labelled_index: false,
        })
    }

    /// Builds a `DataFrame` from a matrix plus row and column labels.
    ///
    /// # Errors
    ///
    /// Returns an error if label counts don't match the matrix shape.
    pub fn from_matrix(index: Vec<String>, names: Vec<String>, matrix: &Matrix<f64>) -> Result<Self> {
        if names.len() != matrix.n_cols() {
            return Err(PanganError::dimension_mismatch(
                "column names",
                matrix.n_cols(),
                names.len(),
            ));
        }
        let columns = names
            .into_iter()
            .enumerate()
            .map(|(j, name)| (name, matrix.column(j)))
            .collect();
        Self::new(index, columns)
    }

    /// Returns the shape as (`n_rows`, `n_cols`).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Row labels.
    #[must_use]
    pub fn index(&self) -> &[String] {
        &self.index
    }

    /// True when row labels came from the data rather than `row_N` defaults.
    #[must_use]
    pub fn has_labelled_index(&self) -> bool {
        self.labelled_index
    }

    /// Returns the column names.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Returns a column by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the column doesn't exist.
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
            .ok_or_else(|| PanganError::invalid_parameter("column", name, "an existing column name"))
    }

    /// Returns a row as a vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of bounds.
    pub fn row(&self, idx: usize) -> Result<Vec<f64>> {
        if idx >= self.n_rows {
            return Err(PanganError::invalid_parameter(
                "row",
                idx,
                format!("< {}", self.n_rows),
            ));
        }
        Ok(self.columns.iter().map(|(_, col)| col[idx]).collect())
    }

    /// Converts the `DataFrame` to a row-major Matrix of shape (`n_rows`, `n_cols`).
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if a column's length disagrees with the
    /// row count.
    pub fn to_matrix(&self) -> Result<Matrix<f64>> {
        if let Some((name, col)) = self.columns.iter().find(|(_, c)| c.len() != self.n_rows) {
            return Err(PanganError::dimension_mismatch(
                &format!("rows in column '{name}'"),
                self.n_rows,
                col.len(),
            ));
        }

        let mut data = Vec::with_capacity(self.n_rows * self.columns.len());

        for row_idx in 0..self.n_rows {
            for (_, col) in &self.columns {
                data.push(col[row_idx]);
            }
        }

        Matrix::from_vec(self.n_rows, self.columns.len(), data)
    }

    /// Swaps rows and columns: column names become the index and row labels
    /// become column names.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame has no rows or its row labels repeat.
    pub fn transpose(&self) -> Result<Self> {
        if self.n_rows == 0 {
            return Err(PanganError::empty_input("cannot transpose a table without rows"));
        }
        let index = self.column_names().iter().map(|n| (*n).to_string()).collect();
        let columns = self
            .index
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let values = self.columns.iter().map(|(_, col)| col[i]).collect();
                (label.clone(), values)
            })
            .collect();
        Self::new(index, columns)
    }

    /// Returns an iterator over columns as (name, values) pairs.
    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    /// Returns descriptive statistics for all columns.
    #[must_use]
    pub fn describe(&self) -> Vec<ColumnStats> {
        self.columns
            .iter()
            .map(|(name, col)| {
                let count = col.len();
                let mean = if count == 0 {
                    0.0
                } else {
                    col.iter().sum::<f64>() / count as f64
                };
                let std = if count < 2 {
                    0.0
                } else {
                    let ss: f64 = col.iter().map(|v| (v - mean).powi(2)).sum();
                    (ss / (count - 1) as f64).sqrt()
                };

                let mut sorted = col.clone();
                sorted.sort_by(f64::total_cmp);

                let min = sorted.first().copied().unwrap_or(0.0);
                let max = sorted.last().copied().unwrap_or(0.0);
                let median = if sorted.is_empty() {
                    0.0
                } else if sorted.len() % 2 == 0 {
                    (sorted[sorted.len() / 2 - 1] + sorted[sorted.len() / 2]) / 2.0
                } else {
                    sorted[sorted.len() / 2]
                };

                ColumnStats {
                    name: name.clone(),
                    count,
                    mean,
                    std,
                    min,
                    median,
                    max,
                }
            })
            .collect()
    }
}

/// Descriptive statistics for a column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    /// Column name.
    pub name: String,
    /// Number of elements.
    pub count: usize,
    /// Mean value.
    pub mean: f64,
    /// Sample standard deviation.
    pub std: f64,
    /// Minimum value.
    pub min: f64,
    /// Median value.
    pub median: f64,
    /// Maximum value.
    pub max: f64,
}

#[cfg(test)]
#[path = "data_tests.rs"]
mod tests;
