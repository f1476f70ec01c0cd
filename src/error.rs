//! Error types for pangan operations.
//!
//! Every failure a clustering run can hit is surfaced before any partial
//! result is produced.

use std::fmt;

/// Main error type for pangan operations.
///
/// # Examples
///
/// ```
/// use pangan::error::PanganError;
///
/// let err = PanganError::InvalidParameter {
///     param: "n_clusters".to_string(),
///     value: "1".to_string(),
///     constraint: ">= 2".to_string(),
/// };
/// assert!(err.to_string().contains("n_clusters"));
/// ```
#[derive(Debug)]
pub enum PanganError {
    /// A parameter (cluster count, iteration cap, ...) is out of range.
    InvalidParameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Input matrix or table has no usable rows or columns.
    EmptyInput {
        /// What was empty
        context: String,
    },

    /// Fewer than two distinct cluster labels, so silhouette is undefined.
    DegenerateClustering {
        /// Number of distinct labels found
        n_labels: usize,
    },

    /// Matrix/label dimensions don't match.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// A NaN or infinite value in the feature matrix.
    NonFinite {
        /// Row index
        row: usize,
        /// Column index
        col: usize,
    },

    /// Malformed spreadsheet content.
    Parse {
        /// 1-based line number in the source file (header is line 1)
        line: usize,
        /// Error description
        message: String,
    },

    /// Invalid dashboard configuration.
    Config {
        /// Error description
        message: String,
    },

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// Serialization/deserialization error.
    Serialization(String),
}

impl fmt::Display for PanganError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanganError::InvalidParameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter: {param} = {value}, expected {constraint}"
                )
            }
            PanganError::EmptyInput { context } => write!(f, "Empty input: {context}"),
            PanganError::DegenerateClustering { n_labels } => {
                write!(
                    f,
                    "Degenerate clustering: {n_labels} distinct label(s), silhouette needs at least 2"
                )
            }
            PanganError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {expected}, got {actual}")
            }
            PanganError::NonFinite { row, col } => {
                write!(f, "Non-finite value at row {row}, column {col}")
            }
            PanganError::Parse { line, message } => {
                write!(f, "Parse error on line {line}: {message}")
            }
            PanganError::Config { message } => write!(f, "Configuration error: {message}"),
            PanganError::Io(e) => write!(f, "I/O error: {e}"),
            PanganError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for PanganError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PanganError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PanganError {
    fn from(err: std::io::Error) -> Self {
        PanganError::Io(err)
    }
}

impl From<serde_json::Error> for PanganError {
    fn from(err: serde_json::Error) -> Self {
        PanganError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for PanganError {
    fn from(err: csv::Error) -> Self {
        let line = err
            .position()
            .map_or(0, |pos| usize::try_from(pos.line()).unwrap_or(usize::MAX));
        if err.is_io_error() {
            if let csv::ErrorKind::Io(io) = err.into_kind() {
                return PanganError::Io(io);
            }
            return PanganError::Parse {
                line,
                message: "unreadable input".to_string(),
            };
        }
        PanganError::Parse {
            line,
            message: err.to_string(),
        }
    }
}

impl PanganError {
    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(
        param: &str,
        value: impl fmt::Display,
        constraint: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.into(),
        }
    }

    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::EmptyInput {
            context: context.to_string(),
        }
    }

    /// True for errors caused by the caller's parameters rather than the data.
    #[must_use]
    pub fn is_parameter_error(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, PanganError>;
