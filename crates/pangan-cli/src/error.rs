//! Error types for pangan-cli.

use pangan::PanganError;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Not a file (e.g., directory)
    #[error("Not a file: {0}")]
    NotAFile(PathBuf),

    /// Input could not be parsed as a price table
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A parameter outside its allowed range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Clustering produced fewer than two populated clusters
    #[error("Degenerate clustering: {0}")]
    Degenerate(String),

    /// Unknown template, commodity or similar lookup miss
    #[error("Unknown {kind}: {name}")]
    Unknown { kind: &'static str, name: String },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other library error
    #[error("{0}")]
    Pangan(String),
}

impl CliError {
    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }

    pub(crate) fn code(&self) -> u8 {
        match self {
            Self::Pangan(_) => 1,
            Self::InvalidParameter(_) => 2,
            Self::FileNotFound(_) | Self::NotAFile(_) => 3,
            Self::InvalidInput(_) => 4,
            Self::Degenerate(_) => 5,
            Self::Unknown { .. } => 6,
            Self::Io(_) => 7,
            Self::Config(_) => 8,
        }
    }
}

impl From<PanganError> for CliError {
    fn from(e: PanganError) -> Self {
        match e {
            PanganError::InvalidParameter { .. } => Self::InvalidParameter(e.to_string()),
            PanganError::EmptyInput { .. }
            | PanganError::Parse { .. }
            | PanganError::NonFinite { .. }
            | PanganError::DimensionMismatch { .. } => Self::InvalidInput(e.to_string()),
            PanganError::DegenerateClustering { .. } => Self::Degenerate(e.to_string()),
            PanganError::Config { message } => Self::Config(message),
            PanganError::Io(io) => Self::Io(io),
            other => Self::Pangan(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Pangan(format!("JSON encoding failed: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = [
            CliError::Pangan(String::new()),
            CliError::InvalidParameter(String::new()),
            CliError::FileNotFound(PathBuf::new()),
            CliError::InvalidInput(String::new()),
            CliError::Degenerate(String::new()),
            CliError::Unknown {
                kind: "template",
                name: String::new(),
            },
            CliError::Io(std::io::Error::other("x")),
            CliError::Config(String::new()),
        ];
        let mut codes: Vec<u8> = errors.iter().map(CliError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert_eq!(CliError::NotAFile(PathBuf::new()).code(), 3);
    }

    #[test]
    fn test_library_errors_map_by_kind() {
        let e: CliError = PanganError::invalid_parameter("n_clusters", 1, ">= 2").into();
        assert_eq!(e.code(), 2);
        let e: CliError = PanganError::Parse {
            line: 3,
            message: "bad".to_string(),
        }
        .into();
        assert_eq!(e.code(), 4);
        assert!(e.to_string().contains("line 3"));
        let e: CliError = PanganError::DegenerateClustering { n_labels: 1 }.into();
        assert_eq!(e.code(), 5);
    }
}
