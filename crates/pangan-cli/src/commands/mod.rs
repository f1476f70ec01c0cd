//! Subcommand implementations.

pub(crate) mod cluster;
pub(crate) mod dataset;
pub(crate) mod map;
pub(crate) mod normalize;
pub(crate) mod trend;

use crate::error::{CliError, Result};
use pangan::config::DashboardConfig;
use std::path::Path;

/// State shared by every subcommand.
pub(crate) struct Context {
    pub(crate) config: DashboardConfig,
    pub(crate) json: bool,
}

pub(crate) fn validate_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(CliError::NotAFile(path.to_path_buf()));
    }
    Ok(())
}
