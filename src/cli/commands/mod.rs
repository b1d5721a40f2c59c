//! Command implementations for the CLI.
//!
//! Each command is implemented in its own module.

pub mod export;
pub mod init;
pub mod inspect;
pub mod validate;

use std::path::PathBuf;

use crate::config::Settings;

/// Index file named on the command line, or the configured default.
pub fn resolve_index_path(file: Option<PathBuf>, config: &Settings) -> PathBuf {
    file.unwrap_or_else(|| config.index.path.clone())
}
