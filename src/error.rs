//! Error types for loading and writing search indexes.

use std::path::PathBuf;

use thiserror::Error;

use crate::io::ExitCode;

/// The stored structure does not match `{"docs": [...]}` or a record is
/// missing a required string field.
///
/// There is no partial success: one bad record fails the whole load.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}: {reason}", scope(.record))]
pub struct MalformedRecordError {
    /// Position of the offending record in `docs`, `None` for shape errors.
    pub record: Option<usize>,
    pub reason: String,
}

impl MalformedRecordError {
    /// Top-level shape error (no `docs` key, not an object, bad wrapper).
    pub fn shape(reason: impl Into<String>) -> Self {
        Self {
            record: None,
            reason: reason.into(),
        }
    }

    /// Error in the record at position `index`.
    pub fn record(index: usize, reason: impl Into<String>) -> Self {
        Self {
            record: Some(index),
            reason: reason.into(),
        }
    }
}

fn scope(record: &Option<usize>) -> String {
    match record {
        Some(index) => format!("malformed record #{index}"),
        None => "malformed search index".to_string(),
    }
}

#[derive(Error, Debug)]
pub enum IndexError {
    #[error(transparent)]
    Malformed(#[from] MalformedRecordError),

    #[error("Failed to read '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{name}' is not a valid script variable name")]
    InvalidVariable { name: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IndexError {
    /// Exit code the CLI reports for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Malformed(_) => ExitCode::MalformedIndex,
            Self::FileRead { .. } | Self::FileWrite { .. } => ExitCode::IoError,
            Self::InvalidVariable { .. } | Self::Serialization(_) => ExitCode::GeneralError,
        }
    }

    /// Recovery suggestions shown alongside the error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Malformed(_) => vec![
                "The documentation build that produced this index is defective".to_string(),
                "Regenerate the site and load the new search index".to_string(),
            ],
            Self::FileRead { .. } => {
                vec!["Check the path, or set index.path in .docindex/settings.toml".to_string()]
            }
            Self::FileWrite { .. } => {
                vec!["Check that the output directory exists and is writable".to_string()]
            }
            Self::InvalidVariable { .. } => vec![
                "Use a JavaScript identifier such as documenterSearchIndex".to_string(),
                "Check --variable or index.variable_name in .docindex/settings.toml".to_string(),
            ],
            Self::Serialization(_) => Vec::new(),
        }
    }
}

pub type IndexResult<T> = Result<T, IndexError>;
