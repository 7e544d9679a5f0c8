//! Error types
//!
//! The simulation itself never fails at runtime. Errors only arise at the
//! edges: building a stage from an untrusted index, or loading config files.

use std::path::PathBuf;

use thiserror::Error;

use crate::consts::STAGE_COUNT;

/// Rejected stage index
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    #[error("stage index {0} is outside 1..={STAGE_COUNT}")]
    OutOfRange(u32),
}

/// Failure loading or validating a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
