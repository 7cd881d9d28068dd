use std::path::PathBuf;

use thiserror::Error;

/// Failure kinds of a single conversion pass. All of them are terminal for that pass.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Imported table is empty")]
    EmptyInput,
    #[error("Malformed table at data row {row}: {reason}")]
    MalformedTable { row: usize, reason: MalformedReason },
    #[error("Could not read {path:?}")]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Could not write {path:?}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("continuation row before any feature header")]
    ContinuationBeforeHeader,
    #[error("point row without an id")]
    UnnamedPoint,
    #[error("lat/lon is not a finite number")]
    NonFiniteCoordinate,
}

impl ConversionError {
    pub fn unreadable(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::UnreadableSource {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn write_failure(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::WriteFailure {
            path: path.into(),
            source: source.into(),
        }
    }
}
