//! Error type shared by every stage of the report pipeline.
//!
//! Recoverable conditions (malformed lines, missing baseline, missing metric)
//! are logged where they happen and never surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    /// Input JSONL path does not exist.
    #[error("File not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// No line of the input parsed into a record.
    #[error("No data loaded from {}; check your JSONL file", .0.display())]
    EmptyInput(PathBuf),

    /// Records were loaded but none of them names a deployment.
    #[error("Input data must include a 'deployment' field")]
    MissingDeploymentField,

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Grouping/averaging failed inside polars.
    #[error("Aggregation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// Chart backend reported a failure while drawing or encoding.
    #[error("Rendering {} failed: {message}", path.display())]
    Render { path: PathBuf, message: String },
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors that stop the whole run rather than a single metric.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ReportError::InputNotFound(_)
                | ReportError::EmptyInput(_)
                | ReportError::MissingDeploymentField
        )
    }
}
