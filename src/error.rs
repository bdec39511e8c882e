//! Error types for loading and summarizing result trees.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised when a result tree cannot be summarized.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// No root result was supplied.
    #[error("no test result to summarize: {0}")]
    MissingRoot(String),

    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a valid result tree.
    #[error("invalid result tree in {source_name}")]
    Parse {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },
}
