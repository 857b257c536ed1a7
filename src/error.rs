//! Error types for loading report data.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while loading a report's records.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read data file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {name} data: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate id {id} in {name} data")]
    DuplicateId { name: String, id: u32 },
}
