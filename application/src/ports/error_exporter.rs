//! Error exporter port
//!
//! Writes misclassification records somewhere a human can review them.

use std::path::{Path, PathBuf};
use thiserror::Error;
use triage_domain::ErrorRecord;

/// Errors that can occur while exporting records
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(String),
}

/// Destination for exported error records
pub trait ErrorExporter: Send + Sync {
    /// Write `records` as one file named after `file_stem` under `dir`,
    /// creating `dir` if needed. Returns the written path.
    fn write_records(
        &self,
        dir: &Path,
        file_stem: &str,
        records: &[ErrorRecord],
    ) -> Result<PathBuf, ExportError>;
}
