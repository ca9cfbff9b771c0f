//! JSON files for misclassified documents

use std::path::{Path, PathBuf};
use tracing::debug;
use triage_application::{ErrorExporter, ExportError};
use triage_domain::ErrorRecord;

/// Writes each record set as a pretty-printed JSON array `<stem>.json`
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonErrorExporter;

impl JsonErrorExporter {
    pub fn new() -> Self {
        Self
    }
}

impl ErrorExporter for JsonErrorExporter {
    fn write_records(
        &self,
        dir: &Path,
        file_stem: &str,
        records: &[ErrorRecord],
    ) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = dir.join(format!("{}.json", file_stem));
        let json =
            serde_json::to_string_pretty(records).map_err(|e| ExportError::Serialize(e.to_string()))?;
        std::fs::write(&path, json).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

        debug!("Wrote {} records to {}", records.len(), path.display());
        Ok(path)
    }
}
