//! JSON persistence of treated documents

use std::path::{Path, PathBuf};
use tracing::{info, warn};
use triage_application::LoaderError;
use triage_domain::Document;

/// Treated documents stored as a pretty-printed JSON array
pub struct TreatedStore {
    path: PathBuf,
    keep_content: bool,
}

impl TreatedStore {
    pub fn new(path: impl Into<PathBuf>, keep_content: bool) -> Self {
        Self {
            path: path.into(),
            keep_content,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read previously treated documents.
    ///
    /// A missing file is an empty store. A file that is not a JSON array of
    /// documents is reported and ignored, so the run starts fresh.
    pub fn load(&self) -> Result<Vec<Document>, LoaderError> {
        if !self.path.exists() {
            info!("No treated file at {}; starting fresh", self.path.display());
            return Ok(Vec::new());
        }

        let text = std::fs::read_to_string(&self.path).map_err(|source| LoaderError::Io {
            path: self.path.clone(),
            source,
        })?;

        match serde_json::from_str::<Vec<Document>>(&text) {
            Ok(mut documents) => {
                for doc in &mut documents {
                    doc.treated = true;
                    if !self.keep_content {
                        doc.content = None;
                    }
                }
                info!(
                    "Loaded {} treated documents from {}",
                    documents.len(),
                    self.path.display()
                );
                Ok(documents)
            }
            Err(e) => {
                warn!(
                    "Treated file {} is unreadable ({}); starting fresh",
                    self.path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Rewrite the whole file with `documents`
    pub fn save(&self, documents: &[Document]) -> Result<(), LoaderError> {
        let records: Vec<Document> = if self.keep_content {
            documents.to_vec()
        } else {
            documents.iter().map(Document::without_content).collect()
        };

        let json = serde_json::to_string_pretty(&records).map_err(|e| LoaderError::InvalidData {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| LoaderError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(&self.path, json).map_err(|source| LoaderError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Delete the file if present
    pub fn delete(&self) -> Result<(), LoaderError> {
        if !self.path.exists() {
            return Ok(());
        }
        std::fs::remove_file(&self.path).map_err(|source| LoaderError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!("Deleted treated file {}", self.path.display());
        Ok(())
    }
}
