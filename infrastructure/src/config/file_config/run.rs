//! Run configuration from TOML (`[run]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw run configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRunConfig {
    /// Directory holding `*.txt` documents and an optional `index.csv`
    pub data_dir: PathBuf,
    /// JSON file recording treated documents between runs
    pub treated_file: PathBuf,
    /// Question tree description (JSON)
    pub tree_path: Option<PathBuf>,
    /// Maximum number of documents to classify
    pub limit: Option<usize>,
    /// Documents classified concurrently
    pub concurrency: usize,
    /// Content characters substituted into prompts
    pub max_chars: Option<usize>,
    /// Keep document content in the treated file
    pub keep_content: bool,
}

impl Default for FileRunConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            treated_file: PathBuf::from("treated_items.json"),
            tree_path: None,
            limit: None,
            concurrency: 1,
            max_chars: Some(2000),
            keep_content: false,
        }
    }
}
