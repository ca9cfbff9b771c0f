//! Evaluation configuration from TOML (`[evaluation]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw evaluation configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEvaluationConfig {
    /// Directory for misclassification exports; no export when unset
    pub export_dir: Option<PathBuf>,
}
