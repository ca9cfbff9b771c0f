//! Question tree loading from JSON files

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};
use triage_domain::{DecisionTree, StructuralError, TreeDescription};

/// Errors raised while loading a question tree
#[derive(Error, Debug)]
pub enum TreeLoadError {
    #[error("Failed to read tree file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse tree file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Invalid(#[from] StructuralError),
}

/// Reads tree descriptions from disk
pub struct TreeFileLoader;

impl TreeFileLoader {
    /// Read the raw description without validating it
    pub fn load_description(path: &Path) -> Result<TreeDescription, TreeLoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| TreeLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        TreeDescription::from_json(&text).map_err(|source| TreeLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and validate a tree
    pub fn load(path: &Path) -> Result<DecisionTree, TreeLoadError> {
        let tree = Self::load_description(path)?.build()?;

        let unreachable = tree.unreachable_nodes();
        if !unreachable.is_empty() {
            warn!(
                "Tree {} has nodes unreachable from the root: {}",
                path.display(),
                unreachable.join(", ")
            );
        }

        info!(
            "Loaded question tree from {} ({} nodes, {} leaves, depth {})",
            path.display(),
            tree.node_count(),
            tree.leaf_count(),
            tree.depth()
        );
        Ok(tree)
    }
}
