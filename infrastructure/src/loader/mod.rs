//! Document loaders
//!
//! [`FileLoader`] reads a directory of text files, takes ground truth from an
//! optional `index.csv`, and persists treated documents as JSON.

mod file_loader;
mod index;
mod treated_store;

pub use file_loader::{FileLoader, INDEX_FILE};
pub use index::LabelIndex;
pub use treated_store::TreatedStore;
