//! Question tree files

mod file_loader;

pub use file_loader::{TreeFileLoader, TreeLoadError};
