//! Infrastructure layer for llm-triage
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the llama.cpp oracle, the directory document
//! loader, JSON error export and transcripts, plus configuration and
//! question tree file loading.

pub mod config;
pub mod export;
pub mod loader;
pub mod logging;
pub mod oracle;
pub mod tree;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileEvaluationConfig, FileOracleConfig,
    FileOutputConfig, FileOutputFormat, FileRunConfig,
};
pub use export::JsonErrorExporter;
pub use loader::{FileLoader, INDEX_FILE, LabelIndex, TreatedStore};
pub use logging::JsonlConversationLogger;
pub use oracle::{LlamaError, LlamaServerOracle};
pub use tree::{TreeFileLoader, TreeLoadError};
