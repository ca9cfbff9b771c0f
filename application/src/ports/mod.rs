//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod conversation_logger;
pub mod document_loader;
pub mod error_exporter;
pub mod oracle;
pub mod progress;
