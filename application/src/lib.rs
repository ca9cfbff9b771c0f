//! Application layer for llm-triage
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    document_loader::{DocumentLoader, LoaderError},
    error_exporter::{ErrorExporter, ExportError},
    oracle::{Oracle, OracleError},
    progress::{BatchProgressNotifier, NoProgress},
};
pub use use_cases::classify_document::{
    Classification, ClassifyDocumentUseCase, TraversalOptions,
};
pub use use_cases::evaluate::{EvaluateError, Evaluator, ExportSummary, ExportedFile};
pub use use_cases::run_batch::{
    BatchSummary, RunBatchError, RunBatchInput, RunBatchOutput, RunBatchUseCase,
};
