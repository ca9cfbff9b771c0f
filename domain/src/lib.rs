//! Domain layer for llm-triage
//!
//! This crate contains the core classification model: labels, documents,
//! question trees, answer normalization and evaluation metrics. It has no
//! dependencies on infrastructure or presentation concerns and performs no
//! I/O.
//!
//! # Core Concepts
//!
//! ## Question tree
//!
//! A [`DecisionTree`] is a validated, acyclic graph of yes/no
//! [`QuestionNode`]s ending in [`Label`] leaves. It can only be obtained by
//! building a [`TreeDescription`], which reports every [`StructuralIssue`]
//! before any document is classified.
//!
//! ## Documents and traces
//!
//! A [`Document`] carries content, an optional ground-truth label, the
//! predicted label and the ordered [`TraceEntry`] list of questions asked.
//!
//! ## Evaluation
//!
//! [`MulticlassReport`] and [`BinaryRelevanceReport`] score predictions
//! against ground truth; [`ErrorBuckets`] partitions relevance errors for
//! export.

pub mod classification;
pub mod config;
pub mod core;
pub mod document;
pub mod evaluation;
pub mod tree;

// Re-export commonly used types
pub use classification::{AnswerVocabulary, normalize_answer, render_prompt};
pub use config::OutputFormat;
pub use core::label::{Label, LabelParseError};
pub use document::{Answer, Document, TraceEntry};
pub use evaluation::{
    Averages, BinaryRelevanceReport, ClassMetrics, ConfusionMatrix, ERROR_EXCERPT_CHARS,
    ErrorBuckets, ErrorCategory, ErrorRecord, MulticlassReport, Relevance, Score,
    group_by_predicted_label,
};
pub use tree::{
    DecisionTree, Leaf, LeafId, NodeDescription, NodeId, QuestionNode, StructuralError,
    StructuralIssue, Target, TreeDescription,
};
