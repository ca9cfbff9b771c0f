//! Evaluation: metrics over labeled documents and misclassification records

pub mod errors;
pub mod metrics;
pub mod relevance;

pub use errors::{
    ERROR_EXCERPT_CHARS, ErrorBuckets, ErrorCategory, ErrorRecord, group_by_predicted_label,
};
pub use metrics::{
    Averages, BinaryRelevanceReport, ClassMetrics, ConfusionMatrix, LabelPairs,
    MulticlassReport, Score, collect_label_pairs, f1_score, ratio,
};
pub use relevance::Relevance;
