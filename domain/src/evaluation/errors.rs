//! Misclassification records for error export

use super::relevance::Relevance;
use crate::core::label::Label;
use crate::core::string::excerpt;
use crate::document::{Document, TraceEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Content length kept in per-label error exports
pub const ERROR_EXCERPT_CHARS: usize = 800;

/// Binary relevance error kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// True label irrelevant, predicted relevant
    FalsePositive,
    /// True label relevant, predicted irrelevant
    FalseNegative,
}

impl ErrorCategory {
    /// File stem of the exported bucket
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::FalsePositive => "false_positive",
            ErrorCategory::FalseNegative => "false_negative",
        }
    }

    /// Classify a (true, predicted) pair; `None` when it is not a
    /// relevance error
    pub fn of(truth: Label, predicted: Label) -> Option<Self> {
        match (Relevance::of(truth)?, Relevance::of(predicted)?) {
            (Relevance::Irrelevant, Relevance::Relevant) => Some(ErrorCategory::FalsePositive),
            (Relevance::Relevant, Relevance::Irrelevant) => Some(ErrorCategory::FalseNegative),
            _ => None,
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Exported view of a misclassified document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub id: String,
    /// Document content; empty when the document carried none
    pub content: String,
    pub true_label: Label,
    pub predicted_label: Label,
    pub trace: Vec<TraceEntry>,
    pub meta: BTreeMap<String, String>,
}

impl ErrorRecord {
    /// Snapshot of `doc`, or `None` unless both labels are present
    pub fn from_document(doc: &Document) -> Option<Self> {
        Some(Self {
            id: doc.id.clone(),
            content: doc.content.clone().unwrap_or_default(),
            true_label: doc.true_label?,
            predicted_label: doc.predicted_label?,
            trace: doc.trace.clone(),
            meta: doc.meta.clone(),
        })
    }

    /// Same as [`from_document`](Self::from_document) with content cut to
    /// `max_chars`
    pub fn excerpted(doc: &Document, max_chars: usize) -> Option<Self> {
        let mut record = Self::from_document(doc)?;
        record.content = excerpt(&record.content, max_chars);
        Some(record)
    }
}

/// False-positive and false-negative buckets in the binary relevance sense
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorBuckets {
    pub false_positives: Vec<ErrorRecord>,
    pub false_negatives: Vec<ErrorRecord>,
}

impl ErrorBuckets {
    /// Sort relevance errors into buckets, preserving document order.
    ///
    /// Documents missing a label, or where either label is a non-answer,
    /// belong to neither bucket.
    pub fn partition(docs: &[Document]) -> Self {
        let mut buckets = Self::default();
        for doc in docs {
            let (Some(truth), Some(predicted)) = (doc.true_label, doc.predicted_label) else {
                continue;
            };
            let Some(category) = ErrorCategory::of(truth, predicted) else {
                continue;
            };
            if let Some(record) = ErrorRecord::from_document(doc) {
                match category {
                    ErrorCategory::FalsePositive => buckets.false_positives.push(record),
                    ErrorCategory::FalseNegative => buckets.false_negatives.push(record),
                }
            }
        }
        buckets
    }

    pub fn get(&self, category: ErrorCategory) -> &[ErrorRecord] {
        match category {
            ErrorCategory::FalsePositive => &self.false_positives,
            ErrorCategory::FalseNegative => &self.false_negatives,
        }
    }
}

/// Every multi-class disagreement grouped by predicted label, content
/// excerpted to [`ERROR_EXCERPT_CHARS`]
pub fn group_by_predicted_label(docs: &[Document]) -> BTreeMap<Label, Vec<ErrorRecord>> {
    let mut groups: BTreeMap<Label, Vec<ErrorRecord>> = BTreeMap::new();
    for doc in docs.iter().filter(|d| d.is_misclassified()) {
        if let Some(record) = ErrorRecord::excerpted(doc, ERROR_EXCERPT_CHARS) {
            groups.entry(record.predicted_label).or_default().push(record);
        }
    }
    groups
}
