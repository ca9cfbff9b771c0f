//! Everything a run prints at the end

use serde::Serialize;
use triage_application::{BatchSummary, ExportSummary};
use triage_domain::{BinaryRelevanceReport, MulticlassReport};

/// Results of one invocation: classification counters, evaluation reports
/// and exported files. Sections that did not run are `None`/empty.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<BatchSummary>,
    /// Number of documents the evaluation covered
    pub evaluated_documents: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiclass: Option<MulticlassReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary_relevance: Option<BinaryRelevanceReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exports: Vec<ExportSummary>,
}

impl RunReport {
    pub fn with_batch(mut self, summary: BatchSummary) -> Self {
        self.batch = Some(summary);
        self
    }
}
