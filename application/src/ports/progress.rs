//! Progress notification port
//!
//! Defines the interface for reporting progress during a batch run.

use crate::use_cases::run_batch::BatchSummary;
use triage_domain::Document;

/// Callback for progress updates during a batch run
///
/// Implementations live in the presentation layer.
pub trait BatchProgressNotifier: Send + Sync {
    /// Called once before the first document; `total` is known only when
    /// the loader can tell how many documents remain
    fn on_run_start(&self, total: Option<usize>);

    /// Called after each document is classified and persisted
    fn on_document_complete(&self, doc: &Document);

    /// Called when the run ends, normally or through cancellation
    fn on_run_complete(&self, summary: &BatchSummary);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl BatchProgressNotifier for NoProgress {
    fn on_run_start(&self, _total: Option<usize>) {}
    fn on_document_complete(&self, _doc: &Document) {}
    fn on_run_complete(&self, _summary: &BatchSummary) {}
}
