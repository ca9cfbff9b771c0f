//! Run Batch use case
//!
//! Drives a whole corpus through the classifier: pull documents from the
//! loader, classify each batch concurrently, report results back to the
//! loader, stop at the limit or on cancellation.

use super::classify_document::{Classification, ClassifyDocumentUseCase};
use crate::ports::document_loader::{DocumentLoader, LoaderError};
use crate::ports::progress::{BatchProgressNotifier, NoProgress};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use triage_domain::{Document, Label};

/// Errors that can abort a batch run
#[derive(Error, Debug)]
pub enum RunBatchError {
    #[error("Concurrency must be at least 1")]
    InvalidConcurrency,

    #[error("Loader error: {0}")]
    Loader(#[from] LoaderError),
}

/// Input for the RunBatch use case
#[derive(Debug, Clone)]
pub struct RunBatchInput {
    /// Stop after this many classified documents
    pub limit: Option<usize>,
    /// Documents classified at the same time
    pub concurrency: usize,
    /// Discard previously treated state before starting
    pub fresh_start: bool,
    pub cancel: Option<CancellationToken>,
}

impl Default for RunBatchInput {
    fn default() -> Self {
        Self {
            limit: None,
            concurrency: 1,
            fresh_start: false,
            cancel: None,
        }
    }
}

impl RunBatchInput {
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency,
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_fresh_start(mut self, fresh_start: bool) -> Self {
        self.fresh_start = fresh_start;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|t| t.is_cancelled())
    }
}

/// Counters for a finished (or interrupted) run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Documents classified and reported back to the loader
    pub processed: usize,
    pub oracle_calls: usize,
    /// Predicted label counts
    pub by_label: BTreeMap<Label, usize>,
    /// Documents the loader failed to produce
    pub load_failures: usize,
    /// Documents whose treated state could not be persisted
    pub persist_failures: usize,
    /// The run stopped early because of cancellation
    pub interrupted: bool,
}

impl BatchSummary {
    fn record(&mut self, classification: &Classification) {
        self.processed += 1;
        self.oracle_calls += classification.oracle_calls;
        *self.by_label.entry(classification.label).or_default() += 1;
    }
}

/// Output of a batch run
#[derive(Debug, Clone)]
pub struct RunBatchOutput {
    /// Documents classified in this run, in loader order
    pub documents: Vec<Document>,
    pub summary: BatchSummary,
}

/// Use case for classifying every document a loader yields
pub struct RunBatchUseCase {
    classifier: ClassifyDocumentUseCase,
}

impl RunBatchUseCase {
    pub fn new(classifier: ClassifyDocumentUseCase) -> Self {
        Self { classifier }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        loader: &mut dyn DocumentLoader,
        input: RunBatchInput,
    ) -> Result<RunBatchOutput, RunBatchError> {
        self.execute_with_progress(loader, input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks.
    ///
    /// Documents interrupted by cancellation are neither reported to the
    /// loader nor returned, so the next run picks them up again.
    pub async fn execute_with_progress(
        &self,
        loader: &mut dyn DocumentLoader,
        input: RunBatchInput,
        progress: &dyn BatchProgressNotifier,
    ) -> Result<RunBatchOutput, RunBatchError> {
        if input.concurrency == 0 {
            return Err(RunBatchError::InvalidConcurrency);
        }
        if input.fresh_start {
            info!("Fresh start: discarding treated documents");
            loader.reset()?;
        }

        let total = match (loader.remaining_hint(), input.limit) {
            (Some(remaining), Some(limit)) => Some(remaining.min(limit)),
            (remaining, None) => remaining,
            (None, Some(_)) => None,
        };
        info!(
            "Starting batch run (concurrency {}, limit {:?})",
            input.concurrency, input.limit
        );
        progress.on_run_start(total);

        let mut documents = Vec::new();
        let mut summary = BatchSummary::default();

        loop {
            if input.is_cancelled() {
                info!("Run cancelled after {} documents", summary.processed);
                summary.interrupted = true;
                break;
            }

            let size = match input.limit {
                Some(limit) if summary.processed >= limit => break,
                Some(limit) => input.concurrency.min(limit - summary.processed),
                None => input.concurrency,
            };
            let batch = loader.load_batch(size);
            if batch.is_empty() {
                debug!("Loader exhausted");
                break;
            }

            let mut join_set = JoinSet::new();
            for (index, item) in batch.into_iter().enumerate() {
                let mut doc = match item {
                    Ok(doc) => doc,
                    Err(e) => {
                        warn!("Failed to load document: {}", e);
                        summary.load_failures += 1;
                        continue;
                    }
                };
                let classifier = self.classifier.clone();
                let cancel = input.cancel.clone();
                join_set.spawn(async move {
                    let classification = classifier
                        .execute_with_cancellation(&mut doc, cancel.as_ref())
                        .await;
                    (index, doc, classification)
                });
            }

            let mut finished = Vec::new();
            while let Some(result) = join_set.join_next().await {
                match result {
                    Ok(item) => finished.push(item),
                    Err(e) => warn!("Task join error: {}", e),
                }
            }
            finished.sort_by_key(|(index, _, _)| *index);

            for (_, doc, classification) in finished {
                if classification.interrupted {
                    debug!("Document {} interrupted, not persisted", doc.id);
                    summary.interrupted = true;
                    continue;
                }
                if let Err(e) = loader.mark_as_treated(&doc) {
                    warn!("Failed to persist treated document {}: {}", doc.id, e);
                    summary.persist_failures += 1;
                }
                info!("Document {} -> {}", doc.id, classification.label);
                summary.record(&classification);
                progress.on_document_complete(&doc);
                documents.push(doc);
            }
        }

        progress.on_run_complete(&summary);
        info!(
            "Batch run finished: {} documents, {} oracle calls",
            summary.processed, summary.oracle_calls
        );
        Ok(RunBatchOutput { documents, summary })
    }
}
