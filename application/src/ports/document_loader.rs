//! Document loader port
//!
//! Acquisition, deduplication and persistence of treated documents are the
//! loader's business; the classification engine only pulls documents and
//! reports them back.

use std::path::PathBuf;
use thiserror::Error;
use triage_domain::Document;

/// Errors that can occur while loading or persisting documents
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid data in {}: {message}", .path.display())]
    InvalidData { path: PathBuf, message: String },

    #[error("Loader error: {0}")]
    Other(String),
}

/// Source of documents to classify
pub trait DocumentLoader: Send {
    /// Next untreated document, or `None` when exhausted.
    ///
    /// A failure concerns only the document being read; callers may keep
    /// pulling after an error.
    fn next_document(&mut self) -> Option<Result<Document, LoaderError>>;

    /// Up to `size` documents (fewer at the end of the source)
    fn load_batch(&mut self, size: usize) -> Vec<Result<Document, LoaderError>> {
        let mut batch = Vec::with_capacity(size);
        while batch.len() < size {
            match self.next_document() {
                Some(item) => batch.push(item),
                None => break,
            }
        }
        batch
    }

    /// Record a classified document so it is not handed out again
    fn mark_as_treated(&mut self, doc: &Document) -> Result<(), LoaderError>;

    /// Documents treated so far, including those from earlier runs
    fn treated_documents(&self) -> &[Document];

    /// Forget all treated state and start over
    fn reset(&mut self) -> Result<(), LoaderError>;

    /// Number of documents still to be handed out, when known
    fn remaining_hint(&self) -> Option<usize> {
        None
    }
}
