//! Document entity: the unit of classification work

use super::trace::TraceEntry;
use crate::core::label::Label;
use crate::core::string::trimmed_char_count;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A free-text document to be classified (Entity)
///
/// Created by a loader with content and an optional ground-truth label,
/// mutated in place by a traversal (trace appended, prediction set, marked
/// treated), and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier, unique within a run
    pub id: String,
    /// Raw text; absent when the loader did not keep it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Whether a traversal has completed for this document
    #[serde(default)]
    pub treated: bool,
    /// Ground-truth label, if known
    #[serde(default)]
    pub true_label: Option<Label>,
    /// Label assigned by the traversal
    #[serde(default)]
    pub predicted_label: Option<Label>,
    /// Questions asked and answers received, in order
    #[serde(default)]
    pub trace: Vec<TraceEntry>,
    /// Free-form metadata (filename, error reasons, leaf name, ...)
    #[serde(default)]
    pub meta: BTreeMap<String, String>,
}

impl Document {
    /// Create an untreated document with no content
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: None,
            treated: false,
            true_label: None,
            predicted_label: None,
            trace: Vec::new(),
            meta: BTreeMap::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_true_label(mut self, label: Label) -> Self {
        self.true_label = Some(label);
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Content length in characters, ignoring surrounding whitespace.
    /// Absent content counts as zero.
    pub fn content_len(&self) -> usize {
        self.content.as_deref().map(trimmed_char_count).unwrap_or(0)
    }

    /// Add or replace a metadata entry
    pub fn add_meta(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.meta.insert(key.into(), value.into());
    }

    /// Append a step to the trace
    pub fn push_trace(&mut self, entry: TraceEntry) {
        self.trace.push(entry);
    }

    /// Record the final label and mark the document treated.
    ///
    /// Returns `false` (and leaves the document untouched) if it was
    /// already treated.
    pub fn finish(&mut self, label: Label) -> bool {
        if self.treated {
            return false;
        }
        self.predicted_label = Some(label);
        self.treated = true;
        true
    }

    /// Whether both labels are present and differ
    pub fn is_misclassified(&self) -> bool {
        matches!(
            (self.true_label, self.predicted_label),
            (Some(t), Some(p)) if t != p
        )
    }

    /// Copy of this document without its content (for compact persistence)
    pub fn without_content(&self) -> Self {
        Self {
            content: None,
            ..self.clone()
        }
    }
}
