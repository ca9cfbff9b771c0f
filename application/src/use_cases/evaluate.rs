//! Evaluate use case
//!
//! Scores predicted labels against ground truth and exports
//! misclassifications for manual review. Documents are never mutated.

use crate::ports::error_exporter::{ErrorExporter, ExportError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use triage_domain::{
    BinaryRelevanceReport, Document, ErrorBuckets, ErrorCategory, MulticlassReport,
    group_by_predicted_label,
};

/// Errors that can occur during evaluation
#[derive(Error, Debug)]
pub enum EvaluateError {
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

/// One written export file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedFile {
    pub path: PathBuf,
    pub records: usize,
}

/// Files written by an export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub files: Vec<ExportedFile>,
}

impl ExportSummary {
    pub fn total_records(&self) -> usize {
        self.files.iter().map(|f| f.records).sum()
    }
}

/// Evaluator over a closed set of classified documents
pub struct Evaluator<'a> {
    documents: &'a [Document],
    exporter: Arc<dyn ErrorExporter>,
}

impl<'a> Evaluator<'a> {
    pub fn new(documents: &'a [Document], exporter: Arc<dyn ErrorExporter>) -> Self {
        Self {
            documents,
            exporter,
        }
    }

    /// Multi-class report over documents with both labels
    pub fn evaluate(&self) -> MulticlassReport {
        let report = MulticlassReport::from_documents(self.documents);
        if report.no_data {
            warn!("No documents with both true and predicted labels; metrics are undefined");
        } else {
            info!(
                "Evaluated {} documents ({} unlabeled, {} unpredicted skipped)",
                report.evaluated, report.unlabeled_skipped, report.unpredicted_skipped
            );
        }
        report
    }

    /// Binary relevant/irrelevant report; non-answer labels are excluded
    pub fn evaluate_binary_relevance(&self) -> BinaryRelevanceReport {
        let report = BinaryRelevanceReport::from_documents(self.documents);
        if report.no_data {
            warn!("No documents suitable for binary relevance evaluation");
        } else {
            info!(
                "Binary relevance over {} documents ({} excluded)",
                report.evaluated, report.excluded
            );
        }
        report
    }

    /// Write `false_positive` and `false_negative` files under `output_dir`.
    ///
    /// Both files are always written, possibly as empty arrays.
    pub fn export_errors_by_model(&self, output_dir: &Path) -> Result<ExportSummary, EvaluateError> {
        let buckets = ErrorBuckets::partition(self.documents);
        let mut summary = ExportSummary::default();

        for category in [ErrorCategory::FalsePositive, ErrorCategory::FalseNegative] {
            let records = buckets.get(category);
            let path = self
                .exporter
                .write_records(output_dir, category.as_str(), records)?;
            info!("Exported {} {} records to {}", records.len(), category, path.display());
            summary.files.push(ExportedFile {
                path,
                records: records.len(),
            });
        }

        Ok(summary)
    }

    /// Write one `errors_pred_<label>` file per predicted label that has at
    /// least one multi-class disagreement
    pub fn export_errors_by_predicted_label(
        &self,
        output_dir: &Path,
    ) -> Result<ExportSummary, EvaluateError> {
        let mut summary = ExportSummary::default();

        for (label, records) in group_by_predicted_label(self.documents) {
            let stem = format!("errors_pred_{}", label.value());
            let path = self.exporter.write_records(output_dir, &stem, &records)?;
            summary.files.push(ExportedFile {
                path,
                records: records.len(),
            });
        }

        info!(
            "Exported {} misclassified documents to {}",
            summary.total_records(),
            output_dir.display()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use triage_domain::{ErrorRecord, Label};

    /// Keeps written records in memory, keyed by file stem
    #[derive(Default)]
    struct MemoryExporter {
        written: Mutex<HashMap<String, Vec<String>>>,
    }

    impl ErrorExporter for MemoryExporter {
        fn write_records(
            &self,
            dir: &Path,
            file_stem: &str,
            records: &[ErrorRecord],
        ) -> Result<PathBuf, ExportError> {
            self.written.lock().unwrap().insert(
                file_stem.to_string(),
                records.iter().map(|r| r.id.clone()).collect(),
            );
            Ok(dir.join(format!("{file_stem}.json")))
        }
    }

    fn doc(id: &str, truth: Option<Label>, predicted: Label) -> Document {
        let mut doc = Document::new(id).with_content("content");
        doc.true_label = truth;
        doc.finish(predicted);
        doc
    }

    fn corpus() -> Vec<Document> {
        vec![
            doc("ok", Some(Label::Positive), Label::Positive),
            doc("fn", Some(Label::Positive), Label::Irrelevant),
            doc("fp", Some(Label::Irrelevant), Label::Neutral),
            doc("intra", Some(Label::Negative), Label::Neutral),
            doc("err", Some(Label::Neutral), Label::Error),
            doc("unlabeled", None, Label::Positive),
        ]
    }

    #[test]
    fn test_evaluate_reports() {
        let docs = corpus();
        let evaluator = Evaluator::new(&docs, Arc::new(MemoryExporter::default()));

        let multi = evaluator.evaluate();
        assert_eq!(multi.evaluated, 5);
        assert_eq!(multi.unlabeled_skipped, 1);
        assert_eq!(multi.accuracy, Some(0.2));

        let binary = evaluator.evaluate_binary_relevance();
        assert_eq!(binary.evaluated, 4);
        assert_eq!(binary.excluded, 1);
    }

    #[test]
    fn test_export_errors_by_model() {
        let docs = corpus();
        let exporter = Arc::new(MemoryExporter::default());
        let evaluator = Evaluator::new(&docs, exporter.clone());

        let summary = evaluator
            .export_errors_by_model(Path::new("/tmp/errors"))
            .unwrap();

        assert_eq!(summary.files.len(), 2);
        assert_eq!(summary.total_records(), 2);
        assert_eq!(
            summary.files[0].path,
            PathBuf::from("/tmp/errors/false_positive.json")
        );
        let written = exporter.written.lock().unwrap();
        assert_eq!(written["false_positive"], vec!["fp"]);
        assert_eq!(written["false_negative"], vec!["fn"]);
    }

    #[test]
    fn test_export_writes_empty_buckets() {
        let docs = vec![doc("ok", Some(Label::Positive), Label::Positive)];
        let exporter = Arc::new(MemoryExporter::default());
        let summary = Evaluator::new(&docs, exporter.clone())
            .export_errors_by_model(Path::new("out"))
            .unwrap();

        assert_eq!(summary.total_records(), 0);
        let written = exporter.written.lock().unwrap();
        assert!(written["false_positive"].is_empty());
        assert!(written["false_negative"].is_empty());
    }

    #[test]
    fn test_export_errors_by_predicted_label() {
        let docs = corpus();
        let exporter = Arc::new(MemoryExporter::default());
        let summary = Evaluator::new(&docs, exporter.clone())
            .export_errors_by_predicted_label(Path::new("out"))
            .unwrap();

        assert_eq!(summary.total_records(), 4);
        let written = exporter.written.lock().unwrap();
        assert_eq!(written["errors_pred_neutral"], vec!["fp", "intra"]);
        assert_eq!(written["errors_pred_irrelevant"], vec!["fn"]);
        assert_eq!(written["errors_pred_error"], vec!["err"]);
        assert!(!written.contains_key("errors_pred_positive"));
    }

    #[test]
    fn test_evaluation_does_not_mutate_documents() {
        let docs = corpus();
        let before = docs.clone();
        let evaluator = Evaluator::new(&docs, Arc::new(MemoryExporter::default()));
        evaluator.evaluate();
        evaluator.evaluate_binary_relevance();
        evaluator.export_errors_by_model(Path::new("out")).unwrap();
        assert_eq!(docs, before);
    }
}
