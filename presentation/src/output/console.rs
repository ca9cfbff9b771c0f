//! Console output formatter for run results

use crate::output::formatter::OutputFormatter;
use crate::output::report::RunReport;
use colored::Colorize;
use std::fmt::Display;
use triage_application::{BatchSummary, ExportSummary};
use triage_domain::{
    Averages, BinaryRelevanceReport, ClassMetrics, ConfusionMatrix, MulticlassReport, Score,
};

/// Formats run results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete report
    pub fn format(report: &RunReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("llm-triage Results"));
        output.push('\n');

        if let Some(batch) = &report.batch {
            output.push_str(&Self::batch_section(batch));
        }
        if let Some(multiclass) = &report.multiclass {
            output.push_str(&Self::multiclass_section(multiclass));
        }
        if let Some(binary) = &report.binary_relevance {
            output.push_str(&Self::binary_section(binary));
        }
        if !report.exports.is_empty() {
            output.push_str(&Self::section_header("Exported Errors"));
            for export in &report.exports {
                output.push_str(&Self::exports_section(export));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(report: &RunReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn batch_section(summary: &BatchSummary) -> String {
        let mut output = Self::section_header("Classification");

        output.push_str(&format!(
            "{} {}\n",
            "Processed:".cyan().bold(),
            summary.processed
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Oracle calls:".cyan().bold(),
            summary.oracle_calls
        ));

        if !summary.by_label.is_empty() {
            output.push_str(&format!("{}\n", "Labels:".cyan().bold()));
            for (label, count) in &summary.by_label {
                output.push_str(&format!("  {:<20} {:>6}\n", label.as_str(), count));
            }
        }

        if summary.load_failures > 0 {
            output.push_str(&format!(
                "{} {}\n",
                "Load failures:".red().bold(),
                summary.load_failures
            ));
        }
        if summary.persist_failures > 0 {
            output.push_str(&format!(
                "{} {}\n",
                "Not persisted:".yellow().bold(),
                summary.persist_failures
            ));
        }
        if summary.interrupted {
            output.push_str(&format!(
                "{}\n",
                "Interrupted: results are partial".yellow().bold()
            ));
        }

        output
    }

    pub fn multiclass_section(report: &MulticlassReport) -> String {
        let mut output = Self::section_header("Multi-class Evaluation");
        output.push_str(&Self::coverage_line(
            report.evaluated,
            report.unlabeled_skipped,
            report.unpredicted_skipped,
        ));

        if report.no_data {
            output.push_str(&Self::no_data_warning(
                "No documents with both a true and a predicted label; metrics are undefined.",
            ));
            return output;
        }

        output.push_str(&format!(
            "{} {}\n\n",
            "Accuracy:".cyan().bold(),
            fmt_score(report.accuracy)
        ));
        output.push_str(&Self::metrics_table(
            &report.per_label,
            &[
                ("macro avg", report.macro_avg),
                ("weighted avg", report.weighted_avg),
            ],
        ));
        output.push('\n');
        output.push_str(&Self::confusion_table(&report.confusion));
        output
    }

    pub fn binary_section(report: &BinaryRelevanceReport) -> String {
        let mut output = Self::section_header("Binary Relevance Evaluation");
        output.push_str(&Self::coverage_line(
            report.evaluated,
            report.unlabeled_skipped,
            report.unpredicted_skipped,
        ));
        if report.excluded > 0 {
            output.push_str(&format!(
                "{} {}\n",
                "Excluded (non-answer labels):".dimmed(),
                report.excluded
            ));
        }

        if report.no_data {
            output.push_str(&Self::no_data_warning(
                "No documents suitable for relevance evaluation; metrics are undefined.",
            ));
            return output;
        }

        output.push_str(&format!(
            "{} {}   {} {}   {} {}   {} {}\n\n",
            "Precision:".cyan().bold(),
            fmt_score(report.precision),
            "Recall:".cyan().bold(),
            fmt_score(report.recall),
            "F1:".cyan().bold(),
            fmt_score(report.f1),
            "Accuracy:".cyan().bold(),
            fmt_score(report.accuracy)
        ));
        output.push_str(&Self::metrics_table(&report.per_class, &[]));
        output.push('\n');
        output.push_str(&Self::confusion_table(&report.confusion));
        output
    }

    pub fn exports_section(summary: &ExportSummary) -> String {
        summary
            .files
            .iter()
            .map(|file| {
                format!(
                    "  {} ({} records)\n",
                    file.path.display().to_string().yellow(),
                    file.records
                )
            })
            .collect()
    }

    /// Per-class precision/recall/F1 table with optional average rows
    pub fn metrics_table<C: Display>(
        rows: &[ClassMetrics<C>],
        averages: &[(&str, Averages)],
    ) -> String {
        let names: Vec<String> = rows.iter().map(|r| r.label.to_string()).collect();
        let width = names
            .iter()
            .map(String::len)
            .chain(averages.iter().map(|(name, _)| name.len()))
            .max()
            .unwrap_or(0)
            .max(12);

        let mut output = format!(
            "{:<width$} {:>9} {:>9} {:>9} {:>8}\n",
            "label",
            "precision",
            "recall",
            "f1",
            "support",
            width = width
        )
        .bold()
        .to_string();

        for (row, name) in rows.iter().zip(&names) {
            output.push_str(&format!(
                "{:<width$} {:>9} {:>9} {:>9} {:>8}\n",
                name,
                fmt_score(row.precision),
                fmt_score(row.recall),
                fmt_score(row.f1),
                row.support,
                width = width
            ));
        }

        let total_support: usize = rows.iter().map(|r| r.support).sum();
        for (name, avg) in averages {
            output.push_str(&format!(
                "{:<width$} {:>9} {:>9} {:>9} {:>8}\n",
                name,
                fmt_score(avg.precision),
                fmt_score(avg.recall),
                fmt_score(avg.f1),
                total_support,
                width = width
            ));
        }

        output
    }

    /// Confusion matrix with true labels as rows and predictions as columns
    pub fn confusion_table<C: Copy + PartialEq + Display>(matrix: &ConfusionMatrix<C>) -> String {
        let names: Vec<String> = matrix.labels().iter().map(|l| l.to_string()).collect();
        let corner = "true \\ pred";
        let first = names
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max(corner.len());
        let cell = names.iter().map(String::len).max().unwrap_or(0).max(6);

        let mut output = format!("{}\n", "Confusion matrix:".cyan().bold());
        output.push_str(&format!("{:<first$}", corner, first = first));
        for name in &names {
            output.push_str(&format!(" {:>cell$}", name, cell = cell));
        }
        output.push('\n');

        for (name, row) in names.iter().zip(matrix.rows()) {
            output.push_str(&format!("{:<first$}", name, first = first));
            for count in row {
                output.push_str(&format!(" {:>cell$}", count, cell = cell));
            }
            output.push('\n');
        }

        output
    }

    fn coverage_line(evaluated: usize, unlabeled: usize, unpredicted: usize) -> String {
        format!(
            "{} {} ({} without ground truth, {} without prediction)\n",
            "Evaluated:".cyan().bold(),
            evaluated,
            unlabeled,
            unpredicted
        )
    }

    fn no_data_warning(message: &str) -> String {
        format!("{} {}\n", "Warning:".yellow().bold(), message.yellow())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

/// Three decimals, or `n/a` for undefined scores
pub fn fmt_score(score: Score) -> String {
    match score {
        Some(value) => format!("{:.3}", value),
        None => "n/a".to_string(),
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, report: &RunReport) -> String {
        Self::format(report)
    }

    fn format_json(&self, report: &RunReport) -> String {
        Self::format_json(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use triage_application::ExportedFile;
    use triage_domain::{Document, Label};

    fn plain() {
        colored::control::set_override(false);
    }

    fn doc(id: &str, truth: Label, predicted: Label) -> Document {
        let mut doc = Document::new(id).with_true_label(truth);
        doc.finish(predicted);
        doc
    }

    fn corpus() -> Vec<Document> {
        vec![
            doc("a", Label::Positive, Label::Positive),
            doc("b", Label::Positive, Label::Irrelevant),
            doc("c", Label::Irrelevant, Label::Irrelevant),
            doc("d", Label::Negative, Label::Uncertain),
        ]
    }

    #[test]
    fn test_fmt_score() {
        assert_eq!(fmt_score(Some(0.5)), "0.500");
        assert_eq!(fmt_score(Some(1.0)), "1.000");
        assert_eq!(fmt_score(None), "n/a");
    }

    #[test]
    fn test_batch_section() {
        plain();
        let summary = BatchSummary {
            processed: 3,
            oracle_calls: 7,
            by_label: BTreeMap::from([(Label::Positive, 2), (Label::TooShort, 1)]),
            load_failures: 1,
            persist_failures: 0,
            interrupted: true,
        };

        let text = ConsoleFormatter::batch_section(&summary);
        assert!(text.contains("Processed: 3"));
        assert!(text.contains("Oracle calls: 7"));
        assert!(text.contains("TOO_SHORT"));
        assert!(text.contains("Load failures: 1"));
        assert!(!text.contains("Not persisted"));
        assert!(text.contains("Interrupted"));
    }

    #[test]
    fn test_multiclass_section() {
        plain();
        let report = MulticlassReport::from_documents(&corpus());
        let text = ConsoleFormatter::multiclass_section(&report);

        assert!(text.contains("Evaluated: 4"));
        assert!(text.contains("Accuracy: 0.500"));
        assert!(text.contains("macro avg"));
        assert!(text.contains("weighted avg"));
        assert!(text.contains("Confusion matrix:"));
        assert!(text.contains("UNCERTAIN"));
    }

    #[test]
    fn test_no_data_warning() {
        plain();
        let report = MulticlassReport::from_documents(&[Document::new("x")]);
        let text = ConsoleFormatter::multiclass_section(&report);

        assert!(text.contains("metrics are undefined"));
        assert!(!text.contains("Accuracy"));
    }

    #[test]
    fn test_binary_section() {
        plain();
        let report = BinaryRelevanceReport::from_documents(&corpus());
        let text = ConsoleFormatter::binary_section(&report);

        assert!(text.contains("Evaluated: 3"));
        assert!(text.contains("Excluded (non-answer labels): 1"));
        assert!(text.contains("Precision: 1.000"));
        assert!(text.contains("Recall: 0.500"));
        assert!(text.contains("relevant"));
        assert!(text.contains("irrelevant"));
    }

    #[test]
    fn test_metrics_table_rows() {
        plain();
        let report = MulticlassReport::from_documents(&corpus());
        let table = ConsoleFormatter::metrics_table(&report.per_label, &[]);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].starts_with("label"));
        assert_eq!(lines.len(), 1 + report.per_label.len());
        let positive = lines.iter().find(|l| l.starts_with("POSITIVE")).unwrap();
        assert!(positive.contains("1.000"));
        assert!(positive.contains("0.500"));
    }

    #[test]
    fn test_confusion_table_layout() {
        plain();
        let report = BinaryRelevanceReport::from_documents(&corpus());
        let table = ConsoleFormatter::confusion_table(&report.confusion);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("true \\ pred"));
        assert!(lines[2].starts_with("relevant"));
    }

    #[test]
    fn test_format_full_report() {
        plain();
        let docs = corpus();
        let report = RunReport {
            batch: Some(BatchSummary::default()),
            evaluated_documents: docs.len(),
            multiclass: Some(MulticlassReport::from_documents(&docs)),
            binary_relevance: Some(BinaryRelevanceReport::from_documents(&docs)),
            exports: vec![ExportSummary {
                files: vec![ExportedFile {
                    path: PathBuf::from("errors/false_negative.json"),
                    records: 1,
                }],
            }],
        };

        let text = ConsoleFormatter::format(&report);
        assert!(text.contains("llm-triage Results"));
        assert!(text.contains("Classification"));
        assert!(text.contains("Multi-class Evaluation"));
        assert!(text.contains("Binary Relevance Evaluation"));
        assert!(text.contains("errors/false_negative.json (1 records)"));
    }

    #[test]
    fn test_format_json() {
        let docs = corpus();
        let report = RunReport {
            evaluated_documents: docs.len(),
            binary_relevance: Some(BinaryRelevanceReport::from_documents(&docs)),
            ..Default::default()
        };

        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&report)).unwrap();
        assert_eq!(value["evaluated_documents"], 4);
        assert_eq!(value["binary_relevance"]["evaluated"], 3);
        assert!(value.get("batch").is_none());
        assert!(value.get("multiclass").is_none());
        assert!(value.get("exports").is_none());
    }
}
