//! Progress reporting for batch runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use triage_application::{BatchProgressNotifier, BatchSummary};
use triage_domain::{Document, Label};

/// Reports batch progress with an indicatif bar (or a spinner when the
/// number of documents is unknown)
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {pos} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn label_status(doc: &Document) -> String {
        match doc.predicted_label {
            Some(label @ (Label::Error | Label::Uncertain)) => {
                format!("{} {} {}", "x".red(), doc.id, label)
            }
            Some(label) => format!("{} {} {}", "v".green(), doc.id, label),
            None => format!("{} {}", "-".dimmed(), doc.id),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchProgressNotifier for ProgressReporter {
    fn on_run_start(&self, total: Option<usize>) {
        let pb = match total {
            Some(total) => {
                let pb = ProgressBar::new(total as u64);
                pb.set_style(Self::bar_style());
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(Self::spinner_style());
                pb
            }
        };
        pb.set_prefix("Classifying");
        pb.set_message("Starting...");

        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_document_complete(&self, doc: &Document) {
        if let Ok(bar) = self.bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(Self::label_status(doc));
            pb.inc(1);
        }
    }

    fn on_run_complete(&self, summary: &BatchSummary) {
        if let Ok(mut bar) = self.bar.lock()
            && let Some(pb) = bar.take()
        {
            let message = if summary.interrupted {
                format!("{} after {} documents", "Interrupted".yellow(), summary.processed)
            } else {
                format!("{} {} documents", "Classified".green(), summary.processed)
            };
            pb.finish_with_message(message);
        }
    }
}

/// Simple line-based progress on stderr (no fancy UI)
pub struct SimpleProgress;

impl BatchProgressNotifier for SimpleProgress {
    fn on_run_start(&self, total: Option<usize>) {
        match total {
            Some(total) => eprintln!("{} {} ({} documents)", "->".cyan(), "Classifying".bold(), total),
            None => eprintln!("{} {}", "->".cyan(), "Classifying".bold()),
        }
    }

    fn on_document_complete(&self, doc: &Document) {
        eprintln!("  {}", ProgressReporter::label_status(doc));
    }

    fn on_run_complete(&self, summary: &BatchSummary) {
        eprintln!(
            "{} {} documents, {} oracle calls",
            "->".cyan(),
            summary.processed,
            summary.oracle_calls
        );
    }
}
