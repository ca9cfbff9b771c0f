//! Output formatter trait

use super::report::RunReport;

/// Trait for formatting run results
pub trait OutputFormatter {
    /// Human-readable report
    fn format(&self, report: &RunReport) -> String;

    /// Format as JSON
    fn format_json(&self, report: &RunReport) -> String;
}
