//! Output formatting for run and evaluation results

pub mod console;
pub mod formatter;
pub mod report;
