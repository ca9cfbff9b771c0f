//! Error export adapters

mod json_exporter;

pub use json_exporter::JsonErrorExporter;
