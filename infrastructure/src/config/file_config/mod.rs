//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod evaluation;
mod oracle;
mod output;
mod run;

pub use evaluation::FileEvaluationConfig;
pub use oracle::FileOracleConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use run::FileRunConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("oracle.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("run.concurrency cannot be 0")]
    InvalidConcurrency,

    #[error("oracle.endpoint cannot be empty")]
    EmptyEndpoint,

    #[error("oracle.n_predict cannot be 0")]
    InvalidPredictLength,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// llama.cpp server and generation parameters
    pub oracle: FileOracleConfig,
    /// Corpus, tree and batch settings
    pub run: FileRunConfig,
    /// Error export settings
    pub evaluation: FileEvaluationConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.oracle.timeout_seconds == 0 {
            issues.push(ConfigValidationError::InvalidTimeout);
        }
        if self.oracle.endpoint.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyEndpoint);
        }
        if self.oracle.n_predict == 0 {
            issues.push(ConfigValidationError::InvalidPredictLength);
        }
        if self.run.concurrency == 0 {
            issues.push(ConfigValidationError::InvalidConcurrency);
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use triage_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[oracle]
endpoint = "http://localhost:8081"
n_predict = 16
temperature = 0.2
top_p = 0.9
repeat_penalty = 1.0
stop = ["</s>", "\n"]
timeout_seconds = 30

[run]
data_dir = "corpus"
treated_file = "state/treated.json"
tree_path = "trees/india.json"
limit = 50
concurrency = 4
max_chars = 1500
keep_content = true

[evaluation]
export_dir = "errors"

[output]
format = "json"
color = false
show_progress = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.oracle.endpoint, "http://localhost:8081");
        assert_eq!(config.oracle.n_predict, 16);
        assert_eq!(config.oracle.stop.len(), 2);
        assert_eq!(config.oracle.timeout_seconds, 30);
        assert_eq!(config.run.data_dir, PathBuf::from("corpus"));
        assert_eq!(config.run.tree_path, Some(PathBuf::from("trees/india.json")));
        assert_eq!(config.run.limit, Some(50));
        assert_eq!(config.run.concurrency, 4);
        assert_eq!(config.run.max_chars, Some(1500));
        assert!(config.run.keep_content);
        assert_eq!(config.evaluation.export_dir, Some(PathBuf::from("errors")));
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[run]
concurrency = 8
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.run.concurrency, 8);
        // Defaults should apply
        assert_eq!(config.run.data_dir, PathBuf::from("data"));
        assert_eq!(config.oracle, FileOracleConfig::default());
        assert!(config.output.color);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.oracle.endpoint, "http://127.0.0.1:8080");
        assert_eq!(config.oracle.temperature, 0.1);
        assert_eq!(config.oracle.top_p, 0.95);
        assert_eq!(config.oracle.repeat_penalty, 1.1);
        assert_eq!(config.oracle.n_predict, 300);
        assert_eq!(config.run.concurrency, 1);
        assert_eq!(config.run.max_chars, Some(2000));
        assert!(config.run.tree_path.is_none());
        assert!(config.evaluation.export_dir.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let mut config = FileConfig::default();
        config.oracle.timeout_seconds = 0;
        config.oracle.endpoint = "  ".to_string();
        config.run.concurrency = 0;

        let issues = config.validate();
        assert_eq!(
            issues,
            vec![
                ConfigValidationError::InvalidTimeout,
                ConfigValidationError::EmptyEndpoint,
                ConfigValidationError::InvalidConcurrency,
            ]
        );
    }
}
