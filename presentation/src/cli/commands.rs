//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for run and evaluation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored tables for the terminal
    Text,
    /// A single JSON document on stdout
    Json,
}

impl From<OutputFormat> for triage_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => triage_domain::OutputFormat::Text,
            OutputFormat::Json => triage_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for llm-triage
#[derive(Parser, Debug)]
#[command(name = "llm-triage")]
#[command(author, version, about = "Classify documents by walking a yes/no question tree with an LLM")]
#[command(long_about = r#"
llm-triage classifies text documents by asking a local LLM a sequence of
yes/no questions. Each answer selects the next question until a leaf label
is reached.

Documents are the *.txt files of the data directory; an optional index.csv
(columns: filename,label) provides ground truth for evaluation. Treated
documents are recorded so an interrupted run resumes where it stopped.

Configuration files are loaded from (in priority order):
1. LLM_TRIAGE_* environment variables (e.g. LLM_TRIAGE_RUN__CONCURRENCY=4)
2. --config <path>     Explicit config file
3. ./triage.toml       Project-level config
4. ~/.config/llm-triage/config.toml   Global config

Example:
  llm-triage --tree-path trees/india.json --data-dir data --limit 50
  llm-triage --tree-path trees/india.json --evaluate --export-errors errors/
  llm-triage --tree-path trees/india.json --show-tree
"#)]
pub struct Cli {
    /// Directory containing document .txt files and index.csv
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// JSON file recording treated documents
    #[arg(long, value_name = "PATH")]
    pub treated_file: Option<PathBuf>,

    /// Question tree description (JSON)
    #[arg(long, value_name = "PATH")]
    pub tree_path: Option<PathBuf>,

    /// Maximum number of documents to classify
    #[arg(short, long, value_name = "N")]
    pub limit: Option<usize>,

    /// Documents classified concurrently
    #[arg(short = 'j', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Evaluate every treated document against index.csv labels
    #[arg(long)]
    pub evaluate: bool,

    /// Skip classification and only evaluate treated documents
    #[arg(long, requires = "evaluate")]
    pub no_run: bool,

    /// Write misclassified documents as JSON files into DIR
    #[arg(long, value_name = "DIR")]
    pub export_errors: Option<PathBuf>,

    /// Delete the treated file and classify everything again
    #[arg(long)]
    pub fresh_start: bool,

    /// Base URL of the llama.cpp server
    #[arg(long, value_name = "URL")]
    pub oracle_url: Option<String>,

    /// Timeout in seconds for a single oracle call
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Print the question tree and exit
    #[arg(long)]
    pub show_tree: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Write every oracle exchange as JSON lines to this file
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,
}
