//! CLI entrypoint for llm-triage
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use triage_application::{
    ClassifyDocumentUseCase, DocumentLoader, Evaluator, RunBatchInput, RunBatchUseCase,
    TraversalOptions,
};
use triage_domain::{DecisionTree, Document, OutputFormat};
use triage_infrastructure::{
    ConfigLoader, FileConfig, FileLoader, JsonErrorExporter, JsonlConversationLogger,
    LlamaServerOracle, TreeFileLoader,
};
use triage_presentation::{Cli, ConsoleFormatter, ProgressReporter, RunReport, SimpleProgress};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let mut config = load_config(&cli)?;
    apply_cli_overrides(&mut config, &cli);

    let issues = config.validate();
    if !issues.is_empty() {
        let messages: Vec<String> = issues.iter().map(ToString::to_string).collect();
        bail!("Invalid configuration: {}", messages.join("; "));
    }

    if !config.output.color {
        colored::control::set_override(false);
    }
    let format = config.output.format.unwrap_or_default();

    info!("Starting llm-triage");

    if cli.show_tree {
        let tree = load_tree(&config)?;
        println!("{}", tree.outline());
        return Ok(());
    }

    let mut loader = FileLoader::open(
        &config.run.data_dir,
        &config.run.treated_file,
        config.run.keep_content,
    )
    .with_context(|| format!("Failed to open data directory {}", config.run.data_dir.display()))?;

    let mut report = RunReport::default();
    let mut run_documents = Vec::new();

    if !cli.no_run {
        let output = run_batch(&cli, &config, &mut loader).await?;
        run_documents = output.documents;
        report = report.with_batch(output.summary);
    }

    // Evaluate everything treated so far when asked to, otherwise just
    // this run's documents
    let evaluation_docs: &[Document] = if cli.evaluate {
        loader.treated_documents()
    } else {
        &run_documents
    };

    if !evaluation_docs.is_empty() {
        let evaluator = Evaluator::new(evaluation_docs, Arc::new(JsonErrorExporter::new()));
        report.evaluated_documents = evaluation_docs.len();
        if cli.evaluate {
            report.multiclass = Some(evaluator.evaluate());
        }
        report.binary_relevance = Some(evaluator.evaluate_binary_relevance());

        if let Some(dir) = &config.evaluation.export_dir {
            report.exports.push(evaluator.export_errors_by_model(dir)?);
            report
                .exports
                .push(evaluator.export_errors_by_predicted_label(dir)?);
        }
    } else if cli.evaluate {
        warn!("No treated documents to evaluate");
    }

    let output = match format {
        OutputFormat::Text => ConsoleFormatter::format(&report),
        OutputFormat::Json => ConsoleFormatter::format_json(&report),
    };
    println!("{}", output);

    Ok(())
}

/// Classify pending documents until the loader is exhausted, the limit is
/// reached or Ctrl-C is pressed
async fn run_batch(
    cli: &Cli,
    config: &FileConfig,
    loader: &mut dyn DocumentLoader,
) -> Result<triage_application::RunBatchOutput> {
    let tree = Arc::new(load_tree(config)?);

    // === Dependency Injection ===
    let oracle = Arc::new(
        LlamaServerOracle::new(&config.oracle).context("Failed to create llama.cpp oracle")?,
    );
    info!("Oracle endpoint: {}", oracle.completion_url());

    let mut classifier = ClassifyDocumentUseCase::new(tree, oracle).with_options(TraversalOptions {
        timeout: Some(Duration::from_secs(config.oracle.timeout_seconds)),
        max_chars: config.run.max_chars,
    });

    if let Some(path) = &cli.transcript {
        let logger = JsonlConversationLogger::open(path)
            .with_context(|| format!("Failed to open transcript {}", path.display()))?;
        info!("Writing oracle transcript to {}", logger.path().display());
        classifier = classifier.with_logger(Arc::new(logger));
    }

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received; stopping after in-flight documents");
            interrupt.cancel();
        }
    });

    let input = RunBatchInput::new(config.run.concurrency)
        .with_limit(config.run.limit)
        .with_fresh_start(cli.fresh_start)
        .with_cancellation(cancel);

    let use_case = RunBatchUseCase::new(classifier);
    let output = if config.output.show_progress && std::io::stderr().is_terminal() {
        let progress = ProgressReporter::new();
        use_case
            .execute_with_progress(loader, input, &progress)
            .await?
    } else if config.output.show_progress {
        use_case
            .execute_with_progress(loader, input, &SimpleProgress)
            .await?
    } else {
        use_case.execute(loader, input).await?
    };

    if output.summary.interrupted {
        warn!(
            "Run interrupted after {} documents; evaluating partial results",
            output.summary.processed
        );
    }
    Ok(output)
}

fn load_tree(config: &FileConfig) -> Result<DecisionTree> {
    let Some(path) = &config.run.tree_path else {
        bail!("No question tree configured. Use --tree-path or set run.tree_path.");
    };
    Ok(TreeFileLoader::load(path)?)
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    if cli.no_config {
        return Ok(ConfigLoader::load_defaults());
    }
    if let Some(path) = &cli.config
        && !path.exists()
    {
        bail!("Config file not found: {}", path.display());
    }
    ConfigLoader::load(cli.config.as_ref())
        .map_err(|e| anyhow!("Failed to load configuration: {}", e))
}

/// CLI flags take precedence over every configuration source
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(dir) = &cli.data_dir {
        config.run.data_dir = dir.clone();
    }
    if let Some(path) = &cli.treated_file {
        config.run.treated_file = path.clone();
    }
    if let Some(path) = &cli.tree_path {
        config.run.tree_path = Some(path.clone());
    }
    if cli.limit.is_some() {
        config.run.limit = cli.limit;
    }
    if let Some(concurrency) = cli.concurrency {
        config.run.concurrency = concurrency;
    }
    if let Some(url) = &cli.oracle_url {
        config.oracle.endpoint = url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.oracle.timeout_seconds = timeout;
    }
    if let Some(dir) = &cli.export_errors {
        config.evaluation.export_dir = Some(dir.clone());
    }
    if let Some(format) = cli.output {
        config.output.format = Some(format.into());
    }
    if cli.no_color {
        config.output.color = false;
    }
    if cli.quiet {
        config.output.show_progress = false;
    }
}

/// Console logs go to stderr so stdout stays clean for reports; `--log-file`
/// adds a second, uncolored stream.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let console = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match &cli.log_file {
        Some(path) => {
            let (dir, name) = split_log_path(path)?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(console)
        .with(file_layer)
        .init();

    Ok(guard)
}

fn split_log_path(path: &Path) -> Result<(PathBuf, PathBuf)> {
    let name = path
        .file_name()
        .with_context(|| format!("--log-file must name a file: {}", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, PathBuf::from(name)))
}
