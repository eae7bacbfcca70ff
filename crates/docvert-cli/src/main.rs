//! docvert - Unified document extraction CLI
//!
//! Convert documents through interchangeable extraction engines.
//!
//! ## Commands
//!
//! - `engines`: List engines with availability and download status
//! - `download`: Fetch models for an engine (or all engines that need them)
//! - `convert`: Convert one document with one engine
//! - `compare`: Run several engines against one document side by side
//! - `batch`: Convert a directory of documents with one engine
//! - `batch-compare`: Compare several engines across a directory
//! - `chunkers`: List text chunking strategies
//! - `chunk`: Chunk a converted text file
//! - `convert-chunk`: Convert a document and chunk the result in one step

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};

use docvert_core::{
    chunk_text, engines_from_config, BatchJobRunner, BatchRecordStatus, ChunkParams,
    ChunkStrategy, ComparisonRunner, ComparisonTaskStore, Config, DocumentRef,
    DownloadCoordinator, DownloadStatus, EngineRegistry, OutcomeStatus, OutputFormat, TaskStatus,
};

#[derive(Parser)]
#[command(name = "docvert")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Unified document extraction wrapper", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Path to a docvert.toml configuration file
    #[arg(long, global = true, env = "DOCVERT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn parse_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse()
}

fn parse_strategy(s: &str) -> std::result::Result<ChunkStrategy, String> {
    s.parse()
}

#[derive(Subcommand)]
enum Commands {
    /// List engines with availability and download status
    Engines {
        /// Print the raw JSON snapshot
        #[arg(long)]
        json: bool,
    },

    /// Fetch models for an engine
    Download {
        /// Engine name
        engine: Option<String>,

        /// Fetch models for every available engine that needs them
        #[arg(short, long)]
        all: bool,
    },

    /// Convert one document
    Convert {
        /// Input document
        input: PathBuf,

        /// Extraction engine to use
        #[arg(short, long)]
        engine: String,

        /// Output format
        #[arg(short, long, default_value = "markdown", value_parser = parse_format)]
        format: OutputFormat,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare several engines on a single document
    Compare {
        /// Input document
        input: PathBuf,

        /// Engines to compare (repeat the flag)
        #[arg(short = 'e', long = "engine", required = true)]
        engines: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "markdown", value_parser = parse_format)]
        format: OutputFormat,

        /// Output directory for per-engine results
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Batch convert a directory of documents
    Batch {
        /// Directory containing input documents
        input_dir: PathBuf,

        /// Extraction engine to use
        #[arg(short, long)]
        engine: String,

        /// Output format
        #[arg(short, long, default_value = "markdown", value_parser = parse_format)]
        format: OutputFormat,

        /// Output directory for converted documents and the report
        #[arg(short, long)]
        output: PathBuf,

        /// Number of parallel workers
        #[arg(short, long, default_value_t = 2)]
        parallel: usize,

        /// Input filename pattern
        #[arg(long, default_value = "*.pdf")]
        pattern: String,

        /// Exit zero even when some inputs fail
        #[arg(long)]
        skip_errors: bool,
    },

    /// Compare several engines across every document in a directory
    BatchCompare {
        /// Directory containing input documents
        input_dir: PathBuf,

        /// Engines to compare (repeat the flag)
        #[arg(short = 'e', long = "engine", required = true)]
        engines: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "markdown", value_parser = parse_format)]
        format: OutputFormat,

        /// Output directory for the comparison report
        #[arg(short, long)]
        output: PathBuf,

        /// Limit the number of files processed
        #[arg(long)]
        max_files: Option<usize>,

        /// Input filename pattern
        #[arg(long, default_value = "*.pdf")]
        pattern: String,
    },

    /// List text chunking strategies
    Chunkers,

    /// Chunk a converted text file for retrieval pipelines
    Chunk {
        /// Input text file
        input: PathBuf,

        /// Chunking strategy
        #[arg(short = 'c', long, value_parser = parse_strategy)]
        chunker: ChunkStrategy,

        /// Maximum characters per chunk
        #[arg(long, default_value_t = 2048)]
        chunk_size: usize,

        /// Overlapping characters between chunks
        #[arg(long, default_value_t = 0)]
        chunk_overlap: usize,

        /// Output file for the chunk JSON (defaults to <stem>_chunks.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a document and chunk the result in one step
    ConvertChunk {
        /// Input document
        input: PathBuf,

        /// Extraction engine to use
        #[arg(short, long)]
        engine: String,

        /// Chunking strategy
        #[arg(short = 'c', long, value_parser = parse_strategy)]
        chunker: ChunkStrategy,

        /// Output format for the conversion step
        #[arg(short, long, default_value = "markdown", value_parser = parse_format)]
        format: OutputFormat,

        /// Maximum characters per chunk
        #[arg(long, default_value_t = 2048)]
        chunk_size: usize,

        /// Overlapping characters between chunks
        #[arg(long, default_value_t = 0)]
        chunk_overlap: usize,

        /// Also save the intermediate converted text
        #[arg(long)]
        save_converted: bool,

        /// Output file for the chunk JSON (defaults to <stem>_chunks.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    docvert_core::init_tracing(cli.json_logs, level);

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Engines { json } => cmd_engines(&build_registry(&config).await, json).await,
        Commands::Download { engine, all } => {
            cmd_download(&build_registry(&config).await, engine.as_deref(), all).await
        }
        Commands::Convert {
            input,
            engine,
            format,
            output,
        } => {
            cmd_convert(
                &build_registry(&config).await,
                &input,
                &engine,
                format,
                output.as_deref(),
            )
            .await
        }
        Commands::Compare {
            input,
            engines,
            format,
            output,
        } => cmd_compare(&build_registry(&config).await, &input, &engines, format, &output).await,
        Commands::Batch {
            input_dir,
            engine,
            format,
            output,
            parallel,
            pattern,
            skip_errors,
        } => {
            cmd_batch(
                &build_registry(&config).await,
                &input_dir,
                &engine,
                format,
                &output,
                parallel,
                &pattern,
                skip_errors,
            )
            .await
        }
        Commands::BatchCompare {
            input_dir,
            engines,
            format,
            output,
            max_files,
            pattern,
        } => {
            cmd_batch_compare(
                &build_registry(&config).await,
                &input_dir,
                &engines,
                format,
                &output,
                max_files,
                &pattern,
            )
            .await
        }
        // Chunking commands never touch the engines; skip the probe.
        Commands::Chunkers => cmd_chunkers(),
        Commands::Chunk {
            input,
            chunker,
            chunk_size,
            chunk_overlap,
            output,
        } => cmd_chunk(
            &input,
            chunker,
            ChunkParams {
                chunk_size,
                chunk_overlap,
            },
            output.as_deref(),
        ),
        Commands::ConvertChunk {
            input,
            engine,
            chunker,
            format,
            chunk_size,
            chunk_overlap,
            save_converted,
            output,
        } => {
            cmd_convert_chunk(
                &build_registry(&config).await,
                &input,
                &engine,
                chunker,
                format,
                ChunkParams {
                    chunk_size,
                    chunk_overlap,
                },
                save_converted,
                output.as_deref(),
            )
            .await
        }
    }
}

async fn build_registry(config: &Config) -> Arc<EngineRegistry> {
    Arc::new(EngineRegistry::probe_all(engines_from_config(config)).await)
}

/// List every engine with availability and download state.
async fn cmd_engines(registry: &Arc<EngineRegistry>, json: bool) -> Result<()> {
    let snapshot = registry.snapshot().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("{:<12} {:<12} {:<14} DETAILS", "ENGINE", "AVAILABLE", "DOWNLOAD");
    for descriptor in snapshot {
        let available = if descriptor.available { "yes" } else { "no" };
        let download = match descriptor.download_status {
            DownloadStatus::NotRequired => "not required",
            DownloadStatus::NotStarted => "not started",
            DownloadStatus::Downloading => "downloading",
            DownloadStatus::Ready => "ready",
            DownloadStatus::Failed => "failed",
        };
        let details = descriptor
            .error
            .or(descriptor.download_error)
            .unwrap_or_default();
        println!(
            "{:<12} {:<12} {:<14} {}",
            descriptor.name, available, download, details
        );
    }
    Ok(())
}

/// Fetch models for one engine, or for every engine that needs them.
async fn cmd_download(
    registry: &Arc<EngineRegistry>,
    engine: Option<&str>,
    all: bool,
) -> Result<()> {
    let coordinator = DownloadCoordinator::new(Arc::clone(registry));

    let targets: Vec<String> = if all {
        registry
            .snapshot()
            .await
            .into_iter()
            .filter(|d| d.available && d.requires_download)
            .map(|d| d.name)
            .collect()
    } else {
        match engine {
            Some(name) => vec![name.to_string()],
            None => bail!("specify an engine name or --all"),
        }
    };

    if targets.is_empty() {
        println!("No engines require model downloads.");
        return Ok(());
    }

    let mut failures = 0usize;
    for name in &targets {
        info!(engine = %name, "requesting model download");
        match coordinator.trigger_download(name).await? {
            DownloadStatus::Ready => println!("{name}: models ready"),
            DownloadStatus::Failed => {
                let descriptor = registry.get(name).await?;
                let reason = descriptor.download_error.unwrap_or_default();
                warn!(engine = %name, error = %reason, "download failed");
                println!("{name}: download failed ({reason})");
                failures += 1;
            }
            other => println!("{name}: {other:?}"),
        }
    }

    if failures > 0 {
        bail!("{failures} of {} downloads failed", targets.len());
    }
    Ok(())
}

/// Convert one document and write or print the result.
async fn cmd_convert(
    registry: &Arc<EngineRegistry>,
    input: &Path,
    engine_name: &str,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    if !input.is_file() {
        bail!("input file not found: {}", input.display());
    }
    let descriptor = registry.get(engine_name).await?;
    if !descriptor.available {
        bail!(
            "engine {engine_name} is not available: {}",
            descriptor.error.unwrap_or_default()
        );
    }

    let engine = registry.handle(engine_name).await?;
    let document = DocumentRef::from(input.to_path_buf());
    info!(engine = %engine_name, input = %document, "converting");

    let content = engine
        .convert(&document, format)
        .await
        .map_err(|e| anyhow::anyhow!("conversion failed: {e}"))?;

    match output {
        Some(path) => {
            std::fs::write(path, &content)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {} bytes to {}", content.len(), path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}

/// Fan one document out to several engines and report side by side.
async fn cmd_compare(
    registry: &Arc<EngineRegistry>,
    input: &Path,
    engines: &[String],
    format: OutputFormat,
    output: &Path,
) -> Result<()> {
    if !input.is_file() {
        bail!("input file not found: {}", input.display());
    }
    if engines.len() < 2 {
        bail!("specify at least 2 engines to compare");
    }
    let engines = if engines.len() > 5 {
        println!("Limiting to 5 engines (you specified {})", engines.len());
        &engines[..5]
    } else {
        engines
    };
    std::fs::create_dir_all(output)
        .with_context(|| format!("creating output dir {}", output.display()))?;

    let runner = ComparisonRunner::new(Arc::clone(registry), ComparisonTaskStore::new());
    let document = DocumentRef::from(input.to_path_buf());
    let task_id = runner.submit(document, engines, format).await?;
    info!(%task_id, "comparison submitted, polling until complete");

    let task = loop {
        let snapshot = runner.store().get(task_id).await?;
        if snapshot.status == TaskStatus::Completed {
            break snapshot;
        }
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    };

    let mut results = serde_json::Map::new();
    for (name, outcome) in &task.outcomes {
        match outcome.status {
            OutcomeStatus::Success => {
                let path = output.join(format!("{name}_result.{}", format.extension()));
                let content = outcome.content.as_deref().unwrap_or_default();
                std::fs::write(&path, content)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!(
                    "{name}: ok ({} bytes, {} ms) -> {}",
                    content.len(),
                    outcome.elapsed_ms.unwrap_or_default(),
                    path.display()
                );
                results.insert(
                    name.clone(),
                    serde_json::json!({
                        "status": "success",
                        "file": path.display().to_string(),
                        "size_bytes": content.len(),
                        "elapsed_ms": outcome.elapsed_ms,
                    }),
                );
            }
            _ => {
                let error = outcome.error.clone().unwrap_or_default();
                println!("{name}: failed ({error})");
                results.insert(
                    name.clone(),
                    serde_json::json!({
                        "status": "failed",
                        "error": error,
                        "elapsed_ms": outcome.elapsed_ms,
                    }),
                );
            }
        }
    }

    let summary = serde_json::json!({
        "task_id": task.task_id,
        "input_file": input.display().to_string(),
        "format": format.as_str(),
        "created_at": task.created_at,
        "engines": engines,
        "results": results,
    });
    let summary_path = output.join("comparison_summary.json");
    std::fs::write(&summary_path, serde_json::to_string_pretty(&summary)?)
        .with_context(|| format!("writing {}", summary_path.display()))?;
    println!("Summary: {}", summary_path.display());

    runner.store().delete(task_id).await?;
    Ok(())
}

/// Find input documents in `input_dir` matching `pattern`, sorted.
fn collect_inputs(input_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        bail!("directory not found: {}", input_dir.display());
    }
    let full_pattern = input_dir.join(pattern).display().to_string();
    let mut files: Vec<PathBuf> = glob::glob(&full_pattern)
        .with_context(|| format!("invalid pattern: {pattern}"))?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Batch convert every matching document in a directory.
#[allow(clippy::too_many_arguments)]
async fn cmd_batch(
    registry: &Arc<EngineRegistry>,
    input_dir: &Path,
    engine: &str,
    format: OutputFormat,
    output: &Path,
    parallel: usize,
    pattern: &str,
    skip_errors: bool,
) -> Result<()> {
    let files = collect_inputs(input_dir, pattern)?;
    if files.is_empty() {
        warn!(pattern = %pattern, "no input files matched");
        println!("No files matching '{pattern}' in {}", input_dir.display());
        return Ok(());
    }

    std::fs::create_dir_all(output)
        .with_context(|| format!("creating output dir {}", output.display()))?;
    println!(
        "Converting {} files with {engine} ({} workers)",
        files.len(),
        parallel
    );

    let inputs: Vec<DocumentRef> = files.iter().map(|f| DocumentRef::from(f.clone())).collect();
    let runner = BatchJobRunner::new(Arc::clone(registry));
    let report = runner.run(inputs, engine, parallel, format).await?;

    for record in &report.records {
        if record.status == BatchRecordStatus::Success {
            let stem = record
                .input_ref
                .as_path()
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "output".to_string());
            let path = output.join(format!("{stem}.{}", format.extension()));
            let content = record.content.as_deref().unwrap_or_default();
            std::fs::write(&path, content)
                .with_context(|| format!("writing {}", path.display()))?;
        }
    }

    let report_path = output.join("batch_report.json");
    std::fs::write(&report_path, serde_json::to_string_pretty(&report)?)
        .with_context(|| format!("writing {}", report_path.display()))?;

    println!(
        "Done: {} succeeded, {} failed of {} ({:.1}% success)",
        report.succeeded,
        report.failed,
        report.total,
        report.success_rate() * 100.0
    );
    println!("Report: {}", report_path.display());

    if report.failed > 0 && !skip_errors {
        bail!("{} of {} inputs failed to convert", report.failed, report.total);
    }
    Ok(())
}

/// Compare several engines on every matching document in a directory.
async fn cmd_batch_compare(
    registry: &Arc<EngineRegistry>,
    input_dir: &Path,
    engines: &[String],
    format: OutputFormat,
    output: &Path,
    max_files: Option<usize>,
    pattern: &str,
) -> Result<()> {
    let mut files = collect_inputs(input_dir, pattern)?;
    if files.is_empty() {
        warn!(pattern = %pattern, "no input files matched");
        println!("No files matching '{pattern}' in {}", input_dir.display());
        return Ok(());
    }
    if let Some(max) = max_files {
        if files.len() > max {
            println!("Processing first {max} of {} files", files.len());
            files.truncate(max);
        }
    }
    std::fs::create_dir_all(output)
        .with_context(|| format!("creating output dir {}", output.display()))?;
    println!(
        "Comparing {} engines across {} files",
        engines.len(),
        files.len()
    );

    let runner = ComparisonRunner::new(Arc::clone(registry), ComparisonTaskStore::new());
    let mut results = serde_json::Map::new();
    for file in &files {
        let task_id = runner
            .submit(DocumentRef::from(file.clone()), engines, format)
            .await?;
        let task = loop {
            let snapshot = runner.store().get(task_id).await?;
            if snapshot.status == TaskStatus::Completed {
                break snapshot;
            }
            tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        };

        let mut per_engine = serde_json::Map::new();
        let mut succeeded = 0usize;
        for (name, outcome) in &task.outcomes {
            let entry = match outcome.status {
                OutcomeStatus::Success => {
                    succeeded += 1;
                    serde_json::json!({
                        "status": "success",
                        "size_bytes": outcome.content.as_deref().map(str::len).unwrap_or(0),
                        "elapsed_ms": outcome.elapsed_ms,
                    })
                }
                _ => serde_json::json!({
                    "status": "failed",
                    "error": outcome.error,
                    "elapsed_ms": outcome.elapsed_ms,
                }),
            };
            per_engine.insert(name.clone(), entry);
        }

        let file_name = file
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        println!(
            "{file_name}: {succeeded}/{} engines succeeded",
            task.outcomes.len()
        );
        results.insert(file_name, serde_json::Value::Object(per_engine));
        runner.store().delete(task_id).await?;
    }

    let report = serde_json::json!({
        "input_directory": input_dir.display().to_string(),
        "engines": engines,
        "format": format.as_str(),
        "total_files": files.len(),
        "results": results,
    });
    let report_path = output.join("batch_comparison_report.json");
    std::fs::write(&report_path, serde_json::to_string_pretty(&report)?)
        .with_context(|| format!("writing {}", report_path.display()))?;
    println!("Report: {}", report_path.display());
    Ok(())
}

/// List the available chunking strategies.
fn cmd_chunkers() -> Result<()> {
    println!("{:<12} DESCRIPTION", "CHUNKER");
    for strategy in ChunkStrategy::all() {
        println!("{:<12} {}", strategy.as_str(), strategy.describe());
    }
    Ok(())
}

fn default_chunks_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    PathBuf::from(format!("{stem}_chunks.json"))
}

/// Chunk an already-converted text file.
fn cmd_chunk(
    input: &Path,
    strategy: ChunkStrategy,
    params: ChunkParams,
    output: Option<&Path>,
) -> Result<()> {
    if !input.is_file() {
        bail!("input file not found: {}", input.display());
    }
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    if text.trim().is_empty() {
        bail!("input file is empty: {}", input.display());
    }

    let report = chunk_text(strategy, params, &text)?;
    info!(chunker = %strategy, chunks = report.total_chunks, "chunked input");

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_chunks_path(input));
    std::fs::write(&path, serde_json::to_string_pretty(&report)?)
        .with_context(|| format!("writing {}", path.display()))?;
    println!(
        "{} chunks from {} characters -> {}",
        report.total_chunks,
        report.original_length,
        path.display()
    );
    Ok(())
}

/// Convert one document and chunk the result in one step.
#[allow(clippy::too_many_arguments)]
async fn cmd_convert_chunk(
    registry: &Arc<EngineRegistry>,
    input: &Path,
    engine_name: &str,
    strategy: ChunkStrategy,
    format: OutputFormat,
    params: ChunkParams,
    save_converted: bool,
    output: Option<&Path>,
) -> Result<()> {
    if !input.is_file() {
        bail!("input file not found: {}", input.display());
    }
    let descriptor = registry.get(engine_name).await?;
    if !descriptor.available {
        bail!(
            "engine {engine_name} is not available: {}",
            descriptor.error.unwrap_or_default()
        );
    }

    let engine = registry.handle(engine_name).await?;
    let document = DocumentRef::from(input.to_path_buf());
    info!(engine = %engine_name, chunker = %strategy, input = %document, "converting and chunking");

    let content = engine
        .convert(&document, format)
        .await
        .map_err(|e| anyhow::anyhow!("conversion failed: {e}"))?;

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    if save_converted {
        let converted_path = PathBuf::from(format!("{stem}_converted.{}", format.extension()));
        std::fs::write(&converted_path, &content)
            .with_context(|| format!("writing {}", converted_path.display()))?;
        println!("Converted text: {}", converted_path.display());
    }

    let report = chunk_text(strategy, params, &content)?;
    let payload = serde_json::json!({
        "source_file": input.display().to_string(),
        "conversion": {
            "engine": engine_name,
            "format": format.as_str(),
            "text_length": report.original_length,
        },
        "chunking": report,
    });

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_chunks_path(input));
    std::fs::write(&path, serde_json::to_string_pretty(&payload)?)
        .with_context(|| format!("writing {}", path.display()))?;
    println!(
        "{} -> {} chunks ({} characters) -> {}",
        engine_name,
        report.total_chunks,
        report.original_length,
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_format_accepts_aliases() {
        assert_eq!(parse_format("md").unwrap(), OutputFormat::Markdown);
        assert_eq!(parse_format("markdown").unwrap(), OutputFormat::Markdown);
        assert_eq!(parse_format("txt").unwrap(), OutputFormat::Text);
        assert!(parse_format("yaml").is_err());
    }

    #[test]
    fn test_parse_strategy() {
        assert_eq!(parse_strategy("token").unwrap(), ChunkStrategy::Token);
        assert_eq!(parse_strategy("sentence").unwrap(), ChunkStrategy::Sentence);
        assert!(parse_strategy("semantic").is_err());
    }

    #[test]
    fn test_default_chunks_path_uses_input_stem() {
        let path = default_chunks_path(Path::new("reports/q3.md"));
        assert_eq!(path, PathBuf::from("q3_chunks.json"));
    }
}
