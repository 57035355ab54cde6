use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use mindsift_analyzer::{AnalysisResult, Analyzer, AnalyzerOptions};
use serde::Serialize;

mod report;

#[derive(Parser)]
#[command(name = "mindsift")]
#[command(about = "Deterministic psychological text-pattern analysis", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for output)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one text from a file or stdin
    Analyze(AnalyzeArgs),

    /// Analyze newline-delimited texts from a file or stdin
    Batch(BatchArgs),
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Input file; reads stdin when omitted
    input: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    #[command(flatten)]
    tuning: TuningArgs,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct BatchArgs {
    /// Input file, one document per line; reads stdin when omitted
    input: Option<PathBuf>,

    #[command(flatten)]
    tuning: TuningArgs,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct TuningArgs {
    /// Tokens of context on each side of a marker
    #[arg(long)]
    context_window: Option<usize>,

    /// Number of temporal segments
    #[arg(long)]
    temporal_segments: Option<usize>,

    /// Minimum adjusted weight for a hit to be kept
    #[arg(long)]
    min_confidence: Option<f64>,

    /// Disable the result cache
    #[arg(long)]
    no_cache: bool,
}

impl TuningArgs {
    fn to_options(&self) -> AnalyzerOptions {
        let mut options = AnalyzerOptions::default();
        if let Some(window) = self.context_window {
            options.context_window = window;
        }
        if let Some(segments) = self.temporal_segments {
            options.temporal_segments = segments;
        }
        if let Some(min_confidence) = self.min_confidence {
            options.min_confidence = min_confidence;
        }
        if self.no_cache {
            options.use_cache = false;
        }
        options
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Full analysis result as JSON
    Json,
    /// Human-readable summary
    Report,
}

/// One entry of the batch output array
#[derive(Serialize)]
struct BatchItem {
    index: usize,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<BatchError>,
}

#[derive(Serialize)]
struct BatchError {
    kind: &'static str,
    message: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Analyze(args) => run_analyze(args, cli.verbose),
        Commands::Batch(args) => run_batch(args, cli.verbose),
    }
}

fn run_analyze(args: AnalyzeArgs, verbose: bool) -> Result<()> {
    let text = read_input(args.input.as_deref())?;
    let analyzer = Analyzer::with_default_knowledge(args.tuning.to_options())?;
    let result = analyzer.analyze(&text).context("analysis failed")?;

    match args.format {
        OutputFormat::Json => print_json(&result, args.pretty)?,
        OutputFormat::Report => println!("{}", report::render(&result)),
    }
    if verbose {
        log_cache_stats(&analyzer);
    }
    Ok(())
}

fn run_batch(args: BatchArgs, verbose: bool) -> Result<()> {
    let raw = read_input(args.input.as_deref())?;
    let texts: Vec<String> = raw
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect();
    let analyzer = Analyzer::with_default_knowledge(args.tuning.to_options())?;

    let items: Vec<BatchItem> = analyzer
        .analyze_batch(&texts)
        .into_iter()
        .enumerate()
        .map(|(index, outcome)| match outcome {
            Ok(result) => BatchItem {
                index,
                ok: true,
                result: Some(result),
                error: None,
            },
            Err(err) => BatchItem {
                index,
                ok: false,
                result: None,
                error: Some(BatchError {
                    kind: err.kind(),
                    message: err.to_string(),
                }),
            },
        })
        .collect();

    print_json(&items, args.pretty)?;
    if verbose {
        log_cache_stats(&analyzer);
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("reading stdin")?;
            Ok(buffer)
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

fn log_cache_stats(analyzer: &Analyzer) {
    let stats = analyzer.cache_stats();
    info!(
        "cache: {} hits, {} misses, {}/{} entries",
        stats.hits, stats.misses, stats.entries, stats.capacity
    );
}
