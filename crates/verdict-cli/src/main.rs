//! Verdict CLI - review stored evaluator results
//!
//! The `verdict` command recovers scores from evaluator output and reports on them.
//!
//! ## Commands
//!
//! - `parse`: Score a single raw evaluator output
//! - `review`: Show per-dimension reviews of stored results
//! - `export`: Write reviews as JSON or CSV
//! - `summary`: Aggregate scores and flags across stored results
//! - `history`: List stored reviews, newest first
//! - `dimensions`: Show the dimension and flag catalogues

mod config;
mod render;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use verdict_core::report::{self, TaskRecord};
use verdict_core::{evaluate_output, RawEvaluationOutput};

use config::{OutputFormat, Settings};

#[derive(Parser)]
#[command(name = "verdict")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Recover and report scores from LLM evaluator output", long_about = None)]
struct Cli {
    /// Settings file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one raw evaluator output
    Parse {
        /// File holding the raw output (default: stdin)
        file: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Review stored results, dimension by dimension
    Review {
        /// Results file (default: from settings)
        file: Option<PathBuf>,

        /// Only review the record at this stored position
        #[arg(short, long)]
        index: Option<usize>,

        /// Only review records with this task id
        #[arg(short, long)]
        task: Option<String>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Export reviews of stored results
    Export {
        /// Results file (default: from settings)
        file: Option<PathBuf>,

        /// Export format (json or csv)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Destination path, `-` for stdout (default: settings csv_file for CSV, stdout for JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Aggregate scores and flags across stored results
    Summary {
        /// Results file (default: from settings)
        file: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// List stored reviews, newest first
    History {
        /// Results file (default: from settings)
        file: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show the dimension and flag catalogues
    Dimensions,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    init_tracing(&settings, cli.verbose);
    debug!(?settings, "settings loaded");

    match cli.command {
        Commands::Parse { file, format } => {
            cmd_parse(file.as_deref(), format.unwrap_or(settings.format))
        }
        Commands::Review {
            file,
            index,
            task,
            format,
        } => cmd_review(
            &results_path(file, &settings),
            index,
            task.as_deref(),
            format.unwrap_or(settings.format),
        ),
        Commands::Export {
            file,
            format,
            output,
        } => cmd_export(
            &results_path(file, &settings),
            export_format(format, settings.format),
            output.as_deref(),
            &settings,
        ),
        Commands::Summary { file, format } => {
            cmd_summary(&results_path(file, &settings), format.unwrap_or(settings.format))
        }
        Commands::History { file, format } => {
            cmd_history(&results_path(file, &settings), format.unwrap_or(settings.format))
        }
        Commands::Dimensions => cmd_dimensions(),
    }
}

/// Logs go to stderr so stdout stays clean for exports. `RUST_LOG` wins.
fn init_tracing(settings: &Settings, verbose: bool) {
    let level = if verbose {
        "debug"
    } else {
        settings.log_level.as_str()
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

fn results_path(file: Option<PathBuf>, settings: &Settings) -> PathBuf {
    file.unwrap_or_else(|| settings.results_file.clone())
}

/// Export defaults to CSV unless settings ask for JSON.
fn export_format(flag: Option<OutputFormat>, configured: OutputFormat) -> OutputFormat {
    match (flag, configured) {
        (Some(format), _) => format,
        (None, OutputFormat::Json) => OutputFormat::Json,
        (None, _) => OutputFormat::Csv,
    }
}

fn load(path: &Path) -> Result<Vec<TaskRecord>> {
    let records = report::load_records(path)
        .with_context(|| format!("Failed to load results from {}", path.display()))?;
    info!(path = %path.display(), records = records.len(), "results loaded");
    Ok(records)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_text<F>(f: F) -> Result<()>
where
    F: FnOnce(&mut String) -> std::fmt::Result,
{
    let mut out = String::new();
    f(&mut out).context("Failed to render output")?;
    print!("{}", out);
    Ok(())
}

fn cmd_parse(file: Option<&Path>, format: OutputFormat) -> Result<()> {
    let input = match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let verdict = evaluate_output(&RawEvaluationOutput::text(input));

    match format {
        OutputFormat::Json => print_json(&verdict),
        OutputFormat::Text => print_text(|out| render::render_verdict(out, &verdict)),
        OutputFormat::Csv => bail!("CSV output is only available for export"),
    }
}

fn cmd_review(
    path: &Path,
    index: Option<usize>,
    task: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let records = load(path)?;

    let selected: Vec<&TaskRecord> = match (index, task) {
        (Some(index), _) => match report::entry(&records, index) {
            Some(record) => vec![record],
            None => bail!("No readable record at index {} in {}", index, path.display()),
        },
        (None, Some(task)) => records
            .iter()
            .filter(|r| r.task_id.as_deref() == Some(task))
            .collect(),
        (None, None) => records.iter().collect(),
    };

    if selected.is_empty() {
        bail!("No matching records in {}", path.display());
    }

    for record in &selected {
        if let Some(error) = record.processing_error() {
            tracing::warn!(
                config_file = record.config_file.as_deref().unwrap_or("?"),
                error,
                "record holds a processing error"
            );
        }
    }

    let reviews: Vec<_> = selected.into_iter().map(report::review_task).collect();

    match format {
        OutputFormat::Json => print_json(&reviews),
        OutputFormat::Text => print_text(|out| {
            reviews
                .iter()
                .try_for_each(|review| render::render_review(out, review))
        }),
        OutputFormat::Csv => bail!("CSV output is only available for export"),
    }
}

fn cmd_export(
    path: &Path,
    format: OutputFormat,
    output: Option<&Path>,
    settings: &Settings,
) -> Result<()> {
    let reviews = report::review_all(&load(path)?);

    let (contents, default_output) = match format {
        OutputFormat::Csv => (report::to_csv(&reviews)?, Some(settings.csv_file.as_path())),
        OutputFormat::Json => (report::to_json(&reviews)?, None),
        OutputFormat::Text => bail!("Export format must be json or csv"),
    };

    match output.or(default_output) {
        Some(dest) if dest != Path::new("-") => {
            if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(dest, contents)
                .with_context(|| format!("Failed to write {}", dest.display()))?;
            info!(path = %dest.display(), tasks = reviews.len(), "export written");
            eprintln!("Exported {} reviews to {}", reviews.len(), dest.display());
        }
        _ => print!("{}", contents),
    }
    Ok(())
}

fn cmd_summary(path: &Path, format: OutputFormat) -> Result<()> {
    let reviews = report::review_all(&load(path)?);
    let summary = report::summarize(&reviews);

    match format {
        OutputFormat::Json => print_json(&summary),
        OutputFormat::Text => print_text(|out| render::render_summary(out, &summary)),
        OutputFormat::Csv => bail!("CSV output is only available for export"),
    }
}

fn cmd_history(path: &Path, format: OutputFormat) -> Result<()> {
    let entries = report::history(&load(path)?);

    match format {
        OutputFormat::Json => print_json(&entries),
        OutputFormat::Text => print_text(|out| render::render_history(out, &entries)),
        OutputFormat::Csv => bail!("CSV output is only available for export"),
    }
}

fn cmd_dimensions() -> Result<()> {
    print_text(|out| render::render_catalog(out))
}
