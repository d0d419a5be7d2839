use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use dxf_vectorize::batch::{discover_inputs, prepare_output_dir, BatchRunner, ConversionTask};
use dxf_vectorize::config::AppConfig;
use dxf_vectorize::vectorize::CommandTaxonomy;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Convert a directory of DXF drawings into JSON primitive records
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Dataset root; inputs are read from `<data-dir>/<split>`
    #[arg(long)]
    data_dir: PathBuf,

    /// Subdirectory holding the DXF files
    #[arg(long)]
    split: Option<String>,

    /// Output directory [default: <data-dir>/jsons]
    #[arg(long)]
    output: Option<PathBuf>,

    /// Number of files converted concurrently
    #[arg(long)]
    jobs: Option<usize>,

    /// Configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tagging of arcs and ellipses
    #[arg(long, value_enum)]
    taxonomy: Option<CommandTaxonomy>,

    /// Sample arcs with degree angles passed straight to cos/sin
    #[arg(long)]
    legacy_arc_points: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, config_error) = match &cli.config {
        Some(path) => match AppConfig::from_file(path) {
            Ok(cfg) => (cfg, None),
            Err(err) => {
                eprintln!("dxf2json: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => match AppConfig::discover() {
            Ok(cfg) => (cfg, None),
            Err(err) => (AppConfig::default(), Some(err)),
        },
    };
    init_logging(&config.logging.level);
    if let Some(err) = config_error {
        warn!(error = %err, "failed to load discovered config, using built-in defaults");
    }

    match run(cli, config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("dxf2json failed: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every file converted
fn run(cli: Cli, mut config: AppConfig) -> anyhow::Result<bool> {
    if let Some(taxonomy) = cli.taxonomy {
        config.conversion.taxonomy = taxonomy;
    }
    if cli.legacy_arc_points {
        config.conversion.legacy_arc_points = true;
    }
    let split = cli.split.unwrap_or(config.batch.split);
    let jobs = cli.jobs.unwrap_or(config.batch.jobs);

    let inputs = discover_inputs(&cli.data_dir, &split)
        .with_context(|| format!("cannot list {}", cli.data_dir.join(&split).display()))?;
    let output_dir = prepare_output_dir(&cli.data_dir, cli.output.as_deref())
        .context("cannot create output directory")?;
    info!(
        files = inputs.len(),
        output = %output_dir.display(),
        jobs,
        taxonomy = ?config.conversion.taxonomy,
        "starting conversion"
    );

    let tasks: Vec<ConversionTask> = inputs
        .into_iter()
        .map(|input| ConversionTask::new(input, &output_dir))
        .collect();

    let report = BatchRunner::new(config.conversion)
        .with_jobs(jobs)
        .with_progress_every(config.batch.progress_every)
        .run(&tasks)?;

    for failure in &report.failures {
        error!(input = %failure.input.display(), error = %failure.error, "not converted");
    }
    Ok(report.is_success())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
