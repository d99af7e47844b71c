use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use digitalis_classify::{classify_batch, AlignmentMode, BeatMap};
use digitalis_dtw::DEFAULT_RADIUS;
use digitalis_io::{BeatTemplateReader, ExperimentName, ResultWriter, TargetReport};

#[derive(Parser)]
#[command(name = "digitalis")]
#[command(about = "DTW-based ECG beat classification against NORMAL and AMI prototypes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel classification (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Command {
    /// Classify target beat samples against NORMAL and AMI prototype templates
    Classify {
        /// Path to the NORMAL prototype templates CSV
        #[arg(long)]
        normal: PathBuf,

        /// Path to the AMI prototype templates CSV
        #[arg(long)]
        ami: PathBuf,

        /// Target sample CSV (repeatable; targets are classified in parallel)
        #[arg(long, required = true)]
        target: Vec<PathBuf>,

        /// Use the multiresolution FastDTW approximation instead of exact DTW
        #[arg(long, default_value_t = false)]
        fast: bool,

        /// FastDTW neighborhood radius
        #[arg(long, default_value_t = DEFAULT_RADIUS)]
        radius: usize,

        /// Experiment name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        experiment: String,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct ClassifyOutput {
    experiment: String,
    mode: String,
    n_targets: usize,
    results: Vec<TargetOutput>,
}

#[derive(Serialize)]
struct TargetOutput {
    target: String,
    verdict: String,
    label: usize,
    n_leads: usize,
    mean_normal_secs: f64,
    mean_ami_secs: f64,
}

fn target_name(path: &std::path::Path) -> String {
    path.file_stem().map_or_else(
        || path.display().to_string(),
        |stem| stem.to_string_lossy().into_owned(),
    )
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Configure Rayon thread pool
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Classify {
            normal,
            ami,
            target,
            fast,
            radius,
            experiment,
            output_dir,
        } => {
            let experiment_name = ExperimentName::new(experiment.clone())?;

            let mode = if fast {
                AlignmentMode::Fast { radius }
            } else {
                AlignmentMode::Exact
            };
            let mode_label = if fast { "fast" } else { "exact" };

            // Read prototype templates
            let normal_prototypes = BeatTemplateReader::new(&normal)
                .read()
                .context("failed to read NORMAL prototype CSV")?;
            let ami_prototypes = BeatTemplateReader::new(&ami)
                .read()
                .context("failed to read AMI prototype CSV")?;
            info!(
                n_normal_leads = normal_prototypes.len(),
                n_ami_leads = ami_prototypes.len(),
                "prototype templates loaded"
            );

            // Read targets
            let targets: Vec<BeatMap> = target
                .iter()
                .map(|path| {
                    BeatTemplateReader::new(path)
                        .read()
                        .with_context(|| format!("failed to read target CSV {}", path.display()))
                })
                .collect::<Result<Vec<_>>>()?;

            // Classify all targets in parallel
            let outcomes = classify_batch(&targets, &normal_prototypes, &ami_prototypes, mode);

            let reports: Vec<TargetReport> = target
                .iter()
                .zip(outcomes)
                .map(|(path, outcome)| {
                    let name = target_name(path);
                    let outcome =
                        outcome.with_context(|| format!("classification failed for {name}"))?;
                    Ok(TargetReport {
                        target: name,
                        outcome,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            // Write JSON artifact
            let writer = ResultWriter::new(&output_dir, experiment_name)?;
            writer.write_verdicts(mode_label, &reports)?;

            // Build and print stdout summary
            let output = ClassifyOutput {
                experiment,
                mode: mode_label.to_string(),
                n_targets: reports.len(),
                results: reports
                    .iter()
                    .map(|report| TargetOutput {
                        target: report.target.clone(),
                        verdict: report.outcome.verdict.to_string(),
                        label: report.outcome.verdict.index(),
                        n_leads: report.outcome.classification.lead_verdicts.len(),
                        mean_normal_secs: report.outcome.normal.mean_duration.as_secs_f64(),
                        mean_ami_secs: report.outcome.ami.mean_duration.as_secs_f64(),
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
