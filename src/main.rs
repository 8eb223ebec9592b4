use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use jsprr::api::scenario_dto::ScenarioDto;
use jsprr::loader::parser::parse_json_file;
use jsprr::report;
use jsprr::report::stats_writer::write_usage_stats;

const DEFAULT_DATASET_DIR: &str = "dataset";
const DEFAULT_SEED: u64 = 42;

/// Joint service placement and request routing over an edge/cloud topology.
#[derive(Debug, Parser)]
#[command(name = "jsprr")]
struct Args {
    /// JSON scenario file; command line flags override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding nodes.csv, links.csv, services.csv and optionally demands.csv.
    #[arg(long)]
    dataset_dir: Option<PathBuf>,

    /// Seed for rounding and demand synthesis.
    #[arg(long)]
    seed: Option<u64>,

    /// Export per-node and per-link usage rows to this CSV file.
    #[arg(long)]
    stats_out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    jsprr::logger::init();

    let args = Args::parse();

    let scenario: Option<ScenarioDto> = match &args.config {
        Some(path) => Some(parse_json_file(path).with_context(|| format!("failed to load scenario '{}'", path.display()))?),
        None => None,
    };

    let dataset_dir = args
        .dataset_dir
        .or_else(|| scenario.as_ref().map(|s| PathBuf::from(&s.dataset_dir)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_DIR));
    let seed = args.seed.or_else(|| scenario.as_ref().and_then(|s| s.seed)).unwrap_or(DEFAULT_SEED);
    let stats_out = args.stats_out.or_else(|| scenario.as_ref().and_then(|s| s.stats_out.as_ref().map(PathBuf::from)));

    log::info!("Starting JSPRR run: dataset '{}', seed {}", dataset_dir.display(), seed);

    let system_run = jsprr::run_dataset(&dataset_dir, seed).with_context(|| format!("placement run over '{}' failed", dataset_dir.display()))?;

    report::print_report(&system_run.dataset.topology, &system_run.dataset.services, &system_run.run);

    if let Some(path) = stats_out {
        write_usage_stats(&path, &system_run.dataset.topology).with_context(|| format!("failed to export statistics to '{}'", path.display()))?;
    }

    Ok(())
}
