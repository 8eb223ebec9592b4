use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::domain::demand::CommDemand;
use crate::domain::pipeline::{PipelineRun, PlacementPipeline};
use crate::error::Result;
use crate::loader::dataset::{LoadedDataset, load_dataset};

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;
pub mod report;

/// One fully executed simulation: the loaded system model, the demand set the
/// pipeline ran against, and the pipeline's output.
#[derive(Debug)]
pub struct SystemRun {
    pub dataset: LoadedDataset,
    pub demands: Vec<CommDemand>,
    pub run: PipelineRun,
}

/// Loads a dataset directory and runs the full placement pipeline over it.
///
/// When the dataset ships no demand records, chain demands between
/// consecutive services are synthesized from the same seed, so a run is fully
/// reproducible from `(dataset_dir, seed)`.
pub fn run_dataset(dataset_dir: &Path, seed: u64) -> Result<SystemRun> {
    let dataset = load_dataset(dataset_dir)?;
    log::info!("System model constructed from '{}'.", dataset_dir.display());

    let demands = match &dataset.demands {
        Some(demands) => demands.clone(),
        None => CommDemand::chain(&dataset.services, &mut StdRng::seed_from_u64(seed)),
    };

    let run = PlacementPipeline::new(seed).run(&dataset.topology, &dataset.services, &demands)?;

    Ok(SystemRun { dataset, demands, run })
}
