use serde::Deserialize;

/// Optional JSON scenario file describing one simulation run. Every field can
/// be overridden from the command line.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioDto {
    /// Directory holding `nodes.csv`, `links.csv`, `services.csv` and the
    /// optional `demands.csv`.
    pub dataset_dir: String,

    /// Seed for the rounding sampler and demand synthesis.
    pub seed: Option<u64>,

    /// When set, per-node and per-link usage rows are exported here as CSV.
    pub stats_out: Option<String>,
}
