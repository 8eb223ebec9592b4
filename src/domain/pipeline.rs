use std::sync::Arc;

use crate::domain::demand::CommDemand;
use crate::domain::placement::PlacementOutcome;
use crate::domain::relaxation::{FractionalAssignment, RelaxationSolver};
use crate::domain::rounding::RoundingRouter;
use crate::domain::service::ServiceModule;
use crate::domain::topology::NetworkTopology;
use crate::error::Result;

/// Result of one full solve -> round -> route pass. The fractional matrix is
/// kept around for diagnostic display next to the committed outcome.
#[derive(Debug)]
pub struct PipelineRun {
    pub assignment: FractionalAssignment,
    pub outcome: PlacementOutcome,
}

/// The sequential optimization pipeline over one loaded topology.
///
/// Fatal conditions (no nodes, no services, infeasible relaxation) abort
/// before any usage counter is touched; per-service and per-demand failures
/// are carried inside the returned outcome instead.
#[derive(Debug)]
pub struct PlacementPipeline {
    seed: u64,
}

impl PlacementPipeline {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn run(&self, topology: &NetworkTopology, services: &[Arc<ServiceModule>], demands: &[CommDemand]) -> Result<PipelineRun> {
        let nodes: Vec<_> = topology.store().nodes().into_iter().map(|(_, node)| node).collect();

        let assignment = RelaxationSolver::new().solve(&nodes, services)?;

        let mut router = RoundingRouter::new(self.seed);
        let outcome = router.round_with_routing(&assignment, &nodes, services, demands, topology);

        Ok(PipelineRun { assignment, outcome })
    }
}
