use std::sync::Arc;

use rand::Rng;
use rand::rngs::StdRng;

use crate::domain::service::ServiceModule;
use crate::domain::utils::id::ServiceName;

/// Bandwidth drawn for synthesized chain demands, in [10, 60).
const CHAIN_BANDWIDTH_MIN: u32 = 10;
const CHAIN_BANDWIDTH_MAX: u32 = 60;

/// A required bandwidth allocation between two service modules.
///
/// Only meaningful against a concrete placement result: the actual route
/// depends on where both endpoints ended up.
#[derive(Debug, Clone)]
pub struct CommDemand {
    pub source: ServiceName,
    pub target: ServiceName,
    pub bandwidth: f64,
}

impl CommDemand {
    pub fn new(source: ServiceName, target: ServiceName, bandwidth: f64) -> Self {
        Self { source, target, bandwidth }
    }

    /// Synthesizes a demand between every pair of consecutive services, with
    /// bandwidth drawn uniformly from the seeded generator. Used when the
    /// dataset ships no demand records.
    pub fn chain(services: &[Arc<ServiceModule>], rng: &mut StdRng) -> Vec<CommDemand> {
        let mut demands = Vec::new();

        for window in services.windows(2) {
            let bandwidth = rng.random_range(CHAIN_BANDWIDTH_MIN..CHAIN_BANDWIDTH_MAX) as f64;
            demands.push(CommDemand::new(window[0].get_name(), window[1].get_name(), bandwidth));
        }

        log::debug!("ChainDemands: synthesized {} demands for {} services", demands.len(), services.len());
        demands
    }
}
