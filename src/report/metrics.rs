use std::sync::Arc;

use crate::domain::placement::PlacementOutcome;
use crate::domain::resource::resource_vector::Dimension;
use crate::domain::service::ServiceModule;
use crate::domain::topology::NetworkTopology;
use crate::domain::utils::id::NodeName;

/// Frame rate cap for the latency-derived AR estimate.
const AR_FRAME_RATE_CAP: f64 = 60.0;

/// Nodes whose name contains this marker count as cloud locations; everything
/// else is an edge node.
const CLOUD_MARKER: &str = "cloud";

pub fn is_cloud_node(name: &NodeName) -> bool {
    name.as_str().to_lowercase().contains(CLOUD_MARKER)
}

/// System-level evaluation metrics derived from one committed placement.
///
/// These are descriptive outputs for human-readable reporting; none of them
/// feed back into the optimization.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationMetrics {
    pub edge_placed: usize,
    pub cloud_placed: usize,
    pub unplaced: usize,

    /// Mean latency over all links, in milliseconds.
    pub avg_latency: f64,

    /// Mean compute utilization over edge nodes, in percent.
    pub edge_utilization: f64,

    /// Share of placed services that ended up on cloud nodes, in percent.
    pub cloud_load: f64,

    /// Used link bandwidth over total link capacity, in percent.
    pub bandwidth_efficiency: f64,

    /// Latency-derived frame rate estimate, capped at 60 fps.
    pub ar_frame_rate: f64,

    /// Synthetic headroom score: 100 - (edge_util * 0.2 + bw_eff * 0.1).
    pub scalability: f64,
}

impl EvaluationMetrics {
    pub fn collect(topology: &NetworkTopology, services: &[Arc<ServiceModule>], outcome: &PlacementOutcome) -> Self {
        let mut edge_placed = 0;
        let mut cloud_placed = 0;
        let mut unplaced = 0;

        for service in services {
            match outcome.placement.get_node(&service.get_name()) {
                None => unplaced += 1,
                Some(node) if is_cloud_node(node) => cloud_placed += 1,
                Some(_) => edge_placed += 1,
            }
        }

        let links = topology.store().links();
        let total_latency: f64 = links.iter().map(|(_, link)| link.get_latency()).sum();
        let avg_latency = if links.is_empty() { 0.0 } else { total_latency / links.len() as f64 };

        let mut edge_util_sum = 0.0;
        let mut edge_nodes = 0usize;
        for (_, node) in topology.store().nodes() {
            if !is_cloud_node(&node.get_name()) {
                edge_util_sum += node.utilization_percent(Dimension::Compute);
                edge_nodes += 1;
            }
        }
        let edge_utilization = if edge_nodes > 0 { edge_util_sum / edge_nodes as f64 } else { 0.0 };

        let total_services = edge_placed + cloud_placed + unplaced;
        let cloud_load = if total_services > 0 { cloud_placed as f64 / total_services as f64 * 100.0 } else { 0.0 };

        let total_capacity: f64 = links.iter().map(|(_, link)| link.get_capacity()).sum();
        let total_used: f64 = links.iter().map(|(_, link)| link.get_used_bandwidth()).sum();
        let bandwidth_efficiency = if total_capacity > 0.0 { total_used / total_capacity * 100.0 } else { 0.0 };

        let ar_frame_rate = if avg_latency > 0.0 { AR_FRAME_RATE_CAP.min(1000.0 / avg_latency) } else { 0.0 };

        let scalability = 100.0 - (edge_utilization * 0.2 + bandwidth_efficiency * 0.1);

        Self { edge_placed, cloud_placed, unplaced, avg_latency, edge_utilization, cloud_load, bandwidth_efficiency, ar_frame_rate, scalability }
    }
}
