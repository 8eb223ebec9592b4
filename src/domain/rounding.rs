use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::EPSILON;
use crate::domain::demand::CommDemand;
use crate::domain::placement::{PlacementOutcome, PlacementResult, RoutedDemand, RoutingFailure, UnroutedDemand};
use crate::domain::relaxation::FractionalAssignment;
use crate::domain::resource::network_link::NetworkLink;
use crate::domain::resource::resource_node::ResourceNode;
use crate::domain::service::ServiceModule;
use crate::domain::topology::NetworkTopology;
use crate::domain::utils::id::{LinkName, NodeName, ServiceName};

/// Converts a fractional assignment into a committed integral placement and
/// routes the communication demands over the topology.
///
/// This is the only component that mutates node and link usage counters after
/// topology construction. All randomness comes from the explicit seeded
/// generator, so two runs over the same matrix and seed commit the identical
/// placement and the identical routed/unrouted demand sets.
///
/// Per-service fallback order, in this fixed sequence:
/// 1. sample a candidate from the fractional weights,
/// 2. retry the remaining positive-weight nodes by descending weight,
/// 3. scan every node by declared capacity descending.
/// A degenerate all-zero row skips sampling and walks the nodes least-loaded
/// first instead.
#[derive(Debug)]
pub struct RoundingRouter {
    rng: StdRng,
}

impl RoundingRouter {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn round_with_routing(
        &mut self,
        assignment: &FractionalAssignment,
        nodes: &[Arc<ResourceNode>],
        services: &[Arc<ServiceModule>],
        demands: &[CommDemand],
        topology: &NetworkTopology,
    ) -> PlacementOutcome {
        let mut assignments: HashMap<ServiceName, NodeName> = HashMap::new();
        let mut unplaced: Vec<ServiceName> = Vec::new();

        let capacity_scan_order = Self::capacity_scan_order(nodes);

        for (service_index, service) in services.iter().enumerate() {
            match self.place_service(service_index, service, assignment, nodes, &capacity_scan_order) {
                Some(node_index) => {
                    assignments.insert(service.get_name(), nodes[node_index].get_name());
                }
                None => {
                    log::warn!("PlacementFailure: No node has sufficient capacity for service {}", service.get_name());
                    unplaced.push(service.get_name());
                }
            }
        }

        let placement = PlacementResult::new(assignments);

        let mut routed: Vec<RoutedDemand> = Vec::new();
        let mut unrouted: Vec<UnroutedDemand> = Vec::new();

        for (demand_index, demand) in demands.iter().enumerate() {
            match self.route_demand(demand_index, demand, &placement, topology) {
                Ok(path) => routed.push(RoutedDemand { demand_index, path }),
                Err(reason) => {
                    log::info!("RoutingFailure: Demand {} ({} => {}) not routed: {}", demand_index, demand.source, demand.target, reason);
                    unrouted.push(UnroutedDemand { demand_index, reason });
                }
            }
        }

        log::info!(
            "RoundingFinished: {} placed, {} unplaced, {} routed, {} unrouted",
            placement.num_placed(),
            unplaced.len(),
            routed.len(),
            unrouted.len()
        );

        PlacementOutcome { placement, unplaced, routed, unrouted }
    }

    /// Tries to commit one service, returning the index of the node that
    /// accepted the reservation.
    fn place_service(
        &mut self,
        service_index: usize,
        service: &Arc<ServiceModule>,
        assignment: &FractionalAssignment,
        nodes: &[Arc<ResourceNode>],
        capacity_scan_order: &[usize],
    ) -> Option<usize> {
        let requirement = service.get_requirements();
        let weights = assignment.row(service_index);
        let mut tried = vec![false; nodes.len()];

        let Some(sampled) = self.sample_node(weights) else {
            // Solver degeneracy: the row carries no mass. Walk the nodes
            // least-loaded first instead of sampling.
            log::debug!("DegenerateRow: Service {} has an all-zero fractional row", service.get_name());
            return Self::least_loaded_order(nodes).into_iter().find(|&node_index| nodes[node_index].try_reserve(&requirement));
        };

        tried[sampled] = true;
        if nodes[sampled].try_reserve(&requirement) {
            return Some(sampled);
        }

        // Retry the remaining positive-weight nodes, best weight first.
        let mut by_weight: Vec<usize> = (0..nodes.len()).filter(|&j| !tried[j] && weights[j] > EPSILON).collect();
        by_weight.sort_by(|&a, &b| {
            weights[b].partial_cmp(&weights[a]).unwrap_or(Ordering::Equal).then_with(|| nodes[a].get_name().cmp(&nodes[b].get_name()))
        });

        for node_index in by_weight {
            tried[node_index] = true;
            if nodes[node_index].try_reserve(&requirement) {
                return Some(node_index);
            }
        }

        // Last resort: every node, declared capacity descending.
        for &node_index in capacity_scan_order {
            if !tried[node_index] && nodes[node_index].try_reserve(&requirement) {
                return Some(node_index);
            }
        }

        None
    }

    /// Samples a node index according to the fractional weights. `None` when
    /// the row carries no sampling mass.
    fn sample_node(&mut self, weights: &[f64]) -> Option<usize> {
        let total: f64 = weights.iter().sum();
        if total <= EPSILON {
            return None;
        }

        let threshold = self.rng.random::<f64>() * total;
        let mut cumulative = 0.0;
        for (node_index, weight) in weights.iter().enumerate() {
            cumulative += weight;
            if threshold < cumulative {
                return Some(node_index);
            }
        }

        // Floating-point drift can leave the threshold marginally above the
        // final cumulative sum.
        Some(weights.len() - 1)
    }

    /// Node indices ordered by declared capacity descending, name ascending.
    fn capacity_scan_order(nodes: &[Arc<ResourceNode>]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..nodes.len()).collect();
        order.sort_by(|&a, &b| {
            nodes[b]
                .get_declared_capacity()
                .partial_cmp(&nodes[a].get_declared_capacity())
                .unwrap_or(Ordering::Equal)
                .then_with(|| nodes[a].get_name().cmp(&nodes[b].get_name()))
        });
        order
    }

    /// Node indices ordered by maximum utilization ascending, name ascending.
    fn least_loaded_order(nodes: &[Arc<ResourceNode>]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..nodes.len()).collect();
        order.sort_by(|&a, &b| {
            nodes[a]
                .max_utilization()
                .partial_cmp(&nodes[b].max_utilization())
                .unwrap_or(Ordering::Equal)
                .then_with(|| nodes[a].get_name().cmp(&nodes[b].get_name()))
        });
        order
    }

    /// Routes one demand, reserving its bandwidth on every link of the path.
    ///
    /// Reservation rolls back on the first full link, so a failed demand
    /// leaves every used-bandwidth counter as it found it.
    fn route_demand(
        &mut self,
        demand_index: usize,
        demand: &CommDemand,
        placement: &PlacementResult,
        topology: &NetworkTopology,
    ) -> Result<Vec<LinkName>, RoutingFailure> {
        let source_node = placement.get_node(&demand.source).ok_or(RoutingFailure::EndpointUnplaced)?;
        let target_node = placement.get_node(&demand.target).ok_or(RoutingFailure::EndpointUnplaced)?;

        // Co-located endpoints route over zero links.
        if source_node == target_node {
            return Ok(Vec::new());
        }

        let path = topology.shortest_path(source_node, target_node).ok_or(RoutingFailure::NoPath)?;

        let mut reserved: Vec<Arc<NetworkLink>> = Vec::with_capacity(path.len());
        for link_key in &path {
            let Some(link) = topology.store().get_link(*link_key) else {
                break;
            };
            if !link.try_reserve(demand.bandwidth) {
                break;
            }
            reserved.push(link);
        }

        if reserved.len() != path.len() {
            for link in &reserved {
                link.release(demand.bandwidth);
            }
            return Err(RoutingFailure::InsufficientBandwidth);
        }

        log::debug!("DemandRouted: Demand {} reserved {} over {} links", demand_index, demand.bandwidth, reserved.len());
        Ok(reserved.iter().map(|link| link.get_name()).collect())
    }
}
