use std::collections::HashMap;
use std::fmt;

use crate::domain::utils::id::{LinkName, NodeName, ServiceName};

/// The committed service -> node mapping. Immutable once returned by the
/// rounding step; services missing from the map were left unplaced.
#[derive(Debug, Clone, Default)]
pub struct PlacementResult {
    assignments: HashMap<ServiceName, NodeName>,
}

impl PlacementResult {
    pub fn new(assignments: HashMap<ServiceName, NodeName>) -> Self {
        Self { assignments }
    }

    pub fn get_node(&self, service: &ServiceName) -> Option<&NodeName> {
        self.assignments.get(service)
    }

    pub fn is_placed(&self, service: &ServiceName) -> bool {
        self.assignments.contains_key(service)
    }

    pub fn num_placed(&self) -> usize {
        self.assignments.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ServiceName, &NodeName)> {
        self.assignments.iter()
    }
}

/// Why a demand could not be routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingFailure {
    /// At least one endpoint service ended up unplaced.
    EndpointUnplaced,
    /// The endpoint nodes live in disconnected parts of the topology.
    NoPath,
    /// A path exists but some link on it lacks residual bandwidth.
    InsufficientBandwidth,
}

impl fmt::Display for RoutingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingFailure::EndpointUnplaced => write!(f, "endpoint unplaced"),
            RoutingFailure::NoPath => write!(f, "no path"),
            RoutingFailure::InsufficientBandwidth => write!(f, "insufficient bandwidth"),
        }
    }
}

/// A successfully routed demand. `path` is empty when both endpoints share a
/// node. Indices refer to the demand slice passed into the rounding step.
#[derive(Debug, Clone)]
pub struct RoutedDemand {
    pub demand_index: usize,
    pub path: Vec<LinkName>,
}

#[derive(Debug, Clone)]
pub struct UnroutedDemand {
    pub demand_index: usize,
    pub reason: RoutingFailure,
}

/// Everything the rounding/routing pass produced: the placement itself plus
/// the accumulated non-fatal failures, so callers can report without
/// re-running the solve.
#[derive(Debug, Default)]
pub struct PlacementOutcome {
    pub placement: PlacementResult,
    pub unplaced: Vec<ServiceName>,
    pub routed: Vec<RoutedDemand>,
    pub unrouted: Vec<UnroutedDemand>,
}
