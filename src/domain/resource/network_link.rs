use std::sync::Mutex;

use crate::domain::EPSILON;
use crate::domain::utils::id::{LinkName, NodeName};

/// A bandwidth- and latency-bearing edge between two resource nodes.
///
/// The link is undirected: `source`/`target` only record the declaration
/// order. Used bandwidth is mutated exclusively by the rounding/routing step,
/// atomically per link.
#[derive(Debug)]
pub struct NetworkLink {
    name: LinkName,
    source: NodeName,
    target: NodeName,
    capacity: f64,
    latency: f64,
    used: Mutex<f64>,
}

impl NetworkLink {
    pub fn new(name: LinkName, source: NodeName, target: NodeName, capacity: f64, latency: f64) -> Self {
        Self { name, source, target, capacity, latency, used: Mutex::new(0.0) }
    }

    pub fn get_name(&self) -> LinkName {
        self.name.clone()
    }

    pub fn get_source(&self) -> NodeName {
        self.source.clone()
    }

    pub fn get_target(&self) -> NodeName {
        self.target.clone()
    }

    pub fn get_capacity(&self) -> f64 {
        self.capacity
    }

    pub fn get_latency(&self) -> f64 {
        self.latency
    }

    pub fn get_used_bandwidth(&self) -> f64 {
        *self.used.lock().unwrap()
    }

    pub fn get_remaining_bandwidth(&self) -> f64 {
        (self.capacity - self.get_used_bandwidth()).max(0.0)
    }

    /// Given one endpoint, returns the opposite one. `None` if `node` is not
    /// an endpoint of this link.
    pub fn other_endpoint(&self, node: &NodeName) -> Option<NodeName> {
        if &self.source == node {
            Some(self.target.clone())
        } else if &self.target == node {
            Some(self.source.clone())
        } else {
            None
        }
    }

    /// Reserves `bandwidth` on this link if enough capacity remains.
    /// All-or-nothing: on failure the counter is untouched.
    pub fn try_reserve(&self, bandwidth: f64) -> bool {
        let mut used = self.used.lock().unwrap();

        if *used + bandwidth <= self.capacity + EPSILON {
            *used += bandwidth;
            true
        } else {
            log::debug!("BandwidthRejected: Link {} cannot fit {} on top of {}/{}", self.name, bandwidth, *used, self.capacity);
            false
        }
    }

    /// Releases previously reserved bandwidth, floored at zero.
    pub fn release(&self, bandwidth: f64) {
        let mut used = self.used.lock().unwrap();
        *used = (*used - bandwidth).max(0.0);
    }

    pub fn reset(&self) {
        let mut used = self.used.lock().unwrap();
        *used = 0.0;
    }

    pub fn utilization_percent(&self) -> f64 {
        if self.capacity > 0.0 { self.get_used_bandwidth() / self.capacity * 100.0 } else { 0.0 }
    }
}
