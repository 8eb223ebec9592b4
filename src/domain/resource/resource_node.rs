use std::sync::Mutex;

use crate::domain::resource::resource_vector::{Dimension, ResourceVector};
use crate::domain::utils::id::NodeName;

/// A capacity-bounded execution location.
///
/// Capacities are fixed at construction. Usage is mutated only through
/// [`try_reserve`](ResourceNode::try_reserve), [`release`](ResourceNode::release)
/// and [`reset`](ResourceNode::reset), each atomic per node, so the invariant
/// `0 <= usage <= capacity` holds in every dimension after any committed
/// operation.
#[derive(Debug)]
pub struct ResourceNode {
    name: NodeName,
    capacity: ResourceVector,
    usage: Mutex<ResourceVector>,
}

impl ResourceNode {
    pub fn new(name: NodeName, capacity: ResourceVector) -> Self {
        Self { name, capacity, usage: Mutex::new(ResourceVector::zero()) }
    }

    pub fn get_name(&self) -> NodeName {
        self.name.clone()
    }

    pub fn get_capacity(&self) -> ResourceVector {
        self.capacity
    }

    /// Snapshot of the current usage counters.
    pub fn get_usage(&self) -> ResourceVector {
        *self.usage.lock().unwrap()
    }

    /// Remaining headroom per dimension.
    pub fn get_remaining(&self) -> ResourceVector {
        self.capacity.saturating_sub(&self.get_usage())
    }

    /// Sum of the declared capacities over all four dimensions.
    pub fn get_declared_capacity(&self) -> f64 {
        self.capacity.total()
    }

    /// Reserves `requirement` on this node if it fits in every dimension.
    ///
    /// All-or-nothing: on failure no counter is touched.
    pub fn try_reserve(&self, requirement: &ResourceVector) -> bool {
        let mut usage = self.usage.lock().unwrap();
        let candidate = usage.add(requirement);

        if candidate.fits_within(&self.capacity) {
            *usage = candidate;
            true
        } else {
            log::debug!("ReservationRejected: Node {} cannot fit requirement {:?} on top of usage {:?}", self.name, requirement, *usage);
            false
        }
    }

    /// Releases a previously reserved requirement. Counters are floored at
    /// zero, so releasing more than was reserved is equivalent to releasing
    /// everything.
    pub fn release(&self, requirement: &ResourceVector) {
        let mut usage = self.usage.lock().unwrap();
        *usage = usage.saturating_sub(requirement);
    }

    /// Clears all usage counters. Used between independent solver runs that
    /// share one loaded topology.
    pub fn reset(&self) {
        let mut usage = self.usage.lock().unwrap();
        *usage = ResourceVector::zero();
    }

    /// The highest utilization ratio across all dimensions with non-zero
    /// capacity. Drives the least-loaded fallback during rounding.
    pub fn max_utilization(&self) -> f64 {
        let usage = self.get_usage();
        let mut max = 0.0f64;
        for d in Dimension::ALL {
            if self.capacity.get(d) > 0.0 {
                max = max.max(usage.get(d) / self.capacity.get(d));
            }
        }
        max
    }

    /// Per-dimension utilization in percent, for reporting.
    pub fn utilization_percent(&self, dimension: Dimension) -> f64 {
        let capacity = self.capacity.get(dimension);
        if capacity > 0.0 { self.get_usage().get(dimension) / capacity * 100.0 } else { 0.0 }
    }
}
