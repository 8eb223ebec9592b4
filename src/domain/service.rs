use crate::domain::resource::resource_vector::ResourceVector;
use crate::domain::utils::id::ServiceName;

/// A placement unit. Immutable once created.
#[derive(Debug, Clone)]
pub struct ServiceModule {
    name: ServiceName,
    requirements: ResourceVector,
    cost: f64,
    latency: f64,
}

impl ServiceModule {
    pub fn new(name: ServiceName, requirements: ResourceVector, cost: f64, latency: f64) -> Self {
        Self { name, requirements, cost, latency }
    }

    pub fn get_name(&self) -> ServiceName {
        self.name.clone()
    }

    pub fn get_requirements(&self) -> ResourceVector {
        self.requirements
    }

    /// Placement cost, identical on every node.
    pub fn get_cost(&self) -> f64 {
        self.cost
    }

    /// Fixed latency contribution of the service itself.
    pub fn get_latency(&self) -> f64 {
        self.latency
    }
}
