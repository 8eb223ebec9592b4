use std::sync::Arc;

use crate::domain::EPSILON;
use crate::domain::resource::resource_node::ResourceNode;
use crate::domain::resource::resource_vector::{Dimension, ResourceVector};
use crate::domain::service::ServiceModule;
use crate::error::{Error, Result};

/// The relaxed assignment matrix, indexed `[service][node]` with values in [0, 1].
///
/// Row `i` describes how service `i`'s unit of placement mass is split across
/// the nodes; every row of a solver-produced matrix sums to 1 within epsilon.
#[derive(Debug, Clone)]
pub struct FractionalAssignment {
    weights: Vec<Vec<f64>>,
}

impl FractionalAssignment {
    pub fn new(weights: Vec<Vec<f64>>) -> Self {
        Self { weights }
    }

    pub fn num_services(&self) -> usize {
        self.weights.len()
    }

    pub fn num_nodes(&self) -> usize {
        self.weights.first().map(Vec::len).unwrap_or(0)
    }

    /// The fractional weights of one service over all nodes.
    pub fn row(&self, service_index: usize) -> &[f64] {
        &self.weights[service_index]
    }

    pub fn get(&self, service_index: usize, node_index: usize) -> f64 {
        self.weights[service_index][node_index]
    }

    /// Objective value of the placement LP: sum over i,j of x[i][j] * cost(i).
    pub fn placement_cost(&self, services: &[Arc<ServiceModule>]) -> f64 {
        self.weights.iter().zip(services).map(|(row, service)| service.get_cost() * row.iter().sum::<f64>()).sum()
    }
}

/// Builds and solves the linear relaxation of the placement problem.
///
/// The solver reads capacity snapshots only and never touches usage counters,
/// so it can run concurrently with nothing racing it.
///
/// Because the placement cost is attached to the service and not to the node,
/// every matrix that satisfies the constraints attains the same objective
/// value. The solver therefore picks the feasible matrix that splits each
/// service proportionally to the remaining per-node headroom, which keeps the
/// fractional load balanced and leaves the rounding step the widest choice of
/// candidate nodes.
#[derive(Debug, Default)]
pub struct RelaxationSolver;

impl RelaxationSolver {
    pub fn new() -> Self {
        Self
    }

    /// Solves the relaxation for the given capacity snapshots and services.
    ///
    /// Column `j` of the result corresponds to `nodes[j]`; callers must keep
    /// that ordering stable through rounding.
    pub fn solve(&self, nodes: &[Arc<ResourceNode>], services: &[Arc<ServiceModule>]) -> Result<FractionalAssignment> {
        if nodes.is_empty() {
            return Err(Error::NoNodes);
        }
        if services.is_empty() {
            return Err(Error::NoServices);
        }

        self.check_aggregate_feasibility(nodes, services)?;

        let mut remaining: Vec<ResourceVector> = nodes.iter().map(|node| node.get_capacity()).collect();
        let mut weights: Vec<Vec<f64>> = Vec::with_capacity(services.len());

        for service in services {
            let requirement = service.get_requirements();

            let fractions: Vec<f64> = remaining.iter().map(|headroom| headroom.headroom_fraction(&requirement)).collect();
            let feasible_mass: f64 = fractions.iter().sum();

            if feasible_mass < 1.0 - EPSILON {
                return Err(Error::RelaxationInfeasible(format!(
                    "service {} cannot be fractionally placed, only {:.4} of its unit mass fits the remaining headroom",
                    service.get_name(),
                    feasible_mass
                )));
            }

            // Normalizing by the feasible mass keeps every x[i][j] below its
            // headroom cap, so the deduction below can never oversubscribe.
            let row: Vec<f64> = fractions.iter().map(|fraction| fraction / feasible_mass).collect();

            for (node_index, weight) in row.iter().enumerate() {
                remaining[node_index] = remaining[node_index].saturating_sub(&requirement.scaled(*weight));
            }

            weights.push(row);
        }

        let assignment = FractionalAssignment::new(weights);
        log::info!(
            "RelaxationSolved: {} services over {} nodes, objective cost {:.2}",
            services.len(),
            nodes.len(),
            assignment.placement_cost(services)
        );

        Ok(assignment)
    }

    /// Rejects instances whose aggregate demand exceeds aggregate capacity in
    /// some dimension. Anything passing this check may still fail during the
    /// per-service split when capacity only exists in incompatible dimension
    /// combinations.
    fn check_aggregate_feasibility(&self, nodes: &[Arc<ResourceNode>], services: &[Arc<ServiceModule>]) -> Result<()> {
        for dimension in Dimension::ALL {
            let demand: f64 = services.iter().map(|service| service.get_requirements().get(dimension)).sum();
            let capacity: f64 = nodes.iter().map(|node| node.get_capacity().get(dimension)).sum();

            if demand > capacity + EPSILON {
                return Err(Error::RelaxationInfeasible(format!(
                    "aggregate {} demand {:.2} exceeds aggregate capacity {:.2}",
                    dimension, demand, capacity
                )));
            }
        }
        Ok(())
    }
}
