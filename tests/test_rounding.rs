use std::sync::Arc;

use jsprr::domain::demand::CommDemand;
use jsprr::domain::relaxation::{FractionalAssignment, RelaxationSolver};
use jsprr::domain::resource::network_link::NetworkLink;
use jsprr::domain::resource::resource_node::ResourceNode;
use jsprr::domain::resource::resource_store::ResourceStore;
use jsprr::domain::resource::resource_vector::{Dimension, ResourceVector};
use jsprr::domain::rounding::RoundingRouter;
use jsprr::domain::service::ServiceModule;
use jsprr::domain::topology::NetworkTopology;
use jsprr::domain::utils::id::{LinkName, NodeName, ServiceName};

fn create_topology(nodes: &[(&str, f64, f64)], links: &[(&str, &str, &str, f64)]) -> NetworkTopology {
    let store = ResourceStore::new();

    for (name, storage, compute) in nodes {
        store.add_node(ResourceNode::new(NodeName::new(*name), ResourceVector::new(*storage, *compute, 0.0, 0.0)));
    }
    for (id, source, target, capacity) in links {
        store.add_link(NetworkLink::new(LinkName::new(*id), NodeName::new(*source), NodeName::new(*target), *capacity, 5.0));
    }

    NetworkTopology::build(store).expect("Test topology must build")
}

fn store_nodes(topology: &NetworkTopology) -> Vec<Arc<ResourceNode>> {
    topology.store().nodes().into_iter().map(|(_, node)| node).collect()
}

fn create_service(name: &str, storage: f64, compute: f64) -> Arc<ServiceModule> {
    Arc::new(ServiceModule::new(ServiceName::new(name), ResourceVector::new(storage, compute, 0.0, 0.0), 1.0, 2.0))
}

#[test]
fn test_rounding_is_deterministic_for_a_fixed_seed() {
    let run = || {
        let topology = create_topology(
            &[("A", 100.0, 10.0), ("B", 80.0, 8.0), ("C", 60.0, 6.0)],
            &[("l-ab", "A", "B", 50.0), ("l-bc", "B", "C", 50.0)],
        );
        let nodes = store_nodes(&topology);
        let services =
            vec![create_service("s1", 30.0, 2.0), create_service("s2", 30.0, 2.0), create_service("s3", 30.0, 2.0), create_service("s4", 30.0, 2.0)];
        let demands = vec![
            CommDemand::new(ServiceName::new("s1"), ServiceName::new("s2"), 10.0),
            CommDemand::new(ServiceName::new("s2"), ServiceName::new("s3"), 10.0),
            CommDemand::new(ServiceName::new("s3"), ServiceName::new("s4"), 10.0),
        ];

        let assignment = RelaxationSolver::new().solve(&nodes, &services).unwrap();
        let outcome = RoundingRouter::new(42).round_with_routing(&assignment, &nodes, &services, &demands, &topology);

        let mut placements: Vec<(String, String)> =
            outcome.placement.iter().map(|(service, node)| (service.clone().into(), node.clone().into())).collect();
        placements.sort();

        let routed: Vec<usize> = outcome.routed.iter().map(|r| r.demand_index).collect();
        let unrouted: Vec<usize> = outcome.unrouted.iter().map(|u| u.demand_index).collect();

        (placements, routed, unrouted)
    };

    assert_eq!(run(), run(), "Identical matrix, topology and seed must reproduce the identical outcome");
}

#[test]
fn test_rounding_never_oversubscribes_nodes_or_links() {
    for seed in 0..20u64 {
        let topology = create_topology(&[("A", 100.0, 10.0), ("B", 50.0, 5.0)], &[("l-ab", "A", "B", 20.0)]);
        let nodes = store_nodes(&topology);
        let services = vec![create_service("s1", 40.0, 3.0), create_service("s2", 40.0, 3.0), create_service("s3", 40.0, 3.0)];
        let demands = vec![
            CommDemand::new(ServiceName::new("s1"), ServiceName::new("s2"), 15.0),
            CommDemand::new(ServiceName::new("s2"), ServiceName::new("s3"), 15.0),
        ];

        let assignment = RelaxationSolver::new().solve(&nodes, &services).unwrap();
        RoundingRouter::new(seed).round_with_routing(&assignment, &nodes, &services, &demands, &topology);

        for node in &nodes {
            let usage = node.get_usage();
            let capacity = node.get_capacity();
            for d in Dimension::ALL {
                assert!(usage.get(d) <= capacity.get(d) + 1e-6, "Seed {}: node {} oversubscribed in {}", seed, node.get_name(), d);
            }
        }
        for (_, link) in topology.store().links() {
            assert!(link.get_used_bandwidth() <= link.get_capacity() + 1e-6, "Seed {}: link {} oversubscribed", seed, link.get_name());
        }
    }
}

#[test]
fn test_full_weight_pins_the_sampled_node() {
    let topology = create_topology(&[("A", 100.0, 10.0), ("B", 100.0, 10.0)], &[]);
    let nodes = store_nodes(&topology);
    let services = vec![create_service("s1", 10.0, 1.0)];

    let assignment = FractionalAssignment::new(vec![vec![1.0, 0.0]]);
    let outcome = RoundingRouter::new(0).round_with_routing(&assignment, &nodes, &services, &[], &topology);

    assert_eq!(outcome.placement.get_node(&ServiceName::new("s1")), Some(&NodeName::new("A")));
}

#[test]
fn test_capacity_scan_fallback_when_weighted_nodes_are_full() {
    // All weight sits on the small node, which cannot host the service. The
    // deterministic scan must still find the large zero-weight node.
    let topology = create_topology(&[("small", 10.0, 10.0), ("big", 100.0, 10.0)], &[]);
    let nodes = store_nodes(&topology);
    let services = vec![create_service("s1", 50.0, 1.0)];

    let assignment = FractionalAssignment::new(vec![vec![1.0, 0.0]]);
    let outcome = RoundingRouter::new(0).round_with_routing(&assignment, &nodes, &services, &[], &topology);

    assert_eq!(outcome.placement.get_node(&ServiceName::new("s1")), Some(&NodeName::new("big")));
    assert!(outcome.unplaced.is_empty());
}

#[test]
fn test_degenerate_row_falls_back_to_least_loaded_node() {
    let topology = create_topology(&[("A", 100.0, 10.0), ("B", 100.0, 10.0)], &[]);
    let nodes = store_nodes(&topology);

    // Preload A so B is the least-loaded candidate.
    nodes[0].try_reserve(&ResourceVector::new(50.0, 5.0, 0.0, 0.0));

    let services = vec![create_service("s1", 10.0, 1.0)];
    let assignment = FractionalAssignment::new(vec![vec![0.0, 0.0]]);
    let outcome = RoundingRouter::new(0).round_with_routing(&assignment, &nodes, &services, &[], &topology);

    assert_eq!(outcome.placement.get_node(&ServiceName::new("s1")), Some(&NodeName::new("B")));
}

#[test]
fn test_unplaceable_service_does_not_abort_the_run() {
    let topology = create_topology(&[("A", 10.0, 10.0)], &[]);
    let nodes = store_nodes(&topology);
    let services = vec![create_service("too-big", 50.0, 1.0), create_service("fits", 5.0, 1.0)];

    let assignment = FractionalAssignment::new(vec![vec![1.0], vec![1.0]]);
    let outcome = RoundingRouter::new(0).round_with_routing(&assignment, &nodes, &services, &[], &topology);

    assert_eq!(outcome.unplaced, vec![ServiceName::new("too-big")]);
    assert_eq!(outcome.placement.get_node(&ServiceName::new("fits")), Some(&NodeName::new("A")));
}

#[test]
fn test_colocated_demand_routes_over_zero_links() {
    let topology = create_topology(&[("A", 100.0, 10.0)], &[]);
    let nodes = store_nodes(&topology);
    let services = vec![create_service("s1", 10.0, 1.0), create_service("s2", 10.0, 1.0)];
    let demands = vec![CommDemand::new(ServiceName::new("s1"), ServiceName::new("s2"), 25.0)];

    let assignment = FractionalAssignment::new(vec![vec![1.0], vec![1.0]]);
    let outcome = RoundingRouter::new(0).round_with_routing(&assignment, &nodes, &services, &demands, &topology);

    assert_eq!(outcome.routed.len(), 1, "A co-located demand must trivially succeed");
    assert!(outcome.routed[0].path.is_empty(), "No link reservation is required on the same node");
    assert!(outcome.unrouted.is_empty());
}

#[test]
fn test_routed_demand_reserves_bandwidth_on_every_path_link() {
    let topology = create_topology(
        &[("A", 100.0, 10.0), ("B", 100.0, 10.0), ("C", 100.0, 10.0)],
        &[("l-ab", "A", "B", 100.0), ("l-bc", "B", "C", 100.0)],
    );
    let nodes = store_nodes(&topology);
    let services = vec![create_service("s1", 10.0, 1.0), create_service("s2", 10.0, 1.0)];
    let demands = vec![CommDemand::new(ServiceName::new("s1"), ServiceName::new("s2"), 7.0)];

    let assignment = FractionalAssignment::new(vec![vec![1.0, 0.0, 0.0], vec![0.0, 0.0, 1.0]]);
    let outcome = RoundingRouter::new(0).round_with_routing(&assignment, &nodes, &services, &demands, &topology);

    assert_eq!(outcome.routed.len(), 1);
    assert_eq!(outcome.routed[0].path, vec![LinkName::new("l-ab"), LinkName::new("l-bc")]);

    for (_, link) in topology.store().links() {
        assert_eq!(link.get_used_bandwidth(), 7.0, "Every link on the path carries the demand");
    }
}

#[test]
fn test_unroutable_demand_leaves_all_counters_unchanged() {
    let topology = create_topology(&[("A", 100.0, 10.0), ("B", 100.0, 10.0)], &[("l-ab", "A", "B", 5.0)]);
    let nodes = store_nodes(&topology);
    let services = vec![create_service("s1", 10.0, 1.0), create_service("s2", 10.0, 1.0)];
    let demands = vec![CommDemand::new(ServiceName::new("s1"), ServiceName::new("s2"), 50.0)];

    let assignment = FractionalAssignment::new(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    let outcome = RoundingRouter::new(0).round_with_routing(&assignment, &nodes, &services, &demands, &topology);

    assert_eq!(outcome.unrouted.len(), 1);
    assert_eq!(outcome.unrouted[0].reason, jsprr::domain::placement::RoutingFailure::InsufficientBandwidth);

    let (_, link) = &topology.store().links()[0];
    assert_eq!(link.get_used_bandwidth(), 0.0, "A failed demand must not leave partial reservations behind");
}

#[test]
fn test_demand_with_unplaced_endpoint_is_unrouted() {
    let topology = create_topology(&[("A", 10.0, 10.0)], &[]);
    let nodes = store_nodes(&topology);
    let services = vec![create_service("s1", 5.0, 1.0), create_service("too-big", 50.0, 1.0)];
    let demands = vec![CommDemand::new(ServiceName::new("s1"), ServiceName::new("too-big"), 1.0)];

    let assignment = FractionalAssignment::new(vec![vec![1.0], vec![1.0]]);
    let outcome = RoundingRouter::new(0).round_with_routing(&assignment, &nodes, &services, &demands, &topology);

    assert_eq!(outcome.unrouted.len(), 1);
    assert_eq!(outcome.unrouted[0].reason, jsprr::domain::placement::RoutingFailure::EndpointUnplaced);
}
