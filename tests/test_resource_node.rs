use std::sync::Arc;
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use jsprr::domain::resource::resource_node::ResourceNode;
use jsprr::domain::resource::resource_vector::{Dimension, ResourceVector};
use jsprr::domain::utils::id::NodeName;

fn create_node(storage: f64, compute: f64) -> ResourceNode {
    ResourceNode::new(NodeName::new("Node-001"), ResourceVector::new(storage, compute, 0.0, 0.0))
}

#[test]
fn test_reserve_within_capacity() {
    let node = create_node(100.0, 10.0);
    let requirement = ResourceVector::new(40.0, 3.0, 0.0, 0.0);

    assert!(node.try_reserve(&requirement), "Requirement fits and must be accepted");
    assert_eq!(node.get_usage().storage, 40.0);
    assert_eq!(node.get_usage().compute, 3.0);
}

#[test]
fn test_reserve_is_all_or_nothing() {
    let node = create_node(10.0, 10.0);

    assert!(node.try_reserve(&ResourceVector::new(8.0, 2.0, 0.0, 0.0)));

    // Storage would overflow even though compute still fits. No dimension may
    // be partially applied.
    let usage_before = node.get_usage();
    assert!(!node.try_reserve(&ResourceVector::new(5.0, 1.0, 0.0, 0.0)), "Overflowing reservation must be rejected");
    assert_eq!(node.get_usage(), usage_before, "A rejected reservation must not touch any counter");
}

#[test]
fn test_release_is_idempotent_and_floors_at_zero() {
    let node = create_node(100.0, 10.0);
    let requirement = ResourceVector::new(40.0, 3.0, 0.0, 0.0);

    assert!(node.try_reserve(&requirement));
    node.release(&requirement);
    node.release(&requirement);

    let usage = node.get_usage();
    for d in Dimension::ALL {
        assert_eq!(usage.get(d), 0.0, "Releasing twice must floor at zero, never go negative");
    }
}

#[test]
fn test_reset_clears_usage() {
    let node = create_node(100.0, 10.0);
    assert!(node.try_reserve(&ResourceVector::new(60.0, 6.0, 0.0, 0.0)));

    node.reset();

    assert_eq!(node.get_usage(), ResourceVector::zero());
}

#[test]
fn test_usage_stays_within_bounds_under_random_operations() {
    let node = create_node(50.0, 20.0);
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..500 {
        let requirement = ResourceVector::new(rng.random_range(0.0..20.0), rng.random_range(0.0..8.0), 0.0, 0.0);

        if rng.random::<bool>() {
            node.try_reserve(&requirement);
        } else {
            node.release(&requirement);
        }

        let usage = node.get_usage();
        let capacity = node.get_capacity();
        for d in Dimension::ALL {
            assert!(usage.get(d) >= 0.0, "Usage in {} must never be negative", d);
            assert!(usage.get(d) <= capacity.get(d) + 1e-6, "Usage in {} must never exceed capacity", d);
        }
    }
}

#[test]
fn test_concurrent_reservations_respect_capacity() {
    let node = Arc::new(create_node(10.0, 10.0));
    let requirement = ResourceVector::new(1.0, 1.0, 0.0, 0.0);

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let node = Arc::clone(&node);
            thread::spawn(move || node.try_reserve(&requirement))
        })
        .collect();

    let successes = handles.into_iter().map(|handle| handle.join().unwrap()).filter(|&ok| ok).count();

    assert_eq!(successes, 10, "Exactly ten unit reservations fit into the capacity");
    assert_eq!(node.get_usage().storage, 10.0);
    assert_eq!(node.get_usage().compute, 10.0);
}
