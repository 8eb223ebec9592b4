pub mod metrics;
pub mod stats_writer;

use std::sync::Arc;

use crate::domain::pipeline::PipelineRun;
use crate::domain::resource::resource_vector::Dimension;
use crate::domain::service::ServiceModule;
use crate::domain::topology::NetworkTopology;
use crate::report::metrics::EvaluationMetrics;

/// Prints the full console report for one pipeline run: the diagnostic
/// fractional matrix, the committed placement, usage counters and the derived
/// evaluation metrics.
pub fn print_report(topology: &NetworkTopology, services: &[Arc<ServiceModule>], run: &PipelineRun) {
    println!("LP fractional solution:");
    for (service_index, service) in services.iter().enumerate() {
        let row: Vec<String> = run.assignment.row(service_index).iter().map(|w| format!("{:.3}", w)).collect();
        println!("{}: [{}]", service.get_name(), row.join(", "));
    }

    println!("\nFinal placement:");
    for service in services {
        match run.outcome.placement.get_node(&service.get_name()) {
            Some(node) => println!("{} -> {}", service.get_name(), node),
            None => println!("{} -> NOT PLACED", service.get_name()),
        }
    }

    if !run.outcome.unrouted.is_empty() {
        println!("\nUnrouted demands:");
        for unrouted in &run.outcome.unrouted {
            println!("demand #{}: {}", unrouted.demand_index, unrouted.reason);
        }
    }

    println!("\nLink usages:");
    for (_, link) in topology.store().links() {
        println!(
            "{} ({}-{}): used {:.2} / cap {:.2}",
            link.get_name(),
            link.get_source(),
            link.get_target(),
            link.get_used_bandwidth(),
            link.get_capacity()
        );
    }

    let metrics = EvaluationMetrics::collect(topology, services, &run.outcome);

    println!("\n=== Evaluation Metrics ===");
    println!("Services placed on Edge: {}", metrics.edge_placed);
    println!("Services placed on Cloud: {}", metrics.cloud_placed);
    println!("Services not placed: {}", metrics.unplaced);

    println!("\nResource utilization per node:");
    for (_, node) in topology.store().nodes() {
        println!(
            "{}: Storage {:.1}%, Compute {:.1}%, Uplink {:.1}%, Downlink {:.1}%",
            node.get_name(),
            node.utilization_percent(Dimension::Storage),
            node.utilization_percent(Dimension::Compute),
            node.utilization_percent(Dimension::Uplink),
            node.utilization_percent(Dimension::Downlink)
        );
    }

    println!("\nLink utilization:");
    for (_, link) in topology.store().links() {
        println!("{} ({}-{}): {:.1}%", link.get_name(), link.get_source(), link.get_target(), link.utilization_percent());
    }

    println!("\nSystem-level metrics:");
    println!("Average Latency (ms): {:.2}", metrics.avg_latency);
    println!("Edge Utilization (%): {:.2}", metrics.edge_utilization);
    println!("Cloud Load (%): {:.2}", metrics.cloud_load);
    println!("Bandwidth Efficiency (%): {:.2}", metrics.bandwidth_efficiency);
    println!("AR Frame Rate (fps): {:.2}", metrics.ar_frame_rate);
    println!("Scalability (%): {:.2}", metrics.scalability);
}
