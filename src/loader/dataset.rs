use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::api::dataset_dto::{DemandRecordDto, LinkRecordDto, NodeRecordDto, ServiceRecordDto};
use crate::domain::demand::CommDemand;
use crate::domain::resource::network_link::NetworkLink;
use crate::domain::resource::resource_node::ResourceNode;
use crate::domain::resource::resource_store::ResourceStore;
use crate::domain::resource::resource_vector::ResourceVector;
use crate::domain::service::ServiceModule;
use crate::domain::topology::NetworkTopology;
use crate::domain::utils::id::{LinkName, NodeName, ServiceName};
use crate::loader::parser::read_delimited_records;
use crate::error::Result;

const NODES_FILE: &str = "nodes.csv";
const LINKS_FILE: &str = "links.csv";
const SERVICES_FILE: &str = "services.csv";
const DEMANDS_FILE: &str = "demands.csv";

/// Per-file accounting of accepted and dropped records. Skips cover parse
/// failures, negative scalars, duplicate identities and dangling references.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoadReport {
    pub nodes_loaded: usize,
    pub nodes_skipped: usize,
    pub links_loaded: usize,
    pub links_skipped: usize,
    pub services_loaded: usize,
    pub services_skipped: usize,
    pub demands_loaded: usize,
    pub demands_skipped: usize,
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes {}/{} links {}/{} services {}/{} demands {}/{} (loaded/skipped)",
            self.nodes_loaded,
            self.nodes_skipped,
            self.links_loaded,
            self.links_skipped,
            self.services_loaded,
            self.services_skipped,
            self.demands_loaded,
            self.demands_skipped
        )
    }
}

/// Everything one dataset directory yields. `demands` is `None` when the
/// dataset ships no demand file; callers then synthesize chain demands.
#[derive(Debug)]
pub struct LoadedDataset {
    pub topology: NetworkTopology,
    pub services: Vec<Arc<ServiceModule>>,
    pub demands: Option<Vec<CommDemand>>,
    pub report: LoadReport,
}

/// Loads a dataset directory into a ready-to-solve system model.
///
/// Missing `nodes.csv`, `links.csv` or `services.csv` is fatal; every
/// per-record problem is skipped and counted instead.
pub fn load_dataset(dataset_dir: &Path) -> Result<LoadedDataset> {
    let mut report = LoadReport::default();
    let store = ResourceStore::new();

    // 1. Resource nodes.
    let (node_records, skipped) = read_delimited_records::<NodeRecordDto>(&dataset_dir.join(NODES_FILE))?;
    report.nodes_skipped += skipped;

    for record in node_records {
        let capacity = ResourceVector::new(record.storage, record.compute, record.uplink, record.downlink);

        if !capacity.is_non_negative() {
            log::warn!("MalformedInputRecord: Node {} carries a negative capacity and is skipped", record.id);
            report.nodes_skipped += 1;
            continue;
        }
        if store.contains_node(&NodeName::new(&record.id)) {
            log::warn!("MalformedInputRecord: Node {} is declared twice, the duplicate is skipped", record.id);
            report.nodes_skipped += 1;
            continue;
        }

        store.add_node(ResourceNode::new(NodeName::new(record.id), capacity));
        report.nodes_loaded += 1;
    }

    // 2. Network links, validated against the loaded nodes.
    let (link_records, skipped) = read_delimited_records::<LinkRecordDto>(&dataset_dir.join(LINKS_FILE))?;
    report.links_skipped += skipped;

    for record in link_records {
        let source = NodeName::new(&record.source);
        let target = NodeName::new(&record.target);

        if record.capacity < 0.0 || record.latency < 0.0 {
            log::warn!("MalformedInputRecord: Link {} carries a negative scalar and is skipped", record.id);
            report.links_skipped += 1;
            continue;
        }
        if !store.contains_node(&source) || !store.contains_node(&target) {
            log::warn!("MalformedInputRecord: Link {} references an unknown endpoint and is dropped", record.id);
            report.links_skipped += 1;
            continue;
        }

        store.add_link(NetworkLink::new(LinkName::new(record.id), source, target, record.capacity, record.latency));
        report.links_loaded += 1;
    }

    // 3. Service modules. The dataset supplies compute and storage
    //    requirements; uplink/downlink default to zero.
    let (service_records, skipped) = read_delimited_records::<ServiceRecordDto>(&dataset_dir.join(SERVICES_FILE))?;
    report.services_skipped += skipped;

    let mut services: Vec<Arc<ServiceModule>> = Vec::new();
    let mut seen_services: HashSet<String> = HashSet::new();

    for record in service_records {
        let requirements = ResourceVector::new(record.storage, record.compute, 0.0, 0.0);

        if !requirements.is_non_negative() || record.cost < 0.0 || record.latency < 0.0 {
            log::warn!("MalformedInputRecord: Service {} carries a negative scalar and is skipped", record.id);
            report.services_skipped += 1;
            continue;
        }
        if !seen_services.insert(record.id.clone()) {
            log::warn!("MalformedInputRecord: Service {} is declared twice, the duplicate is skipped", record.id);
            report.services_skipped += 1;
            continue;
        }

        services.push(Arc::new(ServiceModule::new(ServiceName::new(record.id), requirements, record.cost, record.latency)));
        report.services_loaded += 1;
    }

    // 4. Communication demands, validated against the loaded services.
    let demands_path = dataset_dir.join(DEMANDS_FILE);
    let demands = if demands_path.is_file() {
        let (demand_records, skipped) = read_delimited_records::<DemandRecordDto>(&demands_path)?;
        report.demands_skipped += skipped;

        let mut demands: Vec<CommDemand> = Vec::new();
        for record in demand_records {
            let known = seen_services.contains(&record.service_a) && seen_services.contains(&record.service_b);

            if record.bandwidth < 0.0 || !known {
                log::warn!(
                    "MalformedInputRecord: Demand {} => {} is invalid or references an unknown service and is skipped",
                    record.service_a,
                    record.service_b
                );
                report.demands_skipped += 1;
                continue;
            }

            demands.push(CommDemand::new(ServiceName::new(record.service_a), ServiceName::new(record.service_b), record.bandwidth));
            report.demands_loaded += 1;
        }
        Some(demands)
    } else {
        log::info!("NoDemandFile: {} not present, demands will be synthesized", demands_path.display());
        None
    };

    let topology = NetworkTopology::build(store)?;

    log::info!("DatasetLoaded: {}", report);

    Ok(LoadedDataset { topology, services, demands, report })
}
