use serde::Deserialize;

/// One row of `nodes.csv`: a resource node with its four capacity scalars.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeRecordDto {
    pub id: String,
    pub storage: f64,
    pub compute: f64,
    pub uplink: f64,
    pub downlink: f64,
}

/// One row of `links.csv`. Both endpoints must resolve to already-loaded
/// nodes; unresolvable rows are dropped by the loader.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkRecordDto {
    pub id: String,
    pub source: String,
    pub target: String,
    pub capacity: f64,
    pub latency: f64,
}

/// One row of `services.csv`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceRecordDto {
    pub id: String,
    pub compute: f64,
    pub storage: f64,
    pub cost: f64,
    pub latency: f64,
}

/// One row of the optional `demands.csv`.
#[derive(Debug, Clone, Deserialize)]
pub struct DemandRecordDto {
    pub service_a: String,
    pub service_b: String,
    pub bandwidth: f64,
}
