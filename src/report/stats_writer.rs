use std::path::Path;

use crate::domain::resource::resource_vector::Dimension;
use crate::domain::topology::NetworkTopology;
use crate::error::Result;

/// Exports one usage row per node dimension and per link as semicolon-separated
/// CSV for offline analysis.
pub fn write_usage_stats(path: &Path, topology: &NetworkTopology) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_path(path)?;

    writer.write_record(["Kind", "Name", "Dimension", "Used", "Capacity", "UtilizationPercent"])?;

    for (_, node) in topology.store().nodes() {
        let usage = node.get_usage();
        let capacity = node.get_capacity();

        for dimension in Dimension::ALL {
            writer.write_record([
                "Node".to_string(),
                node.get_name().into(),
                dimension.to_string(),
                usage.get(dimension).to_string(),
                capacity.get(dimension).to_string(),
                format!("{:.1}", node.utilization_percent(dimension)),
            ])?;
        }
    }

    for (_, link) in topology.store().links() {
        writer.write_record([
            "Link".to_string(),
            link.get_name().into(),
            "bandwidth".to_string(),
            link.get_used_bandwidth().to_string(),
            link.get_capacity().to_string(),
            format!("{:.1}", link.utilization_percent()),
        ])?;
    }

    writer.flush()?;
    log::info!("StatsWritten: Usage statistics exported to {}", path.display());

    Ok(())
}
