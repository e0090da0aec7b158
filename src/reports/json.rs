//! JSON format report generation

use serde_json::json;

use super::ReportGenerator;
use crate::error::SccError;
use crate::index::ComponentIndex;

pub struct JsonReportGenerator;

impl Default for JsonReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for JsonReportGenerator {
    fn generate_report(&self, index: &ComponentIndex) -> Result<String, SccError> {
        let cycles = index
            .cycles()
            .map(|component| {
                let members: Vec<_> = index.members_of(component)?.collect();
                Ok(json!({
                    "component": component,
                    "members": members,
                    "self_loop": index.has_self_loop(component)?,
                }))
            })
            .collect::<Result<Vec<_>, SccError>>()?;

        let condensation_edges: Vec<_> = index
            .condensation_edges()
            .map(|(from, to)| json!([from, to]))
            .collect();

        let report = json!({
            "node_count": index.node_count(),
            "component_count": index.component_count(),
            "has_cycles": index.has_cycles(),
            "cycle_count": index.cycle_count(),
            "cycles": cycles,
            "condensation_edges": condensation_edges,
            "topological_order": index.topological_order(),
            "stats": index.stats(),
        });

        serde_json::to_string_pretty(&report).map_err(SccError::Json)
    }
}
