//! Human-readable console report generation

use std::fmt::Write;

use console::style;

use super::ReportGenerator;
use crate::constants::output::MAX_LISTED_MEMBERS;
use crate::error::SccError;
use crate::index::ComponentIndex;
use crate::utils::string::pluralize;

pub struct HumanReportGenerator {
    max_cycles: Option<usize>,
}

impl HumanReportGenerator {
    pub fn new(max_cycles: Option<usize>) -> Self {
        Self { max_cycles }
    }
}

impl ReportGenerator for HumanReportGenerator {
    fn generate_report(&self, index: &ComponentIndex) -> Result<String, SccError> {
        let mut output = String::new();

        writeln!(
            output,
            "\n{} {} {} across {} {}",
            style("📊").blue(),
            style(index.component_count()).bold(),
            pluralize("component", index.component_count()),
            index.node_count(),
            pluralize("node", index.node_count())
        )?;

        if !index.has_cycles() {
            write!(
                output,
                "\n{} No cycles detected! The graph is acyclic.\n",
                style("✅").green().bold()
            )?;
            return Ok(output);
        }

        let total_cycles = index.cycle_count();
        write!(
            output,
            "\n{} Found {} {}:\n\n",
            style("❌").red().bold(),
            style(total_cycles).red().bold(),
            pluralize("cycle", total_cycles)
        )?;

        let limit = self.max_cycles.unwrap_or(usize::MAX);
        for (i, component) in index.cycles().take(limit).enumerate() {
            let size = index.component_size(component)?;
            writeln!(
                output,
                "{} Cycle #{} (component {}, {} {})",
                style("🔄").yellow(),
                i + 1,
                component,
                size,
                pluralize("node", size)
            )?;

            let members: Vec<String> = index
                .members_of(component)?
                .take(MAX_LISTED_MEMBERS)
                .map(|node| node.to_string())
                .collect();
            write!(output, "    {} {}", style("•").dim(), style(members.join(", ")).bold())?;
            if size > MAX_LISTED_MEMBERS {
                write!(
                    output,
                    " {}",
                    style(format!("… and {} more", size - MAX_LISTED_MEMBERS)).dim()
                )?;
            }
            writeln!(output)?;

            if index.has_self_loop(component)? {
                writeln!(output, "    {} contains a self-loop", style("↺").dim())?;
            }
            writeln!(output)?;
        }

        if self.max_cycles.is_some_and(|limit| limit < total_cycles) {
            writeln!(
                output,
                "{} Showing {} of {} cycles.",
                style("ℹ️").blue(),
                style(limit).yellow(),
                style(total_cycles).yellow()
            )?;
        }

        writeln!(
            output,
            "{} To break a cycle, remove at least one edge between its members.",
            style("💡").yellow()
        )?;

        Ok(output)
    }
}
