use std::io::Write;

use super::Graph;
use crate::core::{ComponentId, NodeId};
use crate::error::{Result, SccError};
use crate::index::ComponentIndex;

// Blue-Orange Accessible Palette - Soothing colors with excellent contrast
mod colors {
    pub const NORMAL_NODE_FILL: &str = "#E3F2FD"; // Light blue
    pub const NORMAL_NODE_STROKE: &str = "#1976D2"; // Medium blue
    pub const CYCLE_NODE_FILL: &str = "#FFF3E0"; // Light orange
    pub const CYCLE_NODE_STROKE: &str = "#F57C00"; // Vibrant orange
    pub const NORMAL_EDGE: &str = "#64B5F6"; // Soft blue
    pub const CYCLE_EDGE: &str = "#FF6500"; // Deep orange
    pub const CLUSTER_BG: &str = "#FAFAFA"; // Off-white background
}

// Helper macro for write operations that converts IO errors
macro_rules! writeln_out {
    ($dst:expr) => {
        writeln!($dst).map_err(SccError::from)
    };
    ($dst:expr, $($arg:tt)*) => {
        writeln!($dst, $($arg)*).map_err(SccError::from)
    };
}

/// Renders a graph together with its decomposition
pub struct GraphRenderer {
    highlight_cycles: bool,
}

impl GraphRenderer {
    pub fn new(highlight_cycles: bool) -> Self {
        Self { highlight_cycles }
    }

    fn check_index(graph: &Graph, index: &ComponentIndex) -> Result<()> {
        if graph.node_count() != index.node_count() {
            return Err(SccError::InvalidGraph {
                message: format!(
                    "index covers {} nodes but the graph has {}",
                    index.node_count(),
                    graph.node_count()
                ),
            });
        }
        Ok(())
    }

    fn in_cycle(&self, index: &ComponentIndex, node: NodeId) -> bool {
        self.highlight_cycles
            && index
                .component_of(node)
                .and_then(|component| index.is_cyclic(component))
                .unwrap_or(false)
    }

    fn is_edge_in_cycle(&self, index: &ComponentIndex, from: NodeId, to: NodeId) -> bool {
        self.in_cycle(index, from) && index.same_component(from, to)
    }

    fn cyclic_components(&self, index: &ComponentIndex) -> impl Iterator<Item = ComponentId> {
        let limit = if self.highlight_cycles { usize::MAX } else { 0 };
        index.cycles().take(limit)
    }

    /// Graphviz output; cyclic components become clusters
    pub fn render_dot(
        &self,
        graph: &Graph,
        index: &ComponentIndex,
        output: &mut dyn Write,
    ) -> Result<()> {
        Self::check_index(graph, index)?;

        writeln_out!(output, "digraph scc {{")?;
        writeln_out!(output, "    rankdir=LR;")?;
        writeln_out!(output, "    node [shape=circle];")?;
        writeln_out!(output)?;

        for component in self.cyclic_components(index) {
            writeln_out!(output, "    subgraph cluster_{component} {{")?;
            writeln_out!(output, r#"        label="component {component}";"#)?;
            writeln_out!(
                output,
                r#"        style=filled; fillcolor="{}"; color="{}";"#,
                colors::CLUSTER_BG,
                colors::CYCLE_NODE_STROKE
            )?;
            for node in index.members_of(component)? {
                writeln_out!(output, r#"        "{node}";"#)?;
            }
            writeln_out!(output, "    }}")?;
        }

        for node in 0..graph.node_count() {
            let (fill_color, stroke_color) = if self.in_cycle(index, node) {
                (colors::CYCLE_NODE_FILL, colors::CYCLE_NODE_STROKE)
            } else {
                (colors::NORMAL_NODE_FILL, colors::NORMAL_NODE_STROKE)
            };
            writeln_out!(
                output,
                r#"    "{node}" [style=filled, fillcolor="{fill_color}", color="{stroke_color}", penwidth=2];"#
            )?;
        }

        writeln_out!(output)?;

        for edge in graph.edges() {
            if self.is_edge_in_cycle(index, edge.from, edge.to) {
                writeln_out!(
                    output,
                    r#"    "{}" -> "{}" [color="{}", penwidth=3];"#,
                    edge.from,
                    edge.to,
                    colors::CYCLE_EDGE
                )?;
            } else {
                writeln_out!(
                    output,
                    r#"    "{}" -> "{}" [color="{}", penwidth=2];"#,
                    edge.from,
                    edge.to,
                    colors::NORMAL_EDGE
                )?;
            }
        }

        writeln_out!(output, "}}")?;
        Ok(())
    }

    /// Mermaid flowchart output; cyclic components become subgraphs
    pub fn render_mermaid(
        &self,
        graph: &Graph,
        index: &ComponentIndex,
        output: &mut dyn Write,
    ) -> Result<()> {
        Self::check_index(graph, index)?;

        writeln_out!(output, "graph LR")?;

        for node in 0..graph.node_count() {
            writeln_out!(output, "    {}(({}))", self.mermaid_id(node), node)?;
        }

        for component in self.cyclic_components(index) {
            writeln_out!(output, "    subgraph c{component} [component {component}]")?;
            for node in index.members_of(component)? {
                writeln_out!(output, "        {}", self.mermaid_id(node))?;
            }
            writeln_out!(output, "    end")?;
        }

        for (link_style_index, edge) in graph.edges().enumerate() {
            writeln_out!(
                output,
                "    {} --> {}",
                self.mermaid_id(edge.from),
                self.mermaid_id(edge.to)
            )?;
            if self.is_edge_in_cycle(index, edge.from, edge.to) {
                writeln_out!(
                    output,
                    "    linkStyle {} stroke:{},stroke-width:3px",
                    link_style_index,
                    colors::CYCLE_EDGE
                )?;
            } else {
                writeln_out!(
                    output,
                    "    linkStyle {} stroke:{},stroke-width:2px",
                    link_style_index,
                    colors::NORMAL_EDGE
                )?;
            }
        }

        let cyclic_nodes: Vec<String> = (0..graph.node_count())
            .filter(|&node| self.in_cycle(index, node))
            .map(|node| self.mermaid_id(node))
            .collect();
        if !cyclic_nodes.is_empty() {
            writeln_out!(
                output,
                "    classDef cycle fill:{},stroke:{},stroke-width:2px",
                colors::CYCLE_NODE_FILL,
                colors::CYCLE_NODE_STROKE
            )?;
            writeln_out!(output, "    class {} cycle", cyclic_nodes.join(","))?;
        }

        Ok(())
    }

    fn mermaid_id(&self, node: NodeId) -> String {
        format!("n{node}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cyclic_graph() -> Graph {
        let mut graph = Graph::with_node_count(3).unwrap();
        graph.add_edge(0, 1).unwrap();
        graph.add_edge(1, 0).unwrap();
        graph.add_edge(1, 2).unwrap();
        graph
    }

    fn render(highlight: bool, mermaid: bool) -> String {
        let graph = cyclic_graph();
        let index = graph.decompose().unwrap();
        let renderer = GraphRenderer::new(highlight);
        let mut output = Vec::new();
        if mermaid {
            renderer.render_mermaid(&graph, &index, &mut output).unwrap();
        } else {
            renderer.render_dot(&graph, &index, &mut output).unwrap();
        }
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_dot_highlights_cycle() {
        let dot = render(true, false);

        assert!(dot.starts_with("digraph scc {"));
        assert!(dot.contains("subgraph cluster_1 {"));
        assert!(dot.contains(&format!(
            r#""0" -> "1" [color="{}", penwidth=3];"#,
            colors::CYCLE_EDGE
        )));
        assert!(dot.contains(&format!(
            r#""1" -> "2" [color="{}", penwidth=2];"#,
            colors::NORMAL_EDGE
        )));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn test_dot_without_highlighting() {
        let dot = render(false, false);

        assert!(!dot.contains("subgraph"));
        assert!(!dot.contains(colors::CYCLE_EDGE));
    }

    #[test]
    fn test_mermaid_output() {
        let mermaid = render(true, true);

        assert!(mermaid.starts_with("graph LR"));
        assert!(mermaid.contains("    n0((0))"));
        assert!(mermaid.contains("subgraph c1 [component 1]"));
        assert!(mermaid.contains("    n1 --> n2"));
        assert!(mermaid.contains("class n0,n1 cycle"));
    }

    #[test]
    fn test_mismatched_index_is_rejected() {
        let graph = cyclic_graph();
        let other = Graph::with_node_count(5).unwrap().decompose().unwrap();

        let mut output = Vec::new();
        let err = GraphRenderer::new(true)
            .render_dot(&graph, &other, &mut output)
            .unwrap_err();
        assert!(matches!(err, SccError::InvalidGraph { .. }));
    }
}
