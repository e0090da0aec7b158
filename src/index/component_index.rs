use std::fmt;

use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

use crate::core::{ComponentId, NodeId};
use crate::decomposer::Assignment;
use crate::error::{Result, SccError};
use crate::graph::GraphSnapshot;

/// Members of one component, in discovery order
pub type Members<'a> = std::iter::Copied<std::slice::Iter<'a, NodeId>>;

/// Distinct edges of the condensation graph
pub type CondensationEdges<'a> =
    std::iter::Copied<std::slice::Iter<'a, (ComponentId, ComponentId)>>;

/// Figures collected while decomposing a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DecompositionStats {
    pub node_count: usize,
    /// Successor entries examined by the traversal, parallel edges included
    pub edges_examined: usize,
    pub component_count: usize,
    /// Components with more than one member or a self-loop
    pub cyclic_components: usize,
    pub largest_component: usize,
    /// Deepest DFS frame stack reached
    pub max_frame_depth: usize,
}

/// Query view over a finished decomposition
///
/// Immutable once built. Rebuild it by decomposing again after the graph
/// changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentIndex {
    scc_id: Vec<ComponentId>,
    members: Vec<NodeId>,
    offsets: Vec<usize>,
    self_loops: Vec<bool>,
    condensation: Vec<(ComponentId, ComponentId)>,
    stats: DecompositionStats,
}

impl ComponentIndex {
    /// Attach condensation edges and self-loop flags to a raw assignment
    ///
    /// Scans every edge of the snapshot once.
    pub(crate) fn from_assignment(snapshot: &GraphSnapshot<'_>, assignment: Assignment) -> Self {
        let Assignment {
            scc_id,
            members,
            offsets,
            edges_examined,
            max_frame_depth,
        } = assignment;

        let component_count = offsets.len() - 1;
        let mut self_loops = vec![false; component_count];
        let mut condensation = Vec::new();
        // last_source[b] == a once (a, b) has been recorded
        let mut last_source = vec![usize::MAX; component_count];

        for source in 0..component_count {
            for &node in &members[offsets[source]..offsets[source + 1]] {
                for &next in snapshot.successors(node) {
                    let target = scc_id[next];
                    if target == source {
                        if next == node {
                            self_loops[source] = true;
                        }
                    } else if last_source[target] != source {
                        last_source[target] = source;
                        condensation.push((source, target));
                    }
                }
            }
        }

        let largest_component = offsets
            .windows(2)
            .map(|bounds| bounds[1] - bounds[0])
            .max()
            .unwrap_or(0);

        let mut index = Self {
            scc_id,
            members,
            offsets,
            self_loops,
            condensation,
            stats: DecompositionStats {
                node_count: snapshot.node_count(),
                edges_examined,
                component_count,
                cyclic_components: 0,
                largest_component,
                max_frame_depth,
            },
        };
        index.stats.cyclic_components = index.cycles().count();
        index
    }

    pub fn node_count(&self) -> usize {
        self.scc_id.len()
    }

    pub fn component_count(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn stats(&self) -> &DecompositionStats {
        &self.stats
    }

    /// Component id of every node, indexed by node id
    pub fn scc_ids(&self) -> &[ComponentId] {
        &self.scc_id
    }

    pub fn component_of(&self, node: NodeId) -> Result<ComponentId> {
        self.scc_id
            .get(node)
            .copied()
            .ok_or(SccError::UnknownNode {
                node,
                node_count: self.node_count(),
            })
    }

    fn check_component(&self, component: ComponentId) -> Result<()> {
        if component >= self.component_count() {
            return Err(SccError::UnknownComponent {
                component,
                component_count: self.component_count(),
            });
        }
        Ok(())
    }

    /// Nodes of `component`, ordered by discovery time
    pub fn members_of(&self, component: ComponentId) -> Result<Members<'_>> {
        self.check_component(component)?;
        Ok(self.members_slice(component).iter().copied())
    }

    fn members_slice(&self, component: ComponentId) -> &[NodeId] {
        &self.members[self.offsets[component]..self.offsets[component + 1]]
    }

    pub fn component_size(&self, component: ComponentId) -> Result<usize> {
        self.check_component(component)?;
        Ok(self.members_slice(component).len())
    }

    /// Whether `u` and `v` are mutually reachable
    ///
    /// Nodes outside the decomposed graph are never in the same component.
    pub fn same_component(&self, u: NodeId, v: NodeId) -> bool {
        match (self.scc_id.get(u), self.scc_id.get(v)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Every component with its members, in component id order
    pub fn components(&self) -> impl Iterator<Item = (ComponentId, Members<'_>)> + '_ {
        (0..self.component_count())
            .map(|component| (component, self.members_slice(component).iter().copied()))
    }

    /// A component is cyclic when it has more than one member or a self-loop
    pub fn is_cyclic(&self, component: ComponentId) -> Result<bool> {
        self.check_component(component)?;
        Ok(self.is_cyclic_unchecked(component))
    }

    fn is_cyclic_unchecked(&self, component: ComponentId) -> bool {
        self.members_slice(component).len() > 1 || self.self_loops[component]
    }

    pub fn has_self_loop(&self, component: ComponentId) -> Result<bool> {
        self.check_component(component)?;
        Ok(self.self_loops[component])
    }

    /// Ids of all cyclic components
    pub fn cycles(&self) -> impl Iterator<Item = ComponentId> + '_ {
        (0..self.component_count()).filter(|&component| self.is_cyclic_unchecked(component))
    }

    pub fn cycle_count(&self) -> usize {
        self.stats.cyclic_components
    }

    pub fn has_cycles(&self) -> bool {
        self.stats.cyclic_components > 0
    }

    /// Distinct `(from, to)` component pairs joined by at least one edge
    ///
    /// Grouped by source component; `from > to` holds for every pair.
    pub fn condensation_edges(&self) -> CondensationEdges<'_> {
        self.condensation.iter().copied()
    }

    /// Components ordered so every condensation edge points forward
    pub fn topological_order(&self) -> Vec<ComponentId> {
        (0..self.component_count()).rev().collect()
    }

    /// The condensation as a petgraph graph
    ///
    /// Node `NodeIndex::new(c)` carries component id `c`.
    pub fn condensation_graph(&self) -> DiGraph<ComponentId, ()> {
        let mut graph =
            DiGraph::with_capacity(self.component_count(), self.condensation.len());
        for component in 0..self.component_count() {
            graph.add_node(component);
        }
        for &(from, to) in &self.condensation {
            graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
        }
        graph
    }
}

impl fmt::Display for ComponentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} components over {} nodes",
            self.component_count(),
            self.node_count()
        )?;
        for (component, members) in self.components() {
            let members: Vec<String> = members.map(|node| node.to_string()).collect();
            writeln!(f, "  #{component}: {{{}}}", members.join(", "))?;
        }
        Ok(())
    }
}
