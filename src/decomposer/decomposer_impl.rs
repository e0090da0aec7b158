use log::{debug, trace};
use rayon::prelude::*;

use crate::constants::limits::DEFAULT_MAX_NODES;
use crate::core::{ComponentId, NodeId};
use crate::error::{Result, SccError};
use crate::graph::{Graph, GraphSnapshot};
use crate::index::ComponentIndex;

/// Discovery index of a node the traversal has not reached yet
const UNVISITED: usize = usize::MAX;

/// Decomposer for strongly connected components
///
/// Runs Tarjan's low-link algorithm with heap-allocated traversal state, so
/// neither the depth nor the width of the graph is bounded by the call stack.
/// All state lives in a per-call [`TraversalState`]; one decomposer can be
/// shared freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SccDecomposer {
    max_nodes: usize,
    validate: bool,
}

impl Default for SccDecomposer {
    fn default() -> Self {
        Self::new()
    }
}

impl SccDecomposer {
    pub fn new() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_NODES,
            validate: false,
        }
    }

    /// Refuse snapshots with more than `max_nodes` nodes
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Check successor ranges before traversal instead of panicking midway
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Compute the component assignment of a snapshot
    ///
    /// Nodes are visited as roots in increasing id order and successors in
    /// insertion order, so an unchanged snapshot always yields the same
    /// component ids.
    ///
    /// # Panics
    ///
    /// Panics if a successor lies outside `[0, node_count)` and validation is
    /// disabled; such a snapshot breaks the graph store invariant and any
    /// partition computed from it would be wrong.
    pub fn decompose(&self, snapshot: &GraphSnapshot<'_>) -> Result<ComponentIndex> {
        let node_count = snapshot.node_count();
        if node_count == 0 {
            return Err(SccError::GraphEmpty);
        }
        if node_count > self.max_nodes {
            return Err(SccError::CapacityExceeded {
                requested: node_count,
                max_nodes: self.max_nodes,
            });
        }
        if self.validate {
            snapshot.check_neighbors()?;
        }

        debug!(
            "decomposing graph: {} nodes, {} edges",
            node_count,
            snapshot.edge_count()
        );

        let assignment = TraversalState::new(*snapshot).run();
        let index = ComponentIndex::from_assignment(snapshot, assignment);

        debug!(
            "found {} components ({} cyclic), max frame depth {}",
            index.component_count(),
            index.cycle_count(),
            index.stats().max_frame_depth
        );

        Ok(index)
    }
}

/// Decompose independent graphs in parallel
///
/// Results are returned in input order.
pub fn decompose_all(graphs: &[Graph]) -> Vec<Result<ComponentIndex>> {
    graphs.par_iter().map(Graph::decompose).collect()
}

/// Raw output of one traversal, consumed by [`ComponentIndex`]
#[derive(Debug)]
pub(crate) struct Assignment {
    /// Component of every node
    pub scc_id: Vec<ComponentId>,
    /// Members of all components, grouped by component, discovery order within
    pub members: Vec<NodeId>,
    /// `members[offsets[c]..offsets[c + 1]]` belong to component `c`
    pub offsets: Vec<usize>,
    pub edges_examined: usize,
    pub max_frame_depth: usize,
}

/// A suspended visit of `node`; `cursor` is the next successor to examine
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: NodeId,
    cursor: usize,
}

struct TraversalState<'g> {
    snapshot: GraphSnapshot<'g>,
    disc: Vec<usize>,
    low: Vec<usize>,
    on_stack: Vec<bool>,
    /// Nodes of components that are not closed yet, in discovery order
    component_stack: Vec<NodeId>,
    frames: Vec<Frame>,
    timer: usize,
    scc_id: Vec<ComponentId>,
    members: Vec<NodeId>,
    offsets: Vec<usize>,
    edges_examined: usize,
    max_frame_depth: usize,
}

impl<'g> TraversalState<'g> {
    fn new(snapshot: GraphSnapshot<'g>) -> Self {
        let node_count = snapshot.node_count();
        Self {
            snapshot,
            disc: vec![UNVISITED; node_count],
            low: vec![UNVISITED; node_count],
            on_stack: vec![false; node_count],
            component_stack: Vec::new(),
            frames: Vec::new(),
            timer: 0,
            scc_id: vec![0; node_count],
            members: Vec::with_capacity(node_count),
            offsets: vec![0],
            edges_examined: 0,
            max_frame_depth: 0,
        }
    }

    fn run(mut self) -> Assignment {
        for root in 0..self.snapshot.node_count() {
            if self.disc[root] == UNVISITED {
                self.strong_connect(root);
            }
        }

        if !self.component_stack.is_empty() {
            invariant_violation(&format!(
                "{} nodes left on the component stack after traversal",
                self.component_stack.len()
            ));
        }

        Assignment {
            scc_id: self.scc_id,
            members: self.members,
            offsets: self.offsets,
            edges_examined: self.edges_examined,
            max_frame_depth: self.max_frame_depth,
        }
    }

    fn visit(&mut self, node: NodeId) {
        self.disc[node] = self.timer;
        self.low[node] = self.timer;
        self.timer += 1;
        self.component_stack.push(node);
        self.on_stack[node] = true;
        self.frames.push(Frame { node, cursor: 0 });
        self.max_frame_depth = self.max_frame_depth.max(self.frames.len());
    }

    fn strong_connect(&mut self, root: NodeId) {
        let node_count = self.snapshot.node_count();
        self.visit(root);

        while let Some(frame) = self.frames.last_mut() {
            let node = frame.node;
            let successors = self.snapshot.successors(node);

            if frame.cursor < successors.len() {
                let next = successors[frame.cursor];
                frame.cursor += 1;
                self.edges_examined += 1;

                if next >= node_count {
                    invariant_violation(&format!(
                        "node {node} has successor {next} outside a graph of {node_count} nodes"
                    ));
                }

                if self.disc[next] == UNVISITED {
                    self.visit(next);
                } else if self.on_stack[next] {
                    self.low[node] = self.low[node].min(self.disc[next]);
                }
                // Otherwise `next` already belongs to a closed component.
                continue;
            }

            self.frames.pop();
            if let Some(parent) = self.frames.last() {
                let parent = parent.node;
                self.low[parent] = self.low[parent].min(self.low[node]);
            }
            if self.low[node] == self.disc[node] {
                self.close_component(node);
            }
        }
    }

    /// Pop the component rooted at `root` off the component stack
    fn close_component(&mut self, root: NodeId) {
        let component = self.offsets.len() - 1;
        let start = self.members.len();

        loop {
            let Some(node) = self.component_stack.pop() else {
                invariant_violation(&format!(
                    "component stack exhausted before reaching root {root}"
                ));
            };
            self.on_stack[node] = false;
            self.scc_id[node] = component;
            self.members.push(node);
            if node == root {
                break;
            }
        }

        // Popped newest first; members are reported in discovery order.
        self.members[start..].reverse();
        self.offsets.push(self.members.len());

        trace!(
            "closed component {component} rooted at {root} with {} members",
            self.members.len() - start
        );
    }
}

#[cold]
fn invariant_violation(message: &str) -> ! {
    panic!("internal invariant violation: {message}")
}
