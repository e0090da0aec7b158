//! Mutable graph store and its read-only snapshots

use std::fmt;

use log::{debug, warn};

use crate::config::{DuplicateEdgePolicy, GraphConfig};
use crate::core::{Edge, NodeId};
use crate::decomposer::SccDecomposer;
use crate::error::{Result, SccError};
use crate::index::ComponentIndex;

/// Successors of a node in insertion order
///
/// Cloning the iterator restarts the sequence from the clone point.
pub type Neighbors<'a> = std::iter::Copied<std::slice::Iter<'a, NodeId>>;

/// A directed graph over the fixed node set `[0, node_count)`
///
/// Outgoing edges are kept per node in insertion order. That order decides
/// the traversal order of every decomposition, so an unchanged graph always
/// decomposes to the same component numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<NodeId>>,
    edge_count: usize,
    config: GraphConfig,
}

impl Graph {
    /// Create a graph with `node_count` nodes and no edges
    pub fn new(node_count: usize, config: GraphConfig) -> Result<Self> {
        if node_count == 0 {
            return Err(SccError::InvalidNodeCount { node_count });
        }
        if node_count > config.max_nodes {
            return Err(SccError::CapacityExceeded {
                requested: node_count,
                max_nodes: config.max_nodes,
            });
        }

        let adjacency = (0..node_count)
            .map(|_| Vec::with_capacity(config.initial_capacity))
            .collect();

        debug!("created graph with {node_count} nodes");

        Ok(Self {
            adjacency,
            edge_count: 0,
            config,
        })
    }

    /// Create a graph using [`GraphConfig::default`]
    pub fn with_node_count(node_count: usize) -> Result<Self> {
        Self::new(node_count, GraphConfig::default())
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// True when no edges are stored
    pub fn is_empty(&self) -> bool {
        self.edge_count == 0
    }

    fn check_node(&self, node: NodeId) -> Result<()> {
        if node >= self.adjacency.len() {
            return Err(SccError::NodeOutOfRange {
                node,
                node_count: self.adjacency.len(),
            });
        }
        Ok(())
    }

    /// Insert `from -> to`
    ///
    /// Repeated insertions follow the configured [`DuplicateEdgePolicy`].
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        self.check_node(from)?;
        self.check_node(to)?;

        if from == to && !self.config.allow_self_edges {
            return Err(SccError::SelfEdgeRejected { node: from });
        }

        let successors = &mut self.adjacency[from];
        match self.config.duplicate_edges {
            DuplicateEdgePolicy::Keep => {}
            DuplicateEdgePolicy::Ignore => {
                if successors.contains(&to) {
                    return Ok(());
                }
            }
            DuplicateEdgePolicy::Reject => {
                if successors.contains(&to) {
                    return Err(SccError::DuplicateEdge { from, to });
                }
            }
        }

        successors.push(to);
        self.edge_count += 1;
        Ok(())
    }

    /// Remove every stored copy of `from -> to`
    ///
    /// Removing an absent edge succeeds without changes.
    pub fn remove_edge(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        self.check_node(from)?;
        self.check_node(to)?;

        let successors = &mut self.adjacency[from];
        let before = successors.len();
        successors.retain(|&next| next != to);
        self.edge_count -= before - successors.len();
        Ok(())
    }

    pub fn has_edge(&self, from: NodeId, to: NodeId) -> Result<bool> {
        self.check_node(from)?;
        self.check_node(to)?;
        Ok(self.adjacency[from].contains(&to))
    }

    pub fn out_degree(&self, node: NodeId) -> Result<usize> {
        self.check_node(node)?;
        Ok(self.adjacency[node].len())
    }

    /// Number of stored edges ending at `node`
    ///
    /// Computed by scanning every adjacency list.
    pub fn in_degree(&self, node: NodeId) -> Result<usize> {
        self.check_node(node)?;
        Ok(self
            .adjacency
            .iter()
            .map(|successors| successors.iter().filter(|&&next| next == node).count())
            .sum())
    }

    pub fn neighbors(&self, node: NodeId) -> Result<Neighbors<'_>> {
        self.check_node(node)?;
        Ok(self.adjacency[node].iter().copied())
    }

    /// All stored edges, by source node and then insertion order
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.snapshot().edges()
    }

    /// Freeze the current adjacency relation for a decomposition
    ///
    /// The snapshot borrows the graph, so the graph cannot be mutated while
    /// the snapshot is alive.
    pub fn snapshot(&self) -> GraphSnapshot<'_> {
        GraphSnapshot {
            adjacency: &self.adjacency,
        }
    }

    /// Check the adjacency lists against the graph configuration
    pub fn validate(&self) -> Result<()> {
        let result = self.check_consistency();
        if let Err(ref e) = result {
            warn!("graph validation failed: {e}");
        }
        result
    }

    fn check_consistency(&self) -> Result<()> {
        let snapshot = self.snapshot();
        snapshot.check_neighbors()?;

        if snapshot.edge_count() != self.edge_count {
            return Err(SccError::InvalidGraph {
                message: format!(
                    "edge counter is {} but adjacency lists hold {} edges",
                    self.edge_count,
                    snapshot.edge_count()
                ),
            });
        }

        let check_duplicates = !self.config.allow_multiple_edges();
        // last_seen[v] == u + 1 while scanning node u's successors
        let mut last_seen = vec![0usize; self.node_count()];
        for (from, successors) in self.adjacency.iter().enumerate() {
            for &to in successors {
                if from == to && !self.config.allow_self_edges {
                    return Err(SccError::InvalidGraph {
                        message: format!("self edge on node {from} is not allowed"),
                    });
                }
                if check_duplicates {
                    if last_seen[to] == from + 1 {
                        return Err(SccError::InvalidGraph {
                            message: format!("edge {from} -> {to} is stored more than once"),
                        });
                    }
                    last_seen[to] = from + 1;
                }
            }
        }

        Ok(())
    }

    /// Decompose the graph into strongly connected components
    ///
    /// Uses the graph's own configuration for the capacity bound and for the
    /// optional validation pass.
    pub fn decompose(&self) -> Result<ComponentIndex> {
        if self.config.enable_validation {
            self.validate()?;
        }

        SccDecomposer::new()
            .with_max_nodes(self.config.max_nodes)
            .decompose(&self.snapshot())
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Graph: {} nodes, {} edges",
            self.node_count(),
            self.edge_count
        )?;
        for (node, successors) in self.adjacency.iter().enumerate() {
            write!(f, "  {node} ->")?;
            for (i, next) in successors.iter().enumerate() {
                if i == 0 {
                    write!(f, " {next}")?;
                } else {
                    write!(f, ", {next}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Immutable point-in-time view of an adjacency relation
#[derive(Debug, Clone, Copy)]
pub struct GraphSnapshot<'g> {
    adjacency: &'g [Vec<NodeId>],
}

impl<'g> GraphSnapshot<'g> {
    /// Wrap raw adjacency lists
    ///
    /// Nothing guarantees that the successors are in range; decomposing a
    /// snapshot with an out-of-range successor panics unless validation is
    /// enabled on the decomposer.
    pub fn from_adjacency(adjacency: &'g [Vec<NodeId>]) -> Self {
        Self { adjacency }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Successors of `node` in insertion order
    pub fn successors(&self, node: NodeId) -> &'g [NodeId] {
        &self.adjacency[node]
    }

    pub fn edges(self) -> impl Iterator<Item = Edge> + 'g {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(from, successors)| successors.iter().map(move |&to| Edge::new(from, to)))
    }

    /// Report the first successor outside `[0, node_count)`
    pub fn check_neighbors(&self) -> Result<()> {
        let node_count = self.node_count();
        match self.edges().find(|edge| edge.to >= node_count) {
            Some(edge) => Err(SccError::InvalidGraph {
                message: format!(
                    "edge {edge} points outside the graph of {node_count} nodes"
                ),
            }),
            None => Ok(()),
        }
    }
}
