//! # Component Decomposition Module
//!
//! This module partitions a directed graph into strongly connected
//! components.
//!
//! ## Algorithm
//!
//! We use Tarjan's low-link algorithm, driven by an explicit stack of DFS
//! frames instead of recursion. Each frame remembers the node being explored
//! and the position of the next successor to examine, so a partially explored
//! node resumes exactly where it left off once a deeper visit finishes. The
//! algorithm runs in O(V + E) time with O(V) auxiliary memory, and graphs of
//! any depth decompose without touching the call stack limit.
//!
//! Components are numbered in the order they close. Every condensation edge
//! therefore points from a higher component id to a lower one.
//!
//! ## Example
//!
//! ```
//! use ferris_scc::decomposer::SccDecomposer;
//! use ferris_scc::graph::Graph;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut graph = Graph::with_node_count(4)?;
//! graph.add_edge(0, 1)?;
//! graph.add_edge(1, 0)?;
//! graph.add_edge(1, 2)?;
//!
//! let index = SccDecomposer::new().decompose(&graph.snapshot())?;
//!
//! assert_eq!(index.component_count(), 3);
//! assert!(index.same_component(0, 1));
//! assert!(!index.same_component(1, 2));
//! # Ok(())
//! # }
//! ```

mod decomposer_impl;

pub(crate) use decomposer_impl::Assignment;
pub use decomposer_impl::{SccDecomposer, decompose_all};
