//! # Ferris SCC - Strongly Connected Components for Large Directed Graphs
//!
//! Ferris SCC partitions a directed graph into strongly connected components:
//! maximal sets of nodes that can all reach each other. It is used for cycle
//! detection, dependency-cycle analysis and validating build or task
//! orderings.
//!
//! ## Main Components
//!
//! - **Graph**: Owns a fixed node set and the directed edges between nodes
//! - **Decomposer**: Iterative Tarjan's algorithm with heap-resident state,
//!   safe for arbitrarily deep graphs
//! - **Index**: Query views over a decomposition (membership, condensation,
//!   topological order)
//! - **Reports**: Human-readable and machine-readable cycle reports
//!
//! ## Usage
//!
//! ### Example: Finding Cycles in a Task Graph
//!
//! ```
//! use ferris_scc::graph::Graph;
//! use ferris_scc::reports::{HumanReportGenerator, JsonReportGenerator, ReportGenerator};
//!
//! # fn main() -> miette::Result<()> {
//! // Tasks 0..6, where an edge `u -> v` means "u precedes v"
//! let mut graph = Graph::with_node_count(6)?;
//! for (from, to) in [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3)] {
//!     graph.add_edge(from, to)?;
//! }
//!
//! let index = graph.decompose()?;
//!
//! assert_eq!(index.component_count(), 2);
//! assert!(index.same_component(0, 2));
//! assert!(!index.same_component(2, 3));
//!
//! if index.has_cycles() {
//!     let human_report = HumanReportGenerator::new(Some(5));
//!     println!("{}", human_report.generate_report(&index)?);
//!
//!     let json_output = JsonReportGenerator::new().generate_report(&index)?;
//!     assert!(json_output.contains("\"cycle_count\": 2"));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Example: Ordering the Condensation
//!
//! ```
//! use ferris_scc::graph::Graph;
//!
//! # fn main() -> miette::Result<()> {
//! let mut graph = Graph::with_node_count(4)?;
//! graph.add_edge(0, 1)?;
//! graph.add_edge(1, 0)?;
//! graph.add_edge(1, 2)?;
//! graph.add_edge(3, 2)?;
//!
//! let index = graph.decompose()?;
//!
//! // Every condensation edge points forward in this order
//! let order = index.topological_order();
//! for (from, to) in index.condensation_edges() {
//!     let from_pos = order.iter().position(|&c| c == from).unwrap();
//!     let to_pos = order.iter().position(|&c| c == to).unwrap();
//!     assert!(from_pos < to_pos);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Example: Persisting a Graph
//!
//! ```no_run
//! use std::path::Path;
//!
//! use ferris_scc::config::GraphConfig;
//! use ferris_scc::graph::Graph;
//!
//! # fn main() -> miette::Result<()> {
//! let config = GraphConfig::from_toml_file(Path::new("scc.toml"))?;
//! let graph = Graph::load(Path::new("tasks.graph"), config)?;
//!
//! let index = graph.decompose()?;
//! println!("{index}");
//!
//! graph.save(Path::new("tasks-copy.graph"))?;
//! # Ok(())
//! # }
//! ```

// Private modules
mod constants;
mod utils;

// Public modules
pub mod common;
pub mod config;
pub mod core;
pub mod decomposer;
pub mod error;
pub mod graph;
pub mod index;
pub mod reports;

pub use crate::config::GraphConfig;
pub use crate::core::{ComponentId, Edge, NodeId};
pub use crate::decomposer::{SccDecomposer, decompose_all};
pub use crate::error::{ErrorKind, SccError};
pub use crate::graph::Graph;
pub use crate::index::ComponentIndex;
