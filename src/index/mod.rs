//! # Component Index Module
//!
//! Query views over a decomposition: node to component, component to
//! members, the condensation graph and the cyclic components used for cycle
//! reporting.
//!
//! ## Example
//!
//! ```
//! use ferris_scc::graph::Graph;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut graph = Graph::with_node_count(3)?;
//! graph.add_edge(0, 1)?;
//! graph.add_edge(1, 0)?;
//! graph.add_edge(0, 2)?;
//!
//! let index = graph.decompose()?;
//! let cycle = index.component_of(0)?;
//!
//! assert_eq!(index.members_of(cycle)?.collect::<Vec<_>>(), vec![0, 1]);
//! assert_eq!(index.condensation_edges().collect::<Vec<_>>(), vec![(1, 0)]);
//! assert_eq!(index.topological_order(), vec![1, 0]);
//! # Ok(())
//! # }
//! ```

mod component_index;

pub use component_index::{ComponentIndex, CondensationEdges, DecompositionStats, Members};
