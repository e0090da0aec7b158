//! # Graph Storage and Rendering Module
//!
//! This module owns the mutable graph store, its binary persistence and its
//! visualization.
//!
//! ## Components
//!
//! ### Graph Storage
//! - **Graph**: fixed node set `[0, n)` with per-node successor lists kept in
//!   insertion order
//! - **GraphSnapshot**: borrowed, immutable view consumed by the decomposer
//!
//! ### Graph Rendering
//! - **GraphRenderer**: renders a graph in DOT or Mermaid format, drawing
//!   cyclic components as clusters
//!
//! ## Example
//!
//! ```
//! use ferris_scc::graph::{Graph, GraphRenderer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut graph = Graph::with_node_count(3)?;
//! graph.add_edge(0, 1)?;
//! graph.add_edge(1, 0)?;
//! graph.add_edge(1, 2)?;
//!
//! let index = graph.decompose()?;
//!
//! let mut output = Vec::new();
//! GraphRenderer::new(true).render_dot(&graph, &index, &mut output)?;
//!
//! let dot_output = String::from_utf8(output)?;
//! assert!(dot_output.contains("digraph"));
//! assert!(dot_output.contains("cluster_1"));
//! # Ok(())
//! # }
//! ```

mod persist;
mod renderer;
mod store;

pub use renderer::GraphRenderer;
pub use store::{Graph, GraphSnapshot, Neighbors};
