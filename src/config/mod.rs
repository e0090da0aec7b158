//! # Configuration Module
//!
//! Configuration for graph stores and their decompositions. Values come from
//! `GraphConfig::default()`, the builder, or a TOML file.
//!
//! ## Example
//!
//! ```
//! use ferris_scc::common::ConfigBuilder;
//! use ferris_scc::config::{DuplicateEdgePolicy, GraphConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GraphConfig::builder()
//!     .with_max_nodes(10_000)
//!     .with_allow_self_edges(false)
//!     .with_duplicate_edges(DuplicateEdgePolicy::Reject)
//!     .build()?;
//!
//! assert_eq!(config.max_nodes, 10_000);
//!
//! let from_file = GraphConfig::from_toml_str("scc.toml", "max_nodes = 500")?;
//! assert_eq!(from_file.max_nodes, 500);
//! # Ok(())
//! # }
//! ```

pub mod graph;

pub use graph::{DuplicateEdgePolicy, GraphConfig, GraphConfigBuilder};
