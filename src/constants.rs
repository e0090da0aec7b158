//! Configuration constants for ferris-scc
//!
//! Defaults used by [`GraphConfig`](crate::config::GraphConfig) and the
//! persisted graph layout.

/// Graph capacity defaults
pub mod limits {
    /// Largest node count accepted when no explicit maximum is configured
    pub const DEFAULT_MAX_NODES: usize = 1_000_000;

    /// Neighbor slots reserved per node when a graph is created
    pub const DEFAULT_INITIAL_CAPACITY: usize = 4;
}

/// Binary graph file layout
pub mod file_format {
    /// `[node_count: u32][edge_count: u32]`
    pub const HEADER_LEN: usize = 8;

    /// One `(u32, u32)` edge record
    pub const EDGE_RECORD_LEN: usize = 8;
}

/// Output formatting configuration
pub mod output {
    /// Maximum number of members listed per component in the human report
    pub const MAX_LISTED_MEMBERS: usize = 20;
}
