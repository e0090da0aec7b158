//! Error types for graph construction, decomposition and persistence
//!
//! Every recoverable failure is an [`SccError`]. Broken internal invariants
//! (for example a neighbor id outside `[0, n)` reaching the traversal) are not
//! represented here: they panic, because continuing would silently produce a
//! wrong partition.

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::core::{ComponentId, NodeId};

pub type Result<T, E = SccError> = std::result::Result<T, E>;

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid TOML syntax in '{file}'")]
#[diagnostic(
    code(ferris_scc::toml_parse_error),
    help("Check the TOML syntax near the highlighted position")
)]
pub struct TomlParseError {
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("syntax error here")]
    pub span: Option<SourceSpan>,
    #[source]
    pub source: toml::de::Error,
}

/// Coarse error categories callers can match on without caring about the
/// exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    OutOfRange,
    CapacityExceeded,
    SelfEdgeRejected,
    DuplicateEdge,
    GraphEmpty,
    Io,
    Validation,
    Configuration,
    Serialization,
}

#[derive(Error, Debug, Diagnostic)]
pub enum SccError {
    #[error("Invalid node count {node_count}: a graph needs at least one node")]
    #[diagnostic(
        code(ferris_scc::invalid_node_count),
        help("Create the graph with a positive node count")
    )]
    InvalidNodeCount { node_count: usize },

    #[error("Node {node} is out of range for a graph of {node_count} nodes")]
    #[diagnostic(
        code(ferris_scc::node_out_of_range),
        help("Node ids must lie in [0, node_count)")
    )]
    NodeOutOfRange { node: NodeId, node_count: usize },

    #[error("Node {node} is not part of this decomposition ({node_count} nodes)")]
    #[diagnostic(
        code(ferris_scc::unknown_node),
        help("Query the index with a node id of the decomposed graph")
    )]
    UnknownNode { node: NodeId, node_count: usize },

    #[error("Component {component} does not exist ({component_count} components)")]
    #[diagnostic(
        code(ferris_scc::unknown_component),
        help("Component ids must lie in [0, component_count)")
    )]
    UnknownComponent {
        component: ComponentId,
        component_count: usize,
    },

    #[error("Requested {requested} nodes, but the configured maximum is {max_nodes}")]
    #[diagnostic(
        code(ferris_scc::capacity_exceeded),
        help("Raise `max_nodes` in the graph configuration or shard the input")
    )]
    CapacityExceeded { requested: usize, max_nodes: usize },

    #[error("Self edge on node {node} rejected")]
    #[diagnostic(
        code(ferris_scc::self_edge_rejected),
        help("Enable `allow_self_edges` to store self-loops")
    )]
    SelfEdgeRejected { node: NodeId },

    #[error("Edge {from} -> {to} already exists")]
    #[diagnostic(
        code(ferris_scc::duplicate_edge),
        help("Set `duplicate_edges` to \"keep\" or \"ignore\" to accept repeated edges")
    )]
    DuplicateEdge { from: NodeId, to: NodeId },

    #[error("Cannot decompose a graph without nodes")]
    #[diagnostic(code(ferris_scc::graph_empty))]
    GraphEmpty,

    #[error("Failed to read graph file '{path}'")]
    #[diagnostic(
        code(ferris_scc::io_error),
        help("Check if the file exists and you have read permissions")
    )]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write graph file '{path}'")]
    #[diagnostic(
        code(ferris_scc::io_error),
        help("Check file permissions and disk space")
    )]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt graph data: {message}")]
    #[diagnostic(
        code(ferris_scc::corrupt_graph_file),
        help("The file is truncated or was not written by `Graph::save`")
    )]
    CorruptGraphFile { message: String },

    #[error("IO error")]
    #[diagnostic(
        code(ferris_scc::io_error),
        help("Check file permissions and disk space")
    )]
    Io(#[from] std::io::Error),

    #[error("Graph validation failed: {message}")]
    #[diagnostic(
        code(ferris_scc::invalid_graph),
        help("The adjacency lists violate the graph configuration")
    )]
    InvalidGraph { message: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    TomlParseError(Box<TomlParseError>),

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(ferris_scc::config_error),
        help("Check your graph configuration values")
    )]
    ConfigurationError { message: String },

    #[error("JSON serialization error")]
    #[diagnostic(
        code(ferris_scc::json_error),
        help("This is likely an internal error - please report it")
    )]
    Json(#[from] serde_json::Error),

    #[error("String formatting error")]
    #[diagnostic(
        code(ferris_scc::fmt_error),
        help("This is likely an internal error - please report it")
    )]
    Fmt(#[from] std::fmt::Error),
}

impl SccError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SccError::InvalidNodeCount { .. } | SccError::NodeOutOfRange { .. } => {
                ErrorKind::InvalidArgument
            }
            SccError::UnknownNode { .. } | SccError::UnknownComponent { .. } => {
                ErrorKind::OutOfRange
            }
            SccError::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            SccError::SelfEdgeRejected { .. } => ErrorKind::SelfEdgeRejected,
            SccError::DuplicateEdge { .. } => ErrorKind::DuplicateEdge,
            SccError::GraphEmpty => ErrorKind::GraphEmpty,
            SccError::FileReadError { .. }
            | SccError::FileWriteError { .. }
            | SccError::CorruptGraphFile { .. }
            | SccError::Io(_) => ErrorKind::Io,
            SccError::InvalidGraph { .. } => ErrorKind::Validation,
            SccError::TomlParseError(_) | SccError::ConfigurationError { .. } => {
                ErrorKind::Configuration
            }
            SccError::Json(_) | SccError::Fmt(_) => ErrorKind::Serialization,
        }
    }
}
