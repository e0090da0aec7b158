//! Graph store configuration

use std::path::Path;

use miette::{NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};

use crate::common::ConfigBuilder;
use crate::constants::limits::{DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_NODES};
use crate::error::{SccError, TomlParseError};

/// What `add_edge` does when the edge is already stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateEdgePolicy {
    /// Store a parallel edge; out-degree counts every copy
    Keep,
    /// Succeed without storing anything
    #[default]
    Ignore,
    /// Fail with [`SccError::DuplicateEdge`]
    Reject,
}

/// Configuration for a [`Graph`](crate::graph::Graph)
///
/// The same values bound every decomposition of the graph: a decomposition
/// refuses snapshots larger than `max_nodes`, and runs a validation pass first
/// when `enable_validation` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    /// Largest accepted node count
    pub max_nodes: usize,
    /// Neighbor slots reserved per node at creation
    pub initial_capacity: usize,
    /// Whether `u -> u` edges may be stored
    pub allow_self_edges: bool,
    /// Handling of repeated `(u, v)` insertions
    pub duplicate_edges: DuplicateEdgePolicy,
    /// Validate adjacency lists before every decomposition
    pub enable_validation: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_NODES,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            allow_self_edges: true,
            duplicate_edges: DuplicateEdgePolicy::default(),
            enable_validation: false,
        }
    }
}

impl GraphConfig {
    pub fn builder() -> GraphConfigBuilder {
        GraphConfigBuilder::new()
    }

    /// Whether parallel copies of an edge can be stored
    pub fn allow_multiple_edges(&self) -> bool {
        self.duplicate_edges == DuplicateEdgePolicy::Keep
    }

    /// Parse a configuration from TOML text
    ///
    /// `name` only labels diagnostics. Missing keys take their defaults.
    pub fn from_toml_str(name: &str, content: &str) -> Result<Self, SccError> {
        let config: GraphConfig = toml::from_str(content).map_err(|e| {
            let span = e
                .span()
                .map(|span| SourceSpan::new(span.start.into(), span.end - span.start));

            SccError::TomlParseError(Box::new(TomlParseError {
                file: name.to_string(),
                source_code: NamedSource::new(name, content.to_string()),
                span,
                source: e,
            }))
        })?;

        config.check()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file
    pub fn from_toml_file(path: &Path) -> Result<Self, SccError> {
        let content = std::fs::read_to_string(path).map_err(|e| SccError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_toml_str(&path.display().to_string(), &content)
    }

    fn check(&self) -> Result<(), SccError> {
        if self.max_nodes == 0 {
            return Err(SccError::ConfigurationError {
                message: "max_nodes must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct GraphConfigBuilder {
    max_nodes: Option<usize>,
    initial_capacity: Option<usize>,
    allow_self_edges: Option<bool>,
    duplicate_edges: Option<DuplicateEdgePolicy>,
    enable_validation: Option<bool>,
}

impl GraphConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = Some(initial_capacity);
        self
    }

    pub fn with_allow_self_edges(mut self, allow_self_edges: bool) -> Self {
        self.allow_self_edges = Some(allow_self_edges);
        self
    }

    pub fn with_duplicate_edges(mut self, duplicate_edges: DuplicateEdgePolicy) -> Self {
        self.duplicate_edges = Some(duplicate_edges);
        self
    }

    /// `true` keeps parallel edges, `false` rejects repeats
    pub fn with_allow_multiple_edges(mut self, allow_multiple_edges: bool) -> Self {
        self.duplicate_edges = Some(if allow_multiple_edges {
            DuplicateEdgePolicy::Keep
        } else {
            DuplicateEdgePolicy::Reject
        });
        self
    }

    pub fn with_enable_validation(mut self, enable_validation: bool) -> Self {
        self.enable_validation = Some(enable_validation);
        self
    }
}

impl ConfigBuilder for GraphConfigBuilder {
    type Config = GraphConfig;

    fn build(self) -> Result<Self::Config, SccError> {
        let defaults = GraphConfig::default();
        let config = GraphConfig {
            max_nodes: self.max_nodes.unwrap_or(defaults.max_nodes),
            initial_capacity: self.initial_capacity.unwrap_or(defaults.initial_capacity),
            allow_self_edges: self.allow_self_edges.unwrap_or(defaults.allow_self_edges),
            duplicate_edges: self.duplicate_edges.unwrap_or(defaults.duplicate_edges),
            enable_validation: self.enable_validation.unwrap_or(defaults.enable_validation),
        };
        config.check()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let config = GraphConfig::default();
        assert_eq!(config.max_nodes, DEFAULT_MAX_NODES);
        assert!(config.allow_self_edges);
        assert_eq!(config.duplicate_edges, DuplicateEdgePolicy::Ignore);
        assert!(!config.allow_multiple_edges());
        assert!(!config.enable_validation);
    }

    #[test]
    fn test_builder_overrides() {
        let config = GraphConfig::builder()
            .with_max_nodes(10)
            .with_allow_self_edges(false)
            .with_allow_multiple_edges(true)
            .build()
            .unwrap();

        assert_eq!(config.max_nodes, 10);
        assert!(!config.allow_self_edges);
        assert_eq!(config.duplicate_edges, DuplicateEdgePolicy::Keep);
        assert_eq!(config.initial_capacity, DEFAULT_INITIAL_CAPACITY);
    }

    #[test]
    fn test_builder_rejects_zero_capacity() {
        let err = GraphConfig::builder().with_max_nodes(0).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = GraphConfig::from_toml_str(
            "graph.toml",
            "max_nodes = 64\nduplicate_edges = \"reject\"\n",
        )
        .unwrap();

        assert_eq!(config.max_nodes, 64);
        assert_eq!(config.duplicate_edges, DuplicateEdgePolicy::Reject);
        assert!(config.allow_self_edges);
    }

    #[test]
    fn test_from_toml_unknown_key() {
        let err = GraphConfig::from_toml_str("graph.toml", "max_node = 3\n").unwrap_err();
        assert!(matches!(err, SccError::TomlParseError(_)));
    }

    #[test]
    fn test_from_toml_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scc.toml");
        fs::write(&path, "allow_self_edges = false\nenable_validation = true\n").unwrap();

        let config = GraphConfig::from_toml_file(&path).unwrap();
        assert!(!config.allow_self_edges);
        assert!(config.enable_validation);
    }

    #[test]
    fn test_from_toml_file_missing() {
        let err = GraphConfig::from_toml_file(Path::new("/nonexistent/scc.toml")).unwrap_err();
        assert!(matches!(err, SccError::FileReadError { .. }));
    }
}
