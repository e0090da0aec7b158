//! Integration tests for ferris-scc using the library interface

use std::fs;
use std::thread;

use ferris_scc::common::ConfigBuilder;
use ferris_scc::config::{DuplicateEdgePolicy, GraphConfig};
use ferris_scc::graph::{Graph, GraphRenderer};
use ferris_scc::reports::{JsonReportGenerator, ReportGenerator};
use ferris_scc::{ErrorKind, SccDecomposer, decompose_all};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Nodes 0..6: two triangles joined by the bridge 2 -> 3
fn worked_example() -> Graph {
    let mut graph = Graph::with_node_count(6).unwrap();
    for (from, to) in [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3)] {
        graph.add_edge(from, to).unwrap();
    }
    graph
}

#[test]
fn test_worked_example() {
    let index = worked_example().decompose().unwrap();

    assert_eq!(index.component_count(), 2);
    assert!(index.same_component(0, 2));
    assert!(!index.same_component(2, 3));

    let mut components: Vec<Vec<usize>> = index
        .components()
        .map(|(_, members)| members.collect())
        .collect();
    components.sort();
    assert_eq!(components, vec![vec![0, 1, 2], vec![3, 4, 5]]);

    let edges: Vec<_> = index.condensation_edges().collect();
    assert_eq!(
        edges,
        vec![(index.component_of(2).unwrap(), index.component_of(3).unwrap())]
    );
}

#[test]
fn test_mutation_between_decompositions() {
    let mut graph = worked_example();
    let before = graph.decompose().unwrap();
    assert_eq!(before.component_count(), 2);

    // Closing the loop 5 -> 0 merges both triangles
    graph.add_edge(5, 0).unwrap();
    let merged = graph.decompose().unwrap();
    assert_eq!(merged.component_count(), 1);

    graph.remove_edge(5, 0).unwrap();
    let restored = graph.decompose().unwrap();
    assert_eq!(restored.scc_ids(), before.scc_ids());
}

#[test]
fn test_large_chain_decomposes_without_recursion() {
    let node_count = 500_000;
    let mut graph = Graph::with_node_count(node_count).unwrap();
    for node in 1..node_count {
        graph.add_edge(node - 1, node).unwrap();
    }

    let index = graph.decompose().unwrap();
    assert_eq!(index.component_count(), node_count);
    assert!(!index.has_cycles());
    assert_eq!(index.condensation_edges().count(), node_count - 1);
}

#[test]
fn test_save_and_load_preserve_decomposition() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tasks.graph");

    let graph = worked_example();
    graph.save(&path).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 8 + 8 * graph.edge_count());

    let loaded = Graph::load(&path, GraphConfig::default()).unwrap();
    assert_eq!(loaded.node_count(), graph.node_count());
    assert_eq!(
        loaded.edges().collect::<Vec<_>>(),
        graph.edges().collect::<Vec<_>>()
    );
    assert_eq!(
        loaded.decompose().unwrap().scc_ids(),
        graph.decompose().unwrap().scc_ids()
    );
}

#[test]
fn test_load_missing_and_truncated_files() {
    let temp_dir = TempDir::new().unwrap();

    let missing = Graph::load(&temp_dir.path().join("absent.graph"), GraphConfig::default())
        .unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::Io);

    let path = temp_dir.path().join("short.graph");
    worked_example().save(&path).unwrap();
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() - 3]).unwrap();

    let truncated = Graph::load(&path, GraphConfig::default()).unwrap_err();
    assert_eq!(truncated.kind(), ErrorKind::Io);
}

#[test]
fn test_load_applies_configuration() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("loops.graph");

    let mut graph = Graph::with_node_count(3).unwrap();
    graph.add_edge(2, 2).unwrap();
    graph.save(&path).unwrap();

    let strict = GraphConfig::builder()
        .with_allow_self_edges(false)
        .build()
        .unwrap();
    let err = Graph::load(&path, strict).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SelfEdgeRejected);
}

#[test]
fn test_config_file_drives_graph_behavior() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("scc.toml");
    fs::write(
        &path,
        "max_nodes = 8\nduplicate_edges = \"reject\"\nenable_validation = true\n",
    )
    .unwrap();

    let config = GraphConfig::from_toml_file(&path).unwrap();
    assert_eq!(config.duplicate_edges, DuplicateEdgePolicy::Reject);

    let err = Graph::new(9, config.clone()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);

    let mut graph = Graph::new(8, config).unwrap();
    graph.add_edge(0, 1).unwrap();
    assert_eq!(
        graph.add_edge(0, 1).unwrap_err().kind(),
        ErrorKind::DuplicateEdge
    );
    assert_eq!(graph.decompose().unwrap().component_count(), 8);
}

#[test]
fn test_parallel_edges_do_not_change_partition() {
    let config = GraphConfig::builder()
        .with_allow_multiple_edges(true)
        .build()
        .unwrap();
    let mut graph = Graph::new(3, config).unwrap();
    for (from, to) in [(0, 1), (0, 1), (1, 0), (1, 2), (1, 2)] {
        graph.add_edge(from, to).unwrap();
    }

    let index = graph.decompose().unwrap();
    assert_eq!(index.component_count(), 2);
    assert_eq!(index.stats().edges_examined, 5);
    assert_eq!(index.condensation_edges().count(), 1);
}

#[test]
fn test_independent_graphs_decompose_concurrently() {
    let handles: Vec<_> = (0..4)
        .map(|shift| {
            thread::spawn(move || {
                let node_count = 1_000 + shift;
                let mut graph = Graph::with_node_count(node_count).unwrap();
                for node in 0..node_count {
                    graph.add_edge(node, (node + 1) % node_count).unwrap();
                }
                graph.decompose().unwrap().component_count()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }

    let graphs: Vec<Graph> = (1..=8).map(|n| Graph::with_node_count(n).unwrap()).collect();
    let counts: Vec<usize> = decompose_all(&graphs)
        .into_iter()
        .map(|result| result.unwrap().component_count())
        .collect();
    assert_eq!(counts, (1..=8).collect::<Vec<_>>());
}

#[test]
fn test_decomposer_capacity_is_independent_of_graph() {
    let graph = worked_example();
    let err = SccDecomposer::new()
        .with_max_nodes(3)
        .decompose(&graph.snapshot())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
}

#[test]
fn test_reports_and_rendering_end_to_end() {
    let graph = worked_example();
    let index = graph.decompose().unwrap();

    let report = JsonReportGenerator::new().generate_report(&index).unwrap();
    let json: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(json["cycle_count"], 2);
    assert_eq!(json["node_count"], 6);

    let mut dot = Vec::new();
    GraphRenderer::new(true)
        .render_dot(&graph, &index, &mut dot)
        .unwrap();
    let dot = String::from_utf8(dot).unwrap();
    assert!(dot.contains("subgraph cluster_0"));
    assert!(dot.contains("subgraph cluster_1"));
    assert_eq!(dot.matches(" -> ").count(), graph.edge_count());
}
