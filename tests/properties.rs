//! Property tests: the decomposition agrees with reachability on random graphs

use std::collections::VecDeque;

use ferris_scc::graph::Graph;
use petgraph::algo::{kosaraju_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use proptest::prelude::*;

type EdgeList = Vec<(usize, usize)>;

fn arb_graph() -> impl Strategy<Value = (usize, EdgeList)> {
    (1usize..40).prop_flat_map(|node_count| {
        (
            Just(node_count),
            prop::collection::vec((0..node_count, 0..node_count), 0..120),
        )
    })
}

fn build(node_count: usize, edges: &EdgeList) -> Graph {
    let mut graph = Graph::with_node_count(node_count).unwrap();
    for &(from, to) in edges {
        graph.add_edge(from, to).unwrap();
    }
    graph
}

/// reachable[u][v] is true when v can be reached from u (u reaches itself)
fn reachability(node_count: usize, edges: &EdgeList) -> Vec<Vec<bool>> {
    let mut successors = vec![Vec::new(); node_count];
    for &(from, to) in edges {
        successors[from].push(to);
    }

    (0..node_count)
        .map(|start| {
            let mut seen = vec![false; node_count];
            let mut queue = VecDeque::from([start]);
            seen[start] = true;
            while let Some(node) = queue.pop_front() {
                for &next in &successors[node] {
                    if !seen[next] {
                        seen[next] = true;
                        queue.push_back(next);
                    }
                }
            }
            seen
        })
        .collect()
}

proptest! {
    #[test]
    fn ids_partition_all_nodes((node_count, edges) in arb_graph()) {
        let index = build(node_count, &edges).decompose().unwrap();
        let component_count = index.component_count();

        prop_assert_eq!(index.scc_ids().len(), node_count);
        prop_assert!(index.scc_ids().iter().all(|&id| id < component_count));

        let mut seen = vec![0usize; node_count];
        for (component, members) in index.components() {
            let members: Vec<_> = members.collect();
            prop_assert!(!members.is_empty());
            for node in members {
                prop_assert_eq!(index.component_of(node).unwrap(), component);
                seen[node] += 1;
            }
        }
        prop_assert!(seen.iter().all(|&count| count == 1));
    }

    #[test]
    fn same_component_is_mutual_reachability((node_count, edges) in arb_graph()) {
        let index = build(node_count, &edges).decompose().unwrap();
        let reachable = reachability(node_count, &edges);

        for u in 0..node_count {
            for v in 0..node_count {
                prop_assert_eq!(
                    index.same_component(u, v),
                    reachable[u][v] && reachable[v][u]
                );
            }
        }
    }

    #[test]
    fn condensation_is_acyclic((node_count, edges) in arb_graph()) {
        let index = build(node_count, &edges).decompose().unwrap();

        prop_assert!(toposort(&index.condensation_graph(), None).is_ok());
        for (from, to) in index.condensation_edges() {
            prop_assert!(from > to);
        }
    }

    #[test]
    fn decomposition_is_deterministic((node_count, edges) in arb_graph()) {
        let graph = build(node_count, &edges);
        let first = graph.decompose().unwrap();
        let second = graph.clone().decompose().unwrap();

        prop_assert_eq!(first.scc_ids(), second.scc_ids());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn component_count_matches_petgraph((node_count, edges) in arb_graph()) {
        let index = build(node_count, &edges).decompose().unwrap();

        let mut reference = DiGraph::<(), ()>::new();
        let nodes: Vec<NodeIndex> = (0..node_count).map(|_| reference.add_node(())).collect();
        for &(from, to) in &edges {
            reference.add_edge(nodes[from], nodes[to], ());
        }

        prop_assert_eq!(index.component_count(), kosaraju_scc(&reference).len());
    }
}
