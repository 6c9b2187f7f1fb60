use std::fmt::Debug;
use std::marker::PhantomData;

use quickcheck::{Arbitrary, Gen};

use crate::generate_large_graph::generate_large_graph;
use crate::graph_test_support::{ArbGraph, check_graph_consistency};
use crate::prelude::*;

/// An edge to probe a generated graph with.
#[derive(Clone, Debug)]
pub struct Probe {
    pub from: u32,
    pub to: u32,
    pub label: u8,
    pub w1: u32,
    pub w2: u32,
}

impl Arbitrary for Probe {
    fn arbitrary(g: &mut Gen) -> Self {
        Probe {
            from: u32::arbitrary(g) % 8,
            to: u32::arbitrary(g) % 8,
            label: u8::arbitrary(g) % 3,
            w1: u32::arbitrary(g) % 9 + 1,
            w2: u32::arbitrary(g) % 9 + 1,
        }
    }
}

/// Properties every graph variant must satisfy, instantiated per variant by
/// [`graph_tests!`](crate::graph_tests!).
pub struct GraphTests<G>(PhantomData<G>);

impl<G> GraphTests<G>
where
    G: GraphMut<Node = u32, Label = u8> + Default + Clone + Debug + 'static,
{
    pub fn prop_consistent_after_mutations(ArbGraph { graph, .. }: ArbGraph<G>) -> bool {
        check_graph_consistency(&graph);
        true
    }

    pub fn prop_idempotent_weight_update(
        ArbGraph { mut graph, .. }: ArbGraph<G>,
        p: Probe,
    ) -> bool {
        if graph.set_weighted(p.from, p.to, p.label, p.w1).is_err() {
            // Rejected by a simple graph; nothing to update.
            return true;
        }
        let nodes = graph.len();
        let edges = graph.edge_count();
        if graph.set_weighted(p.from, p.to, p.label, p.w2).is_err() {
            return false;
        }
        check_graph_consistency(&graph);
        graph.len() == nodes
            && graph.edge_count() == edges
            && graph.edge_labeled(&p.from, &p.to, &p.label).map(Edge::weight) == Some(p.w2)
    }

    pub fn prop_remove_node_removes_incident(
        ArbGraph { mut graph, .. }: ArbGraph<G>,
        p: Probe,
    ) -> bool {
        let node = p.from;
        let present = graph.contains(&node);
        if graph.remove_node(&node) != present {
            return false;
        }
        check_graph_consistency(&graph);
        !graph.contains(&node)
            && graph
                .nodes()
                .all(|n| graph.edges(n).all(|e| e.to() != &node))
    }

    pub fn prop_remove_edges_unlinks_pair(ArbGraph { mut graph, .. }: ArbGraph<G>, p: Probe) -> bool {
        let linked = graph.is_linked(&p.from, &p.to);
        if graph.remove_edges(&p.from, &p.to) != linked {
            return false;
        }
        check_graph_consistency(&graph);
        !graph.is_linked(&p.from, &p.to)
            && (graph.is_directed() || !graph.is_linked(&p.to, &p.from))
    }

    pub fn prop_set_then_remove_edge(ArbGraph { mut graph, .. }: ArbGraph<G>, p: Probe) -> bool {
        let existed = graph.edge_labeled(&p.from, &p.to, &p.label).is_some();
        let before = graph.edge_count();
        match graph.set_weighted(p.from, p.to, p.label, p.w1) {
            Ok(()) => {}
            Err(e) => return e.is_unsupported() && graph.edge_count() == before,
        }
        let after_set = graph.edge_count();
        if after_set != before + usize::from(!existed) {
            return false;
        }
        graph.remove_edge(&p.from, &p.to, &p.label)
            && graph.edge_labeled(&p.from, &p.to, &p.label).is_none()
            && graph.edge_count() == after_set - 1
    }

    pub fn prop_clear_all_edges_keeps_nodes(ArbGraph { mut graph, .. }: ArbGraph<G>) -> bool {
        let nodes = graph.len();
        graph.clear_all_edges();
        check_graph_consistency(&graph);
        graph.len() == nodes && graph.edge_count() == 0 && graph.link_count() == 0
    }

    pub fn test_large_graph_structure() {
        let mut graph = G::default();
        generate_large_graph(&mut graph, |i| (i % 3) as u8);
        check_graph_consistency(&graph);
        assert!(graph.len() > 0);
        assert!(graph.edge_count() > 0);
    }

    pub fn test_deconstruct_by_nodes() {
        let mut graph = G::default();
        generate_large_graph(&mut graph, |i| (i % 3) as u8);
        let nodes: Vec<u32> = graph.nodes().cloned().collect();
        for node in nodes {
            assert!(graph.remove_node(&node));
            check_graph_consistency(&graph);
        }
        assert!(graph.is_empty());
    }
}

#[macro_export]
macro_rules! graph_tests {
    ($name:ident, $graph:ty) => {
        mod $name {
            use super::*;
            use $crate::graph_tests::GraphTests;

            macro_rules! quickcheck_test {
                ($test_name:ident) => {
                    #[test]
                    fn $test_name() {
                        let f: fn(_) -> _ = GraphTests::<$graph>::$test_name;
                        quickcheck::quickcheck(f);
                    }
                };
                ($test_name:ident, probe) => {
                    #[test]
                    fn $test_name() {
                        let f: fn(_, _) -> _ = GraphTests::<$graph>::$test_name;
                        quickcheck::quickcheck(f);
                    }
                };
            }

            macro_rules! plain_test {
                ($test_name:ident) => {
                    #[test]
                    fn $test_name() {
                        GraphTests::<$graph>::$test_name();
                    }
                };
            }

            quickcheck_test!(prop_consistent_after_mutations);
            quickcheck_test!(prop_clear_all_edges_keeps_nodes);
            quickcheck_test!(prop_idempotent_weight_update, probe);
            quickcheck_test!(prop_remove_node_removes_incident, probe);
            quickcheck_test!(prop_remove_edges_unlinks_pair, probe);
            quickcheck_test!(prop_set_then_remove_edge, probe);

            plain_test!(test_large_graph_structure);
            plain_test!(test_deconstruct_by_nodes);
        }
    };
}
