use std::collections::HashSet;
use std::fmt::Debug;

use quickcheck::{Arbitrary, Gen};

use crate::prelude::*;
use crate::tracing_support::{info_span, init_tracing};

/// Number of distinct node values used by generated operations; small so
/// that operations collide often.
const NODE_DOMAIN: u32 = 8;

/// One mutation applied by property tests.
#[derive(Clone, Debug)]
pub enum Op {
    Set { from: u32, to: u32, label: u8, weight: u32 },
    RemoveEdge { from: u32, to: u32, label: u8 },
    RemoveEdges { from: u32, to: u32 },
    RemoveNode(u32),
    Add(u32),
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut node = || u32::arbitrary(g) % NODE_DOMAIN;
        let (from, to) = (node(), node());
        let label = u8::arbitrary(g) % 3;
        match u8::arbitrary(g) % 10 {
            0..=4 => Op::Set {
                from,
                to,
                label,
                weight: u32::arbitrary(g) % 5 + 1,
            },
            5 | 6 => Op::RemoveEdge { from, to, label },
            7 => Op::RemoveEdges { from, to },
            8 => Op::RemoveNode(from),
            _ => Op::Add(from),
        }
    }
}

impl Op {
    pub fn apply<G>(&self, graph: &mut G)
    where
        G: GraphMut<Node = u32, Label = u8>,
    {
        match *self {
            Op::Set {
                from,
                to,
                label,
                weight,
            } => match graph.set_weighted(from, to, label, weight) {
                Ok(()) | Err(GraphError::Unsupported(_)) => {}
                Err(e) => panic!("unexpected {e}"),
            },
            Op::RemoveEdge { from, to, label } => {
                graph.remove_edge(&from, &to, &label);
            }
            Op::RemoveEdges { from, to } => {
                graph.remove_edges(&from, &to);
            }
            Op::RemoveNode(node) => {
                graph.remove_node(&node);
            }
            Op::Add(node) => {
                graph.add(node);
            }
        }
    }
}

/// A graph built by a random interleaving of mutations.
#[derive(Debug, Clone)]
pub struct ArbGraph<G> {
    pub graph: G,
    pub ops: Vec<Op>,
}

impl<G> ArbGraph<G>
where
    G: GraphMut<Node = u32, Label = u8> + Default,
{
    pub fn from_ops(ops: Vec<Op>) -> Self {
        let mut graph = G::default();
        for op in &ops {
            op.apply(&mut graph);
        }
        ArbGraph { graph, ops }
    }
}

impl<G> Arbitrary for ArbGraph<G>
where
    G: GraphMut<Node = u32, Label = u8> + Default + Clone + Debug + 'static,
{
    fn arbitrary(g: &mut Gen) -> Self {
        let num_ops = usize::arbitrary(g) % 60;
        Self::from_ops((0..num_ops).map(|_| Op::arbitrary(g)).collect())
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let ops = self.ops.clone();
        Box::new((0..ops.len()).rev().map(move |i| {
            let mut fewer = ops.clone();
            fewer.remove(i);
            Self::from_ops(fewer)
        }))
    }
}

/// Checks the bookkeeping a graph must maintain after any sequence of
/// mutations.
pub fn check_graph_consistency<G: Graph>(graph: &G) {
    init_tracing();

    for node in graph.nodes() {
        {
            let _span = info_span!("edge_outdegree").entered();
            assert_eq!(graph.edge_outdegree(node), graph.edges(node).count());
        }

        {
            let _span = info_span!("nodal_outdegree").entered();
            let successors: Vec<_> = graph.successors(node).collect();
            assert_eq!(graph.nodal_outdegree(node), successors.len());
            let distinct: HashSet<_> = successors.iter().collect();
            assert_eq!(distinct.len(), successors.len());
        }

        for successor in graph.successors(node) {
            assert!(graph.contains(successor), "dangling successor {successor:?}");
            assert!(graph.is_linked(node, successor));
            assert!(graph.edges_between(node, successor).count() > 0);
        }
    }

    for node in graph.nodes() {
        for edge in graph.edges(node) {
            assert_eq!(edge.from(), node);
            assert!(edge.weight() > 0);
            let _span = info_span!("edge_lookup").entered();
            let found = graph.edge_labeled(edge.from(), edge.to(), edge.label());
            assert_eq!(found.map(Edge::weight), Some(edge.weight()));

            if !graph.is_directed() {
                let mirror = graph.edge_labeled(edge.to(), edge.from(), edge.label());
                assert_eq!(
                    mirror.map(Edge::weight),
                    Some(edge.weight()),
                    "missing mirror of {edge:?}"
                );
            }
            if graph.is_simple() {
                assert!(!edge.is_self_loop());
                assert_eq!(graph.edges_between(edge.from(), edge.to()).count(), 1);
            }
        }
    }

    assert!(graph.link_count() <= graph.edge_count());
    assert_eq!(graph.is_empty(), graph.len() == 0);
    assert_eq!(graph.nodes().count(), graph.len());
}
