//! Differences between two graphs over the same node type.

use indexmap::IndexSet;

use crate::{Edge, Graph};

/// Which of the two compared graphs something was found in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Old,
    New,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DiffEvent<'a, N, L> {
    NodeOnlyIn(Side, &'a N),
    EdgeOnlyIn(Side, &'a Edge<N, L>),
    /// The same `(from, to, label)` edge with different weights.
    WeightChanged {
        old: &'a Edge<N, L>,
        new: &'a Edge<N, L>,
    },
}

/// Reports everything that differs between `old` and `new` to `visitor`,
/// and returns the number of events.
///
/// Nodes are visited in `old`'s order, then the nodes only `new` has.  A
/// node present on one side only is reported along with every edge leaving
/// it.  Edges are compared per node, so an undirected edge is reported once
/// for each of its halves.
pub fn graph_diff<'a, G, H, V>(old: &'a G, new: &'a H, mut visitor: V) -> usize
where
    G: Graph,
    H: Graph<Node = G::Node, Label = G::Label>,
    V: FnMut(DiffEvent<'a, G::Node, G::Label>),
{
    let mut events = 0;
    let mut emit = |event| {
        events += 1;
        visitor(event);
    };

    let all: IndexSet<&G::Node> = old.nodes().chain(new.nodes()).collect();
    for node in all {
        match (old.contains(node), new.contains(node)) {
            (true, true) => {
                for edge in old.edges(node) {
                    match new.edge_labeled(edge.from(), edge.to(), edge.label()) {
                        None => emit(DiffEvent::EdgeOnlyIn(Side::Old, edge)),
                        Some(other) if other.weight() != edge.weight() => {
                            emit(DiffEvent::WeightChanged { old: edge, new: other })
                        }
                        Some(_) => {}
                    }
                }
                for edge in new.edges(node) {
                    if old.edge_labeled(edge.from(), edge.to(), edge.label()).is_none() {
                        emit(DiffEvent::EdgeOnlyIn(Side::New, edge));
                    }
                }
            }
            (true, false) => {
                emit(DiffEvent::NodeOnlyIn(Side::Old, node));
                for edge in old.edges(node) {
                    emit(DiffEvent::EdgeOnlyIn(Side::Old, edge));
                }
            }
            (false, true) => {
                emit(DiffEvent::NodeOnlyIn(Side::New, node));
                for edge in new.edges(node) {
                    emit(DiffEvent::EdgeOnlyIn(Side::New, edge));
                }
            }
            (false, false) => {}
        }
    }
    events
}
