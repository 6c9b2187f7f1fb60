//! Whole-graph summaries.

use std::collections::BTreeMap;

use crate::Graph;

/// Histogram of nodal out-degree: how many nodes have each degree.  Degrees
/// no node has are absent.
pub fn degree_distribution<G: Graph>(graph: &G) -> BTreeMap<usize, usize> {
    let mut histogram = BTreeMap::new();
    for node in graph.nodes() {
        *histogram.entry(graph.nodal_outdegree(node)).or_insert(0) += 1;
    }
    histogram
}

/// Counts the nodes accepted by `predicate`.
pub fn count<G, P>(graph: &G, mut predicate: P) -> usize
where
    G: Graph,
    P: FnMut(&G::Node) -> bool,
{
    graph.nodes().filter(|n| predicate(n)).count()
}
