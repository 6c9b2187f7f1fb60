//! Shortest-path trees with equal-cost multipath.

use std::{
    cmp::{Ordering, Reverse},
    collections::{BinaryHeap, HashSet, VecDeque},
};

use indexmap::{IndexMap, IndexSet};

use crate::{
    Edge, Graph,
    path::Path,
    tracing_support::{debug, info_span},
};

/// Per-node state of the tree: best known cost and every edge reaching the
/// node at that cost.
struct SpfNode<'g, N, L> {
    cost: u64,
    parents: Vec<&'g Edge<N, L>>,
    settled: bool,
}

/// Priority-queue entry.  Ordered by cost, then by insertion sequence.
struct Candidate<N> {
    cost: u64,
    seq: u64,
    node: N,
}

impl<N> PartialEq for Candidate<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N> Eq for Candidate<N> {}

impl<N> PartialOrd for Candidate<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N> Ord for Candidate<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.cost, self.seq).cmp(&(other.cost, other.seq))
    }
}

/// Builds a shortest-path tree from a root over a borrowed graph.
///
/// Every node records all parent edges that reach it at minimal cost, so
/// [`ShortestPathFirst::edges`] can report every equal-cost path while
/// [`ShortestPathFirst::path`] follows the first one found.  Ties between
/// equal-cost queue entries resolve in discovery order; nothing else about
/// that order is guaranteed.
pub struct ShortestPathFirst<'g, G: Graph> {
    graph: &'g G,
    root: Option<G::Node>,
    tree: IndexMap<G::Node, SpfNode<'g, G::Node, G::Label>>,
}

impl<'g, G: Graph> ShortestPathFirst<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            root: None,
            tree: IndexMap::new(),
        }
    }

    /// Computes the tree rooted at `root`, discarding any previous run.
    pub fn run(&mut self, root: &G::Node) {
        let _span = info_span!("spf_run").entered();
        let graph = self.graph;
        self.tree.clear();
        self.root = Some(root.clone());
        self.tree.insert(
            root.clone(),
            SpfNode {
                cost: 0,
                parents: Vec::new(),
                settled: false,
            },
        );

        let mut seq = 0;
        let mut queue = BinaryHeap::new();
        queue.push(Reverse(Candidate {
            cost: 0,
            seq,
            node: root.clone(),
        }));

        while let Some(Reverse(candidate)) = queue.pop() {
            let Some(current) = self.tree.get_mut(&candidate.node) else {
                continue;
            };
            // Superseded by a cheaper entry, or already explored.
            if current.settled || current.cost != candidate.cost {
                continue;
            }
            current.settled = true;
            let base = current.cost;

            for edge in graph.edges(&candidate.node) {
                let cost = base + u64::from(edge.weight());
                let requeue = match self.tree.get_mut(edge.to()) {
                    None => {
                        self.tree.insert(
                            edge.to().clone(),
                            SpfNode {
                                cost,
                                parents: vec![edge],
                                settled: false,
                            },
                        );
                        true
                    }
                    Some(known) if cost < known.cost => {
                        known.cost = cost;
                        known.parents = vec![edge];
                        true
                    }
                    Some(known) if cost == known.cost => {
                        known.parents.push(edge);
                        false
                    }
                    Some(_) => false,
                };
                if requeue {
                    seq += 1;
                    queue.push(Reverse(Candidate {
                        cost,
                        seq,
                        node: edge.to().clone(),
                    }));
                }
            }
        }
        debug!(root = ?root, reached = self.tree.len(), "shortest-path tree built");
    }

    /// Gets the root of the last run.
    pub fn root(&self) -> Option<&G::Node> {
        self.root.as_ref()
    }

    /// Gets the cost of the cheapest path to `to`, if it was reached.
    pub fn cost(&self, to: &G::Node) -> Option<u64> {
        self.tree.get(to).map(|n| n.cost)
    }

    /// Returns one cheapest path from the root to `to`, following the first
    /// recorded parent at every hop, or `None` if `to` was not reached.  The
    /// path to the root itself is empty.
    pub fn path(&self, to: &G::Node) -> Option<Path<'_, G::Node, G::Label>> {
        let root = self.root.as_ref()?;
        let mut node = self.tree.get(to)?;
        let mut edges = Vec::new();
        while let Some(&parent) = node.parents.first() {
            edges.push(parent);
            node = self.tree.get(parent.from())?;
        }
        edges.reverse();
        Some(Path::from_edges(root, edges))
    }

    /// Returns every edge lying on some cheapest path from the root to `to`,
    /// or nothing if `to` was not reached.
    pub fn edges(&self, to: &G::Node) -> Vec<&'g Edge<G::Node, G::Label>> {
        let Some(start) = self.tree.get_key_value(to).map(|(k, _)| k) else {
            return Vec::new();
        };
        let mut found = IndexSet::new();
        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            let Some(entry) = self.tree.get(node) else {
                continue;
            };
            for &parent in &entry.parents {
                found.insert(parent);
                if visited.insert(parent.from()) {
                    queue.push_back(parent.from());
                }
            }
        }
        found.into_iter().collect()
    }

    /// Returns every parent edge in the tree, the union of all equal-cost
    /// shortest paths from the root.
    pub fn tree_edges(&self) -> impl Iterator<Item = &'g Edge<G::Node, G::Label>> + '_ {
        self.tree.values().flat_map(|n| n.parents.iter().copied())
    }

    /// Returns the node one hop from the root on [`Self::path`] to `to`.
    /// `None` if `to` is the root or was not reached.
    pub fn nexthop(&self, to: &G::Node) -> Option<&G::Node> {
        let path = self.path(to)?;
        path.edges().next().map(|e| e.to())
    }

    /// Returns the node just before `to` on [`Self::path`] to `to`.
    pub fn previous_hop(&self, to: &G::Node) -> Option<&'g G::Node> {
        self.tree.get(to)?.parents.first().map(|e| e.from())
    }
}
