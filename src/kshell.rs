//! k-shell decomposition by iterative peeling.

use bitvec::vec::BitVec;
use indexmap::IndexMap;

use crate::{
    Graph,
    tracing_support::{debug, info_span},
};

/// Shell index of every node and the largest one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KShell<N: crate::NodeId> {
    shells: IndexMap<N, usize>,
    degeneracy: usize,
}

impl<N: crate::NodeId> KShell<N> {
    /// Gets the shell a node was peeled in.
    pub fn shell(&self, node: &N) -> Option<usize> {
        self.shells.get(node).copied()
    }

    /// Iterates over `(node, shell)` in graph order.
    pub fn shells(&self) -> impl Iterator<Item = (&N, usize)> {
        self.shells.iter().map(|(n, k)| (n, *k))
    }

    /// The highest threshold at which a node was peeled; zero for an empty
    /// graph.
    pub fn degeneracy(&self) -> usize {
        self.degeneracy
    }
}

/// Peels the graph in order of increasing threshold.
///
/// Every node starts with its nodal out-degree.  At each threshold, nodes
/// whose value is at most the threshold are marked removed and each of their
/// unremoved successors loses one, never dropping below the threshold.
/// Sweeps repeat at a threshold until nothing more is removed.  The graph
/// itself is not modified.
pub fn kshell<G: Graph>(graph: &G) -> KShell<G::Node> {
    let _span = info_span!("kshell").entered();
    let index: IndexMap<&G::Node, usize> = graph.nodes().enumerate().map(|(i, n)| (n, i)).collect();
    let mut k: Vec<usize> = index.keys().map(|n| graph.nodal_outdegree(n)).collect();
    let mut removed: BitVec = BitVec::repeat(false, index.len());
    let mut remaining = index.len();
    let mut threshold = 0;
    let mut degeneracy = 0;

    while remaining > 0 {
        loop {
            let mut peeled = false;
            for (node, &i) in &index {
                if removed[i] || k[i] > threshold {
                    continue;
                }
                removed.set(i, true);
                remaining -= 1;
                peeled = true;
                degeneracy = threshold;
                for successor in graph.successors(node) {
                    let Some(&j) = index.get(successor) else {
                        continue;
                    };
                    if !removed[j] {
                        k[j] = threshold.max(k[j].saturating_sub(1));
                    }
                }
            }
            if !peeled {
                break;
            }
        }
        threshold += 1;
    }

    debug!(nodes = index.len(), degeneracy, "k-shell decomposition");
    let shells = index.into_iter().map(|(n, i)| (n.clone(), k[i])).collect();
    KShell { shells, degeneracy }
}
