use std::hash::{Hash, Hasher};

use indexmap::{Equivalent, IndexMap, IndexSet};

use crate::{Edge, Label, NodeId};

/// Borrowed form of an `(N, L)` edge key.  Hashes exactly like the tuple so
/// it can look up owned keys without cloning.
struct EdgeKey<'a, N, L>(&'a N, &'a L);

impl<N: Hash, L: Hash> Hash for EdgeKey<'_, N, L> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
        self.1.hash(state);
    }
}

impl<N: Eq, L: Eq> Equivalent<(N, L)> for EdgeKey<'_, N, L> {
    fn equivalent(&self, key: &(N, L)) -> bool {
        *self.0 == key.0 && *self.1 == key.1
    }
}

/// The outgoing edges of one node.
///
/// `targets` maps each destination to the labels of the edges leading there;
/// `edges` is the flat set of those same edges keyed by `(to, label)`, which
/// owns them and makes enumeration and out-degree independent of how the
/// edges are spread over destinations.  Invariant: both agree exactly and no
/// destination maps to an empty label set.
#[derive(Clone, Debug)]
pub(crate) struct Adjacency<N, L> {
    targets: IndexMap<N, IndexSet<L>>,
    edges: IndexMap<(N, L), Edge<N, L>>,
}

impl<N, L> Default for Adjacency<N, L> {
    fn default() -> Self {
        Self {
            targets: IndexMap::new(),
            edges: IndexMap::new(),
        }
    }
}

impl<N: NodeId, L: Label> Adjacency<N, L> {
    /// Inserts the edge `from -> to` or updates its weight.  Returns true if
    /// the edge did not exist before.
    pub fn set(&mut self, from: &N, to: N, label: L, weight: u32) -> bool {
        if let Some(edge) = self.edges.get_mut(&EdgeKey(&to, &label)) {
            edge.set_weight(weight);
            return false;
        }
        self.targets
            .entry(to.clone())
            .or_default()
            .insert(label.clone());
        let edge = Edge::new(from.clone(), to.clone(), label.clone(), weight);
        self.edges.insert((to, label), edge);
        true
    }

    /// Removes the edge to `to` carrying `label`.
    pub fn remove(&mut self, to: &N, label: &L) -> bool {
        let Some(labels) = self.targets.get_mut(to) else {
            return false;
        };
        if !labels.swap_remove(label) {
            return false;
        }
        if labels.is_empty() {
            self.targets.swap_remove(to);
        }
        let removed = self.edges.swap_remove(&EdgeKey(to, label));
        debug_assert!(removed.is_some(), "edge cache out of step with targets");
        true
    }

    /// Removes every edge to `to`, returning the labels they carried.
    pub fn remove_all(&mut self, to: &N) -> Vec<L> {
        let Some(labels) = self.targets.swap_remove(to) else {
            return Vec::new();
        };
        for label in &labels {
            self.edges.swap_remove(&EdgeKey(to, label));
        }
        labels.into_iter().collect()
    }

    pub fn clear(&mut self) {
        self.targets.clear();
        self.edges.clear();
    }

    pub fn get(&self, to: &N, label: &L) -> Option<&Edge<N, L>> {
        self.edges.get(&EdgeKey(to, label))
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge<N, L>> {
        self.edges.values()
    }

    /// The edges leading to `to`.  Borrows only `self`, keyed through the
    /// stored destination.
    pub fn edges_to<'a>(
        &'a self,
        to: &N,
    ) -> impl Iterator<Item = &'a Edge<N, L>> + use<'a, N, L> {
        self.targets
            .get_key_value(to)
            .into_iter()
            .flat_map(move |(to, labels)| {
                labels
                    .iter()
                    .filter_map(move |label| self.edges.get(&EdgeKey(to, label)))
            })
    }

    pub fn successors(&self) -> impl Iterator<Item = &N> {
        self.targets.keys()
    }

    pub fn is_linked(&self, to: &N) -> bool {
        self.targets.contains_key(to)
    }

    pub fn edge_outdegree(&self) -> usize {
        self.edges.len()
    }

    pub fn nodal_outdegree(&self) -> usize {
        self.targets.len()
    }

    /// Panics unless `targets` and `edges` describe the same edge set, all
    /// leaving `owner`.
    #[cfg(test)]
    pub fn check_consistency(&self, owner: &N) {
        let mut counted = 0;
        for (to, labels) in &self.targets {
            assert!(!labels.is_empty(), "empty label set for {to:?}");
            for label in labels {
                let edge = self.get(to, label).expect("edge missing from cache");
                assert_eq!(edge.from(), owner);
                assert_eq!(edge.to(), to);
                assert_eq!(edge.label(), label);
                counted += 1;
            }
        }
        assert_eq!(counted, self.edges.len());
    }
}
