use std::{fmt::Debug, hash::Hash};

use derivative::Derivative;

/// A directed, labeled, weighted connection between two nodes.
///
/// An edge is identified by its `(from, to, label)` triple: equality and
/// hashing ignore the weight, so a re-weighted edge is still the same edge.
/// Edges are handed out by reference from graph queries; the weight only
/// changes through [`GraphMut::set_weighted`](crate::GraphMut::set_weighted).
#[derive(Derivative)]
#[derivative(
    Clone(bound = "N: Clone, L: Clone"),
    Debug(bound = "N: Debug, L: Debug"),
    Hash(bound = "N: Hash, L: Hash"),
    PartialEq(bound = "N: PartialEq, L: PartialEq"),
    Eq(bound = "N: Eq, L: Eq")
)]
pub struct Edge<N, L> {
    from: N,
    to: N,
    label: L,
    #[derivative(Hash = "ignore", PartialEq = "ignore")]
    weight: u32,
}

impl<N, L> Edge<N, L> {
    pub(crate) fn new(from: N, to: N, label: L, weight: u32) -> Self {
        debug_assert!(weight > 0);
        Self {
            from,
            to,
            label,
            weight,
        }
    }

    /// Gets the node this edge leaves.
    pub fn from(&self) -> &N {
        &self.from
    }

    /// Gets the node this edge enters.
    pub fn to(&self) -> &N {
        &self.to
    }

    pub fn label(&self) -> &L {
        &self.label
    }

    /// Gets the weight, which is always positive.
    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub(crate) fn set_weight(&mut self, weight: u32) {
        debug_assert!(weight > 0);
        self.weight = weight;
    }

    /// Returns true if both ends are the same node.
    pub fn is_self_loop(&self) -> bool
    where
        N: PartialEq,
    {
        self.from == self.to
    }
}
