use std::{fmt::Debug, hash::Hash};

use rand::{Rng, seq::SliceRandom};

use crate::{Edge, GraphError};

/// A trait representing a node identifier in a graph.
///
/// Nodes are the caller's own values, compared by equality and hash, and used
/// directly as keys.  Implemented for every type with the required bounds.
pub trait NodeId: Eq + Hash + Clone + Debug {}

impl<T: Eq + Hash + Clone + Debug> NodeId for T {}

/// A trait representing an edge label.  Implemented for every type with the
/// required bounds.
pub trait Label: Eq + Hash + Clone + Debug {}

impl<T: Eq + Hash + Clone + Debug> Label for T {}

/// Read access to a labeled, weighted multigraph.
///
/// Queries about a node the graph does not contain are not errors: they
/// return nothing, zero or false.  Iteration order is stable between
/// mutations but otherwise unspecified.
pub trait Graph {
    type Node: NodeId;
    type Label: Label;

    /// Returns true if edges point one way only.
    fn is_directed(&self) -> bool;

    /// Returns true if the graph rejects self-loops and parallel edges.
    fn is_simple(&self) -> bool;

    /// Gets the number of nodes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, node: &Self::Node) -> bool;

    /// Gets an iterator over all nodes.
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Gets an iterator over the edges leaving `node`.
    fn edges(&self, node: &Self::Node) -> impl Iterator<Item = &Edge<Self::Node, Self::Label>>;

    /// Gets an iterator over the edges from `from` to `to`, one per label.
    fn edges_between(
        &self,
        from: &Self::Node,
        to: &Self::Node,
    ) -> impl Iterator<Item = &Edge<Self::Node, Self::Label>>;

    /// Gets some edge from `from` to `to`, if there is one.
    fn edge(&self, from: &Self::Node, to: &Self::Node) -> Option<&Edge<Self::Node, Self::Label>> {
        self.edges_between(from, to).next()
    }

    /// Gets the edge from `from` to `to` carrying `label`.
    fn edge_labeled(
        &self,
        from: &Self::Node,
        to: &Self::Node,
        label: &Self::Label,
    ) -> Option<&Edge<Self::Node, Self::Label>>;

    /// Gets an iterator over the distinct nodes `node` has edges to.
    fn successors(&self, node: &Self::Node) -> impl Iterator<Item = &Self::Node>;

    fn is_linked(&self, from: &Self::Node, to: &Self::Node) -> bool {
        self.edge(from, to).is_some()
    }

    /// Number of edges leaving `node`, counting parallel edges separately.
    fn edge_outdegree(&self, node: &Self::Node) -> usize {
        self.edges(node).count()
    }

    /// Number of distinct nodes `node` has edges to.
    fn nodal_outdegree(&self, node: &Self::Node) -> usize {
        self.successors(node).count()
    }

    /// Mean nodal out-degree over all nodes, or zero for an empty graph.
    fn avg_nodal_degree(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let total: usize = self.nodes().map(|n| self.nodal_outdegree(n)).sum();
        total as f64 / self.len() as f64
    }

    fn max_nodal_degree(&self) -> usize {
        self.nodes()
            .map(|n| self.nodal_outdegree(n))
            .max()
            .unwrap_or(0)
    }

    /// Total number of edges.  In an undirected graph each mirrored pair of
    /// halves counts once.
    fn edge_count(&self) -> usize {
        let halves: usize = self.nodes().map(|n| self.edge_outdegree(n)).sum();
        if self.is_directed() {
            halves
        } else {
            let loops: usize = self
                .nodes()
                .map(|n| self.edges_between(n, n).count())
                .sum();
            (halves + loops) / 2
        }
    }

    /// Number of linked node pairs, ignoring labels.  Ordered pairs in a
    /// directed graph, unordered pairs in an undirected one.
    fn link_count(&self) -> usize {
        let halves: usize = self.nodes().map(|n| self.nodal_outdegree(n)).sum();
        if self.is_directed() {
            halves
        } else {
            let loops = self.nodes().filter(|n| self.is_linked(n, n)).count();
            (halves + loops) / 2
        }
    }

    /// Returns the nodes in a fresh random order.  Every call reshuffles.
    fn random_node_iterable<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Self::Node> {
        let mut nodes: Vec<_> = self.nodes().cloned().collect();
        nodes.shuffle(rng);
        nodes
    }

    /// Returns the edges leaving `node` in a fresh random order.
    fn random_edge_iterable<R: Rng + ?Sized>(
        &self,
        node: &Self::Node,
        rng: &mut R,
    ) -> Vec<&Edge<Self::Node, Self::Label>> {
        let mut edges: Vec<_> = self.edges(node).collect();
        edges.shuffle(rng);
        edges
    }
}

/// Mutation of a graph.
///
/// Every change is reported to the graph's observers; [`GraphMut::plug`] and
/// [`GraphMut::unplug`] bracket bulk work so the notifications are coalesced.
pub trait GraphMut: Graph {
    /// Adds a node with no edges.  Returns false if it was already present.
    fn add(&mut self, node: Self::Node) -> bool;

    /// Links `from` to `to` with weight 1.  See [`GraphMut::set_weighted`].
    fn set(
        &mut self,
        from: Self::Node,
        to: Self::Node,
        label: Self::Label,
    ) -> Result<(), GraphError> {
        self.set_weighted(from, to, label, 1)
    }

    /// Creates the edge `(from, to, label)` with the given weight, adding
    /// either node if needed, or updates the weight of the existing edge.
    ///
    /// Fails with [`GraphError::InvalidArgument`] if `weight` is zero, and
    /// with [`GraphError::Unsupported`] if the graph variant cannot hold the
    /// edge.
    fn set_weighted(
        &mut self,
        from: Self::Node,
        to: Self::Node,
        label: Self::Label,
        weight: u32,
    ) -> Result<(), GraphError>;

    /// Removes one edge.  Returns false if it did not exist.
    fn remove_edge(&mut self, from: &Self::Node, to: &Self::Node, label: &Self::Label) -> bool;

    /// Removes every edge from `from` to `to`.  Returns false if there were
    /// none.
    fn remove_edges(&mut self, from: &Self::Node, to: &Self::Node) -> bool;

    /// Removes a node and every edge incident to it.  Returns false if the
    /// node was not present.
    fn remove_node(&mut self, node: &Self::Node) -> bool;

    /// Removes every edge, keeping the nodes.
    fn clear_all_edges(&mut self);

    /// Removes every node and edge.
    fn clear(&mut self);

    /// Starts coalescing change notifications.
    fn plug(&mut self);

    /// Stops coalescing and delivers what was buffered.
    fn unplug(&mut self);
}
