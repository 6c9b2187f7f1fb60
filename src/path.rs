use std::{fmt::Debug, iter::once};

use crate::{Edge, NodeId};

/// A walk through a graph, represented as a sequence of nodes and the edges
/// that connect them.  Borrows from the graph it was found in.
pub struct Path<'g, N, L> {
    edges: Vec<&'g Edge<N, L>>,
    nodes: Vec<&'g N>,
}

impl<'g, N: NodeId, L> Path<'g, N, L> {
    /// Creates a new path starting at the given node.
    pub fn new(start: &'g N) -> Self {
        Self {
            edges: Vec::new(),
            nodes: vec![start],
        }
    }

    pub fn from_edges(start: &'g N, edges: impl IntoIterator<Item = &'g Edge<N, L>>) -> Self {
        let mut path = Self::new(start);
        for edge in edges {
            path.add_edge(edge);
        }
        path
    }

    /// Returns the first node in the path.
    pub fn first_node(&self) -> &'g N {
        self.nodes[0]
    }

    /// Returns the last node in the path.
    pub fn last_node(&self) -> &'g N {
        self.nodes[self.nodes.len() - 1]
    }

    /// Returns an iterator over the edges in the path.
    pub fn edges(&self) -> impl Iterator<Item = &'g Edge<N, L>> + '_ {
        self.edges.iter().copied()
    }

    /// Returns an iterator over the nodes in the path.
    pub fn nodes(&self) -> impl Iterator<Item = &'g N> + '_ {
        self.nodes.iter().copied()
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Sum of the edge weights.
    pub fn cost(&self) -> u64 {
        self.edges.iter().map(|e| u64::from(e.weight())).sum()
    }

    /// Returns the nodes along with the edges entering and leaving them.
    /// The first node has no incoming edge and the last no outgoing one.
    #[allow(clippy::type_complexity)]
    pub fn nodes_with_edges(
        &self,
    ) -> impl Iterator<Item = (Option<&'g Edge<N, L>>, &'g N, Option<&'g Edge<N, L>>)> + '_ {
        let incoming = once(None).chain(self.edges.iter().copied().map(Some));
        let outgoing = self.edges.iter().copied().map(Some).chain(once(None));
        incoming
            .zip(outgoing)
            .zip(self.nodes.iter().copied())
            .map(|((in_edge, out_edge), node)| (in_edge, node, out_edge))
    }

    /// Adds an edge to the end of the path.  Panics if the edge does not
    /// leave the current last node.
    pub fn add_edge(&mut self, edge: &'g Edge<N, L>) {
        assert_eq!(edge.from(), self.last_node());
        self.edges.push(edge);
        self.nodes.push(edge.to());
    }
}

impl<N, L> Clone for Path<'_, N, L> {
    fn clone(&self) -> Self {
        Self {
            edges: self.edges.clone(),
            nodes: self.nodes.clone(),
        }
    }
}

impl<N: PartialEq, L: PartialEq> PartialEq for Path<'_, N, L> {
    fn eq(&self, other: &Self) -> bool {
        self.edges == other.edges && self.nodes == other.nodes
    }
}

impl<N: Eq, L: Eq> Eq for Path<'_, N, L> {}

impl<N: Debug, L: Debug> Debug for Path<'_, N, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Path")
            .field("nodes", &self.nodes)
            .field("edges", &self.edges)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_path() {
        let path = Path::<&str, u8>::new(&"n1");
        assert_eq!(path.first_node(), &"n1");
        assert_eq!(path.last_node(), &"n1");
        assert!(path.is_empty());
        assert_eq!(path.cost(), 0);
    }

    #[test]
    fn test_add_edge() {
        let e1 = Edge::new("n1", "n2", 0u8, 2);
        let e2 = Edge::new("n2", "n3", 0u8, 5);
        let path = Path::from_edges(&"n1", [&e1, &e2]);
        assert_eq!(path.last_node(), &"n3");
        assert_eq!(path.len(), 2);
        assert_eq!(path.nodes().count(), 3);
        assert_eq!(path.cost(), 7);
    }

    #[test]
    #[should_panic]
    fn test_add_disconnected_edge() {
        let e = Edge::new("n2", "n3", 0u8, 1);
        let mut path = Path::new(&"n1");
        path.add_edge(&e);
    }

    #[test]
    fn test_nodes_with_edges() {
        let e1 = Edge::new("n1", "n2", 0u8, 1);
        let e2 = Edge::new("n2", "n3", 0u8, 1);
        let path = Path::from_edges(&"n1", [&e1, &e2]);
        let mut iter = path.nodes_with_edges();
        assert_eq!(iter.next(), Some((None, &"n1", Some(&e1))));
        assert_eq!(iter.next(), Some((Some(&e1), &"n2", Some(&e2))));
        assert_eq!(iter.next(), Some((Some(&e2), &"n3", None)));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_debug() {
        let e1 = Edge::new("n1", "n2", 0u8, 1);
        let path = Path::from_edges(&"n1", [&e1]);
        let debug_str = format!("{:?}", path);
        assert!(debug_str.contains("Path"));
        assert!(debug_str.contains("nodes"));
        assert!(debug_str.contains("edges"));
    }
}
