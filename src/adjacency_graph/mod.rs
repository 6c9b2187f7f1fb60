use std::fmt::Debug;

use indexmap::IndexMap;

use crate::{
    Directed, Edge, Graph, GraphError, GraphMut, Label, MultipleEdges, NodeId, SingleEdge,
    Undirected,
    directedness::Directedness,
    edge_multiplicity::EdgeMultiplicityTrait,
    observers::{Change, Observers},
    tracing_support::trace,
};

use self::adjacency::Adjacency;

mod adjacency;

/// A graph storing, for each node, an adjacency record of its outgoing
/// edges.
///
/// All four graph variants share this one implementation; the type
/// parameters select the mutation policy:
///
/// * `D` - [`Directed`], or [`Undirected`] to mirror every edge with an
///   identically labeled and weighted edge the other way
/// * `M` - [`MultipleEdges`], or [`SingleEdge`] to reject self-loops and a
///   second label between an already linked ordered pair
///
/// Nodes appear when first used as an edge endpoint or when added with
/// [`GraphMut::add`].
pub struct AdjacencyGraph<N, L, D = Directed, M = MultipleEdges> {
    nodes: IndexMap<N, Adjacency<N, L>>,
    observers: Observers<N, L>,
    directedness: D,
    edge_multiplicity: M,
}

/// Directed graph allowing parallel differently labeled edges and self-loops.
pub type MultiDiGraph<N, L> = AdjacencyGraph<N, L, Directed, MultipleEdges>;

/// Undirected graph allowing parallel differently labeled edges and self-loops.
pub type MultiGraph<N, L> = AdjacencyGraph<N, L, Undirected, MultipleEdges>;

/// Directed graph with at most one edge per ordered pair and no self-loops.
pub type SimpleDiGraph<N, L> = AdjacencyGraph<N, L, Directed, SingleEdge>;

/// Undirected graph with at most one edge per pair and no self-loops.
pub type SimpleGraph<N, L> = AdjacencyGraph<N, L, Undirected, SingleEdge>;

impl<N, L, D, M> AdjacencyGraph<N, L, D, M>
where
    N: NodeId,
    L: Label,
    D: Directedness,
    M: EdgeMultiplicityTrait,
{
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
            observers: Observers::new(),
            directedness: D::default(),
            edge_multiplicity: M::default(),
        }
    }

    /// Gets the change-notification channel, to register or unregister
    /// observers.
    pub fn observers(&mut self) -> &mut Observers<N, L> {
        &mut self.observers
    }

    fn check_insertable(&self, from: &N, to: &N, label: &L) -> Result<(), GraphError> {
        if !M::allows_self_loops() && from == to {
            return Err(GraphError::Unsupported(format!(
                "self-loop on {from:?} in a simple graph"
            )));
        }
        if !M::allows_parallel_edges() {
            if let Some(adjacency) = self.nodes.get(from) {
                if adjacency.is_linked(to) && adjacency.get(to, label).is_none() {
                    return Err(GraphError::Unsupported(format!(
                        "{from:?} is already linked to {to:?} under another label"
                    )));
                }
            }
        }
        Ok(())
    }

    fn insert_half(&mut self, from: N, to: N, label: L, weight: u32) {
        let index = match self.nodes.get_index_of(&from) {
            Some(index) => index,
            None => self.nodes.insert_full(from.clone(), Adjacency::default()).0,
        };
        if !self.nodes.contains_key(&to) {
            self.nodes.insert(to.clone(), Adjacency::default());
        }
        if let Some((_, adjacency)) = self.nodes.get_index_mut(index) {
            adjacency.set(&from, to, label, weight);
        }
    }

    /// Panics if an undirected graph has lost one half of a mirrored edge.
    fn mirror_lost(from: &N, to: &N) -> ! {
        panic!("undirected graph has no mirror for an edge {from:?} -> {to:?}")
    }
}

impl<N, L, D, M> Default for AdjacencyGraph<N, L, D, M>
where
    N: NodeId,
    L: Label,
    D: Directedness,
    M: EdgeMultiplicityTrait,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Clones the structure.  Observers stay with the original graph.
impl<N, L, D, M> Clone for AdjacencyGraph<N, L, D, M>
where
    N: NodeId,
    L: Label,
    D: Directedness,
    M: EdgeMultiplicityTrait,
{
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            observers: Observers::new(),
            directedness: self.directedness,
            edge_multiplicity: self.edge_multiplicity,
        }
    }
}

impl<N, L, D, M> Graph for AdjacencyGraph<N, L, D, M>
where
    N: NodeId,
    L: Label,
    D: Directedness,
    M: EdgeMultiplicityTrait,
{
    type Node = N;
    type Label = L;

    fn is_directed(&self) -> bool {
        D::is_directed()
    }

    fn is_simple(&self) -> bool {
        !M::allows_parallel_edges()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn contains(&self, node: &N) -> bool {
        self.nodes.contains_key(node)
    }

    fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.keys()
    }

    fn edges(&self, node: &N) -> impl Iterator<Item = &Edge<N, L>> {
        self.nodes.get(node).into_iter().flat_map(|adjacency| adjacency.edges())
    }

    fn edges_between(&self, from: &N, to: &N) -> impl Iterator<Item = &Edge<N, L>> {
        self.nodes
            .get(from)
            .into_iter()
            .flat_map(move |adjacency| adjacency.edges_to(to))
    }

    fn edge_labeled(&self, from: &N, to: &N, label: &L) -> Option<&Edge<N, L>> {
        self.nodes.get(from)?.get(to, label)
    }

    fn successors(&self, node: &N) -> impl Iterator<Item = &N> {
        self.nodes.get(node).into_iter().flat_map(|adjacency| adjacency.successors())
    }

    fn is_linked(&self, from: &N, to: &N) -> bool {
        self.nodes.get(from).is_some_and(|a| a.is_linked(to))
    }

    fn edge_outdegree(&self, node: &N) -> usize {
        self.nodes.get(node).map_or(0, Adjacency::edge_outdegree)
    }

    fn nodal_outdegree(&self, node: &N) -> usize {
        self.nodes.get(node).map_or(0, Adjacency::nodal_outdegree)
    }
}

impl<N, L, D, M> GraphMut for AdjacencyGraph<N, L, D, M>
where
    N: NodeId,
    L: Label,
    D: Directedness,
    M: EdgeMultiplicityTrait,
{
    fn add(&mut self, node: N) -> bool {
        if self.nodes.contains_key(&node) {
            return false;
        }
        self.nodes.insert(node.clone(), Adjacency::default());
        self.observers.emit(|| Change::Node(node));
        true
    }

    fn set_weighted(&mut self, from: N, to: N, label: L, weight: u32) -> Result<(), GraphError> {
        if weight == 0 {
            return Err(GraphError::InvalidArgument(format!(
                "edge {from:?} -> {to:?} needs a positive weight"
            )));
        }
        self.check_insertable(&from, &to, &label)?;
        self.insert_half(from.clone(), to.clone(), label.clone(), weight);
        if !D::is_directed() && from != to {
            self.insert_half(to.clone(), from.clone(), label.clone(), weight);
        }
        self.observers.emit(|| Change::Edge { from, to, label });
        Ok(())
    }

    fn remove_edge(&mut self, from: &N, to: &N, label: &L) -> bool {
        let removed = self
            .nodes
            .get_mut(from)
            .is_some_and(|adjacency| adjacency.remove(to, label));
        if !removed {
            return false;
        }
        if !D::is_directed() && from != to {
            let mirrored = self
                .nodes
                .get_mut(to)
                .is_some_and(|adjacency| adjacency.remove(from, label));
            if !mirrored {
                Self::mirror_lost(from, to);
            }
        }
        self.observers.emit(|| Change::Edge {
            from: from.clone(),
            to: to.clone(),
            label: label.clone(),
        });
        true
    }

    fn remove_edges(&mut self, from: &N, to: &N) -> bool {
        let labels = self
            .nodes
            .get_mut(from)
            .map(|adjacency| adjacency.remove_all(to))
            .unwrap_or_default();
        if labels.is_empty() {
            return false;
        }
        if !D::is_directed() && from != to {
            let mirrored = self
                .nodes
                .get_mut(to)
                .map(|adjacency| adjacency.remove_all(from))
                .unwrap_or_default();
            if mirrored.len() != labels.len() {
                Self::mirror_lost(from, to);
            }
        }
        for label in labels {
            self.observers.emit(|| Change::Edge {
                from: from.clone(),
                to: to.clone(),
                label,
            });
        }
        true
    }

    fn remove_node(&mut self, node: &N) -> bool {
        let Some((node, adjacency)) = self.nodes.shift_remove_entry(node) else {
            return false;
        };
        if D::is_directed() {
            // Incoming edges live in other nodes' records.
            for (other, other_adjacency) in self.nodes.iter_mut() {
                for label in other_adjacency.remove_all(&node) {
                    self.observers.emit(|| Change::Edge {
                        from: other.clone(),
                        to: node.clone(),
                        label,
                    });
                }
            }
        } else {
            for successor in adjacency.successors() {
                if successor == &node {
                    continue;
                }
                let mirrored = self
                    .nodes
                    .get_mut(successor)
                    .map(|other| other.remove_all(&node))
                    .unwrap_or_default();
                if mirrored.len() != adjacency.edges_to(successor).count() {
                    Self::mirror_lost(&node, successor);
                }
            }
        }
        for edge in adjacency.edges() {
            self.observers.emit(|| Change::Edge {
                from: edge.from().clone(),
                to: edge.to().clone(),
                label: edge.label().clone(),
            });
        }
        trace!(node = ?node, edges = adjacency.edge_outdegree(), "removed node");
        self.observers.emit(|| Change::Node(node));
        true
    }

    fn clear_all_edges(&mut self) {
        for adjacency in self.nodes.values_mut() {
            adjacency.clear();
        }
        self.observers.emit(|| Change::All);
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.observers.emit(|| Change::All);
    }

    fn plug(&mut self) {
        self.observers.plug();
    }

    fn unplug(&mut self) {
        self.observers.unplug();
    }
}

impl<N, L, D, M> Debug for AdjacencyGraph<N, L, D, M>
where
    N: NodeId,
    L: Label,
    D: Directedness,
    M: EdgeMultiplicityTrait,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.nodes
                    .iter()
                    .map(|(node, adjacency)| (node, adjacency.edges().collect::<Vec<_>>())),
            )
            .finish()
    }
}

#[cfg(test)]
impl<N, L, D, M> AdjacencyGraph<N, L, D, M>
where
    N: NodeId,
    L: Label,
    D: Directedness,
    M: EdgeMultiplicityTrait,
{
    /// Checks every adjacency record and that every edge target is a node.
    pub(crate) fn check_adjacency(&self) {
        for (node, adjacency) in &self.nodes {
            adjacency.check_consistency(node);
            for successor in adjacency.successors() {
                assert!(self.nodes.contains_key(successor), "dangling {successor:?}");
            }
        }
    }
}
