use super::{EdgeLabeler, Rewire, plugged, try_link};
use crate::{
    GraphError, GraphMut,
    tracing_support::{debug, info_span},
};

/// Lays the nodes out row by row on a grid, in graph order, and links each
/// node from its left neighbour and from the node above it.
pub struct LatticeRewire<'g, G, E> {
    graph: &'g mut G,
    labeler: E,
    columns: Option<usize>,
}

impl<'g, G, E> LatticeRewire<'g, G, E>
where
    G: GraphMut,
    E: EdgeLabeler<G::Node, G::Label>,
{
    /// Creates an engine with `floor(sqrt(n))` columns.
    pub fn new(graph: &'g mut G, labeler: E) -> Self {
        Self {
            graph,
            labeler,
            columns: None,
        }
    }

    pub fn with_columns(mut self, columns: usize) -> Result<Self, GraphError> {
        if columns == 0 {
            return Err(GraphError::InvalidArgument(
                "a lattice needs at least one column".into(),
            ));
        }
        self.columns = Some(columns);
        Ok(self)
    }

    /// The column count the next rewire will use.
    pub fn columns(&self) -> usize {
        self.columns
            .unwrap_or_else(|| (self.graph.len() as f64).sqrt().floor() as usize)
            .max(1)
    }
}

impl<G, E> Rewire for LatticeRewire<'_, G, E>
where
    G: GraphMut,
    E: EdgeLabeler<G::Node, G::Label>,
{
    type Node = G::Node;

    fn rewire(&mut self) -> Result<(), GraphError> {
        let _span = info_span!("lattice_rewire").entered();
        let columns = self.columns();
        let labeler = &mut self.labeler;
        plugged(self.graph, |graph| {
            graph.clear_all_edges();
            let nodes: Vec<G::Node> = graph.nodes().cloned().collect();
            for (i, node) in nodes.iter().enumerate() {
                if i % columns != 0 {
                    try_link(graph, labeler, &nodes[i - 1], node)?;
                }
                if i >= columns {
                    try_link(graph, labeler, &nodes[i - columns], node)?;
                }
            }
            debug!(nodes = nodes.len(), columns, "lattice generated");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Graph, MultiDiGraph, SimpleGraph};

    fn always(_: &u32, _: &u32) -> Option<()> {
        Some(())
    }

    #[test]
    fn test_square_lattice() {
        // 0 1 2
        // 3 4 5
        // 6 7 8
        let mut g = MultiDiGraph::<u32, ()>::new();
        for i in 0..9 {
            g.add(i);
        }
        let mut lattice = LatticeRewire::new(&mut g, always);
        assert_eq!(lattice.columns(), 3);
        lattice.rewire().unwrap();
        assert_eq!(g.edge_count(), 12);
        assert!(g.is_linked(&0, &1));
        assert!(g.is_linked(&1, &4));
        assert!(!g.is_linked(&2, &3));
        assert!(!g.is_linked(&1, &0));
        assert_eq!(g.nodal_outdegree(&8), 0);
    }

    #[test]
    fn test_ragged_last_row() {
        let mut g = SimpleGraph::<u32, ()>::new();
        for i in 0..7 {
            g.add(i);
        }
        LatticeRewire::new(&mut g, always)
            .with_columns(3)
            .unwrap()
            .rewire()
            .unwrap();
        // Rows 0-2, 3-5, 6: horizontal 2 + 2, vertical 3 + 1.
        assert_eq!(g.edge_count(), 8);
        assert!(g.is_linked(&6, &3));
        assert!(!g.is_linked(&5, &6));
    }

    #[test]
    fn test_single_column_is_a_path() {
        let mut g = SimpleGraph::<u32, ()>::new();
        for i in 0..3 {
            g.add(i);
        }
        assert!(LatticeRewire::new(&mut g, always).with_columns(0).is_err());
        let mut lattice = LatticeRewire::new(&mut g, always);
        assert_eq!(lattice.columns(), 1);
        lattice.rewire().unwrap();
        assert_eq!(g.edge_count(), 2);
        assert!(g.is_linked(&0, &1) && g.is_linked(&1, &2));
    }
}
