use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{EdgeLabeler, Rewire, plugged, try_link};
use crate::{
    GraphError, GraphMut,
    tracing_support::{debug, info_span, trace},
};

/// Links every node to randomly chosen others until it has `min_degree`
/// neighbours.
///
/// Nodes are visited in random order and each offered the other nodes in a
/// fresh random order, once each.  A node may fall short when the labeler
/// or the graph refuses enough of its candidates.
pub struct RandomRewire<'g, G, E, R = StdRng> {
    graph: &'g mut G,
    labeler: E,
    rng: R,
    min_degree: usize,
}

impl<'g, G, E> RandomRewire<'g, G, E, StdRng>
where
    G: GraphMut,
    E: EdgeLabeler<G::Node, G::Label>,
{
    pub fn new(graph: &'g mut G, labeler: E) -> Self {
        Self::with_rng(graph, labeler, StdRng::from_entropy())
    }
}

impl<'g, G, E, R> RandomRewire<'g, G, E, R>
where
    G: GraphMut,
    E: EdgeLabeler<G::Node, G::Label>,
    R: Rng,
{
    pub fn with_rng(graph: &'g mut G, labeler: E, rng: R) -> Self {
        Self {
            graph,
            labeler,
            rng,
            min_degree: 1,
        }
    }

    /// Sets the nodal degree each node is linked up to.  Must be smaller
    /// than the graph.
    pub fn with_min_degree(mut self, min_degree: usize) -> Result<Self, GraphError> {
        if min_degree >= self.graph.len() {
            return Err(GraphError::InvalidArgument(format!(
                "min_degree = {min_degree} must be smaller than the graph ({} nodes)",
                self.graph.len()
            )));
        }
        self.min_degree = min_degree;
        Ok(self)
    }

    pub fn min_degree(&self) -> usize {
        self.min_degree
    }
}

/// Offers `node` every other node once, in random order, until it has
/// `min_degree` neighbours.  Returns the number of links made.
fn link_up<G, E, R>(
    graph: &mut G,
    labeler: &mut E,
    rng: &mut R,
    node: &G::Node,
    min_degree: usize,
) -> Result<usize, GraphError>
where
    G: GraphMut,
    E: EdgeLabeler<G::Node, G::Label>,
    R: Rng,
{
    let mut links = 0;
    for candidate in graph.random_node_iterable(rng) {
        if graph.nodal_outdegree(node) >= min_degree {
            break;
        }
        if candidate == *node || graph.is_linked(node, &candidate) {
            continue;
        }
        if try_link(graph, labeler, node, &candidate)? {
            links += 1;
        }
    }
    Ok(links)
}

impl<G, E, R> Rewire for RandomRewire<'_, G, E, R>
where
    G: GraphMut,
    E: EdgeLabeler<G::Node, G::Label>,
    R: Rng,
{
    type Node = G::Node;

    fn rewire(&mut self) -> Result<(), GraphError> {
        let _span = info_span!("random_rewire").entered();
        let min_degree = self.min_degree;
        let (labeler, rng) = (&mut self.labeler, &mut self.rng);
        plugged(self.graph, |graph| {
            graph.clear_all_edges();
            let mut links = 0;
            for node in graph.random_node_iterable(rng) {
                links += link_up(graph, labeler, rng, &node, min_degree)?;
            }
            debug!(nodes = graph.len(), links, min_degree, "random graph generated");
            Ok(())
        })
    }

    /// Adds `node` and links it to random others until it has `min_degree`
    /// neighbours.  Existing edges are left alone.
    fn add(&mut self, node: G::Node) -> Result<usize, GraphError> {
        let min_degree = self.min_degree;
        let (labeler, rng) = (&mut self.labeler, &mut self.rng);
        plugged(self.graph, |graph| {
            graph.add(node.clone());
            let links = link_up(graph, labeler, rng, &node, min_degree)?;
            trace!(node = ?node, links, "random node added");
            Ok(links)
        })
    }
}
