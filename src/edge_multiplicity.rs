use std::{fmt::Debug, hash::Hash};

/// Marker type for simple graphs: no self-loops and at most one edge per
/// ordered pair of nodes.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SingleEdge;

/// Marker type for multigraphs: any number of differently labeled edges
/// between the same nodes, self-loops included.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct MultipleEdges;

/// Trait defining the edge multiplicity behavior of graphs.
///
/// This trait is implemented by [`SingleEdge`] and [`MultipleEdges`] marker
/// types to provide compile-time specialization of the mutation policy.
pub trait EdgeMultiplicityTrait:
    Copy + Clone + Debug + Default + PartialEq + Eq + Hash + PartialOrd + Ord + 'static
{
    fn allows_parallel_edges() -> bool;

    fn allows_self_loops() -> bool {
        Self::allows_parallel_edges()
    }
}

impl EdgeMultiplicityTrait for SingleEdge {
    fn allows_parallel_edges() -> bool {
        false
    }
}

impl EdgeMultiplicityTrait for MultipleEdges {
    fn allows_parallel_edges() -> bool {
        true
    }
}
