pub use crate::adjacency_graph::{MultiDiGraph, MultiGraph, SimpleDiGraph, SimpleGraph};
pub use crate::directedness::{Directed, Directedness, Undirected};
pub use crate::edge::Edge;
pub use crate::edge_multiplicity::{EdgeMultiplicityTrait, MultipleEdges, SingleEdge};
pub use crate::error::GraphError;
pub use crate::graph::{Graph, GraphMut, Label, NodeId};
pub use crate::rewire::{EdgeLabeler, Rewire};
