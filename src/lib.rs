//! An in-memory multigraph of caller-defined nodes joined by labeled,
//! weighted edges, with shortest-path, k-shell and graph-generation engines
//! that work on any of its four variants.

// Without tracing the log macros discard their arguments.
#![cfg_attr(not(feature = "tracing"), allow(unused_variables, unused_assignments))]

pub mod adjacency_graph;
pub mod diff;
pub mod graph;
pub mod kshell;
pub mod matrix;
pub mod metrics;
pub mod observers;
pub mod path;
pub mod position;
pub mod prelude;
pub mod rewire;
pub mod spf;
pub mod tracing_support;

mod directedness;
mod edge;
mod edge_multiplicity;
mod error;

#[cfg(test)]
mod generate_large_graph;
#[cfg(test)]
mod graph_test_support;
#[cfg(test)]
mod graph_tests;

pub use adjacency_graph::{AdjacencyGraph, MultiDiGraph, MultiGraph, SimpleDiGraph, SimpleGraph};
pub use directedness::{Directed, Directedness, Undirected};
pub use edge::Edge;
pub use edge_multiplicity::{EdgeMultiplicityTrait, MultipleEdges, SingleEdge};
pub use error::GraphError;
pub use graph::{Graph, GraphMut, Label, NodeId};
pub use kshell::{KShell, kshell};
pub use observers::{Change, ObserverId, Observers};
pub use path::Path;
pub use spf::ShortestPathFirst;
