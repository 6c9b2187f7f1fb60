//! Engines that regenerate the edges of an existing set of nodes.
//!
//! Every engine borrows a graph mutably for its lifetime, asks a caller
//! supplied [`EdgeLabeler`] for the label of each edge it wants to create,
//! and creates it through the ordinary [`GraphMut`] operations.  A labeler
//! returning `None` vetoes that edge.  Bulk rewiring happens between
//! [`GraphMut::plug`] and [`GraphMut::unplug`].

use std::{fmt, str::FromStr};

use rand::Rng;

use crate::{GraphError, GraphMut, tracing_support::trace};

pub mod cartesian;
pub mod lattice;
pub mod multi_class;
pub mod random;
pub mod scale_free;

pub use self::cartesian::CartesianRewire;
pub use self::lattice::LatticeRewire;
pub use self::multi_class::MultiClassScaleFreeRewire;
pub use self::random::RandomRewire;
pub use self::scale_free::{MMode, ScaleFreeRewire};

/// Chooses the label for a prospective edge, or vetoes it with `None`.
pub trait EdgeLabeler<N, L> {
    fn label(&mut self, from: &N, to: &N) -> Option<L>;
}

impl<N, L, F> EdgeLabeler<N, L> for F
where
    F: FnMut(&N, &N) -> Option<L>,
{
    fn label(&mut self, from: &N, to: &N) -> Option<L> {
        self(from, to)
    }
}

/// A graph generator bound to a graph.
pub trait Rewire {
    type Node;

    /// Discards the current edges and generates new ones.
    fn rewire(&mut self) -> Result<(), GraphError>;

    /// Adds one node to the graph and links it the way the generator would
    /// have, returning the number of links made.
    fn add(&mut self, node: Self::Node) -> Result<usize, GraphError> {
        let _ = node;
        Err(GraphError::Unsupported(
            "this generator cannot grow a graph incrementally".into(),
        ))
    }
}

/// Links `from` to `to` if the labeler agrees.  Returns whether an edge was
/// set; edges the graph rejects as unsupported count as not set.
pub(crate) fn try_link<G, E>(
    graph: &mut G,
    labeler: &mut E,
    from: &G::Node,
    to: &G::Node,
) -> Result<bool, GraphError>
where
    G: GraphMut + ?Sized,
    E: EdgeLabeler<G::Node, G::Label> + ?Sized,
{
    let Some(label) = labeler.label(from, to) else {
        trace!(from = ?from, to = ?to, "link vetoed by labeler");
        return Ok(false);
    };
    match graph.set(from.clone(), to.clone(), label) {
        Ok(()) => Ok(true),
        Err(GraphError::Unsupported(reason)) => {
            trace!(%reason, "link rejected by graph");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Runs `body` between `plug` and `unplug`, unplugging even on error.
pub(crate) fn plugged<G, T>(
    graph: &mut G,
    body: impl FnOnce(&mut G) -> Result<T, GraphError>,
) -> Result<T, GraphError>
where
    G: GraphMut + ?Sized,
{
    graph.plug();
    let result = body(graph);
    graph.unplug();
    result
}

/// The generators that need nothing beyond a graph and a labeler, selectable
/// by name.
///
/// [`CartesianRewire`] is not listed; it needs positioned nodes and is
/// constructed directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RewireKind {
    Random,
    Lattice,
    ScaleFree,
    MultiClassScaleFree,
}

impl RewireKind {
    pub fn all() -> &'static [RewireKind] {
        &[
            RewireKind::Random,
            RewireKind::Lattice,
            RewireKind::ScaleFree,
            RewireKind::MultiClassScaleFree,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            RewireKind::Random => "random",
            RewireKind::Lattice => "lattice",
            RewireKind::ScaleFree => "scale-free",
            RewireKind::MultiClassScaleFree => "multi-class-scale-free",
        }
    }

    /// Builds the generator with its default parameters.
    pub fn build<'g, G, E, R>(
        self,
        graph: &'g mut G,
        labeler: E,
        rng: R,
    ) -> Box<dyn Rewire<Node = G::Node> + 'g>
    where
        G: GraphMut + 'g,
        E: EdgeLabeler<G::Node, G::Label> + 'g,
        R: Rng + 'g,
    {
        match self {
            RewireKind::Random => Box::new(RandomRewire::with_rng(graph, labeler, rng)),
            RewireKind::Lattice => Box::new(LatticeRewire::new(graph, labeler)),
            RewireKind::ScaleFree => Box::new(ScaleFreeRewire::with_rng(graph, labeler, rng)),
            RewireKind::MultiClassScaleFree => {
                Box::new(MultiClassScaleFreeRewire::with_rng(graph, labeler, rng))
            }
        }
    }
}

impl fmt::Display for RewireKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RewireKind {
    type Err = GraphError;

    /// Parses a generator name, ignoring case, `-` and `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        RewireKind::all()
            .iter()
            .copied()
            .find(|kind| kind.name().replace('-', "") == wanted)
            .ok_or_else(|| GraphError::InvalidArgument(format!("unknown generator {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{Graph, MultiGraph, SimpleDiGraph};

    #[test]
    fn test_kind_names_round_trip() {
        for kind in RewireKind::all() {
            assert_eq!(kind.to_string().parse::<RewireKind>(), Ok(*kind));
        }
        assert_eq!("ScaleFree".parse::<RewireKind>(), Ok(RewireKind::ScaleFree));
        assert_eq!(
            "multi_class_scale_free".parse::<RewireKind>(),
            Ok(RewireKind::MultiClassScaleFree)
        );
        assert!("cartesian".parse::<RewireKind>().is_err());
    }

    #[test]
    fn test_try_link() {
        let mut g = SimpleDiGraph::<u32, u8>::new();
        let mut veto = |_: &u32, to: &u32| (*to != 3).then_some(0u8);
        assert_eq!(try_link(&mut g, &mut veto, &1, &2), Ok(true));
        assert_eq!(try_link(&mut g, &mut veto, &1, &3), Ok(false));
        assert_eq!(try_link(&mut g, &mut veto, &1, &1), Ok(false));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_build_every_kind() {
        for kind in RewireKind::all() {
            let mut g = MultiGraph::<u32, ()>::new();
            for i in 0..16 {
                g.add(i);
            }
            let mut rewire = kind.build(&mut g, |_: &u32, _: &u32| Some(()), StdRng::seed_from_u64(1));
            rewire.rewire().unwrap();
            drop(rewire);
            assert!(g.edge_count() > 0, "{kind} made no edges");
            assert_eq!(g.len(), 16);
        }
    }
}
