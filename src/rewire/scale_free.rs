//! Preferential-attachment (Barabási–Albert) generation.

use std::{fmt, str::FromStr};

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{EdgeLabeler, Rewire, plugged, try_link};
use crate::{
    GraphError, GraphMut,
    tracing_support::{debug, info_span},
};

/// When a node has been given enough links.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MMode {
    /// Stop as soon as exactly `m` links were added, over as many passes
    /// as that takes.
    #[default]
    Strict,
    /// Finish at least one full pass, and have at least `m` links.
    Min,
    /// Stop after one full pass with at least one link, or at `m` links.
    Max,
}

impl MMode {
    /// Whether attachment should stop, given the target `m`, links `added`
    /// so far and the number of completed passes.  Every mode gives up
    /// after `max(10, 10 * m)` passes.
    pub fn stop(self, m: usize, added: usize, pass: usize) -> bool {
        if pass > Self::max_passes(m) {
            return true;
        }
        match self {
            MMode::Strict => added >= m,
            MMode::Min => pass > 0 && added >= m,
            MMode::Max => (pass > 0 && added >= 1) || added >= m,
        }
    }

    pub fn max_passes(m: usize) -> usize {
        10.max(m.saturating_mul(10))
    }
}

impl fmt::Display for MMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MMode::Strict => "strict",
            MMode::Min => "min",
            MMode::Max => "max",
        })
    }
}

impl FromStr for MMode {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(MMode::Strict),
            "min" => Ok(MMode::Min),
            "max" => Ok(MMode::Max),
            _ => Err(GraphError::InvalidArgument(format!(
                "unknown attachment mode {s:?}"
            ))),
        }
    }
}

/// Regenerates a graph by preferential attachment.
///
/// Nodes are taken in a random order.  The first `m + 1` are chained
/// together; every later node then considers each node placed before it,
/// linking to it with probability `(a + k) / (2 L)`, where `k` is that
/// node's nodal degree and `L` the number of links made so far, until its
/// [`MMode`] is satisfied.  `a` gives low-degree nodes a chance they would
/// otherwise lack.
pub struct ScaleFreeRewire<'g, G, E, R = StdRng> {
    pub(super) graph: &'g mut G,
    labeler: E,
    pub(super) rng: R,
    m: usize,
    a: u32,
    m_mode: MMode,
}

impl<'g, G, E> ScaleFreeRewire<'g, G, E, StdRng>
where
    G: GraphMut,
    E: EdgeLabeler<G::Node, G::Label>,
{
    /// Creates a generator with `m = 1`, `a = 0` and [`MMode::Strict`],
    /// seeded from the operating system.
    pub fn new(graph: &'g mut G, labeler: E) -> Self {
        Self::with_rng(graph, labeler, StdRng::from_entropy())
    }
}

impl<'g, G, E, R> ScaleFreeRewire<'g, G, E, R>
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
            m: 1,
            a: 0,
            m_mode: MMode::Strict,
        }
    }

    /// Sets the number of links each new node aims for.  Must be positive
    /// and smaller than the graph.
    pub fn with_m(mut self, m: usize) -> Result<Self, GraphError> {
        if m == 0 {
            return Err(GraphError::InvalidArgument("m must be at least 1".into()));
        }
        if m >= self.graph.len() {
            return Err(GraphError::InvalidArgument(format!(
                "m = {m} must be smaller than the graph ({} nodes)",
                self.graph.len()
            )));
        }
        self.m = m;
        Ok(self)
    }

    pub fn with_a(mut self, a: u32) -> Self {
        self.a = a;
        self
    }

    pub fn with_m_mode(mut self, m_mode: MMode) -> Self {
        self.m_mode = m_mode;
        self
    }

    pub fn m(&self) -> usize {
        self.m
    }

    pub fn a(&self) -> u32 {
        self.a
    }

    pub fn m_mode(&self) -> MMode {
        self.m_mode
    }

    /// Whether to accept a link to `candidate` when `links` links exist.
    fn consider_link(&mut self, candidate: &G::Node, links: usize) -> bool {
        if links == 0 {
            return true;
        }
        let k = self.graph.nodal_outdegree(candidate) as f64;
        let p = (f64::from(self.a) + k) / (2.0 * links as f64);
        self.chance(p)
    }

    pub(super) fn chance(&mut self, p: f64) -> bool {
        p > 0.0 && self.rng.gen_bool(p.min(1.0))
    }

    pub(super) fn link(&mut self, from: &G::Node, to: &G::Node) -> Result<bool, GraphError> {
        try_link(self.graph, &mut self.labeler, from, to)
    }

    /// Links `node` to some of `candidates` under the attachment policy.
    /// Returns the links made and the passes over `candidates` begun, at
    /// most `max_passes(m) + 1`.
    fn attach(
        &mut self,
        node: &G::Node,
        links: usize,
        candidates: &[G::Node],
    ) -> Result<(usize, usize), GraphError> {
        let mut added = 0;
        let mut pass = 0;
        loop {
            for candidate in candidates {
                if self.m_mode.stop(self.m, added, pass) {
                    break;
                }
                if candidate == node || self.graph.is_linked(node, candidate) {
                    continue;
                }
                if self.consider_link(candidate, links) && self.link(node, candidate)? {
                    added += 1;
                }
            }
            pass += 1;
            if self.m_mode.stop(self.m, added, pass) {
                break;
            }
        }
        if added < self.m {
            debug!(node = ?node, added, pass, "attachment stopped short of m");
        }
        Ok((added, pass))
    }

    /// Clears the graph's edges and grows it again.  After each node is
    /// attached, `after_attach` is given the engine, the nodes attached
    /// before it and the current link count, and returns how many links it
    /// added itself.
    pub(super) fn grow<H>(&mut self, mut after_attach: H) -> Result<(), GraphError>
    where
        H: FnMut(&mut Self, &[G::Node], usize) -> Result<usize, GraphError>,
    {
        let _span = info_span!("scale_free_rewire").entered();
        self.graph.plug();
        let result = self.grow_plugged(&mut after_attach);
        self.graph.unplug();
        result
    }

    fn grow_plugged<H>(&mut self, after_attach: &mut H) -> Result<(), GraphError>
    where
        H: FnMut(&mut Self, &[G::Node], usize) -> Result<usize, GraphError>,
    {
        self.graph.clear_all_edges();
        let nodes = self.graph.random_node_iterable(&mut self.rng);
        if nodes.len() < 2 {
            return Ok(());
        }
        if self.m >= nodes.len() {
            return Err(GraphError::InvalidArgument(format!(
                "m = {} must be smaller than the graph ({} nodes)",
                self.m,
                nodes.len()
            )));
        }

        // Seed chain; isolated nodes would never attract a link.
        let mut links = 0;
        for pair in nodes[..=self.m].windows(2) {
            if self.link(&pair[0], &pair[1])? {
                links += 1;
            }
        }

        for split in (self.m + 1)..nodes.len() {
            links += self.attach(&nodes[split], links, &nodes[..split])?.0;
            links += after_attach(self, &nodes[..split], links)?;
        }
        debug!(
            nodes = nodes.len(),
            links,
            m = self.m,
            a = self.a,
            mode = %self.m_mode,
            "scale-free graph generated"
        );
        Ok(())
    }
}

impl<G, E, R> Rewire for ScaleFreeRewire<'_, G, E, R>
where
    G: GraphMut,
    E: EdgeLabeler<G::Node, G::Label>,
    R: Rng,
{
    type Node = G::Node;

    fn rewire(&mut self) -> Result<(), GraphError> {
        self.grow(|_, _, _| Ok(0))
    }

    /// Attaches a new node to the existing graph, weighing candidates by the
    /// graph's current link count.
    fn add(&mut self, node: G::Node) -> Result<usize, GraphError> {
        let candidates = self.graph.random_node_iterable(&mut self.rng);
        let links = self.graph.link_count();
        plugged(self.graph, |graph| {
            graph.add(node.clone());
            Ok(())
        })?;
        let (added, _) = self.attach(&node, links, &candidates)?;
        Ok(added)
    }
}
