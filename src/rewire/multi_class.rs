use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{EdgeLabeler, MMode, Rewire, ScaleFreeRewire};
use crate::{GraphError, GraphMut, tracing_support::trace};

/// Scale-free generation with extra "peering" links between alike nodes.
///
/// After each node is attached, pairs of nodes placed earlier are
/// considered for a direct link with probability
/// `ki * kj / (d * L^2)`, where `ki` and `kj` are their nodal degrees, `L`
/// the current link count and `d` the peering divisor (4 by default).  Up
/// to `p` such links are made per step, counted under `p_mode` the same way
/// [`MMode`] counts attachment links.
pub struct MultiClassScaleFreeRewire<'g, G, E, R = StdRng> {
    inner: ScaleFreeRewire<'g, G, E, R>,
    p: usize,
    p_mode: MMode,
    peering_divisor: f64,
}

impl<'g, G, E> MultiClassScaleFreeRewire<'g, G, E, StdRng>
where
    G: GraphMut,
    E: EdgeLabeler<G::Node, G::Label>,
{
    pub fn new(graph: &'g mut G, labeler: E) -> Self {
        Self::with_rng(graph, labeler, StdRng::from_entropy())
    }
}

impl<'g, G, E, R> MultiClassScaleFreeRewire<'g, G, E, R>
where
    G: GraphMut,
    E: EdgeLabeler<G::Node, G::Label>,
    R: Rng,
{
    pub fn with_rng(graph: &'g mut G, labeler: E, rng: R) -> Self {
        Self {
            inner: ScaleFreeRewire::with_rng(graph, labeler, rng),
            p: 1,
            p_mode: MMode::Strict,
            peering_divisor: 4.0,
        }
    }

    pub fn with_m(mut self, m: usize) -> Result<Self, GraphError> {
        self.inner = self.inner.with_m(m)?;
        Ok(self)
    }

    pub fn with_a(mut self, a: u32) -> Self {
        self.inner = self.inner.with_a(a);
        self
    }

    pub fn with_m_mode(mut self, m_mode: MMode) -> Self {
        self.inner = self.inner.with_m_mode(m_mode);
        self
    }

    /// Sets how many peering links to aim for per step.  Zero disables
    /// peering; it must be smaller than the graph.
    pub fn with_p(mut self, p: usize) -> Result<Self, GraphError> {
        if p >= self.inner.graph.len() {
            return Err(GraphError::InvalidArgument(format!(
                "p = {p} must be smaller than the graph ({} nodes)",
                self.inner.graph.len()
            )));
        }
        self.p = p;
        Ok(self)
    }

    pub fn with_p_mode(mut self, p_mode: MMode) -> Self {
        self.p_mode = p_mode;
        self
    }

    /// Sets `d` in the peering probability.  Must be positive and finite.
    pub fn with_peering_divisor(mut self, divisor: f64) -> Result<Self, GraphError> {
        if !(divisor.is_finite() && divisor > 0.0) {
            return Err(GraphError::InvalidArgument(format!(
                "peering divisor must be positive, got {divisor}"
            )));
        }
        self.peering_divisor = divisor;
        Ok(self)
    }

    pub fn m(&self) -> usize {
        self.inner.m()
    }

    pub fn a(&self) -> u32 {
        self.inner.a()
    }

    pub fn m_mode(&self) -> MMode {
        self.inner.m_mode()
    }

    pub fn p(&self) -> usize {
        self.p
    }

    pub fn p_mode(&self) -> MMode {
        self.p_mode
    }

    pub fn peering_divisor(&self) -> f64 {
        self.peering_divisor
    }
}

/// Links pairs among `attached` that are alike enough.  Returns the number
/// of links made.
fn add_like_links<G, E, R>(
    engine: &mut ScaleFreeRewire<'_, G, E, R>,
    attached: &[G::Node],
    links: usize,
    p: usize,
    p_mode: MMode,
    divisor: f64,
) -> Result<usize, GraphError>
where
    G: GraphMut,
    E: EdgeLabeler<G::Node, G::Label>,
    R: Rng,
{
    let mut added = 0;
    let mut pass = 0;
    loop {
        'pairs: for (i, ni) in attached.iter().enumerate() {
            for nj in &attached[i + 1..] {
                if p_mode.stop(p, added, pass) {
                    break 'pairs;
                }
                let total = (links + added) as f64;
                let ki = engine.graph.nodal_outdegree(ni) as f64;
                let kj = engine.graph.nodal_outdegree(nj) as f64;
                let chance = if total == 0.0 {
                    0.0
                } else {
                    ki * kj / (divisor * total * total)
                };
                if !engine.chance(chance) || engine.graph.is_linked(ni, nj) {
                    continue;
                }
                if engine.link(ni, nj)? {
                    trace!(from = ?ni, to = ?nj, "peering link");
                    added += 1;
                }
            }
        }
        pass += 1;
        if p_mode.stop(p, added, pass) {
            break;
        }
    }
    Ok(added)
}

impl<G, E, R> Rewire for MultiClassScaleFreeRewire<'_, G, E, R>
where
    G: GraphMut,
    E: EdgeLabeler<G::Node, G::Label>,
    R: Rng,
{
    type Node = G::Node;

    fn rewire(&mut self) -> Result<(), GraphError> {
        let (p, p_mode, divisor) = (self.p, self.p_mode, self.peering_divisor);
        self.inner.grow(|engine, attached, links| {
            add_like_links(engine, attached, links, p, p_mode, divisor)
        })
    }

    fn add(&mut self, node: G::Node) -> Result<usize, GraphError> {
        self.inner.add(node)
    }
}
