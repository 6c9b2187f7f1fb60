//! Proximity rewiring over a uniform grid index.

use std::ops::RangeInclusive;

use indexmap::{IndexMap, IndexSet};

use super::{EdgeLabeler, Rewire, plugged};
use crate::{
    GraphError, GraphMut,
    position::{PositionableNode, Vector2D},
    tracing_support::{debug, info_span, trace},
};

/// Grid cells along the shorter side of the bound.
const DIVISIONS: f64 = 10.0;

type Cell = (usize, usize);

/// Maps positions to cells.  Coordinates are centred on the origin; the
/// bound spans `[-w/2, w/2] x [-h/2, h/2]` and positions outside it fall in
/// the nearest edge cell.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Grid {
    cell: f64,
    cols: usize,
    rows: usize,
    reach: usize,
    shift: Vector2D,
}

impl Grid {
    /// A grid for the bound and range, or a single cell when either makes a
    /// grid meaningless.
    fn new(bound: Option<(f64, f64)>, range: f64) -> Self {
        if let Some((width, height)) = bound {
            let cell = width.min(height) / DIVISIONS;
            if range > 0.0 && cell > 0.0 {
                return Self {
                    cell,
                    cols: (width / cell).ceil() as usize,
                    rows: (height / cell).ceil() as usize,
                    reach: (range / cell).ceil() as usize,
                    shift: Vector2D::new(width / 2.0, height / 2.0),
                };
            }
        }
        Self {
            cell: 0.0,
            cols: 1,
            rows: 1,
            reach: 0,
            shift: Vector2D::ZERO,
        }
    }

    fn axis(&self, pos: f64, shift: f64, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        let i = ((shift + pos) / self.cell).floor();
        if i > 0.0 { (i as usize).min(len - 1) } else { 0 }
    }

    fn cell_of(&self, pos: Vector2D) -> Cell {
        (
            self.axis(pos.x(), self.shift.x(), self.cols),
            self.axis(pos.y(), self.shift.y(), self.rows),
        )
    }

    fn span(&self, i: usize, len: usize) -> RangeInclusive<usize> {
        i.saturating_sub(self.reach)..=(i + self.reach).min(len - 1)
    }

    /// Every cell within reach of `cell`, including itself.
    fn neighbours(&self, (x, y): Cell) -> impl Iterator<Item = Cell> + '_ {
        self.span(x, self.cols)
            .flat_map(move |i| self.span(y, self.rows).map(move |j| (i, j)))
    }
}

/// Links every pair of nodes within `range` of each other, and unlinks
/// every linked pair that is not.
///
/// Each ordered pair is considered once: for a directed graph wanting both
/// directions, the labeler sees both.  A labeler veto also unlinks the
/// pair.  Rewiring is incremental: in-range pairs that are already linked
/// keep their edges.  Given a bound, nodes are bucketed into a grid so only
/// nearby cells and current successors are examined; without one every
/// pair is.
pub struct CartesianRewire<'g, G, E> {
    graph: &'g mut G,
    labeler: E,
    range: f64,
    bound: Option<(f64, f64)>,
}

impl<'g, G, E> CartesianRewire<'g, G, E>
where
    G: GraphMut,
    G::Node: PositionableNode,
    E: EdgeLabeler<G::Node, G::Label>,
{
    /// Creates an engine with range 10 and no grid.
    pub fn new(graph: &'g mut G, labeler: E) -> Self {
        Self {
            graph,
            labeler,
            range: 10.0,
            bound: None,
        }
    }

    /// Uses a grid index over a `width` by `height` area centred on the
    /// origin.
    pub fn with_bound(mut self, width: f64, height: f64) -> Result<Self, GraphError> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(GraphError::InvalidArgument(format!(
                "bound must be positive, got {width} x {height}"
            )));
        }
        self.bound = Some((width, height));
        Ok(self)
    }

    /// Sets the maximum link distance.  A range that is not positive makes
    /// rewiring a no-op.
    pub fn with_range(mut self, range: f64) -> Self {
        self.range = range;
        self
    }

    pub fn range(&self) -> f64 {
        self.range
    }

    pub fn bound(&self) -> Option<(f64, f64)> {
        self.bound
    }
}

impl<G, E> Rewire for CartesianRewire<'_, G, E>
where
    G: GraphMut,
    G::Node: PositionableNode,
    E: EdgeLabeler<G::Node, G::Label>,
{
    type Node = G::Node;

    fn rewire(&mut self) -> Result<(), GraphError> {
        let range = self.range;
        if self.graph.len() < 2 || !(range > 0.0) {
            return Ok(());
        }
        let _span = info_span!("cartesian_rewire").entered();
        let grid = Grid::new(self.bound, range);

        let mut cells: IndexMap<Cell, Vec<G::Node>> = IndexMap::new();
        for node in self.graph.nodes() {
            cells
                .entry(grid.cell_of(node.position()))
                .or_default()
                .push(node.clone());
        }
        cells.sort_keys();
        debug!(
            nodes = self.graph.len(),
            cells = cells.len(),
            cols = grid.cols,
            rows = grid.rows,
            reach = grid.reach,
            "grid index built"
        );

        let labeler = &mut self.labeler;
        plugged(self.graph, |graph| {
            for (&cell, members) in &cells {
                // Nodes possibly in range, plus current successors so
                // out-of-range links get dropped.
                let mut targets: IndexSet<G::Node> = grid
                    .neighbours(cell)
                    .filter_map(|c| cells.get(&c))
                    .flatten()
                    .cloned()
                    .collect();
                for member in members {
                    targets.extend(graph.successors(member).cloned());
                }
                if targets.len() <= 1 {
                    continue;
                }
                for from in members {
                    for to in &targets {
                        if from == to {
                            continue;
                        }
                        let label = if from.position().distance(&to.position()) <= range {
                            labeler.label(from, to)
                        } else {
                            None
                        };
                        let Some(label) = label else {
                            graph.remove_edges(from, to);
                            continue;
                        };
                        if graph.is_linked(from, to) {
                            continue;
                        }
                        match graph.set(from.clone(), to.clone(), label) {
                            Ok(()) => {}
                            Err(GraphError::Unsupported(reason)) => {
                                trace!(from = ?from, to = ?to, %reason, "link rejected by graph");
                            }
                            Err(e) => return Err(e),
                        }
                    }
                }
            }
            Ok(())
        })
    }
}
