//! Adjacency-matrix text formats.
//!
//! The full form prints one row per node, `1` where the row node links to
//! the column node.  The sparse form lists one `row col weight` triple per
//! linked pair, 1-indexed, between lines holding `[` and `]`:
//!
//! ```text
//! [
//!  1 2 1
//!  2 3 4
//! ]
//! ```
//!
//! Nodes are numbered in graph iteration order.

use std::{io, num::ParseIntError};

use crate::{
    Graph, GraphError, GraphMut,
    rewire::EdgeLabeler,
    tracing_support::{trace, warn},
};

#[derive(Debug, thiserror::Error)]
pub enum MatrixError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("no opening '[' found")]
    MissingStart,
    #[error("input ended inside the matrix")]
    UnexpectedEnd,
    #[error("invalid weight {token:?}: {source}")]
    InvalidWeight {
        token: String,
        #[source]
        source: ParseIntError,
    },
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Writes the full matrix.  The diagonal is always 0.
pub fn write_full<G: Graph>(graph: &G, out: &mut impl io::Write) -> Result<(), MatrixError> {
    let nodes: Vec<_> = graph.nodes().collect();
    for (i, from) in nodes.iter().enumerate() {
        out.write_all(if i == 0 { "[ " } else { "  " }.as_bytes())?;
        for (j, to) in nodes.iter().enumerate() {
            let bit = i != j && graph.is_linked(from, to);
            write!(out, "{} ", u8::from(bit))?;
        }
        out.write_all(if i + 1 == nodes.len() { "]\n" } else { "\n" }.as_bytes())?;
    }
    Ok(())
}

/// Writes the sparse form, with the weight of some edge of each linked pair.
pub fn write_sparse<G: Graph>(graph: &G, out: &mut impl io::Write) -> Result<(), MatrixError> {
    let nodes: Vec<_> = graph.nodes().collect();
    writeln!(out, "[")?;
    for (i, from) in nodes.iter().enumerate() {
        for (j, to) in nodes.iter().enumerate() {
            if let Some(edge) = graph.edge(from, to) {
                writeln!(out, " {} {} {}", i + 1, j + 1, edge.weight())?;
            }
        }
    }
    writeln!(out, "]")?;
    Ok(())
}

/// Reads the sparse form into `graph`.
///
/// Lines before the one holding `[` are skipped.  Each node token is
/// mapped through `node_labeler`, and each edge labeled by
/// `edge_labeler`; vetoed edges and edges the graph cannot hold are
/// skipped.  Returns the number of edges set.
pub fn parse_sparse<G, NL, EL>(
    text: &str,
    graph: &mut G,
    mut node_labeler: NL,
    mut edge_labeler: EL,
) -> Result<usize, MatrixError>
where
    G: GraphMut,
    NL: FnMut(&str) -> G::Node,
    EL: EdgeLabeler<G::Node, G::Label>,
{
    let mut lines = text.lines();
    lines
        .by_ref()
        .find(|line| line.contains('['))
        .ok_or(MatrixError::MissingStart)?;

    let mut tokens = lines.flat_map(str::split_whitespace);
    let mut set = 0;
    loop {
        let first = tokens.next().ok_or(MatrixError::UnexpectedEnd)?;
        if first == "]" {
            return Ok(set);
        }
        let (Some(second), Some(weight)) = (tokens.next(), tokens.next()) else {
            return Err(MatrixError::UnexpectedEnd);
        };
        let weight: u32 = weight.parse().map_err(|source| MatrixError::InvalidWeight {
            token: weight.to_string(),
            source,
        })?;
        let from = node_labeler(first);
        let to = node_labeler(second);
        let Some(label) = edge_labeler.label(&from, &to) else {
            trace!(from = ?from, to = ?to, "edge vetoed by labeler");
            continue;
        };
        match graph.set_weighted(from.clone(), to.clone(), label, weight) {
            Ok(()) => set += 1,
            Err(GraphError::Unsupported(reason)) => {
                warn!(from = ?from, to = ?to, weight, %reason, "could not create edge");
            }
            Err(e) => return Err(e.into()),
        }
    }
}
