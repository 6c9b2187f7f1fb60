use thiserror::Error;

/// Errors reported by graph mutations and the engines that drive them.
///
/// Expected misses (removing something that is not there, querying an
/// unreachable node) are not errors; they yield `false`, `None`, or an empty
/// iterator instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A parameter violates a documented bound, e.g. a zero weight or an
    /// attachment count not smaller than the graph.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The graph variant cannot represent the requested structure, e.g. a
    /// self-loop or a second label between the same pair in a simple graph.
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

impl GraphError {
    /// Returns true for [`GraphError::Unsupported`], the one condition that
    /// best-effort builders skip over.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, GraphError::Unsupported(_))
    }
}
