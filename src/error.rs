use crate::VertexIndex;

/// Errors raised by index-taking graph operations.
///
/// Index validation always happens before any other logic, and a negative
/// index is reported as [`GraphError::NegativeVertexIndex`] even when the
/// graph happens to be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A vertex index was negative.
    #[error("Vertex index cannot be negative: {0}")]
    NegativeVertexIndex(VertexIndex),
    /// A well-formed vertex index does not name a vertex of the graph.
    #[error("There is no vertex with index {0} in the graph")]
    NoSuchVertexIndex(VertexIndex),
    /// A caller tried to change a read-only view handed out by the graph.
    #[error("Read-only view of graph indices cannot be modified")]
    ImmutableViewViolation,
    /// A requested vertex count does not fit in the index range.
    #[error("Cannot fit {0} vertices into the vertex index range")]
    VertexCountOverflow(usize),
}

pub type Result<T, E = GraphError> = std::result::Result<T, E>;

/// Fails with [`GraphError::NegativeVertexIndex`] for negative input.
pub(crate) fn check_non_negative(index: VertexIndex) -> Result<VertexIndex> {
    if index < 0 {
        Err(GraphError::NegativeVertexIndex(index))
    } else {
        Ok(index)
    }
}
