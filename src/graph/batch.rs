use crate::{VertexIndex, error::GraphError, error::Result};

/// Per-element outcome of a batch operation such as
/// [`Graph::add_new_vertices`](crate::Graph::add_new_vertices).
///
/// Each element is applied independently; `Ok(true)` means the element changed
/// the graph, `Ok(false)` that it was a no-op (e.g. a duplicate index).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    outcomes: Vec<(VertexIndex, Result<bool>)>,
}

impl BatchReport {
    /// All outcomes in the order the indices were given.
    pub fn iter(&self) -> impl Iterator<Item = (VertexIndex, Result<bool>)> + '_ {
        self.outcomes.iter().copied()
    }

    /// Indices that changed the graph.
    pub fn succeeded(&self) -> impl Iterator<Item = VertexIndex> + '_ {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| *outcome == Ok(true))
            .map(|(index, _)| *index)
    }

    /// Indices that were valid but left the graph unchanged.
    pub fn unchanged(&self) -> impl Iterator<Item = VertexIndex> + '_ {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| *outcome == Ok(false))
            .map(|(index, _)| *index)
    }

    /// Indices that were rejected, with the reason.
    pub fn failed(&self) -> impl Iterator<Item = (VertexIndex, GraphError)> + '_ {
        self.outcomes
            .iter()
            .filter_map(|(index, outcome)| outcome.err().map(|err| (*index, err)))
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes
            .iter()
            .all(|(_, outcome)| *outcome == Ok(true))
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl FromIterator<(VertexIndex, Result<bool>)> for BatchReport {
    fn from_iter<I: IntoIterator<Item = (VertexIndex, Result<bool>)>>(iter: I) -> Self {
        Self {
            outcomes: iter.into_iter().collect(),
        }
    }
}
