use crate::{
    Graph, GraphError, VertexIndex,
    error::{Result, check_non_negative},
    tracing_support::debug,
};

impl<T> Graph<T> {
    /// Builds a complete graph on `vertex_count` consecutive indices starting
    /// at `start_index`.  If the range would run past [`VertexIndex::MAX`] it
    /// starts at zero instead.  A count larger than the whole index range is
    /// [`GraphError::VertexCountOverflow`].
    pub fn complete(start_index: VertexIndex, vertex_count: usize) -> Result<Self> {
        let mut graph = Self::new();
        graph.generate_complete_if_empty(start_index, vertex_count)?;
        Ok(graph)
    }

    /// Fills an empty graph with a complete graph over a contiguous index
    /// range.  A graph that already has vertices is left alone; returns
    /// whether anything was generated.
    pub fn generate_complete_if_empty(
        &mut self,
        start_index: VertexIndex,
        vertex_count: usize,
    ) -> Result<bool> {
        check_non_negative(start_index)?;
        let span = match vertex_count.checked_sub(1).map(VertexIndex::try_from) {
            None => 0,
            Some(Ok(span)) => span,
            Some(Err(_)) => return Err(GraphError::VertexCountOverflow(vertex_count)),
        };
        if !self.is_empty() || vertex_count == 0 {
            return Ok(false);
        }
        let start = if VertexIndex::MAX - start_index < span {
            0
        } else {
            start_index
        };
        let last = start + span;
        self.add_new_vertices(start..=last);
        self.map_to_complete();
        debug!(start, vertex_count, "generated complete graph");
        Ok(true)
    }

    /// True iff every pair of distinct vertices is adjacent.  Graphs with
    /// fewer than two vertices are complete.
    pub fn is_complete(&self) -> bool {
        let n = self.num_vertices();
        self.iter_vertices().all(|vertex| vertex.degree() + 1 == n)
    }

    /// Whether adding edges alone can make this graph complete.  For a
    /// simple undirected graph this always holds.
    pub fn can_be_mapped_to_complete(&self) -> bool {
        true
    }

    /// Adds every missing edge in place and returns how many were added.
    pub fn map_to_complete(&mut self) -> usize {
        if !self.can_be_mapped_to_complete() || self.is_complete() {
            return 0;
        }
        let indices = self.vertices().to_vec();
        let mut added = 0;
        for (i, &v) in indices.iter().enumerate() {
            for &u in &indices[i + 1..] {
                if self.connect_vertices(v, u) == Ok(true) {
                    added += 1;
                }
            }
        }
        debug!(added, "mapped graph to complete");
        added
    }
}
