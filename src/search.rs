//! Breadth-first and depth-first traversal.
//!
//! Both walks are iterative and may be confined to a subset of the vertices,
//! in which case they follow only edges of the induced subgraph.  They are the
//! only mechanism the crate uses to decide connectivity.

use std::collections::{BTreeSet, HashSet, VecDeque};

use crate::{Graph, VertexIndex, error::Result, tracing_support::info_span};

const DEFAULT_HASH_SET_CAPACITY: usize = 64;

/// Yields vertices level by level from the start vertices.
pub struct BfsIterator<'g, T> {
    graph: &'g Graph<T>,
    within: Option<&'g BTreeSet<VertexIndex>>,
    visited: HashSet<VertexIndex>,
    queue: VecDeque<VertexIndex>,
}

impl<'g, T> BfsIterator<'g, T> {
    pub(crate) fn new(
        graph: &'g Graph<T>,
        start: Vec<VertexIndex>,
        within: Option<&'g BTreeSet<VertexIndex>>,
    ) -> Self {
        Self {
            graph,
            within,
            visited: HashSet::with_capacity(DEFAULT_HASH_SET_CAPACITY),
            queue: start.into(),
        }
    }
}

impl<T> Iterator for BfsIterator<'_, T> {
    type Item = VertexIndex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(vid) = self.queue.pop_front() {
            if !self.visited.insert(vid) {
                continue;
            }
            for neighbour in self.graph.neighbours_of(vid) {
                if !self.visited.contains(&neighbour) && admits(self.within, neighbour) {
                    self.queue.push_back(neighbour);
                }
            }
            return Some(vid);
        }
        None
    }
}

/// Yields vertices branch by branch, lowest neighbour first.
pub struct DfsIterator<'g, T> {
    graph: &'g Graph<T>,
    within: Option<&'g BTreeSet<VertexIndex>>,
    visited: HashSet<VertexIndex>,
    stack: Vec<VertexIndex>,
}

impl<'g, T> DfsIterator<'g, T> {
    pub(crate) fn new(
        graph: &'g Graph<T>,
        start: Vec<VertexIndex>,
        within: Option<&'g BTreeSet<VertexIndex>>,
    ) -> Self {
        let mut stack = start;
        stack.reverse();
        Self {
            graph,
            within,
            visited: HashSet::with_capacity(DEFAULT_HASH_SET_CAPACITY),
            stack,
        }
    }
}

impl<T> Iterator for DfsIterator<'_, T> {
    type Item = VertexIndex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(vid) = self.stack.pop() {
            if self.visited.insert(vid) {
                let successors = self
                    .graph
                    .neighbours_of(vid)
                    .filter(|n| !self.visited.contains(n) && admits(self.within, *n))
                    .collect::<Vec<_>>();
                self.stack.extend(successors.into_iter().rev());
                return Some(vid);
            }
        }
        None
    }
}

fn admits(within: Option<&BTreeSet<VertexIndex>>, vid: VertexIndex) -> bool {
    within.is_none_or(|subset| subset.contains(&vid))
}

impl<T> Graph<T> {
    /// Lazily walks the graph breadth-first from `start`.
    pub fn bfs(&self, start: impl IntoIterator<Item = VertexIndex>) -> Result<BfsIterator<'_, T>> {
        let start = self.resolve_start(start)?;
        Ok(BfsIterator::new(self, start, None))
    }

    /// Lazily walks the graph depth-first from `start`.
    pub fn dfs(&self, start: impl IntoIterator<Item = VertexIndex>) -> Result<DfsIterator<'_, T>> {
        let start = self.resolve_start(start)?;
        Ok(DfsIterator::new(self, start, None))
    }

    /// All vertices reachable from any vertex of `start`, found breadth-first.
    pub fn breadth_first_search(
        &self,
        start: impl IntoIterator<Item = VertexIndex>,
    ) -> Result<BTreeSet<VertexIndex>> {
        let _span = info_span!("breadth_first_search").entered();
        Ok(self.bfs(start)?.collect())
    }

    /// All vertices reachable from any vertex of `start`, found depth-first.
    pub fn depth_first_search(
        &self,
        start: impl IntoIterator<Item = VertexIndex>,
    ) -> Result<BTreeSet<VertexIndex>> {
        let _span = info_span!("depth_first_search").entered();
        Ok(self.dfs(start)?.collect())
    }

    /// Number of vertices of `subset` reachable from its lowest member using
    /// only edges inside `subset`.  The caller guarantees every member is a
    /// vertex of the graph.
    pub(crate) fn reach_within(&self, subset: &BTreeSet<VertexIndex>) -> usize {
        match subset.first() {
            Some(&first) => DfsIterator::new(self, vec![first], Some(subset)).count(),
            None => 0,
        }
    }

    fn resolve_start(
        &self,
        start: impl IntoIterator<Item = VertexIndex>,
    ) -> Result<Vec<VertexIndex>> {
        start
            .into_iter()
            .map(|index| self.vertex(index).map(|vertex| vertex.index()))
            .collect()
    }
}
