//! Exact search for optimal vertex subsets: maximum independent set, minimum
//! dominating set and minimum connected dominating set.
//!
//! All three share one exhaustive search.  Candidate subsets are enumerated
//! size by size, either from the full vertex set downwards or from the empty
//! set upwards, and within one size in lexicographic order of vertex index.
//! The first candidate accepted by the validity predicate is returned, so the
//! result is optimal and ties are always broken the same way.
//!
//! The search costs `O(2^n)` predicate calls and is only meant for small
//! graphs.  There is no cutoff; past [`EXHAUSTIVE_SEARCH_SOFT_LIMIT`] vertices
//! a warning is logged and the search runs anyway.

use std::collections::BTreeSet;

use crate::{
    Graph, VertexIndex,
    index_view::IndexView,
    tracing_support::{TimingScope, debug, info_span, set_timing_scope, warn},
    vertex::Vertex,
};

/// Vertex count above which an exhaustive search logs a warning.
pub const EXHAUSTIVE_SEARCH_SOFT_LIMIT: usize = 24;

/// Order in which subset sizes are tried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchDirection {
    /// From all vertices down to none; the first hit is a largest valid set.
    Descending,
    /// From no vertices up to all; the first hit is a smallest valid set.
    Ascending,
}

/// Lexicographically ordered `k`-combinations of the positions `0..n`.
#[derive(Clone, Debug)]
pub struct Combinations {
    n: usize,
    current: Option<Vec<usize>>,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            current: (k <= n).then(|| (0..k).collect()),
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        let k = current.len();
        let mut successor = current.clone();
        if let Some(i) = (0..k).rev().find(|&i| successor[i] < self.n - k + i) {
            successor[i] += 1;
            for j in i + 1..k {
                successor[j] = successor[j - 1] + 1;
            }
            self.current = Some(successor);
        }
        Some(current)
    }
}

impl<T> Graph<T> {
    /// Returns the first subset, in canonical enumeration order, accepted by
    /// `is_valid`, or `None` if no subset is.
    pub fn find_optimal_subset(
        &self,
        direction: SearchDirection,
        mut is_valid: impl FnMut(&BTreeSet<VertexIndex>) -> bool,
    ) -> Option<BTreeSet<VertexIndex>> {
        let _scope = set_timing_scope(TimingScope::Search);
        let vertices = self.vertices().to_vec();
        let n = vertices.len();
        let _span = info_span!("exhaustive_search", ?direction, vertices = n).entered();
        if n > EXHAUSTIVE_SEARCH_SOFT_LIMIT {
            warn!(
                vertices = n,
                limit = EXHAUSTIVE_SEARCH_SOFT_LIMIT,
                "exhaustive subset search on a large graph"
            );
        }

        let sizes: Vec<usize> = match direction {
            SearchDirection::Descending => (0..=n).rev().collect(),
            SearchDirection::Ascending => (0..=n).collect(),
        };
        for k in sizes {
            for positions in Combinations::new(n, k) {
                let candidate: BTreeSet<VertexIndex> =
                    positions.into_iter().map(|p| vertices[p]).collect();
                if is_valid(&candidate) {
                    debug!(size = k, "exhaustive search found a subset");
                    return Some(candidate);
                }
            }
        }
        debug!("exhaustive search found no subset");
        None
    }

    /// A maximum independent set.
    pub fn compute_mis(&self) -> Vec<&Vertex<T>> {
        let _span = info_span!("compute_mis", vertices = self.num_vertices())
            .entered();
        let found = self
            .find_optimal_subset(SearchDirection::Descending, |candidate| {
                self.is_independent_subset(candidate)
            })
            .unwrap_or_default();
        self.members(&found)
    }

    /// A minimum dominating set.
    pub fn compute_mds(&self) -> Vec<&Vertex<T>> {
        let _span = info_span!("compute_mds", vertices = self.num_vertices())
            .entered();
        let found = self
            .find_optimal_subset(SearchDirection::Ascending, |candidate| {
                self.is_dominating_subset(candidate)
            })
            .unwrap_or_else(|| self.index_set());
        self.members(&found)
    }

    /// A minimum connected dominating set, or `None` when the graph has more
    /// than one vertex and is disconnected, so that no such set exists.
    pub fn compute_mcds(&self) -> Option<Vec<&Vertex<T>>> {
        let _span = info_span!("compute_mcds", vertices = self.num_vertices())
            .entered();
        self.find_optimal_subset(SearchDirection::Ascending, |candidate| {
            self.is_cds_subset(candidate)
        })
        .map(|found| self.members(&found))
    }

    /// Indices of a maximum independent set.
    pub fn find_mis(&self) -> IndexView<'static> {
        Self::map_vertices_to_indexes(self.compute_mis())
    }

    /// Indices of a minimum dominating set.
    pub fn find_mds(&self) -> IndexView<'static> {
        Self::map_vertices_to_indexes(self.compute_mds())
    }

    /// Indices of a minimum connected dominating set, if one exists.
    pub fn find_mcds(&self) -> Option<IndexView<'static>> {
        self.compute_mcds().map(Self::map_vertices_to_indexes)
    }

    fn members(&self, subset: &BTreeSet<VertexIndex>) -> Vec<&Vertex<T>> {
        self.iter_vertices()
            .filter(|vertex| subset.contains(&vertex.index()))
            .collect()
    }
}
