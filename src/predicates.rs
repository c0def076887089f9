//! Structural predicates over the whole graph and over induced subgraphs.
//!
//! Predicates taking indices validate them before doing anything else.  The
//! set-level checks used by the subset search live here too, in unchecked
//! form, so the search can call them on candidates it already knows are valid.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::{
    Graph, VertexIndex,
    error::{Result, check_non_negative},
    tracing_support::info_span,
};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Colour {
    Red,
    Blue,
}

impl Colour {
    fn other(self) -> Self {
        match self {
            Colour::Red => Colour::Blue,
            Colour::Blue => Colour::Red,
        }
    }
}

impl<T> Graph<T> {
    /// True iff a traversal from any vertex reaches all of them.  The empty
    /// graph counts as connected.
    pub fn is_connected(&self) -> bool {
        let _span = info_span!("is_connected", vertices = self.num_vertices())
            .entered();
        self.is_connected_subset(&self.index_set())
    }

    /// True iff the vertices can be two-coloured with every edge joining
    /// differently coloured vertices.  Each connected component is coloured
    /// on its own.
    pub fn is_bipartite(&self) -> bool {
        let _span = info_span!("is_bipartite", vertices = self.num_vertices())
            .entered();
        self.is_bipartite_subset(&self.index_set())
    }

    /// Whether the subgraph induced by `indices` is connected.
    pub fn do_induce_connected_subgraph(
        &self,
        indices: impl IntoIterator<Item = VertexIndex>,
    ) -> Result<bool> {
        let subset = self.resolve_subset(indices)?;
        Ok(self.is_connected_subset(&subset))
    }

    /// Whether the subgraph induced by `indices` is bipartite.
    pub fn do_induce_bipartite_subgraph(
        &self,
        indices: impl IntoIterator<Item = VertexIndex>,
    ) -> Result<bool> {
        let subset = self.resolve_subset(indices)?;
        Ok(self.is_bipartite_subset(&subset))
    }

    /// True iff no two of the given vertices are adjacent.
    pub fn is_independent_set(
        &self,
        indices: impl IntoIterator<Item = VertexIndex>,
    ) -> Result<bool> {
        let subset = self.resolve_subset(indices)?;
        Ok(self.is_independent_subset(&subset))
    }

    /// True iff every vertex of the graph is in the given set or adjacent to
    /// one of its members.
    pub fn is_dominating_set(
        &self,
        indices: impl IntoIterator<Item = VertexIndex>,
    ) -> Result<bool> {
        let subset = self.resolve_subset(indices)?;
        Ok(self.is_dominating_subset(&subset))
    }

    /// True iff the given set is dominating and induces a connected subgraph.
    #[allow(clippy::upper_case_acronyms)]
    pub fn is_cds(&self, indices: impl IntoIterator<Item = VertexIndex>) -> Result<bool> {
        let subset = self.resolve_subset(indices)?;
        Ok(self.is_cds_subset(&subset))
    }

    /// Membership of `index` in an explicit collection, such as a view
    /// returned by one of the searches, rather than in the graph.  Negative
    /// indices are rejected as everywhere else.
    pub fn is_vertex_of_subgraph(
        &self,
        collection: impl IntoIterator<Item = VertexIndex>,
        index: VertexIndex,
    ) -> Result<bool> {
        check_non_negative(index)?;
        Ok(collection.into_iter().any(|member| member == index))
    }

    /// Partitions the vertices into connected components.
    #[cfg(feature = "pathfinding")]
    pub fn connected_components(&self) -> Vec<BTreeSet<VertexIndex>> {
        let starts = self.vertices().to_vec();
        let mut components: Vec<BTreeSet<VertexIndex>> =
            pathfinding::prelude::connected_components(&starts, |&vid| {
                self.neighbours_of(vid).collect::<Vec<_>>()
            })
            .into_iter()
            .map(|component| component.into_iter().collect())
            .collect();
        components.sort();
        components
    }

    pub(crate) fn is_connected_subset(&self, subset: &BTreeSet<VertexIndex>) -> bool {
        self.reach_within(subset) == subset.len()
    }

    pub(crate) fn is_independent_subset(&self, subset: &BTreeSet<VertexIndex>) -> bool {
        subset
            .iter()
            .all(|&vid| self.neighbours_of(vid).all(|n| !subset.contains(&n)))
    }

    pub(crate) fn is_dominating_subset(&self, subset: &BTreeSet<VertexIndex>) -> bool {
        self.iter_vertices().all(|vertex| {
            subset.contains(&vertex.index())
                || vertex.neighbours().iter().any(|n| subset.contains(n))
        })
    }

    pub(crate) fn is_cds_subset(&self, subset: &BTreeSet<VertexIndex>) -> bool {
        self.is_dominating_subset(subset) && self.is_connected_subset(subset)
    }

    /// Colours each component of the induced subgraph breadth-first,
    /// alternating colours between levels.
    fn is_bipartite_subset(&self, subset: &BTreeSet<VertexIndex>) -> bool {
        let mut colours: BTreeMap<VertexIndex, Colour> = BTreeMap::new();
        let mut queue = VecDeque::new();
        for &root in subset {
            if colours.contains_key(&root) {
                continue;
            }
            colours.insert(root, Colour::Red);
            queue.push_back(root);
            while let Some(vid) = queue.pop_front() {
                let colour = colours[&vid];
                for neighbour in self.neighbours_of(vid).filter(|n| subset.contains(n)) {
                    match colours.get(&neighbour) {
                        None => {
                            colours.insert(neighbour, colour.other());
                            queue.push_back(neighbour);
                        }
                        Some(&c) if c == colour => return false,
                        Some(_) => {}
                    }
                }
            }
        }
        true
    }
}
