//! The [`Graph`] container: an arena of [`Vertex`] values keyed by index.
//!
//! Adjacency is stored as sets of indices on each vertex, so there are no
//! references between vertices and no cyclic ownership.  Every mutation keeps
//! two invariants:
//!
//! - adjacency is symmetric: `u` lists `v` iff `v` lists `u`;
//! - every neighbour index names a vertex that is present in the graph.
//!
//! Index-taking operations validate their arguments first.  Negative indices
//! fail with [`GraphError::NegativeVertexIndex`], absent ones with
//! [`GraphError::NoSuchVertexIndex`].

mod batch;
mod complete;

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use derivative::Derivative;

pub use batch::BatchReport;

use crate::{
    VertexIndex,
    error::{GraphError, Result, check_non_negative},
    graph_id::GraphId,
    index_view::IndexView,
    tracing_support::debug,
    vertex::Vertex,
};

/// An undirected, simple graph whose vertices are identified by non-negative
/// indices and may carry a payload of type `T`.
///
/// Loops and parallel edges cannot be created.  Iteration over vertices is in
/// ascending index order.  Each graph, and each clone of one, has its own
/// [`GraphId`], stamped on every vertex it holds.
#[derive(Derivative)]
#[derivative(Debug(bound = "T: fmt::Debug"), Default(bound = ""))]
pub struct Graph<T = ()> {
    id: GraphId,
    vertices: BTreeMap<VertexIndex, Vertex<T>>,
}

impl<T: Clone> Clone for Graph<T> {
    fn clone(&self) -> Self {
        let id = GraphId::new();
        let vertices = self
            .vertices
            .iter()
            .map(|(&index, vertex)| {
                let mut vertex = vertex.clone();
                vertex.restamp(id);
                (index, vertex)
            })
            .collect();
        Self { id, vertices }
    }
}

impl<T> Graph<T> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            id: GraphId::new(),
            vertices: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.vertices.values().map(Vertex::degree).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Removes every vertex and edge.
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    // Lookup

    /// Gets the vertex with the given index.
    pub fn vertex(&self, index: VertexIndex) -> Result<&Vertex<T>> {
        check_non_negative(index)?;
        self.vertices
            .get(&index)
            .ok_or(GraphError::NoSuchVertexIndex(index))
    }

    fn vertex_mut(&mut self, index: VertexIndex) -> Result<&mut Vertex<T>> {
        check_non_negative(index)?;
        self.vertices
            .get_mut(&index)
            .ok_or(GraphError::NoSuchVertexIndex(index))
    }

    /// Iterates over the vertices in ascending index order.
    pub fn iter_vertices(&self) -> impl Iterator<Item = &Vertex<T>> + '_ {
        self.vertices.values()
    }

    /// Gets a read-only snapshot of the vertex indices.
    pub fn vertices(&self) -> IndexView<'static> {
        IndexView::owned(self.vertices.keys().copied().collect())
    }

    /// Gets a read-only view of the neighbours of a vertex.
    pub fn vertex_neighbourhood(&self, index: VertexIndex) -> Result<IndexView<'_>> {
        self.vertex(index)
            .map(|vertex| IndexView::borrowed(vertex.neighbours()))
    }

    pub fn vertex_data(&self, index: VertexIndex) -> Result<Option<&T>> {
        self.vertex(index).map(Vertex::data)
    }

    /// Stores `data` in a vertex and returns the payload it replaced.
    pub fn set_vertex_data(&mut self, index: VertexIndex, data: T) -> Result<Option<T>> {
        self.vertex_mut(index).map(|vertex| vertex.set_data(data))
    }

    /// True iff a vertex with the given index is present.
    pub fn is_vertex_of_graph(&self, index: VertexIndex) -> Result<bool> {
        check_non_negative(index)?;
        Ok(self.vertices.contains_key(&index))
    }

    /// True iff `indices` is non-empty and every index names a vertex of the
    /// graph.  Any negative index fails the whole check.
    pub fn are_vertices_of_graph(
        &self,
        indices: impl IntoIterator<Item = VertexIndex>,
    ) -> Result<bool> {
        let mut any = false;
        let mut all = true;
        for index in indices {
            any = true;
            all &= self.is_vertex_of_graph(index)?;
        }
        Ok(any && all)
    }

    // Mapping between indices and vertices

    /// Resolves indices to vertices, failing on the first bad index.
    pub fn map_indexes_to_vertices(
        &self,
        indices: impl IntoIterator<Item = VertexIndex>,
    ) -> Result<Vec<&Vertex<T>>> {
        indices
            .into_iter()
            .map(|index| self.vertex(index))
            .collect()
    }

    /// Collects the indices of the given vertices into a read-only view.
    pub fn map_vertices_to_indexes<'v>(
        vertices: impl IntoIterator<Item = &'v Vertex<T>>,
    ) -> IndexView<'static>
    where
        T: 'v,
    {
        IndexView::owned(vertices.into_iter().map(Vertex::index).collect())
    }

    /// Validates `indices` and collects them into a set.  Duplicates collapse.
    pub(crate) fn resolve_subset(
        &self,
        indices: impl IntoIterator<Item = VertexIndex>,
    ) -> Result<BTreeSet<VertexIndex>> {
        indices
            .into_iter()
            .map(|index| self.vertex(index).map(Vertex::index))
            .collect()
    }

    /// Neighbours of a vertex already known to be present.
    pub(crate) fn neighbours_of(
        &self,
        index: VertexIndex,
    ) -> impl Iterator<Item = VertexIndex> + '_ {
        self.vertices
            .get(&index)
            .into_iter()
            .flat_map(|vertex| vertex.neighbours().iter().copied())
    }

    #[cfg(test)]
    pub(crate) fn adjacent(&self, v: VertexIndex, u: VertexIndex) -> bool {
        self.vertices
            .get(&v)
            .is_some_and(|vertex| vertex.neighbours().contains(&u))
    }

    pub(crate) fn index_set(&self) -> BTreeSet<VertexIndex> {
        self.vertices.keys().copied().collect()
    }

    // Mutation

    /// Adds a vertex without neighbours.  Returns `Ok(false)` and leaves the
    /// graph unchanged if the index is already taken.
    pub fn add_new_vertex(&mut self, index: VertexIndex) -> Result<bool> {
        if self.is_vertex_of_graph(index)? {
            return Ok(false);
        }
        self.vertices.insert(index, Vertex::new(self.id, index));
        debug!(index, "added vertex");
        Ok(true)
    }

    /// Adds a vertex and stores `data` in it.  The payload of an existing
    /// vertex is left untouched.
    pub fn add_new_vertex_with_data(&mut self, index: VertexIndex, data: T) -> Result<bool> {
        let added = self.add_new_vertex(index)?;
        if added {
            self.set_vertex_data(index, data)?;
        }
        Ok(added)
    }

    /// Adds every index independently.  One bad index does not stop the
    /// others from being added.
    pub fn add_new_vertices(
        &mut self,
        indices: impl IntoIterator<Item = VertexIndex>,
    ) -> BatchReport {
        indices
            .into_iter()
            .map(|index| (index, self.add_new_vertex(index)))
            .collect()
    }

    /// Removes a vertex together with every edge touching it and returns its
    /// payload.
    pub fn remove_vertex(&mut self, index: VertexIndex) -> Result<Option<T>> {
        self.vertex(index)?;
        let Some(vertex) = self.vertices.remove(&index) else {
            return Err(GraphError::NoSuchVertexIndex(index));
        };
        for neighbour in vertex.neighbours() {
            if let Some(other) = self.vertices.get_mut(neighbour) {
                other.forget(index);
            }
        }
        debug!(index, degree = vertex.degree(), "removed vertex");
        Ok(vertex.into_data())
    }

    /// Removes every index independently and reports the outcome of each.
    pub fn remove_vertices(
        &mut self,
        indices: impl IntoIterator<Item = VertexIndex>,
    ) -> BatchReport {
        indices
            .into_iter()
            .map(|index| (index, self.remove_vertex(index).map(|_| true)))
            .collect()
    }

    /// Connects two vertices.  Returns `Ok(false)` if they are the same vertex
    /// or already adjacent.
    pub fn connect_vertices(
        &mut self,
        index_v: VertexIndex,
        index_u: VertexIndex,
    ) -> Result<bool> {
        let connected = self.with_pair(index_v, index_u, Vertex::connect_with)?;
        if connected {
            debug!(index_v, index_u, "connected vertices");
        }
        Ok(connected)
    }

    /// Disconnects two vertices.  Returns `Ok(false)` if they were not
    /// adjacent.
    pub fn disconnect_vertices(
        &mut self,
        index_v: VertexIndex,
        index_u: VertexIndex,
    ) -> Result<bool> {
        let disconnected = self.with_pair(index_v, index_u, Vertex::disconnect_with)?;
        if disconnected {
            debug!(index_v, index_u, "disconnected vertices");
        }
        Ok(disconnected)
    }

    /// Validates both indices, then hands both vertices to `f` mutably.  A
    /// pair naming a single vertex is never handed out; `f` is treated as
    /// having refused it.
    fn with_pair(
        &mut self,
        index_v: VertexIndex,
        index_u: VertexIndex,
        f: impl FnOnce(&mut Vertex<T>, &mut Vertex<T>) -> bool,
    ) -> Result<bool> {
        check_non_negative(index_v)?;
        check_non_negative(index_u)?;
        self.vertex(index_v)?;
        self.vertex(index_u)?;
        if index_v == index_u {
            return Ok(false);
        }
        let Some(mut v) = self.vertices.remove(&index_v) else {
            return Err(GraphError::NoSuchVertexIndex(index_v));
        };
        let result = match self.vertices.get_mut(&index_u) {
            Some(u) => Ok(f(&mut v, u)),
            None => Err(GraphError::NoSuchVertexIndex(index_u)),
        };
        self.vertices.insert(index_v, v);
        result
    }
}

/// One line per vertex in ascending index order:
/// `index -> [neighbours]`, followed by `, content: <payload>` when the vertex
/// carries one.
impl<T: fmt::Debug> fmt::Display for Graph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, vertex) in self.vertices.values().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{vertex}")?;
            if let Some(data) = vertex.data() {
                write!(f, ", content: {data:?}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph() -> Graph {
        let mut graph = Graph::new();
        graph.add_new_vertices(0..5);
        for i in 0..4 {
            graph.connect_vertices(i, i + 1).unwrap();
        }
        graph
    }

    #[test]
    fn test_vertices_of_different_graphs_do_not_relate() {
        let mut first: Graph = Graph::new();
        first.add_new_vertices([0, 1]);
        first.connect_vertices(0, 1).unwrap();
        let mut second: Graph = Graph::new();
        second.add_new_vertices([1, 2]);
        assert_ne!(first.id(), second.id());

        let v = first.vertex(0).unwrap();
        assert!(!v.can_connect_with(second.vertex(2).unwrap()));
        assert!(!v.is_connected_with(second.vertex(1).unwrap()));
        assert!(!v.can_disconnect_with(second.vertex(1).unwrap()));
        assert_ne!(first.vertex(1), second.vertex(1));
        assert!(v.is_connected_with(first.vertex(1).unwrap()));
    }

    #[test]
    fn test_clone_gets_its_own_identity() {
        let graph = path_graph();
        let copy = graph.clone();
        assert_ne!(copy.id(), graph.id());
        let id = copy.id();
        assert!(copy.iter_vertices().all(|vertex| vertex.graph_id() == id));
        assert_eq!(copy.to_string(), graph.to_string());
        let original = graph.vertex(0).unwrap();
        let copied_neighbour = copy.vertex(1).unwrap();
        assert!(!original.is_connected_with(copied_neighbour));
        assert!(copy.vertex(0).unwrap().is_connected_with(copied_neighbour));
    }

    #[test]
    fn test_new_graph_is_empty() {
        let graph: Graph = Graph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.num_vertices(), 0);
        assert_eq!(graph.num_edges(), 0);
        assert_eq!(graph.to_string(), "");
    }

    #[test]
    fn test_add_then_remove_round_trip() {
        let mut graph: Graph = Graph::new();
        assert_eq!(graph.add_new_vertex(42), Ok(true));
        assert_eq!(graph.is_vertex_of_graph(42), Ok(true));
        assert_eq!(graph.remove_vertex(42), Ok(None));
        assert_eq!(graph.is_vertex_of_graph(42), Ok(false));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_add_duplicate_is_refused() {
        let mut graph: Graph = Graph::new();
        assert_eq!(graph.add_new_vertex(1), Ok(true));
        assert_eq!(graph.add_new_vertex(1), Ok(false));
        assert_eq!(graph.num_vertices(), 1);
    }

    #[test]
    fn test_negative_index_is_reported_first() {
        let mut graph: Graph = Graph::new();
        assert_eq!(
            graph.is_vertex_of_graph(-1),
            Err(GraphError::NegativeVertexIndex(-1))
        );
        assert_eq!(
            graph.add_new_vertex(-7),
            Err(GraphError::NegativeVertexIndex(-7))
        );
        assert_eq!(
            graph.connect_vertices(99, -2),
            Err(GraphError::NegativeVertexIndex(-2))
        );
    }

    #[test]
    fn test_connect_absent_vertex() {
        let mut graph: Graph = Graph::new();
        graph.add_new_vertices(0..3);
        assert_eq!(
            graph.connect_vertices(0, 99),
            Err(GraphError::NoSuchVertexIndex(99))
        );
        assert_eq!(graph.num_edges(), 0);
    }

    #[test]
    fn test_connect_disconnect_round_trip() {
        let mut graph = path_graph();
        let before_v = graph.vertex_neighbourhood(0).unwrap().to_set();
        let before_u = graph.vertex_neighbourhood(3).unwrap().to_set();
        assert_eq!(graph.connect_vertices(0, 3), Ok(true));
        assert!(graph.vertex_neighbourhood(3).unwrap().contains(0));
        assert_eq!(graph.disconnect_vertices(3, 0), Ok(true));
        assert_eq!(graph.vertex_neighbourhood(0).unwrap(), before_v);
        assert_eq!(graph.vertex_neighbourhood(3).unwrap(), before_u);
    }

    #[test]
    fn test_connect_self_is_refused() {
        let mut graph = path_graph();
        assert_eq!(graph.connect_vertices(2, 2), Ok(false));
        assert_eq!(graph.disconnect_vertices(2, 2), Ok(false));
        assert_eq!(graph.vertex(2).unwrap().degree(), 2);
    }

    #[test]
    fn test_remove_vertex_cleans_neighbours() {
        let mut graph = path_graph();
        graph.remove_vertex(2).unwrap();
        assert!(!graph.vertex_neighbourhood(1).unwrap().contains(2));
        assert!(!graph.vertex_neighbourhood(3).unwrap().contains(2));
        assert_eq!(graph.num_edges(), 2);
        assert_eq!(
            graph.remove_vertex(2),
            Err(GraphError::NoSuchVertexIndex(2))
        );
    }

    #[test]
    fn test_batch_add_reports_each_element() {
        let mut graph: Graph = Graph::new();
        graph.add_new_vertex(2).unwrap();
        let report = graph.add_new_vertices([1, 2, -3, 4]);
        assert_eq!(report.succeeded().collect::<Vec<_>>(), vec![1, 4]);
        assert_eq!(report.unchanged().collect::<Vec<_>>(), vec![2]);
        assert_eq!(
            report.failed().collect::<Vec<_>>(),
            vec![(-3, GraphError::NegativeVertexIndex(-3))]
        );
        assert!(!report.all_succeeded());
        assert_eq!(graph.vertices().to_vec(), vec![1, 2, 4]);
    }

    #[test]
    fn test_batch_remove_continues_after_failure() {
        let mut graph = path_graph();
        let report = graph.remove_vertices([0, 17, 4]);
        assert_eq!(report.succeeded().collect::<Vec<_>>(), vec![0, 4]);
        assert_eq!(
            report.failed().collect::<Vec<_>>(),
            vec![(17, GraphError::NoSuchVertexIndex(17))]
        );
        assert_eq!(graph.vertices().to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_vertices_view_is_read_only() {
        let graph = path_graph();
        let mut view = graph.vertices();
        assert_eq!(view.try_insert(10), Err(GraphError::ImmutableViewViolation));
        let mut neighbours = graph.vertex_neighbourhood(1).unwrap();
        assert_eq!(
            neighbours.try_remove(0),
            Err(GraphError::ImmutableViewViolation)
        );
        assert_eq!(graph.num_vertices(), 5);
    }

    #[test]
    fn test_vertex_data() {
        let mut graph = Graph::new();
        assert_eq!(graph.add_new_vertex_with_data(1, "Hello"), Ok(true));
        assert_eq!(graph.add_new_vertex_with_data(1, "ignored"), Ok(false));
        graph.add_new_vertex(2).unwrap();
        assert_eq!(graph.vertex_data(1), Ok(Some(&"Hello")));
        assert_eq!(graph.vertex_data(2), Ok(None));
        assert_eq!(graph.set_vertex_data(2, "World"), Ok(None));
        assert_eq!(graph.set_vertex_data(2, "there"), Ok(Some("World")));
        assert_eq!(graph.vertex_data(3), Err(GraphError::NoSuchVertexIndex(3)));
    }

    #[test]
    fn test_are_vertices_of_graph() {
        let graph = path_graph();
        assert_eq!(graph.are_vertices_of_graph([0, 4]), Ok(true));
        assert_eq!(graph.are_vertices_of_graph([0, 5]), Ok(false));
        assert_eq!(graph.are_vertices_of_graph([]), Ok(false));
        assert_eq!(
            graph.are_vertices_of_graph([1, -1, 2]),
            Err(GraphError::NegativeVertexIndex(-1))
        );
    }

    #[test]
    fn test_mapping_helpers() {
        let graph = path_graph();
        let vertices = graph.map_indexes_to_vertices([3, 1]).unwrap();
        assert_eq!(vertices[0].index(), 3);
        let view = Graph::map_vertices_to_indexes(vertices);
        assert_eq!(view.to_vec(), vec![1, 3]);
        assert!(matches!(
            graph.map_indexes_to_vertices([1, 8]),
            Err(GraphError::NoSuchVertexIndex(8))
        ));
    }

    #[test]
    fn test_clear() {
        let mut graph = path_graph();
        assert_eq!(graph.num_edges(), 4);
        graph.clear();
        assert!(graph.is_empty());
        assert_eq!(graph.num_edges(), 0);
        assert_eq!(graph.add_new_vertex(0), Ok(true));
        assert_eq!(graph.vertex(0).unwrap().degree(), 0);
    }

    #[test]
    fn test_display() {
        let mut graph = Graph::new();
        graph.add_new_vertex_with_data(1, "Hello").unwrap();
        graph.add_new_vertices([3, 2]);
        graph.connect_vertices(1, 3).unwrap();
        graph.connect_vertices(3, 2).unwrap();
        assert_eq!(
            graph.to_string(),
            "1 -> [3], content: \"Hello\"\n2 -> [3]\n3 -> [1, 2]"
        );
    }
}
