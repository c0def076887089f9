use std::{collections::BTreeSet, fmt};

use derivative::Derivative;

use crate::{VertexIndex, graph_id::GraphId};

/// A vertex of a [`Graph`](crate::Graph): its index, the indices of its
/// neighbours and an optional payload, stamped with the id of the owning graph.
///
/// Two vertices compare equal when they have the same index in the same graph;
/// neighbours and payload do not take part in equality or hashing.  Vertices
/// of different graphs never relate to each other.
#[derive(Derivative)]
#[derivative(
    Debug(bound = "T: fmt::Debug"),
    Clone(bound = "T: Clone"),
    PartialEq(bound = ""),
    Eq(bound = ""),
    Hash(bound = "")
)]
pub struct Vertex<T> {
    graph_id: GraphId,
    index: VertexIndex,
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    neighbours: BTreeSet<VertexIndex>,
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    data: Option<T>,
}

impl<T> Vertex<T> {
    pub(crate) fn new(graph_id: GraphId, index: VertexIndex) -> Self {
        debug_assert!(index >= 0);
        Self {
            graph_id,
            index,
            neighbours: BTreeSet::new(),
            data: None,
        }
    }

    pub fn index(&self) -> VertexIndex {
        self.index
    }

    /// Id of the graph that owns this vertex.
    pub fn graph_id(&self) -> GraphId {
        self.graph_id
    }

    pub(crate) fn restamp(&mut self, graph_id: GraphId) {
        self.graph_id = graph_id;
    }

    fn shares_graph_with(&self, other: &Vertex<T>) -> bool {
        self.graph_id == other.graph_id
    }

    /// Number of neighbours.
    pub fn degree(&self) -> usize {
        self.neighbours.len()
    }

    /// Indices of the neighbours in ascending order.
    pub fn neighbours(&self) -> &BTreeSet<VertexIndex> {
        &self.neighbours
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub(crate) fn set_data(&mut self, data: T) -> Option<T> {
        self.data.replace(data)
    }

    pub(crate) fn into_data(self) -> Option<T> {
        self.data
    }

    /// True iff `other` is a neighbour in the same graph.
    pub fn is_connected_with(&self, other: &Vertex<T>) -> bool {
        self.shares_graph_with(other) && self.neighbours.contains(&other.index)
    }

    /// True iff `other` is a different vertex of the same graph that is not a
    /// neighbour yet.
    pub fn can_connect_with(&self, other: &Vertex<T>) -> bool {
        self.shares_graph_with(other) && self != other && !self.is_connected_with(other)
    }

    /// True iff `other` is a different vertex of the same graph, adjacent on
    /// either side.
    pub fn can_disconnect_with(&self, other: &Vertex<T>) -> bool {
        self.shares_graph_with(other)
            && self != other
            && (self.is_connected_with(other) || other.is_connected_with(self))
    }

    /// Establishes the relation on both endpoints. Returns false, leaving both
    /// untouched, when the vertices cannot be connected.
    pub(crate) fn connect_with(&mut self, other: &mut Vertex<T>) -> bool {
        if !self.can_connect_with(other) || !other.can_connect_with(self) {
            return false;
        }
        self.neighbours.insert(other.index);
        other.neighbours.insert(self.index);
        true
    }

    /// Removes the relation from both endpoints.
    pub(crate) fn disconnect_with(&mut self, other: &mut Vertex<T>) -> bool {
        if !self.can_disconnect_with(other) {
            return false;
        }
        self.neighbours.remove(&other.index);
        other.neighbours.remove(&self.index);
        true
    }

    /// Drops a dangling back-reference when `index` leaves the graph.
    pub(crate) fn forget(&mut self, index: VertexIndex) -> bool {
        self.neighbours.remove(&index)
    }
}

/// Renders `index -> [neighbours]`, e.g. `3 -> [1, 4]`.
impl<T> fmt::Display for Vertex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> ", self.index)?;
        f.debug_list().entries(self.neighbours.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(id: GraphId) -> (Vertex<()>, Vertex<()>) {
        (Vertex::new(id, 0), Vertex::new(id, 1))
    }

    #[test]
    fn test_connect_is_symmetric() {
        let (mut v, mut u) = pair(GraphId::new());
        assert!(v.connect_with(&mut u));
        assert!(v.is_connected_with(&u));
        assert!(u.is_connected_with(&v));
        assert_eq!(v.degree(), 1);
        assert_eq!(u.degree(), 1);
        assert_eq!(v.to_string(), "0 -> [1]");
    }

    #[test]
    fn test_connect_twice_is_rejected() {
        let (mut v, mut u) = pair(GraphId::new());
        assert!(v.connect_with(&mut u));
        assert!(!u.connect_with(&mut v));
        assert_eq!(v.degree(), 1);
    }

    #[test]
    fn test_self_loop_is_rejected() {
        let id = GraphId::new();
        let v = Vertex::<()>::new(id, 3);
        let twin = Vertex::<()>::new(id, 3);
        assert!(!v.can_connect_with(&twin));
        assert!(!v.can_disconnect_with(&twin));
    }

    #[test]
    fn test_disconnect_restores_both_sides() {
        let (mut v, mut u) = pair(GraphId::new());
        v.connect_with(&mut u);
        assert!(u.disconnect_with(&mut v));
        assert_eq!(v.degree(), 0);
        assert_eq!(u.degree(), 0);
        assert!(!v.disconnect_with(&mut u));
    }

    #[test]
    fn test_vertices_of_other_graphs_do_not_relate() {
        let (mut v, mut u) = pair(GraphId::new());
        v.connect_with(&mut u);
        let (_, mut stranger) = pair(GraphId::new());
        assert!(!v.is_connected_with(&stranger));
        assert!(!v.can_connect_with(&stranger));
        assert!(!v.can_disconnect_with(&stranger));
        assert!(!v.connect_with(&mut stranger));
        assert_eq!(stranger.degree(), 0);
        assert_ne!(u, stranger);
    }

    #[test]
    fn test_equality_ignores_payload() {
        let id = GraphId::new();
        let mut v = Vertex::new(id, 5);
        v.set_data("a");
        let w = Vertex::new(id, 5);
        assert_eq!(v, w);
        assert_ne!(v, Vertex::new(GraphId::new(), 5));
        assert_eq!(v.to_string(), "5 -> []");
    }
}
