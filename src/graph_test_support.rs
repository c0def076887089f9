use std::collections::BTreeSet;

use quickcheck::{Arbitrary, Gen};

use crate::{
    Graph, VertexIndex,
    tracing_support::{LogLevel, info_span, init_tracing},
};

/// Largest vertex count generated, small enough for exhaustive cross-checks.
pub const MAX_ARB_VERTICES: usize = 9;

#[derive(Debug, Clone)]
pub struct ArbGraph {
    pub graph: Graph,
}

impl Arbitrary for ArbGraph {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_vertices = usize::arbitrary(g) % MAX_ARB_VERTICES;
        let num_edges = usize::arbitrary(g) % 20;

        let mut graph = Graph::new();
        while graph.num_vertices() < num_vertices {
            graph
                .add_new_vertex(VertexIndex::from(u8::arbitrary(g) % 40))
                .unwrap();
        }
        let indices = graph.vertices().to_vec();
        if !indices.is_empty() {
            for _ in 0..num_edges {
                let v = indices[usize::arbitrary(g) % indices.len()];
                let u = indices[usize::arbitrary(g) % indices.len()];
                graph.connect_vertices(v, u).unwrap();
            }
        }

        ArbGraph { graph }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let graph = self.graph.clone();
        let indices = self.graph.vertices().to_vec();
        Box::new(indices.into_iter().map(move |index| {
            let mut smaller = graph.clone();
            smaller.remove_vertex(index).unwrap();
            ArbGraph { graph: smaller }
        }))
    }
}

/// A single mutation, with indices that are sometimes negative or absent.
#[derive(Debug, Clone, Copy)]
pub enum ArbOp {
    Add(VertexIndex),
    Remove(VertexIndex),
    Connect(VertexIndex, VertexIndex),
    Disconnect(VertexIndex, VertexIndex),
}

impl Arbitrary for ArbOp {
    fn arbitrary(g: &mut Gen) -> Self {
        let kind = u8::arbitrary(g) % 4;
        let mut index = || VertexIndex::from(i8::arbitrary(g) % 12);
        match kind {
            0 => ArbOp::Add(index()),
            1 => ArbOp::Remove(index()),
            2 => ArbOp::Connect(index(), index()),
            _ => ArbOp::Disconnect(index(), index()),
        }
    }
}

impl ArbOp {
    pub fn apply(self, graph: &mut Graph) {
        let _ = match self {
            ArbOp::Add(v) => graph.add_new_vertex(v),
            ArbOp::Remove(v) => graph.remove_vertex(v).map(|_| true),
            ArbOp::Connect(v, u) => graph.connect_vertices(v, u),
            ArbOp::Disconnect(v, u) => graph.disconnect_vertices(v, u),
        };
    }
}

/// Checks vertex ownership, adjacency symmetry, absence of loops and
/// dangling neighbours, and agreement between the counters and the vertex set.
pub fn check_graph_consistency<T>(graph: &Graph<T>) {
    init_tracing(LogLevel::Quiet);
    let _span = info_span!("check_graph_consistency").entered();

    let indices = graph.vertices();
    for vertex in graph.iter_vertices() {
        let v = vertex.index();
        assert!(v >= 0);
        assert_eq!(
            vertex.graph_id(),
            graph.id(),
            "{v} belongs to another graph"
        );
        assert!(!vertex.neighbours().contains(&v), "loop on {v}");
        for &u in vertex.neighbours() {
            assert!(indices.contains(u), "{v} lists missing vertex {u}");
            assert!(graph.adjacent(u, v), "{u} does not list {v}");
        }
    }

    let degree_sum: usize = graph.iter_vertices().map(|vertex| vertex.degree()).sum();
    assert_eq!(degree_sum % 2, 0);
    assert_eq!(graph.num_edges(), degree_sum / 2);
    assert_eq!(graph.num_vertices(), indices.len());
    assert_eq!(graph.is_empty(), graph.num_vertices() == 0);
}

/// Every subset of the vertex set, by bitmask.  Only for small graphs.
pub fn all_subsets<T>(graph: &Graph<T>) -> Vec<BTreeSet<VertexIndex>> {
    let indices = graph.vertices().to_vec();
    (0u32..1 << indices.len())
        .map(|mask| {
            indices
                .iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, &index)| index)
                .collect()
        })
        .collect()
}
