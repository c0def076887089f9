//! Undirected simple graphs over integer-indexed vertices, with traversal,
//! structural predicates and exact search for maximum independent, minimum
//! dominating and minimum connected dominating sets.

pub mod error;
pub mod graph;
pub mod graph_id;
pub mod index_view;
pub mod loader;
pub mod predicates;
pub mod search;
pub mod subsets;
pub mod tracing_support;
pub mod vertex;

#[cfg(test)]
mod graph_test_support;

/// Identifies a vertex.  Valid indices are non-negative; the type is signed so
/// that negative input can be reported instead of wrapping.
pub type VertexIndex = i32;

pub use error::{GraphError, Result};
pub use graph::{BatchReport, Graph};
pub use graph_id::GraphId;
pub use index_view::IndexView;
pub use loader::LoadError;
pub use search::{BfsIterator, DfsIterator};
pub use subsets::{EXHAUSTIVE_SEARCH_SOFT_LIMIT, SearchDirection};
pub use vertex::Vertex;
