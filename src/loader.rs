//! Plain-text adjacency lists.
//!
//! Each non-empty line is either `v`, which adds an isolated vertex, or
//! `v;u`, which adds both vertices and connects them.  Whitespace around a
//! field is ignored.  A line `v;v` adds `v` and no edge.
//!
//! Empty trailing fields are dropped before the line is read, so `v;` is the
//! same as `v` and a line holding only separators adds nothing.  An empty
//! field in front of a number, or a third field, makes the line malformed.

use std::{fs, io, path::Path};

use crate::{
    Graph, VertexIndex,
    error::GraphError,
    tracing_support::{debug, info_span},
};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read graph file: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: cannot parse {content:?}")]
    Parse { line: usize, content: String },
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl<T> Graph<T> {
    /// Builds a graph from adjacency-list text.  The first malformed line
    /// aborts the load.
    pub fn from_adjacency_str(text: &str) -> Result<Self, LoadError> {
        let _span = info_span!("from_adjacency_str").entered();
        let mut graph = Self::new();
        for (number, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let parse_error = || LoadError::Parse {
                line: number + 1,
                content: line.to_string(),
            };
            let mut fields: Vec<&str> = line.split(';').map(str::trim).collect();
            while fields.last().is_some_and(|field| field.is_empty()) {
                fields.pop();
            }
            let indices = fields
                .into_iter()
                .map(str::parse::<VertexIndex>)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| parse_error())?;
            match indices[..] {
                [] => {}
                [v] => {
                    graph.add_new_vertex(v)?;
                }
                [v, u] => {
                    graph.add_new_vertex(v)?;
                    graph.add_new_vertex(u)?;
                    graph.connect_vertices(v, u)?;
                }
                _ => return Err(parse_error()),
            }
        }
        debug!(
            vertices = graph.num_vertices(),
            edges = graph.num_edges(),
            "loaded graph"
        );
        Ok(graph)
    }

    /// Reads adjacency-list text from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path)?;
        Self::from_adjacency_str(&text)
    }

    /// Renders the graph in the format read by [`Graph::from_adjacency_str`]:
    /// one line per edge with the lower index first, then one line per
    /// isolated vertex.
    pub fn to_adjacency_string(&self) -> String {
        let mut lines = Vec::new();
        for vertex in self.iter_vertices() {
            let v = vertex.index();
            lines.extend(
                vertex
                    .neighbours()
                    .iter()
                    .filter(|&&u| u > v)
                    .map(|u| format!("{v};{u}")),
            );
        }
        lines.extend(
            self.iter_vertices()
                .filter(|vertex| vertex.degree() == 0)
                .map(|vertex| vertex.index().to_string()),
        );
        lines.join("\n")
    }
}
