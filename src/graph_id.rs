use std::sync::atomic::{AtomicUsize, Ordering};

/// Source of graph identities.  Wrapping around after `usize::MAX` graphs
/// could make two live graphs share an id; that is accepted.
static GRAPH_ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Identifies the graph a [`Vertex`](crate::Vertex) belongs to.  Every graph,
/// including every clone, gets a fresh one.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct GraphId(usize);

impl GraphId {
    pub fn new() -> Self {
        GraphId(GRAPH_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for GraphId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_distinct() {
        let a = GraphId::new();
        let b = GraphId::new();
        assert_ne!(a, b);
        assert_ne!(GraphId::default(), a);
    }
}
