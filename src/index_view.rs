use std::{borrow::Cow, collections::BTreeSet, fmt};

use crate::{
    VertexIndex,
    error::{GraphError, Result},
};

/// An ordered, read-only set of vertex indices handed out by a graph.
///
/// The view either borrows the graph's own storage or owns a snapshot;
/// callers cannot tell the difference. Every mutating method fails with
/// [`GraphError::ImmutableViewViolation`].
#[derive(Clone, PartialEq, Eq)]
pub struct IndexView<'g> {
    indices: Cow<'g, BTreeSet<VertexIndex>>,
}

impl<'g> IndexView<'g> {
    pub(crate) fn borrowed(indices: &'g BTreeSet<VertexIndex>) -> Self {
        Self {
            indices: Cow::Borrowed(indices),
        }
    }

    pub(crate) fn owned(indices: BTreeSet<VertexIndex>) -> Self {
        Self {
            indices: Cow::Owned(indices),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, index: VertexIndex) -> bool {
        self.indices.contains(&index)
    }

    /// Iterates the indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = VertexIndex> + '_ {
        self.indices.iter().copied()
    }

    pub fn first(&self) -> Option<VertexIndex> {
        self.indices.first().copied()
    }

    pub fn to_vec(&self) -> Vec<VertexIndex> {
        self.iter().collect()
    }

    /// Copies the indices out into a set the caller owns and may modify.
    pub fn to_set(&self) -> BTreeSet<VertexIndex> {
        self.indices.as_ref().clone()
    }

    /// Always fails: the view cannot grow.
    pub fn try_insert(&mut self, _index: VertexIndex) -> Result<bool> {
        Err(GraphError::ImmutableViewViolation)
    }

    /// Always fails: the view cannot shrink.
    pub fn try_remove(&mut self, _index: VertexIndex) -> Result<bool> {
        Err(GraphError::ImmutableViewViolation)
    }

    /// Always fails: the view cannot be emptied.
    pub fn try_clear(&mut self) -> Result<()> {
        Err(GraphError::ImmutableViewViolation)
    }
}

impl<'a, 'g> IntoIterator for &'a IndexView<'g> {
    type Item = VertexIndex;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, VertexIndex>>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.iter().copied()
    }
}

impl PartialEq<BTreeSet<VertexIndex>> for IndexView<'_> {
    fn eq(&self, other: &BTreeSet<VertexIndex>) -> bool {
        self.indices.as_ref() == other
    }
}

impl fmt::Debug for IndexView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.indices.iter()).finish()
    }
}

impl fmt::Display for IndexView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.indices.iter()).finish()
    }
}
