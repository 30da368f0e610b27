//! Position within a document's pre-order sequence

use super::range::Range;
use crate::dom::NodeRef;

/// A node of a document, or the end of the document order.
///
/// Two positions are equal when they refer to the same node of the same
/// document, or when both are end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position<'a> {
    node: Option<NodeRef<'a>>,
}

impl<'a> Position<'a> {
    #[inline]
    pub fn new(node: NodeRef<'a>) -> Self {
        Position { node: Some(node) }
    }

    /// The position after the last node
    #[inline]
    pub const fn end() -> Self {
        Position { node: None }
    }

    #[inline]
    pub(crate) fn from_option(node: Option<NodeRef<'a>>) -> Self {
        Position { node }
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// The node here, or None at end
    #[inline]
    pub fn node(&self) -> Option<NodeRef<'a>> {
        self.node
    }

    /// The node here. Panics at end.
    #[inline]
    #[track_caller]
    pub fn get(&self) -> NodeRef<'a> {
        match self.node {
            Some(node) => node,
            None => panic!("dereferenced the end position"),
        }
    }

    /// Step to the document-order successor. No-op at end.
    #[inline]
    pub fn advance(&mut self) {
        self.node = self.node.and_then(successor);
    }

    /// The document-order successor
    #[inline]
    pub fn successor(self) -> Self {
        Position {
            node: self.node.and_then(successor),
        }
    }

    /// The successor skipping this node's descendants
    #[inline]
    pub fn skip_subtree(self) -> Self {
        Position {
            node: skip_subtree(self.get()),
        }
    }

    /// Parent, or end for the document node
    pub fn parent(self) -> Self {
        Position {
            node: self.get().parent(),
        }
    }

    /// Next sibling, or end for the last child and the document node
    pub fn next_sibling(self) -> Self {
        let node = self.get();
        let next = node.parent().and_then(|parent| {
            let index = node.index_within_parent() + 1;
            (index < parent.child_count()).then(|| parent.child(index))
        });
        Position { node: next }
    }

    /// Last child of this node's parent (possibly this node), or end for
    /// the document node
    pub fn last_sibling(self) -> Self {
        let last = self
            .get()
            .parent()
            .map(|parent| parent.child(parent.child_count() - 1));
        Position { node: last }
    }

    /// First child; for a childless node, the position just past it
    pub fn first_child(self) -> Self {
        let node = self.get();
        if node.has_children() {
            Position::new(node.child(0))
        } else {
            self.skip_subtree()
        }
    }

    /// The position just past the last child's subtree: the exclusive end
    /// of this node's subtree range
    pub fn last_child(self) -> Self {
        self.skip_subtree()
    }

    /// The `index`th child. Panics if out of range.
    #[track_caller]
    pub fn child(self, index: usize) -> Self {
        Position::new(self.get().child(index))
    }

    /// Range over this node's descendants
    pub fn subtree(self) -> Range<'a> {
        Range::new(self.first_child(), self.last_child())
    }
}

impl<'a> From<NodeRef<'a>> for Position<'a> {
    fn from(node: NodeRef<'a>) -> Self {
        Position::new(node)
    }
}

/// Yields nodes in document order until end
impl<'a> Iterator for Position<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.node?;
        self.advance();
        Some(current)
    }
}

impl std::iter::FusedIterator for Position<'_> {}

/// First child if any, otherwise the next node outside this subtree
#[inline]
pub(crate) fn successor(node: NodeRef<'_>) -> Option<NodeRef<'_>> {
    if node.has_children() {
        return Some(node.child(0));
    }
    skip_subtree(node)
}

/// Walk up until an ancestor-or-self has a next sibling
pub(crate) fn skip_subtree(mut node: NodeRef<'_>) -> Option<NodeRef<'_>> {
    loop {
        let parent = node.parent()?;
        let next = node.index_within_parent() + 1;
        if next < parent.child_count() {
            return Some(parent.child(next));
        }
        node = parent;
    }
}
