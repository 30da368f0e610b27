//! Half-open ranges of positions

use super::position::{successor, Position};
use crate::dom::NodeRef;

/// Nodes from `first` (inclusive) to `last` (exclusive) in document order.
///
/// `last` should be reachable from `first`; if it is not, iteration runs
/// to the end of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range<'a> {
    pub first: Position<'a>,
    pub last: Position<'a>,
}

impl<'a> Range<'a> {
    #[inline]
    pub fn new(first: Position<'a>, last: Position<'a>) -> Self {
        Range { first, last }
    }

    /// Descendants of `node`, excluding `node` itself
    pub fn subtree(node: NodeRef<'a>) -> Self {
        Position::new(node).subtree()
    }

    /// `node` and all of its descendants
    pub fn inclusive_subtree(node: NodeRef<'a>) -> Self {
        let first = Position::new(node);
        Range::new(first, first.skip_subtree())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first == self.last
    }

    pub fn iter(&self) -> RangeIter<'a> {
        RangeIter {
            current: self.first,
            last: self.last,
        }
    }
}

impl<'a> IntoIterator for Range<'a> {
    type Item = NodeRef<'a>;
    type IntoIter = RangeIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &Range<'a> {
    type Item = NodeRef<'a>;
    type IntoIter = RangeIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the nodes of a [`Range`]
#[derive(Debug, Clone)]
pub struct RangeIter<'a> {
    current: Position<'a>,
    last: Position<'a>,
}

impl<'a> RangeIter<'a> {
    /// Where the walk currently stands; `last` once exhausted
    #[inline]
    pub fn position(&self) -> Position<'a> {
        self.current
    }
}

impl<'a> Iterator for RangeIter<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == self.last {
            return None;
        }
        let node = self.current.node()?;
        self.current = Position::from_option(successor(node));
        Some(node)
    }
}

impl std::iter::FusedIterator for RangeIter<'_> {}
