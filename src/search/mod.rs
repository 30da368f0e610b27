//! Searching ranges
//!
//! Every search is a single forward walk over a [`Range`] in document
//! order, bounded by `range.last`. Nothing found is not an error: the
//! position-returning searches give back `range.last`, the collecting ones
//! leave the sink untouched.
//!
//! Attribute names are stored lower-cased, so names passed here should be
//! lower-case too.

#[cfg(feature = "parallel")]
pub mod parallel;

use std::ops::ControlFlow;

use crate::dom::{AttributeRef, NodeRef};
use crate::matcher::Matcher;
use crate::traverse::{Position, Range};

/// First node in `range` the matcher accepts, or `range.last`
pub fn find_if<'a, M>(range: Range<'a>, matcher: &M) -> Position<'a>
where
    M: Matcher + ?Sized,
{
    let mut iter = range.iter();
    for node in iter.by_ref() {
        if matcher.matches(node) {
            return Position::new(node);
        }
    }
    iter.position()
}

/// Append every node in `range` the matcher accepts to `out`, in document
/// order
pub fn find_all_if<'a, M, E>(range: Range<'a>, out: &mut E, matcher: &M)
where
    M: Matcher + ?Sized,
    E: Extend<NodeRef<'a>>,
{
    out.extend(range.into_iter().filter(|node| matcher.matches(*node)));
}

/// Run `action` on every matching node until it breaks.
///
/// Returns the position of the node whose action broke the walk, or
/// `range.last` if the walk ran to completion.
pub fn for_each_if<'a, M, F>(range: Range<'a>, matcher: &M, mut action: F) -> Position<'a>
where
    M: Matcher + ?Sized,
    F: FnMut(NodeRef<'a>) -> ControlFlow<()>,
{
    let mut iter = range.iter();
    for node in iter.by_ref() {
        if matcher.matches(node) && action(node).is_break() {
            return Position::new(node);
        }
    }
    iter.position()
}

/// First node carrying an attribute called `name`
pub fn find_node_by_attribute_name<'a>(range: Range<'a>, name: &str) -> Position<'a> {
    find_if(range, &|node: NodeRef<'_>| node.attribute(name).is_some())
}

/// First node whose first attribute called `name` has exactly `value`.
///
/// Only the first attribute with that name is consulted; a null value
/// compares as `""`.
pub fn find_node_by_attribute_value<'a>(range: Range<'a>, name: &str, value: &str) -> Position<'a> {
    find_if(range, &|node: NodeRef<'_>| {
        node.attribute(name)
            .is_some_and(|attr| attr.value_or_empty() == value)
    })
}

/// Outcome of [`find_attribute_if`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSearch {
    pub found: bool,
    /// Index of the matching attribute. When nothing matched this is the
    /// attribute count for elements and `0` for every other kind.
    pub index: usize,
}

/// Index of the first attribute of `node` accepted by `pred`
pub fn find_attribute_if<P>(node: NodeRef<'_>, mut pred: P) -> AttributeSearch
where
    P: FnMut(AttributeRef<'_>) -> bool,
{
    if !node.is_element() {
        return AttributeSearch {
            found: false,
            index: 0,
        };
    }
    match node.attributes().position(|attr| pred(attr)) {
        Some(index) => AttributeSearch { found: true, index },
        None => AttributeSearch {
            found: false,
            index: node.attribute_count(),
        },
    }
}

/// Outcome of [`find_some`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindSome<'a> {
    pub position: Position<'a>,
    /// One entry per matcher, in argument order, evaluated at `position`
    pub results: Vec<bool>,
}

impl FindSome<'_> {
    /// Did every matcher accept the found node?
    pub fn all(&self) -> bool {
        !self.position.is_end() && self.results.iter().all(|r| *r)
    }
}

/// First node in `range` accepted by at least one matcher, along with
/// what each matcher said about it.
///
/// When no node matches, the position is `range.last` and every result is
/// `false`.
pub fn find_some<'a>(range: Range<'a>, matchers: &[&dyn Matcher]) -> FindSome<'a> {
    let mut results = vec![false; matchers.len()];
    let mut iter = range.iter();
    for node in iter.by_ref() {
        let mut any = false;
        for (slot, matcher) in results.iter_mut().zip(matchers) {
            *slot = matcher.matches(node);
            any |= *slot;
        }
        if any {
            return FindSome {
                position: Position::new(node),
                results,
            };
        }
    }
    results.iter_mut().for_each(|r| *r = false);
    FindSome {
        position: iter.position(),
        results,
    }
}
