//! Stack-free document-order traversal
//!
//! A [`Position`] is a node or "end". Advancing uses only the parent link,
//! the index within the parent and indexed child access, so a walk needs
//! O(1) memory regardless of depth. A [`Range`] is a half-open pair of
//! positions; the subtree of a node is the range from its first child to
//! the position just past its last descendant.

pub mod position;
pub mod range;

pub use position::Position;
pub use range::{Range, RangeIter};
