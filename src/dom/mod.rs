//! DOM Module - Arena-based HTML Document
//!
//! Implements an efficient, immutable DOM representation using:
//! - Arena allocation for nodes, with children stored contiguously per parent
//! - NodeId (u32) indices and parent links for stack-free traversal
//! - String interning for tag names, attributes and text payloads
//! - Outer and inner source spans on every node

mod builder;
pub mod document;
pub mod node;
pub mod span;
pub mod strings;

pub use document::HtmlDocument;
pub use node::{AttributeRef, Children, NodeId, NodeKind, NodeRef};
pub use span::Span;
pub use strings::StringPool;
