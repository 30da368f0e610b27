//! HTML Document - Arena-based DOM representation
//!
//! Efficient DOM storage with:
//! - Arena allocation for nodes, children and attributes
//! - NodeId indices for traversal
//! - String interning for names, values and text payloads
//! - Source spans on every node for zero-copy text extraction
//!
//! The document does not keep the source: text extraction takes the
//! caller's buffer and slices it with the recorded spans.

use super::builder::TreeBuilder;
use super::node::{AttributeRef, HtmlAttribute, HtmlNode, NodeId, NodeKind, NodeRef, DOCUMENT_ID};
use super::strings::StringPool;
use crate::error::{ParseError, Result};
use crate::options::ParseOptions;
use crate::traverse::Range;

/// A parsed HTML document. Immutable once built.
#[derive(Debug)]
pub struct HtmlDocument {
    /// Arena of nodes; the document node is id 0
    pub(crate) nodes: Vec<HtmlNode>,
    /// Child ids of every node, laid out contiguously per parent
    pub(crate) children: Vec<NodeId>,
    /// Arena of attributes
    pub(crate) attributes: Vec<HtmlAttribute>,
    /// Interned strings
    pub(crate) strings: StringPool,
    pub(crate) diagnostics: Vec<ParseError>,
    /// Length of the source the tree was built from
    pub(crate) source_len: usize,
}

impl HtmlDocument {
    /// Parse with default options. Never fails; see [`diagnostics`](Self::diagnostics).
    pub fn parse(source: &str) -> Self {
        Self::parse_with_options(source, &ParseOptions::default())
    }

    /// Parse with explicit options. Never fails.
    pub fn parse_with_options(source: &str, options: &ParseOptions) -> Self {
        let doc = TreeBuilder::new(source, options).build();
        tracing::debug!(
            bytes = source.len(),
            nodes = doc.nodes.len(),
            diagnostics = doc.diagnostics.len(),
            "parsed html document"
        );
        doc
    }

    /// Parse, failing with the first diagnostic if there is any
    pub fn parse_strict(source: &str, options: &ParseOptions) -> Result<Self> {
        let mut doc = Self::parse_with_options(source, options);
        if doc.diagnostics.is_empty() {
            Ok(doc)
        } else {
            Err(doc.diagnostics.swap_remove(0))
        }
    }

    /// The document node
    #[inline]
    pub fn document(&self) -> NodeRef<'_> {
        NodeRef::new(self, DOCUMENT_ID)
    }

    /// First element child of the document, or the document itself if
    /// there is none
    pub fn root(&self) -> NodeRef<'_> {
        let document = self.document();
        document
            .children()
            .find(|c| c.kind() == NodeKind::Element)
            .unwrap_or(document)
    }

    /// Diagnostics recorded while parsing, in source order of discovery
    #[inline]
    pub fn diagnostics(&self) -> &[ParseError] {
        &self.diagnostics
    }

    /// Range over the whole document: every node below the document node,
    /// including text and comments ahead of [`root`](Self::root)
    pub fn range(&self) -> Range<'_> {
        Range::subtree(self.document())
    }

    /// Number of nodes, including the document node
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node by id. Panics if `id` is not a node of this document.
    pub fn get(&self, id: NodeId) -> NodeRef<'_> {
        assert!(
            (id as usize) < self.nodes.len(),
            "node id {id} out of range for document with {} nodes",
            self.nodes.len()
        );
        NodeRef::new(self, id)
    }

    /// Length of the source buffer this document was parsed from
    #[inline]
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    /// Interned strings
    #[inline]
    pub fn strings(&self) -> &StringPool {
        &self.strings
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &HtmlNode {
        &self.nodes[id as usize]
    }

    #[inline]
    pub(crate) fn child_id(&self, slot: usize) -> NodeId {
        self.children[slot]
    }

    #[inline]
    pub(crate) fn attribute_ref(&self, slot: usize) -> AttributeRef<'_> {
        let attr = &self.attributes[slot];
        AttributeRef {
            name: self.strings.get(attr.name_id),
            value: attr.value_id.map(|id| self.strings.get(id)),
        }
    }
}
