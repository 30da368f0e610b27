//! HTML Node representation
//!
//! Nodes live in the document's arena and are addressed by `NodeId`
//! (u32) for compact, cache-friendly references. `NodeRef` pairs an id
//! with the document that owns it and is the handle every query takes.

use super::document::HtmlDocument;
use super::span::Span;
use super::strings::StringId;
use crate::core::tags::Tag;
use std::fmt;

/// Compact node identifier (index into arena)
pub type NodeId = u32;

/// Id of the document node; always the first node in the arena
pub const DOCUMENT_ID: NodeId = 0;

/// Type of HTML node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Document root
    Document,
    /// Element node
    Element,
    /// Text content
    Text,
    /// Text made only of whitespace
    Whitespace,
    /// CDATA section
    CData,
    /// Comment (including bogus `<!...>` and `<?...>` comments)
    Comment,
}

impl NodeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Element => "element",
            NodeKind::Text => "text",
            NodeKind::Whitespace => "whitespace",
            NodeKind::CData => "cdata",
            NodeKind::Comment => "comment",
        }
    }

    /// Text, whitespace, CDATA and comments carry a payload instead of children
    #[inline]
    pub const fn is_text_like(self) -> bool {
        matches!(
            self,
            NodeKind::Text | NodeKind::Whitespace | NodeKind::CData | NodeKind::Comment
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node in the arena
#[derive(Debug, Clone)]
pub struct HtmlNode {
    pub kind: NodeKind,
    /// Parent node (None for the document node)
    pub parent: Option<NodeId>,
    /// Position among the parent's children
    pub index_within_parent: u32,
    /// Start of this node's children in the child arena
    pub child_start: u32,
    pub child_count: u32,
    /// Element tag; `Tag::Unknown` for non-elements and unknown tags
    pub tag: Tag,
    /// Interned tag name when `tag` is `Tag::Unknown`
    pub name_id: StringId,
    /// Interned decoded payload for text-like nodes
    pub text_id: StringId,
    /// Start of attributes in attribute arena (for elements)
    pub attr_start: u32,
    pub attr_count: u32,
    /// Open tag start to close tag end; the raw token for text-like nodes
    pub outer: Span,
    /// Between the tags for elements; the payload for text-like nodes
    pub inner: Span,
}

impl HtmlNode {
    pub fn document(source_len: usize) -> Self {
        Self::new(NodeKind::Document, None, Span::new(0, source_len))
    }

    pub fn element(tag: Tag, name_id: StringId, parent: NodeId, open_tag: Span) -> Self {
        let mut node = Self::new(NodeKind::Element, Some(parent), open_tag);
        node.tag = tag;
        node.name_id = name_id;
        node.inner = Span::empty_at(open_tag.end);
        node
    }

    pub fn text_like(kind: NodeKind, parent: NodeId, text_id: StringId, outer: Span, inner: Span) -> Self {
        let mut node = Self::new(kind, Some(parent), outer);
        node.text_id = text_id;
        node.inner = inner;
        node
    }

    fn new(kind: NodeKind, parent: Option<NodeId>, outer: Span) -> Self {
        HtmlNode {
            kind,
            parent,
            index_within_parent: 0,
            child_start: 0,
            child_count: 0,
            tag: Tag::Unknown,
            name_id: 0,
            text_id: 0,
            attr_start: 0,
            attr_count: 0,
            outer,
            inner: outer,
        }
    }
}

/// Stored attribute
#[derive(Debug, Clone, Copy)]
pub struct HtmlAttribute {
    pub name_id: StringId,
    /// None for an attribute written without `=`
    pub value_id: Option<StringId>,
}

/// Borrowed view of one attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeRef<'a> {
    pub name: &'a str,
    /// None for a "null" attribute (no `=` in the source)
    pub value: Option<&'a str>,
}

impl<'a> AttributeRef<'a> {
    /// Value with null read as ""
    #[inline]
    pub fn value_or_empty(&self) -> &'a str {
        self.value.unwrap_or("")
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }
}

/// A node of a specific document.
///
/// Cheap to copy; borrows the document, so it cannot outlive it.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a HtmlDocument,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    #[inline]
    pub(crate) fn new(doc: &'a HtmlDocument, id: NodeId) -> Self {
        debug_assert!((id as usize) < doc.node_count());
        NodeRef { doc, id }
    }

    #[inline]
    fn node(&self) -> &'a HtmlNode {
        self.doc.node(self.id)
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The document this node belongs to
    #[inline]
    pub fn document(&self) -> &'a HtmlDocument {
        self.doc
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.node().kind
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        self.kind() == NodeKind::Element
    }

    #[inline]
    pub fn is_document(&self) -> bool {
        self.kind() == NodeKind::Document
    }

    #[inline]
    pub fn is_text_like(&self) -> bool {
        self.kind().is_text_like()
    }

    /// Element tag, None for non-elements
    #[inline]
    pub fn tag(&self) -> Option<Tag> {
        let node = self.node();
        (node.kind == NodeKind::Element).then_some(node.tag)
    }

    /// Lowercase element name, including unknown tags
    pub fn tag_name(&self) -> Option<&'a str> {
        let node = self.node();
        match (node.kind, node.tag) {
            (NodeKind::Element, Tag::Unknown) => Some(self.doc.strings().get(node.name_id)),
            (NodeKind::Element, tag) => Some(tag.as_str()),
            _ => None,
        }
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|p| NodeRef::new(self.doc, p))
    }

    #[inline]
    pub fn index_within_parent(&self) -> usize {
        self.node().index_within_parent as usize
    }

    #[inline]
    pub fn child_count(&self) -> usize {
        self.node().child_count as usize
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        self.node().child_count > 0
    }

    /// The `index`th child. Panics if `index >= child_count()`.
    #[inline]
    pub fn child(&self, index: usize) -> NodeRef<'a> {
        let node = self.node();
        assert!(
            index < node.child_count as usize,
            "child index {index} out of range for node with {} children",
            node.child_count
        );
        NodeRef::new(self.doc, self.doc.child_id(node.child_start as usize + index))
    }

    /// Children in order
    pub fn children(&self) -> Children<'a> {
        let node = self.node();
        Children {
            doc: self.doc,
            next: node.child_start as usize,
            end: (node.child_start + node.child_count) as usize,
        }
    }

    #[inline]
    pub fn attribute_count(&self) -> usize {
        self.node().attr_count as usize
    }

    /// The `index`th attribute in source order. Panics if out of range.
    pub fn attribute_at(&self, index: usize) -> AttributeRef<'a> {
        let node = self.node();
        assert!(
            index < node.attr_count as usize,
            "attribute index {index} out of range for node with {} attributes",
            node.attr_count
        );
        self.doc.attribute_ref(node.attr_start as usize + index)
    }

    /// Attributes in source order; empty for non-elements
    pub fn attributes(&self) -> impl ExactSizeIterator<Item = AttributeRef<'a>> + 'a {
        let node = self.node();
        let doc = self.doc;
        let start = node.attr_start as usize;
        (start..start + node.attr_count as usize).map(move |i| doc.attribute_ref(i))
    }

    /// First attribute with this name
    pub fn attribute(&self, name: &str) -> Option<AttributeRef<'a>> {
        self.attributes().find(|a| a.name == name)
    }

    /// Value of the first attribute with this name; a null attribute reads as ""
    pub fn attribute_value(&self, name: &str) -> Option<&'a str> {
        self.attribute(name).map(|a| a.value_or_empty())
    }

    /// Decoded payload of a text-like node
    pub fn text(&self) -> Option<&'a str> {
        let node = self.node();
        node.kind
            .is_text_like()
            .then(|| self.doc.strings().get(node.text_id))
    }

    #[inline]
    pub fn outer_span(&self) -> Span {
        self.node().outer
    }

    #[inline]
    pub fn inner_span(&self) -> Span {
        self.node().inner
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl std::hash::Hash for NodeRef<'_> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("NodeRef");
        s.field("id", &self.id).field("kind", &self.kind());
        if let Some(name) = self.tag_name() {
            s.field("tag", &name);
        }
        s.finish()
    }
}

/// Iterator over a node's children
#[derive(Clone)]
pub struct Children<'a> {
    doc: &'a HtmlDocument,
    next: usize,
    end: usize,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let id = self.doc.child_id(self.next);
        self.next += 1;
        Some(NodeRef::new(self.doc, id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Children<'_> {}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        self.end -= 1;
        Some(NodeRef::new(self.doc, self.doc.child_id(self.end)))
    }
}
