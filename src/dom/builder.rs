//! Tree construction from the token stream
//!
//! A deliberately small subset of the HTML tree-construction rules:
//! void elements, `/>` on any element, the common implied end tags, and
//! pop-to-matching-name for end tags. Nothing is synthesised: no implied
//! `html`, `head` or `body`, no foster parenting, no formatting-element
//! reconstruction.
//!
//! Nodes are created in document order, so the child arena can be laid
//! out in one counting pass once construction is done.

use super::document::HtmlDocument;
use super::node::{HtmlAttribute, HtmlNode, NodeId, NodeKind, DOCUMENT_ID};
use super::span::Span;
use super::strings::StringPool;
use crate::core::scanner::is_whitespace;
use crate::core::tags::{Tag, TagSet};
use crate::core::tokenizer::{Token, TokenKind, Tokenizer};
use crate::error::ParseError;
use crate::options::ParseOptions;

/// Elements that stop the search for an implicitly closed element
const DEFAULT_SCOPE: TagSet = TagSet::of(&[
    Tag::Applet,
    Tag::Caption,
    Tag::Html,
    Tag::Table,
    Tag::Td,
    Tag::Th,
    Tag::Marquee,
    Tag::Object,
    Tag::Template,
]);

const BUTTON_SCOPE: TagSet = DEFAULT_SCOPE.with(Tag::Button);

const LIST_SCOPE: TagSet = DEFAULT_SCOPE.union(TagSet::of(&[Tag::Ol, Tag::Ul, Tag::Dl]));

const TABLE_SCOPE: TagSet = TagSet::of(&[Tag::Html, Tag::Table, Tag::Template]);

/// Start tags that close an open `p`
const CLOSES_P: TagSet = TagSet::of(&[
    Tag::Address,
    Tag::Article,
    Tag::Aside,
    Tag::Blockquote,
    Tag::Center,
    Tag::Details,
    Tag::Dialog,
    Tag::Dir,
    Tag::Div,
    Tag::Dl,
    Tag::Dd,
    Tag::Dt,
    Tag::Fieldset,
    Tag::Figcaption,
    Tag::Figure,
    Tag::Footer,
    Tag::Form,
    Tag::H1,
    Tag::H2,
    Tag::H3,
    Tag::H4,
    Tag::H5,
    Tag::H6,
    Tag::Header,
    Tag::Hgroup,
    Tag::Hr,
    Tag::Li,
    Tag::Listing,
    Tag::Main,
    Tag::Menu,
    Tag::Nav,
    Tag::Ol,
    Tag::P,
    Tag::Plaintext,
    Tag::Pre,
    Tag::Section,
    Tag::Summary,
    Tag::Table,
    Tag::Ul,
    Tag::Xmp,
]);

/// Elements whose end tag may be omitted without a diagnostic
const OPTIONAL_END: TagSet = TagSet::of(&[
    Tag::Body,
    Tag::Caption,
    Tag::Colgroup,
    Tag::Dd,
    Tag::Dt,
    Tag::Head,
    Tag::Html,
    Tag::Li,
    Tag::Optgroup,
    Tag::Option,
    Tag::P,
    Tag::Rb,
    Tag::Rp,
    Tag::Rt,
    Tag::Rtc,
    Tag::Tbody,
    Tag::Td,
    Tag::Tfoot,
    Tag::Th,
    Tag::Thead,
    Tag::Tr,
]);

/// Builds an `HtmlDocument` from source
pub(crate) struct TreeBuilder<'a> {
    source: &'a str,
    options: &'a ParseOptions,
    nodes: Vec<HtmlNode>,
    attributes: Vec<HtmlAttribute>,
    strings: StringPool,
    /// Open elements, innermost last; excludes `base`
    open: Vec<NodeId>,
    /// Parent of top-level nodes: the document or the fragment context element
    base: NodeId,
    diagnostics: Vec<ParseError>,
}

impl<'a> TreeBuilder<'a> {
    pub(crate) fn new(source: &'a str, options: &'a ParseOptions) -> Self {
        let mut builder = TreeBuilder {
            source,
            options,
            nodes: Vec::with_capacity(source.len() / 16 + 1),
            attributes: Vec::new(),
            strings: StringPool::new(),
            open: Vec::new(),
            base: DOCUMENT_ID,
            diagnostics: Vec::new(),
        };
        builder.nodes.push(HtmlNode::document(source.len()));

        if let Some(name) = options.fragment_context.as_deref() {
            let tag = Tag::from_name(name);
            let name_id = match tag {
                Tag::Unknown => builder.strings.intern(name),
                _ => 0,
            };
            let whole = Span::new(0, source.len());
            let mut context = HtmlNode::element(tag, name_id, DOCUMENT_ID, whole);
            context.inner = whole;
            builder.base = builder.push_node(context);
        }
        builder
    }

    pub(crate) fn build(mut self) -> HtmlDocument {
        let mut tokenizer = Tokenizer::new(self.source);
        let mut stopped_at = None;

        while let Some(token) = tokenizer.next_token() {
            self.diagnostics.extend(tokenizer.take_diagnostics());
            match token.kind {
                TokenKind::StartTag => {
                    if !self.start_tag(&token) {
                        stopped_at = Some(token.span.0);
                        break;
                    }
                }
                TokenKind::EndTag => self.end_tag(&token),
                TokenKind::Text => self.text(&token),
                TokenKind::Comment => self.payload_node(NodeKind::Comment, &token),
                TokenKind::CData => self.payload_node(NodeKind::CData, &token),
                TokenKind::DocType => {
                    tracing::trace!(offset = token.span.0, "doctype skipped");
                }
            }
        }

        match stopped_at {
            Some(offset) => self.close_from(0, offset),
            None => self.close_remaining(),
        }

        let children = link_children(&mut self.nodes);
        HtmlDocument {
            nodes: self.nodes,
            children,
            attributes: self.attributes,
            strings: self.strings,
            diagnostics: self.diagnostics,
            source_len: self.source.len(),
        }
    }

    #[inline]
    fn current(&self) -> NodeId {
        self.open.last().copied().unwrap_or(self.base)
    }

    fn push_node(&mut self, node: HtmlNode) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        id
    }

    /// Returns false when the depth limit stops construction
    fn start_tag(&mut self, token: &Token<'_>) -> bool {
        let tag = token.tag();
        let at = token.span.0;
        self.close_implied_by(tag, at);

        let depth = self.open.len() + 1 + usize::from(self.base != DOCUMENT_ID);
        if depth > self.options.max_depth {
            tracing::trace!(depth, offset = at, "tree too deep, stopping");
            self.diagnostics.push(ParseError::TreeTooDeep {
                max_depth: self.options.max_depth,
                offset: at,
            });
            return false;
        }

        let name_id = match tag {
            Tag::Unknown => self.strings.intern(&token.name),
            _ => 0,
        };
        let mut node = HtmlNode::element(tag, name_id, self.current(), Span::new(token.span.0, token.span.1));
        node.attr_start = self.attributes.len() as u32;
        node.attr_count = token.attributes.len() as u32;
        for attr in &token.attributes {
            let name_id = self.strings.intern(&attr.name);
            let value_id = attr.value.as_deref().map(|v| self.strings.intern(v));
            self.attributes.push(HtmlAttribute { name_id, value_id });
        }

        let id = self.push_node(node);
        if !token.self_closing && !tag.is_void() {
            self.open.push(id);
        }
        true
    }

    /// Close elements that cannot contain an element of `tag`
    fn close_implied_by(&mut self, tag: Tag, at: usize) {
        if CLOSES_P.contains(tag) {
            self.close_in_scope(TagSet::of(&[Tag::P]), BUTTON_SCOPE, at);
        }
        match tag {
            Tag::Li => self.close_in_scope(TagSet::of(&[Tag::Li]), LIST_SCOPE, at),
            Tag::Dt | Tag::Dd => self.close_in_scope(TagSet::of(&[Tag::Dt, Tag::Dd]), LIST_SCOPE, at),
            Tag::Tr => self.close_in_scope(
                TagSet::of(&[Tag::Tr]),
                TABLE_SCOPE.union(TagSet::of(&[Tag::Thead, Tag::Tbody, Tag::Tfoot])),
                at,
            ),
            Tag::Td | Tag::Th => self.close_in_scope(
                TagSet::of(&[Tag::Td, Tag::Th]),
                TABLE_SCOPE.with(Tag::Tr),
                at,
            ),
            Tag::Thead | Tag::Tbody | Tag::Tfoot => self.close_in_scope(
                TagSet::of(&[Tag::Thead, Tag::Tbody, Tag::Tfoot]),
                TABLE_SCOPE,
                at,
            ),
            Tag::Option => self.close_current(Tag::Option, at),
            Tag::Optgroup => {
                self.close_current(Tag::Option, at);
                self.close_current(Tag::Optgroup, at);
            }
            _ => {}
        }
    }

    /// Close the nearest open element in `targets` (and everything above
    /// it), unless an element in `boundary` is reached first
    fn close_in_scope(&mut self, targets: TagSet, boundary: TagSet, at: usize) {
        for index in (0..self.open.len()).rev() {
            let tag = self.nodes[self.open[index] as usize].tag;
            if targets.contains(tag) {
                self.close_from(index, at);
                return;
            }
            if boundary.contains(tag) {
                return;
            }
        }
    }

    fn close_current(&mut self, tag: Tag, at: usize) {
        if let Some(&id) = self.open.last() {
            if self.nodes[id as usize].tag == tag {
                self.close_from(self.open.len() - 1, at);
            }
        }
    }

    /// Implicitly close `open[index..]`, ending each at `at`
    fn close_from(&mut self, index: usize, at: usize) {
        for &id in &self.open[index..] {
            let node = &mut self.nodes[id as usize];
            node.inner.end = at;
            node.outer.end = at;
        }
        self.open.truncate(index);
    }

    fn end_tag(&mut self, token: &Token<'_>) {
        let tag = token.tag();
        let found = self.open.iter().rposition(|&id| {
            let node = &self.nodes[id as usize];
            node.tag == tag && (tag != Tag::Unknown || self.strings.get(node.name_id) == token.name)
        });

        let Some(index) = found else {
            tracing::trace!(name = %token.name, offset = token.span.0, "unexpected end tag dropped");
            self.diagnostics.push(ParseError::UnexpectedEndTag {
                name: token.name.to_string(),
                offset: token.span.0,
            });
            return;
        };

        self.report_unclosed(index + 1);
        self.close_from(index + 1, token.span.0);

        let node = &mut self.nodes[self.open[index] as usize];
        node.inner.end = token.span.0;
        node.outer.end = token.span.1;
        self.open.truncate(index);
    }

    fn text(&mut self, token: &Token<'_>) {
        let raw = &self.source[token.span.0..token.span.1];
        let kind = if raw.bytes().all(is_whitespace) {
            NodeKind::Whitespace
        } else {
            NodeKind::Text
        };
        if kind == NodeKind::Whitespace && !self.options.keep_whitespace {
            return;
        }
        self.payload_node(kind, token);
    }

    /// Text-like node: outer span is the whole token, inner the payload
    fn payload_node(&mut self, kind: NodeKind, token: &Token<'_>) {
        let text_id = self.strings.intern(&token.content);
        let node = HtmlNode::text_like(
            kind,
            self.current(),
            text_id,
            Span::new(token.span.0, token.span.1),
            Span::new(token.content_span.0, token.content_span.1),
        );
        self.push_node(node);
    }

    /// End of input: close everything still open
    fn close_remaining(&mut self) {
        self.report_unclosed(0);
        self.close_from(0, self.source.len());
    }

    /// Diagnose `open[from..]`, innermost first, skipping optional end tags
    fn report_unclosed(&mut self, from: usize) {
        for index in (from..self.open.len()).rev() {
            let node = &self.nodes[self.open[index] as usize];
            if OPTIONAL_END.contains(node.tag) {
                continue;
            }
            let name = match node.tag {
                Tag::Unknown => self.strings.get(node.name_id).to_string(),
                tag => tag.as_str().to_string(),
            };
            tracing::trace!(%name, offset = node.outer.start, "element not closed");
            self.diagnostics.push(ParseError::UnclosedElement {
                name,
                offset: node.outer.start,
            });
        }
    }
}

/// Lay out every node's children contiguously, in creation order, and
/// record each node's index within its parent
fn link_children(nodes: &mut [HtmlNode]) -> Vec<NodeId> {
    let parents: Vec<Option<NodeId>> = nodes.iter().map(|n| n.parent).collect();
    for parent in parents.iter().flatten() {
        nodes[*parent as usize].child_count += 1;
    }

    let mut next = 0u32;
    for node in nodes.iter_mut() {
        node.child_start = next;
        next += node.child_count;
    }

    let mut children = vec![0; next as usize];
    let mut filled = vec![0u32; nodes.len()];
    for (id, parent) in parents.iter().enumerate() {
        let Some(parent) = *parent else { continue };
        let index = filled[parent as usize];
        children[(nodes[parent as usize].child_start + index) as usize] = id as NodeId;
        nodes[id].index_within_parent = index;
        filled[parent as usize] += 1;
    }
    children
}

#[cfg(test)]
mod tests {
    use crate::dom::{HtmlDocument, NodeKind, NodeRef};
    use crate::error::ParseError;
    use crate::options::ParseOptions;
    use crate::Tag;

    fn tags(node: NodeRef<'_>) -> Vec<&str> {
        node.children().filter_map(|c| c.tag_name()).collect()
    }

    #[test]
    fn test_void_elements_take_no_children() {
        let doc = HtmlDocument::parse("<div><br>text<img src=x>more</div>");
        let div = doc.root();
        assert_eq!(div.child_count(), 4);
        assert_eq!(div.child(0).child_count(), 0);
        assert_eq!(div.child(1).text(), Some("text"));
        assert!(doc.diagnostics().is_empty());
    }

    #[test]
    fn test_self_closing_any_element() {
        let doc = HtmlDocument::parse("<div/><span>x</span>");
        let document = doc.document();
        assert_eq!(tags(document), vec!["div", "span"]);
        assert_eq!(document.child(0).child_count(), 0);
    }

    #[test]
    fn test_paragraph_closed_by_block() {
        let source = "<p>one<div>two</div>";
        let doc = HtmlDocument::parse(source);
        assert_eq!(tags(doc.document()), vec!["p", "div"]);
        let p = doc.root();
        assert_eq!(p.outer_span().end, source.find("<div").unwrap());
        assert!(doc.diagnostics().is_empty());
    }

    #[test]
    fn test_list_items_close_siblings() {
        let doc = HtmlDocument::parse("<ul><li>a<li>b<li>c</ul>");
        let ul = doc.root();
        assert_eq!(tags(ul), vec!["li", "li", "li"]);
        assert_eq!(ul.child(2).child(0).text(), Some("c"));
    }

    #[test]
    fn test_table_cells_and_rows_close_implicitly() {
        let doc = HtmlDocument::parse("<table><tr><td>1<td>2<tr><th>3</table>");
        let table = doc.root();
        assert_eq!(tags(table), vec!["tr", "tr"]);
        assert_eq!(tags(table.child(0)), vec!["td", "td"]);
        assert_eq!(tags(table.child(1)), vec!["th"]);
        assert!(doc.diagnostics().is_empty());
    }

    #[test]
    fn test_options_close_implicitly() {
        let doc = HtmlDocument::parse("<select><option>a<option>b<optgroup><option>c</select>");
        let select = doc.root();
        assert_eq!(tags(select), vec!["option", "option", "optgroup"]);
    }

    #[test]
    fn test_end_tag_pops_to_match() {
        let source = "<div><span><b>x</div>after";
        let doc = HtmlDocument::parse(source);
        let div = doc.root();
        assert_eq!(div.outer_span().end, source.find("after").unwrap());
        assert_eq!(doc.document().child_count(), 2);
        assert_eq!(
            doc.diagnostics(),
            &[
                ParseError::UnclosedElement { name: "b".into(), offset: 11 },
                ParseError::UnclosedElement { name: "span".into(), offset: 5 },
            ]
        );
    }

    #[test]
    fn test_unexpected_end_tag_dropped() {
        let doc = HtmlDocument::parse("<p>x</span></p>");
        assert_eq!(doc.root().child_count(), 1);
        assert_eq!(
            doc.diagnostics(),
            &[ParseError::UnexpectedEndTag { name: "span".into(), offset: 4 }]
        );
    }

    #[test]
    fn test_unclosed_at_end_of_input() {
        let doc = HtmlDocument::parse("<section><p>text");
        let section = doc.root();
        assert_eq!(section.outer_span().end, 16);
        assert_eq!(section.inner_span().end, 16);
        // `p` may omit its end tag
        assert_eq!(
            doc.diagnostics(),
            &[ParseError::UnclosedElement { name: "section".into(), offset: 0 }]
        );
    }

    #[test]
    fn test_whitespace_nodes() {
        let doc = HtmlDocument::parse("<div> <p>x</p>\n</div>");
        let kinds: Vec<_> = doc.root().children().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec![NodeKind::Whitespace, NodeKind::Element, NodeKind::Whitespace]);

        let options = ParseOptions::default().with_keep_whitespace(false);
        let doc = HtmlDocument::parse_with_options("<div> <p>x</p>\n</div>", &options);
        assert_eq!(doc.root().child_count(), 1);
    }

    #[test]
    fn test_max_depth_stops_construction() {
        let options = ParseOptions::default().with_max_depth(2);
        let doc = HtmlDocument::parse_with_options("<a><b><i>deep</i></b></a><p>later</p>", &options);
        assert_eq!(doc.node_count(), 3);
        assert_eq!(
            doc.diagnostics(),
            &[ParseError::TreeTooDeep { max_depth: 2, offset: 6 }]
        );
    }

    #[test]
    fn test_fragment_context() {
        let source = "<li>a</li><li>b</li>";
        let options = ParseOptions::default().with_fragment_context(Tag::Ul.as_str());
        let doc = HtmlDocument::parse_with_options(source, &options);
        let ul = doc.root();
        assert_eq!(ul.tag(), Some(Tag::Ul));
        assert_eq!(ul.tag_name(), Some("ul"));
        assert_eq!(ul.outer_span().end, source.len());
        assert_eq!(tags(ul), vec!["li", "li"]);
    }

    #[test]
    fn test_custom_fragment_context_keeps_name() {
        let options = ParseOptions::default().with_fragment_context("X-List");
        let doc = HtmlDocument::parse_with_options("<li>a</li>", &options);
        let context = doc.root();
        assert_eq!(context.tag(), Some(Tag::Unknown));
        assert_eq!(context.tag_name(), Some("x-list"));
        assert_eq!(tags(context), vec!["li"]);
    }

    #[test]
    fn test_comments_doctype_and_cdata() {
        let doc = HtmlDocument::parse("<!DOCTYPE html><!-- c --><div><![CDATA[x]]></div>");
        let document = doc.document();
        assert_eq!(document.child_count(), 2);
        assert_eq!(document.child(0).kind(), NodeKind::Comment);
        assert_eq!(document.child(0).text(), Some(" c "));
        assert_eq!(document.child(1).child(0).kind(), NodeKind::CData);
    }

    #[test]
    fn test_children_linked_in_order() {
        let doc = HtmlDocument::parse("<a><b></b><c></c></a><d></d>");
        for id in 1..doc.node_count() as u32 {
            let node = doc.get(id);
            let parent = node.parent().unwrap();
            assert_eq!(parent.child(node.index_within_parent()), node);
        }
    }
}
