//! Text extraction
//!
//! `content_text` concatenates decoded text payloads. `inner_text` and
//! `outer_text` return slices of the parsed source, located by the
//! spans recorded at parse time, without copying.
//!
//! The source passed in must be the buffer the document was parsed from.
//! Any other buffer gives meaningless slices or panics on out-of-bounds
//! offsets; debug builds check the length.

use crate::dom::{NodeKind, NodeRef, Span};
use crate::traverse::Range;

/// Concatenated payloads of all text-like descendants (text, whitespace,
/// CDATA and comments) in document order. A text-like node yields its own
/// payload.
///
/// ```
/// use rustyhtml::{text, HtmlDocument};
///
/// let doc = HtmlDocument::parse("<p>This is an <strong>example</strong> paragraph</p>");
/// assert_eq!(text::content_text(doc.root()), "This is an example paragraph");
/// ```
pub fn content_text(node: NodeRef<'_>) -> String {
    if let Some(payload) = node.text() {
        return payload.to_string();
    }
    let mut out = String::new();
    for descendant in Range::subtree(node) {
        if descendant.is_text_like() {
            out.push_str(descendant.text().unwrap_or(""));
        }
    }
    out
}

/// The node's whole markup: open tag through close tag for elements, the
/// entire source for the document, the payload for text-like nodes
pub fn outer_text<'s>(node: NodeRef<'_>, source: &'s str) -> &'s str {
    check_source(node, source);
    match node.kind() {
        NodeKind::Document => source,
        NodeKind::Element => node.outer_span().slice(source),
        _ => node.inner_span().slice(source),
    }
}

/// The node's content: between the open and close tags for elements,
/// first child start to last child end for the document (empty when it
/// has no children), the payload for text-like nodes
pub fn inner_text<'s>(node: NodeRef<'_>, source: &'s str) -> &'s str {
    check_source(node, source);
    match node.kind() {
        NodeKind::Document => document_inner_span(node).slice(source),
        _ => node.inner_span().slice(source),
    }
}

fn document_inner_span(document: NodeRef<'_>) -> Span {
    let mut children = document.children();
    match (children.next(), children.next_back()) {
        (Some(first), Some(last)) => Span::new(first.outer_span().start, last.outer_span().end),
        (Some(only), None) => only.outer_span(),
        _ => Span::empty_at(0),
    }
}

#[inline]
fn check_source(node: NodeRef<'_>, source: &str) {
    debug_assert_eq!(
        source.len(),
        node.document().source_len(),
        "source buffer is not the one this document was parsed from"
    );
}
