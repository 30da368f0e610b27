//! Tag matchers. Only elements have a tag; everything else never matches.

use super::combinators::Match;
use crate::core::tags::{Tag, TagSet};
use crate::dom::NodeRef;

/// Match elements with exactly this tag
pub fn is<'s>(tag: Tag) -> Match<'s> {
    Match::from_fn(move |node: NodeRef<'_>| node.tag() == Some(tag))
}

/// Match elements whose tag is in `tags`
///
/// ```
/// use rustyhtml::matcher::{tag, Matcher};
/// use rustyhtml::{HtmlDocument, Tag, TagSet};
///
/// const CELLS: TagSet = TagSet::of(&[Tag::Td, Tag::Th]);
/// let doc = HtmlDocument::parse("<table><tr><th>a</th></tr></table>");
/// let th = doc.root().child(0).child(0);
/// assert!(tag::types(CELLS).matches(th));
/// ```
pub fn types<'s>(tags: TagSet) -> Match<'s> {
    Match::from_fn(move |node: NodeRef<'_>| node.tag().is_some_and(|t| tags.contains(t)))
}

/// Match elements by name, ASCII case-insensitively. Works for tags
/// outside the `Tag` table.
pub fn named<'s>(name: impl Into<String>) -> Match<'s> {
    let name = name.into().to_ascii_lowercase();
    Match::from_fn(move |node: NodeRef<'_>| node.tag_name() == Some(name.as_str()))
}

/// Match elements whose tag satisfies `pred`
pub fn matching<'s, P>(pred: P) -> Match<'s>
where
    P: Fn(Tag) -> bool + Send + Sync + 's,
{
    Match::from_fn(move |node: NodeRef<'_>| node.tag().is_some_and(&pred))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HtmlDocument;
    use crate::matcher::Matcher;

    #[test]
    fn test_tag_matchers() {
        let doc = HtmlDocument::parse("<div><x-card>text</x-card></div>");
        let div = doc.root();
        let card = div.child(0);
        let text = card.child(0);

        assert!(is(Tag::Div).matches(div));
        assert!(!is(Tag::Div).matches(card));
        assert!(types(TagSet::of(&[Tag::Span, Tag::Div])).matches(div));
        assert!(!types(TagSet::EMPTY).matches(div));
        assert!(named("X-Card").matches(card));
        assert!(named("div").matches(div));
        assert!(matching(|t| t == Tag::Unknown).matches(card));
    }

    #[test]
    fn test_non_elements_never_match() {
        let doc = HtmlDocument::parse("<div>text</div>");
        let text = doc.root().child(0);
        assert!(!is(Tag::Unknown).matches(text));
        assert!(!matching(|_| true).matches(text));
        assert!(!matching(|_| true).matches(doc.document()));
        assert!(!named("").matches(text));
    }
}
