//! Node predicates and their composition
//!
//! A [`Matcher`] is anything that can say yes or no to a node. Plain
//! closures are matchers; [`Match`] is the composable value that the
//! built-in families return and that `&`, `|`, `^` and `!` combine.
//!
//! Every built-in matcher is total over node kinds: applied to a kind it
//! does not apply to (e.g. a tag test on a text node) it returns `false`.
//!
//! ```
//! use rustyhtml::matcher::{attribute, tag, Matcher};
//! use rustyhtml::{HtmlDocument, Tag};
//!
//! let doc = HtmlDocument::parse(r#"<p id="example">hi</p>"#);
//! let m = tag::is(Tag::P) & attribute::id::is(["example"]);
//! assert!(m.matches(doc.root()));
//! assert!(!(!m).matches(doc.root()));
//! ```

pub mod attribute;
pub mod combinators;
pub mod tag;
pub mod text;

pub use attribute::{class, id};
pub use combinators::{all, any, not, one, Match};
pub use text::{content_text, inner_text, outer_text};

use crate::dom::NodeRef;

/// A predicate over nodes
pub trait Matcher {
    fn matches(&self, node: NodeRef<'_>) -> bool;
}

impl<F> Matcher for F
where
    F: Fn(NodeRef<'_>) -> bool,
{
    #[inline]
    fn matches(&self, node: NodeRef<'_>) -> bool {
        self(node)
    }
}

/// Collect needle strings for the multi-value matchers
pub(crate) fn needles<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}
