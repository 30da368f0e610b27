//! RustyHTML - Queries over a parsed HTML tree
//!
//! Layers:
//! - core: memchr-accelerated tokenizer, entities, tag table
//! - dom: immutable arena tree with source spans on every node
//! - traverse: stack-free document-order positions and ranges
//! - matcher: composable node predicates (`&`, `|`, `^`, `!`)
//! - search: find / collect / visit over ranges (parallel with rayon)
//! - text: content, inner and outer text extraction
//! - selector: compound CSS-like selectors compiled to matchers
//!
//! ```
//! use rustyhtml::matcher::{attribute, tag};
//! use rustyhtml::{search, text, HtmlDocument, Tag};
//!
//! let source = r#"<p id="example">This is an <strong>example</strong> paragraph</p>"#;
//! let doc = HtmlDocument::parse(source);
//! let found = search::find_if(doc.range(), &(tag::is(Tag::P) & attribute::id::is(["example"])));
//! assert_eq!(text::content_text(found.get()), "This is an example paragraph");
//! assert_eq!(text::inner_text(found.get(), source), "This is an <strong>example</strong> paragraph");
//! ```

pub mod core;
pub mod dom;
pub mod error;
pub mod matcher;
pub mod options;
pub mod search;
pub mod selector;
pub mod text;
pub mod traverse;

pub use crate::core::tags::{Tag, TagSet};
pub use dom::{AttributeRef, HtmlDocument, NodeId, NodeKind, NodeRef, Span};
pub use error::{ParseError, Result, SelectorError};
pub use matcher::{Match, Matcher};
pub use options::ParseOptions;
pub use search::{find_all_if, find_if, find_some, for_each_if};
pub use selector::SelectorCache;
pub use traverse::{Position, Range};
