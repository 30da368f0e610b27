//! Compound selectors
//!
//! Compiles CSS-like compound selectors into [`Match`] values:
//! `tag#id.class[attr op "value"]`, grouped with `,`. Supported attribute
//! operators are `=`, `~=`, `|=`, `^=`, `$=` and `*=`. There are no
//! combinators or pseudo-classes.
//!
//! ```
//! use rustyhtml::{search, selector, HtmlDocument};
//!
//! let doc = HtmlDocument::parse(r#"<div><p class="lead note">a</p></div>"#);
//! let m = selector::compile("p.note").unwrap();
//! assert!(!search::find_if(doc.range(), &m).is_end());
//! ```

pub mod cache;
pub mod lexer;
pub mod parser;

pub use cache::SelectorCache;
pub use parser::{parse, AttributeSelector, Compound, SelectorList, TypeSelector};

use self::lexer::AttrOp;
use crate::core::tags::Tag;
use crate::dom::NodeRef;
use crate::error::SelectorError;
use crate::matcher::{all, any, attribute, tag, Match};

/// Compile a selector string into a matcher
pub fn compile(selector: &str) -> Result<Match<'static>, SelectorError> {
    let list = parse(selector)?;
    tracing::debug!(selector, compounds = list.compounds.len(), "compiled selector");
    Ok(list.to_match())
}

impl SelectorList {
    pub fn to_match(&self) -> Match<'static> {
        let mut compounds: Vec<_> = self.compounds.iter().map(Compound::to_match).collect();
        if compounds.len() == 1 {
            compounds.swap_remove(0)
        } else {
            any(compounds)
        }
    }
}

impl Compound {
    pub fn to_match(&self) -> Match<'static> {
        let mut parts = Vec::new();
        match &self.type_selector {
            Some(TypeSelector::Named(name)) => parts.push(match Tag::from_name(name) {
                Tag::Unknown => tag::named(name.as_str()),
                known => tag::is(known),
            }),
            // ids, classes and attributes only ever match elements
            Some(TypeSelector::Universal) | None => {
                parts.push(Match::from_fn(|node: NodeRef<'_>| node.is_element()))
            }
        }
        parts.extend(self.ids.iter().map(|id| attribute::id::is([id.as_str()])));
        parts.extend(self.classes.iter().map(|class| attribute::class::has(class.as_str())));
        parts.extend(self.attributes.iter().map(AttributeSelector::to_match));

        if parts.len() == 1 {
            parts.swap_remove(0)
        } else {
            all(parts)
        }
    }
}

impl AttributeSelector {
    pub fn to_match(&self) -> Match<'static> {
        use crate::matcher::attribute::value;

        let name = self.name.as_str();
        let Some((op, expected)) = &self.test else {
            return attribute::exists([name]);
        };
        let expected = expected.as_str();
        match op {
            AttrOp::Equals => value::is(name, expected),
            AttrOp::Includes if expected.is_empty() => Match::never(),
            AttrOp::Includes => value::contains_word(name, expected),
            AttrOp::DashMatch => value::contains_prefix(name, expected),
            // an empty needle would match every value
            AttrOp::Prefix | AttrOp::Suffix | AttrOp::Substring if expected.is_empty() => {
                Match::never()
            }
            AttrOp::Prefix => value::starts_with(name, expected),
            AttrOp::Suffix => value::ends_with(name, expected),
            AttrOp::Substring => value::contains(name, expected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HtmlDocument;
    use crate::matcher::Matcher;
    use crate::search::find_all_if;
    use crate::text::content_text;
    use rstest::rstest;

    const PAGE: &str = r#"<div id="main" class="box wide">
<p class="lead">first</p>
<p lang="en-GB" data-x>second</p>
<a href="https://example.com/page.html" rel="nofollow noopener">link</a>
<x-card title="">card</x-card>
</div>"#;

    fn select(selector: &str) -> Vec<String> {
        let doc = HtmlDocument::parse(PAGE);
        let matcher = compile(selector).unwrap();
        let mut found = Vec::new();
        find_all_if(doc.range(), &mut found, &matcher);
        found
            .into_iter()
            .map(|n| n.tag_name().unwrap_or_default().to_string())
            .collect()
    }

    #[rstest]
    #[case("p", &["p", "p"])]
    #[case("*", &["div", "p", "p", "a", "x-card"])]
    #[case("#main", &["div"])]
    #[case("div#main.box.wide", &["div"])]
    #[case("div.box.narrow", &[])]
    #[case(".lead", &["p"])]
    #[case("P.LEAD", &[])]
    #[case("x-card", &["x-card"])]
    #[case("[data-x]", &["p"])]
    #[case("[title]", &["x-card"])]
    #[case("[title='']", &["x-card"])]
    #[case("[lang|=en]", &["p"])]
    #[case("[lang|=en-GB]", &["p"])]
    #[case("[lang|=e]", &[])]
    #[case("[lang|=en-]", &[])]
    #[case("[lang|='']", &[])]
    #[case("[rel~=noopener]", &["a"])]
    #[case("[rel~=noop]", &[])]
    #[case("[href^='https://']", &["a"])]
    #[case("[href$=\".html\"]", &["a"])]
    #[case("[href*=example]", &["a"])]
    #[case("[href^='']", &[])]
    #[case("a, p.lead", &["p", "a"])]
    fn test_select(#[case] selector: &str, #[case] expected: &[&str]) {
        assert_eq!(select(selector), expected);
    }

    #[test]
    fn test_universal_skips_text() {
        let doc = HtmlDocument::parse("<p>text</p>");
        let matcher = compile("*").unwrap();
        assert!(matcher.matches(doc.root()));
        assert!(!matcher.matches(doc.root().child(0)));
        assert!(!matcher.matches(doc.document()));
    }

    #[test]
    fn test_compile_content() {
        let doc = HtmlDocument::parse(PAGE);
        let matcher = compile("p[lang]").unwrap();
        let mut found = Vec::new();
        find_all_if(doc.range(), &mut found, &matcher);
        assert_eq!(found.len(), 1);
        assert_eq!(content_text(found[0]), "second");
    }

    #[test]
    fn test_dash_match_agrees_with_contains_prefix() {
        for lang in ["en", "en-GB", "en-", "eng", "e", "", "-en"] {
            let source = format!(r#"<p lang="{lang}"></p>"#);
            let doc = HtmlDocument::parse(&source);
            for prefix in ["en", "e", ""] {
                let compiled = compile(&format!("[lang|='{prefix}']")).unwrap();
                let direct = attribute::value::contains_prefix("lang", prefix);
                assert_eq!(
                    compiled.matches(doc.root()),
                    direct.matches(doc.root()),
                    "lang={lang:?} prefix={prefix:?}"
                );
            }
        }
    }

    #[test]
    fn test_compile_error() {
        assert!(matches!(compile(""), Err(SelectorError::Empty)));
        assert!(matches!(compile("div > p"), Err(SelectorError::UnexpectedChar { found: '>', .. })));
    }
}
