//! Text matchers
//!
//! `content_text` matchers test the decoded text of a node's subtree.
//! `inner_text` and `outer_text` matchers test slices of the source
//! buffer and so borrow it for the matcher's lifetime. Multi-needle
//! tests never match with an empty needle list.

use super::combinators::Match;
use super::needles;
use crate::dom::NodeRef;

pub mod content_text {
    use super::*;
    use crate::text::content_text;

    /// Content text satisfies `pred`
    pub fn matching<'s, P>(pred: P) -> Match<'s>
    where
        P: Fn(&str) -> bool + Send + Sync + 's,
    {
        Match::from_fn(move |node: NodeRef<'_>| pred(&content_text(node)))
    }

    /// `pred(map(content text))`
    pub fn map<'s, T, M, P>(map: M, pred: P) -> Match<'s>
    where
        M: Fn(&str) -> T + Send + Sync + 's,
        P: Fn(T) -> bool + Send + Sync + 's,
    {
        Match::from_fn(move |node: NodeRef<'_>| pred(map(&content_text(node))))
    }

    /// Non-empty content text containing one of `substrings`
    pub fn contains<'s, I, S>(substrings: I) -> Match<'s>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let substrings = needles(substrings);
        matching(move |text| !text.is_empty() && substrings.iter().any(|s| text.contains(s.as_str())))
    }

    pub fn is_empty<'s>() -> Match<'s> {
        matching(str::is_empty)
    }

    pub fn is_not_empty<'s>() -> Match<'s> {
        matching(|text| !text.is_empty())
    }

    /// Content text starts with one of `prefixes`
    pub fn starts_with<'s, I, S>(prefixes: I) -> Match<'s>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prefixes = needles(prefixes);
        matching(move |text| prefixes.iter().any(|p| text.starts_with(p.as_str())))
    }

    /// Content text ends with one of `suffixes`
    pub fn ends_with<'s, I, S>(suffixes: I) -> Match<'s>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let suffixes = needles(suffixes);
        matching(move |text| suffixes.iter().any(|s| text.ends_with(s.as_str())))
    }

    /// Content text equals one of `values`
    pub fn is<'s, I, S>(values: I) -> Match<'s>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = needles(values);
        matching(move |text| values.iter().any(|v| v == text))
    }
}

macro_rules! source_text_matchers {
    ($(#[$doc:meta])* $module:ident, $extract:path) => {
        $(#[$doc])*
        pub mod $module {
            use super::*;

            /// Text satisfies `pred`
            pub fn matching<'s, P>(source: &'s str, pred: P) -> Match<'s>
            where
                P: Fn(&str) -> bool + Send + Sync + 's,
            {
                Match::from_fn(move |node: NodeRef<'_>| pred($extract(node, source)))
            }

            pub fn is_empty(source: &str) -> Match<'_> {
                matching(source, str::is_empty)
            }

            pub fn is_not_empty(source: &str) -> Match<'_> {
                matching(source, |text| !text.is_empty())
            }

            /// Text contains one of `substrings`
            pub fn contains<'s, I, S>(source: &'s str, substrings: I) -> Match<'s>
            where
                I: IntoIterator<Item = S>,
                S: Into<String>,
            {
                let substrings = needles(substrings);
                matching(source, move |text| substrings.iter().any(|s| text.contains(s.as_str())))
            }

            /// Text starts with one of `prefixes`
            pub fn starts_with<'s, I, S>(source: &'s str, prefixes: I) -> Match<'s>
            where
                I: IntoIterator<Item = S>,
                S: Into<String>,
            {
                let prefixes = needles(prefixes);
                matching(source, move |text| prefixes.iter().any(|p| text.starts_with(p.as_str())))
            }

            /// Text ends with one of `suffixes`
            pub fn ends_with<'s, I, S>(source: &'s str, suffixes: I) -> Match<'s>
            where
                I: IntoIterator<Item = S>,
                S: Into<String>,
            {
                let suffixes = needles(suffixes);
                matching(source, move |text| suffixes.iter().any(|s| text.ends_with(s.as_str())))
            }

            /// Text equals one of `values`
            pub fn is<'s, I, S>(source: &'s str, values: I) -> Match<'s>
            where
                I: IntoIterator<Item = S>,
                S: Into<String>,
            {
                let values = needles(values);
                matching(source, move |text| values.iter().any(|v| v == text))
            }

            /// Text equals none of `values`
            pub fn is_not<'s, I, S>(source: &'s str, values: I) -> Match<'s>
            where
                I: IntoIterator<Item = S>,
                S: Into<String>,
            {
                let values = needles(values);
                matching(source, move |text| values.iter().all(|v| v != text))
            }
        }
    };
}

source_text_matchers!(
    /// Matchers on the source text between a node's tags
    inner_text,
    crate::text::inner_text
);

source_text_matchers!(
    /// Matchers on the source text of a node's whole markup
    outer_text,
    crate::text::outer_text
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HtmlDocument;
    use crate::matcher::Matcher;

    const SOURCE: &str = "<ul><li>Plate <b>10</b></li><li></li></ul>";

    #[test]
    fn test_content_text_matchers() {
        let doc = HtmlDocument::parse(SOURCE);
        let plate = doc.root().child(0);
        let empty = doc.root().child(1);

        assert!(content_text::is(["Plate 10"]).matches(plate));
        assert!(content_text::contains(["late", "zzz"]).matches(plate));
        assert!(!content_text::contains([""]).matches(empty));
        assert!(!content_text::contains(Vec::<String>::new()).matches(plate));
        assert!(content_text::starts_with(["Pl"]).matches(plate));
        assert!(content_text::ends_with(["10"]).matches(plate));
        assert!(content_text::is_empty().matches(empty));
        assert!(content_text::is_not_empty().matches(plate));
        assert!(content_text::matching(|t| t.len() == 8).matches(plate));
        assert!(content_text::map(|t| t.split(' ').count(), |n| n == 2).matches(plate));
    }

    #[test]
    fn test_inner_text_matchers() {
        let doc = HtmlDocument::parse(SOURCE);
        let plate = doc.root().child(0);
        let empty = doc.root().child(1);

        assert!(inner_text::is(SOURCE, ["Plate <b>10</b>"]).matches(plate));
        assert!(inner_text::contains(SOURCE, ["<b>"]).matches(plate));
        assert!(inner_text::starts_with(SOURCE, ["Plate"]).matches(plate));
        assert!(inner_text::ends_with(SOURCE, ["</b>"]).matches(plate));
        assert!(inner_text::is_empty(SOURCE).matches(empty));
        assert!(inner_text::is_not_empty(SOURCE).matches(plate));
        assert!(inner_text::is_not(SOURCE, ["x", "y"]).matches(plate));
        assert!(!inner_text::is_not(SOURCE, ["Plate <b>10</b>"]).matches(plate));
        assert!(!inner_text::is(SOURCE, Vec::<String>::new()).matches(plate));
    }

    #[test]
    fn test_outer_text_matchers() {
        let doc = HtmlDocument::parse(SOURCE);
        let empty = doc.root().child(1);

        assert!(outer_text::is(SOURCE, ["<li></li>"]).matches(empty));
        assert!(outer_text::starts_with(SOURCE, ["<li"]).matches(empty));
        assert!(outer_text::is_not_empty(SOURCE).matches(empty));
        assert!(outer_text::matching(SOURCE, |t| t.len() == 9).matches(empty));
    }
}
