//! Attribute matchers
//!
//! A node matches when at least one of its attributes satisfies the
//! predicate. Non-elements have no attributes and never match. A "null"
//! attribute (written without `=`) reads as `""` for the value tests,
//! except [`value::is_empty`] and [`value::is_null`], which tell the two
//! apart.

use super::combinators::Match;
use super::needles;
use crate::dom::NodeRef;

/// Match nodes with an attribute for which `pred(name, value)` holds
pub fn matching<'s, P>(pred: P) -> Match<'s>
where
    P: Fn(&str, Option<&str>) -> bool + Send + Sync + 's,
{
    Match::from_fn(move |node: NodeRef<'_>| node.attributes().any(|a| pred(a.name, a.value)))
}

/// Match elements with at least one attribute
pub fn has<'s>() -> Match<'s> {
    Match::from_fn(|node: NodeRef<'_>| node.attribute_count() != 0)
}

/// Match elements with no attributes
pub fn has_none<'s>() -> Match<'s> {
    Match::from_fn(|node: NodeRef<'_>| node.is_element() && node.attribute_count() == 0)
}

/// Match nodes carrying any of these attribute names
pub fn exists<'s, I, S>(names: I) -> Match<'s>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    name::is(names)
}

pub mod name {
    use super::*;

    /// Match nodes with an attribute whose name is one of `names`
    pub fn is<'s, I, S>(names: I) -> Match<'s>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = needles(names);
        matching(move |name, _| names.iter().any(|n| n == name))
    }
}

pub mod value {
    //! Tests on the value of a named attribute. The `_any` forms take a
    //! list of needles and never match when the list is empty.

    use super::*;

    fn on_value<'s, F>(attribute: impl Into<String>, test: F) -> Match<'s>
    where
        F: Fn(Option<&str>) -> bool + Send + Sync + 's,
    {
        let attribute = attribute.into();
        matching(move |name, value| name == attribute && test(value))
    }

    fn on_any<'s, I, S, F>(attribute: impl Into<String>, values: I, test: F) -> Match<'s>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&str, &str) -> bool + Send + Sync + 's,
    {
        let values = needles(values);
        on_value(attribute, move |value| {
            let value = value.unwrap_or("");
            values.iter().any(|needle| test(value, needle.as_str()))
        })
    }

    /// Value equals `value`
    pub fn is<'s>(attribute: impl Into<String>, value: impl Into<String>) -> Match<'s> {
        is_any(attribute, [value.into()])
    }

    /// Value equals one of `values`
    pub fn is_any<'s, I, S>(attribute: impl Into<String>, values: I) -> Match<'s>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        on_any(attribute, values, |value, needle| value == needle)
    }

    /// Value contains `substring`
    pub fn contains<'s>(attribute: impl Into<String>, substring: impl Into<String>) -> Match<'s> {
        contains_any(attribute, [substring.into()])
    }

    /// Value contains one of `substrings`
    pub fn contains_any<'s, I, S>(attribute: impl Into<String>, substrings: I) -> Match<'s>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        on_any(attribute, substrings, |value, needle| value.contains(needle))
    }

    /// Value starts with `prefix`
    pub fn starts_with<'s>(attribute: impl Into<String>, prefix: impl Into<String>) -> Match<'s> {
        starts_with_any(attribute, [prefix.into()])
    }

    /// Value starts with one of `prefixes`
    pub fn starts_with_any<'s, I, S>(attribute: impl Into<String>, prefixes: I) -> Match<'s>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        on_any(attribute, prefixes, |value, needle| value.starts_with(needle))
    }

    /// Value ends with `suffix`
    pub fn ends_with<'s>(attribute: impl Into<String>, suffix: impl Into<String>) -> Match<'s> {
        ends_with_any(attribute, [suffix.into()])
    }

    /// Value ends with one of `suffixes`
    pub fn ends_with_any<'s, I, S>(attribute: impl Into<String>, suffixes: I) -> Match<'s>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        on_any(attribute, suffixes, |value, needle| value.ends_with(needle))
    }

    /// Value is `prefix` or starts with `prefix` followed by `-` (CSS `|=`)
    pub fn contains_prefix<'s>(attribute: impl Into<String>, prefix: impl Into<String>) -> Match<'s> {
        let prefix = prefix.into();
        on_value(attribute, move |value| {
            value
                .unwrap_or("")
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('-'))
        })
    }

    /// Value is a whitespace-separated list containing `word` (CSS `~=`).
    /// An empty `word` never matches.
    pub fn contains_word<'s>(attribute: impl Into<String>, word: impl Into<String>) -> Match<'s> {
        let word = word.into();
        on_value(attribute, move |value| {
            !word.is_empty() && value.unwrap_or("").split_ascii_whitespace().any(|w| w == word)
        })
    }

    /// Attribute present with an explicitly empty value (`name=""`)
    pub fn is_empty<'s>(attribute: impl Into<String>) -> Match<'s> {
        on_value(attribute, |value| value == Some(""))
    }

    /// Attribute present without a value (`name`)
    pub fn is_null<'s>(attribute: impl Into<String>) -> Match<'s> {
        on_value(attribute, |value| value.is_none())
    }

    /// Attribute present with a non-empty value
    pub fn has_value<'s>(attribute: impl Into<String>) -> Match<'s> {
        on_value(attribute, |value| value.is_some_and(|v| !v.is_empty()))
    }
}

/// Matchers on the `class` attribute value
pub mod class {
    use super::*;

    /// Match nodes whose `class` value satisfies `pred`
    pub fn matching<'s, P>(pred: P) -> Match<'s>
    where
        P: Fn(&str) -> bool + Send + Sync + 's,
    {
        value_matching("class", pred)
    }

    /// `class` value equals one of `values`
    pub fn is<'s, I, S>(values: I) -> Match<'s>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        value::is_any("class", values)
    }

    /// `class` lists `name` among its whitespace-separated classes
    pub fn has<'s>(name: impl Into<String>) -> Match<'s> {
        value::contains_word("class", name)
    }
}

/// Matchers on the `id` attribute value
pub mod id {
    use super::*;

    /// Match nodes whose `id` value satisfies `pred`
    pub fn matching<'s, P>(pred: P) -> Match<'s>
    where
        P: Fn(&str) -> bool + Send + Sync + 's,
    {
        value_matching("id", pred)
    }

    /// `id` value equals one of `values`
    pub fn is<'s, I, S>(values: I) -> Match<'s>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        value::is_any("id", values)
    }
}

fn value_matching<'s, P>(attribute: &'static str, pred: P) -> Match<'s>
where
    P: Fn(&str) -> bool + Send + Sync + 's,
{
    matching(move |name, value| name == attribute && pred(value.unwrap_or("")))
}
