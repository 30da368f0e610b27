use std::ops::ControlFlow;

use rustyhtml::matcher::{all, any, attribute, class, id, one, tag, Match, Matcher};
use rustyhtml::search::{find_node_by_attribute_value, find_some, for_each_if};
use rustyhtml::text::{content_text, inner_text, outer_text};
use rustyhtml::{find_if, HtmlDocument, Position, Range, Tag, TagSet};
use rstest::rstest;

const PAGE: &str = r#"
<html>
	<head>
		<title>Test</title>
	</head>
	<body><div class='hello'><b>Hey folks!</b></div> <a href="http://www.google.com">Google</a></body>
</html>"#;

const EXAMPLE: &str = r#"<p id="example">This is an <strong>example</strong> paragraph</p>"#;

#[test]
fn test_divs_visited_with_text() {
    let doc = HtmlDocument::parse(PAGE);
    let mut seen = Vec::new();
    let stop = for_each_if(doc.range(), &tag::types(TagSet::of(&[Tag::Div])), |div| {
        seen.push((content_text(div), inner_text(div, PAGE)));
        ControlFlow::Continue(())
    });
    assert!(stop.is_end());
    assert_eq!(
        seen,
        vec![("Hey folks!".to_string(), "<b>Hey folks!</b>")]
    );
}

#[test]
fn test_div_hello_outer_text() {
    let doc = HtmlDocument::parse(PAGE);
    let m = tag::is(Tag::Div) & class::is(["hello"]);
    let found = find_if(doc.range(), &m);
    assert_eq!(
        outer_text(found.get(), PAGE),
        "<div class='hello'><b>Hey folks!</b></div>"
    );
}

#[test]
fn test_class_hello_by_attribute_value() {
    let doc = HtmlDocument::parse(PAGE);
    let by_value = find_node_by_attribute_value(doc.range(), "class", "hello");
    let by_matcher = find_if(doc.range(), &attribute::value::is("class", "hello"));
    assert!(!by_value.is_end());
    assert_eq!(by_value, by_matcher);

    let mut count = 0;
    for_each_if(doc.range(), &attribute::value::is("class", "hello"), |_| {
        count += 1;
        ControlFlow::Continue(())
    });
    assert_eq!(count, 1);
}

#[test]
fn test_anchor_content_text() {
    let doc = HtmlDocument::parse(PAGE);
    let anchor = find_if(doc.range(), &tag::is(Tag::A));
    assert_eq!(content_text(anchor.get()), "Google");
    assert_eq!(
        anchor.get().attribute_value("href"),
        Some("http://www.google.com")
    );
}

#[test]
fn test_document_content_text_includes_whitespace() {
    let doc = HtmlDocument::parse(PAGE);
    let text = content_text(doc.document());
    assert!(text.contains("Test"));
    assert!(text.contains("Hey folks! Google"));
}

#[test]
fn test_example_paragraph() {
    let doc = HtmlDocument::parse(EXAMPLE);
    let m = tag::types(TagSet::of(&[Tag::P])) & id::is(["example"]);

    let mut found = Vec::new();
    rustyhtml::find_all_if(doc.range(), &mut found, &m);
    assert_eq!(found.len(), 1);
    assert_eq!(content_text(found[0]), "This is an example paragraph");

    let is_p = tag::types(TagSet::of(&[Tag::P]));
    let is_example = id::is(["example"]);
    let some = find_some(doc.range(), &[&is_p, &is_example]);
    assert!(!some.position.is_end());
    assert!(some.results.iter().all(|r| *r));
}

#[test]
fn test_subtree_search_stays_inside() {
    let source = "<section><p>a</p><div><p>b</p></div></section><p>c</p>";
    let doc = HtmlDocument::parse(source);
    let div = find_if(doc.range(), &tag::is(Tag::Div)).get();
    let range = Range::subtree(div);

    let mut found = Vec::new();
    rustyhtml::find_all_if(range, &mut found, &tag::is(Tag::P));
    assert_eq!(found.len(), 1);
    assert_eq!(content_text(found[0]), "b");

    let section = doc.root();
    let p_in_section = find_if(Range::subtree(section), &tag::is(Tag::P));
    assert_eq!(content_text(p_in_section.get()), "a");

    let missing = find_if(range, &tag::is(Tag::Section));
    assert_eq!(missing, range.last);
    assert_eq!(content_text(missing.get()), "c");
}

#[test]
fn test_empty_combinators() {
    let doc = HtmlDocument::parse(EXAMPLE);
    let empty = || Vec::<Match<'static>>::new();
    for node in Position::new(doc.document()) {
        assert!(all(empty()).matches(node));
        assert!(!any(empty()).matches(node));
        assert!(!one(empty()).matches(node));
        assert!(Match::always().matches(node));
    }
}

#[rstest]
fn test_one_is_parity(
    #[values(false, true)] a: bool,
    #[values(false, true)] b: bool,
    #[values(false, true)] c: bool,
) {
    let doc = HtmlDocument::parse("<p></p>");
    let constant = |v: bool| Match::from_fn(move |_| v);
    let m = one([constant(a), constant(b), constant(c)]);
    let expected = (a as u8 + b as u8 + c as u8) % 2 == 1;
    assert_eq!(m.matches(doc.root()), expected);
    assert_eq!(
        (constant(a) ^ constant(b) ^ constant(c)).matches(doc.root()),
        expected
    );
}
