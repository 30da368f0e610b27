use rustyhtml::matcher::{attribute, tag};
use rustyhtml::search::{find_all_if, find_if};
use rustyhtml::text::content_text;
use rustyhtml::{HtmlDocument, Range, Tag};

const TABLE_PAGE: &str = r#"
<html>
<head>
	<title>Table example</title>
</head>
<body>
	<div id="important_table">
		<table>
			<tbody>
				<tr>
					<td><strong>Item</strong></td>
					<td><strong>Quantity</strong></td>
				</tr>
				<tr>
					<td>Plate</td>
					<td>10</td>
				</tr>
				<tr>
					<td>Bowl</td>
					<td>5</td>
				</tr>
			</tbody>
		</table>
	</div>
</body>
"#;

fn scrape(doc: &HtmlDocument) -> Vec<Vec<String>> {
    let div = find_if(
        doc.range(),
        &(tag::is(Tag::Div) & attribute::id::is(["important_table"])),
    );
    assert!(!div.is_end(), "table container not found");

    let tbody = find_if(div.subtree(), &tag::is(Tag::Tbody));
    assert!(!tbody.is_end(), "tbody not found");

    let mut rows = Vec::new();
    find_all_if(tbody.subtree(), &mut rows, &tag::is(Tag::Tr));

    rows.into_iter()
        .map(|tr| {
            let mut cells = Vec::new();
            find_all_if(Range::subtree(tr), &mut cells, &tag::is(Tag::Td));
            cells
                .into_iter()
                .map(|td| content_text(td).trim().to_string())
                .collect()
        })
        .collect()
}

#[test]
fn test_table_scrape() {
    let doc = HtmlDocument::parse(TABLE_PAGE);
    assert_eq!(
        scrape(&doc),
        vec![
            vec!["Item", "Quantity"],
            vec!["Plate", "10"],
            vec!["Bowl", "5"],
        ]
    );
}

#[test]
fn test_table_scrape_without_whitespace_nodes() {
    let options = rustyhtml::ParseOptions::default().with_keep_whitespace(false);
    let doc = HtmlDocument::parse_with_options(TABLE_PAGE, &options);
    assert_eq!(scrape(&doc).len(), 3);
}

#[test]
fn test_table_scrape_by_selector() {
    let doc = HtmlDocument::parse(TABLE_PAGE);
    let cells = rustyhtml::selector::compile("td").unwrap();
    let texts = {
        let mut found = Vec::new();
        find_all_if(doc.range(), &mut found, &cells);
        found
            .into_iter()
            .map(|td| content_text(td).trim().to_string())
            .collect::<Vec<_>>()
    };
    assert_eq!(texts, ["Item", "Quantity", "Plate", "10", "Bowl", "5"]);
}
