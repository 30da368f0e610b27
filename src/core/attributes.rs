//! HTML Attribute Parsing
//!
//! Parses attributes from the inside of a start tag. Names are lowercased.
//! Values may be double-quoted, single-quoted or unquoted; an attribute
//! written without `=` has no value at all ("null"), which is distinct
//! from `name=""`.

use super::entities::decode_text;
use super::scanner::is_whitespace;
use std::borrow::Cow;

/// A parsed attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    /// Lowercased attribute name
    pub name: Cow<'a, str>,
    /// Decoded value; `None` for an attribute written without `=`
    pub value: Option<Cow<'a, str>>,
    /// Byte offset of the name in the source
    pub offset: usize,
}

impl<'a> Attribute<'a> {
    pub fn name_str(&self) -> &str {
        &self.name
    }

    pub fn value_str(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// Lowercase ASCII letters, borrowing when already lowercase
pub fn lowercase(name: &str) -> Cow<'_, str> {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(name.to_ascii_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}

/// Parse attributes from `source[start..end]`, the tag content between the
/// element name and the closing `>` (or `/>`).
///
/// Offsets in the result are absolute positions in `source`.
pub fn parse_attributes(source: &str, start: usize, end: usize) -> Vec<Attribute<'_>> {
    let bytes = source.as_bytes();
    let mut attrs = Vec::new();
    let mut pos = start;

    while pos < end {
        // Skip whitespace and stray slashes
        while pos < end && (is_whitespace(bytes[pos]) || bytes[pos] == b'/') {
            pos += 1;
        }
        if pos >= end {
            break;
        }

        // Attribute name: up to whitespace, '/', '=' or '>' (a leading '=' is part of the name)
        let name_start = pos;
        pos += 1;
        while pos < end && !matches!(bytes[pos], b'/' | b'=' | b'>') && !is_whitespace(bytes[pos]) {
            pos += 1;
        }
        let name = lowercase(&source[name_start..pos]);

        // Skip whitespace around '='
        let mut lookahead = pos;
        while lookahead < end && is_whitespace(bytes[lookahead]) {
            lookahead += 1;
        }
        if lookahead >= end || bytes[lookahead] != b'=' {
            attrs.push(Attribute {
                name,
                value: None,
                offset: name_start,
            });
            continue;
        }
        pos = lookahead + 1;
        while pos < end && is_whitespace(bytes[pos]) {
            pos += 1;
        }

        let (raw, next) = match bytes.get(pos) {
            Some(&quote @ (b'"' | b'\'')) if pos < end => {
                let value_start = pos + 1;
                let value_end = memchr::memchr(quote, &bytes[value_start..end])
                    .map(|i| value_start + i)
                    .unwrap_or(end);
                (&source[value_start..value_end], (value_end + 1).min(end))
            }
            _ => {
                let value_start = pos;
                while pos < end && !is_whitespace(bytes[pos]) && bytes[pos] != b'>' {
                    pos += 1;
                }
                (&source[value_start..pos], pos)
            }
        };

        attrs.push(Attribute {
            name,
            value: Some(decode_text(raw)),
            offset: name_start,
        });
        pos = next;
    }

    attrs
}
