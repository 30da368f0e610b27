//! HTML Tokenizer - pull-style token extraction
//!
//! Extracts tokens from HTML source:
//! - Start tags (with attributes and the self-closing flag) and end tags
//! - Text runs (character references decoded)
//! - Comments, CDATA sections, DOCTYPE and bogus comments
//!
//! The tokenizer is lenient: it never stops early. Problems are recorded
//! as diagnostics that the tree builder drains.

use super::attributes::{lowercase, parse_attributes, Attribute};
use super::entities::decode_text;
use super::scanner::{is_tag_name_start, Scanner};
use super::tags::Tag;
use crate::error::ParseError;
use std::borrow::Cow;

/// Type of HTML token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `<name ...>` or `<name .../>`
    StartTag,
    /// `</name>`
    EndTag,
    /// Character data between markup
    Text,
    /// `<!--...-->`, `<!...>` or `<?...>`
    Comment,
    /// `<![CDATA[...]]>`
    CData,
    /// `<!DOCTYPE ...>`
    DocType,
}

/// A token with its source spans
#[derive(Debug, Clone)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Whole token span in the source (start, end)
    pub span: (usize, usize),
    /// Payload span: text run, comment body, CDATA body or doctype body
    pub content_span: (usize, usize),
    /// For tags: the lowercased element name
    pub name: Cow<'a, str>,
    /// For start tags: attributes in source order, duplicates removed
    pub attributes: Vec<Attribute<'a>>,
    /// For start tags: written as `<name/>`
    pub self_closing: bool,
    /// For text: decoded content. Comments and CDATA are never decoded.
    pub content: Cow<'a, str>,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, span: (usize, usize)) -> Self {
        Token {
            kind,
            span,
            content_span: span,
            name: Cow::Borrowed(""),
            attributes: Vec::new(),
            self_closing: false,
            content: Cow::Borrowed(""),
        }
    }

    fn with_content(mut self, content_span: (usize, usize), content: Cow<'a, str>) -> Self {
        self.content_span = content_span;
        self.content = content;
        self
    }

    /// The tag this token names (start and end tags)
    pub fn tag(&self) -> Tag {
        Tag::from_lowercase(&self.name)
    }
}

/// Raw text mode entered after a start tag like `<script>`
#[derive(Debug, Clone)]
struct RawText {
    name: String,
    decode: bool,
}

/// HTML tokenizer implementing a pull-parser pattern
pub struct Tokenizer<'a> {
    source: &'a str,
    scanner: Scanner<'a>,
    raw_text: Option<RawText>,
    diagnostics: Vec<ParseError>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Tokenizer {
            source,
            scanner: Scanner::new(source.as_bytes()),
            raw_text: None,
            diagnostics: Vec::new(),
        }
    }

    /// Take the diagnostics recorded so far
    pub fn take_diagnostics(&mut self) -> Vec<ParseError> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Get the next token, or None at end of input
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        if let Some(raw) = self.raw_text.take() {
            if let Some(token) = self.read_raw_text(&raw) {
                return Some(token);
            }
        }
        loop {
            if self.scanner.is_eof() {
                return None;
            }

            let start = self.scanner.position();
            if self.scanner.peek() == Some(b'<') {
                match self.scanner.peek_at(1) {
                    Some(b'!') => return Some(self.read_markup_declaration(start)),
                    Some(b'?') => return Some(self.read_bogus_comment(start, 2)),
                    // `</>` is dropped entirely
                    Some(b'/') if self.scanner.peek_at(2) == Some(b'>') => {
                        self.scanner.advance(3);
                        continue;
                    }
                    Some(b'/') => {
                        if let Some(token) = self.read_end_tag(start) {
                            return Some(token);
                        }
                    }
                    Some(b) if is_tag_name_start(b) => return Some(self.read_start_tag(start)),
                    _ => {}
                }
            }
            return Some(self.read_text(start));
        }
    }

    /// Text up to the next `<` that opens markup
    fn read_text(&mut self, start: usize) -> Token<'a> {
        // The first byte is always text, even if it is a '<'
        self.scanner.advance(1);
        loop {
            match self.scanner.find_tag_start() {
                Some(lt) => {
                    self.scanner.set_position(lt);
                    if self.opens_markup() {
                        break;
                    }
                    self.scanner.advance(1);
                }
                None => {
                    self.scanner.set_position(self.scanner.len());
                    break;
                }
            }
        }
        let end = self.scanner.position();
        Token::new(TokenKind::Text, (start, end))
            .with_content((start, end), decode_text(&self.source[start..end]))
    }

    /// Does the `<` at the current position start a tag, comment or declaration?
    fn opens_markup(&self) -> bool {
        match self.scanner.peek_at(1) {
            Some(b'!') | Some(b'?') => true,
            Some(b'/') => self
                .scanner
                .peek_at(2)
                .is_some_and(|b| is_tag_name_start(b) || b == b'>'),
            Some(b) => is_tag_name_start(b),
            None => false,
        }
    }

    fn read_start_tag(&mut self, start: usize) -> Token<'a> {
        self.scanner.advance(1);
        let name_start = self.scanner.position();
        let raw_name = self.scanner.read_tag_name();
        let name_end = name_start + raw_name.len();
        let name = lowercase(&self.source[name_start..name_end]);

        let Some(gt) = self.scanner.find_tag_end_quoted() else {
            return self.unterminated_tag(start);
        };
        self.scanner.set_position(gt + 1);

        let self_closing = gt > name_end && self.source.as_bytes()[gt - 1] == b'/';
        let attributes = self.dedup_attributes(parse_attributes(self.source, name_end, gt));

        let tag = Tag::from_lowercase(&name);
        if !self_closing && tag.is_raw_text() {
            self.raw_text = Some(RawText {
                name: name.to_string(),
                decode: tag.is_escapable_raw_text(),
            });
        }

        let mut token = Token::new(TokenKind::StartTag, (start, gt + 1));
        token.name = name;
        token.attributes = attributes;
        token.self_closing = self_closing;
        token
    }

    /// Keep the first of each attribute name, recording the rest
    fn dedup_attributes(&mut self, attrs: Vec<Attribute<'a>>) -> Vec<Attribute<'a>> {
        let mut kept: Vec<Attribute<'a>> = Vec::with_capacity(attrs.len());
        for attr in attrs {
            if kept.iter().any(|a| a.name == attr.name) {
                tracing::trace!(name = %attr.name, offset = attr.offset, "duplicate attribute dropped");
                self.diagnostics.push(ParseError::DuplicateAttribute {
                    name: attr.name.into_owned(),
                    offset: attr.offset,
                });
            } else {
                kept.push(attr);
            }
        }
        kept
    }

    /// `</name ...>`; returns None when the `</` is just text
    fn read_end_tag(&mut self, start: usize) -> Option<Token<'a>> {
        if !self.scanner.peek_at(2).is_some_and(is_tag_name_start) {
            return None;
        }
        self.scanner.advance(2);
        let name_start = self.scanner.position();
        let raw_name = self.scanner.read_tag_name();
        let name = lowercase(&self.source[name_start..name_start + raw_name.len()]);

        let Some(gt) = self.scanner.find_tag_end_quoted() else {
            return Some(self.unterminated_tag(start));
        };
        self.scanner.set_position(gt + 1);

        let mut token = Token::new(TokenKind::EndTag, (start, gt + 1));
        token.name = name;
        Some(token)
    }

    /// A tag with no closing `>`: the rest of the input becomes text
    fn unterminated_tag(&mut self, start: usize) -> Token<'a> {
        self.diagnostics.push(ParseError::UnterminatedTag { offset: start });
        let end = self.scanner.len();
        self.scanner.set_position(end);
        Token::new(TokenKind::Text, (start, end))
            .with_content((start, end), decode_text(&self.source[start..end]))
    }

    /// `<!--`, `<![CDATA[`, `<!DOCTYPE` or a bogus comment
    fn read_markup_declaration(&mut self, start: usize) -> Token<'a> {
        if self.scanner.starts_with(b"<!--") {
            return self.read_comment(start);
        }
        if self.scanner.starts_with(b"<![CDATA[") {
            return self.read_cdata(start);
        }
        if self.scanner.starts_with_ignore_case(b"<!doctype") {
            let mut token = self.read_bogus_comment(start, 9);
            token.kind = TokenKind::DocType;
            return token;
        }
        self.read_bogus_comment(start, 2)
    }

    fn read_comment(&mut self, start: usize) -> Token<'a> {
        self.scanner.advance(4);
        let body_start = self.scanner.position();
        match self.scanner.find_bytes(b"-->") {
            Some(close) => {
                self.scanner.set_position(close + 3);
                self.delimited(TokenKind::Comment, start, body_start, close, close + 3)
            }
            None => {
                self.diagnostics.push(ParseError::UnterminatedComment { offset: start });
                let end = self.scanner.len();
                self.scanner.set_position(end);
                self.delimited(TokenKind::Comment, start, body_start, end, end)
            }
        }
    }

    fn read_cdata(&mut self, start: usize) -> Token<'a> {
        self.scanner.advance(9);
        let body_start = self.scanner.position();
        match self.scanner.find_bytes(b"]]>") {
            Some(close) => {
                self.scanner.set_position(close + 3);
                self.delimited(TokenKind::CData, start, body_start, close, close + 3)
            }
            None => {
                self.diagnostics.push(ParseError::UnterminatedCData { offset: start });
                let end = self.scanner.len();
                self.scanner.set_position(end);
                self.delimited(TokenKind::CData, start, body_start, end, end)
            }
        }
    }

    /// `<!...>` / `<?...>`: everything up to the next `>` is the payload
    fn read_bogus_comment(&mut self, start: usize, prefix: usize) -> Token<'a> {
        self.scanner.advance(prefix);
        let body_start = self.scanner.position();
        let (body_end, end) = match self.scanner.find_byte(b'>') {
            Some(gt) => (gt, gt + 1),
            None => (self.scanner.len(), self.scanner.len()),
        };
        self.scanner.set_position(end);
        self.delimited(TokenKind::Comment, start, body_start, body_end, end)
    }

    fn delimited(
        &self,
        kind: TokenKind,
        start: usize,
        body_start: usize,
        body_end: usize,
        end: usize,
    ) -> Token<'a> {
        Token::new(kind, (start, end)).with_content(
            (body_start, body_end),
            Cow::Borrowed(&self.source[body_start..body_end]),
        )
    }

    /// Content of a raw text element, up to (not including) its end tag
    fn read_raw_text(&mut self, raw: &RawText) -> Option<Token<'a>> {
        let start = self.scanner.position();
        let end = self
            .scanner
            .find_end_tag(raw.name.as_bytes())
            .unwrap_or(self.scanner.len());
        if end == start {
            return None;
        }
        self.scanner.set_position(end);
        let text = &self.source[start..end];
        let content = if raw.decode {
            decode_text(text)
        } else {
            Cow::Borrowed(text)
        };
        Some(Token::new(TokenKind::Text, (start, end)).with_content((start, end), content))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
