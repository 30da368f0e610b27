//! Selector Lexer
//!
//! Tokenizes compound selectors into tokens. Whitespace is a token of its
//! own because it is only allowed around `,` and inside brackets.

use std::fmt;

use crate::error::SelectorError;

/// Attribute value operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrOp {
    Equals,    // =
    Includes,  // ~=
    DashMatch, // |=
    Prefix,    // ^=
    Suffix,    // $=
    Substring, // *=
}

impl AttrOp {
    pub fn as_str(self) -> &'static str {
        match self {
            AttrOp::Equals => "=",
            AttrOp::Includes => "~=",
            AttrOp::DashMatch => "|=",
            AttrOp::Prefix => "^=",
            AttrOp::Suffix => "$=",
            AttrOp::Substring => "*=",
        }
    }
}

/// Selector token types
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String),
    /// `#name`
    Hash(String),
    /// Quoted string, quotes removed
    String(String),
    Op(AttrOp),

    Dot,          // .
    Star,         // *
    Comma,        // ,
    LeftBracket,  // [
    RightBracket, // ]
    Space,

    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "identifier '{name}'"),
            Token::Hash(name) => write!(f, "'#{name}'"),
            Token::String(s) => write!(f, "string \"{s}\""),
            Token::Op(op) => write!(f, "'{}'", op.as_str()),
            Token::Dot => f.write_str("'.'"),
            Token::Star => f.write_str("'*'"),
            Token::Comma => f.write_str("','"),
            Token::LeftBracket => f.write_str("'['"),
            Token::RightBracket => f.write_str("']'"),
            Token::Space => f.write_str("whitespace"),
            Token::Eof => f.write_str("end of selector"),
        }
    }
}

/// Selector lexer
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, pos: 0 }
    }

    /// Byte offset of the next unread character
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    /// Next token and the offset where it starts
    pub fn next_token(&mut self) -> Result<(Token, usize), SelectorError> {
        let start = self.pos;
        let c = match self.peek() {
            Some(c) => c,
            None => return Ok((Token::Eof, start)),
        };

        let token = match c {
            c if c.is_whitespace() => {
                while let Some(w) = self.peek().filter(|w| w.is_whitespace()) {
                    self.advance(w.len_utf8());
                }
                Token::Space
            }
            '.' => self.single(Token::Dot),
            '*' => {
                self.advance(1);
                if self.peek() == Some('=') {
                    self.advance(1);
                    Token::Op(AttrOp::Substring)
                } else {
                    Token::Star
                }
            }
            ',' => self.single(Token::Comma),
            '[' => self.single(Token::LeftBracket),
            ']' => self.single(Token::RightBracket),
            '=' => self.single(Token::Op(AttrOp::Equals)),
            '~' | '|' | '^' | '$' => {
                self.advance(1);
                if self.peek() != Some('=') {
                    return Err(SelectorError::UnexpectedChar { found: c, position: start });
                }
                self.advance(1);
                Token::Op(match c {
                    '~' => AttrOp::Includes,
                    '|' => AttrOp::DashMatch,
                    '^' => AttrOp::Prefix,
                    _ => AttrOp::Suffix,
                })
            }
            '"' | '\'' => Token::String(self.read_string(c)?),
            '#' => {
                self.advance(1);
                let name = self.read_ident();
                if name.is_empty() {
                    return Err(SelectorError::UnexpectedChar { found: '#', position: start });
                }
                Token::Hash(name.to_string())
            }
            c if is_ident_char(c) => Token::Ident(self.read_ident().to_string()),
            c => return Err(SelectorError::UnexpectedChar { found: c, position: start }),
        };
        Ok((token, start))
    }

    fn single(&mut self, token: Token) -> Token {
        self.advance(1);
        token
    }

    fn read_ident(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !is_ident_char(c) {
                break;
            }
            self.advance(c.len_utf8());
        }
        &self.input[start..self.pos]
    }

    fn read_string(&mut self, quote: char) -> Result<String, SelectorError> {
        let start = self.pos;
        self.advance(1);
        let body = self.remaining();
        match body.find(quote) {
            Some(end) => {
                self.advance(end + 1);
                Ok(body[..end].to_string())
            }
            None => Err(SelectorError::UnterminatedString { position: start }),
        }
    }
}

#[inline]
fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}
