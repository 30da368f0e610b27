//! Selector Parser
//!
//! Recursive descent over the token stream. Grammar:
//!
//! ```text
//! list      := compound ( ',' compound )*
//! compound  := ( ident | '*' )? ( '#' name | '.' ident | attribute )*
//! attribute := '[' ident ( op ( ident | string ) )? ']'
//! ```
//!
//! Whitespace is allowed around `,` and inside brackets only; there are no
//! combinators.

use super::lexer::{AttrOp, Lexer, Token};
use crate::error::SelectorError;

/// Type part of a compound selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSelector {
    /// `*`
    Universal,
    /// Lower-cased tag name
    Named(String),
}

/// `[name]` or `[name op value]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelector {
    /// Lower-cased attribute name
    pub name: String,
    pub test: Option<(AttrOp, String)>,
}

/// One compound selector: all of its parts must match the same element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    pub type_selector: Option<TypeSelector>,
    pub ids: Vec<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<AttributeSelector>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.type_selector.is_none()
            && self.ids.is_empty()
            && self.classes.is_empty()
            && self.attributes.is_empty()
    }
}

/// Comma-separated group; an element matches if any compound does
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    pub compounds: Vec<Compound>,
}

/// Selector parser
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    position: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Result<Self, SelectorError> {
        let mut lexer = Lexer::new(input);
        let (current, position) = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            position,
        })
    }

    fn advance(&mut self) -> Result<Token, SelectorError> {
        let (next, position) = self.lexer.next_token()?;
        self.position = position;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn skip_space(&mut self) -> Result<(), SelectorError> {
        if self.current == Token::Space {
            self.advance()?;
        }
        Ok(())
    }

    fn unexpected(&self, expected: &'static str) -> SelectorError {
        match self.current {
            Token::Eof => SelectorError::UnexpectedEnd { expected },
            ref found => SelectorError::UnexpectedToken {
                found: found.to_string(),
                expected,
                position: self.position,
            },
        }
    }

    /// Parse a complete selector list
    pub fn parse(mut self) -> Result<SelectorList, SelectorError> {
        self.skip_space()?;
        if self.current == Token::Eof {
            return Err(SelectorError::Empty);
        }

        let mut compounds = vec![self.parse_compound()?];
        loop {
            self.skip_space()?;
            match self.current {
                Token::Eof => break,
                Token::Comma => {
                    self.advance()?;
                    self.skip_space()?;
                    compounds.push(self.parse_compound()?);
                }
                _ => return Err(self.unexpected("',' or end of selector")),
            }
        }
        Ok(SelectorList { compounds })
    }

    fn parse_compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();

        match &self.current {
            Token::Star => {
                self.advance()?;
                compound.type_selector = Some(TypeSelector::Universal);
            }
            Token::Ident(name) => {
                compound.type_selector = Some(TypeSelector::Named(name.to_ascii_lowercase()));
                self.advance()?;
            }
            _ => {}
        }

        loop {
            match self.current {
                Token::Hash(ref id) => {
                    compound.ids.push(id.clone());
                    self.advance()?;
                }
                Token::Dot => {
                    self.advance()?;
                    compound.classes.push(self.expect_ident("class name after '.'")?);
                }
                Token::LeftBracket => {
                    self.advance()?;
                    compound.attributes.push(self.parse_attribute()?);
                }
                _ => break,
            }
        }

        if compound.is_empty() {
            return Err(self.unexpected("a selector"));
        }
        Ok(compound)
    }

    fn parse_attribute(&mut self) -> Result<AttributeSelector, SelectorError> {
        self.skip_space()?;
        let name = self.expect_ident("attribute name")?.to_ascii_lowercase();
        self.skip_space()?;

        let test = match self.current {
            Token::Op(op) => {
                self.advance()?;
                self.skip_space()?;
                let value = match &self.current {
                    Token::Ident(v) | Token::String(v) => v.clone(),
                    _ => return Err(self.unexpected("attribute value")),
                };
                self.advance()?;
                self.skip_space()?;
                Some((op, value))
            }
            _ => None,
        };

        if self.current != Token::RightBracket {
            return Err(self.unexpected("']'"));
        }
        self.advance()?;
        Ok(AttributeSelector { name, test })
    }

    fn expect_ident(&mut self, expected: &'static str) -> Result<String, SelectorError> {
        let name = match &self.current {
            Token::Ident(name) => name.clone(),
            _ => return Err(self.unexpected(expected)),
        };
        self.advance()?;
        Ok(name)
    }
}

/// Parse a selector string
pub fn parse(selector: &str) -> Result<SelectorList, SelectorError> {
    Parser::new(selector)?.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compound() {
        let list = parse("P#example.note.wide").unwrap();
        assert_eq!(
            list.compounds,
            vec![Compound {
                type_selector: Some(TypeSelector::Named("p".into())),
                ids: vec!["example".into()],
                classes: vec!["note".into(), "wide".into()],
                attributes: vec![],
            }]
        );
    }

    #[test]
    fn test_parse_attributes() {
        let list = parse(r#"a[HREF][ rel ~= "nofollow" ][lang|=en]"#).unwrap();
        let attrs = &list.compounds[0].attributes;
        assert_eq!(
            attrs[0],
            AttributeSelector {
                name: "href".into(),
                test: None
            }
        );
        assert_eq!(
            attrs[1].test,
            Some((AttrOp::Includes, "nofollow".to_string()))
        );
        assert_eq!(attrs[2].test, Some((AttrOp::DashMatch, "en".to_string())));
    }

    #[test]
    fn test_parse_group() {
        let list = parse(" td , th,*.x ").unwrap();
        assert_eq!(list.compounds.len(), 3);
        assert_eq!(list.compounds[2].type_selector, Some(TypeSelector::Universal));
        assert_eq!(list.compounds[2].classes, vec!["x".to_string()]);
    }

    #[test]
    fn test_parse_without_type() {
        let list = parse("#main").unwrap();
        assert_eq!(list.compounds[0].type_selector, None);
        assert_eq!(list.compounds[0].ids, vec!["main".to_string()]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse(""), Err(SelectorError::Empty));
        assert_eq!(parse("   "), Err(SelectorError::Empty));
        assert_eq!(
            parse("div p"),
            Err(SelectorError::UnexpectedToken {
                found: "identifier 'p'".into(),
                expected: "',' or end of selector",
                position: 4,
            })
        );
        assert_eq!(
            parse("div,"),
            Err(SelectorError::UnexpectedEnd {
                expected: "a selector"
            })
        );
        assert_eq!(
            parse("a[href"),
            Err(SelectorError::UnexpectedEnd { expected: "']'" })
        );
        assert_eq!(
            parse("a[=x]"),
            Err(SelectorError::UnexpectedToken {
                found: "'='".into(),
                expected: "attribute name",
                position: 2,
            })
        );
        assert!(matches!(
            parse("p."),
            Err(SelectorError::UnexpectedEnd { .. })
        ));
        assert!(matches!(
            parse("a[x=]"),
            Err(SelectorError::UnexpectedToken {
                expected: "attribute value",
                ..
            })
        ));
    }
}
