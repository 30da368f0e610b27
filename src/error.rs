//! Error types
//!
//! Parsing never fails outright: problems found while building the tree
//! are collected as [`ParseError`] diagnostics on the document. Strict
//! parsing turns the first diagnostic into an error. Selector compilation
//! reports [`SelectorError`].

use thiserror::Error;

/// Convenience alias used by the fallible entry points
pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// A diagnostic recorded while tokenizing or building the tree.
///
/// Offsets are byte offsets into the source buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected end tag </{name}> at offset {offset}")]
    UnexpectedEndTag { name: String, offset: usize },

    #[error("element <{name}> opened at offset {offset} was never closed")]
    UnclosedElement { name: String, offset: usize },

    #[error("comment starting at offset {offset} is not terminated")]
    UnterminatedComment { offset: usize },

    #[error("CDATA section starting at offset {offset} is not terminated")]
    UnterminatedCData { offset: usize },

    #[error("tag starting at offset {offset} is not terminated")]
    UnterminatedTag { offset: usize },

    #[error("duplicate attribute '{name}' at offset {offset}")]
    DuplicateAttribute { name: String, offset: usize },

    #[error("tree depth exceeds {max_depth} at offset {offset}")]
    TreeTooDeep { max_depth: usize, offset: usize },
}

impl ParseError {
    /// Byte offset in the source this diagnostic refers to
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnexpectedEndTag { offset, .. }
            | ParseError::UnclosedElement { offset, .. }
            | ParseError::UnterminatedComment { offset }
            | ParseError::UnterminatedCData { offset }
            | ParseError::UnterminatedTag { offset }
            | ParseError::DuplicateAttribute { offset, .. }
            | ParseError::TreeTooDeep { offset, .. } => *offset,
        }
    }
}

/// Failure to compile a selector string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected character '{found}' at position {position}")]
    UnexpectedChar { found: char, position: usize },

    #[error("unexpected {found} at position {position}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        position: usize,
    },

    #[error("unterminated string starting at position {position}")]
    UnterminatedString { position: usize },

    #[error("unexpected end of selector, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::UnexpectedEndTag {
            name: "div".to_string(),
            offset: 12,
        };
        assert_eq!(err.to_string(), "unexpected end tag </div> at offset 12");
        assert_eq!(err.offset(), 12);
    }

    #[test]
    fn test_selector_error_display() {
        let err = SelectorError::UnexpectedChar {
            found: '!',
            position: 3,
        };
        assert_eq!(err.to_string(), "unexpected character '!' at position 3");
    }
}
