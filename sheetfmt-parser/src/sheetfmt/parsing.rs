//! Parsing entry points and parse errors
//!
//! [parse_pattern] reads a whole format pattern (an expression) with the default
//! context. [parse_with_context] picks the family and context. Both build a fresh
//! [Parsers] set; callers parsing many patterns should keep their own.

use crate::sheetfmt::context::ParserContext;
use crate::sheetfmt::grammar::Parsers;
use crate::sheetfmt::token::Token;
use chumsky::error::{Simple, SimpleReason};
use thiserror::Error;

pub use crate::sheetfmt::grammar::PatternFamily;

/// Why a pattern was rejected. Positions are char offsets into the pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid character {found:?} at position {position}, expected {expected}")]
    InvalidCharacter {
        pattern: String,
        position: usize,
        found: char,
        expected: String,
    },

    #[error("Unexpected end of pattern at position {position}, expected {expected}")]
    UnexpectedEnd {
        pattern: String,
        position: usize,
        expected: String,
    },

    #[error("Invalid pattern at position {position}: {reason}")]
    Invalid {
        pattern: String,
        position: usize,
        reason: String,
    },
}

impl ParseError {
    /// Keep the error that got furthest into the pattern.
    pub(crate) fn from_errors(pattern: &str, errors: Vec<Simple<char>>) -> ParseError {
        let Some(error) = errors.into_iter().max_by_key(|error| error.span().start) else {
            return ParseError::Invalid {
                pattern: pattern.to_string(),
                position: 0,
                reason: "nothing matched".to_string(),
            };
        };

        let position = error.span().start;
        if let SimpleReason::Custom(reason) = error.reason() {
            return ParseError::Invalid {
                pattern: pattern.to_string(),
                position,
                reason: reason.clone(),
            };
        }

        let expected = describe_expected(&error);
        match error.found() {
            Some(found) => ParseError::InvalidCharacter {
                pattern: pattern.to_string(),
                position,
                found: *found,
                expected,
            },
            None => ParseError::UnexpectedEnd {
                pattern: pattern.to_string(),
                position,
                expected,
            },
        }
    }

    pub fn pattern(&self) -> &str {
        match self {
            ParseError::InvalidCharacter { pattern, .. }
            | ParseError::UnexpectedEnd { pattern, .. }
            | ParseError::Invalid { pattern, .. } => pattern,
        }
    }

    pub fn position(&self) -> usize {
        match self {
            ParseError::InvalidCharacter { position, .. }
            | ParseError::UnexpectedEnd { position, .. }
            | ParseError::Invalid { position, .. } => *position,
        }
    }
}

fn describe_expected(error: &Simple<char>) -> String {
    let mut expected: Vec<String> = error
        .expected()
        .map(|item| match item {
            Some(c) => format!("{c:?}"),
            None => "end of pattern".to_string(),
        })
        .collect();
    if expected.is_empty() {
        return "something else".to_string();
    }
    expected.sort();
    expected.dedup();
    expected.join(", ")
}

/// Parse a complete pattern with the default context.
pub fn parse_pattern(pattern: &str) -> Result<Token, ParseError> {
    parse_with_context(pattern, PatternFamily::Expression, &ParserContext::default())
}

/// Parse all of `pattern` as `family` using the symbols of `context`.
pub fn parse_with_context(
    pattern: &str,
    family: PatternFamily,
    context: &ParserContext,
) -> Result<Token, ParseError> {
    Parsers::new(context).parse(family, pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pattern_returns_expression() {
        let token = parse_pattern("0.00").unwrap();
        assert!(token.is_expression());
        assert_eq!(token.text(), "0.00");
        assert!(token.children()[0].is_number());
    }

    #[test]
    fn test_invalid_character_position() {
        let error = parse_pattern("#,##0 ]").unwrap_err();
        assert_eq!(error.pattern(), "#,##0 ]");
        assert_eq!(error.position(), 6);
        assert!(matches!(error, ParseError::InvalidCharacter { found: ']', .. }));
    }

    #[test]
    fn test_unexpected_end() {
        let error = parse_with_context(
            "[RED",
            PatternFamily::Color,
            &ParserContext::default(),
        )
        .unwrap_err();
        assert_eq!(error.position(), 4);
        assert!(matches!(error, ParseError::UnexpectedEnd { .. }));
    }

    #[test]
    fn test_empty_pattern_is_invalid() {
        assert!(parse_pattern("").is_err());
    }
}
