//! Token construction errors

use super::types::{LeafType, ParentType, ValueShape};
use thiserror::Error;

/// Errors raised by the token factories
///
/// These are never recovered from: the caller built a token from bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("{token_type} text must not be empty")]
    EmptyText { token_type: LeafType },

    #[error("{token_type} text must not be whitespace only, got {text:?}")]
    WhitespaceText {
        token_type: LeafType,
        text: String,
    },

    #[error("Invalid {token_type} text {text:?}: {reason}")]
    InvalidText {
        token_type: LeafType,
        text: String,
        reason: String,
    },

    #[error("{token_type} expects a {expected:?} value, got {found:?}")]
    WrongValue {
        token_type: LeafType,
        expected: ValueShape,
        found: ValueShape,
    },

    #[error("{token_type} requires at least one child")]
    NoChildren { token_type: ParentType },

    #[error("{token_type} requires {requirement}")]
    MissingChild {
        token_type: ParentType,
        requirement: &'static str,
    },

    #[error("{token_type} text {text:?} does not match its children {expected:?}")]
    TextMismatch {
        token_type: ParentType,
        text: String,
        expected: String,
    },

    #[error("Unknown token type {0:?}")]
    UnknownType(String),

    #[error("{token_type} cannot hold the value {value:?}")]
    UnparsableValue {
        token_type: LeafType,
        value: String,
    },
}
