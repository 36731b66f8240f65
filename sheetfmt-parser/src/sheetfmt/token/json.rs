//! JSON persisted form of tokens
//!
//! Every token is stored as `{"type": <kebab-case name>, "value": ..., "text": ...}`.
//! Parents store their children as the value; decimals and chars are stored as strings so
//! that no precision is lost. Reading goes back through the validating factories.

use super::core::Token;
use super::error::TokenError;
use super::types::{LeafType, ParentType, ValueShape};
use super::value::LeafValue;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TokenRepr {
    #[serde(rename = "type")]
    type_name: String,
    value: ValueRepr,
    text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ValueRepr {
    Children(Vec<Token>),
    Integer(u32),
    Text(String),
}

impl From<Token> for TokenRepr {
    fn from(token: Token) -> Self {
        let type_name = token.type_name().to_string();
        let text = token.text().to_string();
        let value = match token {
            Token::Parent(parent) => ValueRepr::Children(parent.children().to_vec()),
            Token::Leaf(leaf) => match leaf.value() {
                LeafValue::Integer(n) => ValueRepr::Integer(*n),
                other => ValueRepr::Text(other.to_string()),
            },
        };
        TokenRepr {
            type_name,
            value,
            text,
        }
    }
}

impl TryFrom<TokenRepr> for Token {
    type Error = TokenError;

    fn try_from(repr: TokenRepr) -> Result<Self, Self::Error> {
        if let Some(parent) = ParentType::from_name(&repr.type_name) {
            return match repr.value {
                ValueRepr::Children(children) => {
                    Token::parent_with_text(parent, children, repr.text)
                }
                _ => Err(TokenError::NoChildren {
                    token_type: parent,
                }),
            };
        }

        let leaf = LeafType::from_name(&repr.type_name)
            .ok_or_else(|| TokenError::UnknownType(repr.type_name.clone()))?;
        let value = leaf_value(leaf, repr.value)?;
        Token::leaf(leaf, value, repr.text)
    }
}

fn leaf_value(token_type: LeafType, value: ValueRepr) -> Result<LeafValue, TokenError> {
    let unparsable = |value: String| TokenError::UnparsableValue { token_type, value };

    match (token_type.value_shape(), value) {
        (_, ValueRepr::Children(children)) => Err(unparsable(format!(
            "{} children",
            children.len()
        ))),
        (ValueShape::Text, ValueRepr::Text(text)) => Ok(LeafValue::Text(text)),
        (ValueShape::Char, ValueRepr::Text(text)) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(LeafValue::Char(c)),
                _ => Err(unparsable(text)),
            }
        }
        (ValueShape::Integer, ValueRepr::Integer(n)) => Ok(LeafValue::Integer(n)),
        (ValueShape::Integer, ValueRepr::Text(text)) => {
            text.parse().map(LeafValue::Integer).map_err(|_| unparsable(text))
        }
        (ValueShape::Number, ValueRepr::Integer(n)) => {
            Ok(LeafValue::Number(BigDecimal::from(n)))
        }
        (ValueShape::Number, ValueRepr::Text(text)) => BigDecimal::from_str(&text)
            .map(LeafValue::Number)
            .map_err(|_| unparsable(text)),
        (_, ValueRepr::Integer(n)) => Err(unparsable(n.to_string())),
    }
}

/// Write a token tree as a JSON value.
pub fn marshall(token: &Token) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(token)
}

/// Read a token tree back from its JSON value, validating every token.
pub fn unmarshall(value: &serde_json::Value) -> Result<Token, serde_json::Error> {
    Token::deserialize(value)
}
