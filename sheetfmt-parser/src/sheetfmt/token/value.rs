//! Semantic values carried by leaf tokens

use super::types::ValueShape;
use bigdecimal::BigDecimal;
use std::fmt;

/// The value of a leaf token
///
/// Most leaves carry their own text. Escapes, stars and underscores carry the char that
/// follows their marker, color numbers an integer and condition numbers a decimal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LeafValue {
    Text(String),
    Char(char),
    Integer(u32),
    Number(BigDecimal),
}

impl LeafValue {
    pub fn shape(&self) -> ValueShape {
        match self {
            LeafValue::Text(_) => ValueShape::Text,
            LeafValue::Char(_) => ValueShape::Char,
            LeafValue::Integer(_) => ValueShape::Integer,
            LeafValue::Number(_) => ValueShape::Number,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            LeafValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            LeafValue::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<u32> {
        match self {
            LeafValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&BigDecimal> {
        match self {
            LeafValue::Number(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for LeafValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeafValue::Text(text) => f.write_str(text),
            LeafValue::Char(c) => write!(f, "{c}"),
            LeafValue::Integer(n) => write!(f, "{n}"),
            LeafValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for LeafValue {
    fn from(text: &str) -> Self {
        LeafValue::Text(text.to_string())
    }
}

impl From<String> for LeafValue {
    fn from(text: String) -> Self {
        LeafValue::Text(text)
    }
}

impl From<char> for LeafValue {
    fn from(c: char) -> Self {
        LeafValue::Char(c)
    }
}

impl From<u32> for LeafValue {
    fn from(n: u32) -> Self {
        LeafValue::Integer(n)
    }
}

impl From<BigDecimal> for LeafValue {
    fn from(n: BigDecimal) -> Self {
        LeafValue::Number(n)
    }
}
