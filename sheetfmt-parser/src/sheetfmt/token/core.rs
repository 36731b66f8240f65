//! Token, leaf and parent definitions plus their validating factories

use super::error::TokenError;
use super::json::TokenRepr;
use super::types::{ConditionRelation, LeafType, ParentType, ValueShape};
use super::value::LeafValue;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A node of a parsed format pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TokenRepr", into = "TokenRepr")]
pub enum Token {
    Leaf(LeafToken),
    Parent(ParentToken),
}

/// A token without children
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeafToken {
    token_type: LeafType,
    value: LeafValue,
    text: String,
}

/// A token whose value is its ordered list of children
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParentToken {
    token_type: ParentType,
    children: Vec<Token>,
    text: String,
}

/// Borrowed view of a token's value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenValue<'a> {
    Leaf(&'a LeafValue),
    Children(&'a [Token]),
}

impl LeafToken {
    pub fn token_type(&self) -> LeafType {
        self.token_type
    }

    pub fn value(&self) -> &LeafValue {
        &self.value
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of chars in the text. For letter runs this is the repeat count (`dddd` is 4).
    pub fn repeat_count(&self) -> usize {
        self.text.chars().count()
    }
}

impl ParentToken {
    pub fn token_type(&self) -> ParentType {
        self.token_type
    }

    pub fn children(&self) -> &[Token] {
        &self.children
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Token {
    /// Build a leaf after checking the value shape and the text against the type.
    pub fn leaf(
        token_type: LeafType,
        value: impl Into<LeafValue>,
        text: impl Into<String>,
    ) -> Result<Token, TokenError> {
        let value = value.into();
        let text = text.into();
        validate_leaf(token_type, &value, &text)?;
        Ok(Token::Leaf(LeafToken {
            token_type,
            value,
            text,
        }))
    }

    /// Build a parent whose text is the concatenation of its children's texts.
    pub fn parent(token_type: ParentType, children: Vec<Token>) -> Result<Token, TokenError> {
        validate_parent(token_type, &children)?;
        let text = concat_text(&children);
        Ok(Token::Parent(ParentToken {
            token_type,
            children,
            text,
        }))
    }

    /// Build a parent from children and the text it was read with, which must agree.
    pub fn parent_with_text(
        token_type: ParentType,
        children: Vec<Token>,
        text: impl Into<String>,
    ) -> Result<Token, TokenError> {
        let text = text.into();
        let expected = concat_text(&children);
        if text != expected {
            return Err(TokenError::TextMismatch {
                token_type,
                text,
                expected,
            });
        }
        Token::parent(token_type, children)
    }

    /// Rebuild a parent of the same type around new children. The children must keep
    /// every child the type requires, which holds for one-to-one leaf rewrites.
    pub(crate) fn rebuilt(token_type: ParentType, children: Vec<Token>) -> Token {
        let text = concat_text(&children);
        Token::Parent(ParentToken {
            token_type,
            children,
            text,
        })
    }

    pub fn color_number(value: u32, text: impl Into<String>) -> Result<Token, TokenError> {
        Token::leaf(LeafType::ColorNumber, value, text)
    }

    pub fn condition_number(
        value: BigDecimal,
        text: impl Into<String>,
    ) -> Result<Token, TokenError> {
        Token::leaf(LeafType::ConditionNumber, value, text)
    }

    pub fn escape(value: char, text: impl Into<String>) -> Result<Token, TokenError> {
        Token::leaf(LeafType::Escape, value, text)
    }

    pub fn quoted_text(
        value: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Token, TokenError> {
        let value: String = value.into();
        Token::leaf(LeafType::QuotedText, value, text)
    }

    pub fn star(value: char, text: impl Into<String>) -> Result<Token, TokenError> {
        Token::leaf(LeafType::Star, value, text)
    }

    pub fn underscore(value: char, text: impl Into<String>) -> Result<Token, TokenError> {
        Token::leaf(LeafType::Underscore, value, text)
    }

    pub fn text(&self) -> &str {
        match self {
            Token::Leaf(leaf) => &leaf.text,
            Token::Parent(parent) => &parent.text,
        }
    }

    pub fn value(&self) -> TokenValue<'_> {
        match self {
            Token::Leaf(leaf) => TokenValue::Leaf(&leaf.value),
            Token::Parent(parent) => TokenValue::Children(&parent.children),
        }
    }

    /// Children of a parent; empty for leaves.
    pub fn children(&self) -> &[Token] {
        match self {
            Token::Leaf(_) => &[],
            Token::Parent(parent) => &parent.children,
        }
    }

    pub fn leaf_type(&self) -> Option<LeafType> {
        self.as_leaf().map(LeafToken::token_type)
    }

    pub fn parent_type(&self) -> Option<ParentType> {
        self.as_parent().map(ParentToken::token_type)
    }

    /// The kebab-case name of the concrete type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Token::Leaf(leaf) => leaf.token_type.name(),
            Token::Parent(parent) => parent.token_type.name(),
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafToken> {
        match self {
            Token::Leaf(leaf) => Some(leaf),
            Token::Parent(_) => None,
        }
    }

    pub fn as_parent(&self) -> Option<&ParentToken> {
        match self {
            Token::Leaf(_) => None,
            Token::Parent(parent) => Some(parent),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Token::Leaf(_))
    }

    pub fn is_parent(&self) -> bool {
        matches!(self, Token::Parent(_))
    }

    pub fn is_symbol(&self) -> bool {
        self.leaf_type().is_some_and(LeafType::is_symbol)
    }

    pub fn is_condition(&self) -> bool {
        self.parent_type().is_some_and(ParentType::is_condition)
    }

    pub fn condition_relation(&self) -> Option<ConditionRelation> {
        self.parent_type().and_then(ParentType::relation)
    }

    /// The number a condition compares against.
    pub fn condition_value(&self) -> Option<&BigDecimal> {
        if !self.is_condition() {
            return None;
        }
        self.children()
            .iter()
            .filter_map(Token::as_leaf)
            .find(|leaf| leaf.token_type == LeafType::ConditionNumber)
            .and_then(|leaf| leaf.value.as_number())
    }

    /// Whether `value` satisfies this condition; `None` when the token is not a condition.
    pub fn condition_matches(&self, value: &BigDecimal) -> Option<bool> {
        let relation = self.condition_relation()?;
        let bound = self.condition_value()?;
        Some(relation.test(value, bound))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

macro_rules! text_leaf_factories {
    ($($factory:ident => $variant:ident),+ $(,)?) => {
        impl Token {
            $(
                #[doc = concat!("Build a `", stringify!($variant), "` leaf whose value is its text.")]
                pub fn $factory(text: impl Into<String>) -> Result<Token, TokenError> {
                    let text = text.into();
                    Token::leaf(LeafType::$variant, text.clone(), text)
                }
            )+
        }
    };
}

text_leaf_factories! {
    am_pm => AmPm,
    bracket_close_symbol => BracketCloseSymbol,
    bracket_open_symbol => BracketOpenSymbol,
    color_literal_symbol => ColorLiteralSymbol,
    color_name => ColorName,
    currency => Currency,
    day => Day,
    decimal_point => DecimalPoint,
    digit => Digit,
    digit_space => DigitSpace,
    digit_zero => DigitZero,
    equals_symbol => EqualsSymbol,
    exponent_symbol => ExponentSymbol,
    fraction_symbol => FractionSymbol,
    general_symbol => GeneralSymbol,
    greater_than_equals_symbol => GreaterThanEqualsSymbol,
    greater_than_symbol => GreaterThanSymbol,
    group_separator => GroupSeparator,
    hour => Hour,
    less_than_equals_symbol => LessThanEqualsSymbol,
    less_than_symbol => LessThanSymbol,
    month_or_minute => MonthOrMinute,
    not_equals_symbol => NotEqualsSymbol,
    percent => Percent,
    second => Second,
    separator_symbol => SeparatorSymbol,
    text_literal => TextLiteral,
    text_placeholder => TextPlaceholder,
    whitespace => Whitespace,
    year => Year,
}

macro_rules! parent_factories {
    ($($factory:ident => $variant:ident),+ $(,)?) => {
        impl Token {
            $(
                #[doc = concat!("Build a `", stringify!($variant), "` parent from its children.")]
                pub fn $factory(children: Vec<Token>) -> Result<Token, TokenError> {
                    Token::parent(ParentType::$variant, children)
                }
            )+
        }
    };
}

parent_factories! {
    color => Color,
    date => Date,
    date_time => DateTime,
    equals => Equals,
    exponent => Exponent,
    expression => Expression,
    fraction => Fraction,
    general => General,
    greater_than => GreaterThan,
    greater_than_equals => GreaterThanEquals,
    less_than => LessThan,
    less_than_equals => LessThanEquals,
    not_equals => NotEquals,
    number => Number,
    text_section => Text,
    time => Time,
}

fn concat_text(children: &[Token]) -> String {
    children.iter().map(Token::text).collect()
}

fn invalid(token_type: LeafType, text: &str, reason: impl Into<String>) -> TokenError {
    TokenError::InvalidText {
        token_type,
        text: text.to_string(),
        reason: reason.into(),
    }
}

fn validate_leaf(token_type: LeafType, value: &LeafValue, text: &str) -> Result<(), TokenError> {
    if text.is_empty() {
        return Err(TokenError::EmptyText { token_type });
    }
    if value.shape() != token_type.value_shape() {
        return Err(TokenError::WrongValue {
            token_type,
            expected: token_type.value_shape(),
            found: value.shape(),
        });
    }

    // Text valued leaves other than quoted text carry their own text.
    if let LeafValue::Text(value) = value {
        if token_type != LeafType::QuotedText && value != text {
            return Err(invalid(
                token_type,
                text,
                format!("value {value:?} differs from text"),
            ));
        }
    }

    let is_blank = text.chars().all(char::is_whitespace);
    if token_type == LeafType::Whitespace {
        return if is_blank {
            Ok(())
        } else {
            Err(invalid(token_type, text, "expected whitespace only"))
        };
    }
    if is_blank {
        return Err(TokenError::WhitespaceText {
            token_type,
            text: text.to_string(),
        });
    }

    if let Some(fixed) = token_type.fixed_text() {
        return if text == fixed {
            Ok(())
        } else {
            Err(invalid(token_type, text, format!("expected {fixed:?}")))
        };
    }

    if let Some(letter) = token_type.run_letter() {
        return if text.chars().all(|c| c.eq_ignore_ascii_case(&letter)) {
            Ok(())
        } else {
            Err(invalid(token_type, text, format!("expected a run of {letter:?}")))
        };
    }

    match (token_type, value) {
        (LeafType::AmPm, _) => {
            if text.eq_ignore_ascii_case("am/pm") || text.eq_ignore_ascii_case("a/p") {
                Ok(())
            } else {
                Err(invalid(token_type, text, "expected AM/PM or A/P"))
            }
        }
        (LeafType::ColorLiteralSymbol, _) => keyword(token_type, text, "color"),
        (LeafType::GeneralSymbol, _) => keyword(token_type, text, "general"),
        (LeafType::ColorName, _) => {
            if text.chars().all(char::is_alphabetic) {
                Ok(())
            } else {
                Err(invalid(token_type, text, "expected letters only"))
            }
        }
        (LeafType::ExponentSymbol, _) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next(), chars.next()) {
                (Some('E' | 'e'), Some('+' | '-'), None) => Ok(()),
                _ => Err(invalid(token_type, text, "expected E+, E-, e+ or e-")),
            }
        }
        (LeafType::ColorNumber, LeafValue::Integer(n)) => {
            if text == n.to_string() {
                Ok(())
            } else {
                Err(invalid(token_type, text, format!("expected {n}")))
            }
        }
        (LeafType::Escape, LeafValue::Char(c)) => marked(token_type, text, '\\', *c),
        (LeafType::Star, LeafValue::Char(c)) => marked(token_type, text, '*', *c),
        (LeafType::Underscore, LeafValue::Char(c)) => marked(token_type, text, '_', *c),
        (LeafType::QuotedText, LeafValue::Text(value)) => {
            if value.contains('"') {
                Err(invalid(token_type, text, "quoted text cannot contain a quote"))
            } else if text != format!("\"{value}\"") {
                Err(invalid(token_type, text, format!("expected {value:?} in quotes")))
            } else {
                Ok(())
            }
        }
        _ => Ok(()),
    }
}

fn keyword(token_type: LeafType, text: &str, word: &str) -> Result<(), TokenError> {
    if text.eq_ignore_ascii_case(word) {
        Ok(())
    } else {
        Err(invalid(token_type, text, format!("expected {word:?} in any case")))
    }
}

fn marked(token_type: LeafType, text: &str, marker: char, value: char) -> Result<(), TokenError> {
    if text == format!("{marker}{value}") {
        Ok(())
    } else {
        Err(invalid(
            token_type,
            text,
            format!("expected {marker:?} followed by {value:?}"),
        ))
    }
}

fn validate_parent(token_type: ParentType, children: &[Token]) -> Result<(), TokenError> {
    if children.is_empty() {
        return Err(TokenError::NoChildren { token_type });
    }

    let count = |predicate: fn(&Token) -> bool| children.iter().filter(|c| predicate(c)).count();
    let require = |ok: bool, requirement: &'static str| {
        if ok {
            Ok(())
        } else {
            Err(TokenError::MissingChild {
                token_type,
                requirement,
            })
        }
    };

    if let Some(relation) = token_type.relation() {
        let symbol = relation.symbol_type();
        let symbols = children
            .iter()
            .filter(|c| c.leaf_type() == Some(symbol))
            .count();
        return require(
            symbols == 1 && count(Token::is_condition_number) == 1,
            "exactly one operator symbol and one condition number",
        );
    }

    match token_type {
        ParentType::Color => require(
            count(|t| t.is_color_name() || t.is_color_number()) == 1,
            "exactly one color name or color number",
        ),
        ParentType::Date => require(
            count(is_date_component) > 0,
            "a day, month or year component",
        ),
        ParentType::Time => require(
            count(is_time_component) > 0,
            "an hour, minute, second or am-pm component",
        ),
        ParentType::DateTime => require(
            count(|t| is_date_component(t) || is_time_component(t)) > 0,
            "a date or time component",
        ),
        ParentType::Number => require(count(is_digit_placeholder) > 0, "a digit placeholder"),
        ParentType::Fraction => require(
            count(Token::is_fraction_symbol) == 1 && count(is_digit_placeholder) > 0,
            "exactly one fraction symbol and a digit placeholder",
        ),
        ParentType::Exponent => require(
            count(Token::is_exponent_symbol) == 1,
            "exactly one exponent symbol",
        ),
        ParentType::General => require(
            count(Token::is_general_symbol) == 1,
            "exactly one general symbol",
        ),
        _ => Ok(()),
    }
}

fn is_date_component(token: &Token) -> bool {
    token.is_day() || token.is_month_or_minute() || token.is_year()
}

fn is_time_component(token: &Token) -> bool {
    token.is_hour() || token.is_month_or_minute() || token.is_second() || token.is_am_pm()
}

fn is_digit_placeholder(token: &Token) -> bool {
    token.is_digit() || token.is_digit_zero() || token.is_digit_space()
}
