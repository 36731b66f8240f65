//! Token type discriminants
//!
//! Every concrete token is identified by a [LeafType] or a [ParentType]. Both tables are
//! declared once through a macro which also generates the stable kebab-case names used in
//! JSON and the `is_<type>()` predicates on [Token].

use super::core::Token;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! leaf_types {
    ($($(#[$doc:meta])* $variant:ident => $name:literal, $predicate:ident;)+) => {
        /// Discriminant of a leaf token
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum LeafType {
            $($(#[$doc])* $variant,)+
        }

        impl LeafType {
            /// Every leaf type, in declaration order.
            pub const ALL: &'static [LeafType] = &[$(LeafType::$variant,)+];

            /// The stable kebab-case name of this type.
            pub fn name(self) -> &'static str {
                match self {
                    $(LeafType::$variant => $name,)+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(LeafType::$variant),)+
                    _ => None,
                }
            }
        }

        impl Token {
            $(
                #[doc = concat!("Whether this token is a `", $name, "` leaf.")]
                pub fn $predicate(&self) -> bool {
                    self.leaf_type() == Some(LeafType::$variant)
                }
            )+
        }
    };
}

macro_rules! parent_types {
    ($($(#[$doc:meta])* $variant:ident => $name:literal, $predicate:ident;)+) => {
        /// Discriminant of a parent token
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ParentType {
            $($(#[$doc])* $variant,)+
        }

        impl ParentType {
            /// Every parent type, in declaration order.
            pub const ALL: &'static [ParentType] = &[$(ParentType::$variant,)+];

            /// The stable kebab-case name of this type.
            pub fn name(self) -> &'static str {
                match self {
                    $(ParentType::$variant => $name,)+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(ParentType::$variant),)+
                    _ => None,
                }
            }
        }

        impl Token {
            $(
                #[doc = concat!("Whether this token is a `", $name, "` parent.")]
                pub fn $predicate(&self) -> bool {
                    self.parent_type() == Some(ParentType::$variant)
                }
            )+
        }
    };
}

leaf_types! {
    /// `AM/PM` or `A/P` in any case
    AmPm => "am-pm", is_am_pm;
    BracketCloseSymbol => "bracket-close-symbol", is_bracket_close_symbol;
    BracketOpenSymbol => "bracket-open-symbol", is_bracket_open_symbol;
    /// The `COLOR` keyword that precedes a color number
    ColorLiteralSymbol => "color-literal-symbol", is_color_literal_symbol;
    ColorName => "color-name", is_color_name;
    ColorNumber => "color-number", is_color_number;
    /// The number compared against inside a condition
    ConditionNumber => "condition-number", is_condition_number;
    Currency => "currency", is_currency;
    Day => "day", is_day;
    DecimalPoint => "decimal-point", is_decimal_point;
    /// `#`
    Digit => "digit", is_digit;
    /// `?`
    DigitSpace => "digit-space", is_digit_space;
    /// `0`
    DigitZero => "digit-zero", is_digit_zero;
    EqualsSymbol => "equals-symbol", is_equals_symbol;
    /// A backslash followed by the escaped char
    Escape => "escape", is_escape;
    ExponentSymbol => "exponent-symbol", is_exponent_symbol;
    FractionSymbol => "fraction-symbol", is_fraction_symbol;
    GeneralSymbol => "general-symbol", is_general_symbol;
    GreaterThanEqualsSymbol => "greater-than-equals-symbol", is_greater_than_equals_symbol;
    GreaterThanSymbol => "greater-than-symbol", is_greater_than_symbol;
    GroupSeparator => "group-separator", is_group_separator;
    Hour => "hour", is_hour;
    LessThanEqualsSymbol => "less-than-equals-symbol", is_less_than_equals_symbol;
    LessThanSymbol => "less-than-symbol", is_less_than_symbol;
    /// A run of `m`, resolved to month or minute by its surroundings
    MonthOrMinute => "month-or-minute", is_month_or_minute;
    NotEqualsSymbol => "not-equals-symbol", is_not_equals_symbol;
    Percent => "percent", is_percent;
    QuotedText => "quoted-text", is_quoted_text;
    Second => "second", is_second;
    SeparatorSymbol => "separator-symbol", is_separator_symbol;
    /// `*` followed by the fill char
    Star => "star", is_star;
    TextLiteral => "text-literal", is_text_literal;
    /// `@`
    TextPlaceholder => "text-placeholder", is_text_placeholder;
    /// `_` followed by the char whose width is skipped
    Underscore => "underscore", is_underscore;
    Whitespace => "whitespace", is_whitespace;
    Year => "year", is_year;
}

parent_types! {
    Color => "color", is_color;
    Date => "date", is_date;
    DateTime => "date-time", is_date_time;
    Equals => "equals", is_equals;
    Exponent => "exponent", is_exponent;
    /// The whole pattern: sections joined by separators
    Expression => "expression", is_expression;
    Fraction => "fraction", is_fraction;
    General => "general", is_general;
    GreaterThan => "greater-than", is_greater_than;
    GreaterThanEquals => "greater-than-equals", is_greater_than_equals;
    LessThan => "less-than", is_less_than;
    LessThanEquals => "less-than-equals", is_less_than_equals;
    NotEquals => "not-equals", is_not_equals;
    Number => "number", is_number;
    Text => "text", is_text;
    Time => "time", is_time;
}

/// Shape of the value a leaf type carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    Text,
    Char,
    Integer,
    Number,
}

impl LeafType {
    /// Symbols are leaves whose text is fixed by the grammar and carry no other meaning.
    pub fn is_symbol(self) -> bool {
        matches!(
            self,
            LeafType::BracketCloseSymbol
                | LeafType::BracketOpenSymbol
                | LeafType::ColorLiteralSymbol
                | LeafType::EqualsSymbol
                | LeafType::ExponentSymbol
                | LeafType::FractionSymbol
                | LeafType::GeneralSymbol
                | LeafType::GreaterThanEqualsSymbol
                | LeafType::GreaterThanSymbol
                | LeafType::LessThanEqualsSymbol
                | LeafType::LessThanSymbol
                | LeafType::NotEqualsSymbol
                | LeafType::SeparatorSymbol
        )
    }

    /// The only text a leaf of this type may have, when the grammar fixes it.
    pub fn fixed_text(self) -> Option<&'static str> {
        match self {
            LeafType::BracketCloseSymbol => Some("]"),
            LeafType::BracketOpenSymbol => Some("["),
            LeafType::DecimalPoint => Some("."),
            LeafType::Digit => Some("#"),
            LeafType::DigitSpace => Some("?"),
            LeafType::DigitZero => Some("0"),
            LeafType::EqualsSymbol => Some("="),
            LeafType::FractionSymbol => Some("/"),
            LeafType::GreaterThanEqualsSymbol => Some(">="),
            LeafType::GreaterThanSymbol => Some(">"),
            LeafType::GroupSeparator => Some(","),
            LeafType::LessThanEqualsSymbol => Some("<="),
            LeafType::LessThanSymbol => Some("<"),
            LeafType::NotEqualsSymbol => Some("<>"),
            LeafType::Percent => Some("%"),
            LeafType::SeparatorSymbol => Some(";"),
            LeafType::TextPlaceholder => Some("@"),
            _ => None,
        }
    }

    /// The letter a run-type leaf repeats (`d` for days, `m` for months or minutes...).
    pub fn run_letter(self) -> Option<char> {
        match self {
            LeafType::Day => Some('d'),
            LeafType::Hour => Some('h'),
            LeafType::MonthOrMinute => Some('m'),
            LeafType::Second => Some('s'),
            LeafType::Year => Some('y'),
            _ => None,
        }
    }

    pub fn value_shape(self) -> ValueShape {
        match self {
            LeafType::Escape | LeafType::Star | LeafType::Underscore => ValueShape::Char,
            LeafType::ColorNumber => ValueShape::Integer,
            LeafType::ConditionNumber => ValueShape::Number,
            _ => ValueShape::Text,
        }
    }
}

impl fmt::Display for LeafType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ParentType {
    /// The six comparison parents (`[=1]`, `[<>1]`, `[>1]`, `[>=1]`, `[<1]`, `[<=1]`).
    pub fn is_condition(self) -> bool {
        self.relation().is_some()
    }

    pub fn relation(self) -> Option<ConditionRelation> {
        match self {
            ParentType::Equals => Some(ConditionRelation::Equals),
            ParentType::NotEquals => Some(ConditionRelation::NotEquals),
            ParentType::GreaterThan => Some(ConditionRelation::GreaterThan),
            ParentType::GreaterThanEquals => Some(ConditionRelation::GreaterThanEquals),
            ParentType::LessThan => Some(ConditionRelation::LessThan),
            ParentType::LessThanEquals => Some(ConditionRelation::LessThanEquals),
            _ => None,
        }
    }

    /// Pattern sections: the parents an expression is split into.
    pub fn is_section(self) -> bool {
        matches!(
            self,
            ParentType::Date
                | ParentType::DateTime
                | ParentType::Fraction
                | ParentType::General
                | ParentType::Number
                | ParentType::Text
                | ParentType::Time
        )
    }
}

impl fmt::Display for ParentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The comparison a condition token applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionRelation {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanEquals,
    LessThan,
    LessThanEquals,
}

impl ConditionRelation {
    /// The operator symbol leaf that introduces this relation.
    pub fn symbol_type(self) -> LeafType {
        match self {
            ConditionRelation::Equals => LeafType::EqualsSymbol,
            ConditionRelation::NotEquals => LeafType::NotEqualsSymbol,
            ConditionRelation::GreaterThan => LeafType::GreaterThanSymbol,
            ConditionRelation::GreaterThanEquals => LeafType::GreaterThanEqualsSymbol,
            ConditionRelation::LessThan => LeafType::LessThanSymbol,
            ConditionRelation::LessThanEquals => LeafType::LessThanEqualsSymbol,
        }
    }

    pub fn parent_type(self) -> ParentType {
        match self {
            ConditionRelation::Equals => ParentType::Equals,
            ConditionRelation::NotEquals => ParentType::NotEquals,
            ConditionRelation::GreaterThan => ParentType::GreaterThan,
            ConditionRelation::GreaterThanEquals => ParentType::GreaterThanEquals,
            ConditionRelation::LessThan => ParentType::LessThan,
            ConditionRelation::LessThanEquals => ParentType::LessThanEquals,
        }
    }

    /// Apply the relation as `value <op> bound`.
    pub fn test(self, value: &BigDecimal, bound: &BigDecimal) -> bool {
        match self {
            ConditionRelation::Equals => value == bound,
            ConditionRelation::NotEquals => value != bound,
            ConditionRelation::GreaterThan => value > bound,
            ConditionRelation::GreaterThanEquals => value >= bound,
            ConditionRelation::LessThan => value < bound,
            ConditionRelation::LessThanEquals => value <= bound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for leaf in LeafType::ALL {
            assert_eq!(LeafType::from_name(leaf.name()), Some(*leaf));
        }
        for parent in ParentType::ALL {
            assert_eq!(ParentType::from_name(parent.name()), Some(*parent));
        }
        assert_eq!(LeafType::from_name("color"), None);
        assert_eq!(ParentType::from_name("color-name"), None);
    }

    #[test]
    fn symbols_have_symbol_suffix() {
        for leaf in LeafType::ALL {
            assert_eq!(leaf.is_symbol(), leaf.name().ends_with("-symbol"), "{leaf}");
        }
    }

    #[test]
    fn relations_pair_with_parents() {
        for parent in ParentType::ALL {
            if let Some(relation) = parent.relation() {
                assert_eq!(relation.parent_type(), *parent);
            }
        }
        let five = BigDecimal::from(5);
        assert!(ConditionRelation::GreaterThanEquals.test(&five, &five));
        assert!(!ConditionRelation::LessThan.test(&five, &five));
    }
}
