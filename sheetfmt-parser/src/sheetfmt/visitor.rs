//! Token tree traversal
//!
//! [Token::accept] is the single traversal function. It offers three levels of hooks:
//!
//!     start_visit_token / end_visit_token                any token
//!     start_visit_format_token / end_visit_format_token  any format token
//!     start_visit_<parent> / end_visit_<parent>          one pair per parent type
//!     visit_<leaf>                                       one per leaf type
//!
//! For a parent the order is: token start, format start, type start, children in list
//! order, type end, format end, token end. A leaf gets its `visit_<leaf>` call between the
//! format start and end. Every hook has an empty default, so a visitor only overrides
//! what it needs.
//!
//! A start hook returning [Visiting::Skip] keeps the traversal out of the token's
//! children. The end hooks of that token still fire.

use crate::sheetfmt::token::{LeafToken, LeafType, ParentToken, ParentType, Token};

/// What a start hook wants done with the token's children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visiting {
    #[default]
    Continue,
    Skip,
}

impl Visiting {
    pub fn is_continue(self) -> bool {
        self == Visiting::Continue
    }
}

macro_rules! visitor_trait {
    (
        parents { $($parent:ident => $start:ident, $end:ident;)+ }
        leaves { $($leaf:ident => $visit:ident;)+ }
    ) => {
        /// Visitor over a token tree
        ///
        /// # Example
        ///
        /// ```ignore
        /// struct Days(usize);
        ///
        /// impl Visitor for Days {
        ///     fn visit_day(&mut self, _day: &LeafToken) {
        ///         self.0 += 1;
        ///     }
        /// }
        ///
        /// let mut days = Days(0);
        /// token.accept(&mut days);
        /// ```
        pub trait Visitor {
            fn start_visit_token(&mut self, _token: &Token) -> Visiting {
                Visiting::Continue
            }
            fn end_visit_token(&mut self, _token: &Token) {}

            fn start_visit_format_token(&mut self, _token: &Token) -> Visiting {
                Visiting::Continue
            }
            fn end_visit_format_token(&mut self, _token: &Token) {}

            $(
                fn $start(&mut self, _token: &ParentToken) -> Visiting {
                    Visiting::Continue
                }
                fn $end(&mut self, _token: &ParentToken) {}
            )+

            $(
                fn $visit(&mut self, _token: &LeafToken) {}
            )+
        }

        fn start_parent(visitor: &mut dyn Visitor, parent: &ParentToken) -> Visiting {
            match parent.token_type() {
                $(ParentType::$parent => visitor.$start(parent),)+
            }
        }

        fn end_parent(visitor: &mut dyn Visitor, parent: &ParentToken) {
            match parent.token_type() {
                $(ParentType::$parent => visitor.$end(parent),)+
            }
        }

        fn visit_leaf(visitor: &mut dyn Visitor, leaf: &LeafToken) {
            match leaf.token_type() {
                $(LeafType::$leaf => visitor.$visit(leaf),)+
            }
        }
    };
}

visitor_trait! {
    parents {
        Color => start_visit_color, end_visit_color;
        Date => start_visit_date, end_visit_date;
        DateTime => start_visit_date_time, end_visit_date_time;
        Equals => start_visit_equals, end_visit_equals;
        Exponent => start_visit_exponent, end_visit_exponent;
        Expression => start_visit_expression, end_visit_expression;
        Fraction => start_visit_fraction, end_visit_fraction;
        General => start_visit_general, end_visit_general;
        GreaterThan => start_visit_greater_than, end_visit_greater_than;
        GreaterThanEquals => start_visit_greater_than_equals, end_visit_greater_than_equals;
        LessThan => start_visit_less_than, end_visit_less_than;
        LessThanEquals => start_visit_less_than_equals, end_visit_less_than_equals;
        NotEquals => start_visit_not_equals, end_visit_not_equals;
        Number => start_visit_number, end_visit_number;
        Text => start_visit_text, end_visit_text;
        Time => start_visit_time, end_visit_time;
    }
    leaves {
        AmPm => visit_am_pm;
        BracketCloseSymbol => visit_bracket_close_symbol;
        BracketOpenSymbol => visit_bracket_open_symbol;
        ColorLiteralSymbol => visit_color_literal_symbol;
        ColorName => visit_color_name;
        ColorNumber => visit_color_number;
        ConditionNumber => visit_condition_number;
        Currency => visit_currency;
        Day => visit_day;
        DecimalPoint => visit_decimal_point;
        Digit => visit_digit;
        DigitSpace => visit_digit_space;
        DigitZero => visit_digit_zero;
        EqualsSymbol => visit_equals_symbol;
        Escape => visit_escape;
        ExponentSymbol => visit_exponent_symbol;
        FractionSymbol => visit_fraction_symbol;
        GeneralSymbol => visit_general_symbol;
        GreaterThanEqualsSymbol => visit_greater_than_equals_symbol;
        GreaterThanSymbol => visit_greater_than_symbol;
        GroupSeparator => visit_group_separator;
        Hour => visit_hour;
        LessThanEqualsSymbol => visit_less_than_equals_symbol;
        LessThanSymbol => visit_less_than_symbol;
        MonthOrMinute => visit_month_or_minute;
        NotEqualsSymbol => visit_not_equals_symbol;
        Percent => visit_percent;
        QuotedText => visit_quoted_text;
        Second => visit_second;
        SeparatorSymbol => visit_separator_symbol;
        Star => visit_star;
        TextLiteral => visit_text_literal;
        TextPlaceholder => visit_text_placeholder;
        Underscore => visit_underscore;
        Whitespace => visit_whitespace;
        Year => visit_year;
    }
}

impl Token {
    /// Walk this token and its descendants with `visitor`.
    pub fn accept(&self, visitor: &mut dyn Visitor) {
        let token_start = visitor.start_visit_token(self);
        let format_start = visitor.start_visit_format_token(self);
        let descend = token_start.is_continue() && format_start.is_continue();

        match self {
            Token::Leaf(leaf) => visit_leaf(visitor, leaf),
            Token::Parent(parent) => {
                let type_start = start_parent(visitor, parent);
                if descend && type_start.is_continue() {
                    visit_children(visitor, parent.children());
                }
                end_parent(visitor, parent);
            }
        }

        visitor.end_visit_format_token(self);
        visitor.end_visit_token(self);
    }
}

/// Visit every token of a slice in order.
pub fn visit_children(visitor: &mut dyn Visitor, tokens: &[Token]) {
    for token in tokens {
        token.accept(visitor);
    }
}
