//! Token kinds
//!
//! A [Kind] names the role a token plays when a pattern is rendered or highlighted:
//! `dd` is a day with leading zero, `mmm` an abbreviated month name. Kinds are computed
//! on demand and never stored on tokens.
//!
//! Letter runs are classified by their length, saturating at the longest form:
//!
//!     day     d / dd / ddd / dddd+
//!     month   m / mm / mmm / mmmm / mmmmm+ (initial)
//!     year    y, yy / yyy+
//!     hour, minute, second   1 / 2+
//!
//! A month-or-minute run is a minute inside a time section and a month inside a date
//! section. Elsewhere it is a minute when the previous date or time component is an hour
//! or the next one is a second.

use crate::sheetfmt::token::{LeafToken, LeafType, ParentToken, ParentType, Token};
use crate::sheetfmt::visitor::{Visiting, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! kinds {
    ($($variant:ident => $name:literal;)+) => {
        /// The role of a token in a rendered pattern
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Kind {
            $(#[serde(rename = $name)] $variant,)+
        }

        impl Kind {
            /// Every kind, in declaration order.
            pub const ALL: &'static [Kind] = &[$(Kind::$variant,)+];

            /// The SCREAMING_SNAKE_CASE name, as serialized.
            pub fn name(self) -> &'static str {
                match self {
                    $(Kind::$variant => $name,)+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Kind::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

kinds! {
    AmPmFullLower => "AM_PM_FULL_LOWER";
    AmPmFullUpper => "AM_PM_FULL_UPPER";
    AmPmInitialLower => "AM_PM_INITIAL_LOWER";
    AmPmInitialUpper => "AM_PM_INITIAL_UPPER";
    ColorName => "COLOR_NAME";
    ColorNumber => "COLOR_NUMBER";
    Condition => "CONDITION";
    CurrencySymbol => "CURRENCY_SYMBOL";
    DayWithoutLeadingZero => "DAY_WITHOUT_LEADING_ZERO";
    DayWithLeadingZero => "DAY_WITH_LEADING_ZERO";
    DayNameAbbreviation => "DAY_NAME_ABBREVIATION";
    DayNameFull => "DAY_NAME_FULL";
    DecimalPoint => "DECIMAL_POINT";
    Digit => "DIGIT";
    DigitSpace => "DIGIT_SPACE";
    DigitZero => "DIGIT_ZERO";
    Escape => "ESCAPE";
    Exponent => "EXPONENT";
    FractionSymbol => "FRACTION_SYMBOL";
    General => "GENERAL";
    GroupSeparator => "GROUP_SEPARATOR";
    HourWithoutLeadingZero => "HOUR_WITHOUT_LEADING_ZERO";
    HourWithLeadingZero => "HOUR_WITH_LEADING_ZERO";
    MinuteWithoutLeadingZero => "MINUTE_WITHOUT_LEADING_ZERO";
    MinuteWithLeadingZero => "MINUTE_WITH_LEADING_ZERO";
    MonthWithoutLeadingZero => "MONTH_WITHOUT_LEADING_ZERO";
    MonthWithLeadingZero => "MONTH_WITH_LEADING_ZERO";
    MonthNameAbbreviation => "MONTH_NAME_ABBREVIATION";
    MonthNameFull => "MONTH_NAME_FULL";
    MonthNameInitial => "MONTH_NAME_INITIAL";
    Percent => "PERCENT";
    SecondWithoutLeadingZero => "SECOND_WITHOUT_LEADING_ZERO";
    SecondWithLeadingZero => "SECOND_WITH_LEADING_ZERO";
    Separator => "SEPARATOR";
    Star => "STAR";
    TextLiteral => "TEXT_LITERAL";
    TextPlaceholder => "TEXT_PLACEHOLDER";
    Underscore => "UNDERSCORE";
    YearTwoDigit => "YEAR_TWO_DIGIT";
    YearFull => "YEAR_FULL";
}

impl Kind {
    pub fn is_date(self) -> bool {
        matches!(
            self,
            Kind::DayWithoutLeadingZero
                | Kind::DayWithLeadingZero
                | Kind::DayNameAbbreviation
                | Kind::DayNameFull
                | Kind::MonthWithoutLeadingZero
                | Kind::MonthWithLeadingZero
                | Kind::MonthNameAbbreviation
                | Kind::MonthNameFull
                | Kind::MonthNameInitial
                | Kind::YearTwoDigit
                | Kind::YearFull
        )
    }

    pub fn is_time(self) -> bool {
        matches!(
            self,
            Kind::AmPmFullLower
                | Kind::AmPmFullUpper
                | Kind::AmPmInitialLower
                | Kind::AmPmInitialUpper
                | Kind::HourWithoutLeadingZero
                | Kind::HourWithLeadingZero
                | Kind::MinuteWithoutLeadingZero
                | Kind::MinuteWithLeadingZero
                | Kind::SecondWithoutLeadingZero
                | Kind::SecondWithLeadingZero
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Token {
    /// The kind of this token on its own. A month-or-minute leaf without surroundings is
    /// a month; use [classify_children] to resolve it within a section.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Token::Leaf(leaf) => leaf_kind(leaf, false),
            Token::Parent(parent) => parent_kind(parent),
        }
    }
}

/// Kind of a leaf. `minute` decides how a month-or-minute run reads.
pub fn leaf_kind(leaf: &LeafToken, minute: bool) -> Option<Kind> {
    let count = leaf.repeat_count();
    let kind = match leaf.token_type() {
        LeafType::AmPm => {
            let upper = leaf.text().starts_with('A');
            match (leaf.text().len() > 3, upper) {
                (true, true) => Kind::AmPmFullUpper,
                (true, false) => Kind::AmPmFullLower,
                (false, true) => Kind::AmPmInitialUpper,
                (false, false) => Kind::AmPmInitialLower,
            }
        }
        LeafType::ColorName => Kind::ColorName,
        LeafType::ColorNumber => Kind::ColorNumber,
        LeafType::Currency => Kind::CurrencySymbol,
        LeafType::Day => match count {
            1 => Kind::DayWithoutLeadingZero,
            2 => Kind::DayWithLeadingZero,
            3 => Kind::DayNameAbbreviation,
            _ => Kind::DayNameFull,
        },
        LeafType::DecimalPoint => Kind::DecimalPoint,
        LeafType::Digit => Kind::Digit,
        LeafType::DigitSpace => Kind::DigitSpace,
        LeafType::DigitZero => Kind::DigitZero,
        LeafType::Escape => Kind::Escape,
        LeafType::ExponentSymbol => Kind::Exponent,
        LeafType::FractionSymbol => Kind::FractionSymbol,
        LeafType::GeneralSymbol => Kind::General,
        LeafType::GroupSeparator => Kind::GroupSeparator,
        LeafType::Hour if count == 1 => Kind::HourWithoutLeadingZero,
        LeafType::Hour => Kind::HourWithLeadingZero,
        LeafType::MonthOrMinute if minute => match count {
            1 => Kind::MinuteWithoutLeadingZero,
            _ => Kind::MinuteWithLeadingZero,
        },
        LeafType::MonthOrMinute => match count {
            1 => Kind::MonthWithoutLeadingZero,
            2 => Kind::MonthWithLeadingZero,
            3 => Kind::MonthNameAbbreviation,
            4 => Kind::MonthNameFull,
            _ => Kind::MonthNameInitial,
        },
        LeafType::Percent => Kind::Percent,
        LeafType::QuotedText | LeafType::TextLiteral => Kind::TextLiteral,
        LeafType::Second if count == 1 => Kind::SecondWithoutLeadingZero,
        LeafType::Second => Kind::SecondWithLeadingZero,
        LeafType::SeparatorSymbol => Kind::Separator,
        LeafType::Star => Kind::Star,
        LeafType::TextPlaceholder => Kind::TextPlaceholder,
        LeafType::Underscore => Kind::Underscore,
        LeafType::Year if count <= 2 => Kind::YearTwoDigit,
        LeafType::Year => Kind::YearFull,
        LeafType::BracketCloseSymbol
        | LeafType::BracketOpenSymbol
        | LeafType::ColorLiteralSymbol
        | LeafType::ConditionNumber
        | LeafType::EqualsSymbol
        | LeafType::GreaterThanEqualsSymbol
        | LeafType::GreaterThanSymbol
        | LeafType::LessThanEqualsSymbol
        | LeafType::LessThanSymbol
        | LeafType::NotEqualsSymbol
        | LeafType::Whitespace => return None,
    };
    Some(kind)
}

fn parent_kind(parent: &ParentToken) -> Option<Kind> {
    match parent.token_type() {
        ParentType::Color => parent.children().iter().find_map(|child| match child {
            Token::Leaf(leaf) if leaf.token_type() == LeafType::ColorName => Some(Kind::ColorName),
            Token::Leaf(leaf) if leaf.token_type() == LeafType::ColorNumber => {
                Some(Kind::ColorNumber)
            }
            _ => None,
        }),
        parent_type if parent_type.is_condition() => Some(Kind::Condition),
        _ => None,
    }
}

/// Kinds of the direct children of `parent`, resolving month-or-minute runs from the
/// parent type and their neighbours. Parents among the children get their own kind.
pub fn classify_children(parent: &ParentToken) -> Vec<Option<Kind>> {
    let children = parent.children();
    children
        .iter()
        .enumerate()
        .map(|(index, child)| match child {
            Token::Leaf(leaf) if leaf.token_type() == LeafType::MonthOrMinute => {
                let minute = match parent.token_type() {
                    ParentType::Time => true,
                    ParentType::Date => false,
                    _ => reads_as_minute(children, index),
                };
                leaf_kind(leaf, minute)
            }
            other => other.kind(),
        })
        .collect()
}

fn is_component(token: &Token) -> bool {
    matches!(
        token.leaf_type(),
        Some(
            LeafType::Day
                | LeafType::Hour
                | LeafType::MonthOrMinute
                | LeafType::Second
                | LeafType::Year
        )
    )
}

fn reads_as_minute(siblings: &[Token], index: usize) -> bool {
    let previous = siblings[..index].iter().rev().find(|t| is_component(t));
    let next = siblings[index + 1..].iter().find(|t| is_component(t));
    previous.is_some_and(Token::is_hour) || next.is_some_and(Token::is_second)
}

/// Kind of the last leaf that has one, in document order. Colors and conditions are
/// prefixes of a section and are not looked into.
pub fn last_kind(token: &Token) -> Option<Kind> {
    let mut visitor = LastKindVisitor::default();
    token.accept(&mut visitor);
    visitor.last
}

/// Every leaf with a kind, in document order, paired with that kind.
pub fn leaf_kinds(token: &Token) -> Vec<(&LeafToken, Kind)> {
    fn walk<'t>(
        token: &'t Token,
        kind: Option<Kind>,
        out: &mut Vec<(&'t LeafToken, Kind)>,
    ) {
        match token {
            Token::Leaf(leaf) => {
                if let Some(kind) = kind {
                    out.push((leaf, kind));
                }
            }
            Token::Parent(parent) => {
                for (child, kind) in parent.children().iter().zip(classify_children(parent)) {
                    walk(child, kind, out);
                }
            }
        }
    }

    let mut out = Vec::new();
    walk(token, token.kind(), &mut out);
    out
}

struct Frame {
    kinds: Vec<Option<Kind>>,
    next: usize,
}

#[derive(Default)]
struct LastKindVisitor {
    frames: Vec<Frame>,
    last: Option<Kind>,
}

impl LastKindVisitor {
    fn ignored(token: &Token) -> bool {
        token.is_color() || token.is_condition()
    }
}

impl Visitor for LastKindVisitor {
    fn start_visit_token(&mut self, token: &Token) -> Visiting {
        let kind = match self.frames.last_mut() {
            Some(frame) => {
                let kind = frame.kinds.get(frame.next).copied().flatten();
                frame.next += 1;
                kind
            }
            None => token.kind(),
        };

        if Self::ignored(token) {
            return Visiting::Skip;
        }
        match token {
            Token::Leaf(_) => {
                if kind.is_some() {
                    self.last = kind;
                }
            }
            Token::Parent(parent) => self.frames.push(Frame {
                kinds: classify_children(parent),
                next: 0,
            }),
        }
        Visiting::Continue
    }

    fn end_visit_token(&mut self, token: &Token) {
        if token.is_parent() && !Self::ignored(token) {
            self.frames.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(token: Token) -> LeafToken {
        token.as_leaf().cloned().unwrap()
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Kind::DayWithLeadingZero.name(), "DAY_WITH_LEADING_ZERO");
        assert_eq!(Kind::AmPmFullUpper.name(), "AM_PM_FULL_UPPER");
        assert_eq!(
            serde_json::to_string(&Kind::YearFull).unwrap(),
            "\"YEAR_FULL\""
        );
    }

    #[test]
    fn test_kind_names_match_serialized_form() {
        for kind in Kind::ALL {
            assert_eq!(
                serde_json::to_value(kind).unwrap(),
                serde_json::Value::from(kind.name())
            );
            assert_eq!(Kind::from_name(kind.name()), Some(*kind));
            let read: Kind = serde_json::from_value(kind.name().into()).unwrap();
            assert_eq!(read, *kind);
        }
        assert_eq!(Kind::from_name("YearFull"), None);
    }

    #[test]
    fn test_month_or_minute_flag() {
        let mm = leaf(Token::month_or_minute("mm").unwrap());
        assert_eq!(leaf_kind(&mm, false), Some(Kind::MonthWithLeadingZero));
        assert_eq!(leaf_kind(&mm, true), Some(Kind::MinuteWithLeadingZero));
        let mmmmmm = leaf(Token::month_or_minute("mmmmmm").unwrap());
        assert_eq!(leaf_kind(&mmmmmm, false), Some(Kind::MonthNameInitial));
        assert_eq!(leaf_kind(&mmmmmm, true), Some(Kind::MinuteWithLeadingZero));
    }

    #[test]
    fn test_am_pm_case() {
        assert_eq!(Token::am_pm("AM/PM").unwrap().kind(), Some(Kind::AmPmFullUpper));
        assert_eq!(Token::am_pm("a/p").unwrap().kind(), Some(Kind::AmPmInitialLower));
    }

    #[test]
    fn test_adjacency_in_date_time() {
        let date_time = Token::date_time(vec![
            Token::month_or_minute("mm").unwrap(),
            Token::text_literal("-").unwrap(),
            Token::day("dd").unwrap(),
            Token::whitespace(" ").unwrap(),
            Token::hour("hh").unwrap(),
            Token::text_literal(":").unwrap(),
            Token::month_or_minute("mm").unwrap(),
        ])
        .unwrap();
        let kinds = classify_children(date_time.as_parent().unwrap());
        assert_eq!(kinds[0], Some(Kind::MonthWithLeadingZero));
        assert_eq!(kinds[3], None);
        assert_eq!(kinds[6], Some(Kind::MinuteWithLeadingZero));
        assert_eq!(last_kind(&date_time), Some(Kind::MinuteWithLeadingZero));
    }

    #[test]
    fn test_symbols_have_no_kind() {
        assert_eq!(Token::bracket_open_symbol("[").unwrap().kind(), None);
        assert_eq!(Token::whitespace(" ").unwrap().kind(), None);
    }
}
