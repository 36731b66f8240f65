//! Named parsers for each pattern family

use super::ebnf::{parse_grammar, Grammar};
use super::error::GrammarError;
use super::terminals::{ParserError, RuleParser};
use super::transformer::{Decoration, Transformer};
use crate::sheetfmt::context::ParserContext;
use crate::sheetfmt::parsing::ParseError;
use crate::sheetfmt::token::Token;
use chumsky::prelude::*;
use once_cell::sync::Lazy;
use std::fmt;

/// The format grammar, as shipped with the crate.
pub const FORMAT_GRAMMAR: &str = include_str!("format.ebnf");

static GRAMMAR: Lazy<Grammar> = Lazy::new(|| {
    parse_grammar(FORMAT_GRAMMAR).expect("the embedded format grammar is well formed")
});

/// The embedded grammar, read once.
pub fn format_grammar() -> &'static Grammar {
    &GRAMMAR
}

/// A parser producing exactly one token
pub type TokenParser = BoxedParser<'static, char, Token, ParserError>;

/// The entry points of the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternFamily {
    Color,
    Condition,
    Date,
    DateTime,
    Time,
    Number,
    Fraction,
    Text,
    General,
    Expression,
}

impl PatternFamily {
    pub const ALL: &'static [PatternFamily] = &[
        PatternFamily::Color,
        PatternFamily::Condition,
        PatternFamily::Date,
        PatternFamily::DateTime,
        PatternFamily::Time,
        PatternFamily::Number,
        PatternFamily::Fraction,
        PatternFamily::Text,
        PatternFamily::General,
        PatternFamily::Expression,
    ];

    /// The grammar rule implementing this family.
    pub fn rule_name(self) -> &'static str {
        match self {
            PatternFamily::Color => "COLOR",
            PatternFamily::Condition => "CONDITION",
            PatternFamily::Date => "DATE",
            PatternFamily::DateTime => "DATE_TIME",
            PatternFamily::Time => "TIME",
            PatternFamily::Number => "NUMBER",
            PatternFamily::Fraction => "FRACTION",
            PatternFamily::Text => "TEXT",
            PatternFamily::General => "GENERAL",
            PatternFamily::Expression => "EXPRESSION",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PatternFamily::Color => "color",
            PatternFamily::Condition => "condition",
            PatternFamily::Date => "date",
            PatternFamily::DateTime => "date-time",
            PatternFamily::Time => "time",
            PatternFamily::Number => "number",
            PatternFamily::Fraction => "fraction",
            PatternFamily::Text => "text",
            PatternFamily::General => "general",
            PatternFamily::Expression => "expression",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        PatternFamily::ALL
            .iter()
            .copied()
            .find(|family| family.name() == name)
    }
}

impl fmt::Display for PatternFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One compiled parser per [PatternFamily]
///
/// Parsers are cheap to clone but not `Send`: build one set per thread.
#[derive(Clone)]
pub struct Parsers {
    /// Indexed by `PatternFamily as usize`, in the order of [PatternFamily::ALL].
    families: Vec<RuleParser>,
}

impl Parsers {
    /// Build the parsers of the embedded grammar.
    pub fn new(context: &ParserContext) -> Self {
        Self::from_grammar(format_grammar(), context)
            .expect("the embedded format grammar resolves")
    }

    /// Build the parsers of any grammar that defines every family rule.
    pub fn from_grammar(grammar: &Grammar, context: &ParserContext) -> Result<Self, GrammarError> {
        let mut transformer = Transformer::new(grammar, context)?.decorate(
            PatternFamily::General.rule_name(),
            Decoration::ColorPrefix {
                color_rule: PatternFamily::Color.rule_name(),
                lead_rule: Some(PatternFamily::Condition.rule_name()),
            },
        );
        transformer.check()?;

        let mut families = Vec::with_capacity(PatternFamily::ALL.len());
        for family in PatternFamily::ALL {
            families.push(transformer.rule(family.rule_name())?);
        }
        log::debug!("assembled {} pattern parsers", families.len());
        Ok(Self { families })
    }

    /// The parser of one family, producing a single token.
    pub fn family(&self, family: PatternFamily) -> TokenParser {
        self.families[family as usize]
            .clone()
            .try_map(move |mut tokens, span| {
                if tokens.len() == 1 {
                    Ok(tokens.remove(0))
                } else {
                    Err(Simple::custom(
                        span,
                        format!("{family} matched {} tokens", tokens.len()),
                    ))
                }
            })
            .boxed()
    }

    pub fn color(&self) -> TokenParser {
        self.family(PatternFamily::Color)
    }

    /// Any of the six comparisons (`[=1]`, `[<>1]`, `[>1]`, `[>=1]`, `[<1]`, `[<=1]`).
    pub fn condition(&self) -> TokenParser {
        self.family(PatternFamily::Condition)
    }

    pub fn date(&self) -> TokenParser {
        self.family(PatternFamily::Date)
    }

    pub fn date_time(&self) -> TokenParser {
        self.family(PatternFamily::DateTime)
    }

    pub fn time(&self) -> TokenParser {
        self.family(PatternFamily::Time)
    }

    /// Numbers with digit placeholders, separators, currency, percent and exponent.
    pub fn number(&self) -> TokenParser {
        self.family(PatternFamily::Number)
    }

    pub fn fraction(&self) -> TokenParser {
        self.family(PatternFamily::Fraction)
    }

    pub fn text(&self) -> TokenParser {
        self.family(PatternFamily::Text)
    }

    pub fn general(&self) -> TokenParser {
        self.family(PatternFamily::General)
    }

    /// A whole pattern: up to four sections separated by `;`.
    pub fn expression(&self) -> TokenParser {
        self.family(PatternFamily::Expression)
    }

    /// Parse all of `pattern` as one family.
    pub fn parse(&self, family: PatternFamily, pattern: &str) -> Result<Token, ParseError> {
        self.family(family)
            .then_ignore(end())
            .parse(pattern)
            .map_err(|errors| {
                let error = ParseError::from_errors(pattern, errors);
                log::debug!("{} rejected {:?}: {}", family, pattern, error);
                error
            })
    }
}

impl fmt::Debug for Parsers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let families: Vec<_> = PatternFamily::ALL.iter().map(|family| family.name()).collect();
        f.debug_struct("Parsers").field("families", &families).finish()
    }
}

impl Default for Parsers {
    fn default() -> Self {
        Self::new(&ParserContext::default())
    }
}
