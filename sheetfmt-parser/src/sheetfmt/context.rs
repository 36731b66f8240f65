//! Locale symbols and rounding used while parsing
//!
//! The grammar never hardcodes a locale: terminals that depend on one (condition numbers,
//! currency) ask the [ParserContext] for their symbols. A context is plain data, cloned
//! into every parser built from it.

use bigdecimal::{BigDecimal, RoundingMode};
use std::num::NonZeroU64;

/// Number symbols and the rounding applied to parsed decimals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalNumberContext {
    pub currency_symbol: String,
    pub decimal_separator: char,
    pub group_separator: char,
    pub minus_sign: char,
    pub plus_sign: char,
    pub percentage_symbol: char,
    pub exponent_symbol: String,
    /// Significant digits kept by [DecimalNumberContext::round]; 0 keeps everything.
    pub precision: u64,
    pub rounding: RoundingMode,
}

impl Default for DecimalNumberContext {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            decimal_separator: '.',
            group_separator: ',',
            minus_sign: '-',
            plus_sign: '+',
            percentage_symbol: '%',
            exponent_symbol: "E".to_string(),
            precision: 0,
            rounding: RoundingMode::HalfEven,
        }
    }
}

impl DecimalNumberContext {
    /// Round to the configured number of significant digits.
    pub fn round(&self, value: BigDecimal) -> BigDecimal {
        match NonZeroU64::new(self.precision) {
            Some(precision) => value.with_precision_round(precision, self.rounding),
            None => value,
        }
    }
}

/// The context a [Parsers](crate::sheetfmt::grammar::Parsers) set is built with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserContext {
    number: DecimalNumberContext,
}

impl ParserContext {
    pub fn new(number: DecimalNumberContext) -> Self {
        Self { number }
    }

    pub fn number_context(&self) -> &DecimalNumberContext {
        &self.number
    }

    pub fn currency_symbol(&self) -> &str {
        &self.number.currency_symbol
    }

    pub fn decimal_separator(&self) -> char {
        self.number.decimal_separator
    }

    pub fn group_separator(&self) -> char {
        self.number.group_separator
    }

    pub fn minus_sign(&self) -> char {
        self.number.minus_sign
    }

    pub fn plus_sign(&self) -> char {
        self.number.plus_sign
    }

    pub fn percentage_symbol(&self) -> char {
        self.number.percentage_symbol
    }

    pub fn exponent_symbol(&self) -> &str {
        &self.number.exponent_symbol
    }

    pub fn round(&self, value: BigDecimal) -> BigDecimal {
        self.number.round(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_zero_precision_keeps_value() {
        let context = ParserContext::default();
        let value = BigDecimal::from_str("123.456789012345678901234567890123").unwrap();
        assert_eq!(context.round(value.clone()), value);
    }

    #[test]
    fn test_rounds_to_significant_digits() {
        let context = ParserContext::new(DecimalNumberContext {
            precision: 3,
            ..Default::default()
        });
        assert_eq!(
            context.round(BigDecimal::from_str("123.456").unwrap()),
            BigDecimal::from_str("123").unwrap()
        );
        assert_eq!(
            context.round(BigDecimal::from_str("0.012345").unwrap()),
            BigDecimal::from_str("0.0123").unwrap()
        );
        assert_eq!(
            context.round(BigDecimal::from_str("123456789012345678901234567890").unwrap()),
            BigDecimal::from_str("1.23e29").unwrap()
        );
    }
}
