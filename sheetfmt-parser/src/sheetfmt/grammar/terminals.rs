//! Terminal parsers: one leaf token per match
//!
//! Every terminal reads characters and hands the matched text to a token factory. A
//! factory rejection becomes a parse error at the matched span, so a terminal never
//! produces an invalid token.
//!
//! All rule parsers, terminals included, produce a `Vec<Token>`; rules concatenate the
//! vectors of their parts and parent rules fold them into a single token.

use crate::sheetfmt::context::ParserContext;
use crate::sheetfmt::token::{Token, TokenError};
use chumsky::prelude::*;
use bigdecimal::BigDecimal;
use std::collections::HashMap;
use std::str::FromStr;

pub(crate) type ParserError = Simple<char>;

/// A compiled grammar rule or terminal
pub type RuleParser = BoxedParser<'static, char, Vec<Token>, ParserError>;

/// Name of the zero-width terminal matching right before `;` or the end of input.
pub const SECTION_END: &str = "SECTION_END";

/// Chars read as text literals without quoting or escaping.
pub const LITERAL_CHARS: &str = "$-+():!^&'~{}<>=,.";

/// Build the terminal table for a context.
pub fn terminals(context: &ParserContext) -> HashMap<&'static str, RuleParser> {
    let mut table: HashMap<&'static str, RuleParser> = HashMap::new();

    table.insert(
        "AM_PM",
        build(ignore_case("AM/PM").or(ignore_case("A/P")), Token::am_pm),
    );
    table.insert("BRACKET_CLOSE_SYMBOL", build(exact("]"), Token::bracket_close_symbol));
    table.insert("BRACKET_OPEN_SYMBOL", build(exact("["), Token::bracket_open_symbol));
    table.insert(
        "COLOR_LITERAL_SYMBOL",
        build(ignore_case("Color"), Token::color_literal_symbol),
    );
    table.insert(
        "COLOR_NAME",
        build(
            filter::<char, _, ParserError>(|c: &char| c.is_alphabetic())
                .repeated()
                .at_least(1)
                .collect::<String>(),
            Token::color_name,
        ),
    );
    table.insert("COLOR_NUMBER", color_number());
    table.insert("CONDITION_NUMBER", condition_number(context));
    table.insert("CURRENCY", currency(context));
    table.insert("DAY", build(run('d'), Token::day));
    table.insert("DECIMAL_POINT", build(exact("."), Token::decimal_point));
    table.insert("DIGIT", build(exact("#"), Token::digit));
    table.insert("DIGIT_SPACE", build(exact("?"), Token::digit_space));
    table.insert("DIGIT_ZERO", build(exact("0"), Token::digit_zero));
    table.insert("EQUALS_SYMBOL", build(exact("="), Token::equals_symbol));
    table.insert("ESCAPE", marked('\\', Token::escape));
    table.insert(
        "EXPONENT_SYMBOL",
        build(
            one_of::<char, _, ParserError>("Ee")
                .chain(one_of("+-"))
                .collect::<String>(),
            Token::exponent_symbol,
        ),
    );
    table.insert("FRACTION_SYMBOL", build(exact("/"), Token::fraction_symbol));
    table.insert(
        "GENERAL_SYMBOL",
        build(ignore_case("General"), Token::general_symbol),
    );
    table.insert(
        "GREATER_THAN_EQUALS_SYMBOL",
        build(exact(">="), Token::greater_than_equals_symbol),
    );
    table.insert(
        "GREATER_THAN_SYMBOL",
        build(exact(">"), Token::greater_than_symbol),
    );
    table.insert("GROUP_SEPARATOR", build(exact(","), Token::group_separator));
    table.insert("HOUR", build(run('h'), Token::hour));
    table.insert(
        "LESS_THAN_EQUALS_SYMBOL",
        build(exact("<="), Token::less_than_equals_symbol),
    );
    table.insert("LESS_THAN_SYMBOL", build(exact("<"), Token::less_than_symbol));
    table.insert("MONTH_OR_MINUTE", build(run('m'), Token::month_or_minute));
    table.insert(
        "NOT_EQUALS_SYMBOL",
        build(exact("<>"), Token::not_equals_symbol),
    );
    table.insert("PERCENT", build(exact("%"), Token::percent));
    table.insert("QUOTED_TEXT", quoted_text());
    table.insert("SECOND", build(run('s'), Token::second));
    table.insert(SECTION_END, section_end());
    table.insert("SEPARATOR_SYMBOL", build(exact(";"), Token::separator_symbol));
    table.insert("SLASH", build(exact("/"), Token::text_literal));
    table.insert("STAR", marked('*', Token::star));
    table.insert(
        "TEXT_LITERAL",
        build(
            one_of::<char, _, ParserError>(LITERAL_CHARS).map(String::from),
            Token::text_literal,
        ),
    );
    table.insert("TEXT_PLACEHOLDER", build(exact("@"), Token::text_placeholder));
    table.insert("UNDERSCORE", marked('_', Token::underscore));
    table.insert(
        "WHITESPACE",
        build(
            filter::<char, _, ParserError>(|c: &char| c.is_whitespace())
                .repeated()
                .at_least(1)
                .collect::<String>(),
            Token::whitespace,
        ),
    );
    table.insert("YEAR", build(run('y'), Token::year));

    log::trace!("built {} terminals", table.len());
    table
}

/// Turn matched text into a one-token rule result through a factory.
fn build<P, F>(parser: P, factory: F) -> RuleParser
where
    P: Parser<char, String, Error = ParserError> + 'static,
    F: Fn(String) -> Result<Token, TokenError> + 'static,
{
    parser
        .try_map(move |text, span| {
            factory(text)
                .map(|token| vec![token])
                .map_err(|err| Simple::custom(span, err.to_string()))
        })
        .boxed()
}

/// The exact text `word`.
fn exact(word: &'static str) -> impl Parser<char, String, Error = ParserError> + Clone {
    just(word).map(|matched: &str| matched.to_string())
}

/// `word` in any letter case, keeping the case that was written.
fn ignore_case(word: &str) -> BoxedParser<'static, char, String, ParserError> {
    let start: BoxedParser<'static, char, String, ParserError> =
        empty().to(String::new()).boxed();
    word.chars().fold(start, |text, expected| {
        text.then(filter(move |c: &char| c.eq_ignore_ascii_case(&expected)))
            .map(|(mut text, c)| {
                text.push(c);
                text
            })
            .boxed()
    })
}

/// A run of one letter in either case (`d`, `DD`, `dDd`).
fn run(letter: char) -> impl Parser<char, String, Error = ParserError> + Clone {
    filter(move |c: &char| c.eq_ignore_ascii_case(&letter))
        .repeated()
        .at_least(1)
        .collect::<String>()
}

/// A marker char followed by any char, valued by the second one.
fn marked(
    marker: char,
    factory: fn(char, String) -> Result<Token, TokenError>,
) -> RuleParser {
    just::<char, _, ParserError>(marker)
        .ignore_then(any())
        .try_map(move |value: char, span| {
            factory(value, format!("{marker}{value}"))
                .map(|token| vec![token])
                .map_err(|err| Simple::custom(span, err.to_string()))
        })
        .boxed()
}

fn color_number() -> RuleParser {
    filter::<char, _, ParserError>(|c: &char| c.is_ascii_digit())
        .repeated()
        .at_least(1)
        .collect::<String>()
        .try_map(|text, span| {
            let value: u32 = text
                .parse()
                .map_err(|_| {
                    Simple::custom(span.clone(), format!("color number {text} is too large"))
                })?;
            Token::color_number(value, text)
                .map(|token| vec![token])
                .map_err(|err| Simple::custom(span, err.to_string()))
        })
        .boxed()
}

/// An optionally signed decimal with an optional exponent, read with the context's symbols
/// and rounded to its precision. The token text keeps the digits as written.
fn condition_number(context: &ParserContext) -> RuleParser {
    let minus = context.minus_sign();
    let plus = context.plus_sign();
    let point = context.decimal_separator();
    let exponent = context.exponent_symbol().to_string();
    let rounding = context.clone();

    let digits = || {
        filter::<char, _, ParserError>(|c: &char| c.is_ascii_digit())
            .repeated()
            .at_least(1)
            .collect::<String>()
    };
    let sign = move || {
        filter::<char, _, ParserError>(move |c: &char| *c == minus || *c == plus)
            .map(String::from)
            .or_not()
            .map(Option::unwrap_or_default)
    };
    let fraction = just(point)
        .then(digits())
        .map(|(point, digits)| format!("{point}{digits}"))
        .or_not()
        .map(Option::unwrap_or_default);
    let scientific = ignore_case(&exponent)
        .then(sign())
        .then(digits())
        .map(|((symbol, sign), digits)| format!("{symbol}{sign}{digits}"))
        .or_not()
        .map(Option::unwrap_or_default);

    sign()
        .then(digits())
        .then(fraction)
        .then(scientific)
        .map(|(((sign, whole), fraction), scientific)| {
            format!("{sign}{whole}{fraction}{scientific}")
        })
        .try_map(move |text, span| {
            let value = read_decimal(&text, minus, plus, point)
                .map(|value| rounding.round(value))
                .ok_or_else(|| Simple::custom(span.clone(), format!("unreadable number {text:?}")))?;
            Token::condition_number(value, text)
                .map(|token| vec![token])
                .map_err(|err| Simple::custom(span, err.to_string()))
        })
        .boxed()
}

/// Normalise locale symbols to the plain `-1.5e3` form and read it.
fn read_decimal(text: &str, minus: char, plus: char, point: char) -> Option<BigDecimal> {
    let mut normalised = String::with_capacity(text.len());
    let mut exponent = false;
    for c in text.chars() {
        match c {
            c if c == minus => normalised.push('-'),
            c if c == plus => {}
            c if c == point => normalised.push('.'),
            c if c.is_ascii_digit() => normalised.push(c),
            _ if !exponent => {
                exponent = true;
                normalised.push('e');
            }
            _ => {}
        }
    }
    BigDecimal::from_str(&normalised).ok()
}

/// `$` or the context currency symbol.
fn currency(context: &ParserContext) -> RuleParser {
    let symbol = context.currency_symbol().to_string();
    let localised = just::<char, _, ParserError>(symbol.chars().collect::<Vec<_>>())
        .collect::<String>();
    let parser = if symbol == "$" || symbol.is_empty() {
        exact("$").boxed()
    } else {
        localised.or(exact("$")).boxed()
    };
    build(parser, Token::currency)
}

/// Text between double quotes, valued without them.
fn quoted_text() -> RuleParser {
    none_of::<char, _, ParserError>("\"")
        .repeated()
        .collect::<String>()
        .delimited_by(just('"'), just('"'))
        .try_map(|value, span| {
            let text = format!("\"{value}\"");
            Token::quoted_text(value, text)
                .map(|token| vec![token])
                .map_err(|err| Simple::custom(span, err.to_string()))
        })
        .boxed()
}

/// Succeeds without consuming input when the next char is `;` or the input is over.
fn section_end() -> RuleParser {
    just::<char, _, ParserError>(';')
        .ignored()
        .or(end())
        .rewind()
        .to(Vec::new())
        .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheetfmt::context::DecimalNumberContext;
    use crate::sheetfmt::token::LeafType;

    fn read(name: &str, input: &str) -> Result<Vec<Token>, Vec<ParserError>> {
        let table = terminals(&ParserContext::default());
        table[name].clone().then_ignore(end()).parse(input)
    }

    #[test]
    fn test_letter_runs_keep_case() {
        let tokens = read("DAY", "dDd").unwrap();
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_day());
        assert_eq!(tokens[0].text(), "dDd");
        assert!(read("DAY", "dm").is_err());
    }

    #[test]
    fn test_keywords_ignore_case() {
        assert_eq!(read("AM_PM", "am/PM").unwrap()[0].text(), "am/PM");
        assert_eq!(read("AM_PM", "A/p").unwrap()[0].text(), "A/p");
        assert_eq!(read("GENERAL_SYMBOL", "GENERAL").unwrap()[0].text(), "GENERAL");
        assert!(read("COLOR_LITERAL_SYMBOL", "Colour").is_err());
    }

    #[test]
    fn test_marked_chars() {
        let escape = read("ESCAPE", "\\-").unwrap();
        assert_eq!(escape[0].as_leaf().unwrap().value().as_char(), Some('-'));
        let star = read("STAR", "* ").unwrap();
        assert_eq!(star[0].text(), "* ");
        assert!(read("UNDERSCORE", "_").is_err());
    }

    #[test]
    fn test_quoted_text_value() {
        let quoted = read("QUOTED_TEXT", "\"kg \"").unwrap();
        assert_eq!(quoted[0].as_leaf().unwrap().value().as_text(), Some("kg "));
        assert_eq!(quoted[0].text(), "\"kg \"");
        assert!(read("QUOTED_TEXT", "\"open").is_err());
    }

    #[test]
    fn test_condition_number_forms() {
        let cases = [
            ("100", "100"),
            ("-1.5", "-1.5"),
            ("+2", "2"),
            ("1E3", "1000"),
            ("2.5e-1", "0.25"),
            ("1E40", "10000000000000000000000000000000000000000"),
            ("-1E-40", "-0.0000000000000000000000000000000000000001"),
            ("123456789012345678901234567890", "123456789012345678901234567890"),
            ("0.000000000000000000000000000001", "1e-30"),
        ];
        for (input, expected) in cases {
            let tokens = read("CONDITION_NUMBER", input).unwrap();
            let value = tokens[0].as_leaf().unwrap().value().as_number().unwrap();
            assert_eq!(value, &BigDecimal::from_str(expected).unwrap(), "{input}");
            assert_eq!(tokens[0].text(), input);
        }
    }

    #[test]
    fn test_condition_number_uses_context() {
        let context = ParserContext::new(DecimalNumberContext {
            decimal_separator: ',',
            precision: 2,
            ..Default::default()
        });
        let table = terminals(&context);
        let tokens = table["CONDITION_NUMBER"]
            .clone()
            .then_ignore(end())
            .parse("1,25")
            .unwrap();
        let value = tokens[0].as_leaf().unwrap().value().as_number().unwrap();
        assert_eq!(value, &BigDecimal::from_str("1.2").unwrap());
        assert_eq!(tokens[0].text(), "1,25");
    }

    #[test]
    fn test_currency_accepts_context_symbol() {
        let context = ParserContext::new(DecimalNumberContext {
            currency_symbol: "€".to_string(),
            ..Default::default()
        });
        let table = terminals(&context);
        let currency = table["CURRENCY"].clone().then_ignore(end());
        assert!(currency.parse("€").unwrap()[0].is_currency());
        assert!(currency.parse("$").unwrap()[0].is_currency());
    }

    #[test]
    fn test_section_end_consumes_nothing() {
        let table = terminals(&ParserContext::default());
        let digit_then_end = table["DIGIT_ZERO"]
            .clone()
            .then(table[SECTION_END].clone())
            .then(just(';'))
            .then_ignore(end());
        assert!(digit_then_end.parse("0;").is_ok());
        assert!(table["DIGIT_ZERO"]
            .clone()
            .then(table[SECTION_END].clone())
            .parse("0x")
            .is_err());
    }

    #[test]
    fn test_slash_is_a_text_literal() {
        let tokens = read("SLASH", "/").unwrap();
        assert_eq!(tokens[0].leaf_type(), Some(LeafType::TextLiteral));
    }

    #[test]
    fn test_every_leaf_type_has_a_terminal() {
        let table = terminals(&ParserContext::default());
        for leaf in LeafType::ALL {
            let name = leaf.name().to_uppercase().replace('-', "_");
            assert!(table.contains_key(name.as_str()), "{name}");
        }
    }
}
