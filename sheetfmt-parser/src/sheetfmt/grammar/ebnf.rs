//! Reader for the EBNF notation the format grammar is written in
//!
//! Supported syntax:
//!
//!     NAME = expr ;         rule definition
//!     a, b                  sequence
//!     a | b                 ordered alternative
//!     [ a ]                 optional
//!     { a }                 zero or more
//!     ( a )                 grouping
//!     (* ... *)             comment
//!
//! Names are made of ASCII letters, digits and `_`.

use super::error::GrammarError;
use chumsky::prelude::*;

type ParserError = Simple<char>;

/// Right hand side of a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Reference(String),
    Sequence(Vec<Expr>),
    Alternative(Vec<Expr>),
    Optional(Box<Expr>),
    Repeat(Box<Expr>),
}

impl Expr {
    /// Every name this expression refers to, in order of appearance.
    pub fn references(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_references(&mut names);
        names
    }

    fn collect_references<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Expr::Reference(name) => names.push(name),
            Expr::Sequence(items) | Expr::Alternative(items) => {
                for item in items {
                    item.collect_references(names);
                }
            }
            Expr::Optional(inner) | Expr::Repeat(inner) => inner.collect_references(names),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grammar {
    pub rules: Vec<Rule>,
}

impl Grammar {
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }
}

/// Parse grammar text into rules. Reports the first syntax error.
pub fn parse_grammar(source: &str) -> Result<Grammar, GrammarError> {
    grammar_parser().parse(source).map_err(|errors| {
        let error = errors
            .into_iter()
            .max_by_key(|error| error.span().start)
            .map(|error| GrammarError::Syntax {
                position: error.span().start,
                message: error.to_string(),
            });
        error.unwrap_or(GrammarError::Syntax {
            position: 0,
            message: "unreadable grammar".to_string(),
        })
    })
}

fn grammar_parser() -> impl Parser<char, Grammar, Error = ParserError> {
    let comment = just::<char, _, ParserError>("(*")
        .then(take_until(just("*)")))
        .ignored();
    let blank = filter::<char, _, ParserError>(|c: &char| c.is_whitespace())
        .ignored()
        .or(comment)
        .repeated()
        .ignored();

    let name = filter::<char, _, ParserError>(|c: &char| c.is_ascii_alphanumeric() || *c == '_')
        .repeated()
        .at_least(1)
        .collect::<String>()
        .padded_by(blank.clone());

    let expr = recursive(|expr: Recursive<char, Expr, ParserError>| {
        let atom = name
            .clone()
            .map(Expr::Reference)
            .or(expr
                .clone()
                .delimited_by(just('['), just(']'))
                .map(|inner| Expr::Optional(Box::new(inner))))
            .or(expr
                .clone()
                .delimited_by(just('{'), just('}'))
                .map(|inner| Expr::Repeat(Box::new(inner))))
            .or(expr.delimited_by(just('('), just(')')))
            .padded_by(blank.clone());

        let sequence = atom
            .separated_by(just(','))
            .at_least(1)
            .map(|items| collapse(items, Expr::Sequence));

        sequence
            .separated_by(just('|'))
            .at_least(1)
            .map(|alternatives| collapse(alternatives, Expr::Alternative))
    });

    let rule = name
        .then_ignore(just('='))
        .then(expr)
        .then_ignore(just(';'))
        .map(|(name, expr)| Rule { name, expr });

    rule.repeated()
        .then_ignore(blank)
        .then_ignore(end())
        .map(|rules| Grammar { rules })
}

fn collapse(mut items: Vec<Expr>, combine: fn(Vec<Expr>) -> Expr) -> Expr {
    if items.len() == 1 {
        items.remove(0)
    } else {
        combine(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(name: &str) -> Expr {
        Expr::Reference(name.to_string())
    }

    #[test]
    fn test_parse_sequence_and_alternative() {
        let grammar = parse_grammar("A = B, C | D ;").unwrap();
        assert_eq!(grammar.rules.len(), 1);
        assert_eq!(
            grammar.rules[0].expr,
            Expr::Alternative(vec![
                Expr::Sequence(vec![reference("B"), reference("C")]),
                reference("D"),
            ])
        );
    }

    #[test]
    fn test_parse_optional_repeat_and_group() {
        let grammar = parse_grammar("A = [ B ], { ( C | D ) } ;").unwrap();
        assert_eq!(
            grammar.rules[0].expr,
            Expr::Sequence(vec![
                Expr::Optional(Box::new(reference("B"))),
                Expr::Repeat(Box::new(Expr::Alternative(vec![
                    reference("C"),
                    reference("D")
                ]))),
            ])
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        let grammar = parse_grammar("(* first *)\nA = B ; (* second *)\nC = (D) ;\n").unwrap();
        assert_eq!(grammar.rules.len(), 2);
        assert_eq!(grammar.rule("C").unwrap().expr, reference("D"));
    }

    #[test]
    fn test_references_in_order() {
        let grammar = parse_grammar("A = B, [C], { D | B } ;").unwrap();
        assert_eq!(grammar.rules[0].expr.references(), vec!["B", "C", "D", "B"]);
    }

    #[test]
    fn test_syntax_error_reports_position() {
        let error = parse_grammar("A = B,, C ;").unwrap_err();
        match error {
            GrammarError::Syntax { position, .. } => assert!(position > 0),
            other => panic!("expected a syntax error, got {other:?}"),
        }
        assert!(parse_grammar("A = B").is_err());
    }
}
