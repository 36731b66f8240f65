//! Grammar to combinator transformation
//!
//! The transformer walks the rule expressions and assembles chumsky parsers from them.
//! Names are looked up first among the terminals, then among the rules. Rules are built
//! once and shared by every rule that refers to them.
//!
//! A rule whose name is a parent type (`DATE_TIME` for `date-time`) folds the tokens it
//! matched into that parent through the validating factory, so a parent that fails its
//! predicate is a failed match and the surrounding alternative moves on.
//!
//! Decorations wrap a finished rule in an extra layer. The only one today prefixes a
//! rule with an optional color, which may itself follow leading conditions.

use super::ebnf::{Expr, Grammar};
use super::error::GrammarError;
use super::terminals::{terminals, ParserError, RuleParser};
use crate::sheetfmt::context::ParserContext;
use crate::sheetfmt::token::{ParentType, Token};
use chumsky::prelude::*;
use std::collections::{HashMap, HashSet};

/// Extra layer applied around a compiled rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoration {
    /// Accept an optional color (parsed by `color_rule`) before the rule. When `lead_rule`
    /// is set, any number of its matches may come before the color.
    ColorPrefix {
        color_rule: &'static str,
        lead_rule: Option<&'static str>,
    },
}

pub struct Transformer<'g> {
    grammar: &'g Grammar,
    terminals: HashMap<&'static str, RuleParser>,
    decorations: HashMap<&'static str, Decoration>,
    built: HashMap<String, RuleParser>,
    in_progress: HashSet<String>,
}

impl<'g> Transformer<'g> {
    /// Check the grammar for duplicate and shadowing rules and prepare the terminals.
    pub fn new(grammar: &'g Grammar, context: &ParserContext) -> Result<Self, GrammarError> {
        let terminals = terminals(context);
        let mut seen = HashSet::new();
        for rule in &grammar.rules {
            if terminals.contains_key(rule.name.as_str()) {
                return Err(GrammarError::ShadowedTerminal(rule.name.clone()));
            }
            if !seen.insert(rule.name.as_str()) {
                return Err(GrammarError::DuplicateRule(rule.name.clone()));
            }
        }
        Ok(Self {
            grammar,
            terminals,
            decorations: HashMap::new(),
            built: HashMap::new(),
            in_progress: HashSet::new(),
        })
    }

    pub fn decorate(mut self, rule: &'static str, decoration: Decoration) -> Self {
        self.decorations.insert(rule, decoration);
        self
    }

    /// The compiled parser for a rule or terminal.
    pub fn rule(&mut self, name: &str) -> Result<RuleParser, GrammarError> {
        if let Some(terminal) = self.terminals.get(name) {
            return Ok(terminal.clone());
        }
        if let Some(parser) = self.built.get(name) {
            return Ok(parser.clone());
        }

        let grammar = self.grammar;
        let rule = grammar
            .rule(name)
            .ok_or_else(|| GrammarError::Missing(name.to_string()))?;
        if !self.in_progress.insert(name.to_string()) {
            return Err(GrammarError::CyclicRule(name.to_string()));
        }

        log::trace!("building rule {}", name);
        let body = self.expr(name, &rule.expr)?;
        let mut parser = match parent_type_of(name) {
            Some(parent) => reduce(parent, body),
            None => body,
        };
        if let Some(decoration) = self.decorations.get(name).cloned() {
            parser = self.apply(name, decoration, parser)?;
        }

        self.in_progress.remove(name);
        self.built.insert(name.to_string(), parser.clone());
        Ok(parser)
    }

    /// Compile every rule, reporting the first unknown name or cycle.
    pub fn check(&mut self) -> Result<(), GrammarError> {
        let grammar = self.grammar;
        for rule in &grammar.rules {
            self.rule(&rule.name)?;
        }
        Ok(())
    }

    fn expr(&mut self, rule: &str, expr: &Expr) -> Result<RuleParser, GrammarError> {
        match expr {
            Expr::Reference(name) => self.rule(name).map_err(|err| match err {
                GrammarError::Missing(missing) => GrammarError::UnknownName {
                    rule: rule.to_string(),
                    name: missing,
                },
                other => other,
            }),
            Expr::Sequence(items) => {
                let mut parsers = Vec::with_capacity(items.len());
                for item in items {
                    parsers.push(self.expr(rule, item)?);
                }
                Ok(sequence(parsers))
            }
            Expr::Alternative(items) => {
                let mut parsers = Vec::with_capacity(items.len());
                for item in items {
                    parsers.push(self.expr(rule, item)?);
                }
                Ok(alternative(parsers))
            }
            Expr::Optional(inner) => Ok(self
                .expr(rule, inner)?
                .or_not()
                .map(Option::unwrap_or_default)
                .boxed()),
            Expr::Repeat(inner) => Ok(self
                .expr(rule, inner)?
                .repeated()
                .map(|runs| runs.into_iter().flatten().collect::<Vec<Token>>())
                .boxed()),
        }
    }

    fn apply(
        &mut self,
        rule: &str,
        decoration: Decoration,
        parser: RuleParser,
    ) -> Result<RuleParser, GrammarError> {
        match decoration {
            Decoration::ColorPrefix {
                color_rule,
                lead_rule,
            } => {
                let mut needed = |name: &'static str| {
                    self.rule(name).map_err(|_| GrammarError::Decoration {
                        rule: rule.to_string(),
                        needs: name.to_string(),
                    })
                };
                let color = needed(color_rule)?;
                let lead = lead_rule.map(&mut needed).transpose()?;
                Ok(with_color(color, lead, parser))
            }
        }
    }
}

/// Parse an optional color in front of `inner`, after any number of `lead` matches. When
/// `inner` produced a single parent the prefix becomes its first children, otherwise it is
/// returned in front of the tokens. Without a prefix the result of `inner` is unchanged.
pub fn with_color(color: RuleParser, lead: Option<RuleParser>, inner: RuleParser) -> RuleParser {
    let lead: RuleParser = match lead {
        Some(lead) => lead
            .repeated()
            .map(|runs| runs.into_iter().flatten().collect::<Vec<Token>>())
            .boxed(),
        None => empty::<ParserError>().to(Vec::new()).boxed(),
    };
    lead.then(color.or_not())
        .then(inner)
        .try_map(|((mut prefixed, color), mut tokens), span| {
            prefixed.extend(color.into_iter().flatten());
            if prefixed.is_empty() {
                return Ok(tokens);
            }
            if let [Token::Parent(parent)] = tokens.as_slice() {
                prefixed.extend(parent.children().iter().cloned());
                return Token::parent(parent.token_type(), prefixed)
                    .map(|token| vec![token])
                    .map_err(|err| Simple::custom(span, err.to_string()));
            }
            prefixed.append(&mut tokens);
            Ok(prefixed)
        })
        .boxed()
}

fn parent_type_of(rule: &str) -> Option<ParentType> {
    ParentType::from_name(&rule.to_lowercase().replace('_', "-"))
}

fn reduce(parent: ParentType, body: RuleParser) -> RuleParser {
    body.try_map(move |children, span| {
        Token::parent(parent, children)
            .map(|token| vec![token])
            .map_err(|err| Simple::custom(span, err.to_string()))
    })
    .boxed()
}

fn sequence(parsers: Vec<RuleParser>) -> RuleParser {
    let mut parsers = parsers.into_iter();
    let first = match parsers.next() {
        Some(first) => first,
        None => return empty::<ParserError>().to(Vec::new()).boxed(),
    };
    parsers.fold(first, |left, right| {
        left.then(right)
            .map(|(mut tokens, more)| {
                tokens.extend(more);
                tokens
            })
            .boxed()
    })
}

fn alternative(parsers: Vec<RuleParser>) -> RuleParser {
    let mut parsers = parsers.into_iter();
    let first = match parsers.next() {
        Some(first) => first,
        None => return empty::<ParserError>().to(Vec::new()).boxed(),
    };
    parsers.fold(first, |left, right| left.or(right).boxed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheetfmt::grammar::ebnf::parse_grammar;

    fn transformer(grammar: &Grammar) -> Result<Transformer<'_>, GrammarError> {
        Transformer::new(grammar, &ParserContext::default())
    }

    #[test]
    fn test_parent_rules_reduce() {
        let grammar = parse_grammar("DATE = DAY, { SLASH, MONTH_OR_MINUTE } ;").unwrap();
        let mut transformer = transformer(&grammar).unwrap();
        let date = transformer.rule("DATE").unwrap();
        let tokens = date.then_ignore(end()).parse("dd/mm").unwrap();
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_date());
        assert_eq!(tokens[0].children().len(), 3);
    }

    #[test]
    fn test_transparent_rules_pass_tokens_through() {
        let grammar = parse_grammar("DIGITS = DIGIT, DIGIT_ZERO ;").unwrap();
        let mut transformer = transformer(&grammar).unwrap();
        let tokens = transformer
            .rule("DIGITS")
            .unwrap()
            .then_ignore(end())
            .parse("#0")
            .unwrap();
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_failed_predicate_is_failed_match() {
        let grammar = parse_grammar("NUMBER = CURRENCY, { CURRENCY } ;").unwrap();
        let mut transformer = transformer(&grammar).unwrap();
        assert!(transformer.rule("NUMBER").unwrap().parse("$").is_err());
    }

    #[test]
    fn test_unknown_name() {
        let grammar = parse_grammar("A = DAY, NOPE ;").unwrap();
        let mut transformer = transformer(&grammar).unwrap();
        assert_eq!(
            transformer.check().err(),
            Some(GrammarError::UnknownName {
                rule: "A".to_string(),
                name: "NOPE".to_string()
            })
        );
    }

    #[test]
    fn test_duplicate_and_shadowing_rules() {
        let duplicate = parse_grammar("A = DAY ; A = YEAR ;").unwrap();
        assert_eq!(
            transformer(&duplicate).err(),
            Some(GrammarError::DuplicateRule("A".to_string()))
        );
        let shadow = parse_grammar("DAY = YEAR ;").unwrap();
        assert_eq!(
            transformer(&shadow).err(),
            Some(GrammarError::ShadowedTerminal("DAY".to_string()))
        );
    }

    #[test]
    fn test_cyclic_rules() {
        let grammar = parse_grammar("A = DAY, [B] ; B = YEAR, A ;").unwrap();
        let mut transformer = transformer(&grammar).unwrap();
        assert!(matches!(
            transformer.check(),
            Err(GrammarError::CyclicRule(_))
        ));
    }

    #[test]
    fn test_color_prefix_joins_parent() {
        let grammar = parse_grammar(
            "COLOR = BRACKET_OPEN_SYMBOL, COLOR_NAME, BRACKET_CLOSE_SYMBOL ;\n\
             GENERAL = GENERAL_SYMBOL ;",
        )
        .unwrap();
        let mut transformer = transformer(&grammar).unwrap().decorate(
            "GENERAL",
            Decoration::ColorPrefix {
                color_rule: "COLOR",
                lead_rule: None,
            },
        );
        let general = transformer.rule("GENERAL").unwrap().then_ignore(end());

        let plain = general.clone().parse("General").unwrap();
        assert_eq!(plain[0].children().len(), 1);

        let colored = general.parse("[Blue]General").unwrap();
        assert_eq!(colored.len(), 1);
        assert!(colored[0].is_general());
        assert!(colored[0].children()[0].is_color());
        assert_eq!(colored[0].text(), "[Blue]General");
    }

    #[test]
    fn test_color_prefix_after_lead() {
        let grammar = parse_grammar(
            "COLOR = BRACKET_OPEN_SYMBOL, COLOR_NAME, BRACKET_CLOSE_SYMBOL ;\n\
             GREATER_THAN = BRACKET_OPEN_SYMBOL, GREATER_THAN_SYMBOL, CONDITION_NUMBER, \
             BRACKET_CLOSE_SYMBOL ;\n\
             GENERAL = { GREATER_THAN }, GENERAL_SYMBOL ;",
        )
        .unwrap();
        let mut transformer = transformer(&grammar).unwrap().decorate(
            "GENERAL",
            Decoration::ColorPrefix {
                color_rule: "COLOR",
                lead_rule: Some("GREATER_THAN"),
            },
        );
        let general = transformer.rule("GENERAL").unwrap().then_ignore(end());

        let colored = general.clone().parse("[>1][Red]General").unwrap();
        assert_eq!(colored.len(), 1);
        let types: Vec<_> = colored[0].children().iter().map(Token::type_name).collect();
        assert_eq!(types, ["greater-than", "color", "general-symbol"]);
        assert_eq!(colored[0].text(), "[>1][Red]General");

        let uncolored = general.parse("[>1][>2]General").unwrap();
        assert_eq!(uncolored[0].children().len(), 3);
    }

    #[test]
    fn test_missing_lead_rule() {
        let grammar = parse_grammar(
            "COLOR = BRACKET_OPEN_SYMBOL, COLOR_NAME, BRACKET_CLOSE_SYMBOL ;\n\
             GENERAL = GENERAL_SYMBOL ;",
        )
        .unwrap();
        let mut transformer = transformer(&grammar).unwrap().decorate(
            "GENERAL",
            Decoration::ColorPrefix {
                color_rule: "COLOR",
                lead_rule: Some("CONDITION"),
            },
        );
        assert!(matches!(
            transformer.rule("GENERAL"),
            Err(GrammarError::Decoration { .. })
        ));
    }
}
