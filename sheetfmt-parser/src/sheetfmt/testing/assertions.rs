//! Fluent assertions over a single token and its descendants

use crate::sheetfmt::kind::Kind;
use crate::sheetfmt::token::{ConditionRelation, LeafType, LeafValue, ParentType, Token};
use bigdecimal::BigDecimal;

/// How a token text is compared
#[derive(Debug, Clone)]
pub enum TextMatch {
    Exact(String),
    StartsWith(String),
    Contains(String),
}

impl TextMatch {
    pub fn matches(&self, actual: &str) -> bool {
        match self {
            TextMatch::Exact(expected) => actual == expected,
            TextMatch::StartsWith(prefix) => actual.starts_with(prefix),
            TextMatch::Contains(substring) => actual.contains(substring),
        }
    }

    fn describe(&self) -> String {
        match self {
            TextMatch::Exact(expected) => format!("text {expected:?}"),
            TextMatch::StartsWith(prefix) => format!("text starting with {prefix:?}"),
            TextMatch::Contains(substring) => format!("text containing {substring:?}"),
        }
    }

    pub fn assert(&self, actual: &str, context: &str) {
        assert!(
            self.matches(actual),
            "{context}: expected {}, found {actual:?}",
            self.describe()
        );
    }
}

/// Start an assertion chain on `token`.
pub fn assert_token(token: &Token) -> TokenAssertion<'_> {
    TokenAssertion {
        context: token.type_name().to_string(),
        token,
    }
}

pub struct TokenAssertion<'a> {
    token: &'a Token,
    context: String,
}

impl<'a> TokenAssertion<'a> {
    pub fn token(&self) -> &'a Token {
        self.token
    }

    pub fn parent(self, expected: ParentType) -> Self {
        assert_eq!(
            self.token.parent_type(),
            Some(expected),
            "{}: expected a {} parent, found {}",
            self.context,
            expected.name(),
            self.token.type_name()
        );
        self
    }

    pub fn leaf(self, expected: LeafType) -> Self {
        assert_eq!(
            self.token.leaf_type(),
            Some(expected),
            "{}: expected a {} leaf, found {}",
            self.context,
            expected.name(),
            self.token.type_name()
        );
        self
    }

    pub fn text(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(self.token.text(), &self.context);
        self
    }

    pub fn text_starts_with(self, prefix: &str) -> Self {
        TextMatch::StartsWith(prefix.to_string()).assert(self.token.text(), &self.context);
        self
    }

    pub fn text_contains(self, substring: &str) -> Self {
        TextMatch::Contains(substring.to_string()).assert(self.token.text(), &self.context);
        self
    }

    /// Leaf value check. Panics on parents.
    pub fn value(self, expected: impl Into<LeafValue>) -> Self {
        let expected = expected.into();
        match self.token.as_leaf() {
            Some(leaf) => assert_eq!(
                leaf.value(),
                &expected,
                "{}: unexpected value",
                self.context
            ),
            None => panic!("{}: expected a leaf with value {expected}", self.context),
        }
        self
    }

    pub fn kind(self, expected: Kind) -> Self {
        assert_eq!(
            self.token.kind(),
            Some(expected),
            "{}: unexpected kind",
            self.context
        );
        self
    }

    /// Condition parent with the given relation and compared number.
    pub fn condition(self, relation: ConditionRelation, value: BigDecimal) -> Self {
        assert_eq!(
            self.token.condition_relation(),
            Some(relation),
            "{}: expected a {relation:?} condition, found {}",
            self.context,
            self.token.type_name()
        );
        assert_eq!(
            self.token.condition_value(),
            Some(&value),
            "{}: unexpected condition value",
            self.context
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.token.children().len();
        assert_eq!(
            actual, expected,
            "{}: expected {expected} children, found {actual}",
            self.context
        );
        self
    }

    /// Type names of the direct children, in order.
    pub fn child_types(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self
            .token
            .children()
            .iter()
            .map(Token::type_name)
            .collect();
        assert_eq!(actual, expected, "{}: unexpected children", self.context);
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(TokenAssertion<'a>) -> TokenAssertion<'a>,
    {
        let children = self.token.children();
        let child = children.get(index).unwrap_or_else(|| {
            panic!(
                "{}: no child {index}, only {} children",
                self.context,
                children.len()
            )
        });
        assertion(TokenAssertion {
            context: format!("{}[{index}] {}", self.context, child.type_name()),
            token: child,
        });
        self
    }

    /// Run `assertion` on the last child.
    pub fn last_child<F>(self, assertion: F) -> Self
    where
        F: FnOnce(TokenAssertion<'a>) -> TokenAssertion<'a>,
    {
        let count = self.token.children().len();
        assert!(count > 0, "{}: no children", self.context);
        self.child(count - 1, assertion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheetfmt::parsing::parse_pattern;

    #[test]
    fn test_fluent_chain() {
        let token = parse_pattern("[RED][>100]0.00").unwrap();
        assert_token(&token)
            .parent(ParentType::Expression)
            .child_count(1)
            .child(0, |number| {
                number
                    .parent(ParentType::Number)
                    .text("[RED][>100]0.00")
                    .child_types(&[
                        "color",
                        "greater-than",
                        "digit-zero",
                        "decimal-point",
                        "digit-zero",
                        "digit-zero",
                    ])
                    .child(0, |color| color.kind(Kind::ColorName))
                    .child(1, |condition| {
                        condition.condition(ConditionRelation::GreaterThan, BigDecimal::from(100))
                    })
                    .last_child(|zero| zero.leaf(LeafType::DigitZero).value("0"))
            });
    }

    #[test]
    #[should_panic(expected = "expected a date parent")]
    fn test_wrong_type_panics() {
        let token = parse_pattern("0").unwrap();
        assert_token(&token).child(0, |child| child.parent(ParentType::Date));
    }

    #[test]
    #[should_panic(expected = "no child 3")]
    fn test_missing_child_panics() {
        let token = parse_pattern("0").unwrap();
        assert_token(&token).child(3, |child| child);
    }

    #[test]
    fn test_text_match() {
        assert!(TextMatch::StartsWith("[R".into()).matches("[RED]"));
        assert!(TextMatch::Contains("ED".into()).matches("[RED]"));
        assert!(!TextMatch::Exact("[RED".into()).matches("[RED]"));
    }
}
