//! Predicate evaluation over token trees

use crate::sheetfmt::token::{LeafToken, Token};
use crate::sheetfmt::visitor::{Visiting, Visitor};

/// Looks for a token matching a predicate and stops descending once one is found.
pub struct PredicateVisitor<F> {
    predicate: F,
    matched: bool,
}

impl<F: Fn(&Token) -> bool> PredicateVisitor<F> {
    pub fn new(predicate: F) -> Self {
        Self {
            predicate,
            matched: false,
        }
    }

    pub fn matched(&self) -> bool {
        self.matched
    }
}

impl<F: Fn(&Token) -> bool> Visitor for PredicateVisitor<F> {
    fn start_visit_token(&mut self, token: &Token) -> Visiting {
        if self.matched {
            return Visiting::Skip;
        }
        if (self.predicate)(token) {
            self.matched = true;
            return Visiting::Skip;
        }
        Visiting::Continue
    }
}

impl Token {
    /// Whether this token or any descendant satisfies `predicate`.
    pub fn any<F: Fn(&Token) -> bool>(&self, predicate: F) -> bool {
        let mut visitor = PredicateVisitor::new(predicate);
        self.accept(&mut visitor);
        visitor.matched()
    }

    /// The leaves under this token in document order.
    pub fn leaves(&self) -> Vec<&LeafToken> {
        fn collect<'t>(token: &'t Token, leaves: &mut Vec<&'t LeafToken>) {
            match token {
                Token::Leaf(leaf) => leaves.push(leaf),
                Token::Parent(parent) => {
                    for child in parent.children() {
                        collect(child, leaves);
                    }
                }
            }
        }

        let mut leaves = Vec::new();
        collect(self, &mut leaves);
        leaves
    }
}
