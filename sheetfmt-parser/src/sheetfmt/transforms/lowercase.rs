//! Lower-case rewrite of pattern letters
//!
//! Date and time letters, am-pm markers, color names, the `general` and `color` keywords
//! and exponent symbols are lower-cased. Quoted text, escapes and other literals keep
//! their case since they are printed as written.

use crate::sheetfmt::token::{LeafToken, LeafType, Token};
use crate::sheetfmt::visitor::{Visiting, Visitor};

/// Return a copy of `token` with its pattern letters lower-cased.
pub fn lowercase(token: &Token) -> Token {
    let mut visitor = LowercaseVisitor::default();
    token.accept(&mut visitor);
    visitor.result.unwrap_or_else(|| token.clone())
}

/// Rebuilds the tree bottom-up. Each open parent owns a frame collecting its rewritten
/// children; closing the parent turns the frame into the new parent.
#[derive(Default)]
struct LowercaseVisitor {
    stack: Vec<Vec<Token>>,
    result: Option<Token>,
}

impl LowercaseVisitor {
    fn emit(&mut self, token: Token) {
        match self.stack.last_mut() {
            Some(children) => children.push(token),
            None => self.result = Some(token),
        }
    }
}

impl Visitor for LowercaseVisitor {
    fn start_visit_token(&mut self, token: &Token) -> Visiting {
        match token {
            Token::Leaf(leaf) => self.emit(lower_leaf(leaf).unwrap_or_else(|| token.clone())),
            Token::Parent(_) => self.stack.push(Vec::new()),
        }
        Visiting::Continue
    }

    fn end_visit_token(&mut self, token: &Token) {
        if let Token::Parent(parent) = token {
            let children = self.stack.pop().unwrap_or_default();
            self.emit(Token::rebuilt(parent.token_type(), children));
        }
    }
}

fn lowers(token_type: LeafType) -> bool {
    matches!(
        token_type,
        LeafType::AmPm
            | LeafType::ColorLiteralSymbol
            | LeafType::ColorName
            | LeafType::Day
            | LeafType::ExponentSymbol
            | LeafType::GeneralSymbol
            | LeafType::Hour
            | LeafType::MonthOrMinute
            | LeafType::Second
            | LeafType::Year
    )
}

fn lower_leaf(leaf: &LeafToken) -> Option<Token> {
    if !lowers(leaf.token_type()) {
        return None;
    }
    let lower = leaf.text().to_lowercase();
    if lower == leaf.text() {
        return None;
    }
    Token::leaf(leaf.token_type(), lower.clone(), lower).ok()
}
