//! Testing utilities for token trees
//!
//!     Walking a token tree by hand in a test takes a match per level and buries what is
//!     being checked. The fluent assertions here check type, text, value and children of a
//!     whole tree in one expression, and name the path of the failing token in the panic
//!     message:
//!
//!     ```rust,ignore
//!     use crate::sheetfmt::testing::assert_token;
//!     use crate::sheetfmt::token::{LeafType, ParentType};
//!
//!     let token = parse_pattern("[RED]0.00").unwrap();
//!     assert_token(&token)
//!         .parent(ParentType::Expression)
//!         .child(0, |number| {
//!             number
//!                 .parent(ParentType::Number)
//!                 .child_count(5)
//!                 .child(0, |color| color.parent(ParentType::Color).text("[RED]"))
//!                 .child(2, |point| point.leaf(LeafType::DecimalPoint))
//!         });
//!     ```
//!
//!     Prefer these over `children().len()` style checks: they state the expected shape
//!     and keep working when accessors move.

mod assertions;

pub use assertions::{assert_token, TextMatch, TokenAssertion};
