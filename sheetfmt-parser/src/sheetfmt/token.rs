//! Token tree for spreadsheet format patterns
//!
//!     Parsing a pattern produces a tree of immutable tokens. Every token pairs a semantic
//!     value with the exact source text it was parsed from, so printing a tree always gives
//!     back the original pattern.
//!
//! Leaves and Parents
//!
//!     Leaf tokens are the smallest grammatical units: symbols with a fixed text (`[`, `;`,
//!     `>=`), letter runs (`dd`, `yyyy`), digit placeholders (`#`, `0`, `?`) and literals
//!     (`"kg"`, `\-`). Their value is a string, a char, an integer or a decimal depending on
//!     the type.
//!
//!     Parent tokens group an ordered, non-empty list of children: a whole date section, a
//!     color such as `[RED]`, a condition such as `[>100]`. The parent's text is always the
//!     concatenation of its children's texts.
//!
//!         [RED]0.00
//!         number
//!           ├─ color
//!           │    ├─ bracket-open-symbol  "["
//!           │    ├─ color-name           "RED"
//!           │    └─ bracket-close-symbol "]"
//!           ├─ digit-zero "0"
//!           ├─ decimal-point "."
//!           ├─ digit-zero "0"
//!           └─ digit-zero "0"
//!
//! Construction
//!
//!     Tokens are built by the parsers or through the factories on [Token]. Factories
//!     validate the text against the type (a `day` is a run of `d`, a `color` holds exactly
//!     one name or number) and fail with a [TokenError] otherwise. Once built a token never
//!     changes; rewrites such as [lowercase](crate::sheetfmt::transforms::lowercase) build a
//!     new tree.
//!
//!     Equality and hashing are structural: same type, same text, same value (children
//!     compared in order).
//!
//! Persistence
//!
//!     Every token marshalls to JSON as `{"type": ..., "value": ..., "text": ...}` and
//!     unmarshalls back through the same validating factories. See [json].

pub mod core;
pub mod error;
pub mod json;
pub mod types;
pub mod value;

pub use self::core::{LeafToken, ParentToken, Token, TokenValue};
pub use error::TokenError;
pub use json::{marshall, unmarshall};
pub use types::{ConditionRelation, LeafType, ParentType};
pub use value::LeafValue;
