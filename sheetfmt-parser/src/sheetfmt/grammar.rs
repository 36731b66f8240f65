//! Format pattern grammar
//!
//!     The grammar is data. `format.ebnf` lists the rules of every pattern family in a
//!     small EBNF dialect; [ebnf] reads that text into a [Grammar] and the [Transformer]
//!     turns the rules into chumsky combinators over chars.
//!
//!     pattern text -> [Parsers] (built from Grammar + ParserContext) -> Token tree
//!
//! Terminals
//!
//!     Upper case names the grammar does not define are terminals (see [terminals]). Each
//!     one reads a single leaf token. `SECTION_END` is the one zero-width terminal: it
//!     checks that a section stops right before `;` or the end of the pattern.
//!
//! Families
//!
//!     Each [PatternFamily] is an entry rule. An expression tries the section families in
//!     the order general, fraction, number, date, time, date-time, text and keeps the first
//!     that covers the whole section.
//!
//! The letter `m` is read as a generic month-or-minute leaf. Whether it means month or
//! minute is only decided when kinds are computed (see [kind](crate::sheetfmt::kind)).

pub mod ebnf;
pub mod error;
pub mod parsers;
pub mod terminals;
pub mod transformer;

pub use ebnf::{parse_grammar, Expr, Grammar, Rule};
pub use error::GrammarError;
pub use parsers::{format_grammar, Parsers, PatternFamily, TokenParser, FORMAT_GRAMMAR};
pub use terminals::RuleParser;
pub use transformer::{with_color, Decoration, Transformer};
