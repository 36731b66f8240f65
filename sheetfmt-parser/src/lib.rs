//! # sheetfmt
//!
//! A parser for spreadsheet format patterns: the mini-language spreadsheets use to describe
//! how numbers, dates, times, fractions and text render (`$#,##0.00`, `dd/mm/yyyy`,
//! `[RED][>100]0.00;[BLUE]0.00`).
//!
//! Layout
//!
//! src/sheetfmt
//!   ├── token       The typed token tree (leaf and parent tokens)
//!   ├── grammar     EBNF grammar definition, its transformer and the named parsers
//!   ├── parsing     Entry points and parse errors
//!   ├── visitor     Traversal of token trees
//!   ├── kind        Semantic classification of tokens
//!   ├── transforms  Tree to tree rewrites (case lowering)
//!   └── formats     Output formats (treeviz, json, yaml, kinds)
//!
//! For testing helpers see the [testing module](sheetfmt::testing).

pub mod sheetfmt;
