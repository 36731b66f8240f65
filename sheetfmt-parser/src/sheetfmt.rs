//! Main module for sheetfmt library functionality

pub mod context;
pub mod formats;
pub mod grammar;
pub mod kind;
pub mod parsing;
pub mod predicate;
pub mod testing;
pub mod token;
pub mod transforms;
pub mod visitor;
