//! Tree rewrites
//!
//! Tokens are immutable, so every transform builds a new tree.

pub mod lowercase;

pub use lowercase::lowercase;
