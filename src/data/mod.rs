//! Static data for the substitution passes
//!
//! - `symbols`: word lists and literal replacement tables
//! - `patterns`: compiled regular expressions built from those tables

pub mod patterns;
pub mod symbols;

pub use patterns::{PatternKey, PatternTable};
