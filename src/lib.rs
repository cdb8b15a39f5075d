//! Shortex - ASCII math shorthand to LaTeX converter
//!
//! Users type linear shorthand such as `a/b`, `&{1,2;3,4}` or `x(_)` and
//! Shortex rewrites it into LaTeX math markup.
//!
//! ```
//! use shortex::shorthand_to_latex;
//!
//! assert_eq!(shorthand_to_latex("a/b").unwrap(), "\\frac{a}{b}");
//! ```
//!
//! The structural passes (fractions and blocks) reason about brace nesting
//! and can fail on malformed input; a failure aborts the whole conversion and
//! no partial output is produced.

pub mod core;
pub mod data;
pub mod utils;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use crate::core::{
    match_bracket, rewrite_fractions, rewrite_fractions_bounded, BlockRewriter, S2LOptions,
    ShorthandConverter,
};
pub use crate::data::{PatternKey, PatternTable};
pub use crate::utils::analysis as diagnostics;
pub use crate::utils::{ConversionError, ConversionResult, Direction};

/// Convert shorthand to LaTeX with the default options and pattern table.
pub fn shorthand_to_latex(input: &str) -> ConversionResult<String> {
    ShorthandConverter::default().convert(input)
}

/// Convert shorthand to LaTeX with custom options and the default pattern table.
pub fn shorthand_to_latex_with_options(
    input: &str,
    options: &S2LOptions,
) -> ConversionResult<String> {
    ShorthandConverter::new(PatternTable::global(), options.clone()).convert(input)
}
