//! Shorthand to LaTeX conversion passes
//!
//! - `brackets`: structural brace matching shared by the rewrites below
//! - `fraction`: `a/b` → `\frac{a}{b}`, iterated to a fixpoint
//! - `block`: `&{1,2;3,4}` → matrix and `@{...}` → cases environments
//! - `substitute`: table-driven replacements (fonts, names, sizing, symbols)
//! - `context`: options and the fixed pass pipeline

pub mod block;
pub mod brackets;
pub mod context;
pub mod fraction;
pub mod substitute;

pub use block::BlockRewriter;
pub use brackets::{is_single_group, match_bracket};
pub use context::{S2LOptions, ShorthandConverter};
pub use fraction::{rewrite_fractions, rewrite_fractions_bounded};
