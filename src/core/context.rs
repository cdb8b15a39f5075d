//! Conversion options and the pass pipeline
//!
//! The pass order is fixed. Fractions are rewritten before delimiter sizing so
//! that bare operands are bounded by plain, unsized parenthesis characters, and
//! blocks run last so their separators are not touched by the symbol table.

use log::debug;
use serde::{Deserialize, Serialize};

use super::block::BlockRewriter;
use super::fraction::rewrite_fractions_bounded;
use super::substitute::{
    prefix_backslash, replace_fonts, replace_shapes, replace_symbols, replace_text,
    size_parentheses, size_pipes,
};
use crate::data::patterns::PatternTable;
use crate::utils::error::ConversionResult;

// =============================================================================
// Shorthand → LaTeX Conversion Options
// =============================================================================

/// Options for shorthand to LaTeX conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct S2LOptions {
    /// Wrap parentheses, brackets and pipes in `\left` / `\right`.
    /// Decoration markers like `x(_)` are only recognised in sized form.
    /// Default: true
    pub size_delimiters: bool,

    /// Apply the literal symbol table (`=>` → `\implies`, `.` → `\cdot`, ...)
    /// Default: true
    pub substitute_symbols: bool,

    /// Block environments, applied in order.
    /// Default: `&{...}` → matrix, then `@{...}` → cases
    pub blocks: Vec<BlockRewriter>,

    /// Upper bound on fraction rewrites. `None` uses the number of `/`
    /// characters reaching the fraction pass.
    /// Default: None
    pub max_fraction_rewrites: Option<usize>,
}

impl Default for S2LOptions {
    fn default() -> Self {
        Self {
            size_delimiters: true,
            substitute_symbols: true,
            blocks: vec![BlockRewriter::matrix(), BlockRewriter::cases()],
            max_fraction_rewrites: None,
        }
    }
}

impl S2LOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the structural rewrites plus name prefixing: no delimiter sizing
    /// and no symbol table.
    pub fn minimal() -> Self {
        Self {
            size_delimiters: false,
            substitute_symbols: false,
            ..Self::default()
        }
    }

    /// Check user-supplied values before running any pass.
    pub fn validate(&self) -> ConversionResult<()> {
        self.blocks.iter().try_for_each(BlockRewriter::validate)
    }
}

// =============================================================================
// Converter
// =============================================================================

/// Runs every pass over a shorthand string.
///
/// Holds a borrowed [`PatternTable`] so one compiled table can serve any
/// number of converters.
#[derive(Debug, Clone)]
pub struct ShorthandConverter<'a> {
    patterns: &'a PatternTable,
    options: S2LOptions,
}

impl Default for ShorthandConverter<'static> {
    fn default() -> Self {
        Self::new(PatternTable::global(), S2LOptions::default())
    }
}

impl<'a> ShorthandConverter<'a> {
    pub fn new(patterns: &'a PatternTable, options: S2LOptions) -> Self {
        Self { patterns, options }
    }

    pub fn options(&self) -> &S2LOptions {
        &self.options
    }

    /// Convert `input`, or fail without producing any output.
    pub fn convert(&self, input: &str) -> ConversionResult<String> {
        self.options.validate()?;

        let text = replace_fonts(input, self.patterns);
        let text = prefix_backslash(&text, self.patterns);
        debug!("names prefixed: {:?}", text);

        let limit = self
            .options
            .max_fraction_rewrites
            .unwrap_or_else(|| text.chars().filter(|&c| c == '/').count());
        let mut text = rewrite_fractions_bounded(&text, limit)?;
        debug!("fractions rewritten: {:?}", text);

        if self.options.size_delimiters {
            text = size_pipes(&size_parentheses(&text));
        }
        text = replace_shapes(&text, self.patterns);
        if self.options.substitute_symbols {
            text = replace_symbols(&text);
        }
        text = replace_text(&text, self.patterns);
        debug!("substitutions applied: {:?}", text);

        for block in &self.options.blocks {
            text = block.rewrite(&text)?;
        }
        debug!("blocks rewritten: {:?}", text);

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{ConversionError, Direction};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_options() {
        let options = S2LOptions::default();
        assert!(options.size_delimiters);
        assert!(options.substitute_symbols);
        assert_eq!(options.blocks, vec![BlockRewriter::matrix(), BlockRewriter::cases()]);
        assert_eq!(options.max_fraction_rewrites, None);
    }

    #[test]
    fn test_new_matches_default() {
        assert_eq!(S2LOptions::new(), S2LOptions::default());
        let conv = ShorthandConverter::new(PatternTable::global(), S2LOptions::minimal());
        assert!(!conv.options().size_delimiters);
    }

    #[test]
    fn test_error_position_is_buffer_offset() {
        // After the first splice the buffer is `\frac{a}{/b}`, and the second
        // `/` has an opening brace as its numerator.
        let err = ShorthandConverter::default().convert("a//b").unwrap_err();
        assert_eq!(err.kind(), "internal-invariant");
        assert_eq!(err.position(), Some(8));
    }

    #[test]
    fn test_options_from_json() {
        let options: S2LOptions =
            serde_json::from_str(r#"{"size_delimiters": false, "blocks": [{"title": "pmatrix", "prefix": "%"}]}"#)
                .unwrap();
        assert!(!options.size_delimiters);
        assert!(options.substitute_symbols);
        assert_eq!(options.blocks, vec![BlockRewriter::new("pmatrix", '%')]);
    }

    #[test]
    fn test_fraction_before_sizing() {
        let conv = ShorthandConverter::default();
        assert_eq!(
            conv.convert("(a+b)/2").unwrap(),
            "\\frac{\\left(a+b\\right)}{2}"
        );
    }

    #[test]
    fn test_minimal_pipeline() {
        let conv = ShorthandConverter::new(PatternTable::global(), S2LOptions::minimal());
        assert_eq!(conv.convert("f(x)/2 => y").unwrap(), "\\frac{f(x)}{2} => y");
    }

    #[test]
    fn test_blocks_after_symbols() {
        let conv = ShorthandConverter::default();
        assert_eq!(
            conv.convert("&{a,b;c,d}").unwrap(),
            "\\begin{matrix} a & b\\\\ c & d \\end{matrix}"
        );
    }

    #[test]
    fn test_error_aborts_conversion() {
        let conv = ShorthandConverter::default();
        assert_eq!(
            conv.convert("a/{b"),
            Err(ConversionError::unbalanced(2, Direction::Right))
        );
    }

    #[test]
    fn test_invalid_block_option() {
        let options = S2LOptions {
            blocks: vec![BlockRewriter::new("matrix", '{')],
            ..S2LOptions::default()
        };
        let conv = ShorthandConverter::new(PatternTable::global(), options);
        assert_eq!(conv.convert("x").unwrap_err().kind(), "config");
    }

    #[test]
    fn test_fraction_limit_option() {
        let options = S2LOptions {
            max_fraction_rewrites: Some(1),
            ..S2LOptions::default()
        };
        let conv = ShorthandConverter::new(PatternTable::global(), options);
        assert_eq!(
            conv.convert("a/b/c"),
            Err(ConversionError::FixpointLimit { limit: 1 })
        );
    }
}
