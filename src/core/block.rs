//! Delimited block rewriting: `&{1,2;3,4}` → `\begin{matrix} ... \end{matrix}`
//!
//! A block starts at a one-character prefix immediately followed by `{` and
//! ends at the structurally matching `}`. Inside, `,` separates columns and
//! `;` separates rows.

use log::trace;
use serde::{Deserialize, Serialize};

use super::brackets::match_bracket;
use crate::utils::error::{ConversionError, ConversionResult, Direction};

/// Column separator emitted for `,`
pub const COLUMN_SEPARATOR: &str = " & ";
/// Row separator emitted for `;`
pub const ROW_SEPARATOR: &str = "\\\\ ";

/// Rewrites `prefix{...}` regions into a named environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRewriter {
    /// Environment name, e.g. `matrix`
    pub title: String,
    /// Character that opens a block when directly followed by `{`
    pub prefix: char,
}

impl BlockRewriter {
    pub fn new(title: impl Into<String>, prefix: char) -> Self {
        Self {
            title: title.into(),
            prefix,
        }
    }

    /// `&{...}` → `matrix`
    pub fn matrix() -> Self {
        Self::new("matrix", '&')
    }

    /// `@{...}` → `cases`
    pub fn cases() -> Self {
        Self::new("cases", '@')
    }

    /// Reject prefixes and titles that would make the output ill-formed.
    pub fn validate(&self) -> ConversionResult<()> {
        if self.prefix == '{' || self.prefix == '}' || self.prefix.is_whitespace() {
            return Err(ConversionError::config(format!(
                "block prefix {:?} cannot be a brace or whitespace",
                self.prefix
            )));
        }
        if self.title.is_empty() || self.title.contains(['{', '}']) {
            return Err(ConversionError::config(format!(
                "block title {:?} must be a non-empty name without braces",
                self.title
            )));
        }
        Ok(())
    }

    /// Rewrite every block region in `input`.
    ///
    /// Input without any `prefix{` is returned unchanged. A block nested in
    /// another block of the same prefix becomes a nested environment.
    pub fn rewrite(&self, input: &str) -> ConversionResult<String> {
        let text: Vec<char> = input.chars().collect();
        let regions = self.find_regions(&text)?;
        if regions.is_empty() {
            return Ok(input.to_string());
        }

        let mut out = String::with_capacity(input.len() + regions.len() * (2 * self.title.len() + 16));
        let mut cursor = 0;
        for (start, end) in regions {
            trace!("{} block at [{}..={}]", self.title, start, end);
            out.extend(&text[cursor..start]);
            let interior: String = text[start + 2..end].iter().collect();
            self.push_environment(&mut out, &interior)?;
            cursor = end + 1;
        }
        out.extend(&text[cursor..]);

        Ok(out)
    }

    /// Outermost `(start, end)` regions, left to right. `start` is the prefix
    /// index and `end` the matching `}`.
    pub fn find_regions(&self, text: &[char]) -> ConversionResult<Vec<(usize, usize)>> {
        let mut regions = Vec::new();
        let mut i = 0;
        while i + 1 < text.len() {
            if text[i] == self.prefix && text[i + 1] == '{' {
                let end = match_bracket(text, i + 1, Direction::Right)?;
                regions.push((i, end));
                i = end + 1;
            } else {
                i += 1;
            }
        }
        Ok(regions)
    }

    fn push_environment(&self, out: &mut String, interior: &str) -> ConversionResult<()> {
        let interior = self.rewrite(interior)?;
        out.push_str("\\begin{");
        out.push_str(&self.title);
        out.push_str("} ");
        for ch in interior.chars() {
            match ch {
                ',' => out.push_str(COLUMN_SEPARATOR),
                ';' => out.push_str(ROW_SEPARATOR),
                _ => out.push(ch),
            }
        }
        out.push_str(" \\end{");
        out.push_str(&self.title);
        out.push('}');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_matrix() {
        let out = BlockRewriter::matrix().rewrite("&{1,2;3,4}").unwrap();
        assert_eq!(out, "\\begin{matrix} 1 & 2\\\\ 3 & 4 \\end{matrix}");
    }

    #[test]
    fn test_cases() {
        let out = BlockRewriter::cases().rewrite("f(x) = @{x, x>0; -x, x<0}").unwrap();
        assert_eq!(
            out,
            "f(x) = \\begin{cases} x &  x>0\\\\  -x &  x<0 \\end{cases}"
        );
    }

    #[test]
    fn test_no_block_is_unchanged() {
        for block in [
            BlockRewriter::matrix(),
            BlockRewriter::cases(),
            BlockRewriter::new("pmatrix", '%'),
        ] {
            for input in ["", "a+b", "x & y", "{1,2}", "& {1,2}", "\\frac{a}{b}"] {
                assert_eq!(block.rewrite(input).unwrap(), input);
            }
        }
    }

    #[test]
    fn test_multiple_regions_keep_text_between() {
        let out = BlockRewriter::matrix().rewrite("&{1,2} x &{3,4}").unwrap();
        assert_eq!(
            out,
            "\\begin{matrix} 1 & 2 \\end{matrix} x \\begin{matrix} 3 & 4 \\end{matrix}"
        );
    }

    #[test]
    fn test_leading_and_trailing_text() {
        let out = BlockRewriter::matrix().rewrite("A = &{a;b}.").unwrap();
        assert_eq!(out, "A = \\begin{matrix} a\\\\ b \\end{matrix}.");
    }

    #[test]
    fn test_inner_braces_do_not_end_region() {
        let out = BlockRewriter::matrix().rewrite("&{{a},b}").unwrap();
        assert_eq!(out, "\\begin{matrix} {a} & b \\end{matrix}");
    }

    #[test]
    fn test_nested_same_prefix() {
        let out = BlockRewriter::matrix().rewrite("&{&{1,2},3}").unwrap();
        assert_eq!(
            out,
            "\\begin{matrix} \\begin{matrix} 1 & 2 \\end{matrix} & 3 \\end{matrix}"
        );
    }

    #[test]
    fn test_find_regions() {
        let text: Vec<char> = "&{1} &{&{2}}".chars().collect();
        let regions = BlockRewriter::matrix().find_regions(&text).unwrap();
        assert_eq!(regions, vec![(0, 3), (5, 11)]);
    }

    #[test]
    fn test_unclosed_region() {
        assert_eq!(
            BlockRewriter::matrix().rewrite("&{1,2"),
            Err(ConversionError::unbalanced(1, Direction::Right))
        );
    }

    #[test]
    fn test_prefix_brace_at_end() {
        assert_eq!(
            BlockRewriter::cases().rewrite("x @{"),
            Err(ConversionError::boundary(3))
        );
    }

    #[test]
    fn test_validate() {
        assert!(BlockRewriter::matrix().validate().is_ok());
        assert!(BlockRewriter::new("matrix", '{').validate().is_err());
        assert!(BlockRewriter::new("matrix", ' ').validate().is_err());
        assert!(BlockRewriter::new("", '&').validate().is_err());
        assert!(BlockRewriter::new("ma{trix", '&').validate().is_err());
    }
}
