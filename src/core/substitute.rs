//! Table-driven substitution passes
//!
//! These passes are context free: each one is a literal or regex replacement
//! and none of them can fail. A pattern that does not match is a no-op.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::data::patterns::{PatternKey, PatternTable};
use crate::data::symbols::{SHAPE_COMMANDS, SYMBOLS};

lazy_static! {
    static ref INFINITY: Regex = Regex::new(r"(^|[^\\A-Za-z])(inf)").unwrap();
    static ref DOUBLE_PIPE_OPEN: Regex = Regex::new(r"(\s|^)\|\|(\S)").unwrap();
    static ref DOUBLE_PIPE_CLOSE: Regex = Regex::new(r"(\S)\|\|(\s|$)").unwrap();
    static ref PIPE_OPEN: Regex = Regex::new(r"(\s|^)\|(\S)").unwrap();
    static ref PIPE_CLOSE: Regex = Regex::new(r"(\S)\|(\s|$)").unwrap();
}

/// Delimiter pairs sized with `\left` / `\right`.
const SIZED_DELIMITERS: &[(&str, &str)] = &[("(", ")"), ("[", "]"), ("\\{", "\\}")];

// =============================================================================
// Fonts and Commands
// =============================================================================

/// `bbR` → `\mathbb{R}`, `ccF` → `\mathcal{F}`
pub fn replace_fonts(input: &str, patterns: &PatternTable) -> String {
    let out = patterns
        .get(PatternKey::Mathbb)
        .replace_all(input, "\\mathbb{${1}}${2}");
    patterns
        .get(PatternKey::Mathcal)
        .replace_all(&out, "\\mathcal{${1}}${2}")
        .into_owned()
}

/// Prefix function names, logic words and Greek letters with a backslash,
/// then turn `inf` into `\infty`.
pub fn prefix_backslash(input: &str, patterns: &PatternTable) -> String {
    let mut out = input.to_string();
    for key in [PatternKey::Function, PatternKey::Logic, PatternKey::Letter] {
        out = prefix_words(&out, patterns.get(key), None);
    }
    prefix_words(&out, &INFINITY, Some("infty"))
}

/// Put a backslash before every word `re` matches (group 2), optionally
/// renaming it. Words directly followed by another letter are left alone.
fn prefix_words(input: &str, re: &Regex, rename: Option<&str>) -> String {
    re.replace_all(input, |caps: &Captures| {
        let end = caps.get(0).map_or(input.len(), |m| m.end());
        if input[end..].starts_with(|c: char| c.is_ascii_alphabetic()) {
            return caps[0].to_string();
        }
        format!("{}\\{}", &caps[1], rename.unwrap_or(&caps[2]))
    })
    .into_owned()
}

// =============================================================================
// Delimiter Sizing
// =============================================================================

/// `(` → `\left(`, `)` → `\right)`, and likewise for `[ ]` and `\{ \}`.
pub fn size_parentheses(input: &str) -> String {
    let mut out = input.to_string();
    for (open, close) in SIZED_DELIMITERS {
        out = out.replace(open, &format!("\\left{}", open));
        out = out.replace(close, &format!("\\right{}", close));
    }
    out
}

/// Size `|x|` and `||x||` according to which side of the pipe is blank.
pub fn size_pipes(input: &str) -> String {
    let out = DOUBLE_PIPE_OPEN.replace_all(input, " \\left|\\left|${2}");
    let out = DOUBLE_PIPE_CLOSE.replace_all(&out, "${1}\\right|\\right| ");
    let out = PIPE_OPEN.replace_all(&out, " \\left|${2}");
    let out = PIPE_CLOSE.replace_all(&out, "${1}\\right| ");
    // The single-pipe rule also matches the tail of a sized double pipe.
    out.replace("\\right\\right| ", "\\right| ")
}

// =============================================================================
// Decorations, Symbols and Text
// =============================================================================

/// `x(_)` → `\overline{x}`, `v(->)` → `\overrightarrow{v}`, ...
///
/// Runs after delimiter sizing, so the marker is matched in its sized form.
pub fn replace_shapes(input: &str, patterns: &PatternTable) -> String {
    patterns
        .get(PatternKey::Shape)
        .replace_all(input, |caps: &Captures| {
            let atom = &caps[1];
            let marker = &caps[2];
            match SHAPE_COMMANDS.get(marker) {
                Some(command) => {
                    let inner = atom
                        .strip_prefix('{')
                        .and_then(|a| a.strip_suffix('}'))
                        .unwrap_or(atom);
                    format!("\\{}{{{}}}", command, inner)
                }
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Literal symbol table: `=>` → `\implies`, `xx` → `\times`, ...
pub fn replace_symbols(input: &str) -> String {
    SYMBOLS
        .iter()
        .fold(input.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// `"some words"` → `\text{some words}`
pub fn replace_text(input: &str, patterns: &PatternTable) -> String {
    patterns
        .get(PatternKey::Text)
        .replace_all(input, "\\text{${1}}")
        .into_owned()
}
