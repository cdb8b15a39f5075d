//! Named pattern table used by the substitution passes
//!
//! The default table is compiled once on first use and shared read-only.
//! Callers that need different patterns build their own table with
//! [`PatternTable::with_pattern`] and pass it to the converter.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use super::symbols::{FUNCTION_NAMES, GREEK_LETTERS, LOGIC_NAMES};
use crate::utils::error::{ConversionError, ConversionResult};

/// Name of an entry in the [`PatternTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKey {
    /// `bbR` → `\mathbb{R}`; group 1 is the letter, group 2 what follows it
    Mathbb,
    /// `ccF` → `\mathcal{F}`; groups as for `Mathbb`
    Mathcal,
    /// Function names; group 1 is the preceding character, group 2 the name.
    /// The pass skips names directly followed by another letter.
    Function,
    /// Logic words; groups as for `Function`
    Logic,
    /// Greek letter names; groups as for `Function`
    Letter,
    /// `"..."` free text; group 1 is the text
    Text,
    /// Atom followed by a sized decoration marker; group 1 is the atom,
    /// group 2 the marker
    Shape,
}

impl PatternKey {
    pub const ALL: [PatternKey; 7] = [
        PatternKey::Mathbb,
        PatternKey::Mathcal,
        PatternKey::Function,
        PatternKey::Logic,
        PatternKey::Letter,
        PatternKey::Text,
        PatternKey::Shape,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PatternKey::Mathbb => "mathbb",
            PatternKey::Mathcal => "mathcal",
            PatternKey::Function => "function",
            PatternKey::Logic => "logic",
            PatternKey::Letter => "letter",
            PatternKey::Text => "text",
            PatternKey::Shape => "shape",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }

    /// Source of the built-in pattern for this key.
    pub fn default_source(&self) -> String {
        match self {
            PatternKey::Mathbb => r"\bbb([A-Z])([^A-Za-z]|$)".to_string(),
            PatternKey::Mathcal => r"\bcc([A-Z])([^A-Za-z]|$)".to_string(),
            PatternKey::Function => word_pattern(FUNCTION_NAMES),
            PatternKey::Logic => word_pattern(LOGIC_NAMES),
            PatternKey::Letter => word_pattern(GREEK_LETTERS),
            PatternKey::Text => r#""([^"]*)""#.to_string(),
            PatternKey::Shape => {
                r"(\\[A-Za-z]+|[A-Za-z0-9]|\{[^{}]*\})\\left\((_|->|\\to|\^|~|\.)\\right\)"
                    .to_string()
            }
        }
    }
}

impl fmt::Display for PatternKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Words not already preceded by a backslash or another letter.
fn word_pattern(words: &[&str]) -> String {
    format!(r"(^|[^\\A-Za-z])({})", words.join("|"))
}

lazy_static! {
    static ref DEFAULT_TABLE: PatternTable = PatternTable::compile_defaults();
}

/// Compiled patterns keyed by [`PatternKey`].
#[derive(Debug, Clone)]
pub struct PatternTable {
    mathbb: Regex,
    mathcal: Regex,
    function: Regex,
    logic: Regex,
    letter: Regex,
    text: Regex,
    shape: Regex,
}

impl PatternTable {
    /// The shared built-in table.
    pub fn global() -> &'static PatternTable {
        &DEFAULT_TABLE
    }

    fn compile_defaults() -> Self {
        let compile = |key: PatternKey| {
            Regex::new(&key.default_source()).expect("built-in pattern must compile")
        };
        Self {
            mathbb: compile(PatternKey::Mathbb),
            mathcal: compile(PatternKey::Mathcal),
            function: compile(PatternKey::Function),
            logic: compile(PatternKey::Logic),
            letter: compile(PatternKey::Letter),
            text: compile(PatternKey::Text),
            shape: compile(PatternKey::Shape),
        }
    }

    pub fn get(&self, key: PatternKey) -> &Regex {
        match key {
            PatternKey::Mathbb => &self.mathbb,
            PatternKey::Mathcal => &self.mathcal,
            PatternKey::Function => &self.function,
            PatternKey::Logic => &self.logic,
            PatternKey::Letter => &self.letter,
            PatternKey::Text => &self.text,
            PatternKey::Shape => &self.shape,
        }
    }

    /// Replace one entry with a custom pattern.
    pub fn with_pattern(mut self, key: PatternKey, source: &str) -> ConversionResult<Self> {
        let regex = Regex::new(source).map_err(|e| {
            ConversionError::config(format!("pattern '{}' does not compile: {}", key, e))
        })?;
        let slot = match key {
            PatternKey::Mathbb => &mut self.mathbb,
            PatternKey::Mathcal => &mut self.mathcal,
            PatternKey::Function => &mut self.function,
            PatternKey::Logic => &mut self.logic,
            PatternKey::Letter => &mut self.letter,
            PatternKey::Text => &mut self.text,
            PatternKey::Shape => &mut self.shape,
        };
        *slot = regex;
        Ok(self)
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::global().clone()
    }
}
