//! Shorthand analysis utilities: basic metrics and linting.
//!
//! Nothing here converts; it reports what the structural passes would trip
//! over, with character positions.

use std::fmt;

use serde::Serialize;

use crate::core::context::S2LOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub position: usize,
    pub message: String,
}

impl Diagnostic {
    fn error(position: usize, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            position,
            message: message.into(),
        }
    }

    fn warning(position: usize, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            position,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == DiagnosticLevel::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            DiagnosticLevel::Error => "error",
            DiagnosticLevel::Warning => "warning",
        };
        write!(f, "{} at {}: {}", level, self.position, self.message)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShorthandMetrics {
    pub fractions: usize,
    pub spaced_slashes: usize,
    pub blocks: usize,
    pub open_braces: usize,
    pub close_braces: usize,
}

/// Report unbalanced braces, unclosed blocks and slashes that will not
/// become fractions. Diagnostics are ordered by position.
pub fn check_shorthand(source: &str, options: &S2LOptions) -> Vec<Diagnostic> {
    let text: Vec<char> = source.chars().collect();
    let mut diagnostics = Vec::new();
    let mut open = Vec::new();

    for (i, &ch) in text.iter().enumerate() {
        match ch {
            '{' => open.push(i),
            '}' => {
                if open.pop().is_none() {
                    diagnostics.push(Diagnostic::error(i, "closing brace has no opening brace"));
                }
            }
            '/' if is_spaced_slash(&text, i) => {
                diagnostics.push(Diagnostic::warning(
                    i,
                    "'/' next to whitespace is left as a plain slash",
                ));
            }
            _ => {}
        }
    }

    for pos in open {
        let block = pos
            .checked_sub(1)
            .and_then(|p| options.blocks.iter().find(|b| b.prefix == text[p]));
        let message = match block {
            Some(block) => format!("{} block is never closed", block.title),
            None => "opening brace is never closed".to_string(),
        };
        diagnostics.push(Diagnostic::error(pos, message));
    }

    diagnostics.sort_by_key(|d| d.position);
    diagnostics
}

pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}

pub fn metrics_source(source: &str, options: &S2LOptions) -> ShorthandMetrics {
    let text: Vec<char> = source.chars().collect();
    let mut metrics = ShorthandMetrics::default();

    for (i, &ch) in text.iter().enumerate() {
        match ch {
            '{' => metrics.open_braces += 1,
            '}' => metrics.close_braces += 1,
            '/' if is_spaced_slash(&text, i) => metrics.spaced_slashes += 1,
            '/' if i > 0 && i + 1 < text.len() => metrics.fractions += 1,
            _ => {}
        }
    }

    metrics.blocks = text
        .windows(2)
        .filter(|w| w[1] == '{' && options.blocks.iter().any(|b| b.prefix == w[0]))
        .count();

    metrics
}

fn is_spaced_slash(text: &[char], i: usize) -> bool {
    let before = i.checked_sub(1).map(|p| text[p]);
    let after = text.get(i + 1).copied();
    [before, after]
        .into_iter()
        .flatten()
        .any(char::is_whitespace)
}
