//! Fraction rewriting: `a/b` → `\frac{a}{b}`
//!
//! The pass repeatedly picks the first division operator with non-blank
//! neighbours, walks outwards to the outermost division enclosing it, and
//! splices in a `\frac` command for that division. Inner divisions stay in the
//! (now braced) operands and are picked up by later iterations, so nested
//! chains resolve outermost-first.

use log::trace;

use super::brackets::{is_single_group, match_bracket};
use crate::utils::error::{ConversionError, ConversionResult, Direction};

/// Inclusive character span of one operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperandSpan {
    pub start: usize,
    pub end: usize,
}

/// A resolved division: operator index plus both operand spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    pub operator: usize,
    pub numerator: OperandSpan,
    pub denominator: OperandSpan,
}

/// Rewrite every division in `input` into a `\frac` command.
///
/// The number of rewrites is bounded by the number of `/` characters in the
/// input, since each rewrite consumes exactly one operator.
pub fn rewrite_fractions(input: &str) -> ConversionResult<String> {
    let limit = input.chars().filter(|&c| c == '/').count();
    rewrite_fractions_bounded(input, limit)
}

/// Same as [`rewrite_fractions`] but fails with
/// [`ConversionError::FixpointLimit`] after `limit` rewrites.
pub fn rewrite_fractions_bounded(input: &str, limit: usize) -> ConversionResult<String> {
    let mut text: Vec<char> = input.chars().collect();
    let mut rewrites = 0usize;

    while let Some(candidate) = find_candidate(&text) {
        if rewrites >= limit {
            return Err(ConversionError::FixpointLimit { limit });
        }
        let root = resolve_root(&text, candidate)?;
        let fraction = resolve_operands(&text, root)?;
        trace!(
            "fraction at {} (found {}): [{}..={}] / [{}..={}]",
            fraction.operator,
            candidate,
            fraction.numerator.start,
            fraction.numerator.end,
            fraction.denominator.start,
            fraction.denominator.end
        );
        text = splice(&text, &fraction);
        rewrites += 1;
    }

    Ok(text.into_iter().collect())
}

/// A `/` at `loc` with a non-blank character on each side.
fn is_candidate(text: &[char], loc: usize) -> bool {
    loc > 0
        && loc + 1 < text.len()
        && text[loc] == '/'
        && !text[loc - 1].is_whitespace()
        && !text[loc + 1].is_whitespace()
}

/// Lowest index holding a fraction candidate.
pub fn find_candidate(text: &[char]) -> Option<usize> {
    (1..text.len().saturating_sub(1)).find(|&i| is_candidate(text, i))
}

/// Walk outwards from `start` to the outermost division whose operand
/// contains it.
pub fn resolve_root(text: &[char], start: usize) -> ConversionResult<usize> {
    let mut loc = start;
    // Every step leaves at least one enclosing brace pair behind.
    for _ in 0..=text.len() {
        match enclosing_operator(text, loc)? {
            Some(parent) => loc = parent,
            None => return Ok(loc),
        }
    }
    Err(ConversionError::invariant(
        start,
        "division root resolution did not settle",
    ))
}

fn enclosing_operator(text: &[char], loc: usize) -> ConversionResult<Option<usize>> {
    // `{...loc...}/` : loc sits in the numerator of the operator after `}`
    for j in loc + 1..text.len().saturating_sub(1) {
        if text[j] == '}' && is_candidate(text, j + 1) {
            let open = match_bracket(text, j, Direction::Left)?;
            if open < loc {
                return Ok(Some(j + 1));
            }
        }
    }

    // `/{...loc...}` : loc sits in the denominator of the operator before `{`
    for j in (1..loc).rev() {
        if text[j] == '{' && is_candidate(text, j - 1) {
            let close = match_bracket(text, j, Direction::Right)?;
            if close > loc {
                return Ok(Some(j - 1));
            }
        }
    }

    Ok(None)
}

/// Determine both operand spans of the division at `root`.
pub fn resolve_operands(text: &[char], root: usize) -> ConversionResult<Fraction> {
    if !is_candidate(text, root) {
        return Err(ConversionError::invariant(
            root,
            "division operator has no operand on one side",
        ));
    }

    let denominator = match text[root + 1] {
        '{' => OperandSpan {
            start: root + 1,
            end: match_bracket(text, root + 1, Direction::Right)?,
        },
        '}' => {
            return Err(ConversionError::invariant(
                root + 1,
                "denominator starts with a closing brace",
            ))
        }
        _ => OperandSpan {
            start: root + 1,
            end: bare_end(text, root + 1)?,
        },
    };

    let numerator = match text[root - 1] {
        '}' => OperandSpan {
            start: match_bracket(text, root - 1, Direction::Left)?,
            end: root - 1,
        },
        '{' => {
            return Err(ConversionError::invariant(
                root - 1,
                "numerator ends with an opening brace",
            ))
        }
        _ => OperandSpan {
            start: bare_start(text, root - 1)?,
            end: root - 1,
        },
    };

    Ok(Fraction {
        operator: root,
        numerator,
        denominator,
    })
}

/// Extend a bare denominator forward until whitespace, an enclosing `}`, or
/// the end of the buffer. Brace groups inside the run are skipped whole.
fn bare_end(text: &[char], from: usize) -> ConversionResult<usize> {
    let mut i = from;
    while i < text.len() && !text[i].is_whitespace() && text[i] != '}' {
        if text[i] == '{' {
            i = match_bracket(text, i, Direction::Right)?;
        }
        i += 1;
    }
    Ok(i - 1)
}

/// Extend a bare numerator backward until whitespace, an enclosing `{`, or
/// the start of the buffer. Brace groups inside the run are skipped whole.
fn bare_start(text: &[char], from: usize) -> ConversionResult<usize> {
    let mut i = from;
    loop {
        if text[i] == '}' {
            i = match_bracket(text, i, Direction::Left)?;
        }
        if i == 0 || text[i - 1].is_whitespace() || text[i - 1] == '{' {
            return Ok(i);
        }
        i -= 1;
    }
}

fn splice(text: &[char], fraction: &Fraction) -> Vec<char> {
    let num = &text[fraction.numerator.start..=fraction.numerator.end];
    let den = &text[fraction.denominator.start..=fraction.denominator.end];

    let mut out = Vec::with_capacity(text.len() + 9);
    out.extend_from_slice(&text[..fraction.numerator.start]);
    out.extend("\\frac".chars());
    push_group(&mut out, num);
    push_group(&mut out, den);
    out.extend_from_slice(&text[fraction.denominator.end + 1..]);
    out
}

/// Append `operand` as a brace group, unless it already is exactly one.
fn push_group(out: &mut Vec<char>, operand: &[char]) {
    if is_single_group(operand) {
        out.extend_from_slice(operand);
    } else {
        out.push('{');
        out.extend_from_slice(operand);
        out.push('}');
    }
}
