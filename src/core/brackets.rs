//! Brace matching over a character buffer
//!
//! All structural passes index the buffer by decoded `char`, never by byte,
//! so multi-byte characters in the input are never split.

use crate::utils::error::{ConversionError, ConversionResult, Direction};

/// Find the brace that structurally matches the one at `position`.
///
/// For a [`Direction::Right`] scan `position` must hold a `{`; for a
/// [`Direction::Left`] scan it must hold a `}`. The scan starts one step away
/// at depth 1 and returns the index where the depth first returns to zero.
///
/// A `{` in the last slot has nowhere to scan and is a boundary error. A `}`
/// at index 0 cannot have an opener, so it is reported as unbalanced.
pub fn match_bracket(text: &[char], position: usize, direction: Direction) -> ConversionResult<usize> {
    let expected = match direction {
        Direction::Right => '{',
        Direction::Left => '}',
    };

    if position >= text.len() || text[position] != expected {
        return Err(ConversionError::invariant(
            position,
            format!("expected '{}' to start a {} brace scan", expected, direction),
        ));
    }
    if direction == Direction::Right && position + 1 == text.len() {
        return Err(ConversionError::boundary(position));
    }

    let mut depth = 1usize;
    let mut i = position;
    loop {
        i = match direction {
            Direction::Right => i + 1,
            Direction::Left => match i.checked_sub(1) {
                Some(prev) => prev,
                None => return Err(ConversionError::unbalanced(position, direction)),
            },
        };
        let Some(&ch) = text.get(i) else {
            return Err(ConversionError::unbalanced(position, direction));
        };

        let opens = match direction {
            Direction::Right => '{',
            Direction::Left => '}',
        };
        if ch == opens {
            depth += 1;
        } else if ch == '{' || ch == '}' {
            depth -= 1;
            if depth == 0 {
                return Ok(i);
            }
        }
    }
}

/// Check whether `text` is exactly one brace group: it opens with `{` and the
/// matching `}` is its last character.
pub fn is_single_group(text: &[char]) -> bool {
    if text.len() < 2 || text[0] != '{' {
        return false;
    }
    matches!(match_bracket(text, 0, Direction::Right), Ok(end) if end == text.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_match_right_simple() {
        let text = chars("{abc}");
        assert_eq!(match_bracket(&text, 0, Direction::Right), Ok(4));
    }

    #[test]
    fn test_match_right_nested() {
        let text = chars("x{a{b}{c{d}}}y");
        assert_eq!(match_bracket(&text, 1, Direction::Right), Ok(12));
        assert_eq!(match_bracket(&text, 3, Direction::Right), Ok(5));
        assert_eq!(match_bracket(&text, 8, Direction::Right), Ok(10));
    }

    #[test]
    fn test_match_left_nested() {
        let text = chars("x{a{b}{c{d}}}y");
        assert_eq!(match_bracket(&text, 12, Direction::Left), Ok(1));
        assert_eq!(match_bracket(&text, 11, Direction::Left), Ok(6));
    }

    #[test]
    fn test_round_trip() {
        for input in ["{a}", "{{a}{b}}", "p{q{r}s}t", "{}{}", "{a{b{c{d}}}}"] {
            let text = chars(input);
            for (open, _) in text.iter().enumerate().filter(|(_, c)| **c == '{') {
                let close = match_bracket(&text, open, Direction::Right).unwrap();
                assert_eq!(
                    match_bracket(&text, close, Direction::Left),
                    Ok(open),
                    "round trip failed for {} at {}",
                    input,
                    open
                );
            }
        }
    }

    #[test]
    fn test_boundary_error() {
        let text = chars("ab{");
        assert_eq!(
            match_bracket(&text, 2, Direction::Right),
            Err(ConversionError::boundary(2))
        );
    }

    #[test]
    fn test_leading_close_is_unbalanced() {
        let text = chars("}ab");
        assert_eq!(
            match_bracket(&text, 0, Direction::Left),
            Err(ConversionError::unbalanced(0, Direction::Left))
        );
    }

    #[test]
    fn test_unbalanced_error() {
        let text = chars("{a{b}");
        assert_eq!(
            match_bracket(&text, 0, Direction::Right),
            Err(ConversionError::unbalanced(0, Direction::Right))
        );
        let text = chars("a}b}");
        assert_eq!(
            match_bracket(&text, 3, Direction::Left),
            Err(ConversionError::unbalanced(3, Direction::Left))
        );
    }

    #[test]
    fn test_wrong_start_character() {
        let text = chars("abc");
        assert!(matches!(
            match_bracket(&text, 1, Direction::Right),
            Err(ConversionError::InternalInvariant { position: 1, .. })
        ));
    }

    #[test]
    fn test_multibyte_indices() {
        let text = chars("α{β}γ");
        assert_eq!(match_bracket(&text, 1, Direction::Right), Ok(3));
    }

    #[test]
    fn test_is_single_group() {
        assert!(is_single_group(&chars("{a}")));
        assert!(is_single_group(&chars("{a{b}c}")));
        assert!(!is_single_group(&chars("{a}+{b}")));
        assert!(!is_single_group(&chars("a")));
        assert!(!is_single_group(&chars("{a")));
    }
}
