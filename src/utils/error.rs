//! Error handling for Shortex conversions
//!
//! Every structural pass returns a [`ConversionResult`]. A failure aborts the
//! whole conversion; no pass recovers from another pass's error.

use std::fmt;
use thiserror::Error;

/// Direction of a brace scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards higher indices, starting at an opening brace
    Right,
    /// Towards lower indices, starting at a closing brace
    Left,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Right => write!(f, "rightward"),
            Direction::Left => write!(f, "leftward"),
        }
    }
}

/// Conversion error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// A brace scan was requested from the last index, with nothing left to scan
    #[error("brace at position {position} has no room to scan for its match")]
    BoundaryBracket { position: usize },

    /// A brace scan ran off the buffer before the depth returned to zero
    #[error("unbalanced brace: {direction} scan from position {position} never closed")]
    UnbalancedBracket {
        position: usize,
        direction: Direction,
    },

    /// A structural assumption about the buffer did not hold
    #[error("internal invariant violated at position {position}: {message}")]
    InternalInvariant { position: usize, message: String },

    /// The fraction rewrite loop did not reach a fixpoint within its budget
    #[error("fraction rewriting did not converge within {limit} rewrites")]
    FixpointLimit { limit: usize },

    /// Invalid user-supplied options
    #[error("invalid configuration: {message}")]
    Config { message: String },
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

// Convenience constructors for errors
impl ConversionError {
    pub fn boundary(position: usize) -> Self {
        ConversionError::BoundaryBracket { position }
    }

    pub fn unbalanced(position: usize, direction: Direction) -> Self {
        ConversionError::UnbalancedBracket {
            position,
            direction,
        }
    }

    pub fn invariant(position: usize, message: impl Into<String>) -> Self {
        ConversionError::InternalInvariant {
            position,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        ConversionError::Config {
            message: message.into(),
        }
    }

    /// Short stable name of the violated rule, used by the CLI and WASM bindings.
    pub fn kind(&self) -> &'static str {
        match self {
            ConversionError::BoundaryBracket { .. } => "boundary-bracket",
            ConversionError::UnbalancedBracket { .. } => "unbalanced-bracket",
            ConversionError::InternalInvariant { .. } | ConversionError::FixpointLimit { .. } => {
                "internal-invariant"
            }
            ConversionError::Config { .. } => "config",
        }
    }

    /// Character position the error refers to, if any.
    ///
    /// This is an offset into the buffer the failing pass was working on,
    /// not into the caller's input. Earlier passes (name prefixing, earlier
    /// `\frac` splices) shift it, so it only lines up with the input when
    /// the failure happens before anything was rewritten.
    pub fn position(&self) -> Option<usize> {
        match self {
            ConversionError::BoundaryBracket { position }
            | ConversionError::UnbalancedBracket { position, .. }
            | ConversionError::InternalInvariant { position, .. } => Some(*position),
            ConversionError::FixpointLimit { .. } | ConversionError::Config { .. } => None,
        }
    }
}
