//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Error types and result types
//! - Source analysis without conversion

pub mod analysis;
pub mod error;

// Re-export commonly used items
pub use analysis::{
    check_shorthand, has_errors, metrics_source, Diagnostic, DiagnosticLevel, ShorthandMetrics,
};
pub use error::{ConversionError, ConversionResult, Direction};
