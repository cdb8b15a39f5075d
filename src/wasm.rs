//! WASM bindings for shortex
//!
//! This module provides JavaScript-accessible functions for shorthand → LaTeX conversion.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::{diagnostics, S2LOptions, ShorthandConverter};

/// Conversion result with additional metadata
#[derive(Serialize, Deserialize)]
pub struct ConvertResult {
    /// The converted output
    pub output: String,
    /// Whether the conversion was successful
    pub success: bool,
    /// Error message if conversion failed
    pub error: Option<String>,
    /// Short name of the violated rule if conversion failed
    pub error_kind: Option<String>,
    /// Character offset of the failure in the buffer being rewritten, if known
    pub position: Option<usize>,
}

/// Safely serialize a value to JsValue, returning an error object on failure.
fn to_js_value<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or_else(|e| {
        let error_obj = ConvertResult {
            output: String::new(),
            success: false,
            error: Some(format!("Serialization error: {}", e)),
            error_kind: None,
            position: None,
        };
        serde_wasm_bindgen::to_value(&error_obj).unwrap_or(JsValue::NULL)
    })
}

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Convert shorthand to LaTeX with options
///
/// # Arguments
/// * `input` - Shorthand math
/// * `options` - `S2LOptions` as a JS object; missing fields take defaults
///
/// # Returns
/// A `ConvertResult` object. On failure `output` is empty.
#[wasm_bindgen(js_name = "shorthandToLatex")]
pub fn shorthand_to_latex_wasm(input: &str, options: JsValue) -> JsValue {
    let options: S2LOptions = if options.is_undefined() || options.is_null() {
        S2LOptions::default()
    } else {
        match serde_wasm_bindgen::from_value(options) {
            Ok(options) => options,
            Err(e) => {
                return to_js_value(&ConvertResult {
                    output: String::new(),
                    success: false,
                    error: Some(format!("Invalid options: {}", e)),
                    error_kind: Some("config".to_string()),
                    position: None,
                })
            }
        }
    };

    let converter = ShorthandConverter::new(crate::PatternTable::global(), options);
    let result = match converter.convert(input) {
        Ok(output) => ConvertResult {
            output,
            success: true,
            error: None,
            error_kind: None,
            position: None,
        },
        Err(e) => ConvertResult {
            output: String::new(),
            success: false,
            error: Some(e.to_string()),
            error_kind: Some(e.kind().to_string()),
            position: e.position(),
        },
    };
    to_js_value(&result)
}

/// Lint shorthand without converting it
#[wasm_bindgen(js_name = "checkShorthand")]
pub fn check_shorthand_wasm(input: &str) -> JsValue {
    to_js_value(&diagnostics::check_shorthand(input, &S2LOptions::default()))
}
