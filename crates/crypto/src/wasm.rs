//! WASM bindings for crypto utilities.

use wasm_bindgen::prelude::*;

/// Generate HMAC-SHA384 signature and return as hex string.
///
/// Returns an empty string when the key is empty.
#[wasm_bindgen]
pub fn hmac_sha384_hex(key: &str, message: &str) -> String {
    crate::hmac_sha384(key.as_bytes(), message.as_bytes()).unwrap_or_default()
}

/// Verify an HMAC-SHA384 hex signature (constant-time comparison).
#[wasm_bindgen]
pub fn verify_sha384(key: &str, message: &str, signature_hex: &str) -> bool {
    crate::verify_hmac_sha384(key.as_bytes(), message.as_bytes(), signature_hex).is_ok()
}

/// Constant-time comparison of two strings.
#[wasm_bindgen]
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    crate::constant_time_compare(a.as_bytes(), b.as_bytes())
}
