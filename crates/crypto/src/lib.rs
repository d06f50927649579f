//! Cryptographic utilities for request authentication.
//!
//! This crate provides:
//! - HMAC-SHA384 signatures rendered as lowercase hex
//! - Constant-time comparison for security
//! - Signature verification against an expected hex digest

#![warn(missing_docs)]

mod hmac_impl;
mod timing;
mod error;

#[cfg(feature = "wasm")]
mod wasm;

pub use hmac_impl::{hmac_sha384, verify_hmac_sha384, verify_signature, SHA384_HEX_LEN};
pub use timing::constant_time_compare;
pub use error::{CryptoError, Result};
