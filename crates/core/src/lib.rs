//! Core types for automatic card brand detection
//!
//! This crate provides the pieces shared by the request signer and the
//! detection controller:
//!
//! - **Error handling**: errors with codes, context, and recovery suggestions
//! - **Configuration**: environment credentials and TOML presentation settings
//! - **Card types**: the ordered list of supported brands
//!
//! # Example
//!
//! ```rust,no_run
//! use autocc_core::{config::Credentials, card_types::SupportedCardTypes};
//!
//! let credentials = Credentials::from_env().expect("PAYONE_* variables not set");
//! let card_types = SupportedCardTypes::from_env().expect("PAYONE_CC_TYPES not set");
//! println!("{} supports {}", credentials.merchant_id(), card_types.to_json());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod card_types;
pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::card_types::{load_supported_types, BrandCode, SupportedCardTypes};
    pub use crate::config::{Config, Credentials, Mode};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
}
