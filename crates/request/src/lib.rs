//! Request authentication for the hosted-iframe widget.
//!
//! This crate provides:
//! - [`RequestPayload`], an ordered field map with last-writer-wins merging
//! - [`RequestSigner`], which merges defaults, caller fields, and API identity
//!   and signs the result with HMAC-SHA384
//! - [`SignedRequest`], the immutable signed payload and its verification
//! - [`WidgetInit`], the initialization object handed to the widget
//!
//! # Example
//!
//! ```rust
//! use autocc_core::config::{Credentials, Mode};
//! use autocc_request::{RequestPayload, RequestSigner};
//!
//! let credentials = Credentials::new("10001", "10002", "2000001", "secret").unwrap();
//! let signer = RequestSigner::new(credentials);
//!
//! let signed = signer
//!     .sign(&RequestPayload::credit_card_check(Mode::Test))
//!     .unwrap();
//! assert_eq!(signed.hash().len(), 96);
//! ```

#![warn(missing_docs)]

mod init;
mod payload;
mod signer;

pub use init::WidgetInit;
pub use payload::RequestPayload;
pub use signer::{build_signed_request, RequestSigner, SignedRequest, HASH_FIELD, REQUEST_DEFAULTS};
