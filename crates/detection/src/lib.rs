//! Card brand detection controller.
//!
//! This crate provides:
//! - [`DetectionSession`], the explicit per-form state
//! - [`DetectionController`], the state machine reacting to detection events,
//!   icon clicks, and check results
//! - [`WidgetBridge`], the seam to the hosted-iframe widget
//! - [`render`], a pure projection of a session onto [`UiCommand`]s
//!
//! The controller is single-threaded and never blocks: every entry point
//! updates the session and returns immediately.

#![warn(missing_docs)]

mod bridge;
mod check;
mod controller;
mod render;
mod session;

pub mod scripted;

#[cfg(feature = "wasm")]
mod wasm;

pub use bridge::{CheckCallback, WidgetBridge};
pub use check::{CheckOutcome, CheckResult, CheckStatus};
pub use controller::{CheckDispatch, DetectionController, UNKNOWN_CODE, UNSUPPORTED_CODE};
pub use render::{render, UiCommand};
pub use session::{DetectionSession, DetectionState, Message, MessageLevel};
