//! Terminal output helpers for the autocc tools
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Text rendering of detection UI commands

#![warn(missing_docs)]

pub mod output;
pub mod view;
