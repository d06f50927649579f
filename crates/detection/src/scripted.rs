//! In-process widget bridge driven by explicit calls.
//!
//! Used by the command-line simulator and by tests in place of the hosted
//! iframes.

use autocc_core::card_types::BrandCode;

use crate::bridge::{CheckCallback, WidgetBridge};
use crate::check::CheckResult;

/// Widget stand-in whose completeness and check results are set by hand
#[derive(Default)]
pub struct ScriptedBridge {
    complete: bool,
    card_type: Option<BrandCode>,
    pending: Option<CheckCallback>,
    checks_started: usize,
}

impl ScriptedBridge {
    /// Bridge with an incomplete form and no pending check
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend every hosted field is filled (or not)
    pub fn set_complete(&mut self, complete: bool) {
        self.complete = complete;
    }

    /// Card type last forced by a manual selection
    pub fn card_type(&self) -> Option<&BrandCode> {
        self.card_type.as_ref()
    }

    /// Number of checks started so far
    pub fn checks_started(&self) -> usize {
        self.checks_started
    }

    /// Hand `result` to the pending check, if any
    pub fn deliver(&mut self, result: CheckResult) -> bool {
        match self.pending.take() {
            Some(callback) => {
                callback(result);
                true
            }
            None => false,
        }
    }

    /// Remove the pending callback without invoking it
    pub fn take_pending(&mut self) -> Option<CheckCallback> {
        self.pending.take()
    }
}

impl std::fmt::Debug for ScriptedBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedBridge")
            .field("complete", &self.complete)
            .field("card_type", &self.card_type)
            .field("pending", &self.pending.is_some())
            .field("checks_started", &self.checks_started)
            .finish()
    }
}

impl WidgetBridge for ScriptedBridge {
    fn is_complete(&self) -> bool {
        self.complete
    }

    fn set_card_type(&mut self, brand: &BrandCode) {
        self.card_type = Some(brand.clone());
    }

    fn run_check(&mut self, callback: CheckCallback) {
        self.checks_started += 1;
        self.pending = Some(callback);
    }
}
