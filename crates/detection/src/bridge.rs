//! Seam to the hosted-iframe widget.

use autocc_core::card_types::BrandCode;

use crate::check::CheckResult;

/// Receives the result of one credit card check, at most once
pub type CheckCallback = Box<dyn FnOnce(CheckResult)>;

/// Operations the controller needs from the hosted-iframe widget
///
/// The widget itself is external; implementations adapt it (or a test
/// double) to this trait. Detection events flow the other way, from the
/// embedding into [`DetectionController::on_detection_result`].
///
/// [`DetectionController::on_detection_result`]: crate::DetectionController::on_detection_result
pub trait WidgetBridge {
    /// Whether every hosted field is filled
    fn is_complete(&self) -> bool;

    /// Force the widget's card type after a manual selection
    fn set_card_type(&mut self, brand: &BrandCode);

    /// Start the asynchronous check; `callback` receives its result
    fn run_check(&mut self, callback: CheckCallback);
}
