//! Detection state machine bound to one form session.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use autocc_core::card_types::{BrandCode, SupportedCardTypes};
use autocc_core::config::MessageTexts;
use autocc_core::Error;

use crate::bridge::WidgetBridge;
use crate::check::{CheckOutcome, CheckResult};
use crate::render::{render, UiCommand};
use crate::session::{DetectionSession, DetectionState, Message};

/// Detection code for a number whose brand cannot be determined
pub const UNKNOWN_CODE: &str = "?";

/// Detection code for a number matching no supported brand
pub const UNSUPPORTED_CODE: &str = "-";

/// What [`DetectionController::perform_check`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckDispatch {
    /// The widget's check was started
    Dispatched,
    /// Some hosted field is empty; nothing was sent
    Incomplete,
    /// A previous check has not answered yet; nothing was sent
    AlreadyInFlight,
}

/// Reacts to detection events, icon clicks, and check results
///
/// The session is shared with the pending check callback through a weak
/// reference, so a result arriving after the controller is dropped is
/// discarded.
pub struct DetectionController<B: WidgetBridge> {
    bridge: B,
    session: Rc<RefCell<DetectionSession>>,
    messages: Rc<MessageTexts>,
}

impl<B: WidgetBridge> DetectionController<B> {
    /// Controller for a fresh session over `card_types`
    pub fn new(bridge: B, card_types: SupportedCardTypes, messages: MessageTexts) -> Self {
        Self {
            bridge,
            session: Rc::new(RefCell::new(DetectionSession::new(card_types))),
            messages: Rc::new(messages),
        }
    }

    /// Mark the widget as mounted; the session starts waiting for detections
    pub fn attach(&mut self) {
        let mut session = self.session.borrow_mut();
        if session.state == DetectionState::Idle {
            session.state = DetectionState::AwaitingDetection;
            tracing::debug!(brands = session.card_types.len(), "Detection controller attached");
        }
    }

    /// Apply one detection event from the widget
    pub fn on_detection_result(&mut self, raw_code: &str) -> DetectionState {
        let code = raw_code.trim().to_uppercase();
        let mut session = self.session.borrow_mut();
        if session.state == DetectionState::Idle {
            tracing::debug!("Detection result before attach");
        }
        session.state = DetectionState::AwaitingDetection;

        match code.as_str() {
            UNSUPPORTED_CODE => {
                session.selected_type = None;
                session.message = Some(Message::danger(&self.messages.unsupported_type));
                if !session.manually_overridden {
                    session.manual_selection_enabled = false;
                }
                session.state = DetectionState::Unsupported;
            }
            UNKNOWN_CODE | "" => {
                if code.is_empty() {
                    tracing::warn!("Empty detection code treated as unknown");
                }
                session.selected_type = None;
                session.message = Some(Message::warning(&self.messages.unknown_type));
                session.manual_selection_enabled = true;
                session.state = DetectionState::Unknown;
            }
            _ => {
                let brand = BrandCode::new(&code);
                session.selected_type = Some(brand.clone());
                session.message = None;
                if !session.manually_overridden {
                    session.manual_selection_enabled = false;
                }
                session.state = DetectionState::Valid(brand);
            }
        }

        tracing::debug!(
            code = %code,
            state = ?session.state,
            manual_selection = session.manual_selection_enabled,
            overridden = session.manually_overridden,
            "Detection result applied"
        );

        session.state.clone()
    }

    /// Handle a click on a brand icon
    ///
    /// Ignored unless manual selection is enabled and the brand is
    /// supported. Returns whether the selection was applied.
    pub fn on_icon_click(&mut self, raw_code: &str) -> bool {
        let brand = BrandCode::new(raw_code);
        {
            let session = self.session.borrow();
            if !session.manual_selection_enabled {
                tracing::debug!(brand = %brand, "Icon click ignored, manual selection disabled");
                return false;
            }
            if !session.card_types.contains(&brand) {
                tracing::warn!(brand = %brand, "Icon click for unsupported brand ignored");
                return false;
            }
        }

        self.bridge.set_card_type(&brand);

        let mut session = self.session.borrow_mut();
        session.manually_overridden = true;
        session.selected_type = Some(brand.clone());
        session.message = None;

        tracing::info!(brand = %brand, "Card type set manually");
        true
    }

    /// Start the final check if the form is complete
    ///
    /// While a check is in flight further submissions are refused, and the
    /// submit action renders disabled until the result arrives.
    pub fn perform_check(&mut self) -> CheckDispatch {
        if self.session.borrow().check_in_flight {
            tracing::debug!("Check already in flight");
            return CheckDispatch::AlreadyInFlight;
        }

        if !self.bridge.is_complete() {
            let err = Error::incomplete_form();
            tracing::info!(code = %err.code, "Check refused: {}", err.message);
            self.session.borrow_mut().message =
                Some(Message::danger(&self.messages.incomplete_form));
            return CheckDispatch::Incomplete;
        }

        self.session.borrow_mut().check_in_flight = true;

        let session = Rc::downgrade(&self.session);
        let messages = Rc::clone(&self.messages);
        self.bridge.run_check(Box::new(move |result| match session.upgrade() {
            Some(session) => {
                apply_check_result(&mut session.borrow_mut(), &messages, result);
            }
            None => tracing::debug!("Check result after session teardown discarded"),
        }));

        tracing::info!("Credit card check dispatched");
        CheckDispatch::Dispatched
    }

    /// Apply a check result delivered outside the bridge callback
    pub fn on_check_result(&mut self, result: CheckResult) -> CheckOutcome {
        apply_check_result(&mut self.session.borrow_mut(), &self.messages, result)
    }

    /// Apply a raw JSON check result
    ///
    /// Unparseable input is shown verbatim with the unexpected-status
    /// warning; the session stays usable.
    pub fn on_check_result_json(&mut self, raw: &str) -> CheckOutcome {
        match CheckResult::from_json(raw) {
            Ok(result) => self.on_check_result(result),
            Err(err) => {
                tracing::warn!(code = %err.code, "{}", err.message);
                let mut session = self.session.borrow_mut();
                session.check_in_flight = false;
                session.response = Some(raw.to_string());
                session.message = Some(Message::warning(&self.messages.unexpected_status));
                CheckOutcome::Malformed
            }
        }
    }

    /// Forget a check whose result never arrived, re-enabling submission
    pub fn reset_check(&mut self) {
        let mut session = self.session.borrow_mut();
        if session.check_in_flight {
            tracing::warn!("Pending check abandoned");
            session.check_in_flight = false;
        }
    }

    /// Borrow the session state
    pub fn session(&self) -> Ref<'_, DetectionSession> {
        self.session.borrow()
    }

    /// Current UI projection of the session
    pub fn render(&self) -> Vec<UiCommand> {
        render(&self.session.borrow())
    }

    /// Widget bridge
    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// Widget bridge, mutably
    pub fn bridge_mut(&mut self) -> &mut B {
        &mut self.bridge
    }
}

fn apply_check_result(
    session: &mut DetectionSession,
    messages: &MessageTexts,
    result: CheckResult,
) -> CheckOutcome {
    session.check_in_flight = false;
    session.response = Some(result.to_pretty_json());

    let outcome = result.outcome();
    session.message = Some(match &outcome {
        CheckOutcome::Valid => Message::success(&messages.check_valid),
        CheckOutcome::Rejected { errorcode, errormessage } => {
            Message::danger(format!("Error {}: {}", errorcode, errormessage))
        }
        CheckOutcome::Unexpected(status) => {
            let err = Error::unexpected_status(status);
            tracing::warn!(code = %err.code, "{}", err.message);
            Message::warning(&messages.unexpected_status)
        }
        CheckOutcome::Malformed => Message::warning(&messages.unexpected_status),
    });

    tracing::info!(status = %result.status, "Credit card check result received");
    outcome
}
