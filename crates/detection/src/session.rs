//! Per-form detection state.

use autocc_core::card_types::{BrandCode, SupportedCardTypes};
use serde::Serialize;

/// Where the controller is in the detection cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "brand", rename_all = "camelCase")]
pub enum DetectionState {
    /// Created, widget not yet attached
    Idle,
    /// Attached and waiting for the next detection event
    AwaitingDetection,
    /// The widget recognised a supported brand
    Valid(BrandCode),
    /// The widget could not tell the brand
    Unknown,
    /// The number matches no supported brand
    Unsupported,
}

/// Severity of a user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    /// Check passed
    Success,
    /// User action needed
    Warning,
    /// Error or unsupported card
    Danger,
}

impl MessageLevel {
    /// Alert class the page styles the message with
    pub fn css_class(&self) -> &'static str {
        match self {
            MessageLevel::Success => "alert alert-success",
            MessageLevel::Warning => "alert alert-warning",
            MessageLevel::Danger => "alert alert-danger",
        }
    }
}

/// User-facing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Severity
    pub level: MessageLevel,
    /// Text shown to the user
    pub text: String,
}

impl Message {
    /// Success message
    pub fn success(text: impl Into<String>) -> Self {
        Self { level: MessageLevel::Success, text: text.into() }
    }

    /// Warning message
    pub fn warning(text: impl Into<String>) -> Self {
        Self { level: MessageLevel::Warning, text: text.into() }
    }

    /// Danger message
    pub fn danger(text: impl Into<String>) -> Self {
        Self { level: MessageLevel::Danger, text: text.into() }
    }
}

/// Mutable state of one form instance
///
/// Only the controller mutates it; everything else reads it through the
/// accessors or [`render`](crate::render).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionSession {
    pub(crate) card_types: SupportedCardTypes,
    pub(crate) state: DetectionState,
    pub(crate) selected_type: Option<BrandCode>,
    pub(crate) manually_overridden: bool,
    pub(crate) manual_selection_enabled: bool,
    pub(crate) message: Option<Message>,
    pub(crate) response: Option<String>,
    pub(crate) check_in_flight: bool,
}

impl DetectionSession {
    /// Idle session over `card_types`
    pub fn new(card_types: SupportedCardTypes) -> Self {
        Self {
            card_types,
            state: DetectionState::Idle,
            selected_type: None,
            manually_overridden: false,
            manual_selection_enabled: false,
            message: None,
            response: None,
            check_in_flight: false,
        }
    }

    /// Supported brands in display order
    pub fn card_types(&self) -> &SupportedCardTypes {
        &self.card_types
    }

    /// Current detection state
    pub fn state(&self) -> &DetectionState {
        &self.state
    }

    /// Brand currently selected, detected or manual
    pub fn selected_type(&self) -> Option<&BrandCode> {
        self.selected_type.as_ref()
    }

    /// Whether the user picked a brand by hand
    pub fn manually_overridden(&self) -> bool {
        self.manually_overridden
    }

    /// Whether icon clicks are accepted
    pub fn manual_selection_enabled(&self) -> bool {
        self.manual_selection_enabled
    }

    /// Visible message, `None` when hidden
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// Pretty-printed raw result of the last check
    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    /// Whether a check awaits its result
    pub fn check_in_flight(&self) -> bool {
        self.check_in_flight
    }
}
