//! Configuration schema definitions
//!
//! Every field has a default so an absent or partial file is valid.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Detection controller settings
    #[serde(default)]
    pub detection: DetectionSettings,

    /// Hosted-iframe widget settings
    #[serde(default)]
    pub widget: WidgetSettings,
}

/// Selectors, classes, and message texts used by the detection controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionSettings {
    /// Selector matching every brand icon
    #[serde(default = "default_icons_selector")]
    pub icons_selector: String,

    /// Class added to icons while manual selection is enabled
    #[serde(default = "default_icon_clickable_class")]
    pub icon_clickable_class: String,

    /// Class marking the selected icon
    #[serde(default = "default_icon_selected_class")]
    pub icon_selected_class: String,

    /// Selector of the message container
    #[serde(default = "default_message_selector")]
    pub message_selector: String,

    /// Selector of the element receiving the raw check response
    #[serde(default = "default_response_selector")]
    pub response_selector: String,

    /// Texts shown in the message box
    #[serde(default)]
    pub messages: MessageTexts,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            icons_selector: default_icons_selector(),
            icon_clickable_class: default_icon_clickable_class(),
            icon_selected_class: default_icon_selected_class(),
            message_selector: default_message_selector(),
            response_selector: default_response_selector(),
            messages: MessageTexts::default(),
        }
    }
}

fn default_icons_selector() -> String {
    ".payone-cc-icon".to_string()
}

fn default_icon_clickable_class() -> String {
    "payone-cc-icon--clickable".to_string()
}

fn default_icon_selected_class() -> String {
    "payone-cc-icon--selected".to_string()
}

fn default_message_selector() -> String {
    ".payone-cc-message-wrap".to_string()
}

fn default_response_selector() -> String {
    "#cc-check-response-wrap pre".to_string()
}

/// User-facing message texts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageTexts {
    /// Shown when the brand cannot be detected
    #[serde(default = "default_unknown_type")]
    pub unknown_type: String,

    /// Shown when the brand is not accepted
    #[serde(default = "default_unsupported_type")]
    pub unsupported_type: String,

    /// Shown when submit is pressed on an incomplete form
    #[serde(default = "default_incomplete_form")]
    pub incomplete_form: String,

    /// Shown when the check succeeds
    #[serde(default = "default_check_valid")]
    pub check_valid: String,

    /// Shown for any unrecognised check status
    #[serde(default = "default_unexpected_status")]
    pub unexpected_status: String,
}

impl Default for MessageTexts {
    fn default() -> Self {
        Self {
            unknown_type: default_unknown_type(),
            unsupported_type: default_unsupported_type(),
            incomplete_form: default_incomplete_form(),
            check_valid: default_check_valid(),
            unexpected_status: default_unexpected_status(),
        }
    }
}

fn default_unknown_type() -> String {
    "The card type cannot be detected automatically. Please specify your card type by clicking the corresponding icon.".to_string()
}

fn default_unsupported_type() -> String {
    "The card type is not supported. Please specify a card type corresponding to the icon brands above.".to_string()
}

fn default_incomplete_form() -> String {
    "Please fill out the form completely.".to_string()
}

fn default_check_valid() -> String {
    "Success! Credit card check was valid.".to_string()
}

fn default_unexpected_status() -> String {
    "API returned an unexpected status.".to_string()
}

/// Hosted-iframe widget presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSettings {
    /// Widget language code
    #[serde(default = "default_language")]
    pub language: String,

    /// Hosted fields keyed by the provider's field name
    #[serde(default = "default_fields")]
    pub fields: IndexMap<String, FieldSettings>,

    /// Styles applied inside every hosted field
    #[serde(default, rename = "default_style")]
    pub default_style: StyleSettings,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            language: default_language(),
            fields: default_fields(),
            default_style: StyleSettings::default(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_fields() -> IndexMap<String, FieldSettings> {
    let mut fields = IndexMap::new();
    fields.insert(
        "cardpan".to_string(),
        FieldSettings::new("payone-cc-pan", "input"),
    );
    fields.insert(
        "cardcvc2".to_string(),
        FieldSettings {
            size: Some("4".to_string()),
            maxlength: Some("4".to_string()),
            length: Some(IndexMap::from([("V".to_string(), 3), ("M".to_string(), 3)])),
            ..FieldSettings::new("payone-cc-cvc", "password")
        },
    );
    fields.insert(
        "cardexpiremonth".to_string(),
        FieldSettings {
            size: Some("2".to_string()),
            maxlength: Some("2".to_string()),
            ..FieldSettings::new("payone-cc-expire-month", "text")
        },
    );
    fields.insert(
        "cardexpireyear".to_string(),
        FieldSettings::new("payone-cc-expire-year", "text"),
    );
    fields
}

/// One hosted input field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSettings {
    /// Id of the mount element
    pub selector: String,

    /// Input type of the hosted field
    #[serde(rename = "type")]
    pub kind: String,

    /// Visible width in characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Maximum input length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxlength: Option<String>,

    /// Expected input length per brand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<IndexMap<String, u32>>,
}

impl FieldSettings {
    /// Field mounted at `selector` with input type `kind`
    pub fn new(selector: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            kind: kind.into(),
            size: None,
            maxlength: None,
            length: None,
        }
    }
}

/// Inline styles applied inside the hosted iframes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSettings {
    /// Inline style of every input
    #[serde(default = "default_input_style")]
    pub input: String,

    /// Attributes of the iframe elements
    #[serde(default)]
    pub iframe: IndexMap<String, String>,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            input: default_input_style(),
            iframe: IndexMap::new(),
        }
    }
}

fn default_input_style() -> String {
    "height: 100%; width: 100%; border: none; font-size: 20px; letter-spacing: 1px;".to_string()
}
