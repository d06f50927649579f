//! Initialization object for the hosted-iframe widget.

use autocc_core::card_types::SupportedCardTypes;
use autocc_core::config::{
    DetectionSettings, FieldSettings, MessageTexts, StyleSettings, WidgetSettings,
};
use indexmap::IndexMap;
use serde::Serialize;

use crate::signer::SignedRequest;

/// Everything the embedding page passes to the widget at startup
///
/// The detection callback itself is wired by the page; only the data part
/// is produced here. `detection` carries the selectors and classes the page
/// applies the controller's UI commands with.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetInit<'a> {
    supported_card_types: &'a SupportedCardTypes,
    detection: PageHooks<'a>,
    hosted_iframes_config: HostedIframesConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageHooks<'a> {
    icons_selector: &'a str,
    icon_clickable_class: &'a str,
    icon_selected_class: &'a str,
    message_selector: &'a str,
    response_selector: &'a str,
    messages: &'a MessageTexts,
}

impl<'a> From<&'a DetectionSettings> for PageHooks<'a> {
    fn from(settings: &'a DetectionSettings) -> Self {
        Self {
            icons_selector: &settings.icons_selector,
            icon_clickable_class: &settings.icon_clickable_class,
            icon_selected_class: &settings.icon_selected_class,
            message_selector: &settings.message_selector,
            response_selector: &settings.response_selector,
            messages: &settings.messages,
        }
    }
}

#[derive(Debug, Serialize)]
struct HostedIframesConfig<'a> {
    config: IframeConfig<'a>,
    request: &'a SignedRequest,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IframeConfig<'a> {
    fields: &'a IndexMap<String, FieldSettings>,
    default_style: &'a StyleSettings,
    language: &'a str,
    auto_cardtype_detection: AutoCardtypeDetection<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AutoCardtypeDetection<'a> {
    deactivate: bool,
    #[serde(rename = "supportedCardtypes")]
    supported_cardtypes: &'a SupportedCardTypes,
}

impl<'a> WidgetInit<'a> {
    /// Assemble the page bootstrap object
    pub fn new(
        request: &'a SignedRequest,
        card_types: &'a SupportedCardTypes,
        widget: &'a WidgetSettings,
        detection: &'a DetectionSettings,
    ) -> Self {
        Self {
            supported_card_types: card_types,
            detection: detection.into(),
            hosted_iframes_config: HostedIframesConfig {
                config: IframeConfig {
                    fields: &widget.fields,
                    default_style: &widget.default_style,
                    language: &widget.language,
                    auto_cardtype_detection: AutoCardtypeDetection {
                        deactivate: false,
                        supported_cardtypes: card_types,
                    },
                },
                request,
            },
        }
    }

    /// Compact JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Indented JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
