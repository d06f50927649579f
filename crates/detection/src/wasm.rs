//! WASM bindings for the detection controller.
//!
//! The hosted-iframe library only accepts a global callback name for check
//! results, so the page registers a function under that name which forwards
//! into [`AutoCcDetection::handle_check_result`]. Every method returns the
//! session's UI commands as a JSON array for the page to apply.

use wasm_bindgen::prelude::*;

use autocc_core::card_types::{BrandCode, SupportedCardTypes};
use autocc_core::config::MessageTexts;

use crate::bridge::{CheckCallback, WidgetBridge};
use crate::controller::{CheckDispatch, DetectionController};

#[wasm_bindgen]
extern "C" {
    /// The provider's `Payone.ClientApi.HostedIFrames` instance.
    pub type HostedIFrames;

    #[wasm_bindgen(method, js_name = isComplete)]
    fn is_complete(this: &HostedIFrames) -> bool;

    #[wasm_bindgen(method, js_name = setCardType)]
    fn set_card_type(this: &HostedIFrames, card_type: &str);

    #[wasm_bindgen(method, js_name = creditCardCheck)]
    fn credit_card_check(this: &HostedIFrames, callback_name: &str);
}

struct JsBridge {
    iframes: HostedIFrames,
    callback_name: String,
    pending: Option<CheckCallback>,
}

impl WidgetBridge for JsBridge {
    fn is_complete(&self) -> bool {
        self.iframes.is_complete()
    }

    fn set_card_type(&mut self, brand: &BrandCode) {
        self.iframes.set_card_type(brand.as_str());
    }

    fn run_check(&mut self, callback: CheckCallback) {
        self.pending = Some(callback);
        self.iframes.credit_card_check(&self.callback_name);
    }
}

/// Detection controller exported to the page
#[wasm_bindgen]
pub struct AutoCcDetection {
    controller: DetectionController<JsBridge>,
}

#[wasm_bindgen]
impl AutoCcDetection {
    /// Create a controller for a mounted widget.
    ///
    /// # Arguments
    /// * `iframes` - The hosted-iframe instance
    /// * `callback_name` - Global name the page registered for check results
    /// * `supported_card_types_json` - JSON array of brand codes
    /// * `messages_json` - Optional message texts, e.g. the page config's `detection.messages`
    #[wasm_bindgen(constructor)]
    pub fn new(
        iframes: HostedIFrames,
        callback_name: String,
        supported_card_types_json: &str,
        messages_json: Option<String>,
    ) -> Result<AutoCcDetection, JsValue> {
        let codes: Vec<String> = serde_json::from_str(supported_card_types_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let card_types = SupportedCardTypes::parse(&codes.join(","))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let messages = match messages_json {
            Some(json) => serde_json::from_str::<MessageTexts>(&json)
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => MessageTexts::default(),
        };

        let bridge = JsBridge {
            iframes,
            callback_name,
            pending: None,
        };
        let mut controller = DetectionController::new(bridge, card_types, messages);
        controller.attach();

        Ok(Self { controller })
    }

    /// Feed a detection code from the widget's detection callback.
    #[wasm_bindgen(js_name = handleDetectionResult)]
    pub fn handle_detection_result(&mut self, code: &str) -> String {
        self.controller.on_detection_result(code);
        self.render()
    }

    /// Handle a click on a brand icon.
    #[wasm_bindgen(js_name = handleIconClick)]
    pub fn handle_icon_click(&mut self, code: &str) -> String {
        self.controller.on_icon_click(code);
        self.render()
    }

    /// Run the final check if the form is complete.
    #[wasm_bindgen(js_name = performCreditCardCheck)]
    pub fn perform_credit_card_check(&mut self) -> String {
        if self.controller.perform_check() == CheckDispatch::AlreadyInFlight {
            tracing::debug!(callback = %self.controller.bridge().callback_name, "Submit ignored");
        }
        self.render()
    }

    /// Deliver the widget's check result, serialized as JSON.
    #[wasm_bindgen(js_name = handleCheckResult)]
    pub fn handle_check_result(&mut self, result_json: &str) -> String {
        match crate::check::CheckResult::from_json(result_json) {
            Ok(result) => match self.controller.bridge_mut().pending.take() {
                Some(callback) => callback(result),
                None => {
                    self.controller.on_check_result(result);
                }
            },
            Err(_) => {
                self.controller.bridge_mut().pending = None;
                self.controller.on_check_result_json(result_json);
            }
        }
        self.render()
    }

    /// Current UI commands as JSON.
    pub fn render(&self) -> String {
        serde_json::to_string(&self.controller.render()).unwrap_or_else(|_| "[]".to_string())
    }
}
