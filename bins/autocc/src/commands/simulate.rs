//! Scripted detection scenarios

use autocc_cli::output::Status;
use autocc_cli::view;
use autocc_core::config::ConfigSchema;
use autocc_detection::scripted::ScriptedBridge;
use autocc_detection::{CheckDispatch, CheckResult, DetectionController};

use super::load_card_types;

/// One scenario step
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Detection event from the widget
    Detect(String),
    /// Click on a brand icon
    Click(String),
    /// Mark the hosted fields as filled or not
    Complete(bool),
    /// Press submit
    Check,
    /// Deliver a check result
    Result(CheckResult),
    /// Deliver a raw JSON check result
    Raw(String),
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Detect(code) => write!(f, "detect {}", code),
            Step::Click(code) => write!(f, "click {}", code),
            Step::Complete(true) => f.write_str("fill form"),
            Step::Complete(false) => f.write_str("clear form"),
            Step::Check => f.write_str("submit"),
            Step::Result(result) => write!(f, "result {}", result.status),
            Step::Raw(_) => f.write_str("raw result"),
        }
    }
}

/// Parse a step such as `detect:V` or `result:INVALID:877:Card expired`
pub fn parse_step(raw: &str) -> Result<Step, String> {
    let (kind, rest) = match raw.split_once(':') {
        Some((kind, rest)) => (kind, Some(rest)),
        None => (raw, None),
    };

    match (kind.to_lowercase().as_str(), rest) {
        ("detect", Some(code)) => Ok(Step::Detect(code.to_string())),
        ("click", Some(code)) if !code.is_empty() => Ok(Step::Click(code.to_string())),
        ("complete", None) => Ok(Step::Complete(true)),
        ("incomplete", None) => Ok(Step::Complete(false)),
        ("check", None) => Ok(Step::Check),
        ("result", Some(rest)) if !rest.is_empty() => {
            let mut parts = rest.splitn(3, ':');
            let status = parts.next().unwrap_or_default();
            let mut result = CheckResult::new(status);
            if let Some(code) = parts.next() {
                result = result.with_error(code, parts.next().unwrap_or_default());
            }
            Ok(Step::Result(result))
        }
        ("raw", Some(json)) => Ok(Step::Raw(json.to_string())),
        _ => Err(format!(
            "unknown step '{}'; expected detect:CODE, click:CODE, complete, incomplete, check, result:STATUS[:CODE[:MESSAGE]] or raw:JSON",
            raw
        )),
    }
}

pub fn run(
    schema: &ConfigSchema,
    card_types: Option<&str>,
    steps: &[Step],
    json: bool,
) -> anyhow::Result<()> {
    let card_types = load_card_types(card_types)?;
    let mut controller = DetectionController::new(
        ScriptedBridge::new(),
        card_types,
        schema.detection.messages.clone(),
    );
    controller.attach();

    for (index, step) in steps.iter().enumerate() {
        apply(&mut controller, step);

        let commands = controller.render();
        if json {
            println!(
                "{}",
                serde_json::json!({ "step": step.to_string(), "ui": commands })
            );
        } else {
            Status::step(index + 1, steps.len(), &step.to_string());
            view::print(&commands);
        }
    }
    Ok(())
}

fn apply(controller: &mut DetectionController<ScriptedBridge>, step: &Step) {
    match step {
        Step::Detect(code) => {
            controller.on_detection_result(code);
        }
        Step::Click(code) => {
            if !controller.on_icon_click(code) {
                Status::warning(&format!("Click on {} ignored", code));
            }
        }
        Step::Complete(complete) => controller.bridge_mut().set_complete(*complete),
        Step::Check => match controller.perform_check() {
            CheckDispatch::Dispatched => {}
            CheckDispatch::Incomplete => Status::warning("Form incomplete, check not sent"),
            CheckDispatch::AlreadyInFlight => Status::warning("Check already in flight"),
        },
        Step::Result(result) => {
            if !controller.bridge_mut().deliver(result.clone()) {
                Status::warning("No check in flight; applying result directly");
                controller.on_check_result(result.clone());
            }
        }
        Step::Raw(raw) => {
            controller.bridge_mut().take_pending();
            controller.on_check_result_json(raw);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autocc_core::card_types::SupportedCardTypes;
    use autocc_core::config::MessageTexts;
    use autocc_detection::MessageLevel;

    #[test]
    fn test_parse_steps() {
        assert_eq!(parse_step("detect:V").unwrap(), Step::Detect("V".to_string()));
        assert_eq!(parse_step("detect:?").unwrap(), Step::Detect("?".to_string()));
        assert_eq!(parse_step("click:M").unwrap(), Step::Click("M".to_string()));
        assert_eq!(parse_step("complete").unwrap(), Step::Complete(true));
        assert_eq!(parse_step("CHECK").unwrap(), Step::Check);
        assert_eq!(
            parse_step("result:INVALID:877:Card: expired").unwrap(),
            Step::Result(CheckResult::new("INVALID").with_error("877", "Card: expired"))
        );
        assert_eq!(parse_step("result:VALID").unwrap(), Step::Result(CheckResult::new("VALID")));
    }

    #[test]
    fn test_parse_step_errors() {
        assert!(parse_step("detect").is_err());
        assert!(parse_step("click:").is_err());
        assert!(parse_step("result:").is_err());
        assert!(parse_step("jump").is_err());
    }

    #[test]
    fn test_apply_full_scenario() {
        let mut controller = DetectionController::new(
            ScriptedBridge::new(),
            SupportedCardTypes::parse("V,M").unwrap(),
            MessageTexts::default(),
        );
        controller.attach();

        for raw in ["detect:?", "click:V", "complete", "check", "result:VALID"] {
            apply(&mut controller, &parse_step(raw).unwrap());
        }

        let session = controller.session();
        assert!(session.manually_overridden());
        assert_eq!(session.message().unwrap().level, MessageLevel::Success);
        assert_eq!(controller.bridge().checks_started(), 1);
    }
}
