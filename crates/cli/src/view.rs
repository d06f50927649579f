//! Text rendering of detection UI commands

use autocc_detection::{MessageLevel, UiCommand};
use owo_colors::OwoColorize;

/// Plain-text lines describing the projected UI
///
/// Selected icons are bracketed; a trailing note marks manual selection.
pub fn describe(commands: &[UiCommand]) -> Vec<String> {
    let mut icons = Vec::new();
    let mut clickable = false;
    let mut lines = Vec::new();

    for command in commands {
        match command {
            UiCommand::Icon { brand, selected, clickable: c, .. } => {
                clickable |= *c;
                if *selected {
                    icons.push(format!("[{}]", brand));
                } else {
                    icons.push(brand.to_string());
                }
            }
            UiCommand::ShowMessage { level, text, .. } => {
                lines.push(format!("message ({}): {}", level_name(*level), text));
            }
            UiCommand::HideMessage => lines.push("message: hidden".to_string()),
            UiCommand::RenderResponse { text } => {
                lines.push(format!("response:\n{}", text));
            }
            UiCommand::SetSubmitEnabled { enabled } => {
                let state = if *enabled { "enabled" } else { "disabled" };
                lines.push(format!("submit: {}", state));
            }
        }
    }

    let mut icon_line = format!("icons: {}", icons.join(" "));
    if clickable {
        icon_line.push_str("  (manual selection enabled)");
    }
    lines.insert(0, icon_line);
    lines
}

/// Print the projected UI with message levels colored
pub fn print(commands: &[UiCommand]) {
    for line in describe(commands) {
        if line.starts_with("message (success)") {
            println!("  {}", line.green());
        } else if line.starts_with("message (warning)") {
            println!("  {}", line.yellow());
        } else if line.starts_with("message (danger)") {
            println!("  {}", line.red());
        } else {
            println!("  {}", line.dimmed());
        }
    }
}

fn level_name(level: MessageLevel) -> &'static str {
    match level {
        MessageLevel::Success => "success",
        MessageLevel::Warning => "warning",
        MessageLevel::Danger => "danger",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autocc_detection::scripted::ScriptedBridge;
    use autocc_detection::DetectionController;
    use autocc_core::card_types::SupportedCardTypes;
    use autocc_core::config::MessageTexts;

    fn controller() -> DetectionController<ScriptedBridge> {
        DetectionController::new(
            ScriptedBridge::new(),
            SupportedCardTypes::parse("V,M").unwrap(),
            MessageTexts::default(),
        )
    }

    #[test]
    fn test_describe_unknown_then_click() {
        let mut controller = controller();
        controller.on_detection_result("?");
        let lines = describe(&controller.render());
        assert_eq!(lines[0], "icons: V M  (manual selection enabled)");
        assert!(lines[1].starts_with("message (warning): "));
        assert_eq!(lines[2], "submit: enabled");

        controller.on_icon_click("M");
        let lines = describe(&controller.render());
        assert_eq!(lines[0], "icons: V [M]  (manual selection enabled)");
        assert_eq!(lines[1], "message: hidden");
    }
}
