//! Projection of a session onto UI commands.

use autocc_core::card_types::BrandCode;
use serde::Serialize;

use crate::session::{DetectionSession, MessageLevel};

/// One instruction for the embedding page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum UiCommand {
    /// Draw a brand icon in its current state
    Icon {
        /// Brand code
        brand: BrandCode,
        /// CDN image for the brand
        #[serde(rename = "iconUrl")]
        icon_url: String,
        /// Gets the selected class
        selected: bool,
        /// Gets the clickable class
        clickable: bool,
    },
    /// Show the message box with `class` applied
    ShowMessage {
        /// Severity
        level: MessageLevel,
        /// Alert class for `level`
        class: &'static str,
        /// Message text
        text: String,
    },
    /// Hide the message box
    HideMessage,
    /// Raw check result for the diagnostics view
    RenderResponse {
        /// Pretty-printed JSON
        text: String,
    },
    /// Enable or disable the submit action
    SetSubmitEnabled {
        /// Whether submit is accepted
        enabled: bool,
    },
}

/// Full view of `session`, icons first in display order
///
/// Pure: the same session always yields the same commands.
pub fn render(session: &DetectionSession) -> Vec<UiCommand> {
    let mut commands: Vec<UiCommand> = session
        .card_types()
        .iter()
        .map(|brand| UiCommand::Icon {
            brand: brand.clone(),
            icon_url: brand.icon_url(),
            selected: session.selected_type() == Some(brand),
            clickable: session.manual_selection_enabled(),
        })
        .collect();

    commands.push(match session.message() {
        Some(message) => UiCommand::ShowMessage {
            level: message.level,
            class: message.level.css_class(),
            text: message.text.clone(),
        },
        None => UiCommand::HideMessage,
    });

    if let Some(response) = session.response() {
        commands.push(UiCommand::RenderResponse {
            text: response.to_string(),
        });
    }

    commands.push(UiCommand::SetSubmitEnabled {
        enabled: !session.check_in_flight(),
    });

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Message;
    use autocc_core::card_types::load_supported_types;

    fn session() -> DetectionSession {
        DetectionSession::new(load_supported_types("V,M,A").unwrap())
    }

    #[test]
    fn test_fresh_session() {
        let commands = render(&session());

        assert_eq!(commands.len(), 5);
        assert_eq!(
            commands[0],
            UiCommand::Icon {
                brand: BrandCode::new("V"),
                icon_url: "https://cdn.pay1.de/cc/v/l/default.png".to_string(),
                selected: false,
                clickable: false,
            }
        );
        assert_eq!(commands[3], UiCommand::HideMessage);
        assert_eq!(commands[4], UiCommand::SetSubmitEnabled { enabled: true });
    }

    #[test]
    fn test_selection_message_and_flight() {
        let mut session = session();
        session.selected_type = Some(BrandCode::new("M"));
        session.manual_selection_enabled = true;
        session.message = Some(Message::danger("nope"));
        session.response = Some("{}".to_string());
        session.check_in_flight = true;

        let commands = render(&session);
        let selected: Vec<bool> = commands
            .iter()
            .filter_map(|c| match c {
                UiCommand::Icon { selected, clickable, .. } => {
                    assert!(*clickable);
                    Some(*selected)
                }
                _ => None,
            })
            .collect();
        assert_eq!(selected, vec![false, true, false]);
        assert!(commands.contains(&UiCommand::ShowMessage {
            level: MessageLevel::Danger,
            class: "alert alert-danger",
            text: "nope".to_string(),
        }));
        assert!(commands.contains(&UiCommand::RenderResponse { text: "{}".to_string() }));
        assert_eq!(commands.last(), Some(&UiCommand::SetSubmitEnabled { enabled: false }));
    }

    #[test]
    fn test_serialized_form() {
        let json = serde_json::to_value(render(&session())).unwrap();
        assert_eq!(json[0]["op"], "icon");
        assert_eq!(json[0]["iconUrl"], "https://cdn.pay1.de/cc/v/l/default.png");
        assert_eq!(json[3]["op"], "hideMessage");
        assert_eq!(json[4]["op"], "setSubmitEnabled");
    }
}
