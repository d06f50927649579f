//! Command implementations

pub mod request;
pub mod simulate;

use autocc_core::card_types::SupportedCardTypes;
use autocc_core::config::Mode;

/// Card types from an explicit list or `PAYONE_CC_TYPES`
pub fn load_card_types(explicit: Option<&str>) -> autocc_core::Result<SupportedCardTypes> {
    match explicit {
        Some(raw) => SupportedCardTypes::parse(raw),
        None => SupportedCardTypes::from_env(),
    }
}

/// Mode from an explicit flag or `PAYONE_MODE`
pub fn load_mode(explicit: Option<&str>) -> autocc_core::Result<Mode> {
    match explicit {
        Some(raw) => raw.parse(),
        None => Mode::from_env(),
    }
}
