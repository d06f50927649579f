//! Configuration loading and schema definitions
//!
//! Credentials and the payment mode come from the environment; UI and widget
//! presentation settings come from an optional TOML file.

mod credentials;
mod loader;
mod schema;

pub use credentials::{
    ApiKey, Credentials, Mode, API_KEY_ENV, MERCHANT_ID_ENV, MODE_ENV, PORTAL_ID_ENV,
    SUBACCOUNT_ID_ENV,
};
pub use loader::Config;
pub use schema::*;
