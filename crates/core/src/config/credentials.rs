//! API identity and secret, loaded once from the environment

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Merchant account id variable
pub const MERCHANT_ID_ENV: &str = "PAYONE_MERCHANT_ID";
/// Portal id variable
pub const PORTAL_ID_ENV: &str = "PAYONE_PORTAL_ID";
/// Subaccount id variable
pub const SUBACCOUNT_ID_ENV: &str = "PAYONE_SUBACCOUNT_ID";
/// Shared secret variable
pub const API_KEY_ENV: &str = "PAYONE_KEY";
/// Optional `test`/`live` switch
pub const MODE_ENV: &str = "PAYONE_MODE";

/// Shared secret used to key the request hash
///
/// Never printed by `Debug` and never serialized.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Raw key bytes for the MAC
    pub fn expose(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Merchant identity plus API key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    merchant_id: String,
    subaccount_id: String,
    portal_id: String,
    api_key: ApiKey,
}

impl Credentials {
    /// Build credentials, rejecting any empty value
    pub fn new(
        merchant_id: impl Into<String>,
        subaccount_id: impl Into<String>,
        portal_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        let credentials = Self {
            merchant_id: merchant_id.into(),
            subaccount_id: subaccount_id.into(),
            portal_id: portal_id.into(),
            api_key: ApiKey(api_key.into()),
        };
        credentials.validate()?;
        Ok(credentials)
    }

    /// Read credentials from the `PAYONE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through an arbitrary variable lookup
    ///
    /// Values are kept byte for byte; blank ones are rejected by [`Self::validate`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |name: &str| lookup(name).ok_or_else(|| Error::missing_credential(name));

        Self::new(
            require(MERCHANT_ID_ENV)?,
            require(SUBACCOUNT_ID_ENV)?,
            require(PORTAL_ID_ENV)?,
            require(API_KEY_ENV)?,
        )
    }

    /// Check that no credential is blank
    pub fn validate(&self) -> Result<()> {
        let checks = [
            (MERCHANT_ID_ENV, self.merchant_id.as_str()),
            (SUBACCOUNT_ID_ENV, self.subaccount_id.as_str()),
            (PORTAL_ID_ENV, self.portal_id.as_str()),
            (API_KEY_ENV, self.api_key.0.as_str()),
        ];

        for (name, value) in checks {
            if value.trim().is_empty() {
                return Err(Error::missing_credential(name));
            }
        }
        Ok(())
    }

    /// Merchant account id (`mid`)
    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    /// Subaccount id (`aid`)
    pub fn subaccount_id(&self) -> &str {
        &self.subaccount_id
    }

    /// Portal id (`portalid`)
    pub fn portal_id(&self) -> &str {
        &self.portal_id
    }

    /// Key for the request hash
    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }
}

/// Payment platform mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Sandbox transactions
    #[default]
    Test,
    /// Real transactions
    Live,
}

impl Mode {
    /// Value sent in the `mode` request field
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Test => "test",
            Mode::Live => "live",
        }
    }

    /// Read `PAYONE_MODE`, defaulting to test when unset
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read `PAYONE_MODE` through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        match lookup(MODE_ENV) {
            None => Ok(Mode::default()),
            Some(raw) if raw.trim().is_empty() => Ok(Mode::default()),
            Some(raw) => raw.parse(),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "test" => Ok(Mode::Test),
            "live" => Ok(Mode::Live),
            other => Err(Error::new(
                crate::error::ErrorCode::InvalidConfigValue,
                format!("Invalid mode '{}'", other),
            )
            .with_suggestion("Use \"test\" or \"live\"")),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_env() -> HashMap<String, String> {
        env(&[
            (MERCHANT_ID_ENV, "10001"),
            (SUBACCOUNT_ID_ENV, "10002"),
            (PORTAL_ID_ENV, "2000001"),
            (API_KEY_ENV, "secret"),
        ])
    }

    #[test]
    fn test_from_lookup() {
        let vars = full_env();
        let creds = Credentials::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(creds.merchant_id(), "10001");
        assert_eq!(creds.subaccount_id(), "10002");
        assert_eq!(creds.portal_id(), "2000001");
        assert_eq!(creds.api_key().expose(), b"secret");
    }

    #[test]
    fn test_missing_credential_named() {
        let mut vars = full_env();
        vars.remove(PORTAL_ID_ENV);
        let err = Credentials::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingCredential);
        assert!(err.message.contains(PORTAL_ID_ENV));
    }

    #[test]
    fn test_key_whitespace_kept() {
        let mut vars = full_env();
        vars.insert(API_KEY_ENV.to_string(), " secret ".to_string());
        let creds = Credentials::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(creds.api_key().expose(), b" secret ");
    }

    #[test]
    fn test_blank_env_value_rejected() {
        let mut vars = full_env();
        vars.insert(MERCHANT_ID_ENV.to_string(), "  ".to_string());
        let err = Credentials::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingCredential);
        assert!(err.message.contains(MERCHANT_ID_ENV));
    }

    #[test]
    fn test_blank_key_rejected() {
        let err = Credentials::new("1", "2", "3", "   ").unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingCredential);
        assert!(err.message.contains(API_KEY_ENV));
    }

    #[test]
    fn test_debug_redacts_key() {
        let creds = Credentials::new("1", "2", "3", "topsecret").unwrap();
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("topsecret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(Mode::from_lookup(|_| None).unwrap(), Mode::Test);
        assert_eq!(Mode::from_lookup(|_| Some("LIVE".into())).unwrap(), Mode::Live);
        let err = Mode::from_lookup(|_| Some("prod".into())).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfigValue);
    }
}
