//! Credit card check results.

use autocc_core::{Error, ErrorCode, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Status reported by the widget's check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CheckStatus {
    /// `VALID`
    Valid,
    /// `INVALID`
    Invalid,
    /// `ERROR`
    Error,
    /// Any status this crate does not know
    Other(String),
}

impl From<String> for CheckStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "VALID" => CheckStatus::Valid,
            "INVALID" => CheckStatus::Invalid,
            "ERROR" => CheckStatus::Error,
            _ => CheckStatus::Other(raw),
        }
    }
}

impl From<CheckStatus> for String {
    fn from(status: CheckStatus) -> Self {
        match status {
            CheckStatus::Valid => "VALID".to_string(),
            CheckStatus::Invalid => "INVALID".to_string(),
            CheckStatus::Error => "ERROR".to_string(),
            CheckStatus::Other(raw) => raw,
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from(self.clone()))
    }
}

/// Result object delivered by the widget's check callback
///
/// Fields other than the three interpreted here (for example the pseudo
/// card number) are kept in `extra` so the diagnostics view shows them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Check status
    pub status: CheckStatus,

    /// Provider error code on INVALID/ERROR
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub errorcode: Option<String>,

    /// Provider error message on INVALID/ERROR
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errormessage: Option<String>,

    /// Every other field of the result
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CheckResult {
    /// Result with `status` and no error details
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::from(status.into()),
            errorcode: None,
            errormessage: None,
            extra: Map::new(),
        }
    }

    /// Attach an error code and message
    #[must_use]
    pub fn with_error(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.errorcode = Some(code.into());
        self.errormessage = Some(message.into());
        self
    }

    /// Parse the widget's JSON result
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            Error::new(
                ErrorCode::MalformedResponse,
                format!("Malformed check result: {}", e),
            )
            .with_source(e)
        })
    }

    /// Pretty JSON for the diagnostics view
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| format!("{:?}", self))
    }

    /// Classify the result
    pub fn outcome(&self) -> CheckOutcome {
        match &self.status {
            CheckStatus::Valid => CheckOutcome::Valid,
            CheckStatus::Invalid | CheckStatus::Error => CheckOutcome::Rejected {
                errorcode: self.errorcode.clone().unwrap_or_else(|| "unknown".to_string()),
                errormessage: self.errormessage.clone().unwrap_or_default(),
            },
            CheckStatus::Other(status) => CheckOutcome::Unexpected(status.clone()),
        }
    }
}

/// How a check result was presented
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Card accepted
    Valid,
    /// `INVALID` or `ERROR` with the provider's code and message
    Rejected {
        /// Provider code, `unknown` when absent
        errorcode: String,
        /// Provider message, empty when absent
        errormessage: String,
    },
    /// A status outside the known set
    Unexpected(String),
    /// The result could not be parsed at all
    Malformed,
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}
