//! Structured errors with codes, context, and recovery suggestions
//!
//! Every failure the workspace can surface maps onto one [`ErrorCode`]:
//! - Configuration errors are fatal at startup and prevent request construction
//! - Validation errors reject caller input before anything is signed
//! - Form and protocol errors are user facing and leave the session usable

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // General errors (1xxx)
    /// Unclassified failure
    Unknown = 1000,
    /// Bug in this workspace
    Internal = 1001,

    // IO errors (2xxx)
    /// File or stream I/O failed
    IoError = 2000,
    /// A named file does not exist
    FileNotFound = 2001,

    // Configuration errors (3xxx)
    /// Generic configuration failure
    ConfigError = 3000,
    /// Explicit config file missing
    ConfigNotFound = 3001,
    /// Config file is not valid TOML for the schema
    ConfigParseError = 3002,
    /// A `PAYONE_*` credential is unset or blank
    MissingCredential = 3003,
    /// No supported card types
    EmptyCardTypeList = 3004,
    /// A setting has an unusable value
    InvalidConfigValue = 3005,

    // Form errors (4xxx)
    /// Generic form failure
    FormError = 4000,
    /// Submit pressed with empty hosted fields
    IncompleteForm = 4001,

    // Validation errors (6xxx)
    /// Generic input rejection
    ValidationError = 6000,
    /// Caller supplied a signer-owned field
    ReservedField = 6001,
    /// Input is not in the expected format
    InvalidFormat = 6002,

    // Security errors (7xxx)
    /// Generic security failure
    SecurityError = 7000,
    /// Request hash does not verify
    SignatureMismatch = 7001,

    // Protocol errors (9xxx)
    /// Generic widget protocol failure
    ProtocolError = 9000,
    /// Check status outside VALID/INVALID/ERROR
    UnexpectedStatus = 9001,
    /// Check result is not valid JSON
    MalformedResponse = 9002,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            1 => "General",
            2 => "IO",
            3 => "Configuration",
            4 => "Form",
            6 => "Validation",
            7 => "Security",
            9 => "Protocol",
            _ => "Unknown",
        }
    }

    /// Whether this error must abort startup
    pub fn is_fatal(&self) -> bool {
        matches!(self.code() / 1000, 2 | 3)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with rich context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context
    pub context: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {}", ctx)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a recovery suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Convert to a serializable report
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code,
            code_str: self.code.to_string(),
            category: self.code.category().to_string(),
            message: self.message.clone(),
            context: self.context.clone(),
            suggestion: self.suggestion.clone(),
            source: self.source.as_ref().map(|e| e.to_string()),
        }
    }

    // Convenience constructors

    /// Explicit config path does not exist
    pub fn config_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create an autocc.toml file or use --config to specify a path")
    }

    /// Credential variable unset or blank
    pub fn missing_credential(name: &str) -> Self {
        Self::new(
            ErrorCode::MissingCredential,
            format!("Missing or empty credential: {}", name),
        )
        .with_suggestion(format!("Set {} in the environment or in a .env file", name))
    }

    /// Card type list parsed to nothing
    pub fn empty_card_types() -> Self {
        Self::new(
            ErrorCode::EmptyCardTypeList,
            "No supported card types configured",
        )
        .with_suggestion("Set PAYONE_CC_TYPES to a comma-separated list such as \"V,M,A\"")
    }

    /// Generic validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// Caller supplied a field the signer owns
    pub fn reserved_field(field: &str) -> Self {
        Self::new(
            ErrorCode::ReservedField,
            format!("Request field '{}' is reserved and must not be supplied", field),
        )
    }

    /// Submit pressed before every hosted field was filled
    pub fn incomplete_form() -> Self {
        Self::new(ErrorCode::IncompleteForm, "Please fill out the form completely.")
    }

    /// Recomputed hash differs from the supplied one
    pub fn signature_mismatch() -> Self {
        Self::new(ErrorCode::SignatureMismatch, "Request hash does not match its fields")
            .with_suggestion("Re-sign the request after changing any field")
    }

    /// Check result with a status outside VALID/INVALID/ERROR
    pub fn unexpected_status(status: &str) -> Self {
        Self::new(
            ErrorCode::UnexpectedStatus,
            format!("API returned an unexpected status: {}", status),
        )
    }
}

/// Serializable error report for logging and API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Error code
    pub code: ErrorCode,
    /// Code as `E####`
    pub code_str: String,
    /// Category name
    pub category: String,
    /// Human-readable message
    pub message: String,
    /// Additional context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Recovery suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Source error, rendered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for CLI commands
pub mod exit_codes {
    /// Command succeeded
    pub const SUCCESS: i32 = 0;
    /// Unclassified failure
    pub const FAILURE: i32 = 1;
    /// Rejected input
    pub const VALIDATION_ERROR: i32 = 2;
    /// Missing or invalid configuration
    pub const CONFIG_ERROR: i32 = 3;
    /// Signature verification failed
    pub const SECURITY_ERROR: i32 = 5;

    use super::ErrorCode;

    /// Map an error code onto a process exit code
    pub fn for_code(code: ErrorCode) -> i32 {
        match code.code() / 1000 {
            3 => CONFIG_ERROR,
            6 => VALIDATION_ERROR,
            7 => SECURITY_ERROR,
            _ => FAILURE,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorCode::InvalidFormat, format!("JSON parse error: {}", err))
            .with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {}", err))
            .with_source(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_suggestion(suggestion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::MissingCredential.to_string(), "E3003");
        assert_eq!(ErrorCode::UnexpectedStatus.to_string(), "E9001");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::EmptyCardTypeList.category(), "Configuration");
        assert_eq!(ErrorCode::ReservedField.category(), "Validation");
        assert_eq!(ErrorCode::IncompleteForm.category(), "Form");
        assert_eq!(ErrorCode::UnexpectedStatus.category(), "Protocol");
    }

    #[test]
    fn test_only_config_and_io_are_fatal() {
        assert!(ErrorCode::MissingCredential.is_fatal());
        assert!(ErrorCode::FileNotFound.is_fatal());
        assert!(!ErrorCode::ReservedField.is_fatal());
        assert!(!ErrorCode::UnexpectedStatus.is_fatal());
        assert!(!ErrorCode::IncompleteForm.is_fatal());
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::missing_credential("PAYONE_KEY")
            .with_context("While loading credentials");

        assert_eq!(err.code, ErrorCode::MissingCredential);
        assert!(err.context.is_some());
        assert!(err.suggestion.is_some());
        assert!(err.to_string().contains("PAYONE_KEY"));
    }

    #[test]
    fn test_error_report_serialization() {
        let err = Error::reserved_field("hash").with_context("During request signing");

        let report = err.to_report();
        let json = serde_json::to_string(&report).unwrap();

        assert!(json.contains("E6001"));
        assert!(json.contains("Validation"));
        assert!(json.contains("RESERVED_FIELD"));
    }

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(exit_codes::for_code(ErrorCode::EmptyCardTypeList), exit_codes::CONFIG_ERROR);
        assert_eq!(exit_codes::for_code(ErrorCode::ReservedField), exit_codes::VALIDATION_ERROR);
        assert_eq!(exit_codes::for_code(ErrorCode::SignatureMismatch), exit_codes::SECURITY_ERROR);
        assert_eq!(exit_codes::for_code(ErrorCode::ProtocolError), exit_codes::FAILURE);
    }
}
