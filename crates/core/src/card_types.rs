//! Supported card brands
//!
//! The brand list is sourced from a single comma-separated configuration
//! string. Its order is the icon display order and is never re-sorted.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment variable holding the comma-separated brand list
pub const CARD_TYPES_ENV: &str = "PAYONE_CC_TYPES";

/// Base URL of the provider's brand icon CDN
const ICON_CDN: &str = "https://cdn.pay1.de/cc";

/// Short uppercase identifier for a card network
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrandCode(String);

impl BrandCode {
    /// Normalize a raw code: trimmed and uppercased
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_uppercase())
    }

    /// Code as sent to the widget
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Icon URL for this brand on the provider CDN
    pub fn icon_url(&self) -> String {
        format!("{}/{}/l/default.png", ICON_CDN, self.0.to_lowercase())
    }
}

impl fmt::Display for BrandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BrandCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered, deduplicated list of supported brands
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SupportedCardTypes(Vec<BrandCode>);

impl SupportedCardTypes {
    /// Parse a comma-separated brand list
    ///
    /// Tokens are trimmed and uppercased, empty tokens are dropped and
    /// duplicates keep their first position. An empty result is a
    /// configuration error.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut codes: Vec<BrandCode> = Vec::new();
        for token in raw.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let code = BrandCode::new(token);
            if !codes.contains(&code) {
                codes.push(code);
            }
        }

        if codes.is_empty() {
            return Err(Error::empty_card_types());
        }

        Ok(Self(codes))
    }

    /// Load the brand list from `PAYONE_CC_TYPES`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the brand list through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw = lookup(CARD_TYPES_ENV).ok_or_else(Error::empty_card_types)?;
        Self::parse(&raw)
    }

    /// Codes in display order
    pub fn as_slice(&self) -> &[BrandCode] {
        &self.0
    }

    /// Iterate in display order
    pub fn iter(&self) -> impl Iterator<Item = &BrandCode> {
        self.0.iter()
    }

    /// Number of brands
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; an empty list cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `code` is supported
    pub fn contains(&self, code: &BrandCode) -> bool {
        self.0.contains(code)
    }

    /// JSON array for embedding into the client initialization payload
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }
}

impl<'a> IntoIterator for &'a SupportedCardTypes {
    type Item = &'a BrandCode;
    type IntoIter = std::slice::Iter<'a, BrandCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Parse a comma-separated brand list
pub fn load_supported_types(raw: &str) -> Result<SupportedCardTypes> {
    SupportedCardTypes::parse(raw)
}
