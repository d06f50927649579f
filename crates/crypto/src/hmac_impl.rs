//! HMAC-SHA384 signing and verification.

use hmac::{Hmac, Mac};
use sha2::Sha384;

use crate::{CryptoError, Result};

type HmacSha384 = Hmac<Sha384>;

/// Length of a hex-encoded SHA-384 digest.
pub const SHA384_HEX_LEN: usize = 96;

/// Generate HMAC-SHA384 signature.
///
/// # Arguments
/// * `key` - Secret key bytes, must not be empty
/// * `message` - Message to sign
///
/// # Returns
/// Signature as lowercase hex string
pub fn hmac_sha384(key: &[u8], message: &[u8]) -> Result<String> {
    if key.is_empty() {
        return Err(CryptoError::InvalidKey("key must not be empty".to_string()));
    }

    let mut mac = HmacSha384::new_from_slice(key)
        .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
    mac.update(message);
    let result = mac.finalize();
    Ok(hex::encode(result.into_bytes()))
}

/// Recompute the HMAC-SHA384 of `message` and compare it with `signature_hex`.
///
/// Uppercase hex is accepted; anything that is not a 96 character hex string
/// is rejected before comparison.
pub fn verify_hmac_sha384(key: &[u8], message: &[u8], signature_hex: &str) -> Result<()> {
    if signature_hex.len() != SHA384_HEX_LEN
        || !signature_hex.chars().all(|c| c.is_ascii_hexdigit())
    {
        return Err(CryptoError::InvalidSignature(format!(
            "expected {} hex characters",
            SHA384_HEX_LEN
        )));
    }

    let expected = hmac_sha384(key, message)?;
    verify_signature(&signature_hex.to_ascii_lowercase(), &expected)
}

/// Verify a signature against an expected value.
///
/// # Arguments
/// * `signature` - The signature to verify (hex-encoded)
/// * `expected` - The expected signature (hex-encoded)
///
/// # Returns
/// Ok(()) if signatures match, Err otherwise
pub fn verify_signature(signature: &str, expected: &str) -> Result<()> {
    if crate::constant_time_compare(signature.as_bytes(), expected.as_bytes()) {
        Ok(())
    } else {
        Err(CryptoError::SignatureMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hmac_sha384_rfc4231_case_2() {
        let sig = hmac_sha384(b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(
            sig,
            "af45d2e376484031617f78d2b58a6b1b9c7ef464f5a01b47e42ec3736322445e8e2240ca5e69e2c78b3239ecfab21649"
        );
    }

    #[test]
    fn test_hmac_sha384_shape() {
        let sig = hmac_sha384(b"secret", b"hello world").unwrap();

        assert_eq!(sig.len(), SHA384_HEX_LEN);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_hmac_sha384_empty_key() {
        assert!(matches!(
            hmac_sha384(b"", b"hello"),
            Err(CryptoError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_verify_roundtrip_and_case() {
        let sig = hmac_sha384(b"secret", b"payload").unwrap();
        assert!(verify_hmac_sha384(b"secret", b"payload", &sig).is_ok());
        assert!(verify_hmac_sha384(b"secret", b"payload", &sig.to_uppercase()).is_ok());
        assert_eq!(
            verify_hmac_sha384(b"secret", b"payload2", &sig),
            Err(CryptoError::SignatureMismatch)
        );
    }

    #[test]
    fn test_verify_rejects_malformed() {
        assert!(matches!(
            verify_hmac_sha384(b"secret", b"payload", "abc123"),
            Err(CryptoError::InvalidSignature(_))
        ));
    }

    #[test]
    fn test_verify_signature_mismatch() {
        assert!(verify_signature("abc123", "abc123").is_ok());
        assert!(verify_signature("abc123", "def456").is_err());
    }
}
