//! Request merging and HMAC-SHA384 signing.
//!
//! The hash is computed over the values of the merged payload, concatenated
//! without separator in ascending byte order of their keys. The receiving API
//! recomputes it the same way, so any change to the key ordering or value
//! encoding breaks authentication.

use autocc_core::config::{Credentials, API_KEY_ENV};
use autocc_core::{Error, ErrorCode, Result};
use autocc_crypto::CryptoError;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::payload::RequestPayload;

/// Field carrying the request hash
pub const HASH_FIELD: &str = "hash";

/// Fields every request starts from; caller fields may overwrite them
pub const REQUEST_DEFAULTS: [(&str, &str); 2] = [("responsetype", "JSON"), ("encoding", "UTF-8")];

/// Signs request payloads with a fixed set of credentials
///
/// Stateless apart from the credentials; safe to share across threads.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
}

impl RequestSigner {
    /// Create a signer for the given credentials
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Merge defaults, caller fields, and identity fields in that order
    pub fn prepare(&self, user_fields: &RequestPayload) -> Result<RequestPayload> {
        if user_fields.contains_key(HASH_FIELD) {
            return Err(Error::reserved_field(HASH_FIELD)
                .with_context("Caller fields must not carry a precomputed hash"));
        }

        let mut payload = RequestPayload::from_iter(REQUEST_DEFAULTS);
        payload.merge(user_fields);
        payload.merge(&identity_fields(&self.credentials));
        Ok(payload)
    }

    /// Build and sign the request for `user_fields`
    pub fn sign(&self, user_fields: &RequestPayload) -> Result<SignedRequest> {
        self.credentials.validate()?;

        let fields = self.prepare(user_fields)?;
        let hash = compute_hash(&fields, &self.credentials)?;

        tracing::debug!(
            fields = fields.len(),
            request = fields.get("request").unwrap_or_default(),
            "Request signed"
        );

        Ok(SignedRequest { fields, hash })
    }
}

/// Build and sign a request in one call
pub fn build_signed_request(
    user_fields: &RequestPayload,
    credentials: &Credentials,
) -> Result<SignedRequest> {
    RequestSigner::new(credentials.clone()).sign(user_fields)
}

fn identity_fields(credentials: &Credentials) -> RequestPayload {
    RequestPayload::from_iter([
        ("mid", credentials.merchant_id()),
        ("aid", credentials.subaccount_id()),
        ("portalid", credentials.portal_id()),
    ])
}

fn compute_hash(fields: &RequestPayload, credentials: &Credentials) -> Result<String> {
    autocc_crypto::hmac_sha384(
        credentials.api_key().expose(),
        fields.canonical_string().as_bytes(),
    )
    .map_err(crypto_error)
}

fn crypto_error(err: CryptoError) -> Error {
    match err {
        CryptoError::InvalidKey(_) => Error::missing_credential(API_KEY_ENV).with_source(err),
        CryptoError::SignatureMismatch => Error::signature_mismatch(),
        CryptoError::InvalidSignature(_) => {
            Error::new(ErrorCode::InvalidFormat, err.to_string()).with_source(err)
        }
    }
}

/// A payload and the hash over exactly its fields
///
/// There is no mutable access; to change a field convert back with
/// [`into_unsigned`](Self::into_unsigned) and sign again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    fields: RequestPayload,
    hash: String,
}

impl SignedRequest {
    /// Parse a signed request object, e.g. one received for verification
    pub fn from_json(json: &str) -> Result<Self> {
        let mut fields: RequestPayload = serde_json::from_str(json)?;
        let hash = fields.remove(HASH_FIELD).ok_or_else(|| {
            Error::validation(format!("Signed request has no '{}' field", HASH_FIELD))
        })?;
        Ok(Self { fields, hash })
    }

    /// The signed fields, without the hash
    pub fn fields(&self) -> &RequestPayload {
        &self.fields
    }

    /// Lowercase hex HMAC-SHA384
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Drop the hash and return the fields for modification
    pub fn into_unsigned(self) -> RequestPayload {
        self.fields
    }

    /// Recompute the hash with `credentials` and compare in constant time
    pub fn verify(&self, credentials: &Credentials) -> Result<()> {
        credentials.validate()?;
        autocc_crypto::verify_hmac_sha384(
            credentials.api_key().expose(),
            self.fields.canonical_string().as_bytes(),
            &self.hash,
        )
        .map_err(crypto_error)
    }

    /// Compact JSON with the hash as the last field
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Pretty-printed JSON with the hash as the last field
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Serialize for SignedRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        for (key, value) in self.fields.iter() {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry(HASH_FIELD, &self.hash)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autocc_core::config::Mode;
    use proptest::prelude::*;

    const FIXTURE_HASH: &str = "9430717acfddb6c2f9638c1d8ee941f4d0090268b693934f3d4c92d9b5ec3f5b58948a017777156d4f6e90a50831fb93";

    fn credentials() -> Credentials {
        Credentials::new("10001", "10002", "2000001", "secret").unwrap()
    }

    fn signer() -> RequestSigner {
        RequestSigner::new(credentials())
    }

    #[test]
    fn test_known_hash() {
        let signed = signer()
            .sign(&RequestPayload::credit_card_check(Mode::Test))
            .unwrap();

        assert_eq!(
            signed.fields().canonical_string(),
            "10002UTF-810001test2000001creditcardcheckJSONyes"
        );
        assert_eq!(signed.hash(), FIXTURE_HASH);
    }

    #[test]
    fn test_merge_order_and_hash_last() {
        let signed = signer()
            .sign(&RequestPayload::credit_card_check(Mode::Test))
            .unwrap();

        let json = signed.to_json();
        let expected_order = [
            "responsetype", "encoding", "mode", "request", "storecarddata", "mid", "aid",
            "portalid", "hash",
        ];
        let positions: Vec<usize> = expected_order
            .iter()
            .map(|key| json.find(&format!("\"{}\"", key)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", json);
    }

    #[test]
    fn test_caller_overrides_defaults_identity_overrides_caller() {
        let fields = RequestPayload::new()
            .with("encoding", "ISO-8859-1")
            .with("mid", "spoofed");
        let signed = signer().sign(&fields).unwrap();

        assert_eq!(signed.fields().get("encoding"), Some("ISO-8859-1"));
        assert_eq!(signed.fields().get("mid"), Some("10001"));
        assert_eq!(signed.fields().get("responsetype"), Some("JSON"));
    }

    #[test]
    fn test_rejects_caller_hash() {
        let fields = RequestPayload::new().with("hash", "deadbeef");
        let err = signer().sign(&fields).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReservedField);
    }

    #[test]
    fn test_build_signed_request_matches_signer() {
        let fields = RequestPayload::credit_card_check(Mode::Test);
        let a = build_signed_request(&fields, &credentials()).unwrap();
        let b = signer().sign(&fields).unwrap();
        assert_eq!(a.to_json(), b.to_json());
    }

    #[test]
    fn test_verify_and_tamper() {
        let signed = signer()
            .sign(&RequestPayload::credit_card_check(Mode::Test))
            .unwrap();
        assert!(signed.verify(&credentials()).is_ok());

        let tampered = SignedRequest::from_json(&signed.to_json().replace("creditcardcheck", "preauthorization")).unwrap();
        let err = tampered.verify(&credentials()).unwrap_err();
        assert_eq!(err.code, ErrorCode::SignatureMismatch);

        let other_key = Credentials::new("10001", "10002", "2000001", "other").unwrap();
        assert!(signed.verify(&other_key).is_err());
    }

    #[test]
    fn test_from_json_roundtrip() {
        let signed = signer()
            .sign(&RequestPayload::credit_card_check(Mode::Test))
            .unwrap();
        let parsed = SignedRequest::from_json(&signed.to_json_pretty()).unwrap();
        assert_eq!(parsed, signed);
    }

    #[test]
    fn test_from_json_without_hash() {
        let err = SignedRequest::from_json(r#"{"mid":"1"}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_resigning_after_change() {
        let signed = signer()
            .sign(&RequestPayload::credit_card_check(Mode::Test))
            .unwrap();
        let original_hash = signed.hash().to_string();

        let mut fields = signed.into_unsigned();
        fields.insert("mode", "live");
        let resigned = signer().sign(&fields).unwrap();

        assert_ne!(resigned.hash(), original_hash);
        assert!(resigned.verify(&credentials()).is_ok());
    }

    fn user_fields() -> impl Strategy<Value = Vec<(String, String)>> {
        proptest::collection::btree_map("x_[a-z]{1,8}", "[ -~]{0,12}", 1..8)
            .prop_map(|m| m.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_signing_is_deterministic(fields in user_fields()) {
            let payload = RequestPayload::from_iter(fields);
            let a = signer().sign(&payload).unwrap();
            let b = signer().sign(&payload).unwrap();
            prop_assert_eq!(a.to_json(), b.to_json());
        }

        #[test]
        fn prop_input_order_does_not_change_hash(fields in user_fields()) {
            let forward = RequestPayload::from_iter(fields.clone());
            let reversed = RequestPayload::from_iter(fields.into_iter().rev());
            let a = signer().sign(&forward).unwrap();
            let b = signer().sign(&reversed).unwrap();
            prop_assert_eq!(a.hash(), b.hash());
        }

        #[test]
        fn prop_changing_a_value_changes_hash(fields in user_fields(), index in any::<prop::sample::Index>()) {
            let original = RequestPayload::from_iter(fields.clone());
            let (key, value) = &fields[index.index(fields.len())];

            let mut changed = original.clone();
            changed.insert(key.clone(), format!("{}!", value));

            let a = signer().sign(&original).unwrap();
            let b = signer().sign(&changed).unwrap();
            prop_assert_ne!(a.hash(), b.hash());
        }
    }
}
