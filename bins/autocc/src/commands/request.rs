//! Request signing, page configuration, and verification commands

use std::io::Read;

use autocc_cli::output::{format_count, Status};
use autocc_core::config::{ConfigSchema, Credentials};
use autocc_request::{RequestPayload, RequestSigner, SignedRequest, WidgetInit};
use autocc_telemetry::Event;

use super::{load_card_types, load_mode};

/// Parse a `key=value` request field
pub fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}

fn signed_request(fields: &[(String, String)], mode: Option<&str>) -> anyhow::Result<SignedRequest> {
    let credentials = Credentials::from_env()?;
    let mode = load_mode(mode)?;

    let mut payload = RequestPayload::credit_card_check(mode);
    for (key, value) in fields {
        payload.insert(key.clone(), value.clone());
    }

    let signed = RequestSigner::new(credentials).sign(&payload)?;
    Event::new(
        "request_signed",
        serde_json::json!({ "mode": mode.as_str(), "fields": signed.fields().len() }),
    )
    .log();
    Ok(signed)
}

pub fn sign(fields: &[(String, String)], mode: Option<&str>, pretty: bool) -> anyhow::Result<()> {
    let signed = signed_request(fields, mode)?;

    if pretty {
        println!("{}", signed.to_json_pretty());
    } else {
        println!("{}", signed.to_json());
    }
    Ok(())
}

pub fn card_types(explicit: Option<&str>) -> anyhow::Result<()> {
    let card_types = load_card_types(explicit)?;
    println!("{}", card_types.to_json());
    Ok(())
}

pub fn page_config(schema: &ConfigSchema, mode: Option<&str>, pretty: bool) -> anyhow::Result<()> {
    let card_types = load_card_types(None)?;
    let signed = signed_request(&[], mode)?;
    let init = WidgetInit::new(&signed, &card_types, &schema.widget, &schema.detection);

    let json = if pretty {
        init.to_json_pretty()?
    } else {
        init.to_json()?
    };
    println!("{}", json);
    Ok(())
}

pub fn verify(input: &str) -> anyhow::Result<()> {
    let json = if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", input, e))?
    };

    let signed = SignedRequest::from_json(&json)?;
    let credentials = Credentials::from_env()?;
    signed.verify(&credentials)?;

    Status::success(&format!(
        "Hash valid over {}",
        format_count(signed.fields().len(), "field", "fields")
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("amount=100").unwrap(),
            ("amount".to_string(), "100".to_string())
        );
        assert_eq!(
            parse_field("reference=a=b").unwrap(),
            ("reference".to_string(), "a=b".to_string())
        );
        assert_eq!(parse_field("note=").unwrap(), ("note".to_string(), String::new()));
    }

    #[test]
    fn test_parse_field_rejects_missing_key() {
        assert!(parse_field("=value").is_err());
        assert!(parse_field("novalue").is_err());
    }
}
