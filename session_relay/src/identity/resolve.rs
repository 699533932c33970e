use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use http::HeaderMap;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::AUTH_COOKIE_NAME;
use crate::utils::get_cookie_from_headers;

use super::types::DisplayIdentity;

const SEGMENT_COUNT: usize = 3;
const PAYLOAD_INDEX: usize = 1;

/// Keys that may carry the user id, in priority order
const ID_KEYS: [&str; 3] = ["sub", "userId", "id"];

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

#[derive(Debug, Error)]
enum DecodeFailure {
    #[error("expected 3 segments, got {0}")]
    SegmentCount(usize),

    #[error("payload is not base64")]
    Base64,

    #[error("payload is not a JSON object: {0}")]
    Json(String),

    #[error("payload has no usable '{0}' claim")]
    MissingClaim(&'static str),
}

/// Turn a raw credential into a display identity, or `None`.
///
/// Splits on `.`, requires exactly three segments, base64-decodes the
/// payload (URL-safe or standard alphabet, padding optional) and reads
/// `sub`/`userId`/`id`, `email`, `firstName`, `lastName`. Never verifies
/// the signature and never panics; any failure yields `None`.
pub fn resolve(credential: &str) -> Option<DisplayIdentity> {
    match decode_identity(credential) {
        Ok(identity) => Some(identity),
        Err(e) => {
            tracing::debug!("Credential does not resolve to an identity: {}", e);
            None
        }
    }
}

/// [`resolve`] applied to the auth cookie of a request, if present.
pub fn resolve_from_headers(headers: &HeaderMap) -> Option<DisplayIdentity> {
    get_cookie_from_headers(headers, AUTH_COOKIE_NAME.as_str()).and_then(resolve)
}

fn decode_identity(credential: &str) -> Result<DisplayIdentity, DecodeFailure> {
    let segments: Vec<&str> = credential.trim().split('.').collect();
    if segments.len() != SEGMENT_COUNT {
        return Err(DecodeFailure::SegmentCount(segments.len()));
    }

    let payload = segments[PAYLOAD_INDEX];
    let bytes = URL_SAFE_LENIENT
        .decode(payload)
        .or_else(|_| STANDARD_LENIENT.decode(payload))
        .map_err(|_| DecodeFailure::Base64)?;

    let claims: Map<String, Value> =
        serde_json::from_slice(&bytes).map_err(|e| DecodeFailure::Json(e.to_string()))?;

    let id = ID_KEYS
        .iter()
        .find_map(|key| claims.get(*key).filter(|v| !v.is_null()))
        .and_then(claim_as_string)
        .ok_or(DecodeFailure::MissingClaim("sub"))?;

    let email = claims
        .get("email")
        .and_then(claim_as_string)
        .ok_or(DecodeFailure::MissingClaim("email"))?;

    Ok(DisplayIdentity {
        id,
        email,
        first_name: claims.get("firstName").and_then(claim_as_string),
        last_name: claims.get("lastName").and_then(claim_as_string),
    })
}

fn claim_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
