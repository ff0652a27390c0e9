//! Cart session identifiers.
//!
//! A session id names the storage slot of one shopper's cart. Ids are
//! opaque URL-safe strings carried in the `X-Session-Id` header.

use crate::error::AppError;
use axum::http::HeaderMap;
use base64::Engine as _;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Header carrying the cart session id.
pub const SESSION_HEADER: &str = "x-session-id";

/// Random bytes before base64 encoding.
const SESSION_ID_BYTES: usize = 16;

static SESSION_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{16,128}$").unwrap());

/// Generates a fresh session id (22 URL-safe characters).
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random source fails.
pub fn generate_session_id() -> Result<String, AppError> {
    let mut buffer = [0u8; SESSION_ID_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal(
            "Failed to generate session id",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

pub fn is_valid_session_id(id: &str) -> bool {
    SESSION_ID_REGEX.is_match(id)
}

/// Reads and validates the session id from request headers.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the header is missing, is not
/// valid UTF-8, or does not look like a session id.
pub fn extract_session_id(headers: &HeaderMap) -> Result<String, AppError> {
    let value = headers
        .get(SESSION_HEADER)
        .ok_or_else(|| {
            AppError::bad_request(
                "Missing X-Session-Id header",
                json!({ "hint": "POST /api/session to obtain one" }),
            )
        })?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid X-Session-Id header", json!({})))?
        .trim();

    if !is_valid_session_id(value) {
        return Err(AppError::bad_request(
            "Invalid X-Session-Id header",
            json!({ "expected": "16-128 characters from [A-Za-z0-9_-]" }),
        ));
    }

    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use std::collections::HashSet;

    #[test]
    fn test_generate_session_id_shape() {
        let id = generate_session_id().unwrap();
        assert_eq!(id.len(), 22);
        assert!(is_valid_session_id(&id));
    }

    #[test]
    fn test_generate_session_id_is_unique() {
        let ids: HashSet<String> = (0..1000)
            .map(|_| generate_session_id().unwrap())
            .collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_extract_valid_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            SESSION_HEADER,
            HeaderValue::from_static("abcDEF0123456789_-xy"),
        );

        assert_eq!(
            extract_session_id(&headers).unwrap(),
            "abcDEF0123456789_-xy"
        );
    }

    #[test]
    fn test_extract_missing_header() {
        let headers = HeaderMap::new();
        assert!(matches!(
            extract_session_id(&headers),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_extract_rejects_short_or_odd_ids() {
        for bad in ["short", "has spaces in the middle", "semi;colon:0123456789"] {
            let mut headers = HeaderMap::new();
            headers.insert(SESSION_HEADER, HeaderValue::from_str(bad).unwrap());
            assert!(extract_session_id(&headers).is_err(), "{bad} should be rejected");
        }
    }
}
