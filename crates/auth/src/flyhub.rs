//! FlyHub login: `POST {base}/Authenticate` with `{username, apikey}`.
//!
//! A successful reply carries the bearer token in `TokenId`.
use farelink_types::{FarelinkError, traits::Result};
use serde_json::{Value, json};

pub const AUTHENTICATE_PATH: &str = "/Authenticate";

#[must_use]
pub fn build_login_body(username: &str, api_key: &str) -> Value {
    json!({
        "username": username,
        "apikey": api_key,
    })
}

/// # Errors
///
/// Returns [`FarelinkError::Auth`] if `TokenId` is missing, not a string, or empty.
pub fn parse_token_response(json: &Value) -> Result<String> {
    json.get("TokenId")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or_else(|| FarelinkError::Auth("TokenId not found in authentication response".into()))
}
