//! JWT expiry inspection.
//!
//! Only the `exp` claim of the payload segment is read. Signatures are
//! not verified; this is a client-side hint, the backend stays the
//! authority on token validity.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Claims {
    exp: i64,
}

/// Expiry time encoded in the token, if it is a JWT carrying `exp`.
pub fn expires_at(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    DateTime::from_timestamp(claims.exp, 0)
}

/// Malformed tokens count as expired.
pub fn is_expired(token: &str) -> bool {
    match expires_at(token) {
        Some(exp) => exp <= Utc::now(),
        None => true,
    }
}

#[cfg(test)]
pub(crate) fn make_jwt(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"1","exp":{}}}"#, exp));
    format!("{}.{}.signature", header, payload)
}
