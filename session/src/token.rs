//! Bearer-token inspection.
//!
//! The API issues HS256 JWTs. The client cannot verify them and does not try;
//! it only reads the payload segment to learn the subject and expiry so stale
//! sessions are dropped before the server has to reject them.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Value;

use crate::config::ExpiryPolicy;

/// Unverified claims read from a JWT payload.
///
/// Any JSON payload is accepted; claims of an unexpected type are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenClaims {
    /// Subject the token was issued to, as sent.
    pub sub: Option<Value>,
    /// Expiry in seconds since the Unix epoch; may be fractional.
    pub exp: Option<f64>,
}

/// Error returned by [`decode_claims`].
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token is not a three-part JWT")]
    Malformed,
    #[error("token payload is not base64url: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("token payload is not JSON: {0}")]
    Claims(#[from] serde_json::Error),
}

/// Decode the payload segment of `token` without checking its signature.
///
/// # Errors
///
/// Returns [`TokenError`] if the token is not `header.payload.signature` or
/// the payload is not base64url-encoded JSON.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_sig), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenError::Malformed);
    };
    // Some issuers pad the segment anyway.
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    let claims: Value = serde_json::from_slice(&bytes)?;
    Ok(TokenClaims {
        sub: claims.get("sub").filter(|v| !v.is_null()).cloned(),
        exp: claims.get("exp").and_then(Value::as_f64),
    })
}

/// True when `token` carries no `exp` claim or `exp` has not passed at `now`.
///
/// Undecodable tokens are invalid.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn is_unexpired(token: &str, now: i64) -> bool {
    match decode_claims(token) {
        Ok(claims) => claims.exp.map_or(true, |exp| exp >= now as f64),
        Err(e) => {
            log::warn!("cannot decode bearer token: {e}");
            false
        }
    }
}

/// Token validity under `policy`: non-empty, and unexpired when enforced.
#[must_use]
pub fn is_valid(token: &str, now: i64, policy: ExpiryPolicy) -> bool {
    if token.is_empty() {
        return false;
    }
    match policy {
        ExpiryPolicy::Enforce => is_unexpired(token, now),
        ExpiryPolicy::Ignore => true,
    }
}
