//! Advisory JWT payload decoder.
//!
//! Extracts claims from a session token **without verifying its
//! signature**. Verification is the backend's responsibility; this decoder
//! exists for UI and session-timing decisions (who am I, when does my
//! session lapse) and must never be used for authorization enforcement -
//! the backend re-checks authorization on every call regardless of what
//! the client decodes here.
//!
//! Decoding is stateless: every call re-splits and re-parses the token.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use thiserror::Error;

use partsgrid_core::{DealerId, Role, UserId};

/// Errors that can occur while decoding a token.
///
/// Callers treat any decode failure identically to "no token": the
/// session is invalid and logout paths apply.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The token has fewer than two `.`-separated segments.
    #[error("token has no payload segment")]
    MissingPayload,

    /// The payload segment is not valid base64url.
    #[error("token payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded payload is not the expected JSON shape.
    #[error("token payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Claims carried in a PartsGrid session token.
///
/// Unknown claims are ignored; `exp` is the only claim the backend
/// guarantees to be present.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    /// Account id of the session owner.
    #[serde(default)]
    pub id: Option<UserId>,

    /// Dealer the session is scoped to, when the account is dealer-bound.
    #[serde(default, alias = "dealerId")]
    pub dealer_id: Option<DealerId>,

    /// Role claim used for dashboard/navigation gating (advisory only).
    #[serde(default)]
    pub role: Option<Role>,

    /// Expiry, seconds since epoch.
    pub exp: i64,

    /// Issued-at, seconds since epoch.
    #[serde(default)]
    pub iat: Option<i64>,
}

impl Claims {
    /// The expiry instant.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        // Out-of-range exp values clamp to the epoch, which reads as
        // long-expired - the safe direction.
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Whether the token has already lapsed at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at() <= now
    }
}

/// Decode the payload segment of a JWT into [`Claims`].
///
/// Splits on `.`, base64url-decodes the middle segment, and parses the
/// JSON. Accepts both padded and unpadded payload encodings.
///
/// # Errors
///
/// Returns [`DecodeError`] when the token has fewer than two segments,
/// the payload is not valid base64, or the decoded text is not valid
/// JSON containing an `exp` claim.
pub fn decode(token: &str) -> Result<Claims, DecodeError> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or(DecodeError::MissingPayload)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    let claims = serde_json::from_slice(&bytes)?;
    Ok(claims)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Build a structurally valid (but unsigned) three-segment token.
    fn mint(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload).unwrap());
        format!("{header}.{body}.sig")
    }

    #[test]
    fn test_decode_round_trip() {
        let token = mint(&serde_json::json!({
            "id": 101,
            "dealerId": 7,
            "role": "Dealer",
            "exp": 2_000_000_000i64,
            "iat": 1_900_000_000i64,
        }));
        let claims = decode(&token).unwrap();
        assert_eq!(claims.id, Some(UserId::new(101)));
        assert_eq!(claims.dealer_id, Some(DealerId::new(7)));
        assert_eq!(claims.role, Some(Role::Dealer));
        assert_eq!(claims.exp, 2_000_000_000);
        assert_eq!(claims.iat, Some(1_900_000_000));
    }

    #[test]
    fn test_decode_snake_case_dealer_id() {
        let token = mint(&serde_json::json!({"dealer_id": 9, "exp": 2_000_000_000i64}));
        assert_eq!(decode(&token).unwrap().dealer_id, Some(DealerId::new(9)));
    }

    #[test]
    fn test_decode_ignores_unknown_claims() {
        let token = mint(&serde_json::json!({"exp": 2_000_000_000i64, "aud": "partsgrid"}));
        assert!(decode(&token).is_ok());
    }

    #[test]
    fn test_decode_failures_are_errors_not_panics() {
        assert!(matches!(decode(""), Err(DecodeError::MissingPayload)));
        assert!(matches!(decode("abc"), Err(DecodeError::MissingPayload)));
        assert!(decode("a.b").is_err());
    }

    #[test]
    fn test_decode_rejects_non_json_payload() {
        let garbage = URL_SAFE_NO_PAD.encode(b"not json at all");
        let token = format!("h.{garbage}.s");
        assert!(matches!(decode(&token), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_decode_requires_exp() {
        let token = mint(&serde_json::json!({"id": 1}));
        assert!(matches!(decode(&token), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_decode_accepts_padded_payload() {
        let padded = base64::engine::general_purpose::URL_SAFE
            .encode(serde_json::to_vec(&serde_json::json!({"exp": 2_000_000_000i64})).unwrap());
        let token = format!("h.{padded}.s");
        assert!(decode(&token).is_ok());
    }

    #[test]
    fn test_expiry_helpers() {
        let claims = decode(&mint(&serde_json::json!({"exp": 0}))).unwrap();
        assert!(claims.is_expired(Utc::now()));
        assert_eq!(claims.expires_at(), DateTime::UNIX_EPOCH);
    }
}
