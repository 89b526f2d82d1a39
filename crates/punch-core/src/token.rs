//! JWT payload peeking.
//!
//! The client never verifies token signatures; that is the backend's
//! job. It only needs two things from the access token: the `exp`
//! claim to decide whether a refresh is due, and the `role`/`roles`
//! claim to gate navigation. Both reads are fail-safe: anything that
//! does not split, decode, and parse cleanly counts as expired /
//! role-less, never as a panic or a passthrough.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use thiserror::Error;

/// Why a token payload could not be decoded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClaimsError {
    #[error("token is not a three-part JWT")]
    Malformed,
    #[error("payload segment is not valid base64url")]
    Base64,
    #[error("payload is not valid claims JSON")]
    Json,
}

/// Claims the client cares about. Unknown claims are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    /// Expiry, seconds since epoch.
    pub exp: i64,
    /// Single role claim, if the backend issued one.
    #[serde(default)]
    pub role: Option<String>,
    /// Multi-role claim; takes precedence over `role` when present.
    #[serde(default)]
    pub roles: Option<Vec<String>>,
}

/// Decode the payload segment of a JWT without verifying it.
pub fn decode_claims(token: &str) -> Result<TokenClaims, ClaimsError> {
    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return Err(ClaimsError::Malformed),
    };
    let raw = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|_| ClaimsError::Base64)?;
    serde_json::from_slice(&raw).map_err(|_| ClaimsError::Json)
}

/// Whether the token is past its `exp` claim.
///
/// Malformed tokens are reported as expired so the caller falls back
/// to the refresh path instead of sending garbage to the backend.
pub fn is_expired(token: &str) -> bool {
    match decode_claims(token) {
        Ok(claims) => claims.exp.saturating_mul(1000) <= now_millis(),
        Err(_) => true,
    }
}

/// Upper-cased roles from a token, advisory only.
///
/// Returns an empty list on any decode failure; UI gating must never
/// hard-fail on a bad token.
pub fn roles(token: &str) -> Vec<String> {
    match decode_claims(token) {
        Ok(claims) => {
            if let Some(roles) = claims.roles {
                roles.iter().map(|r| r.to_uppercase()).collect()
            } else if let Some(role) = claims.role {
                vec![role.to_uppercase()]
            } else {
                Vec::new()
            }
        }
        Err(_) => Vec::new(),
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use base64::Engine as _;

    use super::*;

    /// Forge an unsigned token with the given JSON payload. The
    /// client never checks signatures, so "sig" is fine.
    fn forge(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(b"{\"alg\":\"HS256\",\"typ\":\"JWT\"}");
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{header}.{body}.sig")
    }

    fn future_exp() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    #[test]
    fn decodes_single_role_claim() {
        let token = forge(&serde_json::json!({ "exp": future_exp(), "role": "admin" }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.role.as_deref(), Some("admin"));
        assert!(claims.roles.is_none());
    }

    #[test]
    fn roles_array_wins_over_single_role() {
        let token = forge(&serde_json::json!({
            "exp": future_exp(),
            "role": "user",
            "roles": ["admin", "user"],
        }));
        assert_eq!(roles(&token), vec!["ADMIN", "USER"]);
    }

    #[test]
    fn single_role_is_uppercased() {
        let token = forge(&serde_json::json!({ "exp": future_exp(), "role": "admin" }));
        assert_eq!(roles(&token), vec!["ADMIN"]);
    }

    #[test]
    fn roles_of_garbage_is_empty_not_error() {
        assert!(roles("not-a-token").is_empty());
        assert!(roles("").is_empty());
        assert!(roles("a.b.c.d").is_empty());
    }

    #[test]
    fn missing_role_claims_yield_empty_roles() {
        let token = forge(&serde_json::json!({ "exp": future_exp() }));
        assert!(roles(&token).is_empty());
    }

    #[test]
    fn future_exp_is_not_expired() {
        let token = forge(&serde_json::json!({ "exp": future_exp() }));
        assert!(!is_expired(&token));
    }

    #[test]
    fn past_exp_is_expired() {
        let token = forge(&serde_json::json!({ "exp": 1_000_000 }));
        assert!(is_expired(&token));
    }

    #[test]
    fn extreme_exp_values_do_not_overflow() {
        // A hostile or corrupted store can carry any decodable exp.
        let far_future = forge(&serde_json::json!({ "exp": i64::MAX }));
        assert!(!is_expired(&far_future));

        let far_past = forge(&serde_json::json!({ "exp": i64::MIN }));
        assert!(is_expired(&far_past));
    }

    #[test]
    fn malformed_tokens_count_as_expired() {
        assert!(is_expired(""));
        assert!(is_expired("only-one-part"));
        assert!(is_expired("two.parts"));
        assert!(is_expired("a.!!!not-base64!!!.c"));

        // Valid base64 but not JSON.
        let bad_json = format!("h.{}.s", URL_SAFE_NO_PAD.encode(b"not json"));
        assert!(is_expired(&bad_json));
    }

    #[test]
    fn padded_payload_segment_still_decodes() {
        let body = base64::engine::general_purpose::URL_SAFE
            .encode(serde_json::json!({ "exp": future_exp(), "role": "user" }).to_string());
        let token = format!("h.{body}.s");
        assert_eq!(roles(&token), vec!["USER"]);
    }

    #[test]
    fn decode_error_kinds() {
        assert!(matches!(decode_claims("x"), Err(ClaimsError::Malformed)));
        assert!(matches!(decode_claims("a.%%%.c"), Err(ClaimsError::Base64)));
        let bad = format!("a.{}.c", URL_SAFE_NO_PAD.encode(b"[1,2]"));
        assert!(matches!(decode_claims(&bad), Err(ClaimsError::Json)));
    }
}
