//! Bearer token inspection
//!
//! The client never holds the signing secret, so tokens are decoded without
//! signature verification and only used to decide whether a persisted
//! session is still worth hydrating.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

/// Claims the client cares about; everything else in the token is ignored
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub exp: Option<i64>,
}

fn inspection_rules() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();
    validation
}

/// Decode the claims of a JWT; `None` for opaque (non-JWT) tokens
pub fn inspect(token: &str) -> Option<TokenClaims> {
    decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &inspection_rules())
        .ok()
        .map(|data| data.claims)
}

/// True only for JWTs carrying an `exp` at or before `now`
pub fn is_expired(token: &str, now: DateTime<Utc>) -> bool {
    inspect(token)
        .and_then(|claims| claims.exp)
        .is_some_and(|exp| exp <= now.timestamp())
}
