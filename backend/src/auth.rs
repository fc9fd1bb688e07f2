//! Bearer-token authentication.
//!
//! Tokens are HS256 JWTs issued by the identity provider; the `sub` claim is
//! the user id every handler acts on behalf of.

use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Expiry, seconds since the epoch
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

#[derive(Clone)]
pub struct AuthConfig {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthConfig {
    pub fn new(secret: &str, audience: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        match audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Validate a raw token and return the user id it was issued for.
    pub fn verify(&self, token: &str) -> Result<String, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::unauthorized("Token has expired"),
            ErrorKind::InvalidSignature => AppError::unauthorized("Token signature is invalid"),
            ErrorKind::InvalidAudience => AppError::unauthorized("Token audience is invalid"),
            _ => AppError::unauthorized("Token is invalid"),
        })?;

        if data.claims.sub.trim().is_empty() {
            return Err(AppError::unauthorized("Token has no subject"));
        }
        Ok(data.claims.sub)
    }
}

/// Sign a token for `user_id`. Used by local tooling and tests; production
/// tokens come from the identity provider.
pub fn issue_token(secret: &str, user_id: &str, audience: Option<&str>, ttl_secs: u64) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: Utc::now().timestamp().max(0) as u64 + ttl_secs,
        aud: audience.map(str::to_string),
    };
    let token = encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes()))?;
    Ok(token)
}

/// Pull the token out of an `Authorization: Bearer <token>` header value.
fn bearer_token(header: Option<&str>) -> Result<&str, AppError> {
    let value = header.ok_or_else(|| AppError::unauthorized("Authentication required"))?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Authorization header must use Bearer scheme"))?
        .trim();
    if token.is_empty() {
        return Err(AppError::unauthorized("Bearer token is empty"));
    }
    Ok(token)
}

/// The authenticated caller's user id.
#[derive(Debug, Clone)]
pub struct AuthUser(pub String);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = bearer_token(header)?;
        let user_id = state.auth.verify(token).inspect_err(|e| {
            tracing::debug!("Rejected bearer token: {}", e);
        })?;
        Ok(AuthUser(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_issued_token_verifies() {
        let auth = AuthConfig::new(SECRET, None);
        let token = issue_token(SECRET, "u1", None, 3600).unwrap();
        assert_eq!(auth.verify(&token).unwrap(), "u1");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let auth = AuthConfig::new("other-secret", None);
        let token = issue_token(SECRET, "u1", None, 3600).unwrap();
        assert!(matches!(auth.verify(&token), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_audience_enforced() {
        let auth = AuthConfig::new(SECRET, Some("moodlink"));
        let good = issue_token(SECRET, "u1", Some("moodlink"), 3600).unwrap();
        let bad = issue_token(SECRET, "u1", Some("elsewhere"), 3600).unwrap();

        assert!(auth.verify(&good).is_ok());
        assert!(auth.verify(&bad).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let auth = AuthConfig::new(SECRET, None);
        let claims = Claims {
            sub: "u1".to_string(),
            exp: (Utc::now().timestamp() - 3600) as u64,
            aud: None,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap();
        assert!(auth.verify(&token).is_err());
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(Some("Bearer abc")).unwrap(), "abc");
        assert!(bearer_token(None).is_err());
        assert!(bearer_token(Some("Basic abc")).is_err());
        assert!(bearer_token(Some("Bearer   ")).is_err());
    }
}
