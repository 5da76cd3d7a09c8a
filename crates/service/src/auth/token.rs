//! HS256 bearer tokens carrying the user id.

use std::time::Duration;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::errors::AuthError;

/// Token payload. `exp` is only present when a lifetime is configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i32,
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Signing and verification keys derived from the shared secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Option<Duration>,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl: Option<Duration>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    pub fn issue(&self, user_id: i32) -> Result<String, AuthError> {
        let now = chrono::Utc::now();
        let exp = match self.ttl {
            Some(ttl) => {
                let ttl = chrono::Duration::from_std(ttl).map_err(|e| AuthError::TokenError(e.to_string()))?;
                Some((now + ttl).timestamp())
            }
            None => None,
        };
        let claims = Claims { user_id, iat: now.timestamp(), exp };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Verify signature (and expiry when present) and return the user id.
    pub fn verify(&self, token: &str) -> Result<i32, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims.user_id)
            .map_err(|_| AuthError::InvalidToken)
    }
}

/// Extract the token from an `Authorization` header value.
///
/// A missing header, or one without a second word, is `MissingToken`; any other
/// scheme than `Bearer` is `InvalidToken`.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let value = header.map(str::trim).unwrap_or_default();
    let (scheme, token) = value.split_once(' ').ok_or(AuthError::MissingToken)?;
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidToken);
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_to_same_user() {
        let keys = TokenKeys::new("secret", None);
        let token = keys.issue(7).unwrap();
        assert_eq!(keys.verify(&token).unwrap(), 7);
    }

    #[test]
    fn token_without_ttl_has_no_exp_claim() {
        let keys = TokenKeys::new("secret", None);
        let token = keys.issue(1).unwrap();
        let mut v = Validation::new(Algorithm::HS256);
        v.required_spec_claims.clear();
        let data = decode::<serde_json::Value>(&token, &DecodingKey::from_secret(b"secret"), &v).unwrap();
        assert_eq!(data.claims["userId"], 1);
        assert!(data.claims.get("exp").is_none());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = TokenKeys::new("one", None).issue(3).unwrap();
        let err = TokenKeys::new("two", None).verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = TokenKeys::new("secret", Some(Duration::from_secs(60)));
        let claims = Claims { user_id: 1, iat: 0, exp: Some(chrono::Utc::now().timestamp() - 3600) };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(b"secret")).unwrap();
        assert!(matches!(keys.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn garbage_is_rejected() {
        let keys = TokenKeys::new("secret", None);
        assert!(matches!(keys.verify("not.a.jwt"), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn bearer_header_parsing() {
        assert_eq!(bearer_token(Some("Bearer abc")).unwrap(), "abc");
        assert_eq!(bearer_token(Some("bearer abc")).unwrap(), "abc");
        assert!(matches!(bearer_token(None), Err(AuthError::MissingToken)));
        assert!(matches!(bearer_token(Some("Bearer")), Err(AuthError::MissingToken)));
        assert!(matches!(bearer_token(Some("Bearer   ")), Err(AuthError::MissingToken)));
        assert!(matches!(bearer_token(Some("Basic abc")), Err(AuthError::InvalidToken)));
    }
}
