use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from password handling and session tokens
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("session token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// Hash a plaintext password for storage
pub fn hash_password(plaintext: &str) -> Result<String, AuthError> {
    bcrypt::hash(plaintext, bcrypt::DEFAULT_COST).map_err(Into::into)
}

/// Check a plaintext password against a stored hash
pub fn verify_password(hash: &str, plaintext: &str) -> Result<bool, AuthError> {
    bcrypt::verify(plaintext, hash).map_err(Into::into)
}

/// Claims carried by a session token
///
/// The session holds only the authenticated username plus an anti-forgery
/// token; everything else about the user is looked up per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub csrf: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies session tokens (HS256)
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl SessionKeys {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Issue a session for a username; returns the token and its CSRF value
    pub fn issue(&self, username: &str) -> Result<(String, String), AuthError> {
        let csrf = uuid::Uuid::new_v4().to_string();
        let now = Utc::now();

        let claims = SessionClaims {
            sub: username.to_string(),
            csrf: csrf.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_secs)).timestamp(),
        };

        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)?;
        Ok((token, csrf))
    }

    /// Verify a session token and return its claims
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let data = jsonwebtoken::decode::<SessionClaims>(
            token,
            &self.decoding,
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_round_trip() {
        let hash = hash_password("hunter22").unwrap();
        assert_ne!(hash, "hunter22");
        assert!(verify_password(&hash, "hunter22").unwrap());
        assert!(!verify_password(&hash, "hunter23").unwrap());
    }

    #[test]
    fn test_session_round_trip() {
        let keys = SessionKeys::new("test-secret", 3600);
        let (token, csrf) = keys.issue("alice").unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.csrf, csrf);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let keys = SessionKeys::new("test-secret", 3600);
        let (token, _) = keys.issue("alice").unwrap();

        let other_keys = SessionKeys::new("other-secret", 3600);
        assert!(other_keys.verify(&token).is_err());
        assert!(keys.verify(&format!("{}x", token)).is_err());
    }

    #[test]
    fn test_sessions_get_distinct_csrf_tokens() {
        let keys = SessionKeys::new("test-secret", 3600);
        let (_, csrf1) = keys.issue("alice").unwrap();
        let (_, csrf2) = keys.issue("alice").unwrap();
        assert_ne!(csrf1, csrf2);
    }
}
