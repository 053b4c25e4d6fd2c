//! Password hashing and bearer-token signing.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Hashes a password with Argon2id and a fresh random salt
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Checks a password against a stored PHC hash string
///
/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash could not be parsed");
            false
        }
    }
}

/// Token claims: the user id in `sub` plus the email
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: i64, email: String, expires_in: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            email,
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
        }
    }
}

/// HS256 signing and verification keys derived from the configured secret
#[derive(Clone)]
pub struct TokenKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::default(),
            ttl,
        }
    }

    /// Signs a token for the given user, expiring after the configured TTL
    pub fn issue(&self, user_id: i64, email: &str) -> AppResult<String> {
        let claims = Claims::new(user_id, email.to_string(), self.ttl);
        self.encode(&claims)
    }

    pub fn encode(&self, claims: &Claims) -> AppResult<String> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))
    }

    /// Decodes and validates a token, rejecting bad signatures and expired tokens
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                AppError::Forbidden("Invalid or expired token".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn keys() -> TokenKeys {
        TokenKeys::new(b"test-secret", Duration::days(30))
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("hunter22").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter22", &hash));
        assert!(!verify_password("hunter23", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let first = hash_password("same-password").unwrap();
        let second = hash_password("same-password").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_malformed_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn test_issue_and_verify_token() {
        let keys = keys();
        let token = keys.issue(42, "ada@example.com").unwrap();
        let claims = assert_ok!(keys.verify(&token));
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.exp - claims.iat, Duration::days(30).num_seconds());
    }

    #[test]
    fn test_expired_token_rejected() {
        let keys = keys();
        let claims = Claims::new(1, "old@example.com".to_string(), Duration::hours(-2));
        let token = keys.encode(&claims).unwrap();
        assert!(matches!(keys.verify(&token), Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = keys().issue(1, "a@example.com").unwrap();
        let other = TokenKeys::new(b"other-secret", Duration::days(30));
        assert!(matches!(other.verify(&token), Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert_err!(keys().verify("not.a.token"));
    }
}
