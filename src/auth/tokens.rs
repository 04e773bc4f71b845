/**
 * Session Tokens
 *
 * This module defines the token-issuer seam consumed by the credential
 * manager and the auth middleware, plus the JWT implementation used in
 * production.
 */

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::members::model::Account;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account ID (UUID)
    pub sub: String,
    /// Lower-cased username
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Issues and verifies opaque session credentials bound to an account.
///
/// Injected into the credential manager and the auth middleware so tests
/// can substitute their own issuer.
pub trait TokenIssuer: Send + Sync {
    /// Issue a session token bound to the account's identity.
    fn issue(&self, account: &Account) -> Result<String, AppError>;

    /// Verify a presented token and return its claims.
    fn verify(&self, token: &str) -> Result<Claims, AppError>;
}

/// HS256 JWT issuer.
///
/// The signing keys are derived from the secret once at construction.
pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: u64,
}

impl JwtTokenIssuer {
    pub fn new(secret: impl AsRef<[u8]>, ttl_days: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            ttl_seconds: ttl_days * 24 * 60 * 60,
        }
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, account: &Account) -> Result<String, AppError> {
        let now = Self::now();
        let claims = Claims {
            sub: account.id.to_string(),
            username: account.username.clone(),
            exp: now + self.ttl_seconds,
            iat: now,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("failed to encode session token: {e}");
            AppError::Token {
                message: e.to_string(),
            }
        })
    }

    fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::unauthorized(format!("invalid token: {e}")))?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn test_account() -> Account {
        Account::new(
            "alice".to_string(),
            vec![0u8; 64],
            vec![0u8; 64],
            "Alice".to_string(),
            "female".to_string(),
            NaiveDate::from_ymd_opt(1995, 4, 3).unwrap(),
            "Lisbon".to_string(),
            "Portugal".to_string(),
        )
    }

    #[test]
    fn test_issue_token() {
        let issuer = JwtTokenIssuer::new("test-secret", 30);
        let token = issuer.issue(&test_account()).unwrap();
        assert!(!token.is_empty());
    }

    #[test]
    fn test_verify_round_trip() {
        let account = test_account();
        let issuer = JwtTokenIssuer::new("test-secret", 30);
        let token = issuer.issue(&account).unwrap();

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.sub, account.id.to_string());
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let issuer = JwtTokenIssuer::new("test-secret", 30);
        assert!(issuer.verify("invalid.token.here").is_err());
    }

    #[test]
    fn test_verify_rejects_foreign_secret() {
        let issuer = JwtTokenIssuer::new("test-secret", 30);
        let other = JwtTokenIssuer::new("other-secret", 30);
        let token = issuer.issue(&test_account()).unwrap();
        assert!(other.verify(&token).is_err());
    }
}
