//! Bearer token issuing and verification.
//!
//! Tokens are HS256-signed JWTs carrying the staff id and role of the caller.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::{AppError, AppResult};
use crate::models::Role;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Staff id of the authenticated employee
    pub sub: i64,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_mins: i64,
}

impl TokenService {
    pub fn new(secret: &str, expiry_mins: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_mins,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, config.token_expiry_mins)
    }

    pub fn issue(&self, staff_id: i64, role: Role) -> AppResult<String> {
        self.issue_at(staff_id, role, chrono::Utc::now().timestamp())
    }

    /// Issue a token as if it had been signed at `issued_at` (unix seconds)
    pub fn issue_at(&self, staff_id: i64, role: Role, issued_at: i64) -> AppResult<String> {
        let claims = Claims {
            sub: staff_id,
            role,
            iat: issued_at,
            exp: issued_at + self.expiry_mins * 60,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Check signature and expiry, returning the embedded claims
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Rejected bearer token: {}", e);
                AppError::Unauthorized("Invalid or expired token".to_string())
            })
    }
}
