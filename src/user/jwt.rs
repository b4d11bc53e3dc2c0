//! JSON Web Token issuance and validation for login sessions.

use anyhow::{Context, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Tokens expire one day after issuance.
pub const TOKEN_VALIDITY_SECS: u64 = 24 * 60 * 60;

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: usize,
    pub email: String,
    /// Issued-at, seconds since epoch.
    pub iat: u64,
    /// Expiry, seconds since epoch.
    pub exp: u64,
}

/// HS256 signing and verification keys derived from one shared secret.
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a token for the given user.
    pub fn issue(&self, user_id: usize, email: &str) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("System clock before epoch")?
            .as_secs();
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now,
            exp: now + TOKEN_VALIDITY_SECS,
        };
        encode(&Header::default(), &claims, &self.encoding).context("Failed to sign token")
    }

    /// Validate a token's signature and expiry, returning its claims.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .context("Invalid or expired token")?;
        Ok(data.claims)
    }
}
