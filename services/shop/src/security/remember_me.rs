//! Remember-me tokens
//!
//! A signed HS256 JWT carrying the user ID, stored in a long-lived cookie.
//! A request arriving without a signed-in session but with a valid token is
//! signed in again.

use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Remember-me configuration
#[derive(Debug, Clone)]
pub struct RememberMeConfig {
    /// Secret used to sign tokens
    pub secret: String,
    /// Token lifetime in seconds (default: 14 days)
    pub expiry: u64,
}

impl RememberMeConfig {
    /// Create a new RememberMeConfig from environment variables
    ///
    /// # Environment Variables
    /// - `REMEMBER_ME_SECRET`: Signing secret, at least 32 bytes
    /// - `REMEMBER_ME_EXPIRY`: Token lifetime in seconds (default: 1209600)
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("REMEMBER_ME_SECRET")
            .map_err(|_| anyhow::anyhow!("REMEMBER_ME_SECRET environment variable not set"))?;

        let expiry = std::env::var("REMEMBER_ME_EXPIRY")
            .unwrap_or_else(|_| "1209600".to_string()) // 14 days
            .parse()
            .unwrap_or(1_209_600);

        Ok(RememberMeConfig { secret, expiry })
    }
}

/// Remember-me token claims
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RememberMeClaims {
    /// User ID
    pub sub: i32,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// Issues and checks remember-me tokens
#[derive(Clone)]
pub struct RememberMeService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry: u64,
}

impl RememberMeService {
    pub fn new(config: RememberMeConfig) -> Result<Self> {
        if config.secret.len() < 32 {
            anyhow::bail!("REMEMBER_ME_SECRET must be at least 32 bytes long");
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            expiry: config.expiry,
        })
    }

    /// Issue a token for a user
    pub fn issue(&self, user_id: i32) -> Result<String> {
        let now = now_secs()?;
        self.encode_claims(&RememberMeClaims {
            sub: user_id,
            iat: now,
            exp: now + self.expiry,
        })
    }

    fn encode_claims(&self, claims: &RememberMeClaims) -> Result<String> {
        let token = encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a token and return its claims
    pub fn verify(&self, token: &str) -> Result<RememberMeClaims> {
        let token_data = decode::<RememberMeClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }
}

fn now_secs() -> Result<u64> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
        .as_secs())
}

#[cfg(test)]
pub(crate) fn test_service() -> RememberMeService {
    RememberMeService::new(RememberMeConfig {
        secret: "a-test-secret-that-is-long-enough!".to_string(),
        expiry: 3600,
    })
    .expect("valid remember-me config")
}
