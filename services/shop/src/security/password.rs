//! Salted password hashing with Argon2

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};

/// Hashes new passwords and checks submitted ones against stored hashes
#[derive(Clone, Default)]
pub struct PasswordEncoder {
    argon2: Argon2<'static>,
}

impl PasswordEncoder {
    /// Hash a raw password into a PHC string
    pub fn encode(&self, raw_password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let hash = self
            .argon2
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
            .to_string();

        Ok(hash)
    }

    /// Check a raw password against a stored PHC string
    pub fn matches(&self, raw_password: &str, password_hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;

        Ok(self
            .argon2
            .verify_password(raw_password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

/// Argon2id with minimal cost, so tests hash quickly
#[cfg(test)]
pub(crate) fn fast_encoder() -> PasswordEncoder {
    use argon2::{Algorithm, Params, Version};

    let params = Params::new(1024, 1, 1, None).expect("valid argon2 params");
    PasswordEncoder {
        argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_password_matches_only_the_original() {
        let encoder = fast_encoder();
        let hash = encoder.encode("s3cret").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(encoder.matches("s3cret", &hash).unwrap());
        assert!(!encoder.matches("S3cret", &hash).unwrap());
    }

    #[test]
    fn same_password_gets_a_fresh_salt() {
        let encoder = fast_encoder();
        assert_ne!(
            encoder.encode("s3cret").unwrap(),
            encoder.encode("s3cret").unwrap()
        );
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(fast_encoder().matches("s3cret", "plain-text").is_err());
    }
}
