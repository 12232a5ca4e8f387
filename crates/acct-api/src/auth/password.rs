//! Password hashing and verification using Argon2id
//!
//! Every hash gets a fresh 16-byte random salt, embedded in the PHC string
//! together with the algorithm and cost parameters, so two hashes of the
//! same password never match byte for byte. Cost parameters come from
//! configuration; `PasswordConfig::minimal()` keeps tests fast.

use acct_core::AuthConfig;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};
use thiserror::Error;

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),

    #[error("Failed to hash password: {0}")]
    HashingFailed(String),
}

/// Argon2 cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordConfig {
    /// Memory cost in KiB
    pub memory_cost_kib: u32,
    /// Iterations
    pub time_cost: u32,
    /// Lanes
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self::from(&AuthConfig::default())
    }
}

impl From<&AuthConfig> for PasswordConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            memory_cost_kib: config.hash_memory_kib,
            time_cost: config.hash_time_cost,
            parallelism: config.hash_parallelism,
        }
    }
}

impl PasswordConfig {
    /// Cheapest parameters Argon2 accepts
    pub fn minimal() -> Self {
        Self {
            memory_cost_kib: Params::MIN_M_COST,
            time_cost: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }

    fn to_params(self) -> Result<Params, PasswordError> {
        Params::new(self.memory_cost_kib, self.time_cost, self.parallelism, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))
    }
}

/// Hash a plaintext password
///
/// # Returns
///
/// * `Ok(String)` - PHC string (algorithm, parameters, salt and hash)
/// * `Err(PasswordError)` - If the parameters are invalid or hashing fails
pub fn hash_password(password: &str, config: &PasswordConfig) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let params = config.to_params()?;
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    Ok(password_hash.to_string())
}

/// Verify a plaintext password against a stored hash
///
/// Returns `false` for a wrong password and for any hash that cannot be
/// parsed or verified. The digest comparison is constant-time.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    // Parameters are read from the PHC string, not from the default instance
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(password: &str) -> String {
        hash_password(password, &PasswordConfig::minimal()).expect("Failed to hash password")
    }

    #[test]
    fn test_hash_and_verify_password() {
        let password = "p4Ssword!";
        let hash = hash(password);

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(password, &hash));
        assert!(!verify_password("WrongPassword", &hash));
    }

    #[test]
    fn test_same_password_produces_different_hashes() {
        let password = "somepass123";

        let hash1 = hash(password);
        let hash2 = hash(password);

        assert_ne!(hash1, hash2);
        assert!(verify_password(password, &hash1));
        assert!(verify_password(password, &hash2));
    }

    #[test]
    fn test_distinct_passwords_do_not_cross_verify() {
        let pairs = [
            ("aGsDfR!", "aGsDfR"),
            ("p4Ssword!", "p4Ssword!!"),
            ("", " "),
            ("Password1", "password1"),
        ];

        for (a, b) in pairs {
            assert!(!verify_password(a, &hash(b)), "{a:?} verified against hash of {b:?}");
            assert!(!verify_password(b, &hash(a)), "{b:?} verified against hash of {a:?}");
        }
    }

    #[test]
    fn test_malformed_hash_is_a_mismatch() {
        assert!(!verify_password("password", "invalid-hash-format"));
        assert!(!verify_password("password", ""));
        assert!(!verify_password("password", "$argon2id$v=19$m=8,t=1,p=1$"));
        // Foreign algorithm identifiers are rejected rather than panicking
        assert!(!verify_password(
            "aGsDfR!",
            "$2a$04$hq/dzj8jt4gjclRiL4vHj.j27JqNbQDZ5953YGzsbb/yH0nS6nf76"
        ));
    }

    #[test]
    fn test_custom_config() {
        let config = PasswordConfig {
            memory_cost_kib: 64,
            time_cost: 2,
            parallelism: 2,
        };

        let password = "TestPassword123!";
        let hash = hash_password(password, &config).unwrap();

        assert!(verify_password(password, &hash));
        assert!(hash.contains("m=64"));
        assert!(hash.contains("t=2"));
        assert!(hash.contains("p=2"));
    }

    #[test]
    fn test_invalid_params() {
        let config = PasswordConfig {
            memory_cost_kib: 1,
            time_cost: 0,
            parallelism: 0,
        };
        assert!(matches!(
            hash_password("p4Ssword!", &config),
            Err(PasswordError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_config_from_auth_config() {
        let auth = AuthConfig {
            hash_memory_kib: 4096,
            hash_time_cost: 3,
            hash_parallelism: 1,
            ..Default::default()
        };
        let config = PasswordConfig::from(&auth);
        assert_eq!(config.memory_cost_kib, 4096);
        assert_eq!(config.time_cost, 3);
        assert_eq!(config.parallelism, 1);
    }
}
