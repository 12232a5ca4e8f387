//! acct Core - Domain models, traits, and shared types
//!
//! This crate defines the core abstractions used throughout acct:
//! - User account model
//! - Common error types
//! - The `UserStore` trait the auth flows persist through
//! - PostgreSQL and in-memory user stores
//! - Configuration management

pub mod config;
pub mod memory;
pub mod store;

pub use config::{AppConfig, AuthConfig, ConfigError, DatabaseConfig, LoggingConfig, ServerConfig};
pub use memory::InMemoryUserStore;
pub use store::PgUserStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for store operations
#[derive(Error, Debug)]
pub enum AcctError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

pub type Result<T> = std::result::Result<T, AcctError>;

// ============================================================================
// User Model
// ============================================================================

/// Stable user identifier assigned by the store
pub type UserId = i64;

/// A registered account
///
/// The phone number identifies at most one user and never changes once
/// the row exists. `password_hash` is an opaque PHC string and is never
/// serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub phone_number: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Number of successful logins
    pub login_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a new account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub phone_number: String,
    pub full_name: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(
        phone_number: impl Into<String>,
        full_name: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            phone_number: phone_number.into(),
            full_name: full_name.into(),
            password_hash: password_hash.into(),
        }
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Persistence collaborator for user accounts
///
/// Callers treat every error the same way; implementations are free to
/// report `NotFound`, `Conflict` or `DatabaseError` as they see fit.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user and return its new identifier
    async fn insert_user(&self, user: NewUser) -> Result<UserId>;

    /// Look up a user by phone number
    async fn find_user_by_phone(&self, phone_number: &str) -> Result<User>;

    /// Look up a user by identifier
    async fn find_user_by_id(&self, id: UserId) -> Result<User>;

    /// Replace a user's full name
    async fn update_full_name(&self, id: UserId, full_name: &str) -> Result<()>;

    /// Set a user's login counter
    async fn update_login_count(&self, id: UserId, count: i64) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serialization_hides_hash() {
        let now = Utc::now();
        let user = User {
            id: 7,
            full_name: "John Does".to_string(),
            phone_number: "+62811223344".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            login_count: 3,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("+62811223344"));
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password_hash"));
    }

    #[test]
    fn test_new_user() {
        let user = NewUser::new("+62811223344", "John Does", "hash");
        assert_eq!(user.phone_number, "+62811223344");
        assert_eq!(user.full_name, "John Does");
        assert_eq!(user.password_hash, "hash");
    }
}
