//! In-memory user store
//!
//! Backs tests and local runs without PostgreSQL. Enforces the same
//! phone-number uniqueness the database constraint does.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::{AcctError, NewUser, Result, User, UserId, UserStore};

#[derive(Default)]
struct Inner {
    users: HashMap<UserId, User>,
    by_phone: HashMap<String, UserId>,
    last_id: UserId,
}

/// Map-backed user store
#[derive(Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert_user(&self, user: NewUser) -> Result<UserId> {
        let mut inner = self.inner.write().await;

        if inner.by_phone.contains_key(&user.phone_number) {
            return Err(AcctError::Conflict(format!(
                "phone number {} already registered",
                user.phone_number
            )));
        }

        inner.last_id += 1;
        let id = inner.last_id;
        let now = Utc::now();

        inner.by_phone.insert(user.phone_number.clone(), id);
        inner.users.insert(
            id,
            User {
                id,
                full_name: user.full_name,
                phone_number: user.phone_number,
                password_hash: user.password_hash,
                login_count: 0,
                created_at: now,
                updated_at: now,
            },
        );

        Ok(id)
    }

    async fn find_user_by_phone(&self, phone_number: &str) -> Result<User> {
        let inner = self.inner.read().await;
        inner
            .by_phone
            .get(phone_number)
            .and_then(|id| inner.users.get(id))
            .cloned()
            .ok_or_else(|| AcctError::NotFound(phone_number.to_string()))
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<User> {
        self.inner
            .read()
            .await
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| AcctError::NotFound(id.to_string()))
    }

    async fn update_full_name(&self, id: UserId, full_name: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        // Matches `UPDATE ... WHERE id = $1`: no row, no error
        if let Some(user) = inner.users.get_mut(&id) {
            user.full_name = full_name.to_string();
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn update_login_count(&self, id: UserId, count: i64) -> Result<()> {
        let mut inner = self.inner.write().await;
        if let Some(user) = inner.users.get_mut(&id) {
            user.login_count = count;
        }
        Ok(())
    }
}
