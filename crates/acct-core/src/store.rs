//! PostgreSQL user store
//!
//! Persists accounts in a single `users` table using SQLx.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;

use crate::{AcctError, NewUser, Result, User, UserId, UserStore};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id           BIGSERIAL PRIMARY KEY,
    phone_number VARCHAR(16) NOT NULL UNIQUE,
    full_name    VARCHAR(60) NOT NULL,
    hashed_pass  TEXT        NOT NULL,
    count        BIGINT      NOT NULL DEFAULT 0,
    created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at   TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// PostgreSQL user store
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new user store connection
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| AcctError::DatabaseError(format!("PostgreSQL connection failed: {e}")))?;

        Ok(Self { pool })
    }

    /// Create the `users` table if it does not exist yet
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| AcctError::DatabaseError(format!("Failed to create schema: {e}")))?;

        tracing::debug!("users schema ready");
        Ok(())
    }
}

/// User row from database
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    full_name: String,
    phone_number: String,
    hashed_pass: String,
    count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            full_name: row.full_name,
            phone_number: row.phone_number,
            password_hash: row.hashed_pass,
            login_count: row.count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn map_sqlx_error(context: &str, err: sqlx::Error) -> AcctError {
    match &err {
        sqlx::Error::RowNotFound => AcctError::NotFound(context.to_string()),
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AcctError::Conflict(format!("{context}: {db}"))
        }
        _ => AcctError::DatabaseError(format!("{context}: {err}")),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert_user(&self, user: NewUser) -> Result<UserId> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO users (phone_number, full_name, hashed_pass, count)
            VALUES ($1, $2, $3, 0)
            RETURNING id
            "#,
        )
        .bind(&user.phone_number)
        .bind(&user.full_name)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to insert user", e))?;

        Ok(row.0)
    }

    async fn find_user_by_phone(&self, phone_number: &str) -> Result<User> {
        let row: UserRow = sqlx::query_as(
            r#"
            SELECT id, full_name, phone_number, hashed_pass, count, created_at, updated_at
            FROM users
            WHERE phone_number = $1
            "#,
        )
        .bind(phone_number)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to find user by phone number", e))?;

        Ok(row.into())
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<User> {
        let row: UserRow = sqlx::query_as(
            r#"
            SELECT id, full_name, phone_number, hashed_pass, count, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to find user by id", e))?;

        Ok(row.into())
    }

    async fn update_full_name(&self, id: UserId, full_name: &str) -> Result<()> {
        sqlx::query("UPDATE users SET full_name = $1, updated_at = NOW() WHERE id = $2")
            .bind(full_name)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to update full name", e))?;

        Ok(())
    }

    async fn update_login_count(&self, id: UserId, count: i64) -> Result<()> {
        sqlx::query("UPDATE users SET count = $1 WHERE id = $2")
            .bind(count)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to update login count", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_row_conversion() {
        let now = Utc::now();
        let row = UserRow {
            id: 42,
            full_name: "John Does".to_string(),
            phone_number: "+62811223344".to_string(),
            hashed_pass: "$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA".to_string(),
            count: 5,
            created_at: now,
            updated_at: now,
        };

        let user = User::from(row);
        assert_eq!(user.id, 42);
        assert_eq!(user.login_count, 5);
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = map_sqlx_error("lookup", sqlx::Error::RowNotFound);
        assert!(matches!(err, AcctError::NotFound(_)));
    }

    #[test]
    fn test_other_errors_map_to_database_error() {
        let err = map_sqlx_error("lookup", sqlx::Error::PoolTimedOut);
        assert!(matches!(err, AcctError::DatabaseError(_)));
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL (set DATABASE_URL)"]
    async fn test_round_trip_against_postgres() {
        let url = std::env::var("DATABASE_URL").unwrap();
        let store = PgUserStore::new(&url, 1).await.unwrap();
        store.migrate().await.unwrap();

        let phone = format!("+6281{}", Utc::now().timestamp_micros() % 10_000_000);
        let id = store
            .insert_user(NewUser::new(&phone, "John Does", "hash"))
            .await
            .unwrap();

        let duplicate = store
            .insert_user(NewUser::new(&phone, "Jane Does", "hash"))
            .await;
        assert!(matches!(duplicate, Err(AcctError::Conflict(_))));

        store.update_login_count(id, 1).await.unwrap();
        store.update_full_name(id, "Johnny").await.unwrap();

        let user = store.find_user_by_phone(&phone).await.unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.full_name, "Johnny");
        assert_eq!(user.login_count, 1);
    }
}
