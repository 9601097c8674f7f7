//! # User Repository
//!
//! Account storage. Usernames are unique at the schema level, so a
//! duplicate registration surfaces as `DbError::UniqueViolation`.
//! Passwords arrive here already hashed.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use rental_core::{Role, User};

/// A user row about to be inserted.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub username: String,
    /// PHC-format hash, never the plaintext.
    pub password_hash: String,
    pub role: Role,
    pub email: String,
}

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new user.
    ///
    /// ## Returns
    /// * `Ok(User)` - Stored user with its generated id
    /// * `Err(DbError::UniqueViolation)` - Username already taken
    pub async fn insert(&self, record: &NewUserRecord) -> DbResult<User> {
        debug!(username = %record.username, role = %record.role, "Inserting user");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, role, email, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&record.username)
        .bind(&record.password_hash)
        .bind(record.role)
        .bind(&record.email)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::UniqueViolation {
                field,
                value: record.username.clone(),
            },
            other => other,
        })?;

        Ok(User {
            id: result.last_insert_rowid(),
            username: record.username.clone(),
            password_hash: record.password_hash.clone(),
            role: record.role,
            email: record.email.clone(),
            created_at: now,
        })
    }

    /// Looks up a user by exact username.
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, role, email, created_at
            FROM users
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Returns the email address on file for `username`.
    pub async fn email_for(&self, username: &str) -> DbResult<Option<String>> {
        let email: Option<String> =
            sqlx::query_scalar("SELECT email FROM users WHERE username = ?1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;

        Ok(email)
    }

    /// Counts registered users.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
