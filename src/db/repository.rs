//! User repository.
//!
//! SQLite-backed implementation of [`UserStore`].

use axum::async_trait;
use sqlx::SqlitePool;

use super::traits::UserStore;
use super::user::{NewUser, User};
use crate::Result;

/// Repository for user records.
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new UserRepository over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, first_name, last_name, email, password, created_at
             FROM users WHERE email = ? COLLATE NOCASE",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, first_name, last_name, email, password, created_at
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, new_user: &NewUser) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO users (first_name, last_name, email, password) VALUES (?, ?, ?, ?)",
        )
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.email)
        .bind(&new_user.password)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }
}
