use sqlx::{SqliteConnection, SqlitePool};
use time::PrimitiveDateTime;

use crate::error::StoreResult;
use crate::users::repo_types::{NewUser, User};

impl User {
    /// Insert a user. `created_at` falls back to the column default when `None`.
    pub async fn insert(
        conn: &mut SqliteConnection,
        new: &NewUser,
        created_at: Option<PrimitiveDateTime>,
    ) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password, email, created_at)
            VALUES (?, ?, ?, COALESCE(?, CURRENT_TIMESTAMP))
            RETURNING id, username, password, email, created_at
            "#,
        )
        .bind(&new.username)
        .bind(&new.password)
        .bind(&new.email)
        .bind(created_at)
        .fetch_one(conn)
        .await?;
        Ok(user)
    }

    pub async fn find_by_username(db: &SqlitePool, username: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password, email, created_at
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &SqlitePool, id: i64) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password, email, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn list(db: &SqlitePool, limit: i64, offset: i64) -> StoreResult<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password, email, created_at
            FROM users
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}
