use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{error::ApiError, model::*};

/// Postgres error code for a unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user. A username or email collision surfaces as
    /// `DuplicateIdentity` and leaves no partial record behind.
    async fn insert(&self, user: &User) -> Result<(), ApiError>;

    async fn find(&self, username: &str) -> Result<Option<User>, ApiError>;

    /// Deletes a user and all of their notes as one unit, notes first.
    /// Returns `false` when no such user exists.
    async fn delete(&self, username: &str) -> Result<bool, ApiError>;
}

#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Inserts a note and returns it with its assigned identifier.
    async fn insert(&self, owner: &str, title: &str, content: &str) -> Result<Note, ApiError>;

    async fn find(&self, id: i32) -> Result<Option<Note>, ApiError>;

    async fn list_for(&self, owner: &str) -> Result<Vec<Note>, ApiError>;

    /// Replaces a note's title and content; id and owner are immutable.
    async fn update(&self, id: i32, title: &str, content: &str) -> Result<(), ApiError>;

    async fn delete(&self, id: i32) -> Result<(), ApiError>;
}

pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PgStore { pool }
    }
}

/// Creates the schema if it does not exist yet.
pub async fn init(pool: &Pool<Postgres>) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            username VARCHAR(20) PRIMARY KEY,
            password TEXT NOT NULL,
            email VARCHAR(50) NOT NULL UNIQUE,
            first_name VARCHAR(30) NOT NULL,
            last_name VARCHAR(30) NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS notes (
            id SERIAL PRIMARY KEY,
            title VARCHAR(100) NOT NULL,
            content TEXT NOT NULL,
            owner_username VARCHAR(20) NOT NULL REFERENCES users (username),
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

fn map_insert_error(e: sqlx::Error) -> ApiError {
    if let sqlx::Error::Database(db) = &e {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return ApiError::DuplicateIdentity;
        }
    }
    ApiError::Store(e)
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert(&self, user: &User) -> Result<(), ApiError> {
        sqlx::query(
            "INSERT INTO users (username, password, email, first_name, last_name)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;
        Ok(())
    }

    async fn find(&self, username: &str) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT username, password, email, first_name, last_name
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn delete(&self, username: &str) -> Result<bool, ApiError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM notes WHERE owner_username = $1")
            .bind(username)
            .execute(&mut tx)
            .await?;

        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(&mut tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl NoteStore for PgStore {
    async fn insert(&self, owner: &str, title: &str, content: &str) -> Result<Note, ApiError> {
        let note = sqlx::query_as::<_, Note>(
            "INSERT INTO notes (title, content, owner_username)
             VALUES ($1, $2, $3)
             RETURNING id, title, content, owner_username, created_at",
        )
        .bind(title)
        .bind(content)
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;
        Ok(note)
    }

    async fn find(&self, id: i32) -> Result<Option<Note>, ApiError> {
        let note = sqlx::query_as::<_, Note>(
            "SELECT id, title, content, owner_username, created_at
             FROM notes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(note)
    }

    async fn list_for(&self, owner: &str) -> Result<Vec<Note>, ApiError> {
        let notes = sqlx::query_as::<_, Note>(
            "SELECT id, title, content, owner_username, created_at
             FROM notes WHERE owner_username = $1 ORDER BY id",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(notes)
    }

    async fn update(&self, id: i32, title: &str, content: &str) -> Result<(), ApiError> {
        sqlx::query("UPDATE notes SET title = $1, content = $2 WHERE id = $3")
            .bind(title)
            .bind(content)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), ApiError> {
        sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
pub use mem::MemStore;
