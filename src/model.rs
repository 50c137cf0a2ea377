use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, sqlx::FromRow, Serialize, Clone)]
pub struct User {
    /// Primary key and sole login identifier; immutable once registered.
    pub username: String,
    /// Argon2 PHC hash string, never the plaintext.
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize, sqlx::FromRow, Serialize, Clone)]
pub struct Note {
    pub id: i32,
    pub title: String,
    pub content: String,
    /// References `users.username`; a note cannot change owners.
    pub owner_username: String,
    pub created_at: Option<DateTime<Utc>>,
}
