use agora_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// DTO for provisioning a user (seed data, tests).
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub role: String,
}
