use agora_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `federal_states` table.
#[derive(Debug, Clone, FromRow)]
pub struct FederalState {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateFederalState {
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateFederalState {
    pub name: Option<String>,
}
