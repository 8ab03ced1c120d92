use agora_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `proposals` table.
#[derive(Debug, Clone, FromRow)]
pub struct Proposal {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateProposal {
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub created_by: DbId,
}

/// Partial update; the owning project is immutable.
#[derive(Debug, Clone, Default)]
pub struct UpdateProposal {
    pub title: Option<String>,
    pub description: Option<String>,
}
