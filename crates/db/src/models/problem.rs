use agora_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `problems` table.
#[derive(Debug, Clone, FromRow)]
pub struct Problem {
    pub id: DbId,
    pub project_id: DbId,
    pub description: String,
    pub priority: i32,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateProblem {
    pub project_id: DbId,
    pub description: String,
    pub priority: Option<i32>,
    pub created_by: DbId,
}

/// Partial update. No `project_id`: a problem stays in the project it was
/// created in.
#[derive(Debug, Clone)]
pub struct UpdateProblem {
    pub description: Option<String>,
    pub priority: Option<i32>,
    pub updated_by: DbId,
}
