use agora_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `councils` table.
#[derive(Debug, Clone, FromRow)]
pub struct Council {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    /// `None` when unassigned or after the federal state was deleted.
    pub federal_state_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateCouncil {
    pub name: String,
    pub federal_state_id: Option<DbId>,
}

/// Partial update. `federal_state_id` distinguishes "absent" (`None`) from
/// "clear the reference" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct UpdateCouncil {
    pub name: Option<String>,
    pub federal_state_id: Option<Option<DbId>>,
}
