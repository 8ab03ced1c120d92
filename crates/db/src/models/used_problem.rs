//! Links between a problem and a proposal that addresses it.
//!
//! Create-only: a usage is never edited, only created or removed. The
//! `(problem_id, proposal_id)` pair is unique.

use agora_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `used_problems` table.
#[derive(Debug, Clone, FromRow)]
pub struct UsedProblem {
    pub id: DbId,
    pub problem_id: DbId,
    pub proposal_id: DbId,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateUsedProblem {
    pub problem_id: DbId,
    pub proposal_id: DbId,
    pub created_by: DbId,
}
