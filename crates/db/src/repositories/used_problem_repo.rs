//! Repository for the `used_problems` table.
//!
//! A usage has no project column of its own; writes walk
//! usage -> problem -> project to touch the owning project.

use agora_core::types::DbId;
use sqlx::{PgConnection, PgExecutor};

use crate::models::used_problem::{CreateUsedProblem, UsedProblem};
use crate::repositories::ProjectRepo;

const COLUMNS: &str = "id, problem_id, proposal_id, created_by, created_at";

pub struct UsedProblemRepo;

impl UsedProblemRepo {
    /// Insert a usage and touch the project owning its problem.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateUsedProblem,
    ) -> Result<UsedProblem, sqlx::Error> {
        let query = format!(
            "INSERT INTO used_problems (problem_id, proposal_id, created_by) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let used = sqlx::query_as::<_, UsedProblem>(&query)
            .bind(input.problem_id)
            .bind(input.proposal_id)
            .bind(input.created_by)
            .fetch_one(&mut *conn)
            .await?;

        ProjectRepo::touch_for_problem(&mut *conn, used.problem_id).await?;
        Ok(used)
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<UsedProblem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM used_problems WHERE id = $1");
        sqlx::query_as::<_, UsedProblem>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Whether `problem_id` is already used by `proposal_id`.
    pub async fn pair_exists<'e, E: PgExecutor<'e>>(
        executor: E,
        problem_id: DbId,
        proposal_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM used_problems \
             WHERE problem_id = $1 AND proposal_id = $2)",
        )
        .bind(problem_id)
        .bind(proposal_id)
        .fetch_one(executor)
        .await
    }

    /// All usages of a problem ordered by id.
    pub async fn list_by_problem<'e, E: PgExecutor<'e>>(
        executor: E,
        problem_id: DbId,
    ) -> Result<Vec<UsedProblem>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM used_problems WHERE problem_id = $1 ORDER BY id");
        sqlx::query_as::<_, UsedProblem>(&query)
            .bind(problem_id)
            .fetch_all(executor)
            .await
    }

    /// Ids of all usages attached to a proposal.
    pub async fn list_ids_by_proposal<'e, E: PgExecutor<'e>>(
        executor: E,
        proposal_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM used_problems WHERE proposal_id = $1 ORDER BY id")
            .bind(proposal_id)
            .fetch_all(executor)
            .await
    }

    /// Delete a usage and touch the project owning its problem.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let problem_id: Option<DbId> =
            sqlx::query_scalar("DELETE FROM used_problems WHERE id = $1 RETURNING problem_id")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;

        match problem_id {
            Some(problem_id) => {
                ProjectRepo::touch_for_problem(&mut *conn, problem_id).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
