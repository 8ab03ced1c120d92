//! Repository for the `problems` table.
//!
//! Every write also touches the owning project's `updated_at` on the same
//! connection, so callers must pass the request transaction.

use agora_core::types::DbId;
use sqlx::{PgConnection, PgExecutor};

use crate::models::problem::{CreateProblem, Problem, UpdateProblem};
use crate::repositories::ProjectRepo;

const COLUMNS: &str = "id, project_id, description, priority, created_by, updated_by, \
                       created_at, updated_at";

pub struct ProblemRepo;

impl ProblemRepo {
    /// Insert a problem and touch its project.
    pub async fn create(conn: &mut PgConnection, input: &CreateProblem) -> Result<Problem, sqlx::Error> {
        let query = format!(
            "INSERT INTO problems (project_id, description, priority, created_by, updated_by) \
             VALUES ($1, $2, COALESCE($3, 0), $4, $4) \
             RETURNING {COLUMNS}"
        );
        let problem = sqlx::query_as::<_, Problem>(&query)
            .bind(input.project_id)
            .bind(&input.description)
            .bind(input.priority)
            .bind(input.created_by)
            .fetch_one(&mut *conn)
            .await?;

        ProjectRepo::touch(&mut *conn, problem.project_id).await?;
        Ok(problem)
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Problem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM problems WHERE id = $1");
        sqlx::query_as::<_, Problem>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn exists<'e, E: PgExecutor<'e>>(executor: E, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM problems WHERE id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await
    }

    /// All problems of a project ordered by priority (highest first), then id.
    pub async fn list_by_project<'e, E: PgExecutor<'e>>(
        executor: E,
        project_id: DbId,
    ) -> Result<Vec<Problem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM problems WHERE project_id = $1 ORDER BY priority DESC, id"
        );
        sqlx::query_as::<_, Problem>(&query)
            .bind(project_id)
            .fetch_all(executor)
            .await
    }

    /// Update description/priority and record the acting user.
    ///
    /// The project reference is never changed. Returns `None` if no row with
    /// `id` exists.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateProblem,
    ) -> Result<Option<Problem>, sqlx::Error> {
        let query = format!(
            "UPDATE problems SET \
                description = COALESCE($2, description), \
                priority = COALESCE($3, priority), \
                updated_by = $4, \
                updated_at = clock_timestamp() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let problem = sqlx::query_as::<_, Problem>(&query)
            .bind(id)
            .bind(&input.description)
            .bind(input.priority)
            .bind(input.updated_by)
            .fetch_optional(&mut *conn)
            .await?;

        if let Some(ref problem) = problem {
            ProjectRepo::touch(&mut *conn, problem.project_id).await?;
        }
        Ok(problem)
    }

    /// Delete a problem (its usages cascade) and touch its project.
    ///
    /// Returns `false` if no row with `id` exists.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let project_id: Option<DbId> =
            sqlx::query_scalar("DELETE FROM problems WHERE id = $1 RETURNING project_id")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;

        match project_id {
            Some(project_id) => {
                ProjectRepo::touch(&mut *conn, project_id).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
