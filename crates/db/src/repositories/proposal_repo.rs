//! Repository for the `proposals` table.

use agora_core::types::DbId;
use sqlx::{PgConnection, PgExecutor};

use crate::models::proposal::{CreateProposal, Proposal, UpdateProposal};
use crate::repositories::ProjectRepo;

const COLUMNS: &str = "id, project_id, title, description, created_by, created_at, updated_at";

pub struct ProposalRepo;

impl ProposalRepo {
    /// Insert a proposal and touch its project.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateProposal,
    ) -> Result<Proposal, sqlx::Error> {
        let query = format!(
            "INSERT INTO proposals (project_id, title, description, created_by) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let proposal = sqlx::query_as::<_, Proposal>(&query)
            .bind(input.project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.created_by)
            .fetch_one(&mut *conn)
            .await?;

        ProjectRepo::touch(&mut *conn, proposal.project_id).await?;
        Ok(proposal)
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Proposal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM proposals WHERE id = $1");
        sqlx::query_as::<_, Proposal>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn exists<'e, E: PgExecutor<'e>>(executor: E, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM proposals WHERE id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await
    }

    pub async fn list_ids_by_project<'e, E: PgExecutor<'e>>(
        executor: E,
        project_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM proposals WHERE project_id = $1 ORDER BY id")
            .bind(project_id)
            .fetch_all(executor)
            .await
    }

    /// Update title/description. The project reference is never changed.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateProposal,
    ) -> Result<Option<Proposal>, sqlx::Error> {
        let query = format!(
            "UPDATE proposals SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                updated_at = clock_timestamp() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let proposal = sqlx::query_as::<_, Proposal>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_optional(&mut *conn)
            .await?;

        if let Some(ref proposal) = proposal {
            ProjectRepo::touch(&mut *conn, proposal.project_id).await?;
        }
        Ok(proposal)
    }

    /// Delete a proposal (its usages cascade) and touch its project.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let project_id: Option<DbId> =
            sqlx::query_scalar("DELETE FROM proposals WHERE id = $1 RETURNING project_id")
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
