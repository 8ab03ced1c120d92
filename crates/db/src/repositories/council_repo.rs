//! Repository for the `councils` table.

use agora_core::pagination::Page;
use agora_core::slug::generate_slug;
use agora_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::council::{Council, CreateCouncil, UpdateCouncil};

const COLUMNS: &str = "id, name, slug, federal_state_id, created_at, updated_at";

/// Provides CRUD operations for councils.
pub struct CouncilRepo;

impl CouncilRepo {
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateCouncil,
    ) -> Result<Council, sqlx::Error> {
        let query = format!(
            "INSERT INTO councils (name, slug, federal_state_id) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Council>(&query)
            .bind(&input.name)
            .bind(generate_slug(&input.name))
            .bind(input.federal_state_id)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Council>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM councils WHERE id = $1");
        sqlx::query_as::<_, Council>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// One page of councils ordered by id.
    pub async fn list<'e, E: PgExecutor<'e>>(
        executor: E,
        page: &Page,
    ) -> Result<Vec<Council>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM councils ORDER BY id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Council>(&query)
            .bind(page.size)
            .bind(page.offset())
            .fetch_all(executor)
            .await
    }

    pub async fn count<'e, E: PgExecutor<'e>>(executor: E) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM councils")
            .fetch_one(executor)
            .await
    }

    /// Ids of all councils in a federal state, ordered by id.
    pub async fn list_ids_by_federal_state<'e, E: PgExecutor<'e>>(
        executor: E,
        federal_state_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM councils WHERE federal_state_id = $1 ORDER BY id")
            .bind(federal_state_id)
            .fetch_all(executor)
            .await
    }

    /// Update a council. Only provided fields are applied; renaming
    /// regenerates the slug.
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
        input: &UpdateCouncil,
    ) -> Result<Option<Council>, sqlx::Error> {
        let query = format!(
            "UPDATE councils SET \
                name = COALESCE($2, name), \
                slug = COALESCE($3, slug), \
                federal_state_id = CASE WHEN $4 THEN $5 ELSE federal_state_id END, \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Council>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.name.as_deref().map(generate_slug))
            .bind(input.federal_state_id.is_some())
            .bind(input.federal_state_id.flatten())
            .fetch_optional(executor)
            .await
    }

    /// Null the federal state reference of every council in a state.
    ///
    /// Returns the number of councils detached.
    pub async fn detach_from_federal_state<'e, E: PgExecutor<'e>>(
        executor: E,
        federal_state_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE councils SET federal_state_id = NULL, updated_at = now() \
             WHERE federal_state_id = $1",
        )
        .bind(federal_state_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM councils WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
