//! Repository for the `federal_states` table.

use agora_core::pagination::Page;
use agora_core::slug::generate_slug;
use agora_core::types::DbId;
use sqlx::{PgConnection, PgExecutor};

use crate::models::federal_state::{CreateFederalState, FederalState, UpdateFederalState};
use crate::repositories::CouncilRepo;

const COLUMNS: &str = "id, name, slug, created_at, updated_at";

/// Provides CRUD operations for federal states.
pub struct FederalStateRepo;

impl FederalStateRepo {
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateFederalState,
    ) -> Result<FederalState, sqlx::Error> {
        let query = format!(
            "INSERT INTO federal_states (name, slug) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FederalState>(&query)
            .bind(&input.name)
            .bind(generate_slug(&input.name))
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<FederalState>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM federal_states WHERE id = $1");
        sqlx::query_as::<_, FederalState>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn exists<'e, E: PgExecutor<'e>>(executor: E, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM federal_states WHERE id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await
    }

    /// One page of federal states ordered by id.
    pub async fn list<'e, E: PgExecutor<'e>>(
        executor: E,
        page: &Page,
    ) -> Result<Vec<FederalState>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM federal_states ORDER BY id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, FederalState>(&query)
            .bind(page.size)
            .bind(page.offset())
            .fetch_all(executor)
            .await
    }

    pub async fn count<'e, E: PgExecutor<'e>>(executor: E) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM federal_states")
            .fetch_one(executor)
            .await
    }

    /// Whether another federal state already uses `name` (exact match).
    pub async fn name_exists<'e, E: PgExecutor<'e>>(
        executor: E,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM federal_states \
             WHERE name = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(executor)
        .await
    }

    /// Update a federal state. Renaming also regenerates the slug.
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
        input: &UpdateFederalState,
    ) -> Result<Option<FederalState>, sqlx::Error> {
        let query = format!(
            "UPDATE federal_states SET \
                name = COALESCE($2, name), \
                slug = COALESCE($3, slug), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FederalState>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.name.as_deref().map(generate_slug))
            .fetch_optional(executor)
            .await
    }

    /// Delete a federal state, first detaching every council that references it.
    ///
    /// Councils survive with a null federal state. Returns the number of
    /// detached councils, or `None` if no state with `id` exists.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<Option<u64>, sqlx::Error> {
        let detached = CouncilRepo::detach_from_federal_state(&mut *conn, id).await?;

        let result = sqlx::query("DELETE FROM federal_states WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        tracing::debug!(federal_state_id = id, detached, "Councils detached from federal state");
        Ok(Some(detached))
    }
}
