//! Repository for the `projects` table.

use agora_core::pagination::Page;
use agora_core::slug::generate_slug;
use agora_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::project::{CreateProject, Project, UpdateProject};

const COLUMNS: &str = "id, name, slug, description, created_by, created_at, updated_at";

/// Provides CRUD operations for projects, plus the `updated_at` touch used
/// when sub-resources change.
pub struct ProjectRepo;

impl ProjectRepo {
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (name, slug, description, created_by) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(generate_slug(&input.name))
            .bind(&input.description)
            .bind(input.created_by)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn exists<'e, E: PgExecutor<'e>>(executor: E, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await
    }

    /// One page of projects ordered by id.
    pub async fn list<'e, E: PgExecutor<'e>>(
        executor: E,
        page: &Page,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(page.size)
            .bind(page.offset())
            .fetch_all(executor)
            .await
    }

    pub async fn count<'e, E: PgExecutor<'e>>(executor: E) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(executor)
            .await
    }

    /// Update a project. Only non-`None` fields are applied.
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET \
                name = COALESCE($2, name), \
                slug = COALESCE($3, slug), \
                description = COALESCE($4, description), \
                updated_at = clock_timestamp() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.name.as_deref().map(generate_slug))
            .bind(&input.description)
            .fetch_optional(executor)
            .await
    }

    /// Delete a project. Problems, proposals and their usages cascade.
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Bump `updated_at` of a project to the current wall-clock time.
    ///
    /// `clock_timestamp()` rather than `now()` so successive touches inside
    /// one transaction still advance.
    pub async fn touch<'e, E: PgExecutor<'e>>(executor: E, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE projects SET updated_at = clock_timestamp() WHERE id = $1")
                .bind(id)
                .execute(executor)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Bump `updated_at` of the project that owns `problem_id`.
    pub async fn touch_for_problem<'e, E: PgExecutor<'e>>(
        executor: E,
        problem_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET updated_at = clock_timestamp() \
             WHERE id = (SELECT project_id FROM problems WHERE id = $1)",
        )
        .bind(problem_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
