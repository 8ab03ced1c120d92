//! Handlers for `/problems`.
//!
//! Problems belong to exactly one project for their whole life; the
//! project reference is only read on create. Every write touches the
//! owning project's `updatedAt`. There is no collection endpoint: problems
//! are listed through their project.

use agora_core::iri::item_iri;
use agora_core::policy::ResourceKind;
use agora_core::types::{DbId, Timestamp};
use agora_core::validation::{self, not_blank, NOT_FOUND};
use agora_db::models::problem::{CreateProblem, Problem, UpdateProblem};
use agora_db::repositories::{ProblemRepo, ProjectRepo, UsedProblemRepo};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use validator::Validate;

use super::{not_found, required, resolve_iri, user_iri};
use crate::error::AppResult;
use crate::extract::{JsonBody, Path};
use crate::middleware::rbac::{
    Authorized, ProblemCreate, ProblemDelete, ProblemRead, ProblemUpdate,
};
use crate::response::{Embedded, Item, JsonLd};
use crate::state::AppState;

const KIND: ResourceKind = ResourceKind::Problem;

/// A usage as embedded in its problem.
#[derive(Debug, Serialize)]
pub struct UsageLink {
    pub id: DbId,
    pub proposal: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemView {
    pub id: DbId,
    pub description: String,
    pub priority: i32,
    pub project: String,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub usages: Vec<Embedded<UsageLink>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProblemRequest {
    #[validate(
        required(code = "validate.general.notBlank"),
        custom(function = "not_blank")
    )]
    pub description: Option<String>,
    pub priority: Option<i32>,
    #[validate(
        required(code = "validate.general.notBlank"),
        custom(function = "not_blank")
    )]
    pub project: Option<String>,
}

/// Update body. A `project` key is accepted and ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProblemRequest {
    #[validate(custom(function = "not_blank"))]
    pub description: Option<String>,
    pub priority: Option<i32>,
}

async fn load_view(conn: &mut PgConnection, problem: Problem) -> AppResult<ProblemView> {
    let usages = UsedProblemRepo::list_by_problem(&mut *conn, problem.id)
        .await?
        .into_iter()
        .map(|u| {
            let link = UsageLink {
                id: u.id,
                proposal: item_iri(ResourceKind::Proposal, u.proposal_id),
            };
            Embedded::new(ResourceKind::UsedProblem, u.id, link)
        })
        .collect();

    Ok(ProblemView {
        id: problem.id,
        description: problem.description,
        priority: problem.priority,
        project: item_iri(ResourceKind::Project, problem.project_id),
        created_by: user_iri(problem.created_by),
        updated_by: user_iri(problem.updated_by),
        created_at: problem.created_at,
        updated_at: problem.updated_at,
        usages,
    })
}

/// GET /problems/{id}
pub async fn get_problem(
    _auth: Authorized<ProblemRead>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.pool.acquire().await?;
    let problem = ProblemRepo::find_by_id(&mut *conn, id)
        .await?
        .ok_or_else(|| not_found(KIND, id))?;
    let view = load_view(&mut *conn, problem).await?;

    Ok(JsonLd(Item::new(KIND, id, view)))
}

/// POST /problems
pub async fn create_problem(
    auth: Authorized<ProblemCreate>,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateProblemRequest>,
) -> AppResult<impl IntoResponse> {
    let mut violations = validation::collect(input.validate());
    let mut tx = state.pool.begin().await?;

    let project_id = resolve_iri(
        &violations,
        ResourceKind::Project,
        "project",
        input.project.as_deref(),
    )?;
    if let Some(project_id) = project_id {
        if !ProjectRepo::exists(&mut *tx, project_id).await? {
            violations.push("project", NOT_FOUND);
        }
    }
    violations.into_result()?;

    let problem = ProblemRepo::create(
        &mut *tx,
        &CreateProblem {
            project_id: required(project_id, "project")?,
            description: required(input.description, "description")?,
            priority: input.priority,
            created_by: auth.user.user_id,
        },
    )
    .await?;
    let id = problem.id;
    let project_id = problem.project_id;
    let view = load_view(&mut *tx, problem).await?;
    tx.commit().await?;

    tracing::info!(
        problem_id = id,
        project_id,
        user_id = auth.user.user_id,
        "Problem created",
    );

    Ok((StatusCode::CREATED, JsonLd(Item::new(KIND, id, view))))
}

/// PUT /problems/{id}
///
/// Applies description and priority; the owning project never changes.
pub async fn update_problem(
    auth: Authorized<ProblemUpdate>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateProblemRequest>,
) -> AppResult<impl IntoResponse> {
    validation::collect(input.validate()).into_result()?;

    let mut tx = state.pool.begin().await?;
    let problem = ProblemRepo::update(
        &mut *tx,
        id,
        &UpdateProblem {
            description: input.description,
            priority: input.priority,
            updated_by: auth.user.user_id,
        },
    )
    .await?
    .ok_or_else(|| not_found(KIND, id))?;
    let view = load_view(&mut *tx, problem).await?;
    tx.commit().await?;

    tracing::info!(problem_id = id, user_id = auth.user.user_id, "Problem updated");

    Ok(JsonLd(Item::new(KIND, id, view)))
}

/// DELETE /problems/{id}
///
/// Removes the problem from its project's collection along with its usages.
pub async fn delete_problem(
    auth: Authorized<ProblemDelete>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;
    if !ProblemRepo::delete(&mut *tx, id).await? {
        return Err(not_found(KIND, id).into());
    }
    tx.commit().await?;

    tracing::info!(problem_id = id, user_id = auth.user.user_id, "Problem deleted");

    Ok(StatusCode::NO_CONTENT)
}
