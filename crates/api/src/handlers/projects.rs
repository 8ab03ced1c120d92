//! Handlers for `/projects`.
//!
//! A project document embeds its problems as sub-objects and lists its
//! proposals by IRI. Any authenticated user may open a project; editing
//! and deleting are manager operations. Deleting a project removes its
//! problems, proposals and their usages.

use agora_core::iri::item_iri;
use agora_core::policy::ResourceKind;
use agora_core::types::{DbId, Timestamp};
use agora_core::validation::{self, not_blank};
use agora_db::models::problem::Problem;
use agora_db::models::project::{CreateProject, Project, UpdateProject};
use agora_db::repositories::{ProblemRepo, ProjectRepo, ProposalRepo};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use validator::Validate;

use super::{not_found, required, user_iri};
use crate::error::AppResult;
use crate::extract::{JsonBody, Path, Query};
use crate::middleware::rbac::{Authorized, ProjectCreate, ProjectDelete, ProjectUpdate};
use crate::query::PageParams;
use crate::response::{Collection, Embedded, Item, JsonLd};
use crate::state::AppState;

const KIND: ResourceKind = ResourceKind::Project;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_by: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Project> for ProjectSummary {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            name: p.name,
            slug: p.slug,
            description: p.description,
            created_by: user_iri(p.created_by),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// A problem as embedded in its project.
#[derive(Debug, Serialize)]
pub struct EmbeddedProblem {
    pub id: DbId,
    pub description: String,
    pub priority: i32,
}

impl From<Problem> for EmbeddedProblem {
    fn from(p: Problem) -> Self {
        Self {
            id: p.id,
            description: p.description,
            priority: p.priority,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectView {
    #[serde(flatten)]
    pub summary: ProjectSummary,
    pub problems: Vec<Embedded<EmbeddedProblem>>,
    /// IRIs of the project's proposals.
    pub proposals: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(
        required(code = "validate.general.notBlank"),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Load a project with its problems and proposal IRIs.
///
/// Reads through the caller's connection so a write and the document it
/// returns see the same state.
pub(crate) async fn load_view(conn: &mut PgConnection, id: DbId) -> AppResult<ProjectView> {
    let project = ProjectRepo::find_by_id(&mut *conn, id)
        .await?
        .ok_or_else(|| not_found(KIND, id))?;

    let problems = ProblemRepo::list_by_project(&mut *conn, id)
        .await?
        .into_iter()
        .map(|p| Embedded::new(ResourceKind::Problem, p.id, EmbeddedProblem::from(p)))
        .collect();

    let proposals = ProposalRepo::list_ids_by_project(&mut *conn, id)
        .await?
        .into_iter()
        .map(|pid| item_iri(ResourceKind::Proposal, pid))
        .collect();

    Ok(ProjectView {
        summary: project.into(),
        problems,
        proposals,
    })
}

/// GET /projects
pub async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.resolve(state.config.page_size);
    let rows = ProjectRepo::list(&state.pool, &page).await?;
    let total = ProjectRepo::count(&state.pool).await?;

    let members = rows
        .into_iter()
        .map(|p| Embedded::new(KIND, p.id, ProjectSummary::from(p)))
        .collect();

    Ok(JsonLd(Collection::new(KIND, members, &page, total)))
}

/// GET /projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.pool.acquire().await?;
    let view = load_view(&mut *conn, id).await?;

    Ok(JsonLd(Item::new(KIND, id, view)))
}

/// POST /projects
pub async fn create_project(
    auth: Authorized<ProjectCreate>,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateProjectRequest>,
) -> AppResult<impl IntoResponse> {
    validation::collect(input.validate()).into_result()?;

    let project = ProjectRepo::create(
        &state.pool,
        &CreateProject {
            name: required(input.name, "name")?,
            description: input.description,
            created_by: auth.user.user_id,
        },
    )
    .await?;

    tracing::info!(
        project_id = project.id,
        user_id = auth.user.user_id,
        "Project created",
    );

    let id = project.id;
    let view = ProjectView {
        summary: project.into(),
        problems: Vec::new(),
        proposals: Vec::new(),
    };
    Ok((StatusCode::CREATED, JsonLd(Item::new(KIND, id, view))))
}

/// PUT /projects/{id}
pub async fn update_project(
    auth: Authorized<ProjectUpdate>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateProjectRequest>,
) -> AppResult<impl IntoResponse> {
    validation::collect(input.validate()).into_result()?;

    let mut tx = state.pool.begin().await?;
    ProjectRepo::update(
        &mut *tx,
        id,
        &UpdateProject {
            name: input.name,
            description: input.description,
        },
    )
    .await?
    .ok_or_else(|| not_found(KIND, id))?;
    let view = load_view(&mut *tx, id).await?;
    tx.commit().await?;

    tracing::info!(project_id = id, user_id = auth.user.user_id, "Project updated");

    Ok(JsonLd(Item::new(KIND, id, view)))
}

/// DELETE /projects/{id}
pub async fn delete_project(
    auth: Authorized<ProjectDelete>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ProjectRepo::delete(&state.pool, id).await? {
        return Err(not_found(KIND, id).into());
    }

    tracing::info!(project_id = id, user_id = auth.user.user_id, "Project deleted");

    Ok(StatusCode::NO_CONTENT)
}
