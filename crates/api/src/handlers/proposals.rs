//! Handlers for `/proposals`.
//!
//! Like problems, proposals are bound to the project they were created in
//! and every write touches that project. The addressed problems are listed
//! by usage IRI.

use agora_core::iri::item_iri;
use agora_core::policy::ResourceKind;
use agora_core::types::{DbId, Timestamp};
use agora_core::validation::{self, not_blank, NOT_FOUND};
use agora_db::models::proposal::{CreateProposal, Proposal, UpdateProposal};
use agora_db::repositories::{ProjectRepo, ProposalRepo, UsedProblemRepo};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use validator::Validate;

use super::{not_found, required, resolve_iri, user_iri};
use crate::error::AppResult;
use crate::extract::{JsonBody, Path};
use crate::middleware::rbac::{
    Authorized, ProposalCreate, ProposalDelete, ProposalRead, ProposalUpdate,
};
use crate::response::{Item, JsonLd};
use crate::state::AppState;

const KIND: ResourceKind = ResourceKind::Proposal;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalView {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub project: String,
    pub created_by: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// IRIs of the usages linking problems to this proposal.
    pub used_problems: Vec<String>,
}

impl ProposalView {
    fn new(proposal: Proposal, used_problems: Vec<String>) -> Self {
        Self {
            id: proposal.id,
            title: proposal.title,
            description: proposal.description,
            project: item_iri(ResourceKind::Project, proposal.project_id),
            created_by: user_iri(proposal.created_by),
            created_at: proposal.created_at,
            updated_at: proposal.updated_at,
            used_problems,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProposalRequest {
    #[validate(
        required(code = "validate.general.notBlank"),
        custom(function = "not_blank")
    )]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(
        required(code = "validate.general.notBlank"),
        custom(function = "not_blank")
    )]
    pub project: Option<String>,
}

/// Update body. A `project` key is accepted and ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProposalRequest {
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,
    pub description: Option<String>,
}

async fn load_view<'e, E: PgExecutor<'e>>(
    executor: E,
    proposal: Proposal,
) -> AppResult<ProposalView> {
    let used_problems = UsedProblemRepo::list_ids_by_proposal(executor, proposal.id)
        .await?
        .into_iter()
        .map(|id| item_iri(ResourceKind::UsedProblem, id))
        .collect();

    Ok(ProposalView::new(proposal, used_problems))
}

/// GET /proposals/{id}
pub async fn get_proposal(
    _auth: Authorized<ProposalRead>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let proposal = ProposalRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(KIND, id))?;
    let view = load_view(&state.pool, proposal).await?;

    Ok(JsonLd(Item::new(KIND, id, view)))
}

/// POST /proposals
pub async fn create_proposal(
    auth: Authorized<ProposalCreate>,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateProposalRequest>,
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

    let proposal = ProposalRepo::create(
        &mut *tx,
        &CreateProposal {
            project_id: required(project_id, "project")?,
            title: required(input.title, "title")?,
            description: input.description,
            created_by: auth.user.user_id,
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        proposal_id = proposal.id,
        project_id = proposal.project_id,
        user_id = auth.user.user_id,
        "Proposal created",
    );

    let id = proposal.id;
    let view = ProposalView::new(proposal, Vec::new());
    Ok((StatusCode::CREATED, JsonLd(Item::new(KIND, id, view))))
}

/// PUT /proposals/{id}
///
/// Applies title and description; the owning project never changes.
pub async fn update_proposal(
    auth: Authorized<ProposalUpdate>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateProposalRequest>,
) -> AppResult<impl IntoResponse> {
    validation::collect(input.validate()).into_result()?;

    let mut tx = state.pool.begin().await?;
    let proposal = ProposalRepo::update(
        &mut *tx,
        id,
        &UpdateProposal {
            title: input.title,
            description: input.description,
        },
    )
    .await?
    .ok_or_else(|| not_found(KIND, id))?;
    let view = load_view(&mut *tx, proposal).await?;
    tx.commit().await?;

    tracing::info!(proposal_id = id, user_id = auth.user.user_id, "Proposal updated");

    Ok(JsonLd(Item::new(KIND, id, view)))
}

/// DELETE /proposals/{id}
pub async fn delete_proposal(
    auth: Authorized<ProposalDelete>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;
    if !ProposalRepo::delete(&mut *tx, id).await? {
        return Err(not_found(KIND, id).into());
    }
    tx.commit().await?;

    tracing::info!(proposal_id = id, user_id = auth.user.user_id, "Proposal deleted");

    Ok(StatusCode::NO_CONTENT)
}
