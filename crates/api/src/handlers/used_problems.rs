//! Handlers for `/used_problems`: links recording that a proposal
//! addresses a problem.
//!
//! Usages are created and deleted, never edited. Each write touches the
//! project reached through the linked problem.

use agora_core::iri::item_iri;
use agora_core::policy::ResourceKind;
use agora_core::types::{DbId, Timestamp};
use agora_core::validation::{self, not_blank, NOT_FOUND, PROPOSAL_DUPLICATE_PROBLEM};
use agora_db::models::used_problem::{CreateUsedProblem, UsedProblem};
use agora_db::repositories::{ProblemRepo, ProposalRepo, UsedProblemRepo};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{not_found, required, resolve_iri, user_iri};
use crate::error::AppResult;
use crate::extract::{JsonBody, Path};
use crate::middleware::rbac::{Authorized, UsedProblemCreate, UsedProblemDelete, UsedProblemRead};
use crate::response::{Item, JsonLd};
use crate::state::AppState;

const KIND: ResourceKind = ResourceKind::UsedProblem;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsedProblemView {
    pub id: DbId,
    pub problem: String,
    pub proposal: String,
    pub created_by: Option<String>,
    pub created_at: Timestamp,
}

impl From<UsedProblem> for UsedProblemView {
    fn from(u: UsedProblem) -> Self {
        Self {
            id: u.id,
            problem: item_iri(ResourceKind::Problem, u.problem_id),
            proposal: item_iri(ResourceKind::Proposal, u.proposal_id),
            created_by: user_iri(u.created_by),
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUsedProblemRequest {
    #[validate(
        required(code = "validate.general.notBlank"),
        custom(function = "not_blank")
    )]
    pub problem: Option<String>,
    #[validate(
        required(code = "validate.general.notBlank"),
        custom(function = "not_blank")
    )]
    pub proposal: Option<String>,
}

/// GET /used_problems/{id}
pub async fn get_used_problem(
    _auth: Authorized<UsedProblemRead>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let used = UsedProblemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(KIND, id))?;

    Ok(JsonLd(Item::new(KIND, id, UsedProblemView::from(used))))
}

/// POST /used_problems
///
/// A problem can be linked to the same proposal only once; a second link
/// is reported on `problem`.
pub async fn create_used_problem(
    auth: Authorized<UsedProblemCreate>,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateUsedProblemRequest>,
) -> AppResult<impl IntoResponse> {
    let mut violations = validation::collect(input.validate());
    let mut tx = state.pool.begin().await?;

    let problem_id = resolve_iri(
        &violations,
        ResourceKind::Problem,
        "problem",
        input.problem.as_deref(),
    )?;
    let proposal_id = resolve_iri(
        &violations,
        ResourceKind::Proposal,
        "proposal",
        input.proposal.as_deref(),
    )?;

    if let Some(problem_id) = problem_id {
        if !ProblemRepo::exists(&mut *tx, problem_id).await? {
            violations.push("problem", NOT_FOUND);
        }
    }
    if let Some(proposal_id) = proposal_id {
        if !ProposalRepo::exists(&mut *tx, proposal_id).await? {
            violations.push("proposal", NOT_FOUND);
        }
    }
    if let (Some(problem_id), Some(proposal_id)) = (problem_id, proposal_id) {
        if violations.is_empty()
            && UsedProblemRepo::pair_exists(&mut *tx, problem_id, proposal_id).await?
        {
            violations.push("problem", PROPOSAL_DUPLICATE_PROBLEM);
        }
    }
    violations.into_result()?;

    let used = UsedProblemRepo::create(
        &mut *tx,
        &CreateUsedProblem {
            problem_id: required(problem_id, "problem")?,
            proposal_id: required(proposal_id, "proposal")?,
            created_by: auth.user.user_id,
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        used_problem_id = used.id,
        problem_id = used.problem_id,
        proposal_id = used.proposal_id,
        user_id = auth.user.user_id,
        "Problem usage created",
    );

    Ok((
        StatusCode::CREATED,
        JsonLd(Item::new(KIND, used.id, UsedProblemView::from(used))),
    ))
}

/// DELETE /used_problems/{id}
pub async fn delete_used_problem(
    auth: Authorized<UsedProblemDelete>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;
    if !UsedProblemRepo::delete(&mut *tx, id).await? {
        return Err(not_found(KIND, id).into());
    }
    tx.commit().await?;

    tracing::info!(used_problem_id = id, user_id = auth.user.user_id, "Problem usage deleted");

    Ok(StatusCode::NO_CONTENT)
}
