//! Handlers for `/federal_states`.
//!
//! A federal state lists the councils that reference it. Deleting a state
//! detaches its councils rather than deleting them.

use agora_core::iri::item_iri;
use agora_core::policy::ResourceKind;
use agora_core::types::DbId;
use agora_core::validation::{self, not_blank, FEDERAL_STATE_DUPLICATE_NAME};
use agora_db::models::federal_state::{CreateFederalState, FederalState, UpdateFederalState};
use agora_db::repositories::{CouncilRepo, FederalStateRepo};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use validator::Validate;

use super::{not_found, required};
use crate::error::AppResult;
use crate::extract::{JsonBody, Path, Query};
use crate::middleware::rbac::{
    Authorized, FederalStateCreate, FederalStateDelete, FederalStateUpdate,
};
use crate::query::PageParams;
use crate::response::{Collection, Embedded, Item, JsonLd};
use crate::state::AppState;

const KIND: ResourceKind = ResourceKind::FederalState;

/// Collection member: no council list.
#[derive(Debug, Serialize)]
pub struct FederalStateSummary {
    pub id: DbId,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct FederalStateView {
    #[serde(flatten)]
    pub summary: FederalStateSummary,
    /// IRIs of the councils referencing this state.
    pub councils: Vec<String>,
}

impl From<FederalState> for FederalStateSummary {
    fn from(s: FederalState) -> Self {
        Self {
            id: s.id,
            name: s.name,
            slug: s.slug,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFederalStateRequest {
    #[validate(
        required(code = "validate.general.notBlank"),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFederalStateRequest {
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
}

async fn load_view<'e, E: PgExecutor<'e>>(
    executor: E,
    state: FederalState,
) -> AppResult<FederalStateView> {
    let councils = CouncilRepo::list_ids_by_federal_state(executor, state.id)
        .await?
        .into_iter()
        .map(|id| item_iri(ResourceKind::Council, id))
        .collect();

    Ok(FederalStateView {
        summary: state.into(),
        councils,
    })
}

/// GET /federal_states
pub async fn list_federal_states(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.resolve(state.config.page_size);
    let rows = FederalStateRepo::list(&state.pool, &page).await?;
    let total = FederalStateRepo::count(&state.pool).await?;

    let members = rows
        .into_iter()
        .map(|s| Embedded::new(KIND, s.id, FederalStateSummary::from(s)))
        .collect();

    Ok(JsonLd(Collection::new(KIND, members, &page, total)))
}

/// GET /federal_states/{id}
pub async fn get_federal_state(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let federal_state = FederalStateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(KIND, id))?;
    let view = load_view(&state.pool, federal_state).await?;

    Ok(JsonLd(Item::new(KIND, id, view)))
}

/// POST /federal_states
pub async fn create_federal_state(
    auth: Authorized<FederalStateCreate>,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateFederalStateRequest>,
) -> AppResult<impl IntoResponse> {
    let mut violations = validation::collect(input.validate());
    let mut tx = state.pool.begin().await?;

    if let Some(name) = input.name.as_deref().filter(|_| !violations.has("name")) {
        if FederalStateRepo::name_exists(&mut *tx, name, None).await? {
            violations.push("name", FEDERAL_STATE_DUPLICATE_NAME);
        }
    }
    violations.into_result()?;

    let federal_state = FederalStateRepo::create(
        &mut *tx,
        &CreateFederalState {
            name: required(input.name, "name")?,
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        federal_state_id = federal_state.id,
        user_id = auth.user.user_id,
        "Federal state created",
    );

    let id = federal_state.id;
    let view = FederalStateView {
        summary: federal_state.into(),
        councils: Vec::new(),
    };
    Ok((StatusCode::CREATED, JsonLd(Item::new(KIND, id, view))))
}

/// PUT /federal_states/{id}
pub async fn update_federal_state(
    auth: Authorized<FederalStateUpdate>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateFederalStateRequest>,
) -> AppResult<impl IntoResponse> {
    let mut violations = validation::collect(input.validate());
    let mut tx = state.pool.begin().await?;

    if !FederalStateRepo::exists(&mut *tx, id).await? {
        return Err(not_found(KIND, id).into());
    }

    if let Some(name) = input.name.as_deref().filter(|_| !violations.has("name")) {
        if FederalStateRepo::name_exists(&mut *tx, name, Some(id)).await? {
            violations.push("name", FEDERAL_STATE_DUPLICATE_NAME);
        }
    }
    violations.into_result()?;

    let federal_state =
        FederalStateRepo::update(&mut *tx, id, &UpdateFederalState { name: input.name })
            .await?
            .ok_or_else(|| not_found(KIND, id))?;
    let view = load_view(&mut *tx, federal_state).await?;
    tx.commit().await?;

    tracing::info!(federal_state_id = id, user_id = auth.user.user_id, "Federal state updated");

    Ok(JsonLd(Item::new(KIND, id, view)))
}

/// DELETE /federal_states/{id}
///
/// Councils of the state survive with their reference set to null.
pub async fn delete_federal_state(
    auth: Authorized<FederalStateDelete>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;
    let detached = FederalStateRepo::delete(&mut *tx, id)
        .await?
        .ok_or_else(|| not_found(KIND, id))?;
    tx.commit().await?;

    tracing::info!(
        federal_state_id = id,
        detached_councils = detached,
        user_id = auth.user.user_id,
        "Federal state deleted",
    );

    Ok(StatusCode::NO_CONTENT)
}
