//! Handlers for `/councils`.

use agora_core::iri::item_iri;
use agora_core::policy::ResourceKind;
use agora_core::types::DbId;
use agora_core::validation::{self, not_blank, ViolationList, NOT_FOUND};
use agora_db::models::council::{Council, CreateCouncil, UpdateCouncil};
use agora_db::repositories::{CouncilRepo, FederalStateRepo};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use validator::Validate;

use super::{not_found, required, resolve_iri};
use crate::error::AppResult;
use crate::extract::{double_option, JsonBody, Path, Query};
use crate::middleware::rbac::{Authorized, CouncilCreate, CouncilDelete, CouncilUpdate};
use crate::query::PageParams;
use crate::response::{Collection, Embedded, Item, JsonLd};
use crate::state::AppState;

const KIND: ResourceKind = ResourceKind::Council;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouncilView {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub federal_state: Option<String>,
}

impl From<Council> for CouncilView {
    fn from(c: Council) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            federal_state: c
                .federal_state_id
                .map(|id| item_iri(ResourceKind::FederalState, id)),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCouncilRequest {
    #[validate(
        required(code = "validate.general.notBlank"),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,
    pub federal_state: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCouncilRequest {
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    /// Absent leaves the reference alone; `null` clears it.
    #[serde(default, deserialize_with = "double_option")]
    pub federal_state: Option<Option<String>>,
}

/// Resolve a federal state IRI and push `notFound` if it points nowhere.
async fn resolve_federal_state(
    conn: &mut PgConnection,
    violations: &mut ViolationList,
    iri: Option<&str>,
) -> AppResult<Option<DbId>> {
    let id = resolve_iri(violations, ResourceKind::FederalState, "federalState", iri)?;
    if let Some(id) = id {
        if !FederalStateRepo::exists(&mut *conn, id).await? {
            violations.push("federalState", NOT_FOUND);
        }
    }
    Ok(id)
}

/// GET /councils
pub async fn list_councils(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.resolve(state.config.page_size);
    let rows = CouncilRepo::list(&state.pool, &page).await?;
    let total = CouncilRepo::count(&state.pool).await?;

    let members = rows
        .into_iter()
        .map(|c| Embedded::new(KIND, c.id, CouncilView::from(c)))
        .collect();

    Ok(JsonLd(Collection::new(KIND, members, &page, total)))
}

/// GET /councils/{id}
pub async fn get_council(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let council = CouncilRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(KIND, id))?;

    Ok(JsonLd(Item::new(KIND, id, CouncilView::from(council))))
}

/// POST /councils
pub async fn create_council(
    auth: Authorized<CouncilCreate>,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateCouncilRequest>,
) -> AppResult<impl IntoResponse> {
    let mut violations = validation::collect(input.validate());
    let mut tx = state.pool.begin().await?;

    let federal_state_id =
        resolve_federal_state(&mut *tx, &mut violations, input.federal_state.as_deref()).await?;
    violations.into_result()?;

    let council = CouncilRepo::create(
        &mut *tx,
        &CreateCouncil {
            name: required(input.name, "name")?,
            federal_state_id,
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        council_id = council.id,
        federal_state_id = ?council.federal_state_id,
        user_id = auth.user.user_id,
        "Council created",
    );

    Ok((
        StatusCode::CREATED,
        JsonLd(Item::new(KIND, council.id, CouncilView::from(council))),
    ))
}

/// PUT /councils/{id}
pub async fn update_council(
    auth: Authorized<CouncilUpdate>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateCouncilRequest>,
) -> AppResult<impl IntoResponse> {
    let mut violations = validation::collect(input.validate());
    let mut tx = state.pool.begin().await?;

    if CouncilRepo::find_by_id(&mut *tx, id).await?.is_none() {
        return Err(not_found(KIND, id).into());
    }

    let federal_state_id = match input.federal_state {
        None => None,
        Some(None) => Some(None),
        Some(Some(ref iri)) => {
            Some(resolve_federal_state(&mut *tx, &mut violations, Some(iri)).await?)
        }
    };
    violations.into_result()?;

    let council = CouncilRepo::update(
        &mut *tx,
        id,
        &UpdateCouncil {
            name: input.name,
            federal_state_id,
        },
    )
    .await?
    .ok_or_else(|| not_found(KIND, id))?;
    tx.commit().await?;

    tracing::info!(council_id = id, user_id = auth.user.user_id, "Council updated");

    Ok(JsonLd(Item::new(KIND, id, CouncilView::from(council))))
}

/// DELETE /councils/{id}
pub async fn delete_council(
    auth: Authorized<CouncilDelete>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !CouncilRepo::delete(&state.pool, id).await? {
        return Err(not_found(KIND, id).into());
    }

    tracing::info!(council_id = id, user_id = auth.user.user_id, "Council deleted");

    Ok(StatusCode::NO_CONTENT)
}
