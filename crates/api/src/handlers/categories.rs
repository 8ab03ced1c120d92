//! Handlers for `/categories`.
//!
//! Reads are public; mutations are restricted to managers. Category names
//! are globally unique and the slug follows the name.

use agora_core::policy::ResourceKind;
use agora_core::types::DbId;
use agora_core::validation::{self, not_blank, CATEGORY_DUPLICATE_NAME};
use agora_db::models::category::{Category, CreateCategory, UpdateCategory};
use agora_db::repositories::CategoryRepo;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{not_found, required};
use crate::error::AppResult;
use crate::extract::{JsonBody, Path, Query};
use crate::middleware::rbac::{Authorized, CategoryCreate, CategoryDelete, CategoryUpdate};
use crate::query::PageParams;
use crate::response::{Collection, Embedded, Item, JsonLd};
use crate::state::AppState;

const KIND: ResourceKind = ResourceKind::Category;

#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub id: DbId,
    pub name: String,
    pub slug: String,
}

impl From<Category> for CategoryView {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(
        required(code = "validate.general.notBlank"),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
}

/// GET /categories
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.resolve(state.config.page_size);
    let rows = CategoryRepo::list(&state.pool, &page).await?;
    let total = CategoryRepo::count(&state.pool).await?;

    let members = rows
        .into_iter()
        .map(|c| Embedded::new(KIND, c.id, CategoryView::from(c)))
        .collect();

    Ok(JsonLd(Collection::new(KIND, members, &page, total)))
}

/// GET /categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(KIND, id))?;

    Ok(JsonLd(Item::new(KIND, id, CategoryView::from(category))))
}

/// POST /categories
pub async fn create_category(
    auth: Authorized<CategoryCreate>,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    let mut violations = validation::collect(input.validate());
    let mut tx = state.pool.begin().await?;

    if let Some(name) = input.name.as_deref().filter(|_| !violations.has("name")) {
        if CategoryRepo::name_exists(&mut *tx, name, None).await? {
            violations.push("name", CATEGORY_DUPLICATE_NAME);
        }
    }
    violations.into_result()?;

    let category = CategoryRepo::create(
        &mut *tx,
        &CreateCategory {
            name: required(input.name, "name")?,
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        category_id = category.id,
        user_id = auth.user.user_id,
        "Category created",
    );

    Ok((
        StatusCode::CREATED,
        JsonLd(Item::new(KIND, category.id, CategoryView::from(category))),
    ))
}

/// PUT /categories/{id}
///
/// Partial update; renaming to the category's own name is allowed.
pub async fn update_category(
    auth: Authorized<CategoryUpdate>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    let mut violations = validation::collect(input.validate());
    let mut tx = state.pool.begin().await?;

    if CategoryRepo::find_by_id(&mut *tx, id).await?.is_none() {
        return Err(not_found(KIND, id).into());
    }

    if let Some(name) = input.name.as_deref().filter(|_| !violations.has("name")) {
        if CategoryRepo::name_exists(&mut *tx, name, Some(id)).await? {
            violations.push("name", CATEGORY_DUPLICATE_NAME);
        }
    }
    violations.into_result()?;

    let category = CategoryRepo::update(&mut *tx, id, &UpdateCategory { name: input.name })
        .await?
        .ok_or_else(|| not_found(KIND, id))?;
    tx.commit().await?;

    tracing::info!(category_id = id, user_id = auth.user.user_id, "Category updated");

    Ok(JsonLd(Item::new(KIND, id, CategoryView::from(category))))
}

/// DELETE /categories/{id}
pub async fn delete_category(
    auth: Authorized<CategoryDelete>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(not_found(KIND, id).into());
    }

    tracing::info!(category_id = id, user_id = auth.user.user_id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}
