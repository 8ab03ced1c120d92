//! Handler for `/users/{id}`, the principals referenced by `createdBy` and
//! `updatedBy`. Users are provisioned out of band and read-only here.

use agora_core::policy::ResourceKind;
use agora_core::types::DbId;
use agora_db::models::user::User;
use agora_db::repositories::UserRepo;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Serialize;

use super::not_found;
use crate::error::AppResult;
use crate::extract::Path;
use crate::middleware::rbac::{Authorized, UserRead};
use crate::response::{Item, JsonLd};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: DbId,
    pub username: String,
    pub role: String,
    pub is_active: bool,
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            role: u.role,
            is_active: u.is_active,
        }
    }
}

/// GET /users/{id}
pub async fn get_user(
    _auth: Authorized<UserRead>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(ResourceKind::User, id))?;

    Ok(JsonLd(Item::new(ResourceKind::User, id, UserView::from(user))))
}
