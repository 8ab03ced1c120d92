use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// User routes mounted at `/users`.
///
/// ```text
/// GET    /{id}    -> get_user (any role)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(users::get_user))
}
