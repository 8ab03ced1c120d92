use axum::routing::{get, post};
use axum::Router;

use crate::handlers::used_problems;
use crate::state::AppState;

/// Problem usage routes mounted at `/used_problems`. Neither
/// `GET /used_problems` nor `PUT /used_problems/{id}` exist (405).
///
/// ```text
/// POST   /        -> create_used_problem (any role)
/// GET    /{id}    -> get_used_problem (any role)
/// DELETE /{id}    -> delete_used_problem (managers)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(used_problems::create_used_problem))
        .route(
            "/{id}",
            get(used_problems::get_used_problem).delete(used_problems::delete_used_problem),
        )
}
