use axum::routing::{get, post};
use axum::Router;

use crate::handlers::problems;
use crate::state::AppState;

/// Problem routes mounted at `/problems`. There is no collection read;
/// `GET /problems` answers 405.
///
/// ```text
/// POST   /        -> create_problem (any role)
/// GET    /{id}    -> get_problem (any role)
/// PUT    /{id}    -> update_problem (managers)
/// DELETE /{id}    -> delete_problem (managers)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(problems::create_problem))
        .route(
            "/{id}",
            get(problems::get_problem)
                .put(problems::update_problem)
                .delete(problems::delete_problem),
        )
}
