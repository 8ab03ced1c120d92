use axum::routing::{get, post};
use axum::Router;

use crate::handlers::proposals;
use crate::state::AppState;

/// Proposal routes mounted at `/proposals`. `GET /proposals` answers 405.
///
/// ```text
/// POST   /        -> create_proposal (any role)
/// GET    /{id}    -> get_proposal (any role)
/// PUT    /{id}    -> update_proposal (managers)
/// DELETE /{id}    -> delete_proposal (managers)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(proposals::create_proposal))
        .route(
            "/{id}",
            get(proposals::get_proposal)
                .put(proposals::update_proposal)
                .delete(proposals::delete_proposal),
        )
}
