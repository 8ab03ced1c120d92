use axum::routing::get;
use axum::Router;

use crate::handlers::federal_states;
use crate::state::AppState;

/// Federal state routes mounted at `/federal_states`.
///
/// ```text
/// GET    /        -> list_federal_states (public)
/// POST   /        -> create_federal_state (managers)
/// GET    /{id}    -> get_federal_state (public)
/// PUT    /{id}    -> update_federal_state (managers)
/// DELETE /{id}    -> delete_federal_state (managers, detaches councils)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(federal_states::list_federal_states).post(federal_states::create_federal_state),
        )
        .route(
            "/{id}",
            get(federal_states::get_federal_state)
                .put(federal_states::update_federal_state)
                .delete(federal_states::delete_federal_state),
        )
}
