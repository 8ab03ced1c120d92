use axum::routing::get;
use axum::Router;

use crate::handlers::councils;
use crate::state::AppState;

/// Council routes mounted at `/councils`.
///
/// ```text
/// GET    /        -> list_councils (public)
/// POST   /        -> create_council (managers)
/// GET    /{id}    -> get_council (public)
/// PUT    /{id}    -> update_council (managers)
/// DELETE /{id}    -> delete_council (managers)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(councils::list_councils).post(councils::create_council))
        .route(
            "/{id}",
            get(councils::get_council)
                .put(councils::update_council)
                .delete(councils::delete_council),
        )
}
