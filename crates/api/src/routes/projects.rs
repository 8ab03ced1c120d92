use axum::routing::get;
use axum::Router;

use crate::handlers::projects;
use crate::state::AppState;

/// Project routes mounted at `/projects`.
///
/// ```text
/// GET    /        -> list_projects (public)
/// POST   /        -> create_project (any role)
/// GET    /{id}    -> get_project (public)
/// PUT    /{id}    -> update_project (managers)
/// DELETE /{id}    -> delete_project (managers)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list_projects).post(projects::create_project))
        .route(
            "/{id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
}
