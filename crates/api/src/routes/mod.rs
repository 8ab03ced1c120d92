pub mod categories;
pub mod councils;
pub mod federal_states;
pub mod health;
pub mod problems;
pub mod projects;
pub mod proposals;
pub mod used_problems;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories                   list, create
/// /categories/{id}              get, update, delete
///
/// /federal_states               list, create
/// /federal_states/{id}          get, update, delete (detaches councils)
///
/// /councils                     list, create
/// /councils/{id}                get, update, delete
///
/// /projects                     list, create
/// /projects/{id}                get, update, delete (cascades)
///
/// /problems                     create
/// /problems/{id}                get, update, delete
///
/// /proposals                    create
/// /proposals/{id}               get, update, delete
///
/// /used_problems                create
/// /used_problems/{id}           get, delete
///
/// /users/{id}                   get
/// ```
///
/// Paths double as IRIs: a resource's `@id` is the path it is served at.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", categories::router())
        .nest("/federal_states", federal_states::router())
        .nest("/councils", councils::router())
        .nest("/projects", projects::router())
        .nest("/problems", problems::router())
        .nest("/proposals", proposals::router())
        .nest("/used_problems", used_problems::router())
        .nest("/users", users::router())
}
