use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// `GET /health` payload.
///
/// `status` is `ok` only when the database answers and every migration
/// compiled into this build has been applied.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Absent when the database is unreachable.
    pub schema: Option<SchemaReport>,
}

#[derive(Debug, Serialize)]
pub struct SchemaReport {
    pub expected_version: Option<i64>,
    pub applied_version: Option<i64>,
    pub up_to_date: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let schema = match agora_db::schema_status(&state.pool).await {
        Ok(status) => Some(SchemaReport {
            expected_version: status.expected_version,
            applied_version: status.applied_version,
            up_to_date: status.is_current(),
        }),
        Err(err) => {
            tracing::warn!(error = %err, "Schema status unavailable");
            None
        }
    };
    let db_healthy = schema.is_some() || agora_db::health_check(&state.pool).await.is_ok();
    let up_to_date = schema.as_ref().is_some_and(|s| s.up_to_date);

    Json(HealthResponse {
        status: if db_healthy && up_to_date { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        schema,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
