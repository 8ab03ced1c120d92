use agora_core::error::CoreError;
use agora_core::policy::constraint_rule;
use agora_core::validation::ViolationList;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::response::{AuthErrorBody, HydraError, JsonLd, ViolationListBody};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce Hydra error bodies (and the plain
/// `{code, message}` body for authentication failures).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `agora_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A path parameter that names no resource (e.g. a non-numeric id).
    #[error("Unresolvable path parameter: {0}")]
    InvalidPath(String),

    /// The path exists but not for this method.
    #[error("Method {method} not allowed for {path}")]
    MethodNotAllowed { method: Method, path: String },

    /// No route matches the path.
    #[error("No route found for {path}")]
    RouteNotFound { method: Method, path: String },

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(inner) => {
                AppError::InvalidPath(inner.body_text())
            }
            other => AppError::InternalError(other.body_text()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Unauthorized(message) => auth_error(message),
                CoreError::Forbidden(message) => hydra(StatusCode::FORBIDDEN, message),
                CoreError::NotFound { entity, id } => {
                    tracing::debug!(entity, id, "Entity not found");
                    hydra(StatusCode::NOT_FOUND, "Not Found")
                }
                CoreError::Validation(violations) => violation_response(&violations),
                CoreError::InvalidIri(iri) => {
                    hydra(StatusCode::BAD_REQUEST, format!("Invalid IRI \"{iri}\"."))
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(&err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => hydra(StatusCode::BAD_REQUEST, msg),
            AppError::InvalidPath(reason) => {
                tracing::debug!(%reason, "Unresolvable path parameter");
                hydra(StatusCode::NOT_FOUND, "Not Found")
            }
            AppError::MethodNotAllowed { method, path } => hydra(
                StatusCode::METHOD_NOT_ALLOWED,
                format!("No route found for \"{method} {path}\": Method Not Allowed"),
            ),
            AppError::RouteNotFound { method, path } => hydra(
                StatusCode::NOT_FOUND,
                format!("No route found for \"{method} {path}\""),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        }
    }
}

fn hydra(status: StatusCode, description: impl Into<String>) -> Response {
    (status, JsonLd(HydraError::new(description))).into_response()
}

fn internal() -> Response {
    hydra(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

fn auth_error(message: String) -> Response {
    let status = StatusCode::UNAUTHORIZED;
    let body = AuthErrorBody {
        code: status.as_u16(),
        message,
    };
    (status, axum::Json(body)).into_response()
}

fn violation_response(violations: &ViolationList) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        JsonLd(ViolationListBody::from(violations)),
    )
        .into_response()
}

/// Classify a sqlx error into an HTTP response.
///
/// - `RowNotFound` maps to 404.
/// - Unique (`23505`) and foreign-key (`23503`) violations on a constraint
///   known to the resource table map to 422 with the resource's rule id.
///   This is the path taken when a concurrent request wins the race past
///   the duplicate pre-check.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> Response {
    match err {
        sqlx::Error::RowNotFound => hydra(StatusCode::NOT_FOUND, "Not Found"),
        sqlx::Error::Database(db_err) => {
            let code = db_err.code();
            if matches!(code.as_deref(), Some("23505") | Some("23503")) {
                if let Some(rule) = db_err.constraint().and_then(constraint_rule) {
                    return violation_response(&ViolationList::single(
                        rule.property_path,
                        rule.rule,
                    ));
                }
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
