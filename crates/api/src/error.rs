use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use orderdesk_core::error::CoreError;
use orderdesk_core::validation::FieldErrors;
use orderdesk_db::classify::{is_connection_failure, is_integrity_violation};
use serde_json::{json, Value};

/// Message returned when the database cannot be reached. Must not mention
/// hosts, users, or the driver error.
pub const STORAGE_UNAVAILABLE_MESSAGE: &str =
    "Database connection failed. Please ensure the database exists and is accessible.";

/// Message returned for any other unexpected failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Fallback message for constraint violations that reach the translator
/// without passing through a unit of work.
pub const CONSTRAINT_VIOLATED_MESSAGE: &str = "Database constraint violated.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses,
/// so handlers never format error bodies themselves.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `orderdesk_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A request body that is not JSON at all.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route matches the request path.
    #[error("No route for {0}")]
    NoRoute(String),

    /// The path exists but does not accept this method.
    #[error("Method {method} not allowed on {path}")]
    MethodNotAllowed { method: String, path: String },

    /// The request outlived `REQUEST_TIMEOUT_SECS`.
    #[error("Request timed out")]
    Timeout,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// The JSON body of a 500 response, attached as a response extension.
///
/// [`crate::middleware::attach_request_path`] takes it back out and adds
/// the request path, which is not known here.
#[derive(Debug, Clone)]
pub struct ServerErrorBody(pub Value);

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Shorthand for a [`CoreError::NotFound`].
    pub fn not_found(entity: &'static str, id: orderdesk_core::types::DbId) -> Self {
        Self::Core(CoreError::NotFound { entity, id })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut details: Option<FieldErrors> = None;

        let (status, code, message) = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(errors) => {
                    details = Some(errors);
                    (
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        "Validation failed".to_string(),
                    )
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        INTERNAL_ERROR_MESSAGE.to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(&err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::NoRoute(path) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Resource not found at '{path}'"),
            ),
            AppError::MethodNotAllowed { method, path } => (
                StatusCode::METHOD_NOT_ALLOWED,
                "METHOD_NOT_ALLOWED",
                format!("Method '{method}' not allowed on endpoint '{path}'"),
            ),
            AppError::Timeout => {
                tracing::warn!("Request timed out");
                (
                    StatusCode::REQUEST_TIMEOUT,
                    "REQUEST_TIMEOUT",
                    "Request timed out".to_string(),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let body = match details {
            Some(details) => json!({
                "error": message,
                "code": code,
                "details": details,
            }),
            None => json!({
                "error": message,
                "code": code,
            }),
        };

        let server_error = status.is_server_error().then(|| ServerErrorBody(body.clone()));
        let mut response = (status, axum::Json(body)).into_response();
        if let Some(server_error) = server_error {
            response.extensions_mut().insert(server_error);
        }
        response
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Constraint violations map to 409. Handlers normally convert these in
///   [`crate::uow::UnitOfWork::settle`] with a resource-specific message first.
/// - An unreachable database maps to 500 with a fixed, non-revealing message.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if let sqlx::Error::RowNotFound = err {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        );
    }

    if is_integrity_violation(err) {
        return (
            StatusCode::CONFLICT,
            "CONFLICT",
            CONSTRAINT_VIOLATED_MESSAGE.to_string(),
        );
    }

    if is_connection_failure(err) {
        tracing::error!(error = %err, "Database unavailable");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "STORAGE_UNAVAILABLE",
            STORAGE_UNAVAILABLE_MESSAGE.to_string(),
        );
    }

    tracing::error!(error = %err, "Database error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_ERROR_MESSAGE.to_string(),
    )
}
