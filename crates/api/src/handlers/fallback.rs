//! Router-level fallbacks for unmatched paths and methods.

use axum::http::{Method, Uri};

use crate::error::AppError;

/// Any path no route matches.
pub async fn route_not_found(uri: Uri) -> AppError {
    AppError::NoRoute(uri.path().to_string())
}

/// A known path requested with a method it does not accept.
pub async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}
