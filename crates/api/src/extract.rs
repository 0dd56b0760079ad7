//! Request extractors that report failures through [`AppError`].
//!
//! Axum's stock `Json` and `Path` rejections answer with plain-text bodies;
//! these wrappers keep every error response in the `{"error": ...}` shape.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use orderdesk_core::types::DbId;
use serde_json::Value;

use crate::error::AppError;

/// A request body parsed as arbitrary JSON.
///
/// Structure is checked afterwards by the resource schema, which can then
/// report every offending field at once instead of failing on the first.
#[derive(Debug)]
pub struct JsonPayload(pub Value);

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// The `{id}` path segment as a [`DbId`].
///
/// A segment that is not an integer does not name any resource, so it is
/// reported as an unknown route (404) rather than a bad request.
#[derive(Debug, Clone, Copy)]
pub struct PathId(pub DbId);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<DbId>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(_) => Err(AppError::NoRoute(parts.uri.path().to_string())),
        }
    }
}
