//! Response middleware shared by every route.

use axum::body::Body;
use axum::extract::Request;
use axum::http::header::CONTENT_LENGTH;
use axum::middleware::Next;
use axum::response::Response;
use serde_json::Value;

use crate::error::ServerErrorBody;

/// Add `"path"` to the JSON body of 500 responses built from
/// [`crate::error::AppError`].
pub async fn attach_request_path(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let mut response = next.run(request).await;

    let Some(ServerErrorBody(mut body)) = response.extensions_mut().remove::<ServerErrorBody>()
    else {
        return response;
    };

    if let Some(object) = body.as_object_mut() {
        object.insert("path".to_string(), Value::String(path));
        response.headers_mut().remove(CONTENT_LENGTH);
        *response.body_mut() = Body::from(body.to_string());
    }
    response
}
