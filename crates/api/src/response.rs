//! Shared response body types for API handlers.

use serde::Serialize;

/// `{ "message": "..." }` body returned by delete handlers.
///
/// Deletes answer 200 with this body rather than 204 so the client gets a
/// confirmation.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}
