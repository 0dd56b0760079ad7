pub mod health;
pub mod order;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                 list, create
/// /users/{id}            get, update, delete
/// /users/{id}/orders     orders placed by one user
///
/// /orders                list, create
/// /orders/{id}           get, update, delete
/// ```
///
/// Paths are registered in full rather than nested so the router-level
/// fallbacks see every unmatched path and method.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(user::router()).merge(order::router())
}
