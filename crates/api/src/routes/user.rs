use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// ```text
/// GET    /users               -> list
/// POST   /users               -> create
/// GET    /users/{id}          -> get_by_id
/// PUT    /users/{id}          -> update
/// DELETE /users/{id}          -> delete
/// GET    /users/{id}/orders   -> list_orders
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(user::list).post(user::create))
        .route(
            "/users/{id}",
            get(user::get_by_id).put(user::update).delete(user::delete),
        )
        .route("/users/{id}/orders", get(user::list_orders))
}
