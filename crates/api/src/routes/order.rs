use axum::routing::get;
use axum::Router;

use crate::handlers::order;
use crate::state::AppState;

/// ```text
/// GET    /orders              -> list
/// POST   /orders              -> create
/// GET    /orders/{id}         -> get_by_id
/// PUT    /orders/{id}         -> update
/// DELETE /orders/{id}         -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(order::list).post(order::create))
        .route(
            "/orders/{id}",
            get(order::get_by_id)
                .put(order::update)
                .delete(order::delete),
        )
}
