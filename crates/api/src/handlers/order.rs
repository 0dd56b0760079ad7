//! Handlers for the `/orders` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use orderdesk_core::schema::order::{self as order_schema, OrderPatch};
use orderdesk_core::types::DbId;
use orderdesk_db::models::order::{Order, OrderResponse};
use orderdesk_db::repositories::OrderRepo;
use sqlx::PgConnection;

use crate::error::{AppError, AppResult, CONSTRAINT_VIOLATED_MESSAGE};
use crate::extract::{JsonPayload, PathId};
use crate::response::MessageResponse;
use crate::state::AppState;
use crate::uow::UnitOfWork;

const ENTITY: &str = "Order";

/// Returned when `customer_id` does not reference a user.
const UNKNOWN_CUSTOMER: &str = "Order references a customer that does not exist";

/// POST /orders
pub async fn create(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload,
) -> AppResult<(StatusCode, Json<OrderResponse>)> {
    let input = order_schema::load_create(&payload)?;

    let mut uow = UnitOfWork::begin(&state.pool, UNKNOWN_CUSTOMER).await?;
    let created = OrderRepo::create(&mut uow, &input).await;
    let order = uow.settle(created).await?;

    tracing::info!(
        order_id = order.id,
        customer_id = order.customer_id,
        "Order created",
    );
    Ok((StatusCode::CREATED, Json(order.into())))
}

/// GET /orders
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<OrderResponse>>> {
    let orders = OrderRepo::list(&state.pool).await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

/// GET /orders/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<OrderResponse>> {
    let order = OrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;
    Ok(Json(order.into()))
}

/// PUT /orders/{id}
pub async fn update(
    State(state): State<AppState>,
    PathId(id): PathId,
    JsonPayload(payload): JsonPayload,
) -> AppResult<Json<OrderResponse>> {
    let patch = order_schema::load_update(&payload)?;

    let mut uow = UnitOfWork::begin(&state.pool, UNKNOWN_CUSTOMER).await?;
    let outcome = apply_update(&mut uow, id, patch).await;
    let order = uow.settle(outcome).await?;

    Ok(Json(order.into()))
}

/// DELETE /orders/{id}
pub async fn delete(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<MessageResponse>> {
    let mut uow = UnitOfWork::begin(&state.pool, CONSTRAINT_VIOLATED_MESSAGE).await?;
    let outcome = OrderRepo::delete(&mut uow, id).await;
    let deleted = uow.settle(outcome).await?;

    if !deleted {
        return Err(AppError::not_found(ENTITY, id));
    }

    tracing::info!(order_id = id, "Order deleted");
    Ok(Json(MessageResponse::new("Order deleted")))
}

async fn apply_update(conn: &mut PgConnection, id: DbId, patch: OrderPatch) -> AppResult<Order> {
    let existing = OrderRepo::find_by_id_for_update(conn, id)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;

    if patch.is_empty() {
        return Ok(existing);
    }

    OrderRepo::update(conn, &existing.apply(patch))
        .await?
        .ok_or(AppError::not_found(ENTITY, id))
}
