//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use orderdesk_core::schema::user::{self as user_schema, UserPatch};
use orderdesk_core::types::DbId;
use orderdesk_db::models::order::OrderResponse;
use orderdesk_db::models::user::{User, UserResponse};
use orderdesk_db::repositories::{OrderRepo, UserRepo};
use sqlx::PgConnection;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonPayload, PathId};
use crate::response::MessageResponse;
use crate::state::AppState;
use crate::uow::UnitOfWork;

const ENTITY: &str = "User";

/// Returned when a write collides with `uq_users_email`.
const EMAIL_TAKEN: &str = "A user with this email already exists";

/// Returned when a user still referenced by orders is deleted.
const HAS_ORDERS: &str = "User still has orders";

/// POST /users
pub async fn create(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let input = user_schema::load_create(&payload)?;

    let mut uow = UnitOfWork::begin(&state.pool, EMAIL_TAKEN).await?;
    let created = UserRepo::create(&mut uow, &input).await;
    let user = uow.settle(created).await?;

    tracing::info!(user_id = user.id, "User created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;
    Ok(Json(user.into()))
}

/// PUT /users/{id}
///
/// Partial update: only the fields present in the body change.
pub async fn update(
    State(state): State<AppState>,
    PathId(id): PathId,
    JsonPayload(payload): JsonPayload,
) -> AppResult<Json<UserResponse>> {
    let patch = user_schema::load_update(&payload)?;

    let mut uow = UnitOfWork::begin(&state.pool, EMAIL_TAKEN).await?;
    let outcome = apply_update(&mut uow, id, patch).await;
    let user = uow.settle(outcome).await?;

    Ok(Json(user.into()))
}

/// DELETE /users/{id}
pub async fn delete(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<MessageResponse>> {
    let mut uow = UnitOfWork::begin(&state.pool, HAS_ORDERS).await?;
    let outcome = UserRepo::delete(&mut uow, id).await;
    let deleted = uow.settle(outcome).await?;

    if !deleted {
        return Err(AppError::not_found(ENTITY, id));
    }

    tracing::info!(user_id = id, "User deleted");
    Ok(Json(MessageResponse::new("User deleted")))
}

/// GET /users/{id}/orders
pub async fn list_orders(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<Vec<OrderResponse>>> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;

    let orders = OrderRepo::list_by_customer(&state.pool, id).await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

/// Lock the row, merge the patch, and write it back.
async fn apply_update(conn: &mut PgConnection, id: DbId, patch: UserPatch) -> AppResult<User> {
    let existing = UserRepo::find_by_id_for_update(conn, id)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;

    if patch.is_empty() {
        return Ok(existing);
    }

    UserRepo::update(conn, &existing.apply(patch))
        .await?
        .ok_or(AppError::not_found(ENTITY, id))
}
