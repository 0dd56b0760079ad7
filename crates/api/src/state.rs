use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// The pool is the only storage handle; every handler receives it explicitly
/// through this state rather than reaching for a global.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: orderdesk_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
