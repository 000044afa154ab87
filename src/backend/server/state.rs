/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Thread Safety
 *
 * All state is designed to be thread-safe:
 * - `ConnectionRegistry` serializes its own mutation behind one mutex
 * - `PgPool` is internally synchronized
 * - `Option<T>` for the optional database that may not be configured
 */
use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::collab::registry::ConnectionRegistry;

/// Application state that holds the live-collaboration registry and the
/// optional database pool.
///
/// This struct serves as the central state container for the Axum
/// application. It implements `FromRef` for its parts so handlers can
/// extract only what they need.
///
/// # Fields
///
/// * `registry` - Live collaboration channels (note id -> participants).
///   Constructed once at process start; purely in-memory.
/// * `db_pool` - Optional PostgreSQL connection pool. `None` when
///   `DATABASE_URL` is not set; handlers degrade gracefully without it.
#[derive(Clone)]
pub struct AppState {
    /// Registry of live collaboration channels
    pub registry: ConnectionRegistry,

    /// Database connection pool
    ///
    /// This is `None` if the database is not configured. Handlers should
    /// check for `None` before using the database.
    pub db_pool: Option<PgPool>,
}

/// Allows handlers to extract the connection registry directly with
/// `State(registry): State<ConnectionRegistry>`.
impl FromRef<AppState> for ConnectionRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.registry.clone()
    }
}

/// Allows handlers to extract the optional database pool directly with
/// `State(db_pool): State<Option<PgPool>>`.
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}
