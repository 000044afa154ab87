/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP
 * server, including state creation, database loading, and route
 * configuration.
 *
 * # Initialization Process
 *
 * 1. Create the connection registry for live collaboration channels
 * 2. Load the optional database pool
 * 3. Create and configure the router
 *
 * The registry is deliberately constructed here, once, and injected into
 * the application state rather than living in a global: it is
 * lifecycle-scoped to the server and trivially replaceable in tests.
 */
use axum::Router;

use crate::backend::collab::registry::ConnectionRegistry;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// This function sets up the Axum HTTP server with:
/// - Connection registry initialization
/// - Database connection pool (if configured)
/// - Route configuration
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// # Error Handling
///
/// The function is designed to be resilient: a missing database does not
/// prevent startup, and migration failures are logged but non-fatal.
pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing NoteHub backend server");

    // The registry of live collaboration channels. Purely in-memory and
    // process-scoped: channels are created on first join and removed on
    // last leave, so an empty server holds no channel state.
    let registry = ConnectionRegistry::new();

    let db_pool = load_database().await;

    let app_state = AppState { registry, db_pool };

    tracing::info!("Connection registry and state initialized");

    create_router(app_state)
}
