/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Public auth endpoints (register, login)
 * 2. Collaboration WebSocket (admission happens in the handler, before
 *    the protocol upgrade)
 * 3. Protected API routes (bearer-token middleware)
 * 4. Static files and fallback
 */
use axum::{routing, Router};
use tower_http::services::ServeDir;

use crate::backend::auth::handlers::{login, register};
use crate::backend::collab::ws::collab_ws;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state containing the connection registry
///   and the optional database pool
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new()
        // Public endpoints
        .route("/api/register", routing::post(register))
        .route("/api/login", routing::post(login))
        // Collaboration channel upgrade
        .route("/ws", routing::get(collab_ws))
        // Authenticated API
        .merge(configure_api_routes(app_state.clone()));

    // Static assets and 404 fallback
    let router = router
        .nest_service("/static", ServeDir::new("public"))
        .fallback(|| async { "404 Not Found" });

    router.with_state(app_state)
}
