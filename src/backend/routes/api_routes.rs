/**
 * Protected API Routes
 *
 * This module defines the authenticated portion of the HTTP API: notes
 * CRUD and version history. Every route here sits behind the
 * bearer-token middleware; handlers receive the verified identity through
 * the `AuthUser` extractor.
 */
use axum::{middleware, routing, Router};

use crate::backend::middleware::auth::auth_middleware;
use crate::backend::notes::handlers as notes;
use crate::backend::server::state::AppState;
use crate::backend::versions::handlers as versions;

/// Build the authenticated API routes.
///
/// # Routes
///
/// - `POST /api/notes` - Create a note
/// - `GET /api/notes` - List notes (search, category, sort, order)
/// - `GET /api/notes/{id}` - Get a single note
/// - `PUT /api/notes/{id}` - Update a note
/// - `DELETE /api/notes/{id}` - Delete a note
/// - `GET /api/notes/{id}/versions` - Version history, newest first
/// - `POST /api/notes/{id}/restore/{version_id}` - Restore a version
pub fn configure_api_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/notes",
            routing::post(notes::create_note).get(notes::list_notes),
        )
        .route(
            "/api/notes/{id}",
            routing::get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
        .route(
            "/api/notes/{id}/versions",
            routing::get(versions::get_note_versions),
        )
        .route(
            "/api/notes/{id}/restore/{version_id}",
            routing::post(versions::restore_note_version),
        )
        .route_layer(middleware::from_fn_with_state(app_state, auth_middleware))
}
