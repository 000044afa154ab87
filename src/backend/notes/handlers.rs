/**
 * Notes HTTP Handlers
 *
 * CRUD endpoints for notes, all behind the bearer-token middleware:
 * - `POST /api/notes` - Create a note
 * - `GET /api/notes` - List notes (search, category, sort, order)
 * - `GET /api/notes/{id}` - Get a single note
 * - `PUT /api/notes/{id}` - Update a note
 * - `DELETE /api/notes/{id}` - Delete a note
 */
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::notes::db::{self, NoteFilter, NoteInput};

/// Create a note (POST /api/notes)
pub async fn create_note(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Json(input): Json<NoteInput>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = db_pool.as_ref().ok_or(ApiError::PersistenceUnavailable)?;

    let note = db::create_note(pool, user.user_id, &input).await?;
    tracing::info!("[Notes] user {} created note {}", user.user_id, note.id);

    Ok((StatusCode::CREATED, Json(note)))
}

/// List notes (GET /api/notes)
pub async fn list_notes(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Query(filter): Query<NoteFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = db_pool.as_ref().ok_or(ApiError::PersistenceUnavailable)?;

    let notes = db::list_notes(pool, user.user_id, &filter).await?;
    Ok(Json(notes))
}

/// Get a single note (GET /api/notes/{id})
pub async fn get_note(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(note_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = db_pool.as_ref().ok_or(ApiError::PersistenceUnavailable)?;

    let note = db::get_note(pool, note_id, user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Note"))?;
    Ok(Json(note))
}

/// Update a note (PUT /api/notes/{id})
pub async fn update_note(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(note_id): Path<Uuid>,
    Json(input): Json<NoteInput>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = db_pool.as_ref().ok_or(ApiError::PersistenceUnavailable)?;

    if !db::update_note(pool, note_id, user.user_id, &input).await? {
        return Err(ApiError::not_found("Note"));
    }
    tracing::info!("[Notes] user {} updated note {}", user.user_id, note_id);

    Ok(Json(serde_json::json!({ "message": "Note updated successfully" })))
}

/// Delete a note (DELETE /api/notes/{id})
pub async fn delete_note(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(note_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = db_pool.as_ref().ok_or(ApiError::PersistenceUnavailable)?;

    if !db::delete_note(pool, note_id, user.user_id).await? {
        return Err(ApiError::not_found("Note"));
    }
    tracing::info!("[Notes] user {} deleted note {}", user.user_id, note_id);

    Ok(Json(serde_json::json!({ "message": "Note deleted successfully" })))
}
