/**
 * Version History Handlers
 *
 * - `GET /api/notes/{id}/versions` - List a note's versions, newest first
 * - `POST /api/notes/{id}/restore/{version_id}` - Restore an old version
 *
 * Restore never mutates history: it writes the restored snapshot back as
 * the note's current state and then appends a fresh version record, so
 * the restored-from record (and everything after it) stays retrievable
 * unchanged.
 */
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::notes::db::{get_note, update_note, Note, NoteInput};
use crate::backend::versions::db::{append_version, get_version, list_versions, NoteVersion};

/// List a note's version history (GET /api/notes/{id}/versions)
pub async fn get_note_versions(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(note_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = db_pool.as_ref().ok_or(ApiError::PersistenceUnavailable)?;

    // Ownership check: versions are only visible through a note you own.
    get_note(pool, note_id, user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Note"))?;

    let versions = list_versions(pool, note_id).await?;
    Ok(Json(versions))
}

/// Restore a note to an earlier version
/// (POST /api/notes/{id}/restore/{version_id})
pub async fn restore_note_version(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path((note_id, version_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = db_pool.as_ref().ok_or(ApiError::PersistenceUnavailable)?;

    let note = get_note(pool, note_id, user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Note"))?;

    let version = get_version(pool, version_id, note_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Version"))?;

    let input = restore_input(&note, version);
    if !update_note(pool, note_id, user.user_id, &input).await? {
        return Err(ApiError::not_found("Note"));
    }

    // Record the restore itself as a new version; the restored-from record
    // is never touched.
    let appended = append_version(pool, note_id, user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Note"))?;

    tracing::info!(
        "[Versions] user {} restored note {} to version {} (new version {})",
        user.user_id,
        note_id,
        version_id,
        appended.id
    );

    Ok(Json(serde_json::json!({
        "message": "Version restored successfully",
        "versionId": appended.id,
    })))
}

/// Assemble the note update written during a restore.
///
/// Snapshot fields come from the version record. Category and color are
/// not part of a snapshot and carry over from the current note row.
fn restore_input(note: &Note, version: NoteVersion) -> NoteInput {
    NoteInput {
        title: version.title,
        content: version.content,
        content_format: version.content_format,
        category_id: note.category_id,
        color: note.color.clone(),
    }
}
