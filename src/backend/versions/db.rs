/**
 * Database Operations for Version History
 *
 * The version store is append-only by construction: this module contains
 * the only statements that touch `note_versions`, and none of them is an
 * UPDATE or DELETE.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// One durable, immutable snapshot of a note
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct NoteVersion {
    pub id: Uuid,
    pub note_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub content_format: String,
    pub created_at: DateTime<Utc>,
}

/// A version record joined with its author's username, for history display
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct NoteVersionEntry {
    pub id: Uuid,
    pub note_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub title: String,
    pub content: String,
    pub content_format: String,
    pub created_at: DateTime<Utc>,
}

/// Append a version snapshot for `note_id`, authored by `user_id`.
///
/// The snapshot fields are read from the persisted note row, not supplied
/// by the caller: whatever a client broadcast over the channel, the
/// durable record is always the complete stored state at append time.
///
/// Returns `None` when the note row does not exist (nothing to snapshot).
pub async fn append_version(
    pool: &PgPool,
    note_id: Uuid,
    user_id: Uuid,
) -> Result<Option<NoteVersion>, sqlx::Error> {
    sqlx::query_as::<_, NoteVersion>(
        r#"
        INSERT INTO note_versions (id, note_id, user_id, title, content, content_format, created_at)
        SELECT gen_random_uuid(), n.id, $2, n.title, n.content, n.content_format, NOW()
        FROM notes n
        WHERE n.id = $1
        RETURNING id, note_id, user_id, title, content, content_format, created_at
        "#,
    )
    .bind(note_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// List all versions of a note, newest first, with author usernames.
pub async fn list_versions(
    pool: &PgPool,
    note_id: Uuid,
) -> Result<Vec<NoteVersionEntry>, sqlx::Error> {
    sqlx::query_as::<_, NoteVersionEntry>(
        r#"
        SELECT v.id, v.note_id, v.user_id, u.username, v.title, v.content, v.content_format, v.created_at
        FROM note_versions v
        JOIN users u ON u.id = v.user_id
        WHERE v.note_id = $1
        ORDER BY v.created_at DESC
        "#,
    )
    .bind(note_id)
    .fetch_all(pool)
    .await
}

/// Get one version record, scoped by its note.
pub async fn get_version(
    pool: &PgPool,
    version_id: Uuid,
    note_id: Uuid,
) -> Result<Option<NoteVersion>, sqlx::Error> {
    sqlx::query_as::<_, NoteVersion>(
        r#"
        SELECT id, note_id, user_id, title, content, content_format, created_at
        FROM note_versions
        WHERE id = $1 AND note_id = $2
        "#,
    )
    .bind(version_id)
    .bind(note_id)
    .fetch_optional(pool)
    .await
}
