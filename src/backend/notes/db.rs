/**
 * Database Operations for Notes
 *
 * This module provides the persistence layer for note rows. Every lookup
 * is scoped by the owning user; the collaboration channel's snapshot path
 * reads the note row inside the version-append statement instead.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A note row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Option<Uuid>,
    pub title: String,
    pub content: String,
    pub content_format: String,
    pub color: Option<String>,
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating or updating a note
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteInput {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_content_format")]
    pub content_format: String,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub color: Option<String>,
}

fn default_content_format() -> String {
    "plain".to_string()
}

/// Filters and ordering for listing notes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteFilter {
    pub search: Option<String>,
    pub category: Option<Uuid>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

/// Create a note owned by `user_id`.
pub async fn create_note(
    pool: &PgPool,
    user_id: Uuid,
    input: &NoteInput,
) -> Result<Note, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, Note>(
        r#"
        INSERT INTO notes (id, user_id, category_id, title, content, content_format, color, is_pinned, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, $8, $8)
        RETURNING id, user_id, category_id, title, content, content_format, color, is_pinned, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(input.category_id)
    .bind(&input.title)
    .bind(&input.content)
    .bind(&input.content_format)
    .bind(&input.color)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Get a note by id, scoped by owning user.
pub async fn get_note(
    pool: &PgPool,
    note_id: Uuid,
    user_id: Uuid,
) -> Result<Option<Note>, sqlx::Error> {
    sqlx::query_as::<_, Note>(
        r#"
        SELECT id, user_id, category_id, title, content, content_format, color, is_pinned, created_at, updated_at
        FROM notes
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(note_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// List a user's notes with optional search, category filter and ordering.
///
/// `sort` is whitelisted to `title`, `created_at`, `updated_at`; anything
/// else falls back to `created_at`. Without an explicit sort, pinned notes
/// come first, newest first.
pub async fn list_notes(
    pool: &PgPool,
    user_id: Uuid,
    filter: &NoteFilter,
) -> Result<Vec<Note>, sqlx::Error> {
    let mut query = String::from(
        "SELECT id, user_id, category_id, title, content, content_format, color, is_pinned, created_at, updated_at \
         FROM notes WHERE user_id = $1",
    );
    let mut bind_index = 1;

    if filter.search.is_some() {
        bind_index += 1;
        query.push_str(&format!(
            " AND (title ILIKE ${i} OR content ILIKE ${i})",
            i = bind_index
        ));
    }
    if filter.category.is_some() {
        bind_index += 1;
        query.push_str(&format!(" AND category_id = ${}", bind_index));
    }

    match filter.sort.as_deref() {
        Some(sort) => {
            let field = match sort {
                "title" | "created_at" | "updated_at" => sort,
                _ => "created_at",
            };
            let order = match filter.order.as_deref() {
                Some("asc") => "ASC",
                _ => "DESC",
            };
            query.push_str(&format!(" ORDER BY {} {}", field, order));
        }
        None => query.push_str(" ORDER BY is_pinned DESC, created_at DESC"),
    }

    let mut q = sqlx::query_as::<_, Note>(&query).bind(user_id);
    if let Some(search) = &filter.search {
        q = q.bind(format!("%{}%", search));
    }
    if let Some(category) = filter.category {
        q = q.bind(category);
    }

    q.fetch_all(pool).await
}

/// Update a note's fields, scoped by owning user.
///
/// Returns `false` when no row matched (absent or foreign note).
pub async fn update_note(
    pool: &PgPool,
    note_id: Uuid,
    user_id: Uuid,
    input: &NoteInput,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE notes
        SET title = $1, content = $2, content_format = $3, category_id = $4, color = $5, updated_at = $6
        WHERE id = $7 AND user_id = $8
        "#,
    )
    .bind(&input.title)
    .bind(&input.content)
    .bind(&input.content_format)
    .bind(input.category_id)
    .bind(&input.color)
    .bind(Utc::now())
    .bind(note_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a note, scoped by owning user. Version records cascade.
pub async fn delete_note(
    pool: &PgPool,
    note_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
        .bind(note_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
