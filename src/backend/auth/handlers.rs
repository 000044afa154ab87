/**
 * Authentication Handlers
 *
 * Register and login endpoints:
 * - `POST /api/register` - Create a user account
 * - `POST /api/login` - Exchange credentials for a JWT
 */
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::{create_user, get_user_by_email};
use crate::backend::error::ApiError;

/// Registration request body
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response body
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

/// Handle user registration (POST /api/register)
pub async fn register(
    State(db_pool): State<Option<PgPool>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = db_pool.as_ref().ok_or(ApiError::PersistenceUnavailable)?;

    if req.username.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::validation("All fields are required"));
    }

    tracing::info!("[Auth] Registration attempt for {}", req.email);

    let password_hash = bcrypt::hash(&req.password, bcrypt::DEFAULT_COST)?;

    match create_user(pool, &req.username, &req.email, &password_hash).await {
        Ok(user) => {
            tracing::info!("[Auth] User {} registered", user.username);
            Ok((
                StatusCode::CREATED,
                Json(serde_json::json!({ "message": "User created successfully" })),
            ))
        }
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(ApiError::conflict("Username or email already exists"))
        }
        Err(e) => Err(e.into()),
    }
}

/// Handle user login (POST /api/login)
pub async fn login(
    State(db_pool): State<Option<PgPool>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let pool = db_pool.as_ref().ok_or(ApiError::PersistenceUnavailable)?;

    let user = get_user_by_email(pool, &req.email)
        .await?
        .ok_or_else(|| ApiError::validation("User not found"))?;

    if !bcrypt::verify(&req.password, &user.password_hash)? {
        return Err(ApiError::validation("Invalid password"));
    }

    let token = create_token(user.id, user.email)?;

    Ok(Json(LoginResponse {
        token,
        username: user.username,
    }))
}
