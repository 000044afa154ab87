/**
 * Backend Error Types
 *
 * This module defines error types for the HTTP API. Each variant maps to
 * an HTTP status code and can be returned directly from handlers.
 */
use axum::http::StatusCode;
use thiserror::Error;

/// API error type
///
/// # Usage
///
/// ```rust
/// use notehub::backend::error::ApiError;
///
/// let err = ApiError::not_found("Note");
/// let err = ApiError::validation("All fields are required");
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request is missing or carries an invalid credential
    #[error("unauthorized: {message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// Request body failed validation
    #[error("validation error: {message}")]
    Validation {
        /// Human-readable error message
        message: String,
    },

    /// Addressed resource does not exist or is not visible to the caller
    #[error("{resource} not found")]
    NotFound {
        /// Resource kind, e.g. "Note"
        resource: String,
    },

    /// Uniqueness conflict (e.g. username or email already taken)
    #[error("conflict: {message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// The server is running without a configured database
    #[error("persistence is not configured")]
    PersistenceUnavailable,

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Token creation or verification error
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Password hashing error
    #[error("hash error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

impl ApiError {
    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized { .. } | Self::Token(_) => StatusCode::UNAUTHORIZED,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::BAD_REQUEST,
            Self::PersistenceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) | Self::Hash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
