/**
 * Error Conversion
 *
 * This module implements `IntoResponse` for the API error type, so
 * handlers can return it directly with `?`.
 *
 * # Response Format
 *
 * Error responses are JSON:
 * ```json
 * {
 *   "error": "Note not found",
 *   "status": 404
 * }
 * ```
 */
use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::backend::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal details (SQL, hashing) are logged, not leaked.
        let message = match &self {
            ApiError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Internal server error".to_string()
            }
            ApiError::Hash(e) => {
                tracing::error!("Hashing error: {:?}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap_or_else(|_| {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            })
    }
}
