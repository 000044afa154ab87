/**
 * Session Admission Gate
 *
 * This module authorizes a connection attempt before it becomes a channel
 * participant. The credential and the target note id travel in the
 * upgrade request's query string (browser WebSocket clients cannot set an
 * Authorization header), e.g. `/ws?token=<jwt>&noteId=<uuid>`.
 *
 * Admission happens once, at connection establishment. A token that
 * expires mid-session is not revoked until the client reconnects; this is
 * a documented trade-off, not an oversight.
 */
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::auth::sessions::verify_token;

/// Query parameters carried by the collaboration upgrade request.
#[derive(Debug, Clone, Deserialize)]
pub struct CollabParams {
    /// Bearer credential (JWT)
    pub token: Option<String>,
    /// Target note id
    #[serde(rename = "noteId")]
    pub note_id: Option<Uuid>,
}

/// Reasons a connection attempt is rejected before upgrade.
///
/// None of these produce a structured error body; the transport is simply
/// not upgraded and no channel state is created.
#[derive(Debug, Error)]
pub enum AdmissionError {
    /// No credential token in the request
    #[error("missing credential token")]
    MissingToken,

    /// No target note id in the request
    #[error("missing note id")]
    MissingNoteId,

    /// Token failed signature or expiry verification
    #[error("invalid credential: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// Token verified but its subject is not a valid user id
    #[error("invalid identity in token")]
    InvalidIdentity,
}

/// Validate a connection attempt.
///
/// On success returns the resolved identity and the target note id; the
/// caller then joins the connection registry. On failure the connection
/// must never be upgraded.
pub fn admit(params: &CollabParams) -> Result<(Uuid, Uuid), AdmissionError> {
    let token = params.token.as_deref().ok_or(AdmissionError::MissingToken)?;
    let note_id = params.note_id.ok_or(AdmissionError::MissingNoteId)?;

    let claims = verify_token(token)?;
    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AdmissionError::InvalidIdentity)?;

    Ok((user_id, note_id))
}
