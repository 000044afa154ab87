/**
 * Collaboration Wire Envelope
 *
 * This module defines the message envelope exchanged over a note's
 * collaboration channel. Clients send a bare envelope (kind + payload);
 * the server stamps the authoritative identity and a server-side timestamp
 * before relaying to the other participants on the channel.
 */
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event kind that triggers a version-history append on the server.
///
/// Other kinds (cursor positions, presence pings, whatever clients invent)
/// are relayed but not persisted.
pub const EDIT_KIND: &str = "edit";

/// Envelope as sent by a client.
///
/// `content` is free-form: a partial view of the note being edited (title,
/// content, content format, category, color - all optional). The server
/// relays it verbatim and never derives the durable snapshot from it.
///
/// Any `userId` a client smuggles into the payload is ignored; relay
/// attribution always comes from the admitted identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientEnvelope {
    /// Event kind tag (`"edit"` at minimum)
    #[serde(rename = "type")]
    pub kind: String,
    /// Free-form structured payload
    #[serde(default)]
    pub content: serde_json::Value,
}

impl ClientEnvelope {
    /// Whether this event should be recorded into version history.
    pub fn is_edit(&self) -> bool {
        self.kind == EDIT_KIND
    }
}

/// Envelope as relayed by the server to the other participants.
///
/// Identical to [`ClientEnvelope`] plus the server-stamped fields:
/// `userId` (the identity admitted at connect time) and `timestamp`
/// (RFC 3339, server clock).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelayEnvelope {
    /// Event kind tag, copied from the inbound envelope
    #[serde(rename = "type")]
    pub kind: String,
    /// Payload, relayed verbatim
    pub content: serde_json::Value,
    /// Originating identity, authoritative from admission
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    /// Server-side timestamp, RFC 3339
    pub timestamp: String,
}

impl RelayEnvelope {
    /// Stamp an inbound envelope with the source identity and the current
    /// server time.
    pub fn stamp(event: ClientEnvelope, user_id: Uuid) -> Self {
        Self {
            kind: event.kind,
            content: event.content,
            user_id,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
