/**
 * Collaboration Channel
 *
 * This module processes one inbound edit event end-to-end: parse, stamp,
 * relay, persist. It is the only piece of the collaboration layer with
 * ordering and consistency concerns; everything it touches beyond the
 * registry is an already-consistent external collaborator (the notes
 * table and the version store).
 *
 * # Failure Policy
 *
 * Nothing in this hot path propagates an error back to the originating
 * client. Malformed input is dropped, dead recipients are skipped, and a
 * failed version write is logged. This favors availability of the live
 * editing experience over strict delivery and durability guarantees.
 */
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::collab::registry::{ConnectionRegistry, Participant};
use crate::backend::versions;
use crate::shared::envelope::{ClientEnvelope, RelayEnvelope};

/// Process one raw inbound message from `source` on `note_id`'s channel.
///
/// 1. Parse the envelope. Malformed input is logged and dropped; nothing
///    reaches the other participants and the connection stays open.
/// 2. Stamp the event with the admitted identity and the server clock.
///    Any identity claimed inside the payload is ignored.
/// 3. Relay the stamped event to every other participant. Delivery to a
///    closed connection is skipped; one dead peer never blocks the rest.
/// 4. For `edit` events, append a version record snapshotted from the
///    persisted note row. The snapshot is deliberately *not* derived from
///    the broadcast payload: what was relayed may be partial, the durable
///    record is always a complete row. Relay has already happened by this
///    point and is not rolled back if the write fails.
///
/// Returns the number of participants the event was delivered to.
pub async fn handle_incoming(
    registry: &ConnectionRegistry,
    db_pool: Option<&PgPool>,
    note_id: Uuid,
    source: &Participant,
    raw: &str,
) -> usize {
    let event: ClientEnvelope = match serde_json::from_str(raw) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("[Collab] Dropping malformed message on note {}: {}", note_id, e);
            return 0;
        }
    };

    let is_edit = event.is_edit();
    let stamped = RelayEnvelope::stamp(event, source.user_id);
    let frame = match serde_json::to_string(&stamped) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::error!("[Collab] Failed to serialize relay envelope: {}", e);
            return 0;
        }
    };

    let mut delivered = 0;
    for peer in registry.list_others(note_id, source.handle) {
        if peer.deliver(&frame) {
            delivered += 1;
        } else {
            // Peer's pump task is gone; its registry entry will be removed
            // by its own disconnect path.
            tracing::debug!(
                "[Collab] Skipped dead connection {} on note {}",
                peer.handle,
                note_id
            );
        }
    }

    if is_edit {
        persist_version(db_pool, note_id, source.user_id).await;
    }

    delivered
}

/// Fire-and-forget version append for an accepted `edit` event.
///
/// Persistence failure is logged and swallowed: the relay has already
/// completed and the sender is not notified.
async fn persist_version(db_pool: Option<&PgPool>, note_id: Uuid, user_id: Uuid) {
    let Some(pool) = db_pool else {
        tracing::debug!("[Collab] Persistence disabled, skipping version append");
        return;
    };

    match versions::db::append_version(pool, note_id, user_id).await {
        Ok(Some(version)) => {
            tracing::debug!(
                "[Collab] Appended version {} for note {} by user {}",
                version.id,
                note_id,
                user_id
            );
        }
        Ok(None) => {
            tracing::warn!(
                "[Collab] No note row for {}, version append skipped",
                note_id
            );
        }
        Err(e) => {
            tracing::error!("[Collab] Failed to append version for note {}: {}", note_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn join_participant(
        registry: &ConnectionRegistry,
        note_id: Uuid,
    ) -> (Participant, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let participant = Participant::new(Uuid::new_v4(), tx);
        registry.join(note_id, participant.clone());
        (participant, rx)
    }

    #[tokio::test]
    async fn test_edit_is_relayed_to_others_with_stamp() {
        let registry = ConnectionRegistry::new();
        let note_id = Uuid::new_v4();
        let (a, mut a_rx) = join_participant(&registry, note_id);
        let (_b, mut b_rx) = join_participant(&registry, note_id);

        let raw = r#"{"type":"edit","content":{"title":"X","content":"hello"}}"#;
        let delivered = handle_incoming(&registry, None, note_id, &a, raw).await;

        assert_eq!(delivered, 1);
        let frame = b_rx.try_recv().unwrap();
        let relayed: RelayEnvelope = serde_json::from_str(&frame).unwrap();
        assert_eq!(relayed.kind, "edit");
        assert_eq!(relayed.content["title"], "X");
        assert_eq!(relayed.content["content"], "hello");
        assert_eq!(relayed.user_id, a.user_id);
        assert!(chrono::DateTime::parse_from_rfc3339(&relayed.timestamp).is_ok());
        // The sender never hears its own event back.
        assert!(a_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_client_supplied_identity_is_ignored() {
        let registry = ConnectionRegistry::new();
        let note_id = Uuid::new_v4();
        let (a, _a_rx) = join_participant(&registry, note_id);
        let (_b, mut b_rx) = join_participant(&registry, note_id);

        let forged = Uuid::new_v4();
        let raw = format!(
            r#"{{"type":"edit","content":{{"userId":"{}","content":"hi"}}}}"#,
            forged
        );
        handle_incoming(&registry, None, note_id, &a, &raw).await;

        let relayed: RelayEnvelope =
            serde_json::from_str(&b_rx.try_recv().unwrap()).unwrap();
        // Attribution comes from admission, not from the payload. The
        // payload itself is relayed verbatim.
        assert_eq!(relayed.user_id, a.user_id);
        assert_eq!(relayed.content["userId"], forged.to_string());
    }

    #[tokio::test]
    async fn test_dead_peer_does_not_block_the_rest() {
        let registry = ConnectionRegistry::new();
        let note_id = Uuid::new_v4();
        let (a, _a_rx) = join_participant(&registry, note_id);
        let (_b, b_rx) = join_participant(&registry, note_id);
        let (_c, mut c_rx) = join_participant(&registry, note_id);

        // B's connection breaks without a clean leave.
        drop(b_rx);

        let raw = r#"{"type":"edit","content":{"content":"still here"}}"#;
        let delivered = handle_incoming(&registry, None, note_id, &a, raw).await;

        assert_eq!(delivered, 1);
        let relayed: RelayEnvelope =
            serde_json::from_str(&c_rx.try_recv().unwrap()).unwrap();
        assert_eq!(relayed.content["content"], "still here");
    }

    #[tokio::test]
    async fn test_malformed_message_is_dropped_silently() {
        let registry = ConnectionRegistry::new();
        let note_id = Uuid::new_v4();
        let (a, _a_rx) = join_participant(&registry, note_id);
        let (_b, mut b_rx) = join_participant(&registry, note_id);

        assert_eq!(handle_incoming(&registry, None, note_id, &a, "{oops").await, 0);
        assert_eq!(
            handle_incoming(&registry, None, note_id, &a, r#"{"content":{}}"#).await,
            0
        );
        assert!(b_rx.try_recv().is_err());
        // A is still a member and can send valid events afterwards.
        let delivered =
            handle_incoming(&registry, None, note_id, &a, r#"{"type":"edit"}"#).await;
        assert_eq!(delivered, 1);
    }

    #[tokio::test]
    async fn test_non_edit_kinds_are_relayed() {
        let registry = ConnectionRegistry::new();
        let note_id = Uuid::new_v4();
        let (a, _a_rx) = join_participant(&registry, note_id);
        let (_b, mut b_rx) = join_participant(&registry, note_id);

        let raw = r#"{"type":"cursor","content":{"offset":42}}"#;
        let delivered = handle_incoming(&registry, None, note_id, &a, raw).await;

        assert_eq!(delivered, 1);
        let relayed: RelayEnvelope =
            serde_json::from_str(&b_rx.try_recv().unwrap()).unwrap();
        assert_eq!(relayed.kind, "cursor");
    }

    #[tokio::test]
    async fn test_lone_participant_relays_to_nobody() {
        let registry = ConnectionRegistry::new();
        let note_id = Uuid::new_v4();
        let (a, _a_rx) = join_participant(&registry, note_id);

        let delivered =
            handle_incoming(&registry, None, note_id, &a, r#"{"type":"edit"}"#).await;
        assert_eq!(delivered, 0);
    }
}
