//! Participant and registry fixtures for collaboration channel tests.

use notehub::backend::collab::{ConnectionRegistry, Participant};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Join a fresh participant to `note_id`'s channel, returning both the
/// participant and the receiving end of its outbound queue.
pub fn join_participant(
    registry: &ConnectionRegistry,
    note_id: Uuid,
) -> (Participant, mpsc::UnboundedReceiver<String>) {
    join_participant_as(registry, note_id, Uuid::new_v4())
}

/// Like [`join_participant`] with a caller-chosen identity.
pub fn join_participant_as(
    registry: &ConnectionRegistry,
    note_id: Uuid,
    user_id: Uuid,
) -> (Participant, mpsc::UnboundedReceiver<String>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let participant = Participant::new(user_id, tx);
    registry.join(note_id, participant.clone());
    (participant, rx)
}

/// Drain every frame currently queued on a participant's connection.
pub fn drain_frames(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<String> {
    let mut frames = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        frames.push(frame);
    }
    frames
}
