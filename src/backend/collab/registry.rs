/**
 * Connection Registry
 *
 * This module maintains the mapping from note id to the set of live
 * participants collaborating on that note.
 *
 * # Lifecycle
 *
 * Channels are created lazily on first join and removed as soon as the
 * last participant leaves, so an idle server holds no channel state.
 *
 * # Concurrency
 *
 * One mutex guards the whole map. Join, leave and list_others for the
 * same note are therefore linearizable with respect to each other: a
 * relay snapshot never observes a half-applied membership change. The
 * critical sections only touch the in-memory map; no I/O happens under
 * the lock.
 */
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Stable identifier for one participant entry.
///
/// Generated per connection, never reused. Removal goes through this
/// handle rather than structural equality of (connection, identity), so a
/// user who reconnects (or holds several tabs on the same note) never
/// collides with their other entries.
pub type ParticipantHandle = Uuid;

/// One connection's membership record within a channel.
///
/// A single identity may hold multiple concurrent entries (one per tab);
/// each gets its own handle and its own outbound queue.
#[derive(Debug, Clone)]
pub struct Participant {
    /// Stable per-connection handle
    pub handle: ParticipantHandle,
    /// Identity resolved by the admission gate
    pub user_id: Uuid,
    /// When this connection joined the channel
    pub joined_at: DateTime<Utc>,
    /// Outbound frame queue for this connection
    sender: mpsc::UnboundedSender<String>,
}

impl Participant {
    /// Create a participant with a freshly generated handle.
    pub fn new(user_id: Uuid, sender: mpsc::UnboundedSender<String>) -> Self {
        Self {
            handle: Uuid::new_v4(),
            user_id,
            joined_at: Utc::now(),
            sender,
        }
    }

    /// Deliver a serialized frame to this participant's connection.
    ///
    /// Returns `false` if the connection has gone away (its pump task has
    /// dropped the receiving end). Callers treat that as a skipped
    /// recipient, never as an error.
    pub fn deliver(&self, frame: &str) -> bool {
        self.sender.send(frame.to_owned()).is_ok()
    }
}

/// Registry of live collaboration channels, keyed by note id.
///
/// Cheap to clone; clones share the same underlying map. Constructed once
/// at process start and injected through `AppState`.
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    channels: Arc<Mutex<HashMap<Uuid, HashMap<ParticipantHandle, Participant>>>>,
}

impl ConnectionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a participant to the channel for `note_id`, creating the
    /// channel if absent.
    pub fn join(&self, note_id: Uuid, participant: Participant) {
        let mut channels = self.channels.lock().unwrap();
        let channel = channels.entry(note_id).or_default();
        tracing::debug!(
            "[Registry] user {} joined note {} ({} already present)",
            participant.user_id,
            note_id,
            channel.len()
        );
        channel.insert(participant.handle, participant);
    }

    /// Remove a participant from the channel for `note_id`.
    ///
    /// Idempotent: removing a handle that is not present is a no-op. When
    /// the last participant leaves, the channel entry itself is removed.
    pub fn leave(&self, note_id: Uuid, handle: ParticipantHandle) {
        let mut channels = self.channels.lock().unwrap();
        if let Some(channel) = channels.get_mut(&note_id) {
            channel.remove(&handle);
            if channel.is_empty() {
                channels.remove(&note_id);
                tracing::debug!("[Registry] note {} channel retired", note_id);
            }
        }
    }

    /// All participants on the channel except the caller, for relay.
    ///
    /// Returns an empty vec if the channel does not exist.
    pub fn list_others(&self, note_id: Uuid, excluding: ParticipantHandle) -> Vec<Participant> {
        let channels = self.channels.lock().unwrap();
        match channels.get(&note_id) {
            Some(channel) => channel
                .values()
                .filter(|p| p.handle != excluding)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Number of participants currently on a note's channel.
    pub fn participant_count(&self, note_id: Uuid) -> usize {
        self.channels
            .lock()
            .unwrap()
            .get(&note_id)
            .map_or(0, HashMap::len)
    }

    /// Number of live channels.
    pub fn channel_count(&self) -> usize {
        self.channels.lock().unwrap().len()
    }
}
