/**
 * Collaboration WebSocket Client
 *
 * This module implements the client side of a note's collaboration
 * channel, including the reconnection policy:
 *
 * - On unexpected close, a reconnection attempt is scheduled after a
 *   fixed delay (5 seconds), indefinitely; there is no backoff and no
 *   attempt cap. Each attempt is cheap and failure is silent.
 * - Before every attempt, the client checks whether it still intends to
 *   be viewing the note the connection belonged to. Navigating to another
 *   note (or closing the editor) turns any pending reconnect into a
 *   no-op: suppression is by intent comparison, not by cancelling timers.
 *
 * Intent is tracked in a `tokio::sync::watch` channel so that an active
 * session also notices navigation immediately and shuts down instead of
 * pumping events for a note the user has left.
 */
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use uuid::Uuid;

use crate::shared::envelope::{ClientEnvelope, RelayEnvelope};

/// Delay between reconnection attempts.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Events surfaced to the embedding application.
#[derive(Debug, Clone)]
pub enum CollabEvent {
    /// Channel connection established (initial or after a reconnect)
    Connected(Uuid),
    /// Channel connection lost; a reconnect will be attempted
    Disconnected(Uuid),
    /// An event relayed from another participant
    Remote(RelayEnvelope),
}

/// Client for the per-note collaboration channel.
pub struct CollabClient {
    server_url: String,
    token: String,
    /// The note the user currently intends to view, if any
    current_note: watch::Sender<Option<Uuid>>,
    /// Outbound queue of the live connection, when one exists
    active: Arc<Mutex<Option<mpsc::UnboundedSender<String>>>>,
    events_tx: mpsc::UnboundedSender<CollabEvent>,
    reconnect_delay: Duration,
}

impl CollabClient {
    /// Create a client for `server_url` (e.g. `ws://localhost:3001`)
    /// authenticating with `token`.
    ///
    /// Returns the client and the stream of channel events.
    pub fn new(
        server_url: impl Into<String>,
        token: impl Into<String>,
    ) -> (Self, mpsc::UnboundedReceiver<CollabEvent>) {
        Self::with_reconnect_delay(server_url, token, RECONNECT_DELAY)
    }

    /// Like [`CollabClient::new`] with a custom reconnect delay (used by
    /// tests to avoid multi-second sleeps).
    pub fn with_reconnect_delay(
        server_url: impl Into<String>,
        token: impl Into<String>,
        reconnect_delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<CollabEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (current_note, _) = watch::channel(None);
        let client = Self {
            server_url: server_url.into(),
            token: token.into(),
            current_note,
            active: Arc::new(Mutex::new(None)),
            events_tx,
            reconnect_delay,
        };
        (client, events_rx)
    }

    /// Start (or switch) collaboration on `note_id`.
    ///
    /// Any previous note's session notices the intent change and winds
    /// down; its scheduled reconnects become no-ops.
    pub fn open_note(&self, note_id: Uuid) {
        self.current_note.send_replace(Some(note_id));

        let url = format!(
            "{}/ws?token={}&noteId={}",
            self.server_url, self.token, note_id
        );
        let intent = self.current_note.subscribe();
        let active = Arc::clone(&self.active);
        let events = self.events_tx.clone();
        let delay = self.reconnect_delay;

        tokio::spawn(run_session_loop(note_id, url, intent, active, events, delay));
    }

    /// Stop collaborating entirely. Pending reconnects become no-ops.
    pub fn close(&self) {
        self.current_note.send_replace(None);
    }

    /// Send an event over the live connection.
    ///
    /// Returns `false` when no connection is currently up; the caller is
    /// expected to fall back to the HTTP API for durability, so nothing
    /// is queued.
    pub fn send(&self, event: &ClientEnvelope) -> bool {
        let frame = match serde_json::to_string(event) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!("[Client] Failed to serialize event: {}", e);
                return false;
            }
        };
        match self.active.lock().unwrap().as_ref() {
            Some(tx) => tx.send(frame).is_ok(),
            None => false,
        }
    }
}

/// Connect, pump, and reconnect until the user navigates away.
async fn run_session_loop(
    note_id: Uuid,
    url: String,
    mut intent: watch::Receiver<Option<Uuid>>,
    active: Arc<Mutex<Option<mpsc::UnboundedSender<String>>>>,
    events: mpsc::UnboundedSender<CollabEvent>,
    reconnect_delay: Duration,
) {
    loop {
        // Stale-reconnect suppression: only proceed while this note is
        // still the one the user is viewing.
        if *intent.borrow() != Some(note_id) {
            tracing::debug!("[Client] Dropping stale session loop for note {}", note_id);
            return;
        }

        match connect_async(&url).await {
            Ok((stream, _)) => {
                tracing::info!("[Client] Connected to note {}", note_id);
                let _ = events.send(CollabEvent::Connected(note_id));

                run_session(note_id, stream, &mut intent, &active, &events).await;
                let _ = events.send(CollabEvent::Disconnected(note_id));
            }
            Err(e) => {
                tracing::warn!("[Client] Connection to note {} failed: {}", note_id, e);
            }
        }

        // Fixed-interval retry, unbounded.
        tokio::time::sleep(reconnect_delay).await;
    }
}

/// Pump one live connection until it closes or intent moves elsewhere.
async fn run_session(
    note_id: Uuid,
    stream: tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >,
    intent: &mut watch::Receiver<Option<Uuid>>,
    active: &Arc<Mutex<Option<mpsc::UnboundedSender<String>>>>,
    events: &mpsc::UnboundedSender<CollabEvent>,
) {
    let (mut sink, mut source) = stream.split();
    let (tx, mut outbound) = mpsc::unbounded_channel::<String>();
    active.lock().unwrap().replace(tx.clone());

    loop {
        tokio::select! {
            frame = outbound.recv() => {
                let Some(frame) = frame else { break };
                if sink.send(Message::Text(frame.into())).await.is_err() {
                    break;
                }
            }
            msg = source.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<RelayEnvelope>(text.as_str()) {
                            Ok(envelope) => {
                                let _ = events.send(CollabEvent::Remote(envelope));
                            }
                            Err(e) => {
                                tracing::warn!("[Client] Dropping malformed relay frame: {}", e);
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
            _ = intent.changed() => {
                if *intent.borrow() != Some(note_id) {
                    let _ = sink.send(Message::Close(None)).await;
                    break;
                }
            }
        }
    }

    release_active(active, &tx);
}

/// Clear the active slot, but only if it still holds this session's
/// sender. On a fast note switch the new session may have already claimed
/// the slot; the old session's cleanup must not steal it.
fn release_active(
    active: &Arc<Mutex<Option<mpsc::UnboundedSender<String>>>>,
    tx: &mpsc::UnboundedSender<String>,
) {
    let mut slot = active.lock().unwrap();
    if slot.as_ref().is_some_and(|current| current.same_channel(tx)) {
        slot.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    // Nothing listens on this port; every connect attempt fails fast.
    const DEAD_SERVER: &str = "ws://127.0.0.1:9";

    #[tokio::test]
    async fn test_send_without_connection_returns_false() {
        let (client, _events) = CollabClient::new(DEAD_SERVER, "token");
        let event = ClientEnvelope {
            kind: "edit".to_string(),
            content: serde_json::json!({"content": "x"}),
        };
        assert!(!client.send(&event));
    }

    #[tokio::test]
    async fn test_navigating_away_suppresses_reconnect() {
        let (client, _events) =
            CollabClient::with_reconnect_delay(DEAD_SERVER, "token", Duration::from_millis(10));
        let note_id = Uuid::new_v4();

        let mut intent = client.current_note.subscribe();
        client.open_note(note_id);
        assert_eq!(*intent.borrow_and_update(), Some(note_id));

        // Let the loop burn a couple of failed attempts, then navigate away.
        tokio::time::sleep(Duration::from_millis(50)).await;
        client.close();

        // The loop observes the cleared intent on its next wakeup and
        // stops scheduling attempts; give it one delay's worth of time.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(*intent.borrow_and_update(), None);
    }

    #[tokio::test]
    async fn test_switching_notes_replaces_intent() {
        let (client, _events) =
            CollabClient::with_reconnect_delay(DEAD_SERVER, "token", Duration::from_millis(10));
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        client.open_note(first);
        client.open_note(second);

        // Only the second note remains the current intent; the first
        // note's loop exits at its next check.
        assert_eq!(*client.current_note.subscribe().borrow(), Some(second));
    }

    #[tokio::test]
    async fn test_release_clears_own_sender() {
        let (tx, _rx) = mpsc::unbounded_channel::<String>();
        let active = Arc::new(Mutex::new(Some(tx.clone())));

        release_active(&active, &tx);
        assert!(active.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_release_leaves_successor_sender_in_place() {
        // A fast note switch: the new session has already claimed the slot
        // when the old session's cleanup runs.
        let (old_tx, _old_rx) = mpsc::unbounded_channel::<String>();
        let (new_tx, mut new_rx) = mpsc::unbounded_channel::<String>();
        let active = Arc::new(Mutex::new(Some(new_tx)));

        release_active(&active, &old_tx);

        let slot = active.lock().unwrap();
        let current = slot.as_ref().expect("successor sender must survive");
        current.send("frame".to_string()).unwrap();
        drop(slot);
        assert_eq!(new_rx.try_recv().unwrap(), "frame");
    }

    #[tokio::test]
    async fn test_session_loop_exits_when_intent_cleared() {
        let (tx, rx) = watch::channel(Some(Uuid::new_v4()));
        let note_id = Uuid::new_v4(); // different note: loop must exit at once
        let (events_tx, _events_rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(run_session_loop(
            note_id,
            format!("{}/ws", DEAD_SERVER),
            rx,
            Arc::new(Mutex::new(None)),
            events_tx,
            Duration::from_millis(10),
        ));

        let result = timeout(Duration::from_millis(200), handle).await;
        assert!(result.is_ok(), "stale session loop should exit immediately");
        drop(tx);
    }
}
