/**
 * Collaboration WebSocket Handler
 *
 * This module wires the admission gate, the connection registry and the
 * channel relay into one Axum WebSocket endpoint:
 *
 * `GET /ws?token=<jwt>&noteId=<uuid>`
 *
 * Admission runs before the protocol upgrade; a rejected request is
 * answered with a bare status code and the transport is never upgraded.
 * Once upgraded, the socket is split: a pump task drains this
 * participant's outbound queue into the sink while the handler loop feeds
 * inbound frames to the channel. Disconnecting removes the registry entry
 * and stops any further relay or persistence attributable to this
 * participant; an in-flight version append for a prior event completes on
 * its own.
 */
use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::backend::collab::admission::{admit, AdmissionError, CollabParams};
use crate::backend::collab::channel::handle_incoming;
use crate::backend::collab::registry::Participant;
use crate::backend::server::state::AppState;

/// WebSocket upgrade handler for `GET /ws`.
pub async fn collab_ws(
    State(app_state): State<AppState>,
    Query(params): Query<CollabParams>,
    ws: WebSocketUpgrade,
) -> Response {
    match admit(&params) {
        Ok((user_id, note_id)) => {
            ws.on_upgrade(move |socket| handle_socket(socket, app_state, note_id, user_id))
        }
        Err(e) => {
            tracing::warn!("[Admission] Rejected connection attempt: {}", e);
            let status = match e {
                AdmissionError::MissingNoteId => StatusCode::BAD_REQUEST,
                _ => StatusCode::UNAUTHORIZED,
            };
            // No structured error body on admission failure.
            status.into_response()
        }
    }
}

/// Drive one admitted connection until it closes.
async fn handle_socket(socket: WebSocket, app_state: AppState, note_id: Uuid, user_id: Uuid) {
    let (mut sink, mut stream) = socket.split();

    // Frames relayed from siblings are queued here and pumped into the
    // sink by a dedicated task, so relay never awaits this socket.
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let participant = Participant::new(user_id, tx);
    let handle = participant.handle;

    app_state.registry.join(note_id, participant.clone());
    tracing::info!("[Collab] user {} connected to note {}", user_id, note_id);

    let pump_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sink.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(msg)) = stream.next().await {
        match msg {
            Message::Text(text) => {
                handle_incoming(
                    &app_state.registry,
                    app_state.db_pool.as_ref(),
                    note_id,
                    &participant,
                    text.as_str(),
                )
                .await;
            }
            Message::Close(_) => break,
            // Binary frames are not part of the protocol; ping/pong is
            // handled by the transport.
            _ => {}
        }
    }

    app_state.registry.leave(note_id, handle);
    pump_task.abort();
    tracing::info!("[Collab] user {} disconnected from note {}", user_id, note_id);
}
