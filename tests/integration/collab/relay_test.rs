//! Channel relay integration tests
//!
//! Drives the full registry-and-channel path through its public API with
//! several participants spread across two notes.

use chrono::DateTime;
use notehub::backend::collab::channel::handle_incoming;
use notehub::backend::collab::ConnectionRegistry;
use notehub::shared::envelope::RelayEnvelope;
use uuid::Uuid;

use crate::common::{drain_frames, join_participant};

#[tokio::test]
async fn test_edit_reaches_co_participants_and_nobody_else() {
    let registry = ConnectionRegistry::new();
    let note_one = Uuid::new_v4();
    let note_two = Uuid::new_v4();

    // Alice and Bob share a note; Carol is on a different one.
    let (alice, mut alice_rx) = join_participant(&registry, note_one);
    let (_bob, mut bob_rx) = join_participant(&registry, note_one);
    let (_carol, mut carol_rx) = join_participant(&registry, note_two);

    let raw = r#"{"type":"edit","content":{"title":"Plan","content":"draft one"}}"#;
    let delivered = handle_incoming(&registry, None, note_one, &alice, raw).await;
    assert_eq!(delivered, 1);

    // Bob receives the event stamped with Alice's identity and a server
    // timestamp; the payload passes through unchanged.
    let frames = drain_frames(&mut bob_rx);
    assert_eq!(frames.len(), 1);
    let relayed: RelayEnvelope = serde_json::from_str(&frames[0]).unwrap();
    assert_eq!(relayed.kind, "edit");
    assert_eq!(relayed.user_id, alice.user_id);
    assert_eq!(relayed.content["title"], "Plan");
    assert!(DateTime::parse_from_rfc3339(&relayed.timestamp).is_ok());

    // The sender does not hear itself, and other notes' channels are
    // fully isolated.
    assert!(drain_frames(&mut alice_rx).is_empty());
    assert!(drain_frames(&mut carol_rx).is_empty());
}

#[tokio::test]
async fn test_events_from_one_sender_arrive_in_order() {
    let registry = ConnectionRegistry::new();
    let note_id = Uuid::new_v4();
    let (alice, _alice_rx) = join_participant(&registry, note_id);
    let (_bob, mut bob_rx) = join_participant(&registry, note_id);

    for i in 0..5 {
        let raw = format!(r#"{{"type":"edit","content":{{"content":"rev {}"}}}}"#, i);
        handle_incoming(&registry, None, note_id, &alice, &raw).await;
    }

    let frames = drain_frames(&mut bob_rx);
    assert_eq!(frames.len(), 5);
    for (i, frame) in frames.iter().enumerate() {
        let relayed: RelayEnvelope = serde_json::from_str(frame).unwrap();
        assert_eq!(relayed.content["content"], format!("rev {}", i));
    }
}

#[tokio::test]
async fn test_departed_participant_receives_nothing_more() {
    let registry = ConnectionRegistry::new();
    let note_id = Uuid::new_v4();
    let (alice, _alice_rx) = join_participant(&registry, note_id);
    let (bob, mut bob_rx) = join_participant(&registry, note_id);

    handle_incoming(&registry, None, note_id, &alice, r#"{"type":"edit"}"#).await;
    assert_eq!(drain_frames(&mut bob_rx).len(), 1);

    registry.leave(note_id, bob.handle);
    let delivered =
        handle_incoming(&registry, None, note_id, &alice, r#"{"type":"edit"}"#).await;
    assert_eq!(delivered, 0);
    assert!(drain_frames(&mut bob_rx).is_empty());
}

#[tokio::test]
async fn test_channel_retires_after_everyone_leaves() {
    let registry = ConnectionRegistry::new();
    let note_id = Uuid::new_v4();
    let (alice, _alice_rx) = join_participant(&registry, note_id);
    let (bob, _bob_rx) = join_participant(&registry, note_id);

    registry.leave(note_id, alice.handle);
    registry.leave(note_id, bob.handle);
    assert_eq!(registry.channel_count(), 0);

    // A later join recreates the channel from scratch.
    let (_carol, _carol_rx) = join_participant(&registry, note_id);
    assert_eq!(registry.participant_count(note_id), 1);
}
