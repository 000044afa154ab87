//! Property-based tests for the connection registry
//!
//! Replays arbitrary join/leave sequences against a simple model and
//! checks the registry's bookkeeping never drifts from it.

use std::collections::{HashMap, HashSet};

use notehub::backend::collab::{ConnectionRegistry, Participant, ParticipantHandle};
use proptest::prelude::*;
use tokio::sync::mpsc;
use uuid::Uuid;

#[derive(Debug, Clone)]
enum Op {
    Join { note: usize },
    Leave { slot: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..4usize).prop_map(|note| Op::Join { note }),
        (0..32usize).prop_map(|slot| Op::Leave { slot }),
    ]
}

proptest! {
    #[test]
    fn test_registry_matches_model(ops in proptest::collection::vec(op_strategy(), 1..64)) {
        let registry = ConnectionRegistry::new();
        let notes: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();

        // Model: which handles are live on which note.
        let mut model: HashMap<Uuid, HashSet<ParticipantHandle>> = HashMap::new();
        let mut joined: Vec<(Uuid, ParticipantHandle)> = Vec::new();

        for op in ops {
            match op {
                Op::Join { note } => {
                    let note_id = notes[note];
                    let (tx, _rx) = mpsc::unbounded_channel();
                    let p = Participant::new(Uuid::new_v4(), tx);
                    model.entry(note_id).or_default().insert(p.handle);
                    joined.push((note_id, p.handle));
                    registry.join(note_id, p);
                }
                Op::Leave { slot } => {
                    // Leaves beyond what has joined exercise idempotence.
                    if let Some(&(note_id, handle)) = joined.get(slot) {
                        if let Some(members) = model.get_mut(&note_id) {
                            members.remove(&handle);
                            if members.is_empty() {
                                model.remove(&note_id);
                            }
                        }
                        registry.leave(note_id, handle);
                    }
                }
            }
        }

        prop_assert_eq!(registry.channel_count(), model.len());
        for &note_id in &notes {
            let expected = model.get(&note_id).map_or(0, HashSet::len);
            prop_assert_eq!(registry.participant_count(note_id), expected);

            // list_others never includes the excluded handle and covers
            // exactly the rest of the channel.
            if let Some(members) = model.get(&note_id) {
                for &handle in members {
                    let others: HashSet<_> = registry
                        .list_others(note_id, handle)
                        .into_iter()
                        .map(|p| p.handle)
                        .collect();
                    prop_assert!(!others.contains(&handle));
                    prop_assert_eq!(others.len(), members.len() - 1);
                }
            }
        }
    }
}
