//! Admission gate integration tests
//!
//! Exercises admission with real signed tokens from the auth layer,
//! the same path the WebSocket handler takes before upgrading.

use assert_matches::assert_matches;
use notehub::backend::collab::admission::CollabParams;
use notehub::backend::collab::{admit, AdmissionError};
use uuid::Uuid;

use crate::common::test_user;

#[test]
fn test_minted_token_is_admitted_with_its_identity() {
    let user = test_user();
    let note_id = Uuid::new_v4();
    let params = CollabParams {
        token: Some(user.token.clone()),
        note_id: Some(note_id),
    };

    let (admitted_user, admitted_note) = admit(&params).unwrap();
    assert_eq!(admitted_user, user.id);
    assert_eq!(admitted_note, note_id);
}

#[test]
fn test_tampered_token_is_rejected() {
    let user = test_user();
    let mut tampered = user.token.clone();
    // Flip the last signature character.
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    let params = CollabParams {
        token: Some(tampered),
        note_id: Some(Uuid::new_v4()),
    };
    assert_matches!(admit(&params), Err(AdmissionError::InvalidToken(_)));
}

#[test]
fn test_admission_requires_both_parameters() {
    let user = test_user();
    assert_matches!(
        admit(&CollabParams {
            token: Some(user.token),
            note_id: None,
        }),
        Err(AdmissionError::MissingNoteId)
    );
    assert_matches!(
        admit(&CollabParams {
            token: None,
            note_id: Some(Uuid::new_v4()),
        }),
        Err(AdmissionError::MissingToken)
    );
}
