//! Version History Module
//!
//! Durable, append-only log of note snapshots. One record is appended per
//! accepted `edit` event on a collaboration channel, and one more per
//! restore. Records are immutable: this module exposes no update or
//! delete operation, and rows only ever disappear through the `notes`
//! cascade. Restoring an old version writes the snapshot back to the note
//! and appends a *new* record; history is never rewritten.

/// Database operations for version records
pub mod db;

/// Version history HTTP handlers
pub mod handlers;

pub use db::NoteVersion;
