//! Real-time Collaboration Module
//!
//! This module contains the server-side collaborative editing layer:
//! per-note broadcast channels over WebSocket connections, backed by
//! append-only version history persistence.
//!
//! # Architecture
//!
//! The collab module is organized into focused submodules:
//!
//! - **`admission`** - One-time credential check at connection establishment
//! - **`registry`** - Note id -> live participants mapping
//! - **`channel`** - End-to-end processing of one inbound edit event
//! - **`ws`** - Axum WebSocket handler wiring the pieces together
//!
//! # Data Flow
//!
//! A client opens a WebSocket carrying a token and a note id. The admission
//! gate validates the token and resolves the identity; the registry adds
//! the connection under the note's channel; inbound events are stamped,
//! relayed to the other participants, and (for `edit` events) recorded as
//! a version snapshot. On disconnect the registry entry is removed and the
//! channel retired when empty.
//!
//! # Consistency
//!
//! Events from a single participant are relayed in the order received. No
//! global order is imposed across participants: concurrent edits produce
//! interleaved version records ordered by persistence timestamp. Relay and
//! persistence are independent best-effort steps; neither failure rolls
//! back the other.

/// Connection admission gate
pub mod admission;

/// End-to-end event processing
pub mod channel;

/// Live participant registry
pub mod registry;

/// WebSocket handler
pub mod ws;

/// Re-export commonly used types
pub use admission::{admit, AdmissionError};
pub use registry::{ConnectionRegistry, Participant, ParticipantHandle};
pub use ws::collab_ws;
