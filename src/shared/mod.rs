//! Shared Module
//!
//! This module contains types that are shared between the server and the
//! native client. All types are designed for JSON serialization and
//! transmission over the collaboration WebSocket.

/// Collaboration wire envelope
pub mod envelope;

/// Re-export commonly used types for convenience
pub use envelope::{ClientEnvelope, RelayEnvelope, EDIT_KIND};
