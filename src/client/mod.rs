//! Client Module
//!
//! Native client for the collaboration channel. Connects to a note's
//! WebSocket endpoint, surfaces relayed events, and transparently
//! reconnects after unexpected drops.

/// Collaboration WebSocket client
pub mod collab;

pub use collab::{CollabClient, CollabEvent};
