//! NoteHub - Main Library
//!
//! NoteHub is a multi-user note-taking service with a real-time
//! collaborative editing layer. Notes are owned per user and edited over a
//! conventional HTTP API; clients viewing the same note additionally join a
//! per-note WebSocket channel over which edits are relayed live and recorded
//! into an append-only version history.
//!
//! # Module Structure
//!
//! The library is organized into three main modules:
//!
//! - **`shared`** - Types shared between server and client
//!   - The collaboration wire envelope (client and relay forms)
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server with the per-note WebSocket collaboration channel
//!   - Connection registry, admission gate, version store
//!   - Authentication, notes CRUD, database persistence
//!
//! - **`client`** - Native collaboration client
//!   - WebSocket connection to a note channel
//!   - Automatic reconnection with stale-reconnect suppression

/// Types shared between server and client
pub mod shared;

/// Server-side code (Axum HTTP + WebSocket server)
pub mod backend;

/// Native collaboration client
pub mod client;
