//! Backend Module
//!
//! This module contains all server-side code for the NoteHub application.
//! It provides an Axum HTTP server with a per-note WebSocket collaboration
//! channel, JWT authentication, and PostgreSQL persistence.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Registration, login, JWT tokens, user records
//! - **`middleware`** - Bearer-token middleware for the HTTP API
//! - **`notes`** - Notes CRUD (always scoped by owning user)
//! - **`versions`** - Append-only version history store and endpoints
//! - **`collab`** - Real-time collaboration: admission gate, connection
//!   registry, channel relay, WebSocket handler
//! - **`error`** - Backend error types and HTTP conversion
//!
//! # State Management
//!
//! The backend uses shared state (`AppState`) that contains the connection
//! registry for live collaboration channels and an optional database pool.
//! The registry is the only shared mutable structure; all of its mutation is
//! serialized behind one mutex. The database is external and provides its
//! own consistency.
//!
//! # Collaboration Protocol
//!
//! A client opens `GET /ws?token=<jwt>&noteId=<uuid>` as a WebSocket
//! upgrade. Admission verifies the token and resolves the identity before
//! the upgrade completes; a missing or invalid token (or missing note id)
//! rejects the request without creating any channel state. Once joined,
//! inbound `edit` events are relayed to every other participant on the same
//! note and recorded as version-history snapshots.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Notes CRUD
pub mod notes;

/// Append-only version history
pub mod versions;

/// Real-time collaboration channel
pub mod collab;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use collab::registry::{ConnectionRegistry, Participant};
pub use error::ApiError;
pub use server::create_app;
