//! Backend Error Module
//!
//! This module defines error types for the HTTP API and their conversion
//! to HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Scope
//!
//! `ApiError` covers the request/response surface only. Faults inside a
//! live collaboration channel (malformed messages, dead recipients,
//! failed version writes) never become protocol errors; they degrade to
//! server-side logging, and admission failures are answered with a bare
//! status code before the WebSocket upgrade (see `collab::admission`).

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::ApiError;
