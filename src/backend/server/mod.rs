//! Server Module
//!
//! This module contains all code for initializing and configuring the Axum
//! HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Configuration loading (database)
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Registry Creation**: A single `ConnectionRegistry` is constructed
//!    at process start and passed by reference to every handler. Channel
//!    membership is process-scoped and never persisted.
//! 2. **Configuration Loading**: Loads the PostgreSQL pool if configured.
//! 3. **Router Creation**: Configures all routes and middleware.

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use init::create_app;
pub use state::AppState;
