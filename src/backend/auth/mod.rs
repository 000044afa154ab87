//! Authentication Module
//!
//! Registration, login, JWT session tokens and user records.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs      - Module exports
//! ├── sessions.rs - JWT creation and verification
//! ├── users.rs    - User model and database operations
//! └── handlers.rs - Register and login HTTP handlers
//! ```

/// Register and login handlers
pub mod handlers;

/// JWT token management
pub mod sessions;

/// User model and database operations
pub mod users;

/// Re-export commonly used items
pub use handlers::{login, register};
pub use sessions::{create_token, verify_token, Claims};
pub use users::User;
