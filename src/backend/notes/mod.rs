//! Notes Module
//!
//! Notes CRUD, always scoped by owning user on the HTTP surface.
//! Ownership is checked at the HTTP layer and at admission; the
//! collaboration channel does not re-verify it per relayed message.

/// Database operations for notes
pub mod db;

/// Notes HTTP handlers
pub mod handlers;

pub use db::Note;
