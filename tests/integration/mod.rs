//! Integration tests
//!
//! End-to-end tests exercising whole subsystems through their public API.

pub mod collab;
