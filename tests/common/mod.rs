//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Participant and registry fixtures for channel tests
//! - Authentication test helpers

pub mod auth_helpers;
pub mod participants;

// Re-export commonly used utilities
pub use auth_helpers::*;
pub use participants::*;
