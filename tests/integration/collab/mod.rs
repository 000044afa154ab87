//! Collaboration subsystem integration tests

pub mod admission_test;
pub mod relay_test;
