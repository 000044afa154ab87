//! Authentication test helpers
//!
//! Provides utilities for minting tokens and building authorization
//! headers without touching a database.

use notehub::backend::auth::sessions::create_token;
use uuid::Uuid;

/// Test user credentials
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub token: String,
}

/// Mint a signed token for a throwaway identity.
pub fn test_user() -> TestUser {
    let id = Uuid::new_v4();
    let email = format!("test_{}@example.com", id);
    let token = create_token(id, email.clone()).expect("Failed to create test token");
    TestUser { id, email, token }
}

/// Generate a test JWT token
pub fn generate_test_token(user_id: Uuid, email: &str) -> String {
    create_token(user_id, email.to_string()).expect("Failed to generate test token")
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
