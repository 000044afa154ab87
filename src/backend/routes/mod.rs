//! Routes Module
//!
//! HTTP route configuration and router assembly.
//!
//! # Route Map
//!
//! - `POST /api/register`, `POST /api/login` - public auth endpoints
//! - `GET /ws` - collaboration WebSocket (admission via query string)
//! - `/api/notes...` - notes CRUD and version history, behind the
//!   bearer-token middleware
//! - `/static` - static assets

/// Router assembly
pub mod router;

/// Protected API routes
pub mod api_routes;

pub use router::create_router;
