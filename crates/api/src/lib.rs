//! Ticket aggregator API
//!
//! Axum routes and middleware for event search, sync and document access.

pub mod handlers;
pub mod router;
pub mod security;
pub mod state;

pub use router::create_router;
pub use state::AppState;

#[cfg(feature = "openapi")]
pub mod openapi;
