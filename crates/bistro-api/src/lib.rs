//! Bistro REST API
//!
//! This crate provides the Axum-based HTTP API: account registration and
//! login, staff account management, and the menu, reservation, feedback
//! and event resources. Privileged routes check the caller's role on the
//! server.

pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{AppState, MetricsHandle};
