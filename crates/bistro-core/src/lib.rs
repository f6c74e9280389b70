//! Bistro Core Business Logic
//!
//! This crate provides the authentication service: account registration,
//! credential verification and session token issuance over a pluggable
//! account store.

pub mod config;
pub mod error;
pub mod service;
pub mod store;

pub use config::{AuthServiceConfig, DEFAULT_JWT_SECRET, MAX_TOKEN_LIFETIME_SECS};
pub use error::CoreError;
pub use service::{AuthService, LoginOutcome, Registration};
pub use store::AccountStore;
