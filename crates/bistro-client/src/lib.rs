//! Bistro API Client
//!
//! This crate provides the HTTP client for the Bistro API and the
//! client-side role router that picks the guest, manager or operator
//! surface from a verified session token.

pub mod api;
pub mod error;
pub mod router;
pub mod types;

pub use api::{ApiClient, ClientConfig};
pub use error::ClientError;
pub use router::{RoleRouter, RouterState, Surface, TokenVerifier};
pub use types::{AccountSummary, LoginResponse, RegisterRequest, Session};
