//! Bistro Authentication
//!
//! This crate provides password hashing, JWT session tokens and the
//! bearer-token middleware used by the Bistro API.

pub mod error;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use error::AuthError;
pub use jwt::{Claims, DEFAULT_TOKEN_LIFETIME_SECS, TokenIssuer};
pub use middleware::{AuthUser, auth_middleware, bearer_token};
pub use password::{HashingConfig, PasswordHasher};
