//! Client error types

use bistro_auth::AuthError;
use bistro_db::AccountRole;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status and an `{error}` body
    #[error("Server returned error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Token verification failed: {0}")]
    Token(#[from] AuthError),

    /// The login payload named a different role than the verified token
    #[error("Role mismatch: response says {claimed}, token says {verified}")]
    RoleMismatch {
        claimed: AccountRole,
        verified: AccountRole,
    },
}

impl ClientError {
    /// HTTP status of a server-side rejection
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
