//! Core error types

use bistro_auth::AuthError;
use bistro_db::DbError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("{0}")]
    Validation(String),

    #[error("User already exists")]
    DuplicateAccount,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Persistence failure: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DbError> for CoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Duplicate(_) => CoreError::DuplicateAccount,
            other => CoreError::Persistence(other.to_string()),
        }
    }
}

impl From<AuthError> for CoreError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => CoreError::InvalidCredentials,
            AuthError::TokenExpired => CoreError::TokenExpired,
            AuthError::TokenInvalid
            | AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeader
            | AuthError::InsufficientPermissions => CoreError::TokenInvalid,
            AuthError::PasswordHash(msg) => CoreError::Internal(msg),
            AuthError::TokenEncoding(e) => CoreError::Internal(e.to_string()),
        }
    }
}
