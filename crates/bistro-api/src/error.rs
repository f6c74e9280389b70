//! API error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bistro_auth::AuthError;
use bistro_core::CoreError;
use bistro_db::DbError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Public message for failures whose detail stays in the logs
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    /// Server-side failure; the message is shown to the caller as-is
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Core(e) => match e {
                CoreError::Validation(_)
                | CoreError::DuplicateAccount
                | CoreError::InvalidCredentials => StatusCode::BAD_REQUEST,
                CoreError::TokenExpired | CoreError::TokenInvalid => StatusCode::UNAUTHORIZED,
                CoreError::Persistence(_) | CoreError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Database(e) => match e {
                DbError::NotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Auth(e) => e.status(),
        }
    }

    /// Replace the public message of a server error, logging the original
    pub fn server_message(self, message: &str) -> Self {
        if self.status().is_server_error() {
            error!("{}: {}", message, self);
            ApiError::Internal(message.to_string())
        } else {
            self
        }
    }

    fn public_message(&self) -> String {
        match self {
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) | ApiError::Internal(msg) => {
                msg.clone()
            }
            ApiError::Unauthorized => "Unauthorized".to_string(),
            ApiError::Forbidden => "Forbidden".to_string(),
            ApiError::Core(e) => match e {
                CoreError::Persistence(_) | CoreError::Internal(_) => {
                    error!("Request failed: {}", e);
                    INTERNAL_ERROR_MESSAGE.to_string()
                }
                other => other.to_string(),
            },
            ApiError::Database(e) => match e {
                DbError::NotFound(msg) => msg.clone(),
                other => {
                    error!("Database failure: {}", other);
                    INTERNAL_ERROR_MESSAGE.to_string()
                }
            },
            ApiError::Auth(e) => match e {
                AuthError::PasswordHash(_) | AuthError::TokenEncoding(_) => {
                    error!("Authentication failure: {}", e);
                    INTERNAL_ERROR_MESSAGE.to_string()
                }
                AuthError::InvalidCredentials => CoreError::InvalidCredentials.to_string(),
                other => other.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = axum::Json(json!({
            "error": self.public_message()
        }));

        (status, body).into_response()
    }
}
