//! Wire types exchanged with the Bistro API

use bistro_db::AccountRole;
use serde::{Deserialize, Serialize};

/// Registration payload
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<AccountRole>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Successful login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub role: AccountRole,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Identity vouched for by a verified token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Session {
    #[serde(rename = "id")]
    pub account_id: i64,
    pub role: AccountRole,
}

/// Account as listed by staff endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct AccountSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: AccountRole,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageBody {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
