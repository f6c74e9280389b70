//! Authentication middleware for Axum

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use bistro_db::AccountRole;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::error::AuthError;
use crate::jwt::{Claims, TokenIssuer};

/// Authenticated account information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub role: AccountRole,
}

impl AuthUser {
    /// Create from verified JWT claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            id: claims.sub,
            role: claims.role,
        }
    }
}

/// Extract bearer token from an authorization header value
pub fn bearer_token(header: &str) -> Result<&str, AuthError> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidAuthHeader)
}

/// Authentication middleware
///
/// Requests without an Authorization header pass through untouched. A
/// present header must carry a valid, unexpired token; the resulting
/// `AuthUser` is added to the request extensions.
pub async fn auth_middleware(
    State(issuer): State<Arc<TokenIssuer>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .map(|h| h.to_str().map_err(|_| AuthError::InvalidAuthHeader))
        .transpose()?;

    if let Some(header) = auth_header {
        let token = bearer_token(header)?;
        let claims = issuer.decode(token)?;
        let user = AuthUser::from_claims(&claims);

        debug!("Authenticated account: {} ({})", user.id, user.role);

        request.extensions_mut().insert(user);
    }

    Ok(next.run(request).await)
}
