//! Registration, login and session routes

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use bistro_core::Registration;
use bistro_db::AccountRole;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::extract::{ApiJson, MaybeAuth, RequireAuth, RequireManager};
use crate::state::AppState;

use super::types::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, SessionResponse};

/// Parse an optional role field; blank means "not given"
fn parse_role(role: Option<&str>) -> Result<Option<AccountRole>, ApiError> {
    match role.map(str::trim).filter(|r| !r.is_empty()) {
        Some(r) => r
            .parse::<AccountRole>()
            .map(Some)
            .map_err(|_| ApiError::BadRequest(format!("Invalid role: {}", r))),
        None => Ok(None),
    }
}

/// POST /api/register
///
/// Anyone may create a `user` account. Any other role needs a manager
/// token on the request.
async fn register(
    MaybeAuth(caller): MaybeAuth,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let role = parse_role(request.role.as_deref())?;

    if let Some(role) = role.filter(|r| *r != AccountRole::User) {
        let is_manager = caller.as_ref().is_some_and(|c| c.role.is_manager());
        if !is_manager {
            debug!("Rejected self-registration with role {}", role);
            return Err(ApiError::Forbidden);
        }
    }

    state
        .auth
        .register(Registration {
            username: request.username,
            email: request.email,
            password: request.password,
            role,
        })
        .await
        .map_err(|e| ApiError::from(e).server_message("Server error during registration"))?;

    metrics::counter!("bistro_registrations_total").increment(1);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// POST /api/register-operator (Manager only)
async fn register_operator(
    RequireManager(manager): RequireManager,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let account = state
        .auth
        .register(Registration {
            username: request.username,
            email: request.email,
            password: request.password,
            role: Some(AccountRole::Operator),
        })
        .await
        .map_err(|e| ApiError::from(e).server_message("Server error during registration"))?;

    info!("Manager {} registered operator {}", manager.id, account.id);
    metrics::counter!("bistro_registrations_total").increment(1);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Operator registered successfully")),
    ))
}

/// POST /api/login
async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let outcome = match state.auth.login(&request.email, &request.password).await {
        Ok(outcome) => outcome,
        Err(e) => {
            metrics::counter!("bistro_login_failures_total").increment(1);
            return Err(ApiError::from(e).server_message("Server error during login"));
        }
    };

    metrics::counter!("bistro_logins_total", "role" => outcome.role.as_str()).increment(1);

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token: outcome.token,
        role: outcome.role,
        expires_in: outcome.expires_in,
    }))
}

/// GET /api/auth/me
async fn me(RequireAuth(user): RequireAuth) -> Json<SessionResponse> {
    Json(SessionResponse {
        id: user.id,
        role: user.role,
    })
}

/// Create auth routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/register-operator", post(register_operator))
        .route("/login", post(login))
        .route("/auth/me", get(me))
}
