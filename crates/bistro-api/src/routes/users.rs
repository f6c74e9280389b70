//! Account management routes

use axum::{
    Json, Router,
    extract::State,
    routing::{delete, get},
};
use bistro_db::AccountRole;
use tracing::info;

use crate::error::ApiError;
use crate::extract::{ApiPath, ApiQuery, RequireManager, RequireStaff};
use crate::state::AppState;

use super::types::{AccountResponse, AccountsQuery, MessageResponse};

/// GET /api/users (Staff only)
///
/// `?role=operator` narrows the listing to a single role.
async fn list_users(
    _staff: RequireStaff,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AccountsQuery>,
) -> Result<Json<Vec<AccountResponse>>, ApiError> {
    let role = query
        .role
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(|r| {
            r.parse::<AccountRole>()
                .map_err(|_| ApiError::BadRequest(format!("Invalid role: {}", r)))
        })
        .transpose()?;

    let accounts = match role {
        Some(role) => state.db.list_accounts_by_role(role).await,
        None => state.db.list_accounts().await,
    }
    .map_err(|e| ApiError::from(e).server_message("Server error while fetching users"))?;

    Ok(Json(accounts.into_iter().map(AccountResponse::from).collect()))
}

/// DELETE /api/users/{id} (Manager only)
async fn delete_user(
    RequireManager(manager): RequireManager,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    if manager.id == id {
        return Err(ApiError::BadRequest(
            "Cannot delete your own account".to_string(),
        ));
    }

    let deleted = state
        .db
        .delete_account(id)
        .await
        .map_err(|e| ApiError::from(e).server_message("Server error while deleting user"))?;

    if !deleted {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    info!("Manager {} deleted account {}", manager.id, id);

    Ok(Json(MessageResponse::new("User deleted successfully")))
}

/// Create account management routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", delete(delete_user))
}
