//! Guest feedback routes

use axum::{
    Json, Router,
    extract::State,
    routing::{delete, post},
};
use bistro_db::{Feedback, NewFeedback};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, RequireManager, RequireStaff};
use crate::state::AppState;

use super::types::{FeedbackRequest, MessageResponse};

/// POST /api/feedback
async fn submit_feedback(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<FeedbackRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let name = request.name.trim();
    let email = request.email.trim();
    let message = request.message.trim();
    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(ApiError::BadRequest("All fields are required".to_string()));
    }

    state
        .db
        .insert_feedback(NewFeedback {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
        .await
        .map_err(|e| ApiError::from(e).server_message("Error submitting feedback"))?;

    metrics::counter!("bistro_feedback_total").increment(1);

    Ok(Json(MessageResponse::new("Feedback submitted successfully")))
}

/// GET /api/feedback (Staff only)
async fn list_feedback(
    _staff: RequireStaff,
    State(state): State<AppState>,
) -> Result<Json<Vec<Feedback>>, ApiError> {
    let feedback = state
        .db
        .list_feedback()
        .await
        .map_err(|e| ApiError::from(e).server_message("Error fetching feedback"))?;

    Ok(Json(feedback))
}

/// DELETE /api/feedback/{id} (Manager only)
async fn delete_feedback(
    _manager: RequireManager,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.db.delete_feedback(id).await? {
        return Err(ApiError::NotFound("Feedback not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Feedback deleted successfully")))
}

/// Create feedback routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/feedback", post(submit_feedback).get(list_feedback))
        .route("/feedback/{id}", delete(delete_feedback))
}
