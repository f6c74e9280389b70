//! Restaurant event routes

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, put},
};
use bistro_db::NewEvent;
use tracing::info;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, RequireManager};
use crate::state::AppState;

use super::types::{EventRequest, EventResponse, MessageResponse};

fn validate(request: EventRequest) -> Result<NewEvent, ApiError> {
    let fields = [
        request.name.trim(),
        request.date.trim(),
        request.time.trim(),
        request.image.trim(),
        request.location.trim(),
    ];
    if fields.iter().any(|f| f.is_empty()) {
        return Err(ApiError::BadRequest("All fields are required".to_string()));
    }
    let [name, date, time, image, location] = fields.map(str::to_string);

    Ok(NewEvent {
        name,
        date,
        time,
        image,
        location,
    })
}

/// GET /api/events
async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<EventResponse>>, ApiError> {
    let events = state
        .db
        .list_events()
        .await
        .map_err(|e| ApiError::from(e).server_message("Error fetching events"))?;

    Ok(Json(events.into_iter().map(EventResponse::from).collect()))
}

/// POST /api/events (Manager only)
async fn create_event(
    _manager: RequireManager,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<EventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), ApiError> {
    let event = state
        .db
        .insert_event(validate(request)?)
        .await
        .map_err(|e| ApiError::from(e).server_message("Error creating event"))?;

    info!("Created event {} ({})", event.id, event.name);

    Ok((StatusCode::CREATED, Json(EventResponse::from(event))))
}

/// PUT /api/events/{id} (Manager only)
async fn update_event(
    _manager: RequireManager,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<EventRequest>,
) -> Result<Json<EventResponse>, ApiError> {
    let event = state
        .db
        .update_event(id, validate(request)?)
        .await
        .map_err(|e| ApiError::from(e).server_message("Error updating event"))?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    Ok(Json(EventResponse::from(event)))
}

/// DELETE /api/events/{id} (Manager only)
async fn delete_event(
    _manager: RequireManager,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.db.delete_event(id).await? {
        return Err(ApiError::NotFound("Event not found".to_string()));
    }

    info!("Deleted event {}", id);

    Ok(Json(MessageResponse::new("Event deleted successfully")))
}

/// Create event routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/{id}", put(update_event).delete(delete_event))
}
