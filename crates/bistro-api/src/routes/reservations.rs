//! Table reservation routes

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post, put},
};
use bistro_db::{NewReservation, Reservation, ReservationStatus};
use tracing::info;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, RequireStaff};
use crate::state::AppState;

use super::types::{
    MessageResponse, ReservationCreatedResponse, ReservationDecisionResponse, ReservationRequest,
};

/// Largest party accepted for a single booking
const MAX_GUESTS: i64 = 50;

fn validate(request: ReservationRequest) -> Result<NewReservation, ApiError> {
    let name = request.name.trim();
    let phone = request.phone.trim();
    let date = request.date.trim();
    let time = request.time.trim();

    if name.is_empty() || phone.is_empty() || date.is_empty() || time.is_empty() {
        return Err(ApiError::BadRequest("All fields are required".to_string()));
    }
    if !(1..=MAX_GUESTS).contains(&request.guests) {
        return Err(ApiError::BadRequest(format!(
            "Number of guests must be between 1 and {}",
            MAX_GUESTS
        )));
    }

    let email = request
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty());

    Ok(NewReservation {
        name: name.to_string(),
        phone: phone.to_string(),
        email,
        guests: request.guests,
        date: date.to_string(),
        time: time.to_string(),
    })
}

/// POST /api/reserve
async fn create_reservation(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ReservationRequest>,
) -> Result<Json<ReservationCreatedResponse>, ApiError> {
    let reservation = validate(request)?;
    let reservation = state
        .db
        .insert_reservation(reservation)
        .await
        .map_err(|e| ApiError::from(e).server_message("Error creating reservation"))?;

    info!(
        "Reservation {} created for {} guests on {} {}",
        reservation.id, reservation.guests, reservation.date, reservation.time
    );
    metrics::counter!("bistro_reservations_total").increment(1);

    Ok(Json(ReservationCreatedResponse {
        message: "Reservation confirmed".to_string(),
        reservation,
    }))
}

/// GET /api/reserve (Staff only)
async fn list_reservations(
    _staff: RequireStaff,
    State(state): State<AppState>,
) -> Result<Json<Vec<Reservation>>, ApiError> {
    let reservations = state
        .db
        .list_reservations()
        .await
        .map_err(|e| ApiError::from(e).server_message("Error fetching reservations"))?;

    Ok(Json(reservations))
}

/// GET /api/reserve/{id} (Staff only)
async fn get_reservation(
    _staff: RequireStaff,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Reservation>, ApiError> {
    let reservation = state
        .db
        .get_reservation(id)
        .await
        .map_err(|e| ApiError::from(e).server_message("Error fetching reservation"))?
        .ok_or_else(|| ApiError::NotFound("Reservation not found".to_string()))?;

    Ok(Json(reservation))
}

/// DELETE /api/reserve/{id} (Staff only)
async fn delete_reservation(
    _staff: RequireStaff,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state
        .db
        .delete_reservation(id)
        .await
        .map_err(|e| ApiError::from(e).server_message("Error deleting reservation"))?;

    if !deleted {
        return Err(ApiError::NotFound("Reservation not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Reservation deleted successfully")))
}

async fn decide(
    state: &AppState,
    staff_id: i64,
    id: i64,
    status: ReservationStatus,
) -> Result<Json<ReservationDecisionResponse>, ApiError> {
    let reservation = state
        .db
        .set_reservation_status(id, status)
        .await
        .map_err(|e| ApiError::from(e).server_message("Error updating reservation"))?
        .ok_or_else(|| ApiError::NotFound("Reservation not found".to_string()))?;

    info!(
        "Account {} marked reservation {} as {}",
        staff_id,
        id,
        status.as_str()
    );

    Ok(Json(ReservationDecisionResponse {
        message: format!("Reservation {}", status.as_str()),
        updated_reservation: reservation,
    }))
}

/// PUT /api/bookings/{id}/approve, /api/reserve/{id}/approve (Staff only)
async fn approve_reservation(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ReservationDecisionResponse>, ApiError> {
    decide(&state, staff.id, id, ReservationStatus::Approved).await
}

/// PUT /api/bookings/{id}/reject, /api/reserve/{id}/reject (Staff only)
async fn reject_reservation(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ReservationDecisionResponse>, ApiError> {
    decide(&state, staff.id, id, ReservationStatus::Rejected).await
}

/// Create reservation routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reserve", post(create_reservation).get(list_reservations))
        .route(
            "/reserve/{id}",
            get(get_reservation).delete(delete_reservation),
        )
        .route("/bookings/{id}/approve", put(approve_reservation))
        .route("/bookings/{id}/reject", put(reject_reservation))
        // Operator screens address decisions under /reserve
        .route("/reserve/{id}/approve", put(approve_reservation))
        .route("/reserve/{id}/reject", put(reject_reservation))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(guests: i64) -> ReservationRequest {
        ReservationRequest {
            name: "Dana".to_string(),
            phone: "555-0102".to_string(),
            email: Some("   ".to_string()),
            guests,
            date: "2026-11-02".to_string(),
            time: "19:30".to_string(),
        }
    }

    #[test]
    fn test_validate_guest_count() {
        assert!(validate(request(0)).is_err());
        assert!(validate(request(MAX_GUESTS + 1)).is_err());
        assert!(validate(request(4)).is_ok());
    }

    #[test]
    fn test_blank_email_is_dropped() {
        let reservation = validate(request(2)).unwrap();
        assert_eq!(reservation.email, None);
    }

    #[test]
    fn test_missing_fields() {
        let mut req = request(2);
        req.phone = String::new();
        let err = validate(req).unwrap_err();
        assert_eq!(err.to_string(), "Bad request: All fields are required");
    }
}
