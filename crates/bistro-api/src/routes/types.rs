//! Request/Response DTOs
//!
//! Request fields default to empty so that a missing field reaches the
//! handler's validation and comes back as a `400 {error}` instead of a
//! deserialization rejection.

use bistro_db::{Account, AccountRole, Event, FoodItem};
use serde::{Deserialize, Serialize};

// ==================== Auth Types ====================

/// Registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub role: AccountRole,
    pub expires_in: i64,
}

/// Verified session
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: i64,
    pub role: AccountRole,
}

/// Plain acknowledgement
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ==================== Account Types ====================

/// Account response (without password hash)
#[derive(Debug, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: AccountRole,
    pub created_at: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            role: account.role,
            created_at: account.created_at.to_rfc3339(),
        }
    }
}

/// Account list filter
#[derive(Debug, Deserialize, Default)]
pub struct AccountsQuery {
    #[serde(default)]
    pub role: Option<String>,
}

// ==================== Menu Types ====================

/// Create or replace a menu item
#[derive(Debug, Deserialize)]
pub struct FoodItemRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
}

/// Menu item response
#[derive(Debug, Serialize, Deserialize)]
pub struct FoodItemResponse {
    pub id: i64,
    pub name: String,
    pub rating: f64,
    pub category: String,
    pub image: String,
}

impl From<FoodItem> for FoodItemResponse {
    fn from(item: FoodItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            rating: item.rating,
            category: item.category,
            image: item.image,
        }
    }
}

// ==================== Reservation Types ====================

/// Create a reservation
#[derive(Debug, Deserialize)]
pub struct ReservationRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub guests: i64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
}

/// Response to a new booking
#[derive(Debug, Serialize, Deserialize)]
pub struct ReservationCreatedResponse {
    pub message: String,
    pub reservation: bistro_db::Reservation,
}

/// Response to an approve/reject decision
#[derive(Debug, Serialize, Deserialize)]
pub struct ReservationDecisionResponse {
    pub message: String,
    #[serde(rename = "updatedReservation")]
    pub updated_reservation: bistro_db::Reservation,
}

// ==================== Feedback Types ====================

/// Submit feedback
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "feedback")]
    pub message: String,
}

// ==================== Event Types ====================

/// Create or replace an event
#[derive(Debug, Deserialize)]
pub struct EventRequest {
    #[serde(default, alias = "eventname")]
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub location: String,
}

/// Event response
#[derive(Debug, Serialize, Deserialize)]
pub struct EventResponse {
    pub id: i64,
    pub name: String,
    pub date: String,
    pub time: String,
    pub image: String,
    pub location: String,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            name: event.name,
            date: event.date,
            time: event.time,
            image: event.image,
            location: event.location,
        }
    }
}
