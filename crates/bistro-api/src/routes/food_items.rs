//! Menu routes

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, put},
};
use bistro_db::NewFoodItem;
use tracing::info;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, RequireManager};
use crate::state::AppState;

use super::types::{FoodItemRequest, FoodItemResponse, MessageResponse};

/// Ratings are on a five-star scale
const MAX_RATING: f64 = 5.0;

fn validate(request: FoodItemRequest) -> Result<NewFoodItem, ApiError> {
    let name = request.name.trim();
    let category = request.category.trim();
    let image = request.image.trim();

    let rating = match request.rating {
        Some(r) if !name.is_empty() && !category.is_empty() && !image.is_empty() => r,
        _ => return Err(ApiError::BadRequest("Missing required fields".to_string())),
    };
    if !(0.0..=MAX_RATING).contains(&rating) {
        return Err(ApiError::BadRequest(format!(
            "Rating must be between 0 and {}",
            MAX_RATING
        )));
    }

    Ok(NewFoodItem {
        name: name.to_string(),
        rating,
        category: category.to_string(),
        image: image.to_string(),
    })
}

/// GET /api/food-items
async fn list_food_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<FoodItemResponse>>, ApiError> {
    let items = state
        .db
        .list_food_items()
        .await
        .map_err(|e| ApiError::from(e).server_message("Error fetching food items"))?;

    Ok(Json(items.into_iter().map(FoodItemResponse::from).collect()))
}

/// POST /api/food-items (Manager only)
async fn create_food_item(
    _manager: RequireManager,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<FoodItemRequest>,
) -> Result<(StatusCode, Json<FoodItemResponse>), ApiError> {
    let item = validate(request)?;
    let item = state
        .db
        .insert_food_item(item)
        .await
        .map_err(|e| ApiError::from(e).server_message("Error adding food item"))?;

    info!("Added food item {} ({})", item.id, item.name);

    Ok((StatusCode::CREATED, Json(FoodItemResponse::from(item))))
}

/// PUT /api/food-items/{id} (Manager only)
async fn update_food_item(
    _manager: RequireManager,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<FoodItemRequest>,
) -> Result<Json<FoodItemResponse>, ApiError> {
    let item = validate(request)?;

    let updated = state
        .db
        .update_food_item(id, item)
        .await
        .map_err(|e| ApiError::from(e).server_message("Error updating food item"))?;
    if !updated {
        return Err(ApiError::NotFound("Food item not found".to_string()));
    }

    let item = state
        .db
        .get_food_item(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Food item not found".to_string()))?;

    Ok(Json(FoodItemResponse::from(item)))
}

/// DELETE /api/food-items/{id} (Manager only)
async fn delete_food_item(
    _manager: RequireManager,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state
        .db
        .delete_food_item(id)
        .await
        .map_err(|e| ApiError::from(e).server_message("Error deleting food item"))?;

    if !deleted {
        return Err(ApiError::NotFound("Food item not found".to_string()));
    }

    info!("Deleted food item {}", id);

    Ok(Json(MessageResponse::new("Food item deleted successfully")))
}

/// Create menu routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/food-items", get(list_food_items).post(create_food_item))
        .route(
            "/food-items/{id}",
            put(update_food_item).delete(delete_food_item),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, rating: Option<f64>) -> FoodItemRequest {
        FoodItemRequest {
            name: name.to_string(),
            rating,
            category: "Mains".to_string(),
            image: "https://img.example/risotto.jpg".to_string(),
        }
    }

    #[test]
    fn test_validate_requires_all_fields() {
        let err = validate(request("", Some(4.0))).unwrap_err();
        assert_eq!(err.to_string(), "Bad request: Missing required fields");

        let err = validate(request("Risotto", None)).unwrap_err();
        assert_eq!(err.to_string(), "Bad request: Missing required fields");
    }

    #[test]
    fn test_validate_rating_range() {
        assert!(validate(request("Risotto", Some(5.5))).is_err());
        assert!(validate(request("Risotto", Some(-1.0))).is_err());

        let item = validate(request("  Risotto ", Some(4.5))).unwrap();
        assert_eq!(item.name, "Risotto");
        assert_eq!(item.rating, 4.5);
    }
}
