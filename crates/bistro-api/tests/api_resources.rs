//! Menu, reservation, feedback and event resources

mod common;

use axum::http::{Method, StatusCode};
use common::{TestApp, body_json};
use serde_json::json;

#[tokio::test]
async fn menu_is_public_to_read_and_managed_by_managers() {
    let app = TestApp::new().await;
    let manager = app.manager_token().await;
    let operator = app.operator_token().await;
    let item = json!({
        "name": "Mushroom Risotto",
        "rating": 4.5,
        "category": "Mains",
        "image": "https://img.example/risotto.jpg"
    });

    let response = app
        .request(Method::POST, "/api/food-items", Some(&operator), Some(item.clone()))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .request(Method::POST, "/api/food-items", Some(&manager), Some(item))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = app
        .request(
            Method::POST,
            "/api/food-items",
            Some(&manager),
            Some(json!({ "name": "Soup" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Missing required fields" })
    );

    let response = app
        .request(
            Method::PUT,
            &format!("/api/food-items/{}", id),
            Some(&manager),
            Some(json!({
                "name": "Mushroom Risotto",
                "rating": 4.8,
                "category": "Mains",
                "image": "https://img.example/risotto.jpg"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["rating"], 4.8);

    let response = app.request(Method::GET, "/api/food-items", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = app
        .request(
            Method::DELETE,
            &format!("/api/food-items/{}", id),
            Some(&manager),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(
            Method::DELETE,
            &format!("/api/food-items/{}", id),
            Some(&manager),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn guests_book_and_staff_decide() {
    let app = TestApp::new().await;
    let operator = app.operator_token().await;
    let user = app.user_token().await;

    let response = app
        .request(
            Method::POST,
            "/api/reserve",
            None,
            Some(json!({
                "name": "Dana",
                "phone": "555-0102",
                "email": "dana@x.io",
                "guests": 4,
                "date": "2026-11-02",
                "time": "19:30"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Reservation confirmed");
    assert_eq!(body["reservation"]["status"], "pending");
    let id = body["reservation"]["id"].as_i64().unwrap();

    let response = app
        .request(Method::GET, "/api/reserve", Some(&user), None)
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .request(Method::GET, "/api/reserve", Some(&operator), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = app
        .request(
            Method::PUT,
            &format!("/api/bookings/{}/approve", id),
            Some(&operator),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Reservation approved");
    assert_eq!(body["updatedReservation"]["status"], "approved");

    let response = app
        .request(
            Method::PUT,
            &format!("/api/reserve/{}/reject", id),
            Some(&operator),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["updatedReservation"]["status"],
        "rejected"
    );

    let response = app
        .request(Method::PUT, "/api/bookings/999/reject", Some(&operator), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .request(
            Method::DELETE,
            &format!("/api/reserve/{}", id),
            Some(&operator),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn reservations_are_validated() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/reserve",
            None,
            Some(json!({
                "name": "Dana",
                "phone": "555-0102",
                "guests": 0,
                "date": "2026-11-02",
                "time": "19:30"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn feedback_is_submitted_publicly_and_read_by_staff() {
    let app = TestApp::new().await;
    let operator = app.operator_token().await;

    let response = app
        .request(
            Method::POST,
            "/api/feedback",
            None,
            Some(json!({ "name": "Eli", "email": "eli@x.io" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "All fields are required" })
    );

    let response = app
        .request(
            Method::POST,
            "/api/feedback",
            None,
            Some(json!({ "name": "Eli", "email": "eli@x.io", "feedback": "Lovely risotto" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "Feedback submitted successfully" })
    );

    let response = app.request(Method::GET, "/api/feedback", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .request(Method::GET, "/api/feedback", Some(&operator), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let feedback = body_json(response).await;
    assert_eq!(feedback[0]["message"], "Lovely risotto");

    let id = feedback[0]["id"].as_i64().unwrap();
    let response = app
        .request(
            Method::DELETE,
            &format!("/api/feedback/{}", id),
            Some(&operator),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn events_are_listed_publicly() {
    let app = TestApp::new().await;
    let manager = app.manager_token().await;

    let response = app
        .request(
            Method::POST,
            "/api/events",
            Some(&manager),
            Some(json!({
                "eventname": "Jazz Night",
                "date": "2026-12-05",
                "time": "20:00",
                "image": "https://img.example/jazz.jpg",
                "location": "Terrace"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = app
        .request(
            Method::PUT,
            &format!("/api/events/{}", id),
            Some(&manager),
            Some(json!({
                "name": "Jazz Night",
                "date": "2026-12-06",
                "time": "20:00",
                "image": "https://img.example/jazz.jpg",
                "location": "Terrace"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.request(Method::GET, "/api/events", None, None).await;
    let events = body_json(response).await;
    assert_eq!(events[0]["name"], "Jazz Night");
    assert_eq!(events[0]["date"], "2026-12-06");
}
