//! Server-side role checks on privileged routes

mod common;

use axum::http::{Method, StatusCode};
use bistro_db::AccountRole;
use common::{TestApp, body_json};
use serde_json::json;

#[tokio::test]
async fn self_registration_cannot_claim_a_staff_role() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/register",
            None,
            Some(json!({
                "username": "mallory",
                "email": "mallory@x.io",
                "password": "p1",
                "role": "manager"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(!app.state.db.has_accounts().await.unwrap());

    // Asking for the default role explicitly is fine
    let response = app
        .request(
            Method::POST,
            "/api/register",
            None,
            Some(json!({
                "username": "bob",
                "email": "bob@x.io",
                "password": "p1",
                "role": "user"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn manager_registers_an_operator() {
    let app = TestApp::new().await;
    let manager = app.manager_token().await;

    let response = app
        .request(
            Method::POST,
            "/api/register",
            Some(&manager),
            Some(json!({
                "username": "op1",
                "email": "op1@x.io",
                "password": "p2",
                "role": "operator"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .request(
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "email": "op1@x.io", "password": "p2" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["role"], "operator");
}

#[tokio::test]
async fn register_operator_requires_a_manager() {
    let app = TestApp::new().await;
    let operator = app.operator_token().await;
    let body = json!({ "username": "op2", "email": "op2@x.io", "password": "p3" });

    let response = app
        .request(Method::POST, "/api/register-operator", None, Some(body.clone()))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .request(
            Method::POST,
            "/api/register-operator",
            Some(&operator),
            Some(body.clone()),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let manager = app.manager_token().await;
    let response = app
        .request(
            Method::POST,
            "/api/register-operator",
            Some(&manager),
            Some(body),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let account = app
        .state
        .db
        .get_account_by_email("op2@x.io")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(account.role, AccountRole::Operator);
}

#[tokio::test]
async fn listing_accounts_is_staff_only() {
    let app = TestApp::new().await;
    let user = app.user_token().await;
    let operator = app.operator_token().await;

    let response = app.request(Method::GET, "/api/users", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .request(Method::GET, "/api/users", Some(&user), None)
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await, json!({ "error": "Forbidden" }));

    let response = app
        .request(Method::GET, "/api/users", Some(&operator), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let accounts = body_json(response).await;
    let accounts = accounts.as_array().unwrap();
    assert_eq!(accounts.len(), 2);
    assert!(accounts.iter().all(|a| a.get("password_hash").is_none()));

    let response = app
        .request(Method::GET, "/api/users?role=operator", Some(&operator), None)
        .await;
    let accounts = body_json(response).await;
    assert_eq!(accounts.as_array().unwrap().len(), 1);
    assert_eq!(accounts[0]["email"], "olu@bistro.test");

    let response = app
        .request(Method::GET, "/api/users?role=chef", Some(&operator), None)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_accounts_is_manager_only() {
    let app = TestApp::new().await;
    let operator = app.operator_token().await;
    let manager = app.manager_token().await;
    let target = app
        .state
        .db
        .get_account_by_email("olu@bistro.test")
        .await
        .unwrap()
        .unwrap();
    let uri = format!("/api/users/{}", target.id);

    let response = app
        .request(Method::DELETE, &uri, Some(&operator), None)
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .request(Method::DELETE, &uri, Some(&manager), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "User deleted successfully" })
    );

    let response = app
        .request(Method::DELETE, &uri, Some(&manager), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "User not found" })
    );
}

#[tokio::test]
async fn a_non_numeric_id_is_a_json_bad_request() {
    let app = TestApp::new().await;
    let manager = app.manager_token().await;

    let response = app
        .request(Method::DELETE, "/api/users/abc", Some(&manager), None)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["content-type"], "application/json");
    assert!(body_json(response).await["error"].is_string());

    let response = app
        .request(Method::PUT, "/api/bookings/x/approve", Some(&manager), None)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn a_malformed_authorization_header_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::GET, "/api/users", Some("not-a-jwt"), None)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_json(response).await["error"].is_string());
}
