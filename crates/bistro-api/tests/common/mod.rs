#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response, StatusCode};
use bistro_api::{AppState, create_router};
use bistro_auth::HashingConfig;
use bistro_core::{AuthService, AuthServiceConfig, Registration};
use bistro_db::{AccountRole, Database};
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Auth config with a cheap work factor
pub fn test_auth_config() -> AuthServiceConfig {
    AuthServiceConfig {
        jwt_secret: TEST_SECRET.to_string(),
        token_lifetime_secs: 3600,
        hashing: HashingConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        },
    }
}

/// Router over a fresh in-memory database
pub struct TestApp {
    pub state: AppState,
    pub router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = Database::in_memory().await.unwrap();
        let auth = AuthService::new(db.clone(), &test_auth_config()).unwrap();
        let state = AppState::new(db, Arc::new(auth));
        let router = create_router(state.clone(), None);
        Self { state, router }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    /// Send a body verbatim as JSON
    pub async fn raw_request(&self, method: Method, uri: &str, body: &str) -> Response<Body> {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Create an account directly through the service
    pub async fn seed_account(&self, username: &str, email: &str, password: &str, role: AccountRole) {
        self.state
            .auth
            .register(Registration {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                role: Some(role),
            })
            .await
            .unwrap();
    }

    /// Log in over HTTP and return the token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                Method::POST,
                "/api/login",
                None,
                Some(serde_json::json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await["token"]
            .as_str()
            .unwrap()
            .to_string()
    }

    pub async fn manager_token(&self) -> String {
        self.seed_account("Morgan", "morgan@bistro.test", "manager-pass", AccountRole::Manager)
            .await;
        self.login("morgan@bistro.test", "manager-pass").await
    }

    pub async fn operator_token(&self) -> String {
        self.seed_account("Olu", "olu@bistro.test", "operator-pass", AccountRole::Operator)
            .await;
        self.login("olu@bistro.test", "operator-pass").await
    }

    pub async fn user_token(&self) -> String {
        self.seed_account("Uma", "uma@bistro.test", "user-pass", AccountRole::User)
            .await;
        self.login("uma@bistro.test", "user-pass").await
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
