//! Bistro HTTP API client

use bistro_db::AccountRole;
use parking_lot::RwLock;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::ClientError;
use crate::types::{
    AccountSummary, ErrorBody, LoginRequest, LoginResponse, MessageBody, RegisterRequest, Session,
};

/// Client configuration
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the Bistro server, without the `/api` suffix
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }
}

/// Bistro API client
///
/// Holds the session token of the last successful login and attaches it
/// to authenticated calls.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        info!("Created Bistro API client for {}", base_url);

        Ok(Self {
            base_url,
            client,
            token: Arc::new(RwLock::new(None)),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// Current session token, if logged in
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Use an existing session token
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    /// Forget the session token
    pub fn clear_token(&self) {
        *self.token.write() = None;
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let token = self.token().ok_or(ClientError::NotAuthenticated)?;
        Ok(request.bearer_auth(token))
    }

    /// Register an account
    ///
    /// Staff roles are only accepted when the client is logged in as a
    /// manager, so the stored token is sent for those alone.
    pub async fn register(&self, request: &RegisterRequest) -> Result<String, ClientError> {
        let builder = self.client.post(self.url("/register")).json(request);

        let body: MessageBody = match request.role {
            Some(role) if role != AccountRole::User => {
                self.send_authorized(self.authorized(builder)?).await?
            }
            _ => decode(builder.send().await?).await?,
        };
        Ok(body.message)
    }

    /// Log in and keep the issued token
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        debug!("Logging in as {}", email);

        let response = self
            .client
            .post(self.url("/login"))
            .json(&LoginRequest { email, password })
            .send()
            .await?;
        let login: LoginResponse = decode(response).await?;

        self.set_token(login.token.clone());
        Ok(login)
    }

    /// Ask the server who a token belongs to
    pub async fn me(&self, token: &str) -> Result<Session, ClientError> {
        let response = self
            .client
            .get(self.url("/auth/me"))
            .bearer_auth(token)
            .send()
            .await?;
        decode(response).await
    }

    /// List accounts, optionally narrowed to one role (staff only)
    pub async fn list_users(
        &self,
        role: Option<AccountRole>,
    ) -> Result<Vec<AccountSummary>, ClientError> {
        let mut request = self.client.get(self.url("/users"));
        if let Some(role) = role {
            request = request.query(&[("role", role.as_str())]);
        }

        self.send_authorized(self.authorized(request)?).await
    }

    /// Delete an account (manager only)
    pub async fn delete_user(&self, id: i64) -> Result<String, ClientError> {
        let request = self.client.delete(self.url(&format!("/users/{}", id)));
        let body: MessageBody = self.send_authorized(self.authorized(request)?).await?;
        Ok(body.message)
    }

    /// Send a request carrying the stored token
    ///
    /// A 401 means the server no longer accepts the token, so it is dropped
    /// and later public calls go out anonymously.
    async fn send_authorized<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let result = decode(request.send().await?).await;
        if let Err(ClientError::Api { status: 401, .. }) = &result {
            debug!("Session token rejected, clearing it");
            self.clear_token();
        }
        result
    }
}

/// Decode a success body, or turn an `{error}` body into `ClientError::Api`
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|b| b.error)
            .unwrap_or(text);
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = ApiClient::new(ClientConfig::new("http://localhost:8080/")).unwrap();
        assert_eq!(client.url("/login"), "http://localhost:8080/api/login");
    }

    #[test]
    fn test_token_storage() {
        let client = ApiClient::new(ClientConfig::new("http://localhost:8080")).unwrap();
        assert!(client.token().is_none());

        client.set_token("abc");
        assert_eq!(client.token().as_deref(), Some("abc"));

        // Clones share the session
        let other = client.clone();
        other.clear_token();
        assert!(client.token().is_none());
    }
}
