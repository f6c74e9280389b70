//! Role-based routing of the client surfaces
//!
//! After a successful login the router verifies the issued token and picks
//! the surface for the verified role. The `role` field of the login payload
//! is never trusted on its own. Logging out is purely local.

use async_trait::async_trait;
use bistro_auth::TokenIssuer;
use bistro_db::AccountRole;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::types::{LoginResponse, Session};

/// Root surface shown to the account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Guest surface; also hosts the login screen
    User,
    Manager,
    Operator,
}

impl From<AccountRole> for Surface {
    fn from(role: AccountRole) -> Self {
        match role {
            AccountRole::User => Surface::User,
            AccountRole::Manager => Surface::Manager,
            AccountRole::Operator => Surface::Operator,
        }
    }
}

/// Router state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RouterState {
    #[default]
    Unauthenticated,
    Authenticated {
        account_id: i64,
        role: AccountRole,
        token: String,
    },
}

/// Something that can vouch for a session token
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Session, ClientError>;

    /// Drop any locally held credentials
    fn forget(&self) {}
}

/// Local verification with the shared signing secret
#[async_trait]
impl TokenVerifier for TokenIssuer {
    async fn verify(&self, token: &str) -> Result<Session, ClientError> {
        let claims = self.decode(token)?;
        Ok(Session {
            account_id: claims.sub,
            role: claims.role,
        })
    }
}

/// Verification by the server through `GET /api/auth/me`
#[async_trait]
impl TokenVerifier for ApiClient {
    async fn verify(&self, token: &str) -> Result<Session, ClientError> {
        self.me(token).await
    }

    fn forget(&self) {
        self.clear_token();
    }
}

/// Client-side role router
pub struct RoleRouter<V> {
    verifier: V,
    state: RouterState,
}

impl<V: TokenVerifier> RoleRouter<V> {
    pub fn new(verifier: V) -> Self {
        Self {
            verifier,
            state: RouterState::Unauthenticated,
        }
    }

    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    pub fn state(&self) -> &RouterState {
        &self.state
    }

    /// Surface for the current state
    pub fn surface(&self) -> Surface {
        match &self.state {
            RouterState::Unauthenticated => Surface::User,
            RouterState::Authenticated { role, .. } => Surface::from(*role),
        }
    }

    /// Enter the surface for a fresh login
    ///
    /// On any failure the router is left unauthenticated.
    pub async fn on_login(&mut self, login: &LoginResponse) -> Result<Surface, ClientError> {
        self.state = RouterState::Unauthenticated;

        let session = self.verifier.verify(&login.token).await?;
        if session.role != login.role {
            warn!(
                "Login payload role {} disagrees with token role {}",
                login.role, session.role
            );
            return Err(ClientError::RoleMismatch {
                claimed: login.role,
                verified: session.role,
            });
        }

        info!("Routing account {} to the {} surface", session.account_id, session.role);
        self.state = RouterState::Authenticated {
            account_id: session.account_id,
            role: session.role,
            token: login.token.clone(),
        };

        Ok(self.surface())
    }

    /// Clear the local identity and return to the login surface
    pub fn logout(&mut self) -> Surface {
        if let RouterState::Authenticated { account_id, .. } = &self.state {
            debug!("Logging out account {}", account_id);
        }

        self.verifier.forget();
        self.state = RouterState::Unauthenticated;
        Surface::User
    }
}
