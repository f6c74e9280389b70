//! Authentication service
//!
//! Registration validates the request, hashes the password and persists the
//! account. Login looks the account up by email, verifies the password and
//! issues a session token. Both paths report failures through `CoreError`;
//! unknown emails and wrong passwords are reported identically.

use bistro_auth::{AuthUser, PasswordHasher, TokenIssuer};
use bistro_db::{Account, AccountRole, NewAccount};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{AuthServiceConfig, MAX_TOKEN_LIFETIME_SECS};
use crate::error::CoreError;
use crate::store::AccountStore;

/// Maximum allowed username length
const MAX_USERNAME_LENGTH: usize = 64;
/// Maximum allowed email length
const MAX_EMAIL_LENGTH: usize = 254;
/// Maximum allowed password length (bounds hashing work per request)
const MAX_PASSWORD_LENGTH: usize = 256;

/// Registration input
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Defaults to `user` when absent
    pub role: Option<AccountRole>,
}

/// Successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub account_id: i64,
    pub role: AccountRole,
    pub token: String,
    pub expires_in: i64,
}

/// Orchestrates registration and login over an account store
pub struct AuthService<S> {
    store: S,
    hasher: PasswordHasher,
    issuer: Arc<TokenIssuer>,
    /// Hash verified against when the email is unknown, so both login
    /// failure paths pay for one verification
    dummy_hash: String,
}

impl<S: AccountStore> AuthService<S> {
    /// Create a new authentication service
    pub fn new(store: S, config: &AuthServiceConfig) -> Result<Self, CoreError> {
        if !(1..=MAX_TOKEN_LIFETIME_SECS).contains(&config.token_lifetime_secs) {
            return Err(CoreError::Validation(format!(
                "Token lifetime must be between 1 and {} seconds, got {}",
                MAX_TOKEN_LIFETIME_SECS, config.token_lifetime_secs
            )));
        }

        let hasher = PasswordHasher::new(config.hashing)?;
        let dummy_hash = hasher.hash("bistro-dummy-password")?;
        let issuer = Arc::new(TokenIssuer::new(
            &config.jwt_secret,
            config.token_lifetime_secs,
        ));

        info!(
            "Initializing auth service (token lifetime: {}s, argon2 m={} t={} p={})",
            config.token_lifetime_secs,
            config.hashing.memory_kib,
            config.hashing.iterations,
            config.hashing.parallelism
        );

        Ok(Self {
            store,
            hasher,
            issuer,
            dummy_hash,
        })
    }

    /// Token issuer shared with the HTTP layer
    pub fn issuer(&self) -> Arc<TokenIssuer> {
        self.issuer.clone()
    }

    /// Register a new account
    ///
    /// No token is issued; the caller logs in separately.
    pub async fn register(&self, registration: Registration) -> Result<Account, CoreError> {
        let username = registration.username.trim();
        let email = registration.email.trim();
        validate_username(username)?;
        validate_email(email)?;
        validate_password(&registration.password)?;

        if self.store.find_by_email(email).await?.is_some() {
            debug!("Registration rejected, email already registered: {}", email);
            return Err(CoreError::DuplicateAccount);
        }

        let password_hash = self.hash_blocking(registration.password).await?;
        let role = registration.role.unwrap_or_default();

        let account = self
            .store
            .insert(NewAccount {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                role,
            })
            .await
            .map_err(|e| {
                warn!("Failed to persist account {}: {}", email, e);
                CoreError::from(e)
            })?;

        info!("Registered account {} ({})", account.id, account.role);
        Ok(account)
    }

    /// Verify credentials and issue a session token
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, CoreError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(CoreError::Validation(
                "Email and password are required".to_string(),
            ));
        }
        if password.len() > MAX_PASSWORD_LENGTH {
            return Err(CoreError::InvalidCredentials);
        }

        debug!("Login attempt for {}", email);

        let account = self.store.find_by_email(email).await?;
        let hash = match &account {
            Some(a) => a.password_hash.clone(),
            None => self.dummy_hash.clone(),
        };
        let valid = self.verify_blocking(password.to_string(), hash).await?;

        let account = match (account, valid) {
            (Some(a), true) => a,
            _ => {
                debug!("Login failed for {}", email);
                return Err(CoreError::InvalidCredentials);
            }
        };

        let token = self.issuer.issue(account.id, account.role)?;
        info!("Account {} logged in ({})", account.id, account.role);

        Ok(LoginOutcome {
            account_id: account.id,
            role: account.role,
            token,
            expires_in: self.issuer.lifetime_secs(),
        })
    }

    /// Verify a session token
    pub fn authenticate(&self, token: &str) -> Result<AuthUser, CoreError> {
        let claims = self.issuer.decode(token)?;
        Ok(AuthUser::from_claims(&claims))
    }

    async fn hash_blocking(&self, password: String) -> Result<String, CoreError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| CoreError::Internal(format!("Task join error: {}", e)))?
            .map_err(CoreError::from)
    }

    async fn verify_blocking(&self, password: String, hash: String) -> Result<bool, CoreError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| CoreError::Internal(format!("Task join error: {}", e)))?
            .map_err(CoreError::from)
    }
}

// ==================== Input Validation ====================

fn validate_username(username: &str) -> Result<(), CoreError> {
    if username.is_empty() {
        return Err(CoreError::Validation("Username is required".to_string()));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Username exceeds maximum length of {} characters",
            MAX_USERNAME_LENGTH
        )));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.is_empty() {
        return Err(CoreError::Validation("Email is required".to_string()));
    }
    if email.len() > MAX_EMAIL_LENGTH || !looks_like_email(email) {
        return Err(CoreError::Validation(
            "Please enter a valid email".to_string(),
        ));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), CoreError> {
    // Passwords are taken verbatim, spaces included
    if password.is_empty() {
        return Err(CoreError::Validation("Password is required".to_string()));
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password exceeds maximum length of {} characters",
            MAX_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

/// `local@domain` with no whitespace; single-label domains such as
/// `localhost` are accepted
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
