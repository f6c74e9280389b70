//! Authentication service configuration
//!
//! The server binary deserializes this from the `[auth]` section of its
//! config file and hands it to `AuthService::new`; nothing in the service
//! reads the environment on its own.

use bistro_auth::{DEFAULT_TOKEN_LIFETIME_SECS, HashingConfig};
use serde::{Deserialize, Serialize};

/// Secret used when none is configured; the server warns when it sees it
pub const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

/// Longest session a token may grant (30 days)
pub const MAX_TOKEN_LIFETIME_SECS: i64 = 30 * 24 * 60 * 60;

/// Configuration for the authentication service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthServiceConfig {
    /// HMAC secret for signing session tokens
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Session token lifetime in seconds
    #[serde(default = "default_token_lifetime_secs")]
    pub token_lifetime_secs: i64,
    /// Password hashing work factor
    #[serde(default)]
    pub hashing: HashingConfig,
}

impl AuthServiceConfig {
    /// Whether the signing secret is still the built-in placeholder
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_lifetime_secs: default_token_lifetime_secs(),
            hashing: HashingConfig::default(),
        }
    }
}

fn default_jwt_secret() -> String {
    DEFAULT_JWT_SECRET.to_string()
}

fn default_token_lifetime_secs() -> i64 {
    DEFAULT_TOKEN_LIFETIME_SECS
}
