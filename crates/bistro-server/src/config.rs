//! Configuration loading and management

use anyhow::{Context, Result};
use bistro_core::AuthServiceConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Environment variable overriding `database.url`
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Environment variable overriding `auth.jwt_secret`
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthServiceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Manager account created when the store has no accounts yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootstrap: Option<BootstrapConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Expose Prometheus metrics on `/metrics`
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            metrics_enabled: default_metrics_enabled(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Initial manager account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}

// Default value functions
fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_metrics_enabled() -> bool {
    true
}

fn default_database_url() -> String {
    "sqlite:./data/bistro.db?mode=rwc".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Config {
    /// Load from a TOML file, then apply environment overrides
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load(path: &str) -> Result<Self> {
        let config_path = Path::new(path);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            let config = Self::from_toml(&content)
                .with_context(|| format!("Failed to parse config file: {}", path))?;
            info!("Loaded configuration from {}", path);
            config
        } else {
            info!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `DATABASE_URL` and `JWT_SECRET` style overrides
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup(DATABASE_URL_ENV) {
            info!("Using database URL from {}", DATABASE_URL_ENV);
            self.database.url = url;
        }
        if let Some(secret) = lookup(JWT_SECRET_ENV) {
            info!("Using token signing secret from {}", JWT_SECRET_ENV);
            self.auth.jwt_secret = secret;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.url, "sqlite:./data/bistro.db?mode=rwc");
        assert_eq!(config.auth.token_lifetime_secs, 3600);
        assert!(config.auth.uses_default_secret());
        assert!(config.bootstrap.is_none());
    }

    #[test]
    fn test_parses_all_sections() {
        let config = Config::from_toml(
            r#"
            [server]
            bind_address = "127.0.0.1"
            port = 8080
            metrics_enabled = false

            [database]
            url = "sqlite::memory:"

            [auth]
            jwt_secret = "s3cret"
            token_lifetime_secs = 600

            [auth.hashing]
            memory_kib = 8192
            iterations = 3

            [logging]
            level = "debug"
            format = "json"

            [bootstrap]
            username = "Morgan"
            email = "morgan@bistro.test"
            password = "first-login"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.bind_address, "127.0.0.1");
        assert!(!config.server.metrics_enabled);
        assert_eq!(config.auth.token_lifetime_secs, 600);
        assert_eq!(config.auth.hashing.memory_kib, 8192);
        assert_eq!(config.auth.hashing.iterations, 3);
        assert!(!config.auth.uses_default_secret());
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.bootstrap.unwrap().email, "morgan@bistro.test");
    }

    #[test]
    fn test_environment_overrides() {
        let env: HashMap<&str, &str> = [
            (DATABASE_URL_ENV, "sqlite:/var/lib/bistro.db"),
            (JWT_SECRET_ENV, "from-env"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.database.url, "sqlite:/var/lib/bistro.db");
        assert_eq!(config.auth.jwt_secret, "from-env");
    }

    #[test]
    fn test_blank_overrides_are_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|_| Some("  ".to_string()));
        assert!(config.auth.uses_default_secret());
    }
}
