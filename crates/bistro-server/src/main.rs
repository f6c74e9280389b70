//! Bistro - Restaurant management API server

use anyhow::{Context, Result};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;

use bistro_api::{AppState, create_router};
use bistro_core::{AuthService, CoreError, Registration};
use bistro_db::{AccountRole, Database};
use config::{BootstrapConfig, Config};

/// Bistro - Restaurant management API server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// Bind address
    #[arg(long, env = "BISTRO_BIND")]
    bind: Option<String>,

    /// Port
    #[arg(short, long, env = "BISTRO_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config)?;

    // Initialize logging
    init_logging(&config.logging.level, &config.logging.format);

    info!("Starting Bistro v{}", env!("CARGO_PKG_VERSION"));

    if config.auth.uses_default_secret() {
        warn!("Using the built-in token signing secret; set JWT_SECRET or auth.jwt_secret");
    }

    // Create the data directory for file-backed SQLite
    if let Some(dir) = sqlite_parent_dir(&config.database.url) {
        tokio::fs::create_dir_all(dir).await?;
    }

    // Initialize database
    let db = Database::new(&config.database.url)
        .await
        .context("Failed to open database")?;

    // Initialize auth service
    let auth = Arc::new(AuthService::new(db.clone(), &config.auth)?);

    // Create the first manager if no accounts exist
    if let Some(bootstrap) = &config.bootstrap {
        seed_manager(&db, &auth, bootstrap).await?;
    }

    // Install Prometheus recorder
    let metrics_handle = if config.server.metrics_enabled {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        Some(Arc::new(handle))
    } else {
        None
    };

    // Create application state
    let state = AppState::new(db, auth);

    // Create router
    let app = create_router(state, metrics_handle)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Determine bind address
    let bind_addr = args.bind.unwrap_or(config.server.bind_address);
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", bind_addr, port).parse()?;

    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Directory holding the database file of a `sqlite:` URL
fn sqlite_parent_dir(url: &str) -> Option<&Path> {
    let path = url.strip_prefix("sqlite:")?;
    let path = path.strip_prefix("//").unwrap_or(path);
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path.starts_with(':') {
        return None;
    }

    Path::new(path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
}

/// Register the bootstrap manager on an empty store
async fn seed_manager(
    db: &Database,
    auth: &AuthService<Database>,
    bootstrap: &BootstrapConfig,
) -> Result<()> {
    if db.has_accounts().await? {
        return Ok(());
    }

    info!("Creating bootstrap manager account");
    let registration = Registration {
        username: bootstrap.username.clone(),
        email: bootstrap.email.clone(),
        password: bootstrap.password.clone(),
        role: Some(AccountRole::Manager),
    };

    match auth.register(registration).await {
        Ok(account) => {
            info!("Bootstrap manager created ({})", account.email);
            Ok(())
        }
        // Another instance seeded the same store first
        Err(CoreError::DuplicateAccount) => Ok(()),
        Err(e) => Err(e).context("Failed to create bootstrap manager"),
    }
}

/// Initialize logging
fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        "json" => registry.with(fmt::layer().json()).init(),
        _ => registry.with(fmt::layer()).init(),
    }
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install CTRL+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_parent_dir() {
        assert_eq!(
            sqlite_parent_dir("sqlite:./data/bistro.db?mode=rwc"),
            Some(Path::new("./data"))
        );
        assert_eq!(
            sqlite_parent_dir("sqlite:///var/lib/bistro/bistro.db"),
            Some(Path::new("/var/lib/bistro"))
        );
        assert_eq!(sqlite_parent_dir("sqlite::memory:"), None);
        assert_eq!(sqlite_parent_dir("sqlite:bistro.db"), None);
        assert_eq!(sqlite_parent_dir("postgres://localhost/bistro"), None);
    }
}
