//! Application state

use bistro_auth::TokenIssuer;
use bistro_core::AuthService;
use bistro_db::Database;
use std::sync::Arc;

/// Prometheus render handle
pub type MetricsHandle = metrics_exporter_prometheus::PrometheusHandle;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub auth: Arc<AuthService<Database>>,
    pub issuer: Arc<TokenIssuer>,
}

impl AppState {
    pub fn new(db: Database, auth: Arc<AuthService<Database>>) -> Self {
        let issuer = auth.issuer();
        Self { db, auth, issuer }
    }
}
