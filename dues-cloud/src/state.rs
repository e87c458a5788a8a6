//! Application state

use std::sync::Arc;

use crate::config::Config;
use crate::db::{MemoryStore, PgStore, Store};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Ledger storage
    pub store: Arc<dyn Store>,
    /// "postgres" or "memory"
    pub store_kind: &'static str,
    /// JWT secret for bearer authentication
    pub jwt_secret: String,
}

impl AppState {
    /// State backed by a fresh in-memory store
    pub fn in_memory(jwt_secret: impl Into<String>) -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            store_kind: "memory",
            jwt_secret: jwt_secret.into(),
        }
    }

    /// Create a new AppState
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let Some(url) = &config.database_url else {
            tracing::warn!("DATABASE_URL not set, using in-memory store (data is not persisted)");
            return Ok(Self::in_memory(config.jwt_secret.clone()));
        };

        let store = PgStore::connect(url, config.db_max_connections).await?;
        Ok(Self {
            store: Arc::new(store),
            store_kind: "postgres",
            jwt_secret: config.jwt_secret.clone(),
        })
    }
}
