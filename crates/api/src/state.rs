use std::sync::Arc;

use crate::config::ServerConfig;
use crate::engine::AllocationEngine;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: donation_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Allocation engine configured with the server's policy.
    pub engine: AllocationEngine,
}

impl AppState {
    pub fn new(pool: donation_db::DbPool, config: ServerConfig) -> Self {
        let engine = AllocationEngine::new(config.allocation_policy);
        Self {
            pool,
            config: Arc::new(config),
            engine,
        }
    }
}
