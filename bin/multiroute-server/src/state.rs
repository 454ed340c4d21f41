//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use multiroute_core::{AiService, ChatBackend, ModelRouter};

use crate::config::Config;

/// State shared across all HTTP handlers. Nothing in here is mutable.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Task → model routing table.
    pub router: Arc<ModelRouter>,
    /// Task handlers bound to the shared backend client.
    pub ai: Arc<AiService>,
}

impl AppState {
    /// Wire the routing table and `backend` into the task handlers.
    pub fn new(config: Config, backend: Arc<dyn ChatBackend>) -> Self {
        let router = Arc::new(ModelRouter::new(config.models.clone()));
        let ai = Arc::new(AiService::new(backend, Arc::clone(&router)));
        Self {
            config: Arc::new(config),
            router,
            ai,
        }
    }
}
