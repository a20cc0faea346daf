use crate::config::ServerConfig;
use catalog::{Catalog, ProductStore};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Catalog service (shared across requests)
    pub catalog: Arc<Catalog>,

    /// Prometheus handle, present when a recorder was installed
    pub metrics: Option<PrometheusHandle>,
}

impl ServerState {
    /// Create state backed by the store named in the configuration
    pub fn new(config: ServerConfig) -> Self {
        let store = config.store_config().build();
        Self::with_store(config, store)
    }

    /// Create state over an explicit store
    pub fn with_store(config: ServerConfig, store: Arc<dyn ProductStore>) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(Catalog::new(store)),
            metrics: None,
        }
    }

    /// Attach an installed Prometheus recorder
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Server metadata for health checks
#[derive(Debug, serde::Serialize)]
pub struct ServerMetadata {
    pub version: String,
    pub uptime_seconds: u64,
}
