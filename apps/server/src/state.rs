//! Shared application state

use crate::config::Config;
use bridge_core::directory::ClientDirectory;
use bridge_core::mapping::FieldMappingTable;
use bridge_intakeq::IntakeQClient;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Read-only field-mapping table, built once per process.
    pub mapping_table: Arc<FieldMappingTable>,
    /// Target-platform directory. A trait object so tests can substitute an
    /// in-memory implementation for the HTTP client.
    pub directory: Arc<dyn ClientDirectory>,
}

impl AppState {
    /// Build production state: the IntakeQ HTTP client over the configured
    /// credentials and timeout.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = IntakeQClient::new(
            &config.intakeq.api_key,
            config.intakeq.base_url.clone(),
            Duration::from_secs(config.intakeq.timeout_seconds),
        )?;
        Ok(Self::with_directory(config, Arc::new(client)))
    }

    /// Build state over a custom directory implementation.
    pub fn with_directory(config: Config, directory: Arc<dyn ClientDirectory>) -> Self {
        Self {
            mapping_table: Arc::new(config.mapping_table()),
            config: Arc::new(config),
            directory,
        }
    }
}
