//! Configuration management for the bridge server

use bridge_core::mapping::{FieldMapping, FieldMappingTable};
use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub intakeq: IntakeQConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum request body size in bytes. Webhook payloads are small; the
    /// default leaves generous headroom.
    #[serde(default = "default_max_request_body_size")]
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntakeQConfig {
    /// API key for the target platform. Also read from the bare
    /// `INTAKEQ_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_intakeq_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds. Bounds hung outbound calls at the
    /// transport boundary; the pipeline imposes none itself.
    #[serde(default = "default_intakeq_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncConfig {
    /// Source-to-target custom-field correspondence rows. Empty means the
    /// shipped default table.
    #[serde(default)]
    pub field_mapping: Vec<FieldMapping>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON log lines on the console instead of human-readable output.
    #[serde(default)]
    pub json: bool,
    #[serde(default)]
    pub file_enabled: bool,
    #[serde(default = "default_log_directory")]
    pub file_directory: String,
    #[serde(default = "default_log_file_prefix")]
    pub file_prefix: String,
}

impl Config {
    /// Load configuration from environment and config files
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            // Start with defaults
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            .set_default(
                "server.max_request_body_size",
                default_max_request_body_size() as i64,
            )?
            .set_default("intakeq.api_key", "")?
            .set_default("intakeq.base_url", default_intakeq_base_url())?
            .set_default("intakeq.timeout_seconds", default_intakeq_timeout() as i64)?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.json", false)?
            .set_default("logging.file_enabled", false)?
            .set_default("logging.file_directory", default_log_directory())?
            .set_default("logging.file_prefix", default_log_file_prefix())?
            // Add config file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables
            // Uses double underscore (__) to map to nested config structure
            // Example: BRIDGE__INTAKEQ__API_KEY → config.intakeq.api_key
            .add_source(
                config::Environment::with_prefix("BRIDGE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Self = config.try_deserialize()?;

        // The original deployment configured the key under this bare name;
        // keep honoring it.
        if config.intakeq.api_key.is_empty() {
            if let Ok(key) = std::env::var("INTAKEQ_API_KEY") {
                config.intakeq.api_key = key;
            }
        }

        Ok(config)
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.intakeq.api_key.trim().is_empty() {
            return Err(
                "intakeq.api_key is not set (BRIDGE__INTAKEQ__API_KEY or INTAKEQ_API_KEY)".into(),
            );
        }
        if self.intakeq.timeout_seconds == 0 {
            return Err("intakeq.timeout_seconds must be at least 1".into());
        }
        if self.server.max_request_body_size == 0 {
            return Err("server.max_request_body_size must be positive".into());
        }
        Ok(())
    }

    /// Socket address the server binds to.
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid host/port: {e}"))
    }

    /// The field-mapping table, built once per process: configured rows when
    /// present, the shipped defaults otherwise.
    pub fn mapping_table(&self) -> FieldMappingTable {
        if self.sync.field_mapping.is_empty() {
            FieldMappingTable::default()
        } else {
            FieldMappingTable::new(self.sync.field_mapping.clone())
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_max_request_body_size() -> usize {
    1024 * 1024 // 1 MB
}

fn default_intakeq_base_url() -> String {
    bridge_intakeq::DEFAULT_BASE_URL.to_string()
}

fn default_intakeq_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "logs".to_string()
}

fn default_log_file_prefix() -> String {
    "app.log".to_string()
}
