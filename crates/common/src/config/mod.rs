//! Configuration management for Ronshin services
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config.toml, config.yaml)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Blob storage configuration
    pub storage: StorageConfig,

    /// Generation service configuration
    pub genai: GenAiConfig,

    /// Observability configuration
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds (a full composition run makes up to
    /// seven sequential generation calls)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Shutdown timeout in seconds
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Bucket used when a locator carries no path information
    #[serde(default = "default_bucket")]
    pub default_bucket: String,

    /// Object fetch timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenAiConfig {
    /// Static project/tenant identifier; takes precedence over the secret
    pub project_id: Option<String>,

    /// Secret name holding the project identifier
    #[serde(default = "default_project_id_secret")]
    pub project_id_secret: String,

    /// Service region
    #[serde(default = "default_location")]
    pub location: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Endpoint override (for emulators / proxies)
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_genai_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries for transient upstream failures
    #[serde(default = "default_genai_retries")]
    pub max_retries: u32,

    /// Maximum output tokens per call
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Metrics port (0 to disable)
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_request_timeout() -> u64 { 300 }
fn default_shutdown_timeout() -> u64 { 30 }
fn default_bucket() -> String { "ronshin-papers".to_string() }
fn default_fetch_timeout() -> u64 { 30 }
fn default_project_id_secret() -> String { "GENAI_PROJECT_ID".to_string() }
fn default_location() -> String { "us-central1".to_string() }
fn default_model() -> String { crate::DEFAULT_GENERATION_MODEL.to_string() }
fn default_genai_timeout() -> u64 { 60 }
fn default_genai_retries() -> u32 { 3 }
fn default_max_output_tokens() -> u32 { 2048 }
fn default_temperature() -> f32 { 0.2 }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }
fn default_metrics_port() -> u16 { 9090 }
fn default_service_name() -> String { "ronshin".to_string() }

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?

            // Load base config file
            .add_source(File::with_name("config/default").required(false))

            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))

            // Load local overrides
            .add_source(File::with_name("config/local").required(false))

            // Load from environment variables with APP__ prefix
            // e.g., APP__SERVER__PORT=8081
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load from a specific TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }

    /// Get shutdown timeout as Duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
                request_timeout_secs: default_request_timeout(),
                shutdown_timeout_secs: default_shutdown_timeout(),
            },
            storage: StorageConfig {
                default_bucket: default_bucket(),
                fetch_timeout_secs: default_fetch_timeout(),
            },
            genai: GenAiConfig {
                project_id: None,
                project_id_secret: default_project_id_secret(),
                location: default_location(),
                model: default_model(),
                endpoint: None,
                timeout_secs: default_genai_timeout(),
                max_retries: default_genai_retries(),
                max_output_tokens: default_max_output_tokens(),
                temperature: default_temperature(),
            },
            observability: ObservabilityConfig {
                log_level: default_log_level(),
                json_logging: default_json_logging(),
                metrics_port: default_metrics_port(),
                service_name: default_service_name(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.genai.model, "gemini-2.0-flash-001");
        assert_eq!(config.genai.location, "us-central1");
    }

    #[test]
    fn test_timeouts_as_durations() {
        let config = AppConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(300));
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(30));
    }
}
