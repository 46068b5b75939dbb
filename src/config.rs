use crate::error::{Result, SourceError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://103.225.94.27/mediaserver";

/// Levels accepted for `log_level`
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for the MediaServer source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    /// Site root, including the WordPress install path
    pub base_url: String,

    /// User agent sent with every page fetch
    pub user_agent: String,

    /// HTTP request timeout in seconds
    pub request_timeout_seconds: u64,

    /// Log level used when no RUST_LOG filter is set
    pub log_level: String,
}

impl SourceConfig {
    /// Load configuration from the first config file found, falling back to
    /// defaults with environment overrides
    pub fn load() -> Result<Self> {
        let config_paths = [
            "mediaserver.toml",
            "config/mediaserver.toml",
            "/etc/mediaserver/config.toml",
        ];

        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str(&config_str) {
                    Ok(config) => {
                        tracing::info!("📄 Loaded configuration from: {}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {}: {}", path, e);
                    }
                }
            }
        }

        Self::from_env()
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&config_str)?;
        tracing::info!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("MEDIASERVER_BASE_URL") {
            config.base_url = base_url;
        }

        if let Ok(user_agent) = std::env::var("MEDIASERVER_USER_AGENT") {
            config.user_agent = user_agent;
        }

        if let Ok(timeout) = std::env::var("MEDIASERVER_TIMEOUT") {
            config.request_timeout_seconds = timeout.parse().unwrap_or(30);
        }

        if let Ok(log_level) = std::env::var("MEDIASERVER_LOG_LEVEL") {
            config.log_level = log_level;
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let config_str =
            toml::to_string_pretty(self).map_err(|e| SourceError::Config(e.to_string()))?;
        std::fs::write(path, config_str)?;
        tracing::info!("💾 Configuration saved to: {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(SourceError::Config(format!(
                "base_url must be http or https, got {}",
                url.scheme()
            )));
        }

        if self.request_timeout_seconds == 0 {
            return Err(SourceError::Config(
                "request_timeout_seconds must be greater than 0".to_string(),
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(SourceError::Config("user_agent must not be empty".to_string()));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(SourceError::Config(format!(
                "log_level must be one of {}, got {}",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }

        Ok(())
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "MediaServer Source Configuration:\n\
            - Base URL: {}\n\
            - Timeout: {}s\n\
            - Log Level: {}",
            self.base_url, self.request_timeout_seconds, self.log_level
        )
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_seconds: 30,
            log_level: "info".to_string(),
        }
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: SourceConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SourceConfig::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.config.request_timeout_seconds = seconds;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.config.log_level = level.into();
        self
    }

    pub fn build(self) -> SourceConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
