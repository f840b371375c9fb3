//! Server configuration, loaded from a TOML file.
//!
//! Every section is optional; missing keys fall back to the defaults below.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{BlogError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// JSON seed file replacing the built-in fixtures.
    pub seed: Option<PathBuf>,
    pub server: ServerConfig,
    pub schema: SchemaConfig,
    pub subscription: SubscriptionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub depth_limit: usize,
    pub complexity_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionConfig {
    /// Period of the `count` subscription.
    pub count_interval_ms: u64,
    /// Buffered events per subscriber before it starts lagging.
    pub channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            seed: None,
            server: ServerConfig::default(),
            schema: SchemaConfig::default(),
            subscription: SubscriptionConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4000,
        }
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            depth_limit: 10,
            complexity_limit: 500,
        }
    }
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            count_interval_ms: 1000,
            channel_capacity: 64,
        }
    }
}

impl Config {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let text = fs::read_to_string(path)?;
        let mut config = Self::parse(&text)?;

        // Relative seed paths are resolved against the config file's directory
        if let (Some(seed), Some(dir)) = (config.seed.as_mut(), path.parent()) {
            if seed.is_relative() {
                *seed = dir.join(&*seed);
            }
        }
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(text).map_err(|e| BlogError::ParseError(format!("toml: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(BlogError::Config("server.port must be non-zero".into()));
        }
        if self.subscription.count_interval_ms == 0 {
            return Err(BlogError::Config(
                "subscription.count_interval_ms must be non-zero".into(),
            ));
        }
        if self.subscription.channel_capacity == 0 {
            return Err(BlogError::Config(
                "subscription.channel_capacity must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
