//! Configuration management for the PC Forge client

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::form::FieldBinding;

/// Default build service address
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Default request timeout; build generation chains several model calls
const DEFAULT_TIMEOUT_SECS: u64 = 120;

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Environment variable overriding `server.base_url`
pub const SERVER_URL_ENV: &str = "PCFORGE_SERVER_URL";

/// Client configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Build service connection
    pub server: ServerConfig,
    /// Local query checks
    pub client: ClientConfig,
    /// Form fields filled from a parsed build
    pub fields: FieldsConfig,
}

/// Build service connection configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL; `/api/build-pc` is appended
    pub base_url: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Checks applied to a query before it is sent
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Refuse queries that do not mention pc/computer/hardware/build
    pub require_pc_topic: bool,
}

/// Field bindings, one per slot
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct FieldsConfig(pub Vec<FieldBinding>);

impl Default for FieldsConfig {
    fn default() -> Self {
        Self(FieldBinding::defaults())
    }
}

impl Config {
    /// Parse configuration from a TOML document
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str(content).context("Invalid configuration")?;
        Ok(config)
    }

    /// Parse configuration from a JSON value, falling back to defaults
    pub fn from_json_value(value: Option<serde_json::Value>) -> Self {
        match value {
            Some(value) => serde_json::from_value(value).unwrap_or_default(),
            None => Self::default(),
        }
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Load the user configuration if it exists, otherwise defaults.
    ///
    /// The server URL environment override is applied in both cases.
    pub fn load_default() -> anyhow::Result<Self> {
        let mut config = match default_config_path() {
            Some(path) if path.exists() => {
                tracing::debug!("Loading config from {}", path.display());
                Self::load(&path)?
            }
            _ => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Replace settings with values from the environment
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            let url = url.trim();
            if !url.is_empty() {
                self.server.base_url = url.to_string();
            }
        }
    }
}

/// `<config dir>/pcforge/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pcforge").join("config.toml"))
}
