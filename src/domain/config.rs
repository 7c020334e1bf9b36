//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Defines the structs for the Discord service, the bot itself, the dispatch pipeline
//! and the external market/blockchain APIs.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::domain::types::ChannelId;

pub const DEFAULT_CONFIG_PATH: &str = "data/config.yaml";

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub apis: ApisConfig,
}

impl AppConfig {
    /// Reads and validates the YAML file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: AppConfig =
            serde_yaml::from_str(content).context(crate::strings::logs::CONFIG_PARSE_ERROR)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.dispatch.embed_queue_capacity == 0 || self.dispatch.text_queue_capacity == 0 {
            bail!("dispatch queue capacities must be greater than zero");
        }
        if self.dispatch.max_concurrent_handlers == 0 {
            bail!("dispatch.max_concurrent_handlers must be greater than zero");
        }
        if self.dispatch.handler_timeout_secs == 0 {
            bail!("dispatch.handler_timeout_secs must be greater than zero");
        }
        if self.apis.request_timeout_secs == 0 {
            bail!("apis.request_timeout_secs must be greater than zero");
        }
        Ok(())
    }
}

/// Configuration for various connected services.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub discord: DiscordConfig,
}

/// Specific configuration for the Discord service.
#[derive(Debug, Deserialize, Clone)]
pub struct DiscordConfig {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_token_env")]
    pub token_env: String, // e.g. "DISCORD_TOKEN"
}

impl DiscordConfig {
    /// The inline token wins; otherwise the variable named by `token_env` is read.
    pub fn resolve_token(&self) -> Result<String> {
        if let Some(token) = self.token.as_ref().filter(|t| !t.trim().is_empty()) {
            return Ok(token.trim().to_string());
        }
        std::env::var(&self.token_env)
            .map(|t| t.trim().to_string())
            .with_context(|| format!("No Discord token configured and ${} is not set", self.token_env))
    }
}

fn default_token_env() -> String {
    "DISCORD_TOKEN".to_string()
}

/// Bot identity and access control.
#[derive(Debug, Deserialize, Clone)]
pub struct BotConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub whitelist: Vec<ChannelId>,
    #[serde(default = "default_status")]
    pub status: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            whitelist: Vec::new(),
            status: default_status(),
        }
    }
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_status() -> String {
    "Statbot V2 %help to get started".to_string()
}

/// Sizing of the outbound queues and the handler pool.
#[derive(Debug, Deserialize, Clone)]
pub struct DispatchConfig {
    #[serde(default = "default_queue_capacity")]
    pub embed_queue_capacity: usize,
    #[serde(default = "default_queue_capacity")]
    pub text_queue_capacity: usize,
    #[serde(default = "default_max_concurrent_handlers")]
    pub max_concurrent_handlers: usize,
    #[serde(default = "default_handler_timeout")]
    pub handler_timeout_secs: u64,
}

impl DispatchConfig {
    pub fn handler_timeout(&self) -> Duration {
        Duration::from_secs(self.handler_timeout_secs)
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            embed_queue_capacity: default_queue_capacity(),
            text_queue_capacity: default_queue_capacity(),
            max_concurrent_handlers: default_max_concurrent_handlers(),
            handler_timeout_secs: default_handler_timeout(),
        }
    }
}

fn default_queue_capacity() -> usize {
    100
}
fn default_max_concurrent_handlers() -> usize {
    64
}
fn default_handler_timeout() -> u64 {
    30
}

/// Endpoints of the market and blockchain providers.
#[derive(Debug, Deserialize, Clone)]
pub struct ApisConfig {
    #[serde(default = "default_coingecko_url")]
    pub coingecko_url: String,
    #[serde(default = "default_steem_url")]
    pub steem_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl ApisConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ApisConfig {
    fn default() -> Self {
        Self {
            coingecko_url: default_coingecko_url(),
            steem_url: default_steem_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_coingecko_url() -> String {
    "https://api.coingecko.com/api/v3".to_string()
}
fn default_steem_url() -> String {
    "https://api.steemit.com".to_string()
}
fn default_request_timeout() -> u64 {
    15
}

/// Deployment mode, read once from `ENV` at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentMode {
    Development,
    Production,
}

impl DeploymentMode {
    pub fn from_env() -> Self {
        Self::parse(std::env::var("ENV").ok().as_deref())
    }

    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("development") => Self::Development,
            _ => Self::Production,
        }
    }
}

impl std::fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}
