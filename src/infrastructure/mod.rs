//! # Infrastructure Layer
//!
//! Handles interactions with external systems and services.
//! Implements the traits defined in the Domain layer (ChatPlatform, SessionSource, MarketData, SteemData).

pub mod coingecko;
pub mod discord;
pub mod steem;

use anyhow::{Context, Result};
use reqwest::Client;

use crate::domain::config::ApisConfig;

/// Shared HTTP client for the data providers.
pub fn http_client(config: &ApisConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.request_timeout())
        .user_agent(concat!("statbot/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")
}
