//! # Domain Traits
//!
//! Abstract interfaces for the collaborators around the dispatch core: the chat platform,
//! the source of session information, and the market/blockchain data providers.
//! Allows for pluggable implementations in the Infrastructure layer.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::session::SessionSnapshot;
use crate::domain::types::{ChannelId, CoinQuote, Embed, SteemAccount, SteemPost};

/// Abstract interface for a Chat Platform (e.g., Discord)
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Send a rich embed to a channel
    async fn send_embed(&self, channel: ChannelId, embed: &Embed) -> Result<()>;

    /// Send plain text to a channel
    async fn send_text(&self, channel: ChannelId, text: &str) -> Result<()>;
}

/// Reads the live connection state when the session holder is refreshed.
pub trait SessionSource: Send + Sync {
    fn snapshot(&self) -> Option<SessionSnapshot>;
}

/// Cryptocurrency market data provider.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Quote for a ticker symbol (e.g. `btc`). `Ok(None)` when the symbol is unknown.
    async fn quote(&self, symbol: &str, vs_currency: &str) -> Result<Option<CoinQuote>>;

    /// Top coins by market cap.
    async fn top(&self, limit: usize, vs_currency: &str) -> Result<Vec<CoinQuote>>;

    /// Daily-ish price points for a coin id over the last `days`.
    async fn history(&self, coin_id: &str, vs_currency: &str, days: u32) -> Result<Vec<f64>>;
}

/// Steem blockchain reader.
#[async_trait]
pub trait SteemData: Send + Sync {
    async fn account(&self, name: &str) -> Result<Option<SteemAccount>>;

    async fn post(&self, author: &str, permlink: &str) -> Result<Option<SteemPost>>;
}
