//! # Domain Types
//!
//! Common data structures used across the dispatch pipeline: identities, inbound events,
//! parsed commands and the two kinds of outbound message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discord channel snowflake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discord user snowflake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A chat message as delivered by the platform. Consumed once by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub author: UserId,
    pub channel: ChannelId,
    pub content: String,
}

impl InboundEvent {
    pub fn new(author: UserId, channel: ChannelId, content: impl Into<String>) -> Self {
        Self {
            author,
            channel,
            content: content.into(),
        }
    }
}

/// A command word plus its positional arguments, in token order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub command: String,
    pub args: Vec<String>,
}

/// Embed accent colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Blue,
    Green,
    Red,
}

impl Color {
    pub fn value(self) -> u32 {
        match self {
            Color::Blue => 0x3498db,
            Color::Green => 0x2ecc71,
            Color::Red => 0xe74c3c,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: false,
        }
    }

    pub fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            inline: true,
            ..Self::new(name, value)
        }
    }
}

/// Platform-neutral rich message. Fields keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    pub description: Option<String>,
    pub color: Color,
    pub fields: Vec<EmbedField>,
}

impl Embed {
    pub fn new(color: Color, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            color,
            fields: Vec::new(),
        }
    }

    /// Red embed carrying only an error title.
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(Color::Red, title)
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, field: EmbedField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = EmbedField>) -> Self {
        self.fields.extend(fields);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmbedMessage {
    pub channel: ChannelId,
    pub embed: Embed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundPlainMessage {
    pub channel: ChannelId,
    pub text: String,
}

/// Which outbound queue a message travels on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Embed,
    Plain,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::Embed => write!(f, "embed"),
            MessageKind::Plain => write!(f, "plain"),
        }
    }
}

/// Market snapshot of one coin, priced in `vs_currency`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinQuote {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub vs_currency: String,
    pub price: f64,
    pub change_24h_pct: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume_24h: Option<f64>,
    pub rank: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SteemAccount {
    pub name: String,
    pub balance: String,
    pub sbd_balance: String,
    pub vesting_shares: String,
    pub post_count: u64,
    pub reputation: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SteemPost {
    pub author: String,
    pub permlink: String,
    pub title: String,
    pub net_votes: i64,
    pub children: u64,
    pub pending_payout_value: String,
    pub created: String,
}
