//! # Command Handler Contract
//!
//! Every user-facing command implements [`CommandHandler`]. A handler gets the originating
//! channel, its arguments, a session snapshot and the two enqueue capabilities, and must
//! have pushed every reply it wants delivered before its future completes.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::application::outbound::{EmbedSender, TextSender};
use crate::application::session::SessionSnapshot;
use crate::domain::types::{ChannelId, Embed};

#[derive(Clone)]
pub struct CommandContext {
    pub channel: ChannelId,
    pub args: Vec<String>,
    pub session: Arc<SessionSnapshot>,
    pub embeds: EmbedSender,
    pub texts: TextSender,
}

impl CommandContext {
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Enqueue an embed addressed to the originating channel.
    pub async fn reply(&self, embed: Embed) -> Result<()> {
        self.embeds.send_embed(self.channel, embed).await
    }

    /// Enqueue plain text addressed to the originating channel.
    pub async fn reply_text(&self, text: impl Into<String>) -> Result<()> {
        self.texts.send_text(self.channel, text).await
    }

    pub async fn reply_error(&self, message: impl Into<String>) -> Result<()> {
        self.reply(Embed::error(message)).await
    }
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, ctx: CommandContext) -> Result<()>;
}
