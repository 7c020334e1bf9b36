//! # Info Commands
//!
//! Handles `%ping`, `%discord`, `%bug` and `%donate`.
//! Static replies that need no external data.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::handler::{CommandContext, CommandHandler};
use crate::domain::types::{Color, Embed, EmbedField};
use crate::strings::messages;

pub struct PingCommand;

#[async_trait]
impl CommandHandler for PingCommand {
    async fn handle(&self, ctx: CommandContext) -> Result<()> {
        let mut embed = Embed::new(Color::Blue, messages::pong(ctx.session.bot_name.as_deref()));
        if ctx.session.bot_user_id.is_some() {
            let age = ctx.session.age_secs(chrono::Utc::now());
            embed = embed.description(messages::session_age(age));
        }
        ctx.reply(embed).await
    }
}

/// Embed header plus the bare invite link, so Discord renders its invite card.
pub struct DiscordCommand;

#[async_trait]
impl CommandHandler for DiscordCommand {
    async fn handle(&self, ctx: CommandContext) -> Result<()> {
        ctx.reply(Embed::new(Color::Blue, messages::DISCORD_TITLE)).await?;
        ctx.reply_text(messages::DISCORD_INVITE).await
    }
}

pub struct BugCommand;

#[async_trait]
impl CommandHandler for BugCommand {
    async fn handle(&self, ctx: CommandContext) -> Result<()> {
        ctx.reply(Embed::new(Color::Blue, messages::BUG_TITLE).description(messages::BUG_REPORT))
            .await
    }
}

pub struct DonateCommand;

#[async_trait]
impl CommandHandler for DonateCommand {
    async fn handle(&self, ctx: CommandContext) -> Result<()> {
        let embed = Embed::new(Color::Blue, messages::DONATE_TITLE).fields(
            messages::DONATE_FIELDS
                .iter()
                .map(|(name, value)| EmbedField::new(*name, *value)),
        );
        ctx.reply(embed).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::session::SessionSnapshot;
    use crate::domain::types::UserId;
    use crate::interface::commands::fakes::context;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_ping_names_the_bot_when_connected() {
        let mut captured = context(&[]);
        PingCommand.handle(captured.ctx.clone()).await.unwrap();
        let embed = captured.drain_embeds().remove(0).embed;
        assert_eq!(embed.title, "Pong!");
        assert_eq!(embed.description, None);

        let mut snapshot = SessionSnapshot::new(UserId(1), "statbot", 3);
        snapshot.updated_at -= chrono::Duration::seconds(42);
        captured.ctx.session = Arc::new(snapshot);
        PingCommand.handle(captured.ctx.clone()).await.unwrap();
        let embed = captured.drain_embeds().remove(0).embed;
        assert_eq!(embed.title, "Pong! statbot is online.");
        let age = embed.description.unwrap();
        assert!(age.starts_with("Session refreshed 4"), "{age}");
        assert!(age.ends_with("s ago"));
    }

    #[tokio::test]
    async fn test_discord_sends_embed_and_plain_invite() {
        let mut captured = context(&[]);
        DiscordCommand.handle(captured.ctx.clone()).await.unwrap();

        let embeds = captured.drain_embeds();
        let texts = captured.drain_texts();
        assert_eq!(embeds.len(), 1);
        assert_eq!(embeds[0].embed.title, messages::DISCORD_TITLE);
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].text, messages::DISCORD_INVITE);
        assert_eq!(texts[0].channel, embeds[0].channel);
    }

    #[tokio::test]
    async fn test_donate_lists_addresses() {
        let mut captured = context(&[]);
        DonateCommand.handle(captured.ctx.clone()).await.unwrap();

        let embed = captured.drain_embeds().remove(0).embed;
        assert_eq!(embed.title, messages::DONATE_TITLE);
        let names: Vec<_> = embed.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names[1], "Steem");
        assert_eq!(names[3], "Bitcoin");
    }

    #[tokio::test]
    async fn test_bug_points_to_tracker() {
        let mut captured = context(&[]);
        BugCommand.handle(captured.ctx.clone()).await.unwrap();
        let embed = captured.drain_embeds().remove(0).embed;
        assert!(embed.description.as_deref().unwrap().contains("issues"));
    }
}
