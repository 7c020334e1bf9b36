//! # Discord Adapter
//!
//! Bridges serenity to the dispatch core:
//! - [`DiscordPlatform`] implements `ChatPlatform` over the REST client, used by the
//!   dispatcher workers.
//! - [`DiscordSession`] reads the bot identity out of serenity's cache for the session holder.
//! - [`DiscordHandler`] turns gateway `message` events into [`InboundEvent`]s.

use anyhow::{Result, bail};
use async_trait::async_trait;
use serenity::all::{
    ActivityData, ChannelId as DiscordChannelId, Context, CreateEmbed, CreateMessage,
    EventHandler, GatewayIntents, Http, Message, Ready,
};
use std::sync::Arc;

use crate::application::dispatcher::EventDispatcher;
use crate::application::session::SessionSnapshot;
use crate::domain::traits::{ChatPlatform, SessionSource};
use crate::domain::types::{ChannelId, Embed, InboundEvent, UserId};

pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
}

fn discord_channel(channel: ChannelId) -> Result<DiscordChannelId> {
    if channel.0 == 0 {
        bail!("invalid channel id 0");
    }
    Ok(DiscordChannelId::new(channel.0))
}

pub fn to_discord_embed(embed: &Embed) -> CreateEmbed {
    let mut out = CreateEmbed::new()
        .title(&embed.title)
        .colour(embed.color.value());
    if let Some(description) = &embed.description {
        out = out.description(description);
    }
    out.fields(
        embed
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone(), f.inline)),
    )
}

#[derive(Clone)]
pub struct DiscordPlatform {
    http: Arc<Http>,
}

impl DiscordPlatform {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ChatPlatform for DiscordPlatform {
    async fn send_embed(&self, channel: ChannelId, embed: &Embed) -> Result<()> {
        discord_channel(channel)?
            .send_message(
                self.http.as_ref(),
                CreateMessage::new().embed(to_discord_embed(embed)),
            )
            .await?;
        Ok(())
    }

    async fn send_text(&self, channel: ChannelId, text: &str) -> Result<()> {
        discord_channel(channel)?.say(self.http.as_ref(), text).await?;
        Ok(())
    }
}

/// Session source backed by the gateway context of the event being handled.
pub struct DiscordSession(pub Context);

impl SessionSource for DiscordSession {
    fn snapshot(&self) -> Option<SessionSnapshot> {
        let guilds = self.0.cache.guilds().len();
        let user = self.0.cache.current_user();
        Some(SessionSnapshot::new(
            UserId(user.id.get()),
            user.name.clone(),
            guilds,
        ))
    }
}

pub struct DiscordHandler {
    dispatcher: Arc<EventDispatcher>,
    status: String,
}

impl DiscordHandler {
    pub fn new(dispatcher: Arc<EventDispatcher>, status: impl Into<String>) -> Self {
        Self {
            dispatcher,
            status: status.into(),
        }
    }
}

#[async_trait]
impl EventHandler for DiscordHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!(
            "{}",
            crate::strings::logs::bot_ready(&ready.user.name, ready.guilds.len())
        );
        self.dispatcher.session().publish(SessionSnapshot::new(
            UserId(ready.user.id.get()),
            ready.user.name.clone(),
            ready.guilds.len(),
        ));
        ctx.set_activity(Some(ActivityData::playing(self.status.clone())));
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let event = InboundEvent::new(
            UserId(msg.author.id.get()),
            ChannelId(msg.channel_id.get()),
            msg.content,
        );
        let outcome = match self.dispatcher.handle_event(event, DiscordSession(ctx)).await {
            Ok(dispatch) => dispatch.settle().await,
            Err(e) => Err(e),
        };
        if let Err(e) = outcome {
            tracing::error!("{}", crate::strings::logs::dispatch_failed(&e.to_string()));
        }
    }
}
