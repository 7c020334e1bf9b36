//! # Hunt Command
//!
//! Handles `%hunt <link>` (aliases `%sh`, `%steemhunt`).
//! Resolves a steemhunt.com post link and shows the post's stats.

use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use std::sync::{Arc, OnceLock};

use crate::application::handler::{CommandContext, CommandHandler};
use crate::domain::traits::SteemData;
use crate::domain::types::{Color, Embed, EmbedField};
use crate::strings::messages;

fn link_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?:https?://)?(?:www\.)?steemhunt\.com/@([a-z0-9][a-z0-9.-]*)/([a-z0-9-]+)/?(?:[?#].*)?$",
        )
        .expect("hunt link pattern is valid")
    })
}

/// `(author, permlink)` from a steemhunt post link.
pub fn parse_link(link: &str) -> Option<(String, String)> {
    let link = link.trim().trim_start_matches('<').trim_end_matches('>');
    let caps = link_regex().captures(link)?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

pub struct HuntCommand {
    steem: Arc<dyn SteemData>,
}

impl HuntCommand {
    pub fn new(steem: Arc<dyn SteemData>) -> Self {
        Self { steem }
    }
}

#[async_trait]
impl CommandHandler for HuntCommand {
    async fn handle(&self, ctx: CommandContext) -> Result<()> {
        let Some((author, permlink)) = ctx.arg(0).and_then(parse_link) else {
            return ctx.reply_error(messages::INVALID_HUNT_LINK).await;
        };

        let Some(post) = self.steem.post(&author, &permlink).await? else {
            return ctx.reply_error(messages::post_not_found(&author, &permlink)).await;
        };

        let embed = Embed::new(Color::Blue, post.title.clone())
            .description(messages::hunt_link(&post.author, &post.permlink))
            .fields([
                EmbedField::inline(messages::FIELD_AUTHOR, messages::account_title(&post.author)),
                EmbedField::inline(messages::FIELD_VOTES, post.net_votes.to_string()),
                EmbedField::inline(messages::FIELD_COMMENTS, post.children.to_string()),
                EmbedField::inline(messages::FIELD_PAYOUT, post.pending_payout_value.clone()),
                EmbedField::inline(messages::FIELD_CREATED, post.created.clone()),
            ]);
        ctx.reply(embed).await
    }
}
