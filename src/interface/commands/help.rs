//! # Help Command
//!
//! Handles the `%help` command.
//! Displays the help menu with the running version in its title.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::handler::{CommandContext, CommandHandler};
use crate::domain::types::{Color, Embed, EmbedField};

pub struct HelpCommand {
    version: String,
}

impl HelpCommand {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    pub fn embed(&self) -> Embed {
        Embed::new(Color::Blue, crate::strings::help::title(&self.version)).fields(
            crate::strings::help::ENTRIES
                .iter()
                .map(|(name, value)| EmbedField::new(*name, *value)),
        )
    }
}

#[async_trait]
impl CommandHandler for HelpCommand {
    async fn handle(&self, ctx: CommandContext) -> Result<()> {
        ctx.reply(self.embed()).await
    }
}
